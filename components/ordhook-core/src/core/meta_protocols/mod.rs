pub mod brc20;

use std::any::{type_name, Any};
use std::collections::HashMap;

use ord::object_id::ObjectID;

use crate::config::EngineConfig;
use crate::core::areas::PermanentAreaValue;
use crate::core::model::MetaprotocolValidity;
use crate::core::store::InscriptionStore;
use crate::error::EngineError;

/// Capability token standing in for "caller is the system reserved
/// authority". Only code that has a `SystemCap` in hand can register a
/// metaprotocol; in a real deployment this would be minted once at
/// startup and held by the engine's bootstrap path, never handed to
/// per-transaction callers.
pub struct SystemCap(());

impl SystemCap {
    pub fn issue() -> Self {
        Self(())
    }
}

/// `metaprotocol_name -> protocol_type_name`, insertion-unique. Its own
/// named singleton, separate from [`InscriptionStore`].
#[derive(Default)]
pub struct MetaprotocolRegistry {
    names: HashMap<String, String>,
}

impl MetaprotocolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn type_name_matches(&self, name: &str, type_name: &str) -> Result<(), EngineError> {
        match self.names.get(name) {
            Some(registered) if registered == type_name => Ok(()),
            _ => Err(EngineError::MetaprotocolProtocolMismatch),
        }
    }
}

/// Registers `name -> type_name::<T>()`. Fails if `name` is already
/// taken, regardless of which type it was registered under.
pub fn register_metaprotocol_via_system<T: Any>(
    _caller: &SystemCap,
    registry: &mut MetaprotocolRegistry,
    name: &str,
) -> Result<(), EngineError> {
    if registry.names.contains_key(name) {
        return Err(EngineError::MetaprotocolAlreadyRegistered);
    }
    registry
        .names
        .insert(name.to_string(), type_name::<T>().to_string());
    Ok(())
}

/// Builds the registry an engine instance starts with, reading
/// `config.metaprotocols` to decide which reference handlers to wire up.
/// Today the only toggle is `brc20`, which registers the `Brc20` marker
/// type under `"brc-20"` when set; a real deployment would add one branch
/// per metaprotocol it ships a handler for.
pub fn bootstrap_registry(config: &EngineConfig) -> MetaprotocolRegistry {
    let mut registry = MetaprotocolRegistry::new();
    let cap = SystemCap::issue();

    if config.metaprotocols.brc20 {
        register_metaprotocol_via_system::<brc20::Brc20>(&cap, &mut registry, "brc-20")
            .expect("brc-20 registered exactly once at bootstrap");
    }

    registry
}

/// Upserts the validity record on the inscription identified by
/// `object_id`, provided its declared `metaprotocol` maps (via the
/// registry) to exactly `type_name::<T>()`.
pub fn seal_metaprotocol_validity<T: Any>(
    registry: &MetaprotocolRegistry,
    store: &mut InscriptionStore,
    object_id: ObjectID,
    is_valid: bool,
    reason: Option<String>,
) -> Result<(), EngineError> {
    let inscription = store
        .get(&object_id)
        .ok_or(EngineError::MetaprotocolProtocolMismatch)?;
    let declared = inscription
        .metaprotocol
        .clone()
        .ok_or(EngineError::MetaprotocolProtocolMismatch)?;
    registry.type_name_matches(&declared, type_name::<T>())?;
    inscription
        .assert_not_frozen()
        .map_err(|_| EngineError::MetaprotocolProtocolMismatch)?;

    let inscription = store.get_mut(&object_id).expect("checked above");
    inscription.metaprotocol_validity = Some(MetaprotocolValidity {
        protocol_type: type_name::<T>().to_string(),
        is_valid,
        invalid_reason: reason,
    });
    Ok(())
}

/// Adds `obj` to the inscription's permanent area, keyed by
/// `type_name::<T>()`, provided the same registry/declared-metaprotocol
/// check `seal_metaprotocol_validity` performs.
pub fn add_metaprotocol_attachment<T: PermanentAreaValue>(
    registry: &MetaprotocolRegistry,
    store: &mut InscriptionStore,
    object_id: ObjectID,
    obj: T,
) -> Result<(), EngineError> {
    let inscription = store
        .get(&object_id)
        .ok_or(EngineError::MetaprotocolProtocolMismatch)?;
    let declared = inscription
        .metaprotocol
        .clone()
        .ok_or(EngineError::MetaprotocolProtocolMismatch)?;
    registry.type_name_matches(&declared, type_name::<T>())?;

    inscription.assert_not_frozen().map_err(|_| EngineError::MetaprotocolProtocolMismatch)?;
    store
        .get_mut(&object_id)
        .expect("checked above")
        .permanent_area
        .add(obj);
    Ok(())
}
