use crate::core::areas::{PermanentArea, TemporaryArea};
use ord::charm::Charm;
use ord::inscription_id::InscriptionId;
use ord::object_id::ObjectID;

/// Where an inscription's satoshi lands within the transaction currently
/// being processed. Unlike [`ord::sat_point::SatPoint`] (a persisted,
/// cross-transaction `txid:vout:offset` triple) this is scoped to "the
/// current tx's output `output_index`, at byte `offset`" — the shape the
/// sat-point tracker's two entry points return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatPoint {
    pub output_index: u32,
    pub offset: u64,
    pub object_id: ObjectID,
}

/// An inscription whose satoshi was paid out as transaction fees and is
/// in transit to the block's coinbase output. Carries only what's needed
/// to resume placement once the coinbase's outputs are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flotsam {
    pub output_index: u32,
    pub offset: u64,
    pub object_id: ObjectID,
}

/// A UTXO about to be spent, carrying the inscriptions currently sealed
/// to it in the order they were sealed. Transaction/witness decoding
/// happens outside this crate; the outer indexer is expected to resolve
/// a spent outpoint to this view before calling
/// [`crate::core::protocol::transaction_processor::spend_utxo`].
#[derive(Debug, Clone, Default)]
pub struct SealedUtxo {
    pub object_ids: Vec<ObjectID>,
}

/// Per-inscription validity record sealed by the metaprotocol handler
/// that declared ownership of it, stored as the `"metaprotocol_validity"`
/// dynamic field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaprotocolValidity {
    pub protocol_type: String,
    pub is_valid: bool,
    pub invalid_reason: Option<String>,
}

/// The `"inscription_charm"` dynamic field: absent until the first write,
/// then a thin wrapper over the bitflag word so future charms (sat
/// rarity, vindication) can be added without a schema migration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InscriptionCharm(pub u16);

impl InscriptionCharm {
    pub fn burned(self) -> bool {
        Charm::Burned.is_set(self.0)
    }

    pub fn set_burned(&mut self) {
        Charm::Burned.set(&mut self.0);
    }
}

/// Where an inscription's underlying satoshi currently sits: a normal
/// holder address, or a non-standard/unspendable script it was burned
/// into (kept as the script's own display string since no address exists
/// for it).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Address(String),
    Script(String),
}

/// The indexed entity: created once by [`crate::core::protocol::transaction_processor::process_transaction`],
/// mutated only through the three friend entry points and the area/
/// metaprotocol operations. Never destroyed.
#[derive(Debug, Clone)]
pub struct Inscription {
    pub id: InscriptionId,
    pub offset: u64,
    pub sequence_number: u32,
    pub inscription_number: u32,
    pub is_curse: bool,
    pub body: Option<Vec<u8>>,
    pub content_encoding: Option<String>,
    pub content_type: Option<Vec<u8>>,
    pub metadata: Option<Vec<u8>>,
    pub metaprotocol: Option<String>,
    pub parents: Vec<ObjectID>,
    pub pointer: Option<u64>,
    pub rune: Option<Vec<u8>>,
    pub owner: Owner,
    pub frozen: bool,
    pub permanent_area: PermanentArea,
    pub temporary_area: TemporaryArea,
    pub metaprotocol_validity: Option<MetaprotocolValidity>,
    pub charm: InscriptionCharm,
}

impl Inscription {
    /// Frozen objects reject every write path; burn is the only thing
    /// that freezes an inscription and burn is terminal, so this check
    /// alone is sufficient to enforce invariant 5 (burn terminality).
    pub fn assert_not_frozen(&self) -> Result<(), String> {
        if self.frozen {
            Err(format!("inscription {} is frozen", self.id))
        } else {
            Ok(())
        }
    }
}
