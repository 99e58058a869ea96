use std::collections::HashMap;

use ord::inscription_id::InscriptionId;
use ord::object_id::ObjectID;

use crate::core::model::Inscription;
use crate::events::{EventType, InscriptionEvent};

/// Process-wide shared singleton. Its counters and `sequence_number ->
/// InscriptionID` map are writable only through the three friend entry
/// points in [`crate::core::protocol::transaction_processor`] plus
/// [`InscriptionStore::genesis_init`] — every other module borrows it
/// immutably or goes through those paths.
///
/// `objects` stands in for the external object-store `spec.md` delegates
/// persistence to: this crate has no collaborator to hand inscriptions
/// off to, so it keeps them in-memory, keyed by the same `ObjectID` a
/// real object-store would use.
pub struct InscriptionStore {
    pub cursed_inscription_count: u32,
    pub blessed_inscription_count: u32,
    pub next_sequence_number: u32,
    pub sequence_to_id: HashMap<u32, InscriptionId>,
    pub objects: HashMap<ObjectID, Inscription>,
    pub metaprotocol_events: HashMap<String, Vec<InscriptionEvent>>,
}

impl InscriptionStore {
    pub fn genesis_init() -> Self {
        Self {
            cursed_inscription_count: 0,
            blessed_inscription_count: 0,
            next_sequence_number: 0,
            sequence_to_id: HashMap::new(),
            objects: HashMap::new(),
            metaprotocol_events: HashMap::new(),
        }
    }

    /// `object_id(parent = InscriptionStore_id, child_key = iid)`. The
    /// store has exactly one instance per engine, so its identity
    /// contributes a fixed discriminant rather than a per-call value.
    pub fn derive_inscription_id(&self, iid: InscriptionId) -> ObjectID {
        const STORE_DISCRIMINANT: u32 = 0;
        ObjectID::derive(iid, STORE_DISCRIMINANT)
    }

    /// Records `sequence_number -> iid`, inserts the object, and emits
    /// the metaprotocol `New` event if one is set. Returns the derived
    /// `ObjectID` the caller should use for every subsequent lookup.
    pub fn create_obj(&mut self, inscription: Inscription) -> ObjectID {
        let object_id = self.derive_inscription_id(inscription.id);
        self.sequence_to_id
            .insert(inscription.sequence_number, inscription.id);

        if let Some(metaprotocol) = inscription.metaprotocol.clone() {
            self.metaprotocol_events
                .entry(metaprotocol.clone())
                .or_default()
                .push(InscriptionEvent {
                    metaprotocol,
                    sequence_number: inscription.sequence_number,
                    inscription_obj_id: object_id,
                    event_type: EventType::New,
                });
        }

        self.objects.insert(object_id, inscription);
        object_id
    }

    pub fn get(&self, object_id: &ObjectID) -> Option<&Inscription> {
        self.objects.get(object_id)
    }

    pub fn get_mut(&mut self, object_id: &ObjectID) -> Option<&mut Inscription> {
        self.objects.get_mut(object_id)
    }

    pub fn emit_burn_event(&mut self, metaprotocol: String, sequence_number: u32, object_id: ObjectID) {
        self.metaprotocol_events
            .entry(metaprotocol.clone())
            .or_default()
            .push(InscriptionEvent {
                metaprotocol,
                sequence_number,
                inscription_obj_id: object_id,
                event_type: EventType::Burn,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::areas::{PermanentArea, TemporaryArea};
    use crate::core::model::{InscriptionCharm, Owner};
    use bitcoin::hashes::Hash;
    use bitcoin::Txid;

    fn test_inscription(sequence_number: u32, metaprotocol: Option<&str>) -> Inscription {
        Inscription {
            id: InscriptionId {
                txid: Txid::all_zeros(),
                index: 0,
            },
            offset: 0,
            sequence_number,
            inscription_number: sequence_number,
            is_curse: false,
            body: None,
            content_encoding: None,
            content_type: None,
            metadata: None,
            metaprotocol: metaprotocol.map(|s| s.to_string()),
            parents: vec![],
            pointer: None,
            rune: None,
            owner: Owner::Address("bc1qtest".to_string()),
            frozen: false,
            permanent_area: PermanentArea::new(),
            temporary_area: TemporaryArea::new(),
            metaprotocol_validity: None,
            charm: InscriptionCharm::default(),
        }
    }

    #[test]
    fn genesis_starts_at_zero() {
        let store = InscriptionStore::genesis_init();
        assert_eq!(store.next_sequence_number, 0);
        assert_eq!(store.blessed_inscription_count, 0);
    }

    #[test]
    fn create_obj_records_sequence_mapping() {
        let mut store = InscriptionStore::genesis_init();
        let inscription = test_inscription(0, None);
        let id = inscription.id;
        let object_id = store.create_obj(inscription);
        assert_eq!(store.sequence_to_id.get(&0), Some(&id));
        assert!(store.get(&object_id).is_some());
    }

    #[test]
    fn create_obj_emits_new_event_when_metaprotocol_set() {
        let mut store = InscriptionStore::genesis_init();
        store.create_obj(test_inscription(0, Some("brc-20")));
        let events = store.metaprotocol_events.get("brc-20").unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, EventType::New);
    }

    #[test]
    fn create_obj_emits_no_event_without_metaprotocol() {
        let mut store = InscriptionStore::genesis_init();
        store.create_obj(test_inscription(0, None));
        assert!(store.metaprotocol_events.is_empty());
    }
}
