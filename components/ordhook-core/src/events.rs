use ord::inscription::Inscription;
use ord::object_id::ObjectID;
use bitcoin::Txid;

/// Emitted when a record's envelope failed structural validation and was
/// dropped rather than turned into an inscription. Non-fatal: processing
/// continues with the next input.
#[derive(Debug, Clone)]
pub struct InvalidInscriptionEvent {
    pub txid: Txid,
    pub input_index: usize,
    pub record: Inscription,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventType {
    New = 0,
    Burn = 1,
}

/// Posted to the named queue for an inscription's declared metaprotocol,
/// once on creation (`New`) and once more if it's later burned.
#[derive(Debug, Clone)]
pub struct InscriptionEvent {
    pub metaprotocol: String,
    pub sequence_number: u32,
    pub inscription_obj_id: ObjectID,
    pub event_type: EventType,
}
