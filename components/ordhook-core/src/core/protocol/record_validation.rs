use bitcoin::Txid;
use ord::inscription::Inscription as InscriptionRecord;

use crate::events::InvalidInscriptionEvent;
use crate::{try_info, Context};

/// A record is valid iff none of its three structural defect flags are
/// set. Invalid records never become inscriptions; the caller emits an
/// [`InvalidInscriptionEvent`] and moves on to the next envelope.
pub fn is_valid_record(record: &InscriptionRecord) -> bool {
    !record.duplicate_field && !record.incomplete_field && !record.unrecognized_even_field
}

/// Validates a record pulled from `txid`'s input `input_index`, logging
/// and returning an event to emit if it's rejected.
pub fn validate_record(
    txid: Txid,
    input_index: usize,
    record: InscriptionRecord,
    ctx: &Context,
) -> Result<InscriptionRecord, InvalidInscriptionEvent> {
    if is_valid_record(&record) {
        Ok(record)
    } else {
        try_info!(
            ctx,
            "dropping invalid inscription record on {txid} input {input_index}: duplicate={} incomplete={} unrecognized_even={}",
            record.duplicate_field,
            record.incomplete_field,
            record.unrecognized_even_field
        );
        Err(InvalidInscriptionEvent {
            txid,
            input_index,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;

    #[test]
    fn default_record_is_valid() {
        assert!(is_valid_record(&InscriptionRecord::default()));
    }

    #[test]
    fn duplicate_field_is_invalid() {
        let record = InscriptionRecord {
            duplicate_field: true,
            ..Default::default()
        };
        assert!(!is_valid_record(&record));
    }

    #[test]
    fn validate_record_emits_event_for_invalid_record() {
        let ctx = Context::empty();
        let record = InscriptionRecord {
            incomplete_field: true,
            ..Default::default()
        };
        let err = validate_record(Txid::all_zeros(), 0, record, &ctx).unwrap_err();
        assert_eq!(err.input_index, 0);
    }
}
