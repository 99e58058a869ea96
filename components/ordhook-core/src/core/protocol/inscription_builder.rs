use bitcoin::Transaction;
use ord::envelope::{ParsedEnvelope, RawEnvelope};
use ord::inscription::Inscription as InscriptionRecord;
use ord::inscription_id::InscriptionId;

use crate::core::protocol::record_validation::validate_record;
use crate::core::store::InscriptionStore;
use crate::events::InvalidInscriptionEvent;
use crate::Context;

/// An inscription freshly extracted from one transaction, numbered from
/// the store's counters but not yet placed in an output or owned by
/// anyone — that's [`crate::core::protocol::transaction_processor::process_transaction`]'s job.
#[derive(Debug, Clone)]
pub struct BuiltInscription {
    pub id: InscriptionId,
    pub offset: u64,
    pub sequence_number: u32,
    pub inscription_number: u32,
    pub record: InscriptionRecord,
}

/// Extracts and numbers every valid inscription carried by `tx`'s inputs,
/// in ascending `(input_index, envelope_offset)` order, per §4.4 of the
/// satoshi-tracking algorithm this module implements.
pub fn build_inscriptions(
    tx: &Transaction,
    input_utxo_values: &[u64],
    store: &mut InscriptionStore,
    ctx: &Context,
) -> (Vec<BuiltInscription>, Vec<InvalidInscriptionEvent>) {
    let txid = tx.compute_txid();
    let mut next_offset = 0u64;
    let mut index_counter = 0u32;
    let mut built = Vec::new();
    let mut invalid_events = Vec::new();

    for (input_index, input) in tx.input.iter().enumerate() {
        let input_value = input_utxo_values.get(input_index).copied().unwrap_or(0);

        let envelopes = RawEnvelope::from_witness(&input.witness, input_index).unwrap_or_default();

        for raw in envelopes {
            let parsed = ParsedEnvelope::from(raw);
            match validate_record(txid, input_index, parsed.payload, ctx) {
                Ok(record) => {
                    let mut pointer = record.pointer.unwrap_or(0);
                    if pointer >= input_value {
                        pointer = 0;
                    }

                    let inscription_number = store.blessed_inscription_count;
                    store.blessed_inscription_count += 1;
                    let sequence_number = store.next_sequence_number;
                    store.next_sequence_number += 1;

                    built.push(BuiltInscription {
                        id: InscriptionId {
                            txid,
                            index: index_counter,
                        },
                        offset: next_offset + pointer,
                        sequence_number,
                        inscription_number,
                        record,
                    });
                    index_counter += 1;
                }
                Err(event) => invalid_events.push(event),
            }
        }

        next_offset += input_value;
    }

    (built, invalid_events)
}
