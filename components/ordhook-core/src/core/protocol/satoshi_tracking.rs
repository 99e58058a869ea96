use bitcoin::Transaction;
use ord::object_id::ObjectID;
use ord::sat_point::subsidy;

use crate::core::model::{Flotsam, SatPoint};

/// Per-input placement: walks `tx`'s outputs cumulatively and reports
/// where the satoshi carrying `oid`, at `offset` within input
/// `input_index`, lands. `true` means it matched an output; `false` means
/// it fell through to fees, in which case `SatPoint.output_index` is set
/// to `input_index` and `SatPoint.offset` is the fee-relative carry
/// offset (not a byte-within-output), ready to become a [`Flotsam`].
///
/// Ties break toward the later output: a satoshi landing exactly on an
/// output boundary is attributed to the next output at offset 0, which is
/// why the scan below uses strict `>`.
pub fn match_utxo_and_generate_sat_point(
    offset: u64,
    oid: ObjectID,
    tx: &Transaction,
    input_utxo_values: &[u64],
    input_index: usize,
) -> (bool, SatPoint) {
    let input_acc: u64 = input_utxo_values[..input_index].iter().sum::<u64>() + offset;

    let mut output_acc = 0u64;
    for (vout, output) in tx.output.iter().enumerate() {
        let value = output.value.to_sat();
        if output_acc + value > input_acc {
            return (
                true,
                SatPoint {
                    output_index: vout as u32,
                    offset: input_acc - output_acc,
                    object_id: oid,
                },
            );
        }
        output_acc += value;
    }

    (
        false,
        SatPoint {
            output_index: input_index as u32,
            offset: input_acc - output_acc,
            object_id: oid,
        },
    )
}

/// Coinbase placement: places flotsam `flotsams[flotsam_index]` onto the
/// coinbase transaction's reward, ahead of every flotsam before it in the
/// block's spend order. The caller is responsible for guaranteeing the
/// coinbase's output value covers `subsidy(block_height)` plus every
/// flotsam offset — there is no miss branch here, unlike the per-input
/// case.
pub fn match_coinbase_and_generate_sat_point(
    flotsam_index: usize,
    tx: &Transaction,
    flotsams: &[Flotsam],
    block_height: u64,
) -> SatPoint {
    let reward_acc: u64 = subsidy(block_height)
        + flotsams[..=flotsam_index]
            .iter()
            .map(|f| f.offset)
            .sum::<u64>();

    let mut output_acc = 0u64;
    for (vout, output) in tx.output.iter().enumerate() {
        let value = output.value.to_sat();
        if output_acc + value > reward_acc {
            return SatPoint {
                output_index: vout as u32,
                offset: reward_acc - output_acc,
                object_id: flotsams[flotsam_index].object_id,
            };
        }
        output_acc += value;
    }

    unreachable!("coinbase output value must cover subsidy plus every flotsam offset")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_builders::{TestTransactionBuilder, TestTxOutBuilder};

    fn oid() -> ObjectID {
        ObjectID::from_bytes([7u8; 32])
    }

    #[test]
    fn lands_in_first_output_when_small() {
        let tx = TestTransactionBuilder::new()
            .add_output(TestTxOutBuilder::new().value(2_000).build())
            .add_output(TestTxOutBuilder::new().value(8_000).build())
            .build();
        let (matched, sat_point) =
            match_utxo_and_generate_sat_point(500, oid(), &tx, &[10_000], 0);
        assert!(matched);
        assert_eq!(sat_point.output_index, 0);
        assert_eq!(sat_point.offset, 500);
    }

    #[test]
    fn ties_break_toward_the_later_output() {
        let tx = TestTransactionBuilder::new()
            .add_output(TestTxOutBuilder::new().value(2_000).build())
            .add_output(TestTxOutBuilder::new().value(8_000).build())
            .build();
        let (matched, sat_point) =
            match_utxo_and_generate_sat_point(2_000, oid(), &tx, &[10_000], 0);
        assert!(matched);
        assert_eq!(sat_point.output_index, 1);
        assert_eq!(sat_point.offset, 0);
    }

    #[test]
    fn falls_to_fee_when_past_all_outputs() {
        let tx = TestTransactionBuilder::new()
            .add_output(TestTxOutBuilder::new().value(500).build())
            .add_output(TestTxOutBuilder::new().value(300).build())
            .build();
        let (matched, sat_point) =
            match_utxo_and_generate_sat_point(900, oid(), &tx, &[1_000], 0);
        assert!(!matched);
        assert_eq!(sat_point.output_index, 0);
        assert_eq!(sat_point.offset, 100);
    }

    #[test]
    fn later_input_offsets_prior_input_values() {
        let tx = TestTransactionBuilder::new()
            .add_output(TestTxOutBuilder::new().value(500).build())
            .add_output(TestTxOutBuilder::new().value(10_500).build())
            .build();
        let (matched, sat_point) =
            match_utxo_and_generate_sat_point(200, oid(), &tx, &[1_000, 10_000], 1);
        assert!(matched);
        assert_eq!(sat_point.output_index, 1);
        assert_eq!(sat_point.offset, 700);
    }

    #[test]
    fn coinbase_places_after_subsidy_and_prior_flotsams() {
        let tx = TestTransactionBuilder::new()
            .add_output(TestTxOutBuilder::new().value(6_000_000_000).build())
            .build();
        let flotsams = vec![Flotsam {
            output_index: 0,
            offset: 100,
            object_id: ObjectID::from_bytes([1u8; 32]),
        }];
        let sat_point = match_coinbase_and_generate_sat_point(0, &tx, &flotsams, 1);
        assert_eq!(sat_point.output_index, 0);
        assert_eq!(sat_point.offset, 5_000_000_100);
        assert_eq!(sat_point.object_id, flotsams[0].object_id);
    }
}
