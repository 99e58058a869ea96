use bitcoin::{Address, Transaction};

use crate::config::EngineConfig;
use crate::core::model::{Flotsam, Owner, SatPoint, SealedUtxo};
use crate::core::protocol::inscription_builder::build_inscriptions;
use crate::core::protocol::satoshi_tracking::{
    match_coinbase_and_generate_sat_point, match_utxo_and_generate_sat_point,
};
use crate::core::store::InscriptionStore;
use crate::events::InvalidInscriptionEvent;
use crate::{try_info, Context};

/// Resolves the holder of `output`'s scriptPubKey the way `ord`'s own
/// transfer bookkeeping does: a standard-address script becomes
/// `Owner::Address`, anything else (including `OP_RETURN`) is kept as the
/// script's own display string since no address exists for it.
fn owner_of(output: &bitcoin::TxOut, config: &EngineConfig) -> Owner {
    match Address::from_script(&output.script_pubkey, config.network) {
        Ok(address) => Owner::Address(address.to_string()),
        Err(_) => Owner::Script(output.script_pubkey.to_string()),
    }
}

/// Extracts and places every new inscription carried by `tx`'s inputs.
/// Placement mode is chosen once per transaction: `SeparateOutputs` when
/// the output count exactly matches the inscription count, otherwise
/// every inscription lands on output 0 (SameSat/SharedOutput), each
/// keeping the offset the builder computed for it.
pub fn process_transaction(
    tx: &Transaction,
    input_utxo_values: &[u64],
    store: &mut InscriptionStore,
    config: &EngineConfig,
    ctx: &Context,
) -> (Vec<SatPoint>, Vec<InvalidInscriptionEvent>) {
    let (built, invalid_events) = build_inscriptions(tx, input_utxo_values, store, ctx);
    let mut sat_points = Vec::with_capacity(built.len());

    if built.is_empty() {
        return (sat_points, invalid_events);
    }

    let separate_outputs = tx.output.len() == built.len();

    for (i, built) in built.into_iter().enumerate() {
        let output_index = if separate_outputs { i } else { 0 };
        let offset = if separate_outputs { 0 } else { built.offset };

        let parents = built
            .record
            .parents
            .iter()
            .map(|parent_iid| store.derive_inscription_id(*parent_iid))
            .collect();

        let inscription = crate::core::model::Inscription {
            id: built.id,
            offset,
            sequence_number: built.sequence_number,
            inscription_number: built.inscription_number,
            is_curse: false,
            body: built.record.body,
            content_encoding: built.record.content_encoding,
            content_type: built.record.content_type,
            metadata: built.record.metadata,
            metaprotocol: built.record.metaprotocol,
            parents,
            pointer: built.record.pointer,
            rune: built.record.rune,
            owner: tx
                .output
                .get(output_index)
                .map(|output| owner_of(output, config))
                .unwrap_or(Owner::Script(String::new())),
            frozen: false,
            permanent_area: crate::core::areas::PermanentArea::new(),
            temporary_area: crate::core::areas::TemporaryArea::new(),
            metaprotocol_validity: None,
            charm: crate::core::model::InscriptionCharm::default(),
        };

        let object_id = store.create_obj(inscription);
        try_info!(
            ctx,
            "revealed inscription {} as object {object_id} at output {output_index} offset {offset}",
            built.id
        );

        sat_points.push(SatPoint {
            output_index: output_index as u32,
            offset,
            object_id,
        });
    }

    (sat_points, invalid_events)
}

/// Moves every inscription sealed to `utxo` forward across `tx`: matched
/// inscriptions transfer to (or burn into) the destination output; unmatched
/// ones fall through to fees and come back as [`Flotsam`] awaiting the next
/// coinbase.
pub fn spend_utxo(
    utxo: &SealedUtxo,
    tx: &Transaction,
    input_utxo_values: &[u64],
    input_index: usize,
    store: &mut InscriptionStore,
    config: &EngineConfig,
    ctx: &Context,
) -> (Vec<SatPoint>, Vec<Flotsam>) {
    let mut sat_points = Vec::new();
    let mut flotsams = Vec::new();

    for &object_id in &utxo.object_ids {
        let offset = match store.get(&object_id) {
            Some(inscription) => inscription.offset,
            None => continue,
        };

        let (matched, sat_point) =
            match_utxo_and_generate_sat_point(offset, object_id, tx, input_utxo_values, input_index);

        let inscription = match store.get_mut(&object_id) {
            Some(inscription) => inscription,
            None => continue,
        };

        if inscription.assert_not_frozen().is_err() {
            continue;
        }

        inscription.temporary_area.drop_all();

        if matched {
            inscription.offset = sat_point.offset;
            let output = &tx.output[sat_point.output_index as usize];

            if output.script_pubkey.is_op_return() {
                inscription.charm.set_burned();
                inscription.frozen = true;
                if let Some(metaprotocol) = inscription.metaprotocol.clone() {
                    store.emit_burn_event(metaprotocol, inscription.sequence_number, object_id);
                }
                try_info!(ctx, "burned object {object_id} via OP_RETURN at input {input_index}");
            } else {
                inscription.owner = owner_of(output, config);
            }

            sat_points.push(sat_point);
        } else {
            flotsams.push(Flotsam {
                output_index: sat_point.output_index,
                offset: sat_point.offset,
                object_id,
            });
        }
    }

    (sat_points, flotsams)
}

/// Places every flotsam carried into this block's coinbase, in the order
/// the outer indexer supplied them (transaction-then-input order within
/// the block). The temporary area is dropped here too, for consistency
/// with `spend_utxo`'s miss branch.
pub fn handle_coinbase_tx(
    coinbase_tx: &Transaction,
    flotsams: &[Flotsam],
    block_height: u64,
    store: &mut InscriptionStore,
    config: &EngineConfig,
) -> Vec<SatPoint> {
    let mut sat_points = Vec::with_capacity(flotsams.len());

    for flotsam_index in 0..flotsams.len() {
        let sat_point =
            match_coinbase_and_generate_sat_point(flotsam_index, coinbase_tx, flotsams, block_height);

        if let Some(inscription) = store.get_mut(&sat_point.object_id) {
            inscription.offset = sat_point.offset;
            inscription.temporary_area.drop_all();
            if let Some(output) = coinbase_tx.output.get(sat_point.output_index as usize) {
                inscription.owner = owner_of(output, config);
            }
        }

        sat_points.push(sat_point);
    }

    sat_points
}
