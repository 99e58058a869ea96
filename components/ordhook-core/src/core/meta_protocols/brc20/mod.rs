use crate::core::areas::PermanentAreaValue;

/// Marker type registered under the name `"brc-20"` by the demo/test
/// harness via [`super::register_metaprotocol_via_system`]. BRC-20 token
/// semantics (balances, deploy/mint/transfer bookkeeping, activation
/// height gating) live in a real indexer's storage layer and are out of
/// scope here; this type exists only so the registry/validity/attachment
/// plumbing in `spec.md` §4.8 has a concrete protocol to exercise.
pub struct Brc20;

/// A minimal per-inscription attachment an indexer could add to a
/// newly-verified BRC-20 deploy inscription's permanent area, grounded on
/// the `ticker` column the teacher's own `brc20_pg` token table carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brc20Deploy {
    pub tick: String,
}

impl PermanentAreaValue for Brc20Deploy {}
