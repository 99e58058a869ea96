use bitcoin::hashes::Hash;
use bitcoin::Txid;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

const TXID_LEN: usize = 32;

/// Identifies an inscription by the reveal transaction that carried its
/// envelope and the index of that envelope's output among all the
/// envelopes the reveal transaction revealed.
///
/// Displays as `<reveal txid>i<index>`, matching the live `ord` wallet's
/// convention so ids copied from this engine's logs or events are
/// recognizable to anyone used to the real explorer.
#[derive(Debug, PartialEq, Copy, Clone, Hash, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InscriptionId {
    pub txid: Txid,
    pub index: u32,
}

impl Default for InscriptionId {
    fn default() -> Self {
        Self {
            txid: Txid::all_zeros(),
            index: 0,
        }
    }
}

impl FromStr for InscriptionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (txid, index) = s
            .rsplit_once('i')
            .ok_or_else(|| anyhow::anyhow!("invalid inscription id: {s}"))?;

        let txid = txid
            .parse()
            .map_err(|err| anyhow::anyhow!("invalid inscription id txid {txid}: {err}"))?;

        let index = index
            .parse()
            .map_err(|err| anyhow::anyhow!("invalid inscription id index {index}: {err}"))?;

        Ok(Self { txid, index })
    }
}

impl Display for InscriptionId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}i{}", self.txid, self.index)
    }
}

impl InscriptionId {
    pub fn value(&self) -> Vec<u8> {
        let mut value = self.txid.to_byte_array().to_vec();
        value.extend_from_slice(&self.index.to_le_bytes());
        value
    }

    pub fn from_value(value: &[u8]) -> Option<Self> {
        if value.len() < TXID_LEN || value.len() > TXID_LEN + 4 {
            return None;
        }

        let (txid, index) = value.split_at(TXID_LEN);

        let txid = Txid::from_slice(txid).ok()?;

        let index = [
            index.first().copied().unwrap_or(0),
            index.get(1).copied().unwrap_or(0),
            index.get(2).copied().unwrap_or(0),
            index.get(3).copied().unwrap_or(0),
        ];

        Some(Self {
            txid,
            index: u32::from_le_bytes(index),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("ec9ddf7c9b60d45ec6bb2a3ad5aa52af62c7d3b24bf1b5b9c2e5e6e6b9d2ca71i0")]
    #[test_case("ec9ddf7c9b60d45ec6bb2a3ad5aa52af62c7d3b24bf1b5b9c2e5e6e6b9d2ca71i1")]
    fn round_trips_through_display(s: &str) {
        let id: InscriptionId = s.parse().unwrap();
        assert_eq!(id.to_string(), s);
    }

    #[test]
    fn rejects_missing_index_separator() {
        assert!("ec9ddf7c9b60d45ec6bb2a3ad5aa52af62c7d3b24bf1b5b9c2e5e6e6b9d2ca71"
            .parse::<InscriptionId>()
            .is_err());
    }

    #[test]
    fn value_round_trips() {
        let id = InscriptionId {
            txid: Txid::all_zeros(),
            index: 7,
        };
        assert_eq!(InscriptionId::from_value(&id.value()).unwrap(), id);
    }
}
