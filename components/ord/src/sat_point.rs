use bitcoin::Txid;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Points at an exact offset within an output: `<txid>:<vout>:<offset>`.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SatPoint {
    pub txid: Txid,
    pub vout: u32,
    pub offset: u64,
}

impl Display for SatPoint {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}:{}", self.txid, self.vout, self.offset)
    }
}

impl FromStr for SatPoint {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(':');
        let txid = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("invalid satpoint: {s}"))?
            .parse()?;
        let vout = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("invalid satpoint: {s}"))?
            .parse()?;
        let offset = parts
            .next()
            .ok_or_else(|| anyhow::anyhow!("invalid satpoint: {s}"))?
            .parse()?;
        if parts.next().is_some() {
            return Err(anyhow::anyhow!("invalid satpoint: {s}"));
        }
        Ok(Self { txid, vout, offset })
    }
}

/// Height-indexed block subsidy, halving every `SUBSIDY_HALVING_INTERVAL`
/// blocks and reaching zero at `FIRST_POST_SUBSIDY_EPOCH`.
pub fn subsidy(height: u64) -> u64 {
    let epoch = (height / crate::SUBSIDY_HALVING_INTERVAL as u64) as u32;
    if epoch < crate::FIRST_POST_SUBSIDY_EPOCH {
        (crate::COIN_VALUE * 50) >> epoch
    } else {
        0
    }
}
