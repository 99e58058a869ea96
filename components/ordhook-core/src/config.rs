use bitcoin::Network;
use serde::Deserialize;

/// Which reference metaprotocols the engine's demo registration harness
/// should wire up. Trimmed from `components/config`'s full
/// `OrdinalsMetaProtocolsConfig`, since this core only ever registers the
/// one reference metaprotocol it ships a marker type for.
#[derive(Clone, Debug, Deserialize)]
pub struct MetaProtocolsToggle {
    pub brc20: bool,
}

impl Default for MetaProtocolsToggle {
    fn default() -> Self {
        Self { brc20: false }
    }
}

/// The slice of `components/config::Config` this core actually consumes:
/// which network's jubilee height and subsidy schedule apply, and which
/// reference metaprotocols to register at genesis. Everything else in the
/// teacher's `Config` (bitcoind RPC endpoints, Postgres pools, storage
/// paths, Prometheus) belongs to the block-ingestion/storage layer this
/// crate doesn't own.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub network: Network,
    /// Override for `ord::JUBILEE_HEIGHT`, used by tests that want to
    /// exercise cursed-inscription paths without mining to block 824544.
    pub jubilee_height: Option<u64>,
    pub metaprotocols: MetaProtocolsToggle,
}

impl EngineConfig {
    pub fn jubilee_height(&self) -> u64 {
        self.jubilee_height.unwrap_or(ord::JUBILEE_HEIGHT)
    }

    pub fn mainnet_default() -> Self {
        Self {
            network: Network::Bitcoin,
            jubilee_height: None,
            metaprotocols: MetaProtocolsToggle { brc20: true },
        }
    }

    pub fn regtest_default() -> Self {
        Self {
            network: Network::Regtest,
            jubilee_height: None,
            metaprotocols: MetaProtocolsToggle { brc20: true },
        }
    }

    pub fn test_default() -> Self {
        Self {
            network: Network::Regtest,
            jubilee_height: Some(0),
            metaprotocols: MetaProtocolsToggle { brc20: true },
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, String> {
        #[derive(Deserialize)]
        struct ConfigToml {
            network: String,
            jubilee_height: Option<u64>,
            #[serde(default)]
            metaprotocols: MetaProtocolsToggle,
        }

        let parsed: ConfigToml =
            toml::from_str(raw).map_err(|e| format!("invalid engine config: {e}"))?;

        let network = match parsed.network.as_str() {
            "mainnet" | "bitcoin" => Network::Bitcoin,
            "testnet" => Network::Testnet,
            "signet" => Network::Signet,
            "regtest" => Network::Regtest,
            other => return Err(format!("unknown network `{other}`")),
        };

        Ok(Self {
            network,
            jubilee_height: parsed.jubilee_height,
            metaprotocols: parsed.metaprotocols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_real_jubilee_height() {
        assert_eq!(EngineConfig::mainnet_default().jubilee_height(), ord::JUBILEE_HEIGHT);
    }

    #[test]
    fn test_default_overrides_jubilee_height_to_zero() {
        assert_eq!(EngineConfig::test_default().jubilee_height(), 0);
    }

    #[test]
    fn parses_network_from_toml() {
        let config = EngineConfig::from_toml_str("network = \"regtest\"\n").unwrap();
        assert_eq!(config.network, Network::Regtest);
    }

    #[test]
    fn rejects_unknown_network() {
        assert!(EngineConfig::from_toml_str("network = \"fakenet\"\n").is_err());
    }
}
