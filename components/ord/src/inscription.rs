use crate::inscription_id::InscriptionId;

/// The parsed payload of an inscription envelope: content plus whatever
/// optional fields the reveal transaction attached to it. `body` is
/// `None` for envelopes that never reached a body tag (valid, if
/// pointless, for a pure-metadata inscription); the three `*_field`
/// flags record protocol violations the caller needs to turn into a
/// cursed-inscription classification, since this type itself doesn't
/// know about sat-index state.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Inscription {
    pub body: Option<Vec<u8>>,
    pub content_type: Option<Vec<u8>>,
    pub pointer: Option<u64>,
    pub parents: Vec<InscriptionId>,
    pub metadata: Option<Vec<u8>>,
    pub metaprotocol: Option<String>,
    pub content_encoding: Option<String>,
    pub delegate: Option<InscriptionId>,
    /// Reserved for rune etching data. Rune issuance is out of scope for
    /// this engine, so this is parsed as raw bytes but never interpreted;
    /// always `None` until a consumer crate adds rune support.
    pub rune: Option<Vec<u8>>,
    pub unrecognized_even_field: bool,
    pub duplicate_field: bool,
    pub incomplete_field: bool,
}

impl Inscription {
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        std::str::from_utf8(self.content_type.as_ref()?).ok()
    }

    pub fn content_length(&self) -> Option<usize> {
        Some(self.body()?.len())
    }

    pub fn pointer(&self) -> Option<u64> {
        self.pointer
    }

    pub fn parents(&self) -> &[InscriptionId] {
        &self.parents
    }

    pub fn delegate(&self) -> Option<InscriptionId> {
        self.delegate
    }

    pub fn metaprotocol(&self) -> Option<&str> {
        self.metaprotocol.as_deref()
    }

    pub fn metadata(&self) -> Option<&[u8]> {
        self.metadata.as_deref()
    }

    pub fn content_encoding(&self) -> Option<&str> {
        self.content_encoding.as_deref()
    }

    /// True when the envelope itself was malformed in a way the protocol
    /// mandates treating the whole inscription as cursed, independent of
    /// its position in the transaction.
    pub fn is_malformed(&self) -> bool {
        self.unrecognized_even_field || self.duplicate_field || self.incomplete_field
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_when_any_flag_is_set() {
        let mut inscription = Inscription::default();
        assert!(!inscription.is_malformed());
        inscription.duplicate_field = true;
        assert!(inscription.is_malformed());
    }

    #[test]
    fn content_type_requires_valid_utf8() {
        let inscription = Inscription {
            content_type: Some(vec![0xff, 0xfe]),
            ..Default::default()
        };
        assert_eq!(inscription.content_type(), None);
    }
}
