//! Numeric field tags used inside an inscription envelope's tag/value pairs.
//!
//! Mirrors the tag table the live `ord` wallet reveals, trimmed to the
//! fields this engine's `InscriptionRecord` actually carries (see
//! `envelope.rs`). A tag is "even" when consumers that don't recognize it
//! must reject the inscription outright (`UnrecognizedEvenField`); odd tags
//! are safe to ignore.

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum Tag {
    ContentType,
    Pointer,
    Parent,
    Metadata,
    Metaprotocol,
    ContentEncoding,
    Delegate,
    Rune,
    Nop,
    Unrecognized(u8),
}

impl Tag {
    pub fn from_byte(byte: u8) -> Self {
        match byte {
            1 => Tag::ContentType,
            2 => Tag::Pointer,
            3 => Tag::Parent,
            5 => Tag::Metadata,
            7 => Tag::Metaprotocol,
            9 => Tag::ContentEncoding,
            11 => Tag::Delegate,
            13 => Tag::Rune,
            byte if byte >= 0xfa => Tag::Nop,
            byte => Tag::Unrecognized(byte),
        }
    }

    pub fn byte(self) -> Option<u8> {
        match self {
            Tag::ContentType => Some(1),
            Tag::Pointer => Some(2),
            Tag::Parent => Some(3),
            Tag::Metadata => Some(5),
            Tag::Metaprotocol => Some(7),
            Tag::ContentEncoding => Some(9),
            Tag::Delegate => Some(11),
            Tag::Rune => Some(13),
            Tag::Nop => None,
            Tag::Unrecognized(byte) => Some(byte),
        }
    }

    /// Even, unrecognized tags must cause the whole inscription to be
    /// rejected. `Nop` tags (>= 0xfa, odd-valued by the `ord` wallet) are
    /// always ignorable.
    pub fn is_unrecognized_even(self) -> bool {
        match self {
            Tag::Unrecognized(byte) => byte % 2 == 0,
            _ => false,
        }
    }
}
