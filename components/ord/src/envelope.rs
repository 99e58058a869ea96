use crate::inscription::Inscription;
use crate::tag::Tag;
use bitcoin::blockdata::opcodes;
use bitcoin::blockdata::script::{self, Instruction, Instructions};
use bitcoin::{Script, Witness};
use std::collections::BTreeMap;
use std::iter::Peekable;

const PROTOCOL_ID: [u8; 3] = *b"ord";
const BODY_TAG: &[u8] = &[];

/// An envelope is one `OP_FALSE OP_IF ... OP_ENDIF` block found inside a
/// taproot script-path witness. `input`/`offset` place it among the
/// envelopes carried by the whole transaction in reveal order; `pushnum`
/// and `stutter` flag two non-minimal encodings the live `ord` wallet
/// treats as evidence the envelope was deliberately crafted rather than
/// produced by the reference wallet, and which this engine folds into
/// cursed-inscription detection.
#[derive(Debug, PartialEq, Clone)]
pub struct Envelope<T> {
    pub input: usize,
    pub offset: usize,
    pub pushnum: bool,
    pub stutter: bool,
    pub payload: T,
}

pub type RawEnvelope = Envelope<Vec<Vec<u8>>>;
pub type ParsedEnvelope = Envelope<Inscription>;

#[derive(Debug, PartialEq)]
pub enum EnvelopeError {
    NoInscription,
    Script(script::Error),
}

type Result<T, E = EnvelopeError> = std::result::Result<T, E>;

impl RawEnvelope {
    pub fn from_tapscript(tapscript: &Script, input: usize) -> Result<Vec<Self>> {
        let mut envelopes = Vec::new();
        let mut parser = EnvelopeParser {
            instructions: tapscript.instructions().peekable(),
        };

        let mut offset = 0;
        loop {
            match parser.parse_one_envelope() {
                Ok(Some(envelope)) => {
                    envelopes.push(Self {
                        input,
                        offset,
                        pushnum: envelope.pushnum,
                        stutter: envelope.stutter,
                        payload: envelope.fields,
                    });
                    offset += 1;
                }
                Ok(None) => break,
                Err(EnvelopeError::NoInscription) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(envelopes)
    }

    pub fn from_witness(witness: &Witness, input: usize) -> Result<Vec<Self>> {
        let Some(tapscript) = witness.tapscript() else {
            return Ok(Vec::new());
        };
        Self::from_tapscript(tapscript, input)
    }
}

impl From<RawEnvelope> for ParsedEnvelope {
    fn from(envelope: RawEnvelope) -> Self {
        let mut fields: BTreeMap<u8, Vec<&[u8]>> = BTreeMap::new();
        let mut body = None;
        let mut incomplete_field = false;

        // Empty tag marks the start of the body, which is every push that
        // follows concatenated together.
        let mut iter = envelope.payload.iter();
        while let Some(tag) = iter.next() {
            if tag.is_empty() {
                let mut collected = Vec::new();
                for chunk in iter.by_ref() {
                    collected.extend_from_slice(chunk);
                }
                body = Some(collected);
                break;
            }
            match iter.next() {
                Some(value) => fields.entry(tag[0]).or_default().push(value.as_slice()),
                None => incomplete_field = true,
            }
        }

        let mut duplicate_field = false;
        let mut unrecognized_even_field = false;
        let mut take_first = |tag: u8| -> Option<&[u8]> {
            let values = fields.remove(&tag)?;
            if values.len() > 1 {
                duplicate_field = true;
            }
            values.into_iter().next()
        };

        let content_type = take_first(Tag::ContentType.byte().unwrap()).map(|v| v.to_vec());
        let pointer = take_first(Tag::Pointer.byte().unwrap()).map(|v| bytes_to_u64(v));
        let metadata = take_first(Tag::Metadata.byte().unwrap()).map(|v| v.to_vec());
        let metaprotocol = take_first(Tag::Metaprotocol.byte().unwrap())
            .and_then(|v| std::str::from_utf8(v).ok())
            .map(|s| s.to_string());
        let content_encoding = take_first(Tag::ContentEncoding.byte().unwrap())
            .and_then(|v| std::str::from_utf8(v).ok())
            .map(|s| s.to_string());
        let delegate = take_first(Tag::Delegate.byte().unwrap())
            .and_then(crate::inscription_id::InscriptionId::from_value);

        let mut parents = Vec::new();
        if let Some(values) = fields.remove(&Tag::Parent.byte().unwrap()) {
            for value in values {
                if let Some(parent) = crate::inscription_id::InscriptionId::from_value(value) {
                    parents.push(parent);
                }
            }
        }

        for tag in fields.keys() {
            if Tag::from_byte(*tag).is_unrecognized_even() {
                unrecognized_even_field = true;
            }
        }

        Self {
            input: envelope.input,
            offset: envelope.offset,
            pushnum: envelope.pushnum,
            stutter: envelope.stutter,
            payload: Inscription {
                body,
                content_type,
                pointer,
                parents,
                metadata,
                metaprotocol,
                content_encoding,
                delegate,
                rune: None,
                unrecognized_even_field,
                duplicate_field,
                incomplete_field,
            },
        }
    }
}

fn bytes_to_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf[..bytes.len().min(8)].copy_from_slice(&bytes[..bytes.len().min(8)]);
    u64::from_le_bytes(buf)
}

struct ParsedRaw {
    fields: Vec<Vec<u8>>,
    pushnum: bool,
    stutter: bool,
}

struct EnvelopeParser<'a> {
    instructions: Peekable<Instructions<'a>>,
}

impl<'a> EnvelopeParser<'a> {
    fn parse_one_envelope(&mut self) -> Result<Option<ParsedRaw>> {
        if !self.advance_into_envelope()? {
            return Ok(None);
        }

        let mut fields = Vec::new();
        let mut pushnum = false;

        loop {
            match self.advance()? {
                Instruction::PushBytes(push) => fields.push(push.as_bytes().to_vec()),
                Instruction::Op(op) if (opcodes::all::OP_PUSHNUM_1.to_u8()
                    ..=opcodes::all::OP_PUSHNUM_16.to_u8())
                    .contains(&op.to_u8()) =>
                {
                    pushnum = true;
                    fields.push(vec![op.to_u8() - opcodes::all::OP_PUSHNUM_1.to_u8() + 1]);
                }
                Instruction::Op(opcodes::all::OP_ENDIF) => break,
                _ => return Err(EnvelopeError::NoInscription),
            }
        }

        Ok(Some(ParsedRaw {
            fields,
            pushnum,
            stutter: false,
        }))
    }

    fn advance(&mut self) -> Result<Instruction<'a>> {
        self.instructions
            .next()
            .ok_or(EnvelopeError::NoInscription)?
            .map_err(EnvelopeError::Script)
    }

    /// Consumes instructions until an `OP_FALSE OP_IF "ord"` header is
    /// matched, tolerating a stray repeated `OP_IF` (the "stutter" the
    /// live wallet's reveal builder sometimes emits) by flagging it rather
    /// than treating it as a parse failure.
    fn advance_into_envelope(&mut self) -> Result<bool> {
        loop {
            match self.instructions.next() {
                None => return Ok(false),
                Some(Err(err)) => return Err(EnvelopeError::Script(err)),
                Some(Ok(Instruction::PushBytes(push))) if push.as_bytes().is_empty() => {
                    if !matches!(self.advance()?, Instruction::Op(opcodes::all::OP_IF)) {
                        continue;
                    }
                    match self.advance()? {
                        Instruction::PushBytes(push) if push.as_bytes() == PROTOCOL_ID => {
                            return Ok(true)
                        }
                        _ => continue,
                    }
                }
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::blockdata::script::Builder;

    fn envelope(payload: &[&[u8]]) -> Witness {
        let mut builder = Builder::new()
            .push_opcode(opcodes::OP_FALSE)
            .push_opcode(opcodes::all::OP_IF)
            .push_slice(PROTOCOL_ID);

        for item in payload {
            builder = builder.push_slice(<&bitcoin::script::PushBytes>::try_from(*item).unwrap());
        }

        let script = builder.push_opcode(opcodes::all::OP_ENDIF).into_script();

        let mut witness = Witness::new();
        witness.push(script);
        witness.push([0x50]);
        witness
    }

    #[test]
    fn empty_witness_has_no_envelopes() {
        assert_eq!(RawEnvelope::from_witness(&Witness::new(), 0).unwrap(), vec![]);
    }

    #[test]
    fn parses_a_single_field_envelope() {
        let witness = envelope(&[&[1], b"text/plain"]);
        let raw = RawEnvelope::from_witness(&witness, 0).unwrap();
        assert_eq!(raw.len(), 1);
        let parsed = ParsedEnvelope::from(raw.into_iter().next().unwrap());
        assert_eq!(parsed.payload.content_type.as_deref(), Some(b"text/plain".as_slice()));
    }

    #[test]
    fn flags_duplicate_content_type_as_cursed_field() {
        let witness = envelope(&[&[1], b"text/plain", &[1], b"text/html"]);
        let raw = RawEnvelope::from_witness(&witness, 0).unwrap();
        let parsed = ParsedEnvelope::from(raw.into_iter().next().unwrap());
        assert!(parsed.payload.duplicate_field);
    }

    #[test]
    fn flags_unrecognized_even_field() {
        let witness = envelope(&[&[4], b"??"]);
        let raw = RawEnvelope::from_witness(&witness, 0).unwrap();
        let parsed = ParsedEnvelope::from(raw.into_iter().next().unwrap());
        assert!(parsed.payload.unrecognized_even_field);
    }

    #[test]
    fn body_collects_every_push_after_the_empty_tag() {
        let witness = envelope(&[&[], b"hello ", b"world"]);
        let raw = RawEnvelope::from_witness(&witness, 0).unwrap();
        let parsed = ParsedEnvelope::from(raw.into_iter().next().unwrap());
        assert_eq!(parsed.payload.body.as_deref(), Some(b"hello world".as_slice()));
    }
}
