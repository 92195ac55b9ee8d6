//! Version-keyed string encoding.
//!
//! Each [`ProtocolVersion`] maps to exactly one [`StringLayout`] through a
//! static table. Looking up a tag that is not in the table fails with
//! [`EncodingError::UnknownVersion`]; there is no default layout.
//!
//! # Layouts
//!
//! ```text
//! Legacy (HLA 1.3):
//!   +----------------------+------+
//!   | UTF-8 bytes          | 0x00 |
//!   +----------------------+------+
//!
//! Length-prefixed (IEEE 1516, 1516e):
//!   +----------------+-------------------------------+
//!   | count: u32 BE  | count x UTF-16 code unit (BE) |
//!   +----------------+-------------------------------+
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

use crate::ProtocolVersion;

/// Size of the element-count header of the length-prefixed layout.
const COUNT_HEADER_SIZE: usize = 4;

/// Size of one UTF-16 code unit on the wire.
const CODE_UNIT_SIZE: usize = 2;

/// Legacy string terminator.
const TERMINATOR: u8 = 0x00;

/// Errors raised while encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// The version tag is not in the codec table.
    #[error("unknown protocol version tag {tag:#04x}")]
    UnknownVersion {
        /// The rejected tag.
        tag: u8,
    },

    /// Text has more code units than the count header can express.
    #[error("string too long for length prefix: {units} code units")]
    TooLong {
        /// Number of UTF-16 code units in the text.
        units: usize,
    },
}

/// Errors raised while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The version tag is not in the codec table.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// Buffer ended before the layout was complete.
    #[error("truncated string: need {needed} bytes, have {available}")]
    Truncated {
        /// Bytes required by the layout.
        needed: usize,
        /// Bytes present.
        available: usize,
    },

    /// Legacy string lacks its trailing terminator.
    #[error("legacy string is not null-terminated")]
    MissingTerminator,

    /// Bytes remain after the declared element count.
    #[error("{extra} trailing bytes after string")]
    TrailingBytes {
        /// Number of unconsumed bytes.
        extra: usize,
    },

    /// Legacy payload is not UTF-8.
    #[error("invalid UTF-8 in legacy string")]
    InvalidUtf8,

    /// Length-prefixed payload contains an unpaired surrogate.
    #[error("invalid UTF-16 in unicode string")]
    InvalidUtf16,
}

/// Wire layout of an encoded string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringLayout {
    /// Null-terminated, relies on external framing for its extent.
    Legacy,
    /// Element-count header followed by UTF-16 code units.
    LengthPrefixed,
}

/// Encoder/decoder for one string layout.
pub trait StringCodec: Send + Sync {
    /// The layout this codec produces.
    fn layout(&self) -> StringLayout;

    /// Append the encoding of `text` to `dst`.
    fn encode(&self, text: &str, dst: &mut BytesMut) -> Result<(), EncodingError>;

    /// Decode one complete string from `src`.
    fn decode(&self, src: &[u8]) -> Result<String, DecodeError>;

    /// Encode `text` into a fresh buffer.
    fn encode_to_bytes(&self, text: &str) -> Result<Bytes, EncodingError> {
        let mut buf = BytesMut::with_capacity(text.len() + COUNT_HEADER_SIZE);
        self.encode(text, &mut buf)?;
        Ok(buf.freeze())
    }
}

/// HLA 1.3 null-terminated strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCodec;

impl StringCodec for LegacyCodec {
    fn layout(&self) -> StringLayout {
        StringLayout::Legacy
    }

    fn encode(&self, text: &str, dst: &mut BytesMut) -> Result<(), EncodingError> {
        dst.reserve(text.len() + 1);
        dst.put_slice(text.as_bytes());
        dst.put_u8(TERMINATOR);
        Ok(())
    }

    fn decode(&self, src: &[u8]) -> Result<String, DecodeError> {
        let Some((&last, body)) = src.split_last() else {
            return Err(DecodeError::Truncated { needed: 1, available: 0 });
        };
        if last != TERMINATOR {
            return Err(DecodeError::MissingTerminator);
        }
        String::from_utf8(body.to_vec()).map_err(|_| DecodeError::InvalidUtf8)
    }
}

/// IEEE 1516 `HLAunicodeString`: count-prefixed UTF-16BE.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeCodec;

impl StringCodec for UnicodeCodec {
    fn layout(&self) -> StringLayout {
        StringLayout::LengthPrefixed
    }

    fn encode(&self, text: &str, dst: &mut BytesMut) -> Result<(), EncodingError> {
        let units = text.encode_utf16().count();
        let count = u32::try_from(units).map_err(|_| EncodingError::TooLong { units })?;

        dst.reserve(COUNT_HEADER_SIZE + units * CODE_UNIT_SIZE);
        dst.put_u32(count);
        for unit in text.encode_utf16() {
            dst.put_u16(unit);
        }
        Ok(())
    }

    fn decode(&self, mut src: &[u8]) -> Result<String, DecodeError> {
        if src.len() < COUNT_HEADER_SIZE {
            return Err(DecodeError::Truncated {
                needed: COUNT_HEADER_SIZE,
                available: src.len(),
            });
        }
        let count = src.get_u32() as usize;

        let needed = count.saturating_mul(CODE_UNIT_SIZE);
        if src.remaining() < needed {
            return Err(DecodeError::Truncated {
                needed: needed.saturating_add(COUNT_HEADER_SIZE),
                available: src.remaining() + COUNT_HEADER_SIZE,
            });
        }
        if src.remaining() > needed {
            return Err(DecodeError::TrailingBytes { extra: src.remaining() - needed });
        }

        let units: Vec<u16> = (0..count).map(|_| src.get_u16()).collect();
        String::from_utf16(&units).map_err(|_| DecodeError::InvalidUtf16)
    }
}

/// Version to codec table. Both IEEE tags alias the length-prefixed layout.
static CODECS: [(ProtocolVersion, &dyn StringCodec); 3] = [
    (ProtocolVersion::HLA13, &LegacyCodec),
    (ProtocolVersion::IEEE1516, &UnicodeCodec),
    (ProtocolVersion::IEEE1516E, &UnicodeCodec),
];

/// Look up the codec for a version tag.
///
/// # Errors
///
/// Returns `EncodingError::UnknownVersion` if the tag is not in the table.
pub fn codec_for(version: ProtocolVersion) -> Result<&'static dyn StringCodec, EncodingError> {
    CODECS
        .iter()
        .find(|(known, _)| *known == version)
        .map(|(_, codec)| *codec)
        .ok_or(EncodingError::UnknownVersion { tag: version.tag() })
}

/// Encode `text` with the layout selected by `version`.
///
/// Pure: the same inputs always produce the same bytes.
pub fn encode_string(version: ProtocolVersion, text: &str) -> Result<Bytes, EncodingError> {
    codec_for(version)?.encode_to_bytes(text)
}

/// Decode bytes produced by [`encode_string`] with the same `version`.
pub fn decode_string(version: ProtocolVersion, bytes: &[u8]) -> Result<String, DecodeError> {
    codec_for(version)?.decode(bytes)
}
