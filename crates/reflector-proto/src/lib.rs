//! Reflector wire types.
//!
//! Value types shared by every layer of the management-object reflection
//! service, plus the version-keyed string codecs that turn property values
//! into wire bytes.
//!
//! # Components
//!
//! - [`AttributeHandle`], [`FederateHandle`], [`ObjectInstanceHandle`]: opaque
//!   integer-backed identifiers
//! - [`AttributeHandleSet`]: the set of attributes a caller asks for
//! - [`ProtocolVersion`]: wire generation tag selecting the encoding rules
//! - [`StringCodec`]: per-layout string encoder/decoder, looked up through
//!   [`codec_for`]
//! - [`AttributeUpdate`]: the outbound reflection payload

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod encoding;
mod handle;
mod handle_set;
mod update;
mod version;

pub use encoding::{
    DecodeError, EncodingError, LegacyCodec, StringCodec, StringLayout, UnicodeCodec, codec_for,
    decode_string, encode_string,
};
pub use handle::{AttributeHandle, FederateHandle, ObjectInstanceHandle};
pub use handle_set::AttributeHandleSet;
pub use update::AttributeUpdate;
pub use version::{ProtocolVersion, UnknownVersionName};
