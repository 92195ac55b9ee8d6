//! Protocol version tags.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire generation tag selecting the encoding rules for an update.
///
/// The set of known tags is fixed. The type is a raw tag rather than an enum
/// because tags arrive from outside this crate; an unrecognized one must still
/// reach [`codec_for`](crate::codec_for) so it can be rejected there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProtocolVersion(u8);

impl ProtocolVersion {
    /// HLA 1.3 (legacy null-terminated strings).
    pub const HLA13: Self = Self(1);
    /// IEEE 1516-2000.
    pub const IEEE1516: Self = Self(2);
    /// IEEE 1516-2010 ("evolved").
    pub const IEEE1516E: Self = Self(3);

    /// Every tag this crate knows about.
    pub const KNOWN: [Self; 3] = [Self::HLA13, Self::IEEE1516, Self::IEEE1516E];

    /// Wrap a raw tag without validating it.
    pub const fn from_tag(tag: u8) -> Self {
        Self(tag)
    }

    /// The raw tag.
    pub const fn tag(self) -> u8 {
        self.0
    }

    /// Short configuration name, or `None` for unknown tags.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            1 => Some("hla13"),
            2 => Some("1516"),
            3 => Some("1516e"),
            _ => None,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "unknown({:#04x})", self.0),
        }
    }
}

/// A configuration string did not name a known protocol version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown protocol version: {0:?} (expected one of hla13, 1516, 1516e)")]
pub struct UnknownVersionName(pub String);

impl FromStr for ProtocolVersion {
    type Err = UnknownVersionName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hla13" | "1.3" => Ok(Self::HLA13),
            "1516" | "ieee1516" => Ok(Self::IEEE1516),
            "1516e" | "ieee1516e" => Ok(Self::IEEE1516E),
            _ => Err(UnknownVersionName(s.to_string())),
        }
    }
}
