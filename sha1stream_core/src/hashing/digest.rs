//! Finished SHA-1 digest

use super::DIGEST_LEN;
use crate::{Error, Result, error::ValidationError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 20-byte SHA-1 digest: h0..h4, each big-endian.
///
/// Formats as 40 lowercase hex digits and serializes as that string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Serialize the five registers in order, big-endian
    pub(crate) fn from_registers(registers: &[u32; 5]) -> Self {
        let mut bytes = [0u8; DIGEST_LEN];
        for (out, register) in bytes.chunks_exact_mut(4).zip(registers) {
            out.copy_from_slice(&register.to_be_bytes());
        }
        Self(bytes)
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Consume into raw bytes
    pub fn into_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }

    /// Lowercase hex, 40 characters
    pub fn to_hex(&self) -> String {
        format!("{self:x}")
    }

    /// Parse 40 hex digits. Case is ignored, and whitespace between digits is
    /// skipped so grouped output can be pasted back in.
    pub fn from_hex(input: &str) -> Result<Self> {
        let digits: Vec<u8> = input
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();

        if digits.len() != DIGEST_LEN * 2 {
            return Err(Error::Validation(ValidationError::invalid_digest(
                input,
                &format!(
                    "expected {} hex digits, found {}",
                    DIGEST_LEN * 2,
                    digits.len()
                ),
            )));
        }

        let mut bytes = [0u8; DIGEST_LEN];
        for (out, pair) in bytes.iter_mut().zip(digits.chunks_exact(2)) {
            let (Some(high), Some(low)) = (hex_value(pair[0]), hex_value(pair[1])) else {
                return Err(Error::Validation(ValidationError::invalid_digest(
                    input,
                    "contains a non-hex character",
                )));
            };
            *out = (high << 4) | low;
        }

        Ok(Self(bytes))
    }
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self:x})")
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex(&text).map_err(serde::de::Error::custom)
    }
}
