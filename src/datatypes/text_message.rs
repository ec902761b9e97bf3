// ABOUTME: Single-segment SMS text restricted to 7-bit default alphabet code points
// ABOUTME: Length-prefixed fixed storage, validated for length and range on construction

use crate::codec::{CodecError, Encodable};
use std::fmt;
use std::str::{self, FromStr};

/// Septets that fit in one SMS-SUBMIT without concatenation
pub const MAX_SEPTETS: usize = 160;

/// Message text for a single SMS segment.
///
/// Every element is a 7-bit code point; the text is not transliterated, so
/// characters outside that range are rejected rather than replaced.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TextMessage {
    data: [u8; MAX_SEPTETS],
    length: u8,
}

impl TextMessage {
    /// Creates a TextMessage, checking length before content
    pub fn new(text: &[u8]) -> Result<Self, CodecError> {
        validate_text(text)?;

        let mut data = [0u8; MAX_SEPTETS];
        data[..text.len()].copy_from_slice(text);

        Ok(Self {
            data,
            length: text.len() as u8,
        })
    }

    /// Returns the septets
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.length as usize]
    }

    pub fn as_str(&self) -> &str {
        // 7-bit code points are always valid UTF-8
        str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Number of septets (the TP-User-Data-Length value)
    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Number of bytes the packed user data occupies
    pub fn packed_len(&self) -> usize {
        crate::septet::packed_len(self.len())
    }
}

impl Encodable for TextMessage {
    fn encoded_len(&self) -> usize {
        self.packed_len()
    }

    fn encode(&self, out: &mut [u8]) -> Result<usize, CodecError> {
        crate::septet::encode_7bit(self.as_bytes(), out)
    }
}

/// Checks the single-segment limit, then that every byte is below 128
pub fn validate_text(text: &[u8]) -> Result<(), CodecError> {
    if text.len() > MAX_SEPTETS {
        return Err(CodecError::MessageTooLong {
            length: text.len(),
            max: MAX_SEPTETS,
        });
    }

    crate::septet::validate_septets(text)
}

impl Default for TextMessage {
    fn default() -> Self {
        Self {
            data: [0u8; MAX_SEPTETS],
            length: 0,
        }
    }
}

impl fmt::Display for TextMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TextMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TextMessage({:?})", self.as_str())
    }
}

impl FromStr for TextMessage {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes())
    }
}

impl TryFrom<&str> for TextMessage {
    type Error = CodecError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl AsRef<[u8]> for TextMessage {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
