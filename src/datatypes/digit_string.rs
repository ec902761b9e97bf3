// ABOUTME: Decimal-digit address strings for the SMSC and destination fields
// ABOUTME: Fixed-capacity storage, validated to '0'-'9' on construction

use crate::codec::{CodecError, Encodable};
use std::fmt;
use std::str::{self, FromStr};

/// Longest address this encoder accepts, in digits
pub const MAX_DIGITS: usize = 20;

/// A phone number or SMSC address made only of ASCII decimal digits.
///
/// Any leading `'+'` must already be stripped (see
/// [`DigitString::parse_international`]). An empty string is valid and means
/// "no SMSC" when used as a service centre address.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DigitString {
    data: [u8; MAX_DIGITS],
    length: u8,
}

impl DigitString {
    /// Creates a DigitString, rejecting non-digits and over-long input
    pub fn new(digits: &[u8]) -> Result<Self, CodecError> {
        validate_digits(digits)?;

        let mut data = [0u8; MAX_DIGITS];
        data[..digits.len()].copy_from_slice(digits);

        Ok(Self {
            data,
            length: digits.len() as u8,
        })
    }

    /// Creates a DigitString from a number that may carry one leading `'+'`
    pub fn parse_international(number: &str) -> Result<Self, CodecError> {
        let digits = number.strip_prefix('+').unwrap_or(number);
        Self::new(digits.as_bytes())
    }

    /// The "no SMSC" address
    pub const fn empty() -> Self {
        Self {
            data: [0u8; MAX_DIGITS],
            length: 0,
        }
    }

    /// Returns the digits as ASCII bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.length as usize]
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII digits are ever stored
        str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    /// Number of digits
    pub fn len(&self) -> usize {
        self.length as usize
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl Encodable for DigitString {
    fn encoded_len(&self) -> usize {
        crate::semi_octet::encoded_len(self.len())
    }

    fn encode(&self, out: &mut [u8]) -> Result<usize, CodecError> {
        crate::semi_octet::encode(self.as_bytes(), out)
    }
}

/// Checks that `digits` is a valid address: at most `MAX_DIGITS` of '0'-'9'
pub fn validate_digits(digits: &[u8]) -> Result<(), CodecError> {
    if let Some(position) = digits.iter().position(|b| !b.is_ascii_digit()) {
        return Err(CodecError::InvalidDigit {
            position,
            byte: digits[position],
        });
    }

    if digits.len() > MAX_DIGITS {
        return Err(CodecError::AddressTooLong {
            length: digits.len(),
            max: MAX_DIGITS,
        });
    }

    Ok(())
}

impl Default for DigitString {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for DigitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DigitString(\"{}\")", self.as_str())
    }
}

impl FromStr for DigitString {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.as_bytes())
    }
}

impl TryFrom<&str> for DigitString {
    type Error = CodecError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl AsRef<[u8]> for DigitString {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq<&str> for DigitString {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
