// ABOUTME: GSM 03.40 type-of-address octet combining type-of-number and numbering plan
// ABOUTME: Used for both the SMSC header and the TP-Destination-Address field

use crate::codec::CodecError;
use crate::datatypes::{NumericPlanIndicator, TypeOfNumber};
use std::fmt;

/// The type-of-address octet that precedes every encoded address.
///
/// Bit 7 is always set; bits 6..4 carry the type-of-number and bits 3..0 the
/// numbering plan.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypeOfAddress {
    pub ton: TypeOfNumber,
    pub npi: NumericPlanIndicator,
}

impl TypeOfAddress {
    /// International number in the ISDN/telephone plan (`0x91`)
    pub const INTERNATIONAL: TypeOfAddress = TypeOfAddress {
        ton: TypeOfNumber::International,
        npi: NumericPlanIndicator::Isdn,
    };

    pub fn new(ton: TypeOfNumber, npi: NumericPlanIndicator) -> Self {
        Self { ton, npi }
    }

    pub fn to_byte(&self) -> u8 {
        0x80 | (u8::from(self.ton) << 4) | u8::from(self.npi)
    }

    pub fn from_byte(value: u8) -> Result<Self, CodecError> {
        if value & 0x80 == 0 {
            return Err(CodecError::InvalidTypeOfAddress(value));
        }

        let ton = TypeOfNumber::try_from((value >> 4) & 0x07)
            .map_err(|_| CodecError::InvalidTypeOfAddress(value))?;
        let npi = NumericPlanIndicator::try_from(value & 0x0F)
            .map_err(|_| CodecError::InvalidTypeOfAddress(value))?;

        Ok(Self { ton, npi })
    }
}

impl Default for TypeOfAddress {
    fn default() -> Self {
        Self::INTERNATIONAL
    }
}

impl From<TypeOfAddress> for u8 {
    fn from(toa: TypeOfAddress) -> Self {
        toa.to_byte()
    }
}

impl TryFrom<u8> for TypeOfAddress {
    type Error = CodecError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_byte(value)
    }
}

impl fmt::Display for TypeOfAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}/{:?} ({:#04x})", self.ton, self.npi, self.to_byte())
    }
}
