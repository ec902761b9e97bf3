use std::fmt;

/// Relative TP-Validity-Period octet (3GPP TS 23.040 section 9.2.3.12.1).
///
/// | value   | validity                          |
/// |---------|-----------------------------------|
/// | 0-143   | (value + 1) x 5 minutes           |
/// | 144-167 | 12 hours + (value - 143) x 30 min |
/// | 168-196 | (value - 166) days                |
/// | 197-255 | (value - 192) weeks               |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ValidityPeriod(pub u8);

impl ValidityPeriod {
    /// The policy this encoder always submits with
    pub const TEN_DAYS: ValidityPeriod = ValidityPeriod(0xB0);

    pub fn to_byte(&self) -> u8 {
        self.0
    }

    /// How long the SMSC keeps trying to deliver, in minutes
    pub fn minutes(&self) -> u32 {
        let value = self.0 as u32;
        match value {
            0..=143 => (value + 1) * 5,
            144..=167 => 12 * 60 + (value - 143) * 30,
            168..=196 => (value - 166) * 24 * 60,
            _ => (value - 192) * 7 * 24 * 60,
        }
    }
}

impl Default for ValidityPeriod {
    fn default() -> Self {
        Self::TEN_DAYS
    }
}

impl fmt::Display for ValidityPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.minutes();
        match minutes {
            m if m % (7 * 24 * 60) == 0 && self.0 > 196 => write!(f, "{} weeks", m / (7 * 24 * 60)),
            m if m % (24 * 60) == 0 => write!(f, "{} days", m / (24 * 60)),
            m if m % 60 == 0 => write!(f, "{} hours", m / 60),
            m => write!(f, "{m} minutes"),
        }
    }
}
