use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Type-of-number, bits 6..4 of a GSM 03.40 type-of-address octet.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeOfNumber {
    Unknown = 0b000,
    International = 0b001,
    National = 0b010,
    NetworkSpecific = 0b011,
    SubscriberNumber = 0b100,
    Alphanumeric = 0b101,
    Abbreviated = 0b110,
}
