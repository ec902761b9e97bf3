use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Numbering-plan-identification, bits 3..0 of a type-of-address octet.
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NumericPlanIndicator {
    Unknown = 0b0000,
    Isdn = 0b0001,
    Data = 0b0011,
    Telex = 0b0100,
    /// Plan 5, reserved for the service centre
    ServiceCentreSpecific5 = 0b0101,
    /// Plan 6, reserved for the service centre
    ServiceCentreSpecific6 = 0b0110,
    National = 0b1000,
    Private = 0b1001,
    Ermes = 0b1010,
}
