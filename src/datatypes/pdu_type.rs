// ABOUTME: First octet of an SMS TPDU (TP-MTI, TP-RD, TP-VPF, TP-SRR, TP-UDHI, TP-RP)
// ABOUTME: This encoder always sends SMS-SUBMIT with a relative validity period (0x11)

use crate::codec::CodecError;
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// TP-Message-Type-Indicator, bits 1..0 (mobile originated direction)
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageTypeIndicator {
    DeliverReport = 0b00,
    Submit = 0b01,
    Command = 0b10,
}

/// TP-Validity-Period-Format, bits 4..3
#[derive(TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValidityPeriodFormat {
    NotPresent = 0b00,
    Enhanced = 0b01,
    Relative = 0b10,
    Absolute = 0b11,
}

/// Decoded first octet of an SMS-SUBMIT TPDU
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PduType {
    pub message_type: MessageTypeIndicator,
    pub reject_duplicates: bool,
    pub validity_period_format: ValidityPeriodFormat,
    pub status_report_request: bool,
    pub user_data_header: bool,
    pub reply_path: bool,
}

impl PduType {
    /// SMS-SUBMIT, relative validity period, every flag clear
    pub const SUBMIT: PduType = PduType {
        message_type: MessageTypeIndicator::Submit,
        reject_duplicates: false,
        validity_period_format: ValidityPeriodFormat::Relative,
        status_report_request: false,
        user_data_header: false,
        reply_path: false,
    };

    pub fn to_byte(&self) -> u8 {
        u8::from(self.message_type)
            | (self.reject_duplicates as u8) << 2
            | u8::from(self.validity_period_format) << 3
            | (self.status_report_request as u8) << 5
            | (self.user_data_header as u8) << 6
            | (self.reply_path as u8) << 7
    }

    pub fn from_byte(value: u8) -> Result<Self, CodecError> {
        let message_type = MessageTypeIndicator::try_from(value & 0x03)
            .map_err(|_| unexpected_pdu_type(value))?;
        let validity_period_format = ValidityPeriodFormat::try_from((value >> 3) & 0x03)
            .map_err(|_| unexpected_pdu_type(value))?;

        Ok(Self {
            message_type,
            reject_duplicates: value & 0x04 != 0,
            validity_period_format,
            status_report_request: value & 0x20 != 0,
            user_data_header: value & 0x40 != 0,
            reply_path: value & 0x80 != 0,
        })
    }
}

fn unexpected_pdu_type(actual: u8) -> CodecError {
    CodecError::UnexpectedValue {
        field: "pdu_type",
        expected: PduType::SUBMIT.to_byte(),
        actual,
    }
}

impl Default for PduType {
    fn default() -> Self {
        Self::SUBMIT
    }
}
