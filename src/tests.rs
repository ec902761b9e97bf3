//! Scenario tests for SMS-SUBMIT assembly across the encoder layers

use crate::codec::{CodecError, Decodable, Encodable};
use crate::datatypes::*;
use crate::submit::{Field, SubmitPdu, assemble, required_len};
use crate::transport::CmgsSubmission;
use std::io::Cursor;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn test_no_smsc_scenario() {
        let mut out = [0u8; 64];
        let result = assemble(b"", b"1234567890", b"Hi", &mut out).unwrap();
        let layout = &result.layout;

        assert_eq!(out[layout.offset_of(Field::SmscLength)], 0x00);
        assert_eq!(layout.len_of(Field::SmscAddress), 0);
        assert_eq!(out[layout.offset_of(Field::DestinationLength)], 10);
        assert_eq!(out[layout.offset_of(Field::UserDataLength)], 2);

        // Validity period sits directly before the user data length
        let udl = layout.offset_of(Field::UserDataLength);
        assert_eq!(out[udl - 1], ValidityPeriod::TEN_DAYS.to_byte());
        assert_eq!(layout.offset_of(Field::ValidityPeriod), udl - 1);

        assert_eq!(result.tp_len, result.total_len - 1);
    }

    #[test]
    fn test_tp_len_with_smsc() {
        let mut out = [0u8; 64];
        for smsc in ["1", "4917201", "491710760000", "12345678901234567890"] {
            let result = assemble(smsc.as_bytes(), b"4915112345678", b"ping", &mut out).unwrap();
            assert_eq!(
                result.tp_len,
                result.total_len - 1 - (1 + smsc.len().div_ceil(2)),
                "smsc {smsc}"
            );
            assert_eq!(out[0] as usize, 1 + smsc.len().div_ceil(2));
        }
    }

    #[test]
    fn test_message_too_long_scenario() {
        let mut out = [0u8; 256];
        let text = "a".repeat(161);
        assert_eq!(
            assemble(b"", b"1234567890", text.as_bytes(), &mut out),
            Err(CodecError::MessageTooLong {
                length: 161,
                max: MAX_SEPTETS
            })
        );
    }

    #[test]
    fn test_full_length_message() {
        let text = "a".repeat(160);
        let needed = required_len(12, 13, 160);
        let mut out = vec![0u8; needed];
        let result = assemble(b"491710760000", b"4915112345678", text.as_bytes(), &mut out).unwrap();

        assert_eq!(result.total_len, needed);
        assert_eq!(result.layout.len_of(Field::UserData), 140);
        assert_eq!(out[result.layout.offset_of(Field::UserDataLength)], 160);
    }

    #[test]
    fn test_invalid_destination_digit() {
        let mut out = [0u8; 64];
        assert_eq!(
            assemble(b"", b"12A4567890", b"Hi", &mut out),
            Err(CodecError::InvalidDigit {
                position: 2,
                byte: b'A'
            })
        );
    }

    #[test]
    fn test_one_byte_short_buffer() {
        let needed = required_len(0, 10, 2);
        let mut out = vec![0u8; needed - 1];
        assert_eq!(
            assemble(b"", b"1234567890", b"Hi", &mut out),
            Err(CodecError::BufferTooSmall {
                required: needed,
                available: needed - 1
            })
        );
    }

    #[test]
    fn test_empty_text() {
        let mut out = [0u8; 32];
        let result = assemble(b"", b"12345", b"", &mut out).unwrap();

        assert_eq!(out[result.layout.offset_of(Field::UserDataLength)], 0);
        assert_eq!(result.layout.len_of(Field::UserData), 0);
        assert_eq!(result.total_len, required_len(0, 5, 0));
    }

    #[test]
    fn test_odd_destination_padding_in_pdu() {
        let mut out = [0u8; 32];
        let result = assemble(b"", b"12345", b"x", &mut out).unwrap();
        let span = result.layout.span(Field::DestinationAddress);

        assert_eq!(&out[span.clone()], &[0x21, 0x43, 0xF5]);
        assert_eq!(out[span.start - 2], 5);
        assert_eq!(out[span.start - 1], TypeOfAddress::INTERNATIONAL.to_byte());
    }

    #[test]
    fn test_header_constants() {
        let mut out = [0u8; 32];
        let result = assemble(b"", b"1234", b"ok", &mut out).unwrap();
        let layout = &result.layout;

        let pdu_type = PduType::from_byte(out[layout.offset_of(Field::PduType)]).unwrap();
        assert_eq!(pdu_type.message_type, MessageTypeIndicator::Submit);
        assert_eq!(
            pdu_type.validity_period_format,
            ValidityPeriodFormat::Relative
        );

        let toa = TypeOfAddress::from_byte(out[layout.offset_of(Field::DestinationType)]).unwrap();
        assert_eq!(toa.ton, TypeOfNumber::International);
        assert_eq!(toa.npi, NumericPlanIndicator::Isdn);

        assert_eq!(out[layout.offset_of(Field::ProtocolId)], 0x00);
        assert_eq!(out[layout.offset_of(Field::DataCoding)], 0x00);
    }

    #[test]
    fn test_builder_to_modem_submission() {
        let sms = SubmitPdu::builder()
            .smsc("+491710760000")
            .to("+4915112345678")
            .text("Meet at 10:30?")
            .build()
            .unwrap();

        let bytes = sms.to_bytes().unwrap();
        assert_eq!(bytes.len(), sms.encoded_len());

        let submission = CmgsSubmission::new(sms.to_encoded().unwrap());
        let tp_len = bytes.len() - 1 - 7;
        assert_eq!(submission.command_line(), format!("AT+CMGS={tp_len}\r"));

        let mut cursor = Cursor::new(bytes.as_ref());
        assert_eq!(SubmitPdu::decode(&mut cursor).unwrap(), sms);
    }

    #[test]
    fn test_address_too_long_rejected_everywhere() {
        let long = "1".repeat(MAX_DIGITS + 1);
        let mut out = [0u8; 64];

        assert!(matches!(
            assemble(long.as_bytes(), b"1234", b"Hi", &mut out),
            Err(CodecError::AddressTooLong { length: 21, .. })
        ));
        assert!(matches!(
            assemble(b"", long.as_bytes(), b"Hi", &mut out),
            Err(CodecError::AddressTooLong { length: 21, .. })
        ));
        assert!(matches!(
            SubmitPdu::builder().to(long).text("Hi").build(),
            Err(CodecError::AddressTooLong { .. })
        ));
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let mut first = [0u8; 64];
        let mut second = [0xFFu8; 64];
        let a = assemble(b"4917201", b"4915112345678", b"same input", &mut first).unwrap();
        let b = assemble(b"4917201", b"4915112345678", b"same input", &mut second).unwrap();

        assert_eq!(a, b);
        assert_eq!(first[..a.total_len], second[..b.total_len]);
    }
}
