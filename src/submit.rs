// ABOUTME: SMS-SUBMIT PDU assembly: SMSC header, TPDU header, destination and packed text
// ABOUTME: Records every field's byte span so the TP-length is derived, not recomputed

use crate::codec::{
    CodecError, Decodable, Encodable, PduWriter, decode_slice, decode_u8, expect_u8,
};
use crate::datatypes::{
    DigitString, MAX_SEPTETS, PduType, TextMessage, TypeOfAddress, ValidityPeriod,
    validate_digits,
};
use crate::{semi_octet, septet};
use bytes::{Buf, Bytes};
use num_enum::IntoPrimitive;
use std::io::Cursor;
use std::ops::Range;
use tracing::{debug, warn};

/// TP-Message-Reference; zero lets the modem assign one
pub const MESSAGE_REFERENCE: u8 = 0x00;

/// TP-Protocol-Identifier: plain short message
pub const PROTOCOL_ID: u8 = 0x00;

/// TP-Data-Coding-Scheme: GSM 7-bit default alphabet, uncompressed, no class
pub const DATA_CODING_GSM7: u8 = 0x00;

/// The regions of an SMS-SUBMIT PDU, in wire order
#[derive(IntoPrimitive)]
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    SmscLength,
    SmscAddress,
    PduType,
    MessageReference,
    DestinationLength,
    DestinationType,
    DestinationAddress,
    ProtocolId,
    DataCoding,
    ValidityPeriod,
    UserDataLength,
    UserData,
}

impl Field {
    pub const COUNT: usize = 12;

    pub const ALL: [Field; Field::COUNT] = [
        Field::SmscLength,
        Field::SmscAddress,
        Field::PduType,
        Field::MessageReference,
        Field::DestinationLength,
        Field::DestinationType,
        Field::DestinationAddress,
        Field::ProtocolId,
        Field::DataCoding,
        Field::ValidityPeriod,
        Field::UserDataLength,
        Field::UserData,
    ];

    fn index(self) -> usize {
        u8::from(self) as usize
    }
}

/// Byte span of every field written into a PDU buffer.
///
/// A field that carries no bytes (the SMSC address when no SMSC is given)
/// has an empty span at the position it would have occupied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PduLayout {
    spans: [Range<usize>; Field::COUNT],
}

impl PduLayout {
    fn record(&mut self, field: Field, span: Range<usize>) {
        self.spans[field.index()] = span;
    }

    pub fn span(&self, field: Field) -> Range<usize> {
        self.spans[field.index()].clone()
    }

    pub fn offset_of(&self, field: Field) -> usize {
        self.spans[field.index()].start
    }

    pub fn len_of(&self, field: Field) -> usize {
        self.spans[field.index()].len()
    }

    /// Bytes taken by the SMSC header: its length octet plus the
    /// type-of-address and address octets that octet counts
    pub fn smsc_header_len(&self) -> usize {
        self.len_of(Field::SmscLength) + self.len_of(Field::SmscAddress)
    }

    pub fn total_len(&self) -> usize {
        self.spans[Field::UserData.index()].end
    }
}

/// Outcome of a successful assembly
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PduResult {
    /// Bytes written to the output buffer
    pub total_len: usize,
    /// Length to report in `AT+CMGS=<tp_len>`: the PDU without the SMSC header
    pub tp_len: usize,
    pub layout: PduLayout,
}

/// Value of the SMSC length octet: type-of-address plus address bytes, or 0
fn smsc_length_value(smsc_digits: usize) -> usize {
    if smsc_digits == 0 {
        0
    } else {
        1 + semi_octet::encoded_len(smsc_digits)
    }
}

/// Exact buffer size `assemble` needs for the given input sizes
pub fn required_len(smsc_digits: usize, dest_digits: usize, septets: usize) -> usize {
    1 + smsc_length_value(smsc_digits)
        + 4
        + semi_octet::encoded_len(dest_digits)
        + 4
        + septet::packed_len(septets)
}

/// Checks all inputs in the order errors are reported: text length, then
/// SMSC digits, destination digits and presence, and finally text characters
pub fn validate_inputs(smsc: &[u8], dest: &[u8], text: &[u8]) -> Result<(), CodecError> {
    if text.len() > MAX_SEPTETS {
        return Err(CodecError::MessageTooLong {
            length: text.len(),
            max: MAX_SEPTETS,
        });
    }

    validate_digits(smsc)?;
    validate_digits(dest)?;
    if dest.is_empty() {
        return Err(CodecError::EmptyDestination);
    }

    septet::validate_septets(text)
}

/// Writes fields through a bounds-checked writer and records where each landed
struct PduBuilder<'a> {
    writer: PduWriter<'a>,
    layout: PduLayout,
}

impl<'a> PduBuilder<'a> {
    fn new(out: &'a mut [u8]) -> Self {
        Self {
            writer: PduWriter::new(out),
            layout: PduLayout::default(),
        }
    }

    fn field<F>(&mut self, field: Field, write: F) -> Result<(), CodecError>
    where
        F: FnOnce(&mut PduWriter<'a>) -> Result<(), CodecError>,
    {
        let start = self.writer.position();
        write(&mut self.writer)?;
        self.layout.record(field, start..self.writer.position());
        Ok(())
    }

    fn finish(self) -> PduResult {
        let total_len = self.writer.position();
        debug_assert_eq!(total_len, self.layout.total_len());

        PduResult {
            total_len,
            tp_len: total_len - self.layout.smsc_header_len(),
            layout: self.layout,
        }
    }
}

/// Build an SMS-SUBMIT PDU into `out`.
///
/// `smsc` and `dest` are decimal digit strings without a leading `'+'`; an
/// empty `smsc` means the modem's configured service centre is used. `text`
/// holds at most 160 7-bit characters.
///
/// On error the contents of `out` are unspecified and must be discarded.
pub fn assemble(
    smsc: &[u8],
    dest: &[u8],
    text: &[u8],
    out: &mut [u8],
) -> Result<PduResult, CodecError> {
    if let Err(err) = validate_inputs(smsc, dest, text) {
        warn!(%err, "rejecting SMS-SUBMIT input");
        return Err(err);
    }

    let result = write_pdu(smsc, dest, text, out);
    match &result {
        Ok(pdu) => debug!(
            total_len = pdu.total_len,
            tp_len = pdu.tp_len,
            septets = text.len(),
            "assembled SMS-SUBMIT PDU"
        ),
        Err(err) => warn!(%err, capacity = out.len(), "SMS-SUBMIT PDU does not fit"),
    }
    result
}

fn write_pdu(
    smsc: &[u8],
    dest: &[u8],
    text: &[u8],
    out: &mut [u8],
) -> Result<PduResult, CodecError> {
    let mut pdu = PduBuilder::new(out);
    let international = TypeOfAddress::INTERNATIONAL.to_byte();

    // Inputs are validated, so these counts fit in one octet
    pdu.field(Field::SmscLength, |w| w.put_u8(smsc_length_value(smsc.len()) as u8))?;
    pdu.field(Field::SmscAddress, |w| {
        if smsc.is_empty() {
            return Ok(());
        }
        w.put_u8(international)?;
        w.put_with(semi_octet::encoded_len(smsc.len()), |buf| {
            semi_octet::encode(smsc, buf)
        })
    })?;

    pdu.field(Field::PduType, |w| w.put_u8(PduType::SUBMIT.to_byte()))?;
    pdu.field(Field::MessageReference, |w| w.put_u8(MESSAGE_REFERENCE))?;

    // Digit count, unlike the SMSC length which counts octets
    pdu.field(Field::DestinationLength, |w| w.put_u8(dest.len() as u8))?;
    pdu.field(Field::DestinationType, |w| w.put_u8(international))?;
    pdu.field(Field::DestinationAddress, |w| {
        w.put_with(semi_octet::encoded_len(dest.len()), |buf| {
            semi_octet::encode(dest, buf)
        })
    })?;

    pdu.field(Field::ProtocolId, |w| w.put_u8(PROTOCOL_ID))?;
    pdu.field(Field::DataCoding, |w| w.put_u8(DATA_CODING_GSM7))?;
    pdu.field(Field::ValidityPeriod, |w| {
        w.put_u8(ValidityPeriod::TEN_DAYS.to_byte())
    })?;

    // Septet count, not packed byte count
    pdu.field(Field::UserDataLength, |w| w.put_u8(text.len() as u8))?;
    pdu.field(Field::UserData, |w| {
        w.put_with(septet::packed_len(text.len()), |buf| {
            septet::encode_7bit(text, buf)
        })
    })?;

    let result = pdu.finish();
    debug_assert_eq!(
        result.layout.len_of(Field::SmscAddress),
        smsc_length_value(smsc.len())
    );
    Ok(result)
}

/// A validated SMS-SUBMIT message
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SubmitPdu {
    /// Service centre address; empty to use the one configured in the modem
    pub smsc: DigitString,
    pub destination: DigitString,
    pub text: TextMessage,
}

impl SubmitPdu {
    pub fn new(smsc: &str, destination: &str, text: &str) -> Result<Self, CodecError> {
        validate_inputs(smsc.as_bytes(), destination.as_bytes(), text.as_bytes())?;

        Ok(Self {
            smsc: smsc.parse()?,
            destination: destination.parse()?,
            text: text.parse()?,
        })
    }

    pub fn builder() -> SubmitPduBuilder {
        SubmitPduBuilder::default()
    }

    /// Assemble into a caller supplied buffer
    pub fn assemble_into(&self, out: &mut [u8]) -> Result<PduResult, CodecError> {
        assemble(
            self.smsc.as_bytes(),
            self.destination.as_bytes(),
            self.text.as_bytes(),
            out,
        )
    }

    /// Assemble into a freshly allocated buffer, keeping the TP-length
    pub fn to_encoded(&self) -> Result<EncodedPdu, CodecError> {
        let mut buf = bytes::BytesMut::zeroed(self.encoded_len());
        let result = self.assemble_into(&mut buf)?;
        buf.truncate(result.total_len);

        Ok(EncodedPdu {
            bytes: buf.freeze(),
            tp_len: result.tp_len,
        })
    }
}

impl Encodable for SubmitPdu {
    fn encoded_len(&self) -> usize {
        required_len(self.smsc.len(), self.destination.len(), self.text.len())
    }

    fn encode(&self, out: &mut [u8]) -> Result<usize, CodecError> {
        self.assemble_into(out).map(|result| result.total_len)
    }
}

/// Read a type-of-address octet that must be international ISDN
fn decode_international(buf: &mut Cursor<&[u8]>, field: &'static str) -> Result<(), CodecError> {
    let value = decode_u8(buf)?;
    if TypeOfAddress::from_byte(value)? != TypeOfAddress::INTERNATIONAL {
        return Err(CodecError::UnexpectedValue {
            field,
            expected: TypeOfAddress::INTERNATIONAL.to_byte(),
            actual: value,
        });
    }
    Ok(())
}

fn decode_digits(encoded: &[u8], digit_count: usize) -> Result<DigitString, CodecError> {
    let mut digits = [0u8; 2 * crate::datatypes::MAX_DIGITS];
    if digit_count > digits.len() {
        return Err(CodecError::AddressTooLong {
            length: digit_count,
            max: crate::datatypes::MAX_DIGITS,
        });
    }
    let count = semi_octet::decode(encoded, digit_count, &mut digits)?;
    DigitString::new(&digits[..count])
}

impl Decodable for SubmitPdu {
    /// Parse a PDU with the header values `assemble` writes: SMS-SUBMIT with a
    /// relative validity period, international addresses and 7-bit text
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError> {
        let smsc_len = decode_u8(buf)? as usize;
        let smsc = if smsc_len == 0 {
            DigitString::empty()
        } else if smsc_len == 1 {
            // A type-of-address with no digits; the encoder writes 0x00 instead
            return Err(CodecError::UnexpectedValue {
                field: "smsc_length",
                expected: 0x00,
                actual: 0x01,
            });
        } else {
            decode_international(buf, "smsc_type")?;
            let encoded = decode_slice(buf, smsc_len - 1)?;
            // The SMSC length counts octets, so the digit count comes from the padding
            let padded = encoded.last().is_some_and(|b| b >> 4 == 0x0F);
            decode_digits(encoded, encoded.len() * 2 - padded as usize)?
        };

        let pdu_type = decode_u8(buf)?;
        if PduType::from_byte(pdu_type)? != PduType::SUBMIT {
            return Err(CodecError::UnexpectedValue {
                field: "pdu_type",
                expected: PduType::SUBMIT.to_byte(),
                actual: pdu_type,
            });
        }
        let _message_reference = decode_u8(buf)?;

        let dest_digits = decode_u8(buf)? as usize;
        if dest_digits == 0 {
            return Err(CodecError::EmptyDestination);
        }
        decode_international(buf, "destination_type")?;
        let encoded = decode_slice(buf, semi_octet::encoded_len(dest_digits))?;
        let destination = decode_digits(encoded, dest_digits)?;

        expect_u8(buf, "protocol_id", PROTOCOL_ID)?;
        expect_u8(buf, "data_coding", DATA_CODING_GSM7)?;
        let _validity_period = ValidityPeriod(decode_u8(buf)?);

        let septets = decode_u8(buf)? as usize;
        if septets > MAX_SEPTETS {
            return Err(CodecError::MessageTooLong {
                length: septets,
                max: MAX_SEPTETS,
            });
        }
        let packed = decode_slice(buf, septet::packed_len(septets))?;
        let mut text = [0u8; MAX_SEPTETS];
        let count = septet::decode_7bit(packed, septets, &mut text)?;

        if buf.has_remaining() {
            return Err(CodecError::TrailingData(buf.remaining()));
        }

        Ok(Self {
            smsc,
            destination,
            text: TextMessage::new(&text[..count])?,
        })
    }
}

/// An assembled PDU together with the length the submit command reports
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPdu {
    pub bytes: Bytes,
    pub tp_len: usize,
}

impl EncodedPdu {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Uppercase hex rendering, as sent to the modem
    pub fn to_hex(&self) -> String {
        crate::transport::hex_string(&self.bytes)
    }
}

impl AsRef<[u8]> for EncodedPdu {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

/// Builder for SubmitPdu values
#[derive(Debug, Default)]
pub struct SubmitPduBuilder {
    smsc: Option<String>,
    to: Option<String>,
    text: Option<String>,
}

impl SubmitPduBuilder {
    /// Set the service centre address; a leading '+' is stripped
    pub fn smsc(mut self, smsc: impl Into<String>) -> Self {
        self.smsc = Some(smsc.into());
        self
    }

    /// Set the destination number; a leading '+' is stripped
    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn build(self) -> Result<SubmitPdu, CodecError> {
        let smsc = self.smsc.unwrap_or_default();
        let to = self.to.unwrap_or_default();
        let text = self.text.unwrap_or_default();

        SubmitPdu::new(
            smsc.strip_prefix('+').unwrap_or(&smsc),
            to.strip_prefix('+').unwrap_or(&to),
            &text,
        )
    }
}
