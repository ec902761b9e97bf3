pub mod codec;
pub mod datatypes;
pub mod semi_octet;
pub mod septet;
pub mod submit;
pub mod transport;

#[cfg(test)]
mod tests;

// Re-export codec types for direct access
pub use codec::{CodecError, Decodable, Encodable, PduWriter};

// Re-export the assembler API
pub use submit::{
    EncodedPdu, Field, PduLayout, PduResult, SubmitPdu, SubmitPduBuilder, assemble, required_len,
};

pub use septet::encode_7bit;
pub use transport::CmgsSubmission;

/// A specialized `Result` type for PDU encoding.
///
/// Every failure is a `CodecError`; nothing in the encoder allocates an error.
///
/// # Examples
///
/// ## Assembling into a fixed buffer
///
/// ```rust
/// use sms_pdu::{assemble, required_len};
///
/// fn main() -> sms_pdu::Result<()> {
///     let mut out = [0u8; 64];
///     let pdu = assemble(b"", b"1234567890", b"Hi", &mut out)?;
///
///     assert_eq!(pdu.total_len, required_len(0, 10, 2));
///     assert_eq!(pdu.tp_len, 15);
///     assert_eq!(&out[..3], &[0x00, 0x11, 0x00]);
///     Ok(())
/// }
/// ```
///
/// ## Preparing a modem submission
///
/// ```rust
/// use sms_pdu::{CmgsSubmission, SubmitPdu};
///
/// fn main() -> sms_pdu::Result<()> {
///     let sms = SubmitPdu::builder()
///         .smsc("+4917201")
///         .to("+1234567890")
///         .text("Hi")
///         .build()?;
///
///     let submission = CmgsSubmission::new(sms.to_encoded()?);
///     assert_eq!(submission.command_line(), "AT+CMGS=15\r");
///     Ok(())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CodecError>;
