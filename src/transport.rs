// ABOUTME: Hands an assembled PDU to a GSM modem with the AT+CMGS text-mode exchange
// ABOUTME: Renders the command line and hex payload, and writes them to any async writer

use crate::submit::EncodedPdu;
use bytes::{BufMut, Bytes, BytesMut};
use std::io;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

/// Terminates the hex payload and tells the modem to send
pub const CTRL_Z: u8 = 0x1A;

/// Cancels a pending submission at the `> ` prompt
pub const ESC: u8 = 0x1B;

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Append the uppercase hex rendering of `bytes` to `dst`
pub fn hex_encode(bytes: &[u8], dst: &mut BytesMut) {
    dst.reserve(bytes.len() * 2);
    for &b in bytes {
        dst.put_u8(HEX_DIGITS[(b >> 4) as usize]);
        dst.put_u8(HEX_DIGITS[(b & 0x0F) as usize]);
    }
}

/// Uppercase hex rendering of `bytes`
pub fn hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&b| {
            [
                HEX_DIGITS[(b >> 4) as usize] as char,
                HEX_DIGITS[(b & 0x0F) as usize] as char,
            ]
        })
        .collect()
}

/// One PDU-mode submission to a modem.
///
/// The exchange is two writes: the command line announcing the TP-length,
/// then (after the modem answers with its `> ` prompt) the PDU as hex
/// followed by Ctrl-Z. Reading the prompt and the `+CMGS:` reply is left to
/// the caller, which owns the serial line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CmgsSubmission {
    pdu: EncodedPdu,
}

impl CmgsSubmission {
    pub fn new(pdu: EncodedPdu) -> Self {
        Self { pdu }
    }

    pub fn pdu(&self) -> &EncodedPdu {
        &self.pdu
    }

    /// `AT+CMGS=<tp_len>\r`, where the length excludes the SMSC header
    pub fn command_line(&self) -> String {
        format!("AT+CMGS={}\r", self.pdu.tp_len)
    }

    /// Hex encoded PDU terminated by Ctrl-Z
    pub fn payload(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.pdu.len() * 2 + 1);
        hex_encode(self.pdu.as_ref(), &mut buf);
        buf.put_u8(CTRL_Z);
        buf.freeze()
    }

    /// Send the command line that asks the modem for the payload prompt
    pub async fn write_command<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let line = self.command_line();
        debug!(tp_len = self.pdu.tp_len, "sending AT+CMGS");
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await
    }

    /// Send the PDU once the modem has prompted for it
    pub async fn write_payload<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let payload = self.payload();
        trace!(payload = %String::from_utf8_lossy(&payload[..payload.len() - 1]), "PDU payload");
        debug!(bytes = self.pdu.len(), "sending PDU");
        writer.write_all(&payload).await?;
        writer.flush().await
    }

    /// Abandon the submission instead of sending the payload
    pub async fn write_abort<W>(&self, writer: &mut W) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        debug!("aborting AT+CMGS");
        writer.write_all(&[ESC]).await?;
        writer.flush().await
    }
}

impl From<EncodedPdu> for CmgsSubmission {
    fn from(pdu: EncodedPdu) -> Self {
        Self::new(pdu)
    }
}
