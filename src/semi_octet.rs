// ABOUTME: Semi-octet (swapped-nibble BCD) packing of address digits
// ABOUTME: Two digits per byte, first digit in the low nibble, odd length padded with 0xF

use crate::codec::CodecError;
use crate::datatypes::validate_digits;

/// High nibble of the last byte when the digit count is odd
const PAD_NIBBLE: u8 = 0x0F;

/// Bytes needed to hold `digit_count` digits
pub fn encoded_len(digit_count: usize) -> usize {
    digit_count.div_ceil(2)
}

/// Pack ASCII decimal digits into semi-octets.
///
/// `out[i]` holds `digits[2i]` in its low nibble and `digits[2i + 1]` in its
/// high nibble. Returns the number of bytes written, `ceil(digits.len() / 2)`.
/// Nothing is written unless the whole input is valid and fits.
pub fn encode(digits: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
    validate_digits(digits)?;

    let len = encoded_len(digits.len());
    if out.len() < len {
        return Err(CodecError::BufferTooSmall {
            required: len,
            available: out.len(),
        });
    }

    for (byte, pair) in out.iter_mut().zip(digits.chunks(2)) {
        let low = pair[0] - b'0';
        let high = match pair.get(1) {
            Some(digit) => digit - b'0',
            None => PAD_NIBBLE,
        };
        *byte = (high << 4) | low;
    }

    Ok(len)
}

/// Unpack `digit_count` semi-octet digits back into ASCII.
///
/// Returns the number of digits written to `out`.
pub fn decode(encoded: &[u8], digit_count: usize, out: &mut [u8]) -> Result<usize, CodecError> {
    let len = encoded_len(digit_count);
    if encoded.len() < len {
        return Err(CodecError::Incomplete);
    }
    if out.len() < digit_count {
        return Err(CodecError::BufferTooSmall {
            required: digit_count,
            available: out.len(),
        });
    }

    for position in 0..digit_count {
        let byte = encoded[position / 2];
        let nibble = if position % 2 == 0 { byte & 0x0F } else { byte >> 4 };
        if nibble > 9 {
            return Err(CodecError::InvalidDigit {
                position,
                byte: nibble,
            });
        }
        out[position] = b'0' + nibble;
    }

    if digit_count % 2 == 1 {
        let pad = encoded[len - 1] >> 4;
        if pad != PAD_NIBBLE {
            return Err(CodecError::InvalidPadding(pad));
        }
    }

    Ok(digit_count)
}
