// ABOUTME: GSM 7-bit default alphabet packing of user data
// ABOUTME: Eight septets are carried in seven octets, bits carried across byte boundaries

use crate::codec::CodecError;

/// Bytes occupied by `septets` packed 7-bit characters, `ceil(septets * 7 / 8)`
pub fn packed_len(septets: usize) -> usize {
    (septets * 7).div_ceil(8)
}

/// Rejects any byte that is not a 7-bit code point
pub fn validate_septets(text: &[u8]) -> Result<(), CodecError> {
    match text.iter().position(|&b| b >= 0x80) {
        Some(position) => Err(CodecError::InvalidCharacter {
            position,
            byte: text[position],
        }),
        None => Ok(()),
    }
}

/// Pack 7-bit characters into octets.
///
/// Each output byte takes the unconsumed high bits of `text[i]` and the low
/// bits of `text[i + 1]`; the shift grows by one per byte. After seven bytes
/// the shift wraps and one extra input septet is skipped, because the eighth
/// septet of the group was fully absorbed into the previous byte.
///
/// Returns the number of bytes written, always `packed_len(text.len())`.
pub fn encode_7bit(text: &[u8], out: &mut [u8]) -> Result<usize, CodecError> {
    validate_septets(text)?;

    let len = packed_len(text.len());
    if len > out.len() {
        return Err(CodecError::BufferTooSmall {
            required: len,
            available: out.len(),
        });
    }

    let mut shift: u32 = 1;
    let mut i = 0;
    let mut k = 0;

    while i + 1 < text.len() {
        out[k] = (text[i] >> (shift - 1)) | (text[i + 1] << (8 - shift));
        k += 1;
        shift += 1;
        if shift == 8 {
            shift = 1;
            i += 1;
        }
        i += 1;
    }

    // A septet left without a partner still owns the high bits of one byte
    if i < text.len() {
        out[k] = text[i] >> (shift - 1);
        k += 1;
    }

    debug_assert_eq!(k, len);
    Ok(k)
}

/// Unpack `septets` characters from packed user data.
///
/// Returns the number of characters written to `out`.
pub fn decode_7bit(packed: &[u8], septets: usize, out: &mut [u8]) -> Result<usize, CodecError> {
    if packed.len() < packed_len(septets) {
        return Err(CodecError::Incomplete);
    }
    if out.len() < septets {
        return Err(CodecError::BufferTooSmall {
            required: septets,
            available: out.len(),
        });
    }

    for (n, septet) in out.iter_mut().take(septets).enumerate() {
        let bit = n * 7;
        let byte = bit / 8;
        let offset = (bit % 8) as u32;

        let mut value = packed[byte] >> offset;
        if offset > 1 {
            value |= packed[byte + 1] << (8 - offset);
        }
        *septet = value & 0x7F;
    }

    Ok(septets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(text: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; packed_len(text.len())];
        let written = encode_7bit(text, &mut out).unwrap();
        assert_eq!(written, out.len());
        out
    }

    fn unpack(packed: &[u8], septets: usize) -> Vec<u8> {
        let mut out = vec![0u8; septets];
        decode_7bit(packed, septets, &mut out).unwrap();
        out
    }

    #[test]
    fn test_known_answer_hellohello() {
        assert_eq!(
            pack(b"hellohello"),
            [0xE8, 0x32, 0x9B, 0xFD, 0x46, 0x97, 0xD9, 0xEC, 0x37]
        );
    }

    #[test]
    fn test_known_answer_hi() {
        // 'H' = 0x48, 'i' = 0x69
        assert_eq!(pack(b"Hi"), [0xC8, 0x34]);
    }

    #[test]
    fn test_eight_septets_fill_seven_bytes() {
        let packed = pack(b"ABCDEFGH");
        assert_eq!(packed.len(), 7);
        // The eighth septet sits in the top seven bits of the last byte
        assert_eq!(packed[6] >> 1, b'H');
        assert_eq!(unpack(&packed, 8), b"ABCDEFGH");
    }

    #[test]
    fn test_group_boundary_continues_cleanly() {
        let text = b"ABCDEFGHIJKLMNOPQ";
        let packed = pack(text);
        assert_eq!(packed.len(), 15);
        // Second group starts byte-aligned
        assert_eq!(packed[7] & 0x7F, b'I');
        assert_eq!(unpack(&packed, text.len()), text);
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(pack(b"A"), [0x41]);
        assert!(pack(b"").is_empty());
    }

    #[test]
    fn test_output_length_formula_holds() {
        for len in 0..=160usize {
            let text: Vec<u8> = (0..len).map(|n| (n * 37 % 128) as u8).collect();
            let mut out = vec![0u8; 140];
            let written = encode_7bit(&text, &mut out).unwrap();
            assert_eq!(written, (len * 7).div_ceil(8), "length {len}");
        }
    }

    #[test]
    fn test_every_length_round_trips() {
        for len in 0..=160usize {
            let text: Vec<u8> = (0..len).map(|n| ((n * 53 + 11) % 128) as u8).collect();
            let packed = pack(&text);
            assert_eq!(unpack(&packed, len), text, "length {len}");
        }
    }

    #[test]
    fn test_full_range_of_code_points() {
        let text: Vec<u8> = (0u8..128).collect();
        assert_eq!(unpack(&pack(&text), text.len()), text);
    }

    #[test]
    fn test_rejects_8bit_input() {
        let mut out = [0u8; 8];
        assert_eq!(
            encode_7bit(&[b'o', b'k', 0x80], &mut out),
            Err(CodecError::InvalidCharacter {
                position: 2,
                byte: 0x80
            })
        );
    }

    #[test]
    fn test_rejects_short_buffer_before_writing() {
        let mut out = [0u8; 8];
        // 10 septets need 9 bytes
        assert_eq!(
            encode_7bit(b"hellohello", &mut out),
            Err(CodecError::BufferTooSmall {
                required: 9,
                available: 8
            })
        );
        assert_eq!(out, [0u8; 8]);
    }

    #[test]
    fn test_decode_reports_truncated_input() {
        let mut out = [0u8; 10];
        assert_eq!(
            decode_7bit(&[0xE8, 0x32], 10, &mut out),
            Err(CodecError::Incomplete)
        );
    }
}
