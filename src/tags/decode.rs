//! Byte-to-text decoding for raw tag payloads.

/// Text encodings tried when decoding a raw byte payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8.
    Utf8,
    /// UTF-16 with a leading byte-order mark (`FF FE` or `FE FF`).
    Utf16,
    /// ISO-8859-1; every byte maps to the code point of the same value.
    Latin1,
}

/// Default decoding order for tag payloads.
pub const DEFAULT_ENCODINGS: [TextEncoding; 3] =
    [TextEncoding::Utf8, TextEncoding::Utf16, TextEncoding::Latin1];

impl TextEncoding {
    /// Attempts a strict decode; `None` when the bytes are not valid in this encoding.
    #[must_use]
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            Self::Utf16 => decode_utf16_with_bom(bytes),
            Self::Latin1 => Some(bytes.iter().copied().map(char::from).collect()),
        }
    }
}

fn decode_utf16_with_bom(bytes: &[u8]) -> Option<String> {
    let (little_endian, body) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (true, rest),
        [0xFE, 0xFF, rest @ ..] => (false, rest),
        _ => return None,
    };
    if body.len() % 2 != 0 {
        return None;
    }

    let units: Vec<u16> = body
        .chunks_exact(2)
        .map(|pair| {
            if little_endian {
                u16::from_le_bytes([pair[0], pair[1]])
            } else {
                u16::from_be_bytes([pair[0], pair[1]])
            }
        })
        .collect();
    String::from_utf16(&units).ok()
}

/// Decodes bytes with [`DEFAULT_ENCODINGS`], trimming the result.
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> String {
    decode_bytes_with(bytes, &DEFAULT_ENCODINGS)
}

/// Decodes bytes by trying each encoding in order.
///
/// Never fails: when every encoding rejects the payload, falls back to lossy
/// UTF-8 with replacement characters. The result is trimmed.
#[must_use]
pub fn decode_bytes_with(bytes: &[u8], encodings: &[TextEncoding]) -> String {
    for encoding in encodings {
        if let Some(text) = encoding.decode(bytes) {
            return text.trim().to_string();
        }
    }
    String::from_utf8_lossy(bytes).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_bytes_utf8() {
        assert_eq!(decode_bytes("Mistborn ".as_bytes()), "Mistborn");
        assert_eq!(decode_bytes("Café".as_bytes()), "Café");
    }

    #[test]
    fn test_decode_bytes_utf16_with_bom() {
        let mut le = vec![0xFF, 0xFE];
        for unit in "Dune".encode_utf16() {
            le.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode_bytes(&le), "Dune");

        let mut be = vec![0xFE, 0xFF];
        for unit in "Dune".encode_utf16() {
            be.extend_from_slice(&unit.to_be_bytes());
        }
        assert_eq!(decode_bytes(&be), "Dune");
    }

    #[test]
    fn test_decode_bytes_latin1_fallback() {
        // 0xE9 alone is invalid UTF-8 and has no BOM, so Latin-1 wins.
        assert_eq!(decode_bytes(&[b'c', b'a', b'f', 0xE9]), "café");
    }

    #[test]
    fn test_decode_bytes_lossy_when_chain_exhausted() {
        let decoded = decode_bytes_with(&[b'o', b'k', 0xFF], &[TextEncoding::Utf8]);
        assert!(decoded.starts_with("ok"));
        assert!(decoded.contains('\u{FFFD}'));
    }

    #[test]
    fn test_decode_utf16_rejects_odd_length_body() {
        assert_eq!(TextEncoding::Utf16.decode(&[0xFF, 0xFE, 0x41]), None);
        assert_eq!(TextEncoding::Utf16.decode(b"AB"), None);
    }
}
