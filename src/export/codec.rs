//! Base64 payload decoding into chunked binary objects.
//!
//! The decoder walks the encoded text in groups of whole base64 quanta, so the
//! temporary buffers stay at roughly one chunk no matter how large the payload
//! is. Output is collected as a [`Blob`]: an ordered list of parts that are
//! exactly `chunk_size` bytes long, except possibly the last.

use std::io::Write;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;

use crate::error::{Result, ViewerError};

/// Default part size in bytes.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Largest accepted part size. Larger settings are capped.
pub const MAX_CHUNK_SIZE: usize = 16 * 1024 * 1024;

/// Standard alphabet, padding optional (matches what browsers accept).
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded binary object ready for export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    content_type: String,
    parts: Vec<Vec<u8>>,
    len: usize,
}

impl Blob {
    /// Build a blob from already-decoded bytes, split into `chunk_size` parts.
    pub fn from_bytes(content_type: &str, bytes: &[u8], chunk_size: usize) -> Self {
        let mut builder = PartBuilder::new(effective_chunk_size(chunk_size), bytes.len());
        builder.extend(bytes);
        builder.finish(content_type)
    }

    /// MIME type the blob was decoded for.
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Total size in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The decoded parts, in order.
    pub fn parts(&self) -> &[Vec<u8>] {
        &self.parts
    }

    /// Stream every part into `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for part in &self.parts {
            writer.write_all(part)?;
        }
        writer.flush()
    }

    /// Concatenate the parts into one buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for part in self.parts {
            out.extend_from_slice(&part);
        }
        out
    }
}

/// Encode bytes as standard, padded base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode a base64 payload into a flat byte vector.
pub fn decode(b64: &str, chunk_size: usize) -> Result<Vec<u8>> {
    decode_blob(b64, "", chunk_size).map(Blob::into_bytes)
}

/// Decode a base64 payload into a [`Blob`] tagged with `content_type`.
///
/// ASCII whitespace (line wrapping) is skipped and trailing padding is
/// optional. There is no upper size limit.
pub fn decode_blob(b64: &str, content_type: &str, chunk_size: usize) -> Result<Blob> {
    let chunk_size = effective_chunk_size(chunk_size);
    // Enough encoded characters to yield at least one full part.
    let group_chars = chunk_size.div_ceil(3) * 4;
    // No group is ever longer than the input.
    let group_capacity = group_chars.min(b64.len());

    let mut group: Vec<u8> = Vec::with_capacity(group_capacity);
    let mut group_start = 0usize;
    let mut scratch = vec![0u8; base64::decoded_len_estimate(group_capacity)];
    let mut builder = PartBuilder::new(chunk_size, base64::decoded_len_estimate(b64.len()));

    for (pos, byte) in b64.bytes().enumerate() {
        if byte.is_ascii_whitespace() {
            continue;
        }
        if group.is_empty() {
            group_start = pos;
        }
        group.push(byte);
        if group.len() == group_chars {
            let written = decode_group(&group, &mut scratch, group_start)?;
            builder.extend(&scratch[..written]);
            group.clear();
        }
    }

    if !group.is_empty() {
        let written = decode_group(&group, &mut scratch, group_start)?;
        builder.extend(&scratch[..written]);
    }

    Ok(builder.finish(content_type))
}

fn decode_group(group: &[u8], scratch: &mut [u8], start: usize) -> Result<usize> {
    LENIENT
        .decode_slice(group, scratch)
        .map_err(|e| ViewerError::Decode {
            offset: start,
            reason: e.to_string(),
        })
}

fn effective_chunk_size(chunk_size: usize) -> usize {
    match chunk_size {
        0 => DEFAULT_CHUNK_SIZE,
        n => n.min(MAX_CHUNK_SIZE),
    }
}

/// Accumulates bytes into fixed-size parts.
struct PartBuilder {
    chunk_size: usize,
    /// Upper bound on the bytes still to come, used to size new parts.
    expected: usize,
    parts: Vec<Vec<u8>>,
    current: Vec<u8>,
    len: usize,
}

impl PartBuilder {
    fn new(chunk_size: usize, expected: usize) -> Self {
        Self {
            chunk_size,
            expected,
            parts: Vec::new(),
            current: Vec::with_capacity(chunk_size.min(expected)),
            len: 0,
        }
    }

    fn extend(&mut self, mut bytes: &[u8]) {
        self.len += bytes.len();
        while !bytes.is_empty() {
            let room = self.chunk_size - self.current.len();
            let (head, tail) = bytes.split_at(room.min(bytes.len()));
            self.current.extend_from_slice(head);
            bytes = tail;
            if self.current.len() == self.chunk_size {
                let remaining = self.expected.saturating_sub(self.len) + bytes.len();
                let next = Vec::with_capacity(self.chunk_size.min(remaining));
                self.parts.push(std::mem::replace(&mut self.current, next));
            }
        }
    }

    fn finish(mut self, content_type: &str) -> Blob {
        if !self.current.is_empty() {
            self.parts.push(self.current);
        }
        Blob {
            content_type: content_type.to_string(),
            parts: self.parts,
            len: self.len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 31 % 251) as u8).collect()
    }

    #[test]
    fn test_roundtrip_around_chunk_boundary() {
        for len in [0usize, 1, 2, 3, 511, 512, 513, 1024, 1537, 10_000] {
            let data = payload(len);
            let decoded = decode(&encode(&data), DEFAULT_CHUNK_SIZE).expect("decode");
            assert_eq!(decoded, data, "roundtrip failed for {len} bytes");
        }
    }

    #[test]
    fn test_parts_are_chunk_sized() {
        let data = payload(1300);
        let blob = decode_blob(&encode(&data), "application/pdf", 512).expect("decode");
        let sizes: Vec<usize> = blob.parts().iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![512, 512, 276]);
        assert_eq!(blob.len(), 1300);
        assert_eq!(blob.content_type(), "application/pdf");
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let blob = decode_blob(&encode(&payload(1024)), "", 512).expect("decode");
        assert_eq!(blob.parts().len(), 2);
    }

    #[test]
    fn test_empty_payload() {
        let blob = decode_blob("", "image/png", 512).expect("decode");
        assert!(blob.is_empty());
        assert!(blob.parts().is_empty());
    }

    #[test]
    fn test_tiny_chunk_sizes() {
        let data = payload(17);
        for chunk in [1usize, 2, 3, 4, 5] {
            let blob = decode_blob(&encode(&data), "", chunk).expect("decode");
            assert!(blob.parts().iter().all(|p| p.len() <= chunk));
            assert_eq!(blob.into_bytes(), data);
        }
    }

    #[test]
    fn test_zero_chunk_size_uses_default() {
        let blob = decode_blob(&encode(&payload(600)), "", 0).expect("decode");
        assert_eq!(blob.parts()[0].len(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_line_wrapped_input() {
        let data = payload(300);
        let encoded = encode(&data);
        let wrapped: String = encoded
            .as_bytes()
            .chunks(76)
            .map(|line| format!("{}\r\n", std::str::from_utf8(line).expect("ascii")))
            .collect();
        assert_eq!(decode(&wrapped, 64).expect("decode"), data);
    }

    #[test]
    fn test_missing_padding_is_accepted() {
        assert_eq!(decode("aGVsbG8", 512).expect("decode"), b"hello");
        assert_eq!(decode("aGVsbG8=", 512).expect("decode"), b"hello");
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        let err = decode("aGVs*G8=", 512).unwrap_err();
        assert!(matches!(err, ViewerError::Decode { .. }));
    }

    #[test]
    fn test_huge_chunk_size_is_bounded_by_input() {
        assert_eq!(decode("aGVsbG8=", usize::MAX / 2).expect("decode"), b"hello");
        assert_eq!(decode("aGVsbG8=", usize::MAX).expect("decode"), b"hello");

        let blob = decode_blob("aGVsbG8=", "", usize::MAX).expect("decode");
        assert_eq!(blob.parts().len(), 1);
        assert!(blob.parts()[0].capacity() < 64);
        assert_eq!(effective_chunk_size(usize::MAX), MAX_CHUNK_SIZE);
    }

    #[test]
    fn test_write_to_streams_all_parts() {
        let data = payload(2000);
        let blob = Blob::from_bytes("image/gif", &data, 512);
        let mut out = Vec::new();
        blob.write_to(&mut out).expect("write");
        assert_eq!(out, data);
    }
}
