//! UTF-8 decoding of a chunked byte stream.
//!
//! Network chunks can end in the middle of a multi-byte character. The
//! decoder holds back such a trailing partial sequence (at most 3 bytes) and
//! completes it with the next chunk. Invalid sequences become U+FFFD.

use std::str;

/// Incremental UTF-8 decoder.
#[derive(Debug, Default)]
pub struct Utf8ChunkDecoder {
    /// Bytes of an incomplete character carried to the next chunk
    carry: Vec<u8>,
}

impl Utf8ChunkDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, returning all text that is complete so far.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        if self.carry.is_empty() {
            return self.decode_bytes(chunk);
        }
        let mut bytes = std::mem::take(&mut self.carry);
        bytes.extend_from_slice(chunk);
        self.decode_bytes(&bytes)
    }

    /// Flush at end of input. A dangling partial character becomes U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.carry.is_empty() {
            String::new()
        } else {
            self.carry.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }

    /// Whether a partial character is waiting for more bytes.
    pub fn has_pending(&self) -> bool {
        !self.carry.is_empty()
    }

    fn decode_bytes(&mut self, mut bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());
        loop {
            match str::from_utf8(bytes) {
                Ok(text) => {
                    out.push_str(text);
                    return out;
                }
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    // valid_up_to guarantees this prefix is UTF-8
                    out.push_str(str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            bytes = &rest[len..];
                        }
                        None => {
                            self.carry.extend_from_slice(rest);
                            return out;
                        }
                    }
                }
            }
        }
    }
}
