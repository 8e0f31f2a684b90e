//! Level stream reader
//!
//! Level files come in two encodings selected by their first byte:
//!
//! ```text
//! 0x00 <p_size> <records...>            raw binary
//! '0' <marker> <hex digits, '?', filler> hex text
//! ```
//!
//! In hex text every byte is written as two hex digits. Any character that is
//! not a hex digit or `?` is ignored, which allows free-form annotations. A
//! field written entirely as `?` decodes to the wildcard sentinel.

use crate::{LevelError, Result};
use bytes::{Buf, Bytes};

/// Byte value of the wildcard sentinel
pub const WILDCARD: u8 = b'?';

/// On-disk encoding of a level stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Bytes are stored verbatim
    Raw,
    /// Bytes are stored as ASCII hex pairs
    Hex,
}

/// Result of a single `read`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk {
    /// Decoded bytes (may be shorter than requested at end of file)
    Bytes(Vec<u8>),
    /// Every character of the field was `?`
    Wildcard,
}

impl Chunk {
    pub fn is_empty(&self) -> bool {
        matches!(self, Chunk::Bytes(b) if b.is_empty())
    }

    /// Raw bytes of the chunk; the wildcard becomes the single sentinel byte
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Chunk::Bytes(b) => b,
            Chunk::Wildcard => vec![WILDCARD],
        }
    }
}

/// Uniform reader over both level encodings
#[derive(Debug, Clone)]
pub struct LevelReader {
    encoding: Encoding,
    buf: Bytes,
}

impl LevelReader {
    /// Inspect the mode header and position the reader after it
    pub fn new(data: impl Into<Bytes>) -> Result<Self> {
        let mut buf: Bytes = data.into();

        if !buf.has_remaining() {
            return Err(LevelError::InvalidFormat("Empty file".into()));
        }

        let encoding = match buf.get_u8() {
            0x00 => Encoding::Raw,
            b'0' => {
                // Mode marker, value is irrelevant
                if buf.has_remaining() {
                    buf.advance(1);
                }
                Encoding::Hex
            }
            other => {
                return Err(LevelError::InvalidFormat(format!(
                    "Unknown mode byte 0x{:02x}",
                    other
                )))
            }
        };

        Ok(Self { encoding, buf })
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Whether unread input remains
    pub fn has_remaining(&self) -> bool {
        self.buf.has_remaining()
    }

    /// Read `n` logical bytes
    pub fn read(&mut self, n: usize) -> Chunk {
        self.read_chunk(n).0
    }

    /// Discard the rest of the current unit.
    ///
    /// Raw streams return everything that is left. Hex streams skip to the
    /// end of the current line and return nothing.
    pub fn read_all_remaining(&mut self) -> Vec<u8> {
        match self.encoding {
            Encoding::Raw => {
                let len = self.buf.remaining();
                self.buf.copy_to_bytes(len).to_vec()
            }
            Encoding::Hex => {
                while self.buf.has_remaining() {
                    if self.buf.get_u8() == b'\n' {
                        break;
                    }
                }
                Vec::new()
            }
        }
    }

    /// Read an `n`-byte big-endian unsigned integer.
    ///
    /// A 2-byte field written entirely as wildcards yields `-1`.
    pub fn read_num(&mut self, n: usize) -> Result<i64> {
        let (chunk, truncated) = self.read_chunk(n);

        let data = match chunk {
            Chunk::Wildcard if n == 2 => return Ok(-1),
            Chunk::Wildcard => return Ok(WILDCARD as i64),
            Chunk::Bytes(data) => data,
        };

        if truncated {
            return Err(LevelError::UnexpectedEof { expected: n, found: data.len() });
        }

        data.iter().try_fold(0i64, |total, &b| {
            total
                .checked_mul(256)
                .and_then(|t| t.checked_add(b as i64))
                .ok_or(LevelError::NumericOverflow { width: n })
        })
    }

    /// Read `n` bytes, also reporting whether input ran out first
    pub(crate) fn read_chunk(&mut self, n: usize) -> (Chunk, bool) {
        match self.encoding {
            Encoding::Raw => {
                let len = n.min(self.buf.remaining());
                let data = self.buf.copy_to_bytes(len).to_vec();
                (Chunk::Bytes(data), len < n)
            }
            Encoding::Hex => self.read_hex(n),
        }
    }

    fn read_hex(&mut self, n: usize) -> (Chunk, bool) {
        let wanted = n * 2;
        let mut chars: Vec<u8> = Vec::with_capacity(wanted);

        while chars.len() < wanted {
            if !self.buf.has_remaining() {
                return (Chunk::Bytes(decode_hex(&chars)), true);
            }

            let c = self.buf.get_u8();
            if c == WILDCARD {
                // Wildcards only count while the field is all wildcards
                if chars.iter().all(|&x| x == WILDCARD) {
                    chars.push(c);
                }
            } else if c.is_ascii_hexdigit() {
                chars.push(c);
            }
        }

        if n > 0 && chars.iter().all(|&c| c == WILDCARD) {
            return (Chunk::Wildcard, false);
        }

        (Chunk::Bytes(decode_hex(&chars)), false)
    }
}

/// Decode hex digits, dropping wildcards and left-padding an odd digit count
fn decode_hex(chars: &[u8]) -> Vec<u8> {
    let mut digits: Vec<u8> = chars
        .iter()
        .filter(|&&c| c != WILDCARD)
        .filter_map(|&c| nibble(c))
        .collect();

    if digits.len() % 2 == 1 {
        digits.insert(0, 0);
    }

    digits
        .chunks_exact(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect()
}

fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}
