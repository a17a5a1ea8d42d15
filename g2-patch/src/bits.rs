//! Bit-level cursor over a byte buffer
//!
//! G2 sections are packed MSB-first with fields of arbitrary width that do not
//! respect byte boundaries. `BitStream` reads and writes such fields and also
//! handles the fixed-length string conventions used by the sections.

use std::io::SeekFrom;

use crate::error::{G2Error, Result};

/// Widest field a single read or write may cover
pub const MAX_BIT_WIDTH: u32 = 32;

/// Cursor over a byte buffer with a bit-granular position.
///
/// Reads are bounds-checked against the buffer. Writes grow the buffer with
/// zero bytes as needed, so seeking forward and writing leaves zeroed gaps.
#[derive(Debug, Clone, Default)]
pub struct BitStream {
    data: Vec<u8>,
    pos: usize,
}

impl BitStream {
    /// Empty stream for formatting a section
    pub fn new() -> Self {
        Self::default()
    }

    /// Stream over existing bytes, positioned at bit 0
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            pos: 0,
        }
    }

    /// Current bit position
    pub fn tell_bit(&self) -> usize {
        self.pos
    }

    /// Bits left between the cursor and the end of the buffer
    pub fn remaining_bits(&self) -> usize {
        (self.data.len() * 8).saturating_sub(self.pos)
    }

    /// Move the cursor. `SeekFrom::Current` accepts negative offsets, which is
    /// how trailing padding gets "unwritten" before a section is finalized.
    pub fn seek_bit(&mut self, from: SeekFrom) -> Result<usize> {
        let target = match from {
            SeekFrom::Start(n) => n as i64,
            SeekFrom::Current(delta) => self.pos as i64 + delta,
            SeekFrom::End(delta) => (self.data.len() * 8) as i64 + delta,
        };
        if target < 0 {
            return Err(G2Error::InvalidSeek(target));
        }
        self.pos = target as usize;
        Ok(self.pos)
    }

    /// Read an `nbits`-wide unsigned field
    pub fn read_bits(&mut self, nbits: u32) -> Result<u32> {
        check_width(nbits)?;
        let available = self.remaining_bits();
        if nbits as usize > available {
            return Err(G2Error::OutOfRange {
                position: self.pos,
                needed: nbits,
                available,
            });
        }

        let mut value = 0u32;
        let mut remaining = nbits;
        while remaining > 0 {
            let byte = self.data[self.pos / 8];
            let room = 8 - (self.pos % 8) as u32;
            let take = room.min(remaining);
            let bits = (byte >> (room - take)) as u32 & low_mask(take);
            value = (value << take) | bits;
            self.pos += take as usize;
            remaining -= take;
        }
        Ok(value)
    }

    /// Read an `nbits`-wide two's complement field
    pub fn read_signed(&mut self, nbits: u32) -> Result<i32> {
        let value = self.read_bits(nbits)?;
        if nbits == 0 || nbits == 32 {
            return Ok(value as i32);
        }
        if value & (1 << (nbits - 1)) != 0 {
            Ok(value as i32 - (1i32 << nbits))
        } else {
            Ok(value as i32)
        }
    }

    /// Write the low `nbits` of `value`. Higher bits of `value` are ignored.
    pub fn write_bits(&mut self, nbits: u32, value: u32) -> Result<()> {
        check_width(nbits)?;
        let mut remaining = nbits;
        while remaining > 0 {
            let index = self.pos / 8;
            if index >= self.data.len() {
                self.data.resize(index + 1, 0);
            }
            let room = 8 - (self.pos % 8) as u32;
            let take = room.min(remaining);
            let chunk = ((value >> (remaining - take)) & low_mask(take)) as u8;
            let shift = room - take;
            let mask = (low_mask(take) as u8) << shift;
            self.data[index] = (self.data[index] & !mask) | (chunk << shift);
            self.pos += take as usize;
            remaining -= take;
        }
        Ok(())
    }

    /// Write the low `nbits` of a signed value in two's complement
    pub fn write_signed(&mut self, nbits: u32, value: i32) -> Result<()> {
        self.write_bits(nbits, value as u32)
    }

    /// Read a run of fields of the given widths, in order
    pub fn read_fields<const N: usize>(&mut self, widths: [u32; N]) -> Result<[u32; N]> {
        let mut values = [0u32; N];
        for (value, width) in values.iter_mut().zip(widths) {
            *value = self.read_bits(width)?;
        }
        Ok(values)
    }

    /// Write a run of fields of the given widths, in order
    pub fn write_fields<const N: usize>(&mut self, widths: [u32; N], values: [u32; N]) -> Result<()> {
        for (width, value) in widths.into_iter().zip(values) {
            self.write_bits(width, value)?;
        }
        Ok(())
    }

    /// Read `n` whole bytes (the cursor need not be byte-aligned)
    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        (0..n).map(|_| self.read_bits(8).map(|b| b as u8)).collect()
    }

    /// Write raw bytes at the cursor
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &b in bytes {
            self.write_bits(8, b as u32)?;
        }
        Ok(())
    }

    /// Read a string field of at most `len` bytes that stops after its
    /// first NUL. Only the bytes up to and including the NUL are consumed.
    pub fn read_string(&mut self, len: usize) -> Result<String> {
        let mut bytes = Vec::with_capacity(len);
        for _ in 0..len {
            let b = self.read_bits(8)? as u8;
            if b == 0 {
                break;
            }
            bytes.push(b);
        }
        Ok(decode_latin1(&bytes))
    }

    /// Write a string field of at most `len` bytes: the text plus a NUL
    /// terminator when it fits, truncated to `len` otherwise.
    pub fn write_string(&mut self, s: &str, len: usize) -> Result<()> {
        let mut bytes = encode_latin1(s);
        if bytes.len() < len {
            bytes.push(0);
        }
        bytes.truncate(len);
        self.write_bytes(&bytes)
    }

    /// Read a fixed `len`-byte field and strip its NUL padding
    pub fn read_padded_string(&mut self, len: usize) -> Result<String> {
        let bytes = self.read_bytes(len)?;
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let end = bytes.iter().rposition(|&b| b != 0).map_or(start, |i| i + 1);
        Ok(decode_latin1(&bytes[start..end]))
    }

    /// Write a fixed `len`-byte field, NUL padded and truncated as needed
    pub fn write_padded_string(&mut self, s: &str, len: usize) -> Result<()> {
        let mut bytes = encode_latin1(s);
        bytes.resize(len, 0);
        self.write_bytes(&bytes)
    }

    /// Finish writing: the buffer up to the cursor, rounded up to whole bytes
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.data.resize(self.pos.div_ceil(8), 0);
        self.data
    }
}

fn check_width(nbits: u32) -> Result<()> {
    if nbits > MAX_BIT_WIDTH {
        return Err(G2Error::InvalidBitWidth(nbits));
    }
    Ok(())
}

fn low_mask(nbits: u32) -> u32 {
    if nbits >= 32 {
        u32::MAX
    } else {
        (1u32 << nbits) - 1
    }
}

/// Decode bytes one-to-one into chars (Latin-1)
pub(crate) fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode chars one-to-one into bytes; chars above U+00FF become '?'
pub(crate) fn encode_latin1(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
