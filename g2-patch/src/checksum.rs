//! CRC-16 checksum used to sign G2 files
//!
//! MSB-first CRC with polynomial 0x1021 and a zero initial value (the
//! XMODEM variant), driven by a 256-entry table built at compile time.

/// Generator polynomial
const POLY: u16 = 0x1021;

static TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Feed one byte into a running checksum
#[inline]
pub fn checksum_update(crc: u16, byte: u8) -> u16 {
    (crc << 8) ^ TABLE[((crc >> 8) as u8 ^ byte) as usize]
}

/// Checksum of a byte range
pub fn checksum(data: &[u8]) -> u16 {
    data.iter().fold(0, |crc, &b| checksum_update(crc, b))
}
