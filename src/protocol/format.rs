//! Binary Schedule Format (`.hbin`), semua field big-endian
//!
//! Layout:
//! ┌─────────────────────────────────────────────────────┐
//! │ Header (14 bytes, fixed)                            │
//! │   magic u32 "HORA" │ version u16 │ timestamp u64    │
//! ├─────────────────────────────────────────────────────┤
//! │ Metadata: 4 × [len u8][UTF-8 bytes]                 │
//! │   teacher, school, shift, city                      │
//! ├─────────────────────────────────────────────────────┤
//! │ Schedule block × 3 (current, original, temporary)   │
//! │   [body_len u16][slot × 45]                         │
//! │   slot = [0] | [1][color u8][text str][id str]      │
//! └─────────────────────────────────────────────────────┘

use crate::core::schedule::SLOTS;

/// Magic number "HORA"
pub const MAGIC: u32 = 0x484F5241;
/// Versi format yang didukung
pub const VERSION: u16 = 1;

pub const MAGIC_SIZE: usize = 4;
pub const VERSION_SIZE: usize = 2;
pub const TIMESTAMP_SIZE: usize = 8;
/// magic + version + timestamp
pub const HEADER_SIZE: usize = MAGIC_SIZE + VERSION_SIZE + TIMESTAMP_SIZE;

/// Panjang maksimum string setelah UTF-8 encoding
pub const MAX_STRING_LEN: usize = u8::MAX as usize;
/// Jumlah field metadata
pub const METADATA_FIELDS: usize = 4;
/// Jumlah schedule block dalam satu file
pub const SCHEDULE_BLOCKS: usize = 3;

pub const SLOT_EMPTY: u8 = 0;
pub const SLOT_OCCUPIED: u8 = 1;

/// Ekstensi file utama dan alternatif
pub const FILE_EXTENSION: &str = "hbin";
pub const ALT_FILE_EXTENSION: &str = "bin";

/// Ukuran worst-case satu string (length prefix + bytes)
pub const MAX_STRING_SIZE: usize = 1 + MAX_STRING_LEN;

/// Ukuran worst-case satu slot: flag + color + text + subject_id
pub const MAX_SLOT_SIZE: usize = 1 + 1 + 2 * MAX_STRING_SIZE;

/// Ukuran worst-case body satu schedule (semua slot terisi, string maksimum)
pub const MAX_BLOCK_BODY_SIZE: usize = SLOTS * MAX_SLOT_SIZE;

/// Ukuran worst-case seluruh file
pub const MAX_ENCODED_SIZE: usize = HEADER_SIZE
    + METADATA_FIELDS * MAX_STRING_SIZE
    + SCHEDULE_BLOCKS * (2 + MAX_BLOCK_BODY_SIZE);

// Body length disimpan sebagai u16
const _: () = assert!(MAX_BLOCK_BODY_SIZE <= u16::MAX as usize);

/// Header yang sudah divalidasi
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatHeader {
    pub magic: u32,
    pub version: u16,
    /// Milliseconds sejak epoch
    pub timestamp: u64,
}

impl FormatHeader {
    pub fn new(timestamp: u64) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            timestamp,
        }
    }

    /// Serialize ke 14 bytes big-endian
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&self.magic.to_be_bytes());
        out[4..6].copy_from_slice(&self.version.to_be_bytes());
        out[6..14].copy_from_slice(&self.timestamp.to_be_bytes());
        out
    }
}

/// Potong string ke maksimum `max` bytes tanpa memecah code point UTF-8
#[inline]
pub fn truncate_utf8(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
