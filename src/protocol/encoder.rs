//! Zero-Reallocation Encoder
//!
//! Buffer dialokasikan sekali dengan ukuran worst-case (`MAX_ENCODED_SIZE`),
//! jadi encode tidak pernah overflow dan tidak pernah gagal.
//! Setelah selesai, output di-trim ke bytes yang benar-benar ditulis.

use tracing::debug;

use super::format::{
    truncate_utf8, FormatHeader, MAX_ENCODED_SIZE, MAX_STRING_LEN, SLOT_EMPTY, SLOT_OCCUPIED,
};
use crate::core::schedule::{Metadata, Schedule, ScheduleBundle, SlotEntry};

/// Pre-allocated encoder buffer
///
/// Bisa di-reuse antar encode via `reset`. Satu encoder tidak boleh
/// di-share antar thread tanpa sinkronisasi (butuh `&mut self`).
pub struct Encoder {
    buffer: Box<[u8]>,
    write_pos: usize,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    /// Membuat encoder dengan kapasitas worst-case
    pub fn new() -> Self {
        Self {
            buffer: vec![0u8; MAX_ENCODED_SIZE].into_boxed_slice(),
            write_pos: 0,
        }
    }

    /// Reset encoder untuk reuse
    #[inline(always)]
    pub fn reset(&mut self) {
        self.write_pos = 0;
    }

    /// Encode bundle lengkap ke buffer internal
    ///
    /// Returns slice ke encoded data (sudah di-trim).
    pub fn encode(&mut self, bundle: &ScheduleBundle) -> &[u8] {
        self.reset();

        // 1. Header
        let header = FormatHeader::new(bundle.timestamp);
        self.put_bytes(&header.to_bytes());

        // 2. Metadata
        self.put_metadata(&bundle.metadata);

        // 3. Schedule blocks, urutan adalah kontrak
        for schedule in bundle.schedules() {
            self.put_schedule(schedule);
        }

        debug!(
            size = self.write_pos,
            timestamp = bundle.timestamp,
            "binary serialization complete"
        );

        self.as_bytes()
    }

    /// Get current buffer content
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer[..self.write_pos]
    }

    fn put_metadata(&mut self, metadata: &Metadata) {
        for field in metadata.fields() {
            self.put_string(field);
        }
    }

    /// Tulis satu schedule block: reserve 2 bytes, tulis body, lalu back-patch length
    fn put_schedule(&mut self, schedule: &Schedule) {
        let len_pos = self.write_pos;
        self.write_pos += 2;

        for (_, _, slot) in schedule.iter() {
            match slot {
                Some(entry) => self.put_entry(entry),
                None => self.put_u8(SLOT_EMPTY),
            }
        }

        // MAX_BLOCK_BODY_SIZE <= u16::MAX, dicek saat compile
        let body_len = (self.write_pos - len_pos - 2) as u16;
        self.buffer[len_pos..len_pos + 2].copy_from_slice(&body_len.to_be_bytes());
    }

    #[inline(always)]
    fn put_entry(&mut self, entry: &SlotEntry) {
        self.put_u8(SLOT_OCCUPIED);
        self.put_u8(entry.color.index());
        self.put_string(&entry.text);
        self.put_string(&entry.subject_id);
    }

    /// Length-prefixed string, dipotong ke 255 bytes di code point boundary
    #[inline(always)]
    fn put_string(&mut self, s: &str) {
        let truncated = truncate_utf8(s, MAX_STRING_LEN);
        if truncated.len() < s.len() {
            debug!(
                original = s.len(),
                truncated = truncated.len(),
                "string truncated to fit length prefix"
            );
        }
        self.put_u8(truncated.len() as u8);
        self.put_bytes(truncated.as_bytes());
    }

    #[inline(always)]
    fn put_u8(&mut self, v: u8) {
        self.buffer[self.write_pos] = v;
        self.write_pos += 1;
    }

    #[inline(always)]
    fn put_bytes(&mut self, bytes: &[u8]) {
        self.buffer[self.write_pos..self.write_pos + bytes.len()].copy_from_slice(bytes);
        self.write_pos += bytes.len();
    }
}

/// Encode bundle ke buffer baru (one-shot)
pub fn encode(bundle: &ScheduleBundle) -> Vec<u8> {
    Encoder::default().encode(bundle).to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::ColorClass;
    use crate::core::schedule::{Day, Period, SLOTS};
    use crate::protocol::format::HEADER_SIZE;

    fn empty_bundle() -> ScheduleBundle {
        ScheduleBundle::new().with_timestamp(1_700_000_000_000)
    }

    #[test]
    fn test_empty_bundle_layout() {
        let bytes = encode(&empty_bundle());

        // header + 4 string kosong + 3 × (2 + 45 flag)
        assert_eq!(bytes.len(), HEADER_SIZE + 4 + 3 * (2 + SLOTS));
        assert_eq!(&bytes[0..4], b"HORA");
        assert_eq!(&bytes[HEADER_SIZE..HEADER_SIZE + 4], &[0, 0, 0, 0]);

        let block = &bytes[HEADER_SIZE + 4..];
        assert_eq!(&block[0..2], &(SLOTS as u16).to_be_bytes());
        assert!(block[2..2 + SLOTS].iter().all(|&b| b == SLOT_EMPTY));
    }

    #[test]
    fn test_single_slot_bytes() {
        let mut bundle = empty_bundle();
        bundle.metadata.teacher = "Ana".to_string();
        bundle.current.set(
            Day::Monday,
            Period::new(3).unwrap(),
            SlotEntry::new("9°1", ColorClass::Pink, "9-1"),
        );

        let bytes = encode(&bundle);
        let meta = &bytes[HEADER_SIZE..HEADER_SIZE + 7];
        assert_eq!(meta, &[3, b'A', b'n', b'a', 0, 0, 0]);

        let block = &bytes[HEADER_SIZE + 7..];
        // body: 44 slot kosong + 1 + 1 + (1 + 4) + (1 + 3)
        let body_len = 44 + 2 + 5 + 4;
        assert_eq!(&block[0..2], &(body_len as u16).to_be_bytes());
        assert_eq!(&block[2..5], &[0, 0, 0]);

        let slot = &block[5..5 + 11];
        assert_eq!(slot[0], SLOT_OCCUPIED);
        assert_eq!(slot[1], 7);
        assert_eq!(slot[2], 4); // "9°1" = 4 bytes UTF-8
        assert_eq!(&slot[3..7], "9°1".as_bytes());
        assert_eq!(slot[7], 3);
        assert_eq!(&slot[8..11], b"9-1");
    }

    #[test]
    fn test_long_string_truncated() {
        let mut bundle = empty_bundle();
        bundle.metadata.school = "x".repeat(400);
        bundle.metadata.shift = "Matutino".to_string();

        let bytes = encode(&bundle);
        let school_pos = HEADER_SIZE + 1;
        assert_eq!(bytes[school_pos], 255);

        let shift_pos = school_pos + 1 + 255;
        assert_eq!(bytes[shift_pos], 8);
        assert_eq!(&bytes[shift_pos + 1..shift_pos + 9], b"Matutino");
    }

    #[test]
    fn test_worst_case_fits() {
        let long = "é".repeat(200);
        let mut bundle = empty_bundle();
        bundle.metadata = Metadata {
            teacher: long.clone(),
            school: long.clone(),
            shift: long.clone(),
            city: long.clone(),
        };
        for schedule in [&mut bundle.current, &mut bundle.original, &mut bundle.temporary] {
            for day in Day::ALL {
                for period in Period::all() {
                    let entry = SlotEntry::new(long.clone(), ColorClass::Lime, long.clone());
                    schedule.set(day, period, entry);
                }
            }
        }

        // 200 × "é" = 400 bytes → 254 bytes (127 code point utuh)
        let bytes = encode(&bundle);
        assert_eq!(bytes.len(), HEADER_SIZE + 4 * 255 + 3 * (2 + SLOTS * (2 + 2 * 255)));
        assert!(bytes.len() <= MAX_ENCODED_SIZE);
    }

    #[test]
    fn test_encoder_reuse() {
        let mut encoder = Encoder::new();

        let mut first = empty_bundle();
        first.metadata.city = "Montevideo".to_string();
        let first_len = encoder.encode(&first).len();

        let second = encoder.encode(&empty_bundle()).to_vec();
        assert!(second.len() < first_len);
        assert_eq!(second, encode(&empty_bundle()));
    }
}
