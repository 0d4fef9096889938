//! Bounds-Checked Decoder
//!
//! Satu pass sinkron di atas buffer yang sudah ada di memori.
//! Header invalid → gagal langsung. Korupsi di level slot (color index
//! tidak dikenal, block berakhir lebih awal) → recovery lokal, tanpa error.

use tracing::{debug, warn};

use super::error::FormatError;
use super::format::{FormatHeader, HEADER_SIZE, MAGIC, SLOT_EMPTY, VERSION};
use crate::core::color::ColorClass;
use crate::core::schedule::{Day, Metadata, Period, Schedule, ScheduleBundle, SlotEntry};

/// Zero-copy cursor di atas encoded buffer
pub struct Decoder<'a> {
    buffer: &'a [u8],
    read_pos: usize,
}

impl<'a> Decoder<'a> {
    /// Membuat decoder dari buffer
    #[inline(always)]
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            read_pos: 0,
        }
    }

    /// Decode bundle lengkap: header, metadata, lalu 3 schedule block
    pub fn decode(&mut self) -> Result<ScheduleBundle, FormatError> {
        let header = self.read_header()?;
        let metadata = self.read_metadata()?;

        let current = self.read_schedule()?;
        let original = self.read_schedule()?;
        let temporary = self.read_schedule()?;

        debug!(
            processed = self.read_pos,
            total = self.buffer.len(),
            "binary deserialization complete"
        );

        Ok(ScheduleBundle {
            timestamp: header.timestamp,
            metadata,
            current,
            original,
            temporary,
        })
    }

    /// Baca dan validasi header. Magic dan version dicek sebelum timestamp.
    pub fn read_header(&mut self) -> Result<FormatHeader, FormatError> {
        if self.remaining() < HEADER_SIZE {
            return Err(FormatError::TruncatedHeader {
                len: self.remaining(),
                need: HEADER_SIZE,
            });
        }

        let magic = u32::from_be_bytes(self.read_array()?);
        if magic != MAGIC {
            return Err(FormatError::BadMagic { found: magic });
        }

        let version = u16::from_be_bytes(self.read_array()?);
        if version != VERSION {
            return Err(FormatError::unsupported_version(version));
        }

        let timestamp = u64::from_be_bytes(self.read_array()?);

        Ok(FormatHeader {
            magic,
            version,
            timestamp,
        })
    }

    /// Empat string metadata: teacher, school, shift, city
    pub fn read_metadata(&mut self) -> Result<Metadata, FormatError> {
        Ok(Metadata {
            teacher: self.read_string()?,
            school: self.read_string()?,
            shift: self.read_string()?,
            city: self.read_string()?,
        })
    }

    /// Baca satu schedule block.
    ///
    /// Cursor selalu pindah ke akhir block yang dideklarasikan, walaupun
    /// body lebih panjang dari yang dibaca. Slot setelah akhir block = kosong.
    pub fn read_schedule(&mut self) -> Result<Schedule, FormatError> {
        let body_len = u16::from_be_bytes(self.read_array()?) as usize;
        let start = self.read_pos;
        self.ensure(body_len)?;
        let end = start + body_len;

        // Sub-decoder dibatasi ke akhir block, offset tetap absolut
        let mut block = Decoder {
            buffer: &self.buffer[..end],
            read_pos: start,
        };
        let mut schedule = Schedule::new();

        'days: for day in Day::ALL {
            for period in Period::all() {
                if block.read_pos >= end {
                    warn!(
                        offset = end,
                        %day,
                        %period,
                        "schedule block ended early, remaining slots left empty"
                    );
                    break 'days;
                }

                if let Some(entry) = block.read_slot()? {
                    schedule.set(day, period, entry);
                }
            }
        }

        self.read_pos = end;
        Ok(schedule)
    }

    /// Satu slot: flag, lalu color + text + subject_id jika terisi
    fn read_slot(&mut self) -> Result<Option<SlotEntry>, FormatError> {
        if self.read_u8()? == SLOT_EMPTY {
            return Ok(None);
        }

        let color_offset = self.read_pos;
        let color_index = self.read_u8()?;
        let color = ColorClass::from_index(color_index).unwrap_or_else(|| {
            warn!(
                offset = color_offset,
                index = color_index,
                "unknown color index, falling back to orange"
            );
            ColorClass::default()
        });

        let text = self.read_string()?;
        let subject_id = self.read_string()?;

        Ok(Some(SlotEntry {
            text,
            color,
            subject_id,
        }))
    }

    /// Length-prefixed string. Bytes UTF-8 invalid diganti U+FFFD.
    pub fn read_string(&mut self) -> Result<String, FormatError> {
        let len = self.read_u8()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    #[inline(always)]
    fn read_u8(&mut self) -> Result<u8, FormatError> {
        self.ensure(1)?;
        let v = self.buffer[self.read_pos];
        self.read_pos += 1;
        Ok(v)
    }

    #[inline(always)]
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    #[inline(always)]
    fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], FormatError> {
        self.ensure(n)?;
        let slice = &self.buffer[self.read_pos..self.read_pos + n];
        self.read_pos += n;
        Ok(slice)
    }

    #[inline(always)]
    fn ensure(&self, n: usize) -> Result<(), FormatError> {
        if n > self.remaining() {
            return Err(FormatError::TruncatedBody {
                offset: self.read_pos,
                need: n,
                have: self.remaining(),
            });
        }
        Ok(())
    }

    /// Posisi cursor saat ini
    #[inline(always)]
    pub fn position(&self) -> usize {
        self.read_pos
    }

    /// Remaining bytes
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.read_pos)
    }
}

/// Decode buffer ke bundle (one-shot)
pub fn decode(buffer: &[u8]) -> Result<ScheduleBundle, FormatError> {
    Decoder::new(buffer).decode()
}
