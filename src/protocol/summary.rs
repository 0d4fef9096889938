//! Analisis file binary dan perbandingan ukuran JSON vs `.hbin`

use std::fmt;

use super::decoder::Decoder;
use super::encoder::encode;
use super::error::FormatError;
use super::format::HEADER_SIZE;
use super::json::to_json;
use crate::core::schedule::ScheduleBundle;
use crate::error::Result;

/// Ringkasan teknis satu file `.hbin`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub total_size: usize,
    pub magic: u32,
    pub version: u16,
    pub timestamp: u64,
    pub header_size: usize,
    /// Offset awal schedule block pertama
    pub schedules_offset: usize,
    /// Slot terisi: current, original, temporary
    pub occupied: [usize; 3],
}

/// Decode penuh dan kumpulkan statistik
pub fn inspect(buffer: &[u8]) -> std::result::Result<FileSummary, FormatError> {
    let mut decoder = Decoder::new(buffer);
    let header = decoder.read_header()?;
    decoder.read_metadata()?;
    let schedules_offset = decoder.position();

    let mut occupied = [0usize; 3];
    for count in occupied.iter_mut() {
        *count = decoder.read_schedule()?.occupied_count();
    }

    Ok(FileSummary {
        total_size: buffer.len(),
        magic: header.magic,
        version: header.version,
        timestamp: header.timestamp,
        header_size: HEADER_SIZE,
        schedules_offset,
        occupied,
    })
}

impl fmt::Display for FileSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total size:   {} bytes", self.total_size)?;
        writeln!(f, "Magic number: 0x{:08X}", self.magic)?;
        writeln!(f, "Version:      {}", self.version)?;
        writeln!(
            f,
            "Timestamp:    {} ({})",
            self.timestamp,
            super::json::format_save_date(self.timestamp)
        )?;
        writeln!(f, "Header:       {} bytes", self.header_size)?;
        writeln!(f, "Metadata at:  byte {}", self.header_size)?;
        writeln!(f, "Schedules at: byte {}", self.schedules_offset)?;
        write!(
            f,
            "Occupied:     current={} original={} temporary={}",
            self.occupied[0], self.occupied[1], self.occupied[2]
        )
    }
}

/// Perbandingan ukuran dua format untuk bundle yang sama
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeComparison {
    pub json_bytes: usize,
    pub binary_bytes: usize,
}

impl SizeComparison {
    /// Bytes yang dihemat binary (negatif jika binary lebih besar)
    pub fn difference(&self) -> i64 {
        self.json_bytes as i64 - self.binary_bytes as i64
    }

    /// Persentase penghematan relatif ke JSON
    pub fn savings_percent(&self) -> f64 {
        if self.json_bytes == 0 {
            return 0.0;
        }
        self.difference() as f64 / self.json_bytes as f64 * 100.0
    }

    /// Berapa kali lebih kecil binary dibanding JSON
    pub fn size_factor(&self) -> f64 {
        if self.binary_bytes == 0 {
            return 0.0;
        }
        self.json_bytes as f64 / self.binary_bytes as f64
    }
}

impl fmt::Display for SizeComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "JSON: {}b | Binary: {}b | Saved: {}b ({:.1}%) | {:.1}x smaller",
            self.json_bytes,
            self.binary_bytes,
            self.difference(),
            self.savings_percent(),
            self.size_factor()
        )
    }
}

/// Encode bundle ke kedua format dan bandingkan ukurannya
pub fn compare_formats(bundle: &ScheduleBundle) -> Result<SizeComparison> {
    Ok(SizeComparison {
        json_bytes: to_json(bundle)?.len(),
        binary_bytes: encode(bundle).len(),
    })
}
