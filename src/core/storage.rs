//! File Storage untuk schedule bundle
//!
//! - `.hbin` / `.bin`: di-mmap langsung, decode tanpa copy ke buffer perantara
//! - `.json`: dibaca sebagai teks
//!
//! Format dipilih dari ekstensi file (case-insensitive).

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use memmap2::MmapOptions;
use tracing::{debug, info};

use super::schedule::ScheduleBundle;
use crate::error::{Error, Result};
use crate::protocol::format::{ALT_FILE_EXTENSION, FILE_EXTENSION, HEADER_SIZE};
use crate::protocol::{decode, encode, from_json, to_json, FormatError};

/// Format file persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Binary,
}

impl FileFormat {
    /// Deteksi format dari ekstensi
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some(crate::protocol::json::FILE_EXTENSION) => Ok(Self::Json),
            Some(FILE_EXTENSION) | Some(ALT_FILE_EXTENSION) => Ok(Self::Binary),
            _ => Err(Error::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => crate::protocol::json::FILE_EXTENSION,
            Self::Binary => FILE_EXTENSION,
        }
    }
}

/// Nama file default: `horario_2026-10-17.hbin` / `horario_escolar_2026-10-17.json`
pub fn default_file_name(format: FileFormat, timestamp: u64) -> String {
    let date = DateTime::<Utc>::from_timestamp_millis(timestamp as i64)
        .unwrap_or_default()
        .format("%Y-%m-%d");
    match format {
        FileFormat::Binary => format!("horario_{}.{}", date, format.extension()),
        FileFormat::Json => format!("horario_escolar_{}.{}", date, format.extension()),
    }
}

/// Load bundle dari file, format dari ekstensi
pub fn load<P: AsRef<Path>>(path: P) -> Result<ScheduleBundle> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;

    let bundle = match format {
        FileFormat::Binary => load_binary(path)?,
        FileFormat::Json => from_json(&fs::read_to_string(path)?)?,
    };

    info!(
        path = %path.display(),
        ?format,
        timestamp = bundle.timestamp,
        "schedule loaded"
    );
    Ok(bundle)
}

/// Simpan bundle ke file, format dari ekstensi.
///
/// Returns jumlah bytes yang ditulis.
pub fn save<P: AsRef<Path>>(path: P, bundle: &ScheduleBundle) -> Result<usize> {
    let path = path.as_ref();
    let format = FileFormat::from_path(path)?;

    let written = match format {
        FileFormat::Binary => {
            let bytes = encode(bundle);
            write_binary(path, &bytes)?;
            bytes.len()
        }
        FileFormat::Json => {
            let json = to_json(bundle)?;
            fs::write(path, json.as_bytes())?;
            json.len()
        }
    };

    info!(path = %path.display(), ?format, bytes = written, "schedule saved");
    Ok(written)
}

fn load_binary(path: &Path) -> Result<ScheduleBundle> {
    let file = File::open(path)?;
    let len = file.metadata()?.len() as usize;

    // mmap dengan panjang 0 tidak didukung semua platform
    if len == 0 {
        return Err(FormatError::TruncatedHeader {
            len: 0,
            need: HEADER_SIZE,
        }
        .into());
    }

    // SAFETY: file dibuka read-only dan mapping hanya hidup selama decode
    let mmap = unsafe { MmapOptions::new().len(len).map(&file)? };
    debug!(path = %path.display(), size = len, "binary file mapped");

    Ok(decode(&mmap)?)
}

fn write_binary(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;

    file.set_len(bytes.len() as u64)?;

    // SAFETY: File sudah dibuka dengan read/write permission dan ukuran sudah di-set
    let mut mmap = unsafe { MmapOptions::new().len(bytes.len()).map_mut(&file)? };
    mmap.copy_from_slice(bytes);
    mmap.flush()
}
