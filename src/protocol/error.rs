use thiserror::Error;

use super::format::{MAGIC, VERSION};

/// Error decode `.hbin`. Semua terminal untuk percobaan decode saat ini.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("truncated header: need {need} bytes, buffer has {len}")]
    TruncatedHeader { len: usize, need: usize },

    #[error("bad magic number: expected {expected:#010x}, found {found:#010x}", expected = MAGIC)]
    BadMagic { found: u32 },

    #[error("unsupported version: found {found}, expected {expected}")]
    UnsupportedVersion { found: u16, expected: u16 },

    #[error("truncated body at offset {offset:#x} (need {need} bytes, have {have})")]
    TruncatedBody {
        offset: usize,
        need: usize,
        have: usize,
    },
}

impl FormatError {
    pub(crate) fn unsupported_version(found: u16) -> Self {
        Self::UnsupportedVersion {
            found,
            expected: VERSION,
        }
    }
}
