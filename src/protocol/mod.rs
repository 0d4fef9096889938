//! Protocol Layer: Binary Schedule Encoding
//!
//! Prinsip desain:
//! - Fixed header: magic + version divalidasi sebelum field lain
//! - Length-prefixed: string dan schedule block membawa panjangnya sendiri
//! - Stateless: setiap encode/decode adalah snapshot/restore penuh

mod decoder;
mod encoder;
mod error;
pub mod format;
pub mod json;
mod summary;

pub use decoder::{decode, Decoder};
pub use encoder::{encode, Encoder};
pub use error::FormatError;
pub use format::{FormatHeader, HEADER_SIZE, MAGIC, VERSION};
pub use json::{from_json, to_json, ScheduleDocument};
pub use summary::{compare_formats, inspect, FileSummary, SizeComparison};
