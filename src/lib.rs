//! Horario - Weekly School Schedule Codec
//!
//! Arsitektur:
//! - Core: grid jadwal fixed-size 5 × 9, subject bank, file storage
//! - Protocol: format binary `.hbin` (big-endian, versioned) + JSON companion
//!
//! ```
//! use horario::core::{ColorClass, Day, Period, ScheduleBundle, SlotEntry};
//! use horario::protocol::{decode, encode};
//!
//! let mut bundle = ScheduleBundle::new().with_timestamp(1_700_000_000_000);
//! bundle.current.set(
//!     Day::Monday,
//!     Period::new(3).unwrap(),
//!     SlotEntry::new("9°1", ColorClass::Pink, "9-1"),
//! );
//!
//! let bytes = encode(&bundle);
//! assert_eq!(&bytes[..4], b"HORA");
//! assert_eq!(decode(&bytes).unwrap(), bundle);
//! ```

pub mod core;
pub mod error;
pub mod protocol;

pub use error::{Error, Result};
