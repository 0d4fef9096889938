//! Core module: model jadwal dan persistence ke file
//!
//! Prinsip desain:
//! - Fixed-size grid: 5 hari × 9 periode, tanpa key string
//! - Snapshot: bundle dibuat ulang setiap save/load, tidak ada state global

pub(crate) mod color;
pub(crate) mod schedule;
pub mod storage;
pub mod subjects;

pub use color::{ColorClass, COLOR_COUNT};
pub use schedule::{
    now_ms, Day, Metadata, Period, Schedule, ScheduleBundle, SlotEntry, CUSTOM_PREFIX, DAYS,
    PERIODS, SLOTS,
};
pub use storage::FileFormat;
