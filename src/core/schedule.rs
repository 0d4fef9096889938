//! Schedule Model: grid 5 hari × 9 periode
//!
//! Layout memori fixed-size, tidak ada key string:
//! ┌──────────┬────┬────┬─────┬────┐
//! │          │ P0 │ P1 │ ... │ P8 │
//! ├──────────┼────┼────┼─────┼────┤
//! │ Monday   │    │    │     │    │
//! │ ...      │    │    │     │    │
//! │ Friday   │    │    │     │    │
//! └──────────┴────┴────┴─────┴────┘
//!
//! Slot kosong adalah state eksplisit (`None`), bukan key yang hilang.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use super::color::ColorClass;

/// Jumlah hari per minggu dalam grid
pub const DAYS: usize = 5;
/// Jumlah periode per hari (0..=8)
pub const PERIODS: usize = 9;
/// Total slot per schedule
pub const SLOTS: usize = DAYS * PERIODS;

/// Prefix `subject_id` untuk subject buatan user
pub const CUSTOM_PREFIX: &str = "custom";

/// Hari dalam minggu sekolah. Urutan enum = urutan wire.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Day {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
}

impl Day {
    pub const ALL: [Day; DAYS] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Key yang dipakai dokumen JSON (`"monday"`)
    pub fn key(self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.key() == key)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Periode dalam sehari, dijamin berada di range 0..=8
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Period(u8);

impl Period {
    pub const LAST: Period = Period(PERIODS as u8 - 1);

    #[inline(always)]
    pub fn new(v: u8) -> Option<Self> {
        if (v as usize) < PERIODS {
            Some(Self(v))
        } else {
            None
        }
    }

    /// Semua periode, 0 sampai 8
    pub fn all() -> impl Iterator<Item = Period> {
        (0..PERIODS as u8).map(Period)
    }

    /// Parse key JSON (`"3"`)
    pub fn from_key(key: &str) -> Option<Self> {
        key.trim().parse::<u8>().ok().and_then(Self::new)
    }

    #[inline(always)]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Satu subject yang ditempatkan di slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SlotEntry {
    /// Label yang ditampilkan (`"9°1"`)
    pub text: String,
    pub color: ColorClass,
    /// Identifier opaque (`"9-1"`, atau `"custom-..."` untuk subject user)
    pub subject_id: String,
}

impl SlotEntry {
    pub fn new(text: impl Into<String>, color: ColorClass, subject_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color,
            subject_id: subject_id.into(),
        }
    }

    /// Subject buatan user? (konvensi caller, tidak divalidasi codec)
    pub fn is_custom(&self) -> bool {
        self.subject_id.starts_with(CUSTOM_PREFIX)
    }
}

/// Grid lengkap satu jadwal
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    slots: [[Option<SlotEntry>; PERIODS]; DAYS],
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn get(&self, day: Day, period: Period) -> Option<&SlotEntry> {
        self.slots[day.index()][period.index()].as_ref()
    }

    /// Tempatkan subject, mengembalikan subject lama jika ada
    #[inline(always)]
    pub fn set(&mut self, day: Day, period: Period, entry: SlotEntry) -> Option<SlotEntry> {
        self.slots[day.index()][period.index()].replace(entry)
    }

    #[inline(always)]
    pub fn take(&mut self, day: Day, period: Period) -> Option<SlotEntry> {
        self.slots[day.index()][period.index()].take()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Semua 45 slot dalam urutan wire (hari, lalu periode)
    pub fn iter(&self) -> impl Iterator<Item = (Day, Period, Option<&SlotEntry>)> + '_ {
        Day::ALL.into_iter().flat_map(move |day| {
            Period::all().map(move |period| (day, period, self.get(day, period)))
        })
    }

    /// Hanya slot yang terisi, urutan wire
    pub fn occupied(&self) -> impl Iterator<Item = (Day, Period, &SlotEntry)> + '_ {
        self.iter()
            .filter_map(|(day, period, entry)| entry.map(|e| (day, period, e)))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().flatten().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }
}

/// Field editable di header jadwal. String kosong = tidak diisi.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Metadata {
    pub teacher: String,
    pub school: String,
    pub shift: String,
    pub city: String,
}

impl Metadata {
    /// Field dalam urutan wire: teacher, school, shift, city
    pub fn fields(&self) -> [&str; 4] {
        [&self.teacher, &self.school, &self.shift, &self.city]
    }
}

/// Unit persistence lengkap: 3 jadwal + metadata + timestamp
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScheduleBundle {
    /// Milliseconds sejak epoch
    pub timestamp: u64,
    pub metadata: Metadata,
    pub current: Schedule,
    pub original: Schedule,
    pub temporary: Schedule,
}

impl ScheduleBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set timestamp ke wall clock saat ini (tidak pernah mundur)
    pub fn stamped(mut self) -> Self {
        self.timestamp = now_ms().max(self.timestamp.saturating_add(1));
        self
    }

    /// Tiga jadwal dalam urutan wire: current, original, temporary
    pub fn schedules(&self) -> [&Schedule; 3] {
        [&self.current, &self.original, &self.temporary]
    }
}

/// Timestamp saat ini dalam milliseconds
#[inline(always)]
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
