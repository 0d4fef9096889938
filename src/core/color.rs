//! Color Table: 14 warna subject
//!
//! Index tabel ini adalah bagian dari wire format `.hbin`.
//! Urutan TIDAK boleh diubah, encoder dan decoder harus identik.

use std::fmt;

/// Warna visual untuk sebuah subject di grid jadwal
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorClass {
    #[default]
    Orange = 0,
    Red = 1,
    Green = 2,
    Purple = 3,
    Blue = 4,
    Yellow = 5,
    Cyan = 6,
    Pink = 7,
    Violet = 8,
    Teal = 9,
    Indigo = 10,
    Lime = 11,
    Coral = 12,
    Lavender = 13,
}

/// Prefix CSS class yang dipakai UI (`subject-pink`, dst)
pub const CSS_PREFIX: &str = "subject-";

/// Jumlah warna dalam wire table
pub const COLOR_COUNT: usize = 14;

impl ColorClass {
    /// Semua warna dalam urutan index
    pub const ALL: [ColorClass; COLOR_COUNT] = [
        Self::Orange,
        Self::Red,
        Self::Green,
        Self::Purple,
        Self::Blue,
        Self::Yellow,
        Self::Cyan,
        Self::Pink,
        Self::Violet,
        Self::Teal,
        Self::Indigo,
        Self::Lime,
        Self::Coral,
        Self::Lavender,
    ];

    #[inline(always)]
    pub fn index(self) -> u8 {
        self as u8
    }

    #[inline(always)]
    pub fn from_index(v: u8) -> Option<Self> {
        Self::ALL.get(v as usize).copied()
    }

    /// Index di luar 0..13 jatuh ke `Orange` (lossy, bukan error)
    #[inline(always)]
    pub fn from_index_lossy(v: u8) -> Self {
        Self::from_index(v).unwrap_or_default()
    }

    /// Nama pendek, tanpa prefix (`"pink"`)
    pub fn name(self) -> &'static str {
        match self {
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Cyan => "cyan",
            Self::Pink => "pink",
            Self::Violet => "violet",
            Self::Teal => "teal",
            Self::Indigo => "indigo",
            Self::Lime => "lime",
            Self::Coral => "coral",
            Self::Lavender => "lavender",
        }
    }

    /// CSS class lengkap (`"subject-pink"`)
    pub fn css_class(self) -> String {
        format!("{}{}", CSS_PREFIX, self.name())
    }

    /// Parse CSS class. Prefix `subject-` optional.
    pub fn from_css_class(class: &str) -> Option<Self> {
        let name = class.strip_prefix(CSS_PREFIX).unwrap_or(class);
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }

    /// Class yang tidak dikenal di-map ke `Orange` (index 0)
    pub fn from_css_class_lossy(class: &str) -> Self {
        Self::from_css_class(class).unwrap_or_default()
    }

    /// Label yang ditampilkan di color picker
    pub fn label(self) -> &'static str {
        match self {
            Self::Orange => "Naranja",
            Self::Red => "Rojo",
            Self::Green => "Verde Fluor",
            Self::Purple => "Morado",
            Self::Blue => "Azul",
            Self::Yellow => "Amarillo",
            Self::Cyan => "Cian",
            Self::Pink => "Rosa Fluor",
            Self::Violet => "Violeta",
            Self::Teal => "Teal",
            Self::Indigo => "Índigo",
            Self::Lime => "Lima",
            Self::Coral => "Coral",
            Self::Lavender => "Lavanda",
        }
    }

    /// Hex swatch untuk rendering
    pub fn hex(self) -> &'static str {
        match self {
            Self::Orange => "#fd7e14",
            Self::Red => "#dc3545",
            Self::Green => "#00b347",
            Self::Purple => "#6f42c1",
            Self::Blue => "#0d6efd",
            Self::Yellow => "#ffc107",
            Self::Cyan => "#20c997",
            Self::Pink => "#ff69b4",
            Self::Violet => "#9c27b0",
            Self::Teal => "#17a2b8",
            Self::Indigo => "#6610f2",
            Self::Lime => "#cddc39",
            Self::Coral => "#ff7043",
            Self::Lavender => "#9575cd",
        }
    }
}

impl fmt::Display for ColorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
