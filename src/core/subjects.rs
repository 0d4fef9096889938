//! Subject Bank: subject bawaan + subject custom
//!
//! Subject bawaan punya id tetap (`"9-1"`). Subject custom memakai
//! id `custom-<slug>` supaya bisa dibedakan saat load.

use super::color::ColorClass;
use super::schedule::{SlotEntry, CUSTOM_PREFIX};

/// Definisi statis satu subject di bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSubject {
    pub text: &'static str,
    pub color: ColorClass,
    pub subject_id: &'static str,
}

impl BuiltinSubject {
    const fn new(text: &'static str, color: ColorClass, subject_id: &'static str) -> Self {
        Self {
            text,
            color,
            subject_id,
        }
    }

    pub fn to_entry(self) -> SlotEntry {
        SlotEntry::new(self.text, self.color, self.subject_id)
    }
}

/// Subject bank default, urutan sesuai tampilan
pub const BUILTIN_SUBJECTS: [BuiltinSubject; 12] = [
    BuiltinSubject::new("9°1", ColorClass::Pink, "9-1"),
    BuiltinSubject::new("9°2", ColorClass::Blue, "9-2"),
    BuiltinSubject::new("9°3", ColorClass::Orange, "9-3"),
    BuiltinSubject::new("9°4", ColorClass::Red, "9-4"),
    BuiltinSubject::new("8°1", ColorClass::Violet, "8-1"),
    BuiltinSubject::new("8°2", ColorClass::Purple, "8-2"),
    BuiltinSubject::new("8°3", ColorClass::Green, "8-3"),
    BuiltinSubject::new("7°1", ColorClass::Teal, "7-1"),
    BuiltinSubject::new("7°2", ColorClass::Indigo, "7-2"),
    BuiltinSubject::new("7°3", ColorClass::Lime, "7-3"),
    BuiltinSubject::new("7°4", ColorClass::Coral, "7-4"),
    BuiltinSubject::new("8°4", ColorClass::Lavender, "8-4"),
];

/// Warna default tombol "Personalizar"
pub const CUSTOM_COLOR: ColorClass = ColorClass::Cyan;

/// Cari subject bawaan berdasarkan id
pub fn builtin(subject_id: &str) -> Option<BuiltinSubject> {
    BUILTIN_SUBJECTS
        .iter()
        .copied()
        .find(|s| s.subject_id == subject_id)
}

/// Id untuk subject custom: `custom-` + slug lowercase.
///
/// Karakter di luar `[a-z0-9]` diganti `-`, satu per UTF-16 code unit
/// (emoji di luar BMP jadi `--`), sama dengan id yang dibuat UI browser.
/// Returns None untuk teks kosong.
pub fn custom_subject_id(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            slug.push(c);
        } else {
            slug.extend(std::iter::repeat('-').take(c.len_utf16()));
        }
    }

    Some(format!("{}-{}", CUSTOM_PREFIX, slug))
}

/// Buat entry custom dari teks user
pub fn custom_entry(text: &str, color: ColorClass) -> Option<SlotEntry> {
    let subject_id = custom_subject_id(text)?;
    Some(SlotEntry::new(text.trim(), color, subject_id))
}
