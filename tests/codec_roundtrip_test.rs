//! Codec Round-Trip Test - Randomized Bundles + Corruption Sweep
//!
//! Bundle dibangkitkan secara deterministik dari seed (LCG), jadi
//! kegagalan selalu bisa direproduksi.
//!
//! Usage:
//!   cargo test --release --test codec_roundtrip_test -- --nocapture

use horario::core::{ColorClass, Day, Metadata, Period, Schedule, ScheduleBundle, SlotEntry};
use horario::protocol::{decode, encode, FormatError, HEADER_SIZE, MAGIC, VERSION};
use proptest::prelude::*;

/// Generator pseudo-random sederhana
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }

    /// String acak ≤255 bytes UTF-8, campuran ASCII dan multi-byte
    fn text(&mut self) -> String {
        const POOL: [&str; 8] = ["a", "Z", "7", "°", "ñ", "€", "😀", " "];
        let mut s = String::new();
        let target = self.below(120) as usize;
        while s.chars().count() < target {
            let piece = POOL[self.below(POOL.len() as u64) as usize];
            if s.len() + piece.len() > 255 {
                break;
            }
            s.push_str(piece);
        }
        s
    }

    fn schedule(&mut self) -> Schedule {
        let mut schedule = Schedule::new();
        let density = self.below(101);
        for day in Day::ALL {
            for period in Period::all() {
                if self.below(100) < density {
                    let color = ColorClass::from_index(self.below(14) as u8).unwrap();
                    let entry = SlotEntry::new(self.text(), color, self.text());
                    schedule.set(day, period, entry);
                }
            }
        }
        schedule
    }

    fn bundle(&mut self) -> ScheduleBundle {
        ScheduleBundle {
            timestamp: self.next() << 20 | self.next(),
            metadata: Metadata {
                teacher: self.text(),
                school: self.text(),
                shift: self.text(),
                city: self.text(),
            },
            current: self.schedule(),
            original: self.schedule(),
            temporary: self.schedule(),
        }
    }
}

/// Bundle dari skenario konkret: satu subject di (Monday, 3)
fn scenario_bundle() -> ScheduleBundle {
    let mut bundle = ScheduleBundle::new().with_timestamp(1_700_000_000_000);
    bundle.metadata.teacher = "Ana".to_string();
    bundle.current.set(
        Day::Monday,
        Period::new(3).unwrap(),
        SlotEntry::new("9°1", ColorClass::from_css_class("subject-pink").unwrap(), "9-1"),
    );
    bundle
}

#[test]
fn test_random_bundles_roundtrip() {
    for seed in 0..200u64 {
        let bundle = Lcg(seed).bundle();
        let bytes = encode(&bundle);
        let decoded = decode(&bytes).unwrap_or_else(|e| panic!("seed {}: {}", seed, e));
        assert_eq!(decoded, bundle, "seed {}", seed);
    }
}

#[test]
fn test_scenario_exact_bytes() {
    let bytes = encode(&scenario_bundle());

    let mut expected = Vec::new();
    expected.extend_from_slice(b"HORA");
    expected.extend_from_slice(&[0x00, 0x01]);
    expected.extend_from_slice(&1_700_000_000_000u64.to_be_bytes());
    expected.extend_from_slice(&[3, b'A', b'n', b'a', 0, 0, 0]);

    // current: 3 kosong, slot terisi, 41 kosong
    let mut slot = vec![1u8, 7, 4];
    slot.extend_from_slice("9°1".as_bytes());
    slot.push(3);
    slot.extend_from_slice(b"9-1");
    let body_len = 44 + slot.len();
    expected.extend_from_slice(&(body_len as u16).to_be_bytes());
    expected.extend_from_slice(&[0, 0, 0]);
    expected.extend_from_slice(&slot);
    expected.extend_from_slice(&[0; 41]);

    // original + temporary: 45 byte nol
    for _ in 0..2 {
        expected.extend_from_slice(&45u16.to_be_bytes());
        expected.extend_from_slice(&[0; 45]);
    }

    assert_eq!(bytes, expected);
    assert_eq!(decode(&bytes).unwrap(), scenario_bundle());
}

#[test]
fn test_magic_and_version_gate() {
    let bytes = encode(&scenario_bundle());
    assert_eq!(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]), MAGIC);
    assert_eq!(u16::from_be_bytes([bytes[4], bytes[5]]), VERSION);

    for i in 0..4 {
        let mut corrupt = bytes.clone();
        corrupt[i] ^= 0xFF;
        match decode(&corrupt) {
            Err(FormatError::BadMagic { found }) => assert_ne!(found, MAGIC),
            other => panic!("byte {}: expected BadMagic, got {:?}", i, other),
        }
    }

    for version in [0u16, 2, 0x0100, u16::MAX] {
        let mut corrupt = bytes.clone();
        corrupt[4..6].copy_from_slice(&version.to_be_bytes());
        assert_eq!(
            decode(&corrupt),
            Err(FormatError::UnsupportedVersion {
                found: version,
                expected: 1
            })
        );
    }
}

#[test]
fn test_truncation_at_every_offset() {
    let mut rng = Lcg(42);
    let bundle = rng.bundle();
    let bytes = encode(&bundle);

    for cut in 0..bytes.len() {
        match decode(&bytes[..cut]) {
            Err(FormatError::TruncatedHeader { len, need }) => {
                assert!(cut < HEADER_SIZE);
                assert_eq!((len, need), (cut, HEADER_SIZE));
            }
            Err(FormatError::TruncatedBody { offset, need, have }) => {
                assert!(cut >= HEADER_SIZE);
                assert!(offset <= cut);
                assert!(have < need);
            }
            Err(other) => panic!("cut {}: unexpected error {:?}", cut, other),
            Ok(partial) => {
                // Hanya slot yang benar-benar terbaca yang boleh muncul
                for (full, part) in bundle.schedules().iter().zip(partial.schedules()) {
                    for (day, period, entry) in part.occupied() {
                        assert_eq!(full.get(day, period), Some(entry));
                    }
                }
            }
        }
    }
    assert_eq!(decode(&bytes).unwrap(), bundle);
}

#[test]
fn test_oversized_strings_do_not_shift_offsets() {
    let mut bundle = scenario_bundle();
    bundle.metadata.school = "ñ".repeat(300);
    bundle.temporary.set(
        Day::Wednesday,
        Period::new(4).unwrap(),
        SlotEntry::new("€".repeat(100), ColorClass::Teal, "x".repeat(256)),
    );

    let decoded = decode(&encode(&bundle)).unwrap();
    assert_eq!(decoded.metadata.school, "ñ".repeat(127));
    assert_eq!(decoded.metadata.teacher, "Ana");
    assert_eq!(decoded.current, bundle.current);

    let entry = decoded
        .temporary
        .get(Day::Wednesday, Period::new(4).unwrap())
        .unwrap();
    assert_eq!(entry.text, "€".repeat(85));
    assert_eq!(entry.subject_id, "x".repeat(255));
    assert_eq!(entry.color, ColorClass::Teal);
}

#[test]
fn test_encode_is_deterministic() {
    let bundle = Lcg(7).bundle();
    assert_eq!(encode(&bundle), encode(&bundle));
}

fn arb_entry() -> impl Strategy<Value = SlotEntry> {
    ("[a-zA-Z0-9 °ñáéíóú€]{0,80}", 0u8..14, "[a-z0-9-]{0,40}").prop_map(|(text, color, id)| {
        SlotEntry::new(text, ColorClass::from_index_lossy(color), id)
    })
}

fn arb_schedule() -> impl Strategy<Value = Schedule> {
    prop::collection::vec(prop::option::of(arb_entry()), 45).prop_map(|slots| {
        let mut schedule = Schedule::new();
        let cells = Day::ALL
            .into_iter()
            .flat_map(|d| Period::all().map(move |p| (d, p)));
        for ((day, period), slot) in cells.zip(slots) {
            if let Some(entry) = slot {
                schedule.set(day, period, entry);
            }
        }
        schedule
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_roundtrip(
        timestamp in any::<u64>(),
        meta in prop::array::uniform4(".{0,60}"),
        current in arb_schedule(),
        original in arb_schedule(),
        temporary in arb_schedule(),
    ) {
        let [teacher, school, shift, city] = meta;
        let bundle = ScheduleBundle {
            timestamp,
            metadata: Metadata { teacher, school, shift, city },
            current,
            original,
            temporary,
        };
        prop_assert_eq!(decode(&encode(&bundle)).unwrap(), bundle);
    }

    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = decode(&bytes);
    }

    #[test]
    fn prop_mutated_body_never_panics(
        seed in any::<u64>(),
        edits in prop::collection::vec((any::<usize>(), any::<u8>()), 1..16),
        keep in any::<prop::sample::Index>(),
    ) {
        // Header valid, body diacak: parser block dan slot yang diuji
        let mut bytes = encode(&Lcg(seed).bundle());
        let body_len = bytes.len() - HEADER_SIZE;
        for (pos, value) in edits {
            bytes[HEADER_SIZE + pos % body_len] = value;
        }
        let cut = HEADER_SIZE + keep.index(body_len + 1);

        match decode(&bytes[..cut]) {
            Ok(_) | Err(FormatError::TruncatedBody { .. }) => {}
            Err(other) => prop_assert!(false, "unexpected error after header: {:?}", other),
        }
    }

    #[test]
    fn prop_unknown_color_decodes_to_orange(index in 14u8..=255) {
        let mut bytes = encode(&scenario_bundle());
        // header + metadata(7) + block len(2) + 3 slot kosong + flag
        let offset = HEADER_SIZE + 7 + 2 + 3 + 1;
        bytes[offset] = index;

        let decoded = decode(&bytes).unwrap();
        let entry = decoded.current.get(Day::Monday, Period::new(3).unwrap()).unwrap();
        prop_assert_eq!(entry.color, ColorClass::Orange);
        prop_assert_eq!(&entry.text, "9°1");
        prop_assert!(decoded.original.is_empty());
    }
}
