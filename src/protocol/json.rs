//! JSON Companion Format (`version: "1.0"`)
//!
//! Format teks yang dibaca manusia. Bentuk in-memory sama dengan `.hbin`:
//! keduanya decode ke `ScheduleBundle`.
//!
//! Schedule di JSON bersifat sparse:
//! `{ "monday": { "3": { "text", "colorClass", "dataSubject" } } }`

use std::collections::BTreeMap;

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::color::ColorClass;
use crate::core::schedule::{Day, Metadata, Period, Schedule, ScheduleBundle, SlotEntry};
use crate::error::{Error, Result};

/// Versi dokumen JSON
pub const JSON_VERSION: &str = "1.0";
pub const FILE_EXTENSION: &str = "json";

/// Placeholder untuk field metadata kosong di `humanReadable`
const UNSPECIFIED: &str = "Sin especificar";

/// day key → period key → entry
pub type ScheduleMap = BTreeMap<String, BTreeMap<String, Option<EntryDoc>>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataDoc>,
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_schedule: Option<ScheduleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporary_schedule: Option<ScheduleMap>,
    /// Non-authoritative, diabaikan saat load
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_readable: Option<HumanReadable>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDoc {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color_class: Option<String>,
    #[serde(default)]
    pub data_subject: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDoc {
    #[serde(default)]
    pub profesor: Option<String>,
    #[serde(default)]
    pub liceo: Option<String>,
    #[serde(default)]
    pub turno: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanReadable {
    pub save_date: String,
    pub profesor: String,
    pub liceo: String,
    pub turno: String,
    pub ciudad: String,
}

impl ScheduleDocument {
    pub fn from_bundle(bundle: &ScheduleBundle) -> Self {
        let metadata = &bundle.metadata;
        let or_unspecified = |s: &str| {
            if s.is_empty() {
                UNSPECIFIED.to_string()
            } else {
                s.to_string()
            }
        };

        Self {
            version: JSON_VERSION.to_string(),
            schedule: Some(schedule_to_map(&bundle.current)),
            metadata: Some(MetadataDoc {
                profesor: Some(metadata.teacher.clone()),
                liceo: Some(metadata.school.clone()),
                turno: Some(metadata.shift.clone()),
                ciudad: Some(metadata.city.clone()),
            }),
            timestamp: bundle.timestamp,
            original_schedule: Some(schedule_to_map(&bundle.original)),
            temporary_schedule: Some(schedule_to_map(&bundle.temporary)),
            human_readable: Some(HumanReadable {
                save_date: format_save_date(bundle.timestamp),
                profesor: or_unspecified(&metadata.teacher),
                liceo: or_unspecified(&metadata.school),
                turno: or_unspecified(&metadata.shift),
                ciudad: or_unspecified(&metadata.city),
            }),
        }
    }

    /// Konversi ke bundle. Dokumen tanpa `schedule` dan `metadata` ditolak.
    pub fn into_bundle(self) -> Result<ScheduleBundle> {
        if self.schedule.is_none() && self.metadata.is_none() {
            return Err(Error::InvalidDocument(
                "document has neither `schedule` nor `metadata`".to_string(),
            ));
        }
        if self.version != JSON_VERSION {
            warn!(version = %self.version, "unexpected JSON document version");
        }

        let metadata = self
            .metadata
            .map(|m| Metadata {
                teacher: m.profesor.unwrap_or_default(),
                school: m.liceo.unwrap_or_default(),
                shift: m.turno.unwrap_or_default(),
                city: m.ciudad.unwrap_or_default(),
            })
            .unwrap_or_default();

        Ok(ScheduleBundle {
            timestamp: self.timestamp,
            metadata,
            current: map_to_schedule(self.schedule.as_ref()),
            original: map_to_schedule(self.original_schedule.as_ref()),
            temporary: map_to_schedule(self.temporary_schedule.as_ref()),
        })
    }
}

fn schedule_to_map(schedule: &Schedule) -> ScheduleMap {
    let mut map = ScheduleMap::new();
    for day in Day::ALL {
        // Semua hari ada sebagai key, walaupun kosong
        let periods = map.entry(day.key().to_string()).or_default();
        for period in Period::all() {
            if let Some(entry) = schedule.get(day, period) {
                periods.insert(
                    period.to_string(),
                    Some(EntryDoc {
                        text: entry.text.clone(),
                        color_class: Some(entry.color.css_class()),
                        data_subject: Some(entry.subject_id.clone()),
                    }),
                );
            }
        }
    }
    map
}

fn map_to_schedule(map: Option<&ScheduleMap>) -> Schedule {
    let mut schedule = Schedule::new();
    let Some(map) = map else {
        return schedule;
    };

    for (day_key, periods) in map {
        let Some(day) = Day::from_key(day_key) else {
            warn!(day = %day_key, "skipping unknown day key");
            continue;
        };
        for (period_key, doc) in periods {
            let Some(period) = Period::from_key(period_key) else {
                warn!(%day, period = %period_key, "skipping out-of-range period key");
                continue;
            };
            // `null` = slot kosong
            let Some(doc) = doc else {
                continue;
            };
            let color = doc
                .color_class
                .as_deref()
                .map(ColorClass::from_css_class_lossy)
                .unwrap_or_default();
            schedule.set(
                day,
                period,
                SlotEntry {
                    text: doc.text.clone(),
                    color,
                    subject_id: doc.data_subject.clone().unwrap_or_default(),
                },
            );
        }
    }
    schedule
}

/// Tanggal simpan dalam waktu lokal (`17/10/2026, 14:05:09`)
pub fn format_save_date(timestamp: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp as i64)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%d/%m/%Y, %H:%M:%S")
                .to_string()
        })
        .unwrap_or_default()
}

/// Serialize bundle ke JSON (indent 2 spasi)
pub fn to_json(bundle: &ScheduleBundle) -> Result<String> {
    let json = serde_json::to_string_pretty(&ScheduleDocument::from_bundle(bundle))?;
    debug!(size = json.len(), "JSON serialization complete");
    Ok(json)
}

/// Parse dokumen JSON ke bundle
pub fn from_json(text: &str) -> Result<ScheduleBundle> {
    let document: ScheduleDocument = serde_json::from_str(text)?;
    document.into_bundle()
}
