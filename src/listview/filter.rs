use std::collections::BTreeMap;

use chrono::{Datelike, Local, NaiveDateTime};

use crate::model::{EntityKind, Record};

/// The active search/filter selections for one collection.
///
/// Equality filters map a field name to a selected code; setting a field to
/// `"all"` removes the constraint. The free-text search matches
/// case-insensitively against the kind's declared search fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterState {
    search: String,
    fields: BTreeMap<String, String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.trim().to_string();
    }

    pub fn set(&mut self, field: &str, value: &str) {
        if value.eq_ignore_ascii_case("all") {
            self.fields.remove(field);
        } else {
            self.fields.insert(field.to_string(), value.to_string());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_empty() && self.fields.is_empty()
    }

    pub fn active_fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Pure predicate: does `record` satisfy every active constraint?
    pub fn matches(&self, kind: EntityKind, record: &Record) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let hit = kind.search_fields().iter().any(|field| {
                record
                    .display_value(field)
                    .map(|v| v.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            });
            if !hit {
                return false;
            }
        }

        for (field, selected) in &self.fields {
            if field == "month" {
                if !matches_month(record, selected, Local::now().naive_local()) {
                    return false;
                }
                continue;
            }
            let actual = record.display_value(field);
            if actual.as_deref() != Some(selected.as_str()) {
                return false;
            }
        }

        true
    }
}

/// Filters `records` down to the ones matching `state`, preserving the
/// original relative order.
pub fn apply(kind: EntityKind, records: &[Record], state: &FilterState) -> Vec<Record> {
    records
        .iter()
        .filter(|r| state.matches(kind, r))
        .cloned()
        .collect()
}

/// The recognized month-window selections, `"all"` aside.
pub const MONTH_WINDOWS: &[&str] = &["current", "last3", "last6"];

/// Month-window filter for payments. Records without a parseable `date`
/// never match a window, and neither does an unrecognized window name:
/// a bad selection visibly matches nothing, like any other bogus filter.
pub fn matches_month(record: &Record, window: &str, now: NaiveDateTime) -> bool {
    let date = match record.str_field("date").and_then(parse_timestamp) {
        Some(d) => d,
        None => return false,
    };
    match window {
        "current" => date.year() == now.year() && date.month() == now.month(),
        "last3" => date >= months_back(now, 3),
        "last6" => date >= months_back(now, 6),
        _ => false,
    }
}

/// First day of the month `n` months before `now`.
fn months_back(now: NaiveDateTime, n: u32) -> NaiveDateTime {
    let total = now.year() * 12 + now.month0() as i32 - n as i32;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    chrono::NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .unwrap_or_else(|| now.date())
        .and_hms_opt(0, 0, 0)
        .unwrap_or(now)
}

/// Backend timestamps arrive either as RFC 3339 or as a bare
/// `yyyy-MM-ddTHH:mm:ss` local datetime.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}
