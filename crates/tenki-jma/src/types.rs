use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One JMA region ("center") and the forecast offices beneath it.
///
/// Built transiently per directory resolution; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    /// Office name -> upstream area code. A name collision within one region
    /// keeps the later-processed entry (offices are processed in ascending
    /// area-code order, so this is deterministic).
    pub offices: BTreeMap<String, String>,
}

/// Two-level region -> office -> area-code directory.
///
/// Regions appear in the canonical display order (see
/// [`crate::directory::REGION_ORDER`]), so iteration is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hierarchy {
    pub regions: Vec<Region>,
}

impl Hierarchy {
    /// Look up a region by its full name.
    pub fn region(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    /// Resolve an office selection to its area code.
    pub fn area_code(&self, region: &str, office: &str) -> Option<&str> {
        self.region(region)?.offices.get(office).map(String::as_str)
    }
}

/// A single cached forecast day for one reporting office.
///
/// Uniqueness on `(area_code, date)` is enforced by the store; the first
/// successful write for a key wins permanently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub area_code: String,
    pub date: NaiveDate,
    /// Normalized weather description (see [`crate::text::normalize`]).
    pub weather: String,
    /// Absent when the upstream temperature series is shorter than the
    /// required index, or the value does not parse as an integer.
    pub temp_min: Option<i32>,
    pub temp_max: Option<i32>,
}
