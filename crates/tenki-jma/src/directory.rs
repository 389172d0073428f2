//! Area directory resolution.
//!
//! The upstream taxonomy document (`common/const/area.json`) holds a map of
//! centers (regions) and a map of offices keyed by area code. Resolution
//! flattens those into the two-level [`Hierarchy`] consumed by the
//! presentation layer. Building is all-or-nothing: a partially parsed
//! hierarchy is never returned.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::types::{Hierarchy, Region};

/// Path of the taxonomy document under the upstream base URL.
pub(crate) const DIRECTORY_PATH: &str = "common/const/area.json";

/// Canonical display order for regions. Centers are matched against these
/// keywords by containment; unmatched centers (and their offices) are
/// dropped.
pub const REGION_ORDER: [&str; 10] = [
    "北海道", "東北", "関東甲信", "北陸", "東海", "近畿", "中国", "四国", "九州", "沖縄",
];

/// Raw taxonomy document. Missing `centers` or `offices` fails
/// deserialization, which resolution reports as a schema error.
#[derive(Debug, Deserialize)]
pub(crate) struct AreaDirectory {
    pub centers: BTreeMap<String, Center>,
    pub offices: BTreeMap<String, Office>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Center {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Office {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
}

/// Build the region -> office hierarchy from a raw taxonomy document.
///
/// Offices whose declared parent is not a known center are dropped silently;
/// regions with zero matching offices still appear with an empty map.
/// Offices are processed in ascending area-code order, so a name collision
/// within one region deterministically keeps the highest-coded entry.
pub(crate) fn build_hierarchy(directory: &AreaDirectory) -> Hierarchy {
    let mut regions: Vec<Region> = Vec::new();

    for keyword in REGION_ORDER {
        for center in directory.centers.values() {
            if center.name.contains(keyword) && !regions.iter().any(|r| r.name == center.name) {
                regions.push(Region {
                    name: center.name.clone(),
                    offices: BTreeMap::new(),
                });
            }
        }
    }

    for (code, office) in &directory.offices {
        let Some(parent) = office.parent.as_deref() else {
            continue;
        };
        let Some(center) = directory.centers.get(parent) else {
            continue;
        };
        if let Some(region) = regions.iter_mut().find(|r| r.name == center.name) {
            region.offices.insert(office.name.clone(), code.clone());
        }
    }

    Hierarchy { regions }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn fixture() -> AreaDirectory {
        serde_json::from_value(serde_json::json!({
            "centers": {
                "010300": { "name": "関東甲信地方" },
                "010600": { "name": "近畿地方" },
                "010500": { "name": "北陸地方" }
            },
            "offices": {
                "130000": { "name": "東京都", "parent": "010300" },
                "140000": { "name": "神奈川県", "parent": "010300" },
                "270000": { "name": "大阪府", "parent": "010600" },
                "999000": { "name": "未知県", "parent": "999999" }
            }
        }))
        .unwrap()
    }

    #[test]
    fn builds_two_level_hierarchy_and_drops_orphans() {
        let hierarchy = build_hierarchy(&fixture());

        let kanto = hierarchy.region("関東甲信地方").unwrap();
        assert_eq!(kanto.offices.len(), 2);
        assert_eq!(kanto.offices.get("東京都").map(String::as_str), Some("130000"));

        let kinki = hierarchy.region("近畿地方").unwrap();
        assert_eq!(kinki.offices.len(), 1);

        // The orphan's parent matches no center; it must be absent entirely.
        for region in &hierarchy.regions {
            assert!(!region.offices.contains_key("未知県"));
        }
    }

    #[test]
    fn empty_regions_still_appear() {
        let hierarchy = build_hierarchy(&fixture());
        let hokuriku = hierarchy.region("北陸地方").unwrap();
        assert!(hokuriku.offices.is_empty());
    }

    #[test]
    fn regions_follow_canonical_order() {
        let hierarchy = build_hierarchy(&fixture());
        let names: Vec<&str> = hierarchy.regions.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["関東甲信地方", "北陸地方", "近畿地方"]);
    }

    #[test]
    fn unmatched_centers_are_dropped_with_their_offices() {
        let directory: AreaDirectory = serde_json::from_value(serde_json::json!({
            "centers": {
                "019999": { "name": "架空地方" }
            },
            "offices": {
                "900000": { "name": "架空県", "parent": "019999" }
            }
        }))
        .unwrap();

        let hierarchy = build_hierarchy(&directory);
        assert!(hierarchy.regions.is_empty());
    }

    #[test]
    fn office_name_collision_keeps_highest_area_code() {
        let directory: AreaDirectory = serde_json::from_value(serde_json::json!({
            "centers": {
                "010300": { "name": "関東甲信地方" }
            },
            "offices": {
                "130000": { "name": "東京都", "parent": "010300" },
                "130100": { "name": "東京都", "parent": "010300" }
            }
        }))
        .unwrap();

        let hierarchy = build_hierarchy(&directory);
        let kanto = hierarchy.region("関東甲信地方").unwrap();
        assert_eq!(kanto.offices.len(), 1);
        assert_eq!(kanto.offices.get("東京都").map(String::as_str), Some("130100"));
    }

    #[test]
    fn missing_collections_fail_deserialization() {
        let result: Result<AreaDirectory, _> =
            serde_json::from_value(serde_json::json!({ "centers": {} }));
        assert!(result.is_err());
    }
}
