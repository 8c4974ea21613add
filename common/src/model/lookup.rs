//! The static region → district → community → settlements index.
//!
//! The index is loaded once (the backend reads it from disk, the frontend fetches
//! it from `/api/lookup`) and is never mutated afterwards. All option lists used
//! by the contribution form are derived from it through the query methods below.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::settlement::Settlement;

pub type Communities = BTreeMap<String, Vec<Settlement>>;
pub type Districts = BTreeMap<String, Communities>;

/// Read-only nested mapping of the current administrative hierarchy.
///
/// Keys are kept in ordered maps so that every derived option list is sorted
/// and stable between renders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupIndex {
    regions: BTreeMap<String, Districts>,
}

impl LookupIndex {
    pub fn new(regions: BTreeMap<String, Districts>) -> Self {
        Self { regions }
    }

    /// Parses the JSON shape served as `region_structure.json`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn regions(&self) -> Vec<String> {
        self.regions.keys().cloned().collect()
    }

    /// Districts of `region`, or empty when the region is blank or unknown.
    pub fn districts_for(&self, region: &str) -> Vec<String> {
        self.regions
            .get(region)
            .map(|districts| districts.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn communities_for(&self, region: &str, district: &str) -> Vec<String> {
        self.regions
            .get(region)
            .and_then(|districts| districts.get(district))
            .map(|communities| communities.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// The settlement list configured at the given path, or an empty slice.
    pub fn settlements_for(&self, region: &str, district: &str, community: &str) -> &[Settlement] {
        self.regions
            .get(region)
            .and_then(|districts| districts.get(district))
            .and_then(|communities| communities.get(community))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Distinct settlement types in first-seen order.
pub fn settlement_types(settlements: &[Settlement]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for settlement in settlements {
        if !types.contains(&settlement.settlement_type) {
            types.push(settlement.settlement_type.clone());
        }
    }
    types
}

/// Settlements of one type, original order preserved.
pub fn settlements_of_type<'a>(
    settlements: &'a [Settlement],
    settlement_type: &str,
) -> Vec<&'a Settlement> {
    settlements
        .iter()
        .filter(|s| s.settlement_type == settlement_type)
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = r#"{
        "Київська": {
            "Бучанський": {
                "Бучанська": [
                    {"name": "Буча", "code": "UA32080030010", "type": "місто", "lat": 50.5436, "lon": 30.2128},
                    {"name": "Блиставиця", "code": "UA32080030020", "type": "село", "lat": 50.5541, "lon": 30.1214},
                    {"name": "Луб'янка", "code": "UA32080030030", "type": "село", "lat": null, "lon": null},
                    {"name": "Ворзель", "code": "UA32080030040", "type": "селище", "lat": 50.5469, "lon": 30.1481}
                ],
                "Ірпінська": [
                    {"name": "Ірпінь", "code": "UA32080050010", "type": "місто", "lat": 50.5218, "lon": 30.2506}
                ]
            },
            "Обухівський": {
                "Обухівська": [
                    {"name": "Обухів", "code": "UA32120090010", "type": "місто", "lat": 50.1072, "lon": 30.6181}
                ]
            }
        },
        "Львівська": {
            "Львівський": {
                "Львівська": [
                    {"name": "Львів", "code": "UA46060250010", "type": "місто", "lat": 49.8397, "lon": 24.0297}
                ]
            }
        }
    }"#;

    pub(crate) fn sample_index() -> LookupIndex {
        LookupIndex::from_json(SAMPLE).unwrap()
    }

    #[test]
    fn unknown_or_blank_region_has_no_districts() {
        let index = sample_index();
        assert!(index.districts_for("Атлантида").is_empty());
        assert!(index.districts_for("").is_empty());
        assert!(index.communities_for("Київська", "Невідомий").is_empty());
        assert!(index.settlements_for("Київська", "Бучанський", "Невідома").is_empty());
    }

    #[test]
    fn option_lists_follow_the_index() {
        let index = sample_index();
        assert_eq!(index.regions(), vec!["Київська", "Львівська"]);
        assert_eq!(index.districts_for("Київська"), vec!["Бучанський", "Обухівський"]);
        assert_eq!(
            index.communities_for("Київська", "Бучанський"),
            vec!["Ірпінська", "Бучанська"]
        );
        let settlements = index.settlements_for("Київська", "Бучанський", "Бучанська");
        assert_eq!(settlements.len(), 4);
        assert_eq!(settlements[0].name, "Буча");
        assert_eq!(settlements[2].lat, None);
    }

    #[test]
    fn types_partition_the_settlement_list() {
        let index = sample_index();
        let settlements = index.settlements_for("Київська", "Бучанський", "Бучанська");
        let types = settlement_types(settlements);
        assert_eq!(types, vec!["місто", "село", "селище"]);

        let mut seen: Vec<&str> = Vec::new();
        for t in &types {
            for s in settlements_of_type(settlements, t) {
                assert_eq!(&s.settlement_type, t);
                assert!(!seen.contains(&s.code.as_str()));
                seen.push(&s.code);
            }
        }
        assert_eq!(seen.len(), settlements.len());
    }

    #[test]
    fn filtering_preserves_order() {
        let index = sample_index();
        let settlements = index.settlements_for("Київська", "Бучанський", "Бучанська");
        let villages: Vec<&str> = settlements_of_type(settlements, "село")
            .into_iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(villages, vec!["Блиставиця", "Луб'янка"]);
    }
}
