use crate::dataset::Dataset;
use crate::models::{Continent, Country, CountryEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Figures shown in the statistics panel for one selected continent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContinentSummary {
    pub code: String,
    pub name: String,
    pub area_sq_km: u64,
    pub population: u64,
    /// Count stated in the continent table.
    pub declared_countries: u32,
    /// Rows actually listed for the selection.
    pub listed_countries: usize,
    /// Inhabitants per km², `None` for a zero area.
    pub density: Option<f64>,
    pub enriched: usize,
}

impl ContinentSummary {
    pub fn new(continent: &Continent, entries: &[CountryEntry]) -> Self {
        let density = if continent.area_sq_km > 0 {
            Some(continent.population as f64 / continent.area_sq_km as f64)
        } else {
            None
        };
        Self {
            code: continent.code.clone(),
            name: continent.name.clone(),
            area_sq_km: continent.area_sq_km,
            population: continent.population,
            declared_countries: continent.countries,
            listed_countries: entries.len(),
            density,
            enriched: entries
                .iter()
                .filter(|e| matches!(e, CountryEntry::Enriched(_)))
                .count(),
        }
    }

    pub fn count_matches(&self) -> bool {
        self.declared_countries as usize == self.listed_countries
    }
}

/// Declared vs. listed country count for one continent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountMismatch {
    pub code: String,
    pub declared: u32,
    pub listed: usize,
}

/// Data hygiene findings. None of these stop the application; they explain
/// why a country never shows up or why a count looks off.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DatasetReport {
    /// Country rows whose continent code has no continent row.
    pub orphans: Vec<Country>,
    pub mismatches: Vec<CountMismatch>,
}

impl DatasetReport {
    pub fn is_clean(&self) -> bool {
        self.orphans.is_empty() && self.mismatches.is_empty()
    }
}

pub fn dataset_report(dataset: &Dataset) -> DatasetReport {
    let mut listed: BTreeMap<&str, usize> = BTreeMap::new();
    let mut orphans = Vec::new();
    for c in dataset.countries() {
        if dataset.continent(&c.continent).is_some() {
            *listed.entry(c.continent.as_str()).or_default() += 1;
        } else {
            orphans.push(c.clone());
        }
    }

    let mismatches = dataset
        .continents()
        .iter()
        .filter_map(|c| {
            let n = listed.get(c.code.as_str()).copied().unwrap_or(0);
            (n != c.countries as usize).then(|| CountMismatch {
                code: c.code.clone(),
                declared: c.countries,
                listed: n,
            })
        })
        .collect();

    DatasetReport { orphans, mismatches }
}
