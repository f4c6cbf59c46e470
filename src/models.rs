use serde::{Deserialize, Serialize};

/// Image used when the upstream record carries no flag.
pub const PLACEHOLDER_FLAG: &str = "https://via.placeholder.com/320x213?text=No+flag";

/// Capital shown when the upstream record lists none.
pub const UNKNOWN_CAPITAL: &str = "N/A";

/// One row of the continent table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Continent {
    pub code: String,
    pub name: String,
    pub area_sq_km: u64,
    pub population: u64,
    /// Declared number of countries. Informational, never checked against the country table.
    pub countries: u32,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub oceans: Vec<String>,
}

/// One row of the country table. `continent` refers to a `Continent::code`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub continent: String,
}

/// Flag image URLs as published by REST Countries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlagImages {
    pub svg: Option<String>,
    pub png: Option<String>,
    pub alt: Option<String>,
}

/// The part of a REST Countries `/alpha/{code}` record this crate consumes.
/// Every other field of the payload is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CountryRecord {
    #[serde(default)]
    pub capital: Vec<String>,
    #[serde(default)]
    pub flags: Option<FlagImages>,
}

impl CountryRecord {
    /// SVG first, PNG next, the placeholder last.
    pub fn flag_url(&self) -> String {
        self.flags
            .as_ref()
            .and_then(|f| non_blank(&f.svg).or_else(|| non_blank(&f.png)))
            .unwrap_or(PLACEHOLDER_FLAG)
            .to_string()
    }

    pub fn first_capital(&self) -> String {
        self.capital
            .first()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .unwrap_or(UNKNOWN_CAPITAL)
            .to_string()
    }
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A country augmented with fetched capital and flag data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnrichedCountry {
    #[serde(flatten)]
    pub country: Country,
    pub flag: String,
    pub capital: String,
}

impl EnrichedCountry {
    pub fn from_record(country: Country, record: &CountryRecord) -> Self {
        Self {
            country,
            flag: record.flag_url(),
            capital: record.first_capital(),
        }
    }
}

/// A displayed row of the country list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum CountryEntry {
    Enriched(EnrichedCountry),
    Plain(Country),
}

impl CountryEntry {
    pub fn country(&self) -> &Country {
        match self {
            CountryEntry::Plain(c) => c,
            CountryEntry::Enriched(e) => &e.country,
        }
    }

    pub fn capital(&self) -> Option<&str> {
        match self {
            CountryEntry::Plain(_) => None,
            CountryEntry::Enriched(e) => Some(&e.capital),
        }
    }

    pub fn flag(&self) -> Option<&str> {
        match self {
            CountryEntry::Plain(_) => None,
            CountryEntry::Enriched(e) => Some(&e.flag),
        }
    }
}
