use crate::dataset::Dataset;
use crate::models::{Continent, Country};

/// Result of clicking a continent: the continent (if the code is known) and its countries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub continent: Option<Continent>,
    pub countries: Vec<Country>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.continent.is_none()
    }
}

/// Select a continent by code.
///
/// An unknown code is not an error: it yields an empty selection. Countries are
/// matched by exact equality on `continent` and keep table order, so rows that
/// reference a missing continent never show up.
pub fn select_continent(dataset: &Dataset, code: &str) -> Selection {
    match dataset.continent(code) {
        Some(continent) => Selection {
            countries: dataset
                .countries()
                .iter()
                .filter(|c| c.continent == continent.code)
                .cloned()
                .collect(),
            continent: Some(continent.clone()),
        },
        None => Selection::default(),
    }
}

/// Case-insensitive substring match of `term` against continent names.
/// A blank term returns every continent, in order.
pub fn filter_continents<'a>(continents: &'a [Continent], term: &str) -> Vec<&'a Continent> {
    let needle = term.trim().to_lowercase();
    continents
        .iter()
        .filter(|c| needle.is_empty() || c.name.to_lowercase().contains(&needle))
        .collect()
}
