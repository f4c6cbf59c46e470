//! Plain-text rendering of the explorer screen, used by the CLI.
//!
//! Layout mirrors the GUI: title, continent buttons, then either a loading line,
//! an error line, or the statistics panel followed by the country list.

use crate::explorer::Explorer;
use crate::format::{group_digits, join_names};
use crate::models::{Continent, CountryEntry};
use crate::stats::ContinentSummary;

pub const TITLE: &str = "Continents and Countries";

/// Continent buttons on one line; the selected one is wrapped in brackets.
pub fn render_buttons(explorer: &Explorer) -> String {
    let selected = explorer.selected_continent().map(|c| c.code.as_str());
    explorer
        .visible_continents()
        .iter()
        .map(|c| {
            if Some(c.code.as_str()) == selected {
                format!("[{}]", c.name)
            } else {
                c.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_entry(entry: &CountryEntry) -> String {
    let c = entry.country();
    match entry {
        CountryEntry::Plain(_) => format!("{} ({})", c.name, c.code),
        CountryEntry::Enriched(e) => format!(
            "{} ({})  capital: {}  flag: {}",
            c.name, c.code, e.capital, e.flag
        ),
    }
}

/// Statistics panel lines for the selected continent, shared with the GUI.
pub fn stats_lines(
    summary: &ContinentSummary,
    continent: &Continent,
    locale_tag: &str,
) -> Vec<String> {
    let mut lines = vec![
        format!("Area: {} sq km", group_digits(summary.area_sq_km, locale_tag)),
        format!("Population: {}", group_digits(summary.population, locale_tag)),
    ];
    if let Some(density) = summary.density {
        lines.push(format!("Density: {density:.1} per sq km"));
    }
    lines.push(format!("Number of Countries: {}", summary.declared_countries));
    lines.push(format!("Major Lines: {}", join_names(&continent.lines)));
    lines.push(format!("Oceans: {}", join_names(&continent.oceans)));
    lines
}

/// Heading above the country list: listed count, plus how many carry fetched details.
pub fn countries_heading(summary: &ContinentSummary) -> String {
    if summary.enriched > 0 {
        format!(
            "Countries ({} listed, {} with capital and flag):",
            summary.listed_countries, summary.enriched
        )
    } else {
        format!("Countries ({} listed):", summary.listed_countries)
    }
}

pub fn render_text(explorer: &Explorer, locale_tag: &str) -> String {
    let mut lines = vec![TITLE.to_string(), render_buttons(explorer)];

    if explorer.is_loading() {
        lines.push("Loading...".to_string());
        return finish(lines);
    }
    if let Some(msg) = explorer.error_message() {
        lines.push(msg.to_string());
    }

    let Some(continent) = explorer.selected_continent() else {
        return finish(lines);
    };
    let summary = ContinentSummary::new(continent, explorer.countries());
    lines.push(String::new());
    lines.push(continent.name.clone());
    lines.extend(stats_lines(&summary, continent, locale_tag));

    if explorer.error_message().is_none() {
        lines.push(countries_heading(&summary));
        lines.extend(
            explorer
                .countries()
                .iter()
                .map(|entry| format!("  - {}", render_entry(entry))),
        );
    }
    finish(lines)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
