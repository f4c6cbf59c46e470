use crate::models::CountryEntry;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> String {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => format!("'{s}"),
        _ => s.to_string(),
    }
}

/// Save the country listing as CSV with header. Plain rows leave `capital` and `flag` empty.
pub fn save_csv<P: AsRef<Path>>(entries: &[CountryEntry], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.write_record(["code", "name", "continent", "capital", "flag"])?;
    for e in entries {
        let c = e.country();
        wtr.write_record([
            sanitize_cell(&c.code),
            sanitize_cell(&c.name),
            sanitize_cell(&c.continent),
            sanitize_cell(e.capital().unwrap_or_default()),
            sanitize_cell(e.flag().unwrap_or_default()),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the country listing as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(entries: &[CountryEntry], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(entries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Country;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let rows = vec![CountryEntry::Plain(Country {
            code: "DE".into(),
            name: "Germany".into(),
            continent: "EU".into(),
        })];
        save_csv(&rows, &csvp).unwrap();
        save_json(&rows, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());
    }

    #[test]
    fn formula_starters_are_prefixed() {
        assert_eq!(sanitize_cell("=1+1"), "'=1+1");
        assert_eq!(sanitize_cell("Côte d'Ivoire"), "Côte d'Ivoire");
    }
}
