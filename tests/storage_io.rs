use continent_explorer::models::EnrichedCountry;
use continent_explorer::storage;
use continent_explorer::{Country, CountryEntry};
use std::fs;
use tempfile::tempdir;

fn sample() -> Vec<CountryEntry> {
    vec![
        CountryEntry::Enriched(EnrichedCountry {
            country: Country {
                code: "NG".into(),
                name: "Nigeria".into(),
                continent: "AF".into(),
            },
            flag: "https://flagcdn.com/ng.svg".into(),
            capital: "Abuja".into(),
        }),
        CountryEntry::Plain(Country {
            code: "EG".into(),
            name: "Egypt".into(),
            continent: "AF".into(),
        }),
    ]
}

#[test]
fn save_csv_and_json() {
    let rows = sample();
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("countries.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("code,name,continent,capital,flag"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());
    assert!(csv_txt.contains("NG,Nigeria,AF,Abuja,https://flagcdn.com/ng.svg"));
    assert!(csv_txt.contains("EG,Egypt,AF,,"));

    let json_path = dir.path().join("countries.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), rows.len());
    assert_eq!(arr[0]["capital"], "Abuja");
    assert_eq!(arr[0]["code"], "NG");
    assert!(arr[1].get("capital").is_none());

    let back: Vec<CountryEntry> = serde_json::from_str(&json_txt).unwrap();
    assert_eq!(back, rows);
}

// Cells that start like a formula get a leading quote so spreadsheets show them as text.
#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let rows = vec![CountryEntry::Plain(Country {
        code: "=HYPERLINK(\"http://evil\")".into(),
        name: "+SUM(A1:A9)".into(),
        continent: "@foo".into(),
    })];
    let dir = tempdir().unwrap();
    let path = dir.path().join("injection.csv");
    storage::save_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let row = rdr.records().next().expect("one data row expected").unwrap();
    assert_eq!(&row[0], "'=HYPERLINK(\"http://evil\")");
    assert_eq!(&row[1], "'+SUM(A1:A9)");
    assert_eq!(&row[2], "'@foo");
}
