use covid_viz::models::{Count, CountryInfo, CountryStat, Snapshot};
use covid_viz::storage;
use std::fs;
use tempfile::tempdir;

fn sample() -> Vec<CountryStat> {
    vec![
        CountryStat {
            country: "USA".into(),
            country_info: CountryInfo {
                iso2: Some("US".into()),
                iso3: Some("USA".into()),
                lat: 38.0,
                long: -97.0,
                flag: None,
            },
            continent: Some("North America".into()),
            stats: Snapshot {
                cases: Count::new(111_820_082),
                deaths: Count::new(1_219_487),
                ..Default::default()
            },
        },
        CountryStat {
            country: "Nowhere".into(),
            stats: Snapshot {
                cases: Count::ABSENT,
                ..Default::default()
            },
            ..Default::default()
        },
    ]
}

#[test]
fn save_csv_and_json() {
    let rows = sample();
    let dir = tempdir().unwrap();

    let csv_path = dir.path().join("table.csv");
    storage::save_csv(&rows, &csv_path).unwrap();
    let csv_txt = fs::read_to_string(&csv_path).unwrap();
    assert!(csv_txt.starts_with("country,iso2,iso3,continent,lat,long,cases,"));
    assert_eq!(csv_txt.lines().count(), 1 + rows.len());

    let mut rdr = csv::Reader::from_path(&csv_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    let cases_idx = headers.iter().position(|h| h == "cases").unwrap();
    let recs: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(&recs[0][cases_idx], "111820082");
    // absent stays distinguishable from zero
    assert_eq!(&recs[1][cases_idx], "");

    let json_path = dir.path().join("table.json");
    storage::save_json(&rows, &json_path).unwrap();
    let json_txt = fs::read_to_string(&json_path).unwrap();
    let v: serde_json::Value = serde_json::from_str(&json_txt).unwrap();
    let arr = v.as_array().unwrap();
    assert_eq!(arr.len(), rows.len());
    assert_eq!(arr[0]["countryInfo"]["iso2"], "US");
    assert_eq!(arr[0]["todayCases"], serde_json::Value::Null);

    // JSON export reads back into the same records
    let back: Vec<CountryStat> = serde_json::from_value(v).unwrap();
    assert_eq!(back, rows);
}

#[test]
fn csv_cells_are_prefixed_to_avoid_formulas() {
    let rows = vec![CountryStat {
        country: "=HYPERLINK(\"http://evil\")".into(),
        continent: Some("@foo".into()),
        ..Default::default()
    }];
    let dir = tempdir().unwrap();
    let path = dir.path().join("inject.csv");
    storage::save_csv(&rows, &path).unwrap();

    let mut rdr = csv::Reader::from_path(&path).unwrap();
    let row = rdr.records().next().expect("one data row").unwrap();
    assert!(row[0].starts_with('\''), "country not prefixed: {}", &row[0]);
    assert!(row[0].contains("=HYPERLINK"));
    assert_eq!(&row[3], "'@foo");
}
