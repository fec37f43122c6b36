use crate::models::CountryStat;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const CSV_HEADER: [&str; 13] = [
    "country",
    "iso2",
    "iso3",
    "continent",
    "lat",
    "long",
    "cases",
    "today_cases",
    "deaths",
    "today_deaths",
    "recovered",
    "today_recovered",
    "active",
];

/// Spreadsheet apps evaluate cells starting with these characters as formulas.
fn sanitize_cell(s: &str) -> Cow<'_, str> {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => Cow::Owned(format!("'{s}")),
        _ => Cow::Borrowed(s),
    }
}

fn opt_cell(s: &Option<String>) -> Cow<'_, str> {
    s.as_deref().map(sanitize_cell).unwrap_or(Cow::Borrowed(""))
}

/// Save the country table as CSV with header. Absent counts become empty cells.
pub fn save_csv<P: AsRef<Path>>(countries: &[CountryStat], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.write_record(CSV_HEADER)?;
    for c in countries {
        let s = &c.stats;
        wtr.serialize((
            sanitize_cell(&c.country),
            opt_cell(&c.country_info.iso2),
            opt_cell(&c.country_info.iso3),
            opt_cell(&c.continent),
            c.country_info.lat,
            c.country_info.long,
            s.cases.0,
            s.today_cases.0,
            s.deaths.0,
            s.today_deaths.0,
            s.recovered.0,
            s.today_recovered.0,
            s.active.0,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save the country table as a pretty JSON array in the provider's field layout.
pub fn save_json<P: AsRef<Path>>(countries: &[CountryStat], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(countries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
