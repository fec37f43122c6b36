use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A case count as reported by the API: either a known non-negative integer or absent.
///
/// The provider sends `null`, omits fields, or (for a few countries) sends floats.
/// Absent values convert to zero only through [`Count::value_or_zero`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Count(pub Option<u64>);

impl Count {
    pub const ABSENT: Count = Count(None);

    pub fn new(v: u64) -> Self {
        Count(Some(v))
    }

    /// Absent counts are treated as zero.
    pub fn value_or_zero(self) -> u64 {
        self.0.unwrap_or(0)
    }

    /// `true` when the API actually reported a value (including a real zero).
    pub fn is_known(self) -> bool {
        self.0.is_some()
    }
}

impl From<u64> for Count {
    fn from(v: u64) -> Self {
        Count(Some(v))
    }
}

impl From<Option<u64>> for Count {
    fn from(v: Option<u64>) -> Self {
        Count(v)
    }
}

impl Serialize for Count {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Serde helper: accept integers, floats (truncated), `null`, or a nested option.
/// Negative numbers are not counts; they read as absent.
impl<'de> Deserialize<'de> for Count {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct CountVisitor;

        impl<'de> Visitor<'de> for CountVisitor {
            type Value = Count;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a non-negative number or null")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Count(Some(v)))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Count(u64::try_from(v).ok()))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if v.is_finite() && v >= 0.0 {
                    Ok(Count(Some(v.trunc() as u64)))
                } else {
                    Ok(Count(None))
                }
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Count(None))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(Count(None))
            }

            fn visit_some<D2>(self, d: D2) -> Result<Self::Value, D2::Error>
            where
                D2: serde::Deserializer<'de>,
            {
                d.deserialize_any(CountVisitor)
            }
        }

        deserializer.deserialize_any(CountVisitor)
    }
}

/// Point-in-time case statistics for the world or for one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Epoch milliseconds of the provider's last update.
    #[serde(default)]
    pub updated: Option<i64>,
    #[serde(default)]
    pub cases: Count,
    #[serde(default)]
    pub today_cases: Count,
    #[serde(default)]
    pub deaths: Count,
    #[serde(default)]
    pub today_deaths: Count,
    #[serde(default)]
    pub recovered: Count,
    #[serde(default)]
    pub today_recovered: Count,
    #[serde(default)]
    pub active: Count,
    #[serde(default)]
    pub critical: Count,
    #[serde(default)]
    pub tests: Count,
    #[serde(default)]
    pub population: Count,
    #[serde(default)]
    pub affected_countries: Count,
}

impl Snapshot {
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated.and_then(DateTime::from_timestamp_millis)
    }
}

/// Identity and location block nested under `countryInfo`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryInfo {
    #[serde(default)]
    pub iso2: Option<String>,
    #[serde(default)]
    pub iso3: Option<String>,
    #[serde(default)]
    pub lat: f64,
    #[serde(default)]
    pub long: f64,
    #[serde(default)]
    pub flag: Option<String>,
}

/// One country's figures, as served by `/countries` and `/countries/{code}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStat {
    pub country: String,
    #[serde(default)]
    pub country_info: CountryInfo,
    #[serde(default)]
    pub continent: Option<String>,
    #[serde(flatten)]
    pub stats: Snapshot,
}

impl CountryStat {
    pub fn metric(&self, kind: CasesType) -> Count {
        kind.total(&self.stats)
    }

    pub fn coordinates(&self) -> (f64, f64) {
        (self.country_info.lat, self.country_info.long)
    }
}

/// Which case category drives card highlighting and map colouring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasesType {
    #[default]
    Cases,
    Recovered,
    Deaths,
}

impl CasesType {
    pub const ALL: [CasesType; 3] = [CasesType::Cases, CasesType::Recovered, CasesType::Deaths];

    pub fn total(self, s: &Snapshot) -> Count {
        match self {
            CasesType::Cases => s.cases,
            CasesType::Recovered => s.recovered,
            CasesType::Deaths => s.deaths,
        }
    }

    pub fn today(self, s: &Snapshot) -> Count {
        match self {
            CasesType::Cases => s.today_cases,
            CasesType::Recovered => s.today_recovered,
            CasesType::Deaths => s.today_deaths,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CasesType::Cases => "cases",
            CasesType::Recovered => "recovered",
            CasesType::Deaths => "deaths",
        }
    }
}

impl fmt::Display for CasesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown cases type {0:?} (expected cases, recovered or deaths)")]
pub struct ParseCasesTypeError(pub String);

impl FromStr for CasesType {
    type Err = ParseCasesTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cases" => Ok(CasesType::Cases),
            "recovered" => Ok(CasesType::Recovered),
            "deaths" => Ok(CasesType::Deaths),
            _ => Err(ParseCasesTypeError(s.to_string())),
        }
    }
}

/// The dropdown value: the whole world or a country code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    Worldwide,
    Country(String),
}

pub const WORLDWIDE: &str = "worldwide";

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Worldwide => f.write_str(WORLDWIDE),
            Selection::Country(code) => f.write_str(code),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSelectionError {
    #[error("empty country code")]
    Empty,
}

impl FromStr for Selection {
    type Err = ParseSelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            Err(ParseSelectionError::Empty)
        } else if s.eq_ignore_ascii_case(WORLDWIDE) {
            Ok(Selection::Worldwide)
        } else {
            Ok(Selection::Country(s.to_string()))
        }
    }
}

/// One entry of the country picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryOption {
    pub name: String,
    pub value: String,
}

/// Build picker entries: `Worldwide` first, then every country that has an ISO2 code,
/// in input order.
pub fn country_options(countries: &[CountryStat]) -> Vec<CountryOption> {
    let mut out = Vec::with_capacity(countries.len() + 1);
    out.push(CountryOption {
        name: "Worldwide".into(),
        value: WORLDWIDE.into(),
    });
    out.extend(countries.iter().filter_map(|c| {
        let iso2 = c.country_info.iso2.as_deref()?.trim();
        if iso2.is_empty() {
            return None;
        }
        Some(CountryOption {
            name: c.country.clone(),
            value: iso2.to_string(),
        })
    }));
    out
}
