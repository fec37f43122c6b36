//! Map model: circle markers per country and the viewport.

use crate::models::{CasesType, CountryInfo, CountryStat};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colour and radius scale for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarkerStyle {
    pub color: Rgb,
    /// Metres of radius per square root of the count.
    pub multiplier: f64,
}

pub fn marker_style(kind: CasesType) -> MarkerStyle {
    match kind {
        CasesType::Cases => MarkerStyle {
            color: Rgb(0xCC, 0x10, 0x34),
            multiplier: 800.0,
        },
        CasesType::Recovered => MarkerStyle {
            color: Rgb(0x7D, 0xD7, 0x1D),
            multiplier: 1200.0,
        },
        CasesType::Deaths => MarkerStyle {
            color: Rgb(0xFB, 0x44, 0x43),
            multiplier: 2000.0,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub country: String,
    pub lat: f64,
    pub long: f64,
    pub radius_m: f64,
    pub color: Rgb,
    pub value: u64,
}

/// One marker per country, in input order. Absent counts give a zero radius.
pub fn markers(countries: &[CountryStat], kind: CasesType) -> Vec<MapMarker> {
    let style = marker_style(kind);
    countries
        .iter()
        .map(|c| {
            let value = c.metric(kind).value_or_zero();
            MapMarker {
                country: c.country.clone(),
                lat: c.country_info.lat,
                long: c.country_info.long,
                radius_m: (value as f64).sqrt() * style.multiplier,
                color: style.color,
                value,
            }
        })
        .collect()
}

pub const DEFAULT_CENTER: (f64, f64) = (34.80746, -40.4796);
pub const DEFAULT_ZOOM: u8 = 3;
pub const COUNTRY_ZOOM: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub lat: f64,
    pub long: f64,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            lat: DEFAULT_CENTER.0,
            long: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl MapView {
    pub fn focus(info: &CountryInfo) -> Self {
        Self {
            lat: info.lat,
            long: info.long,
            zoom: COUNTRY_ZOOM,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Count, Snapshot};

    #[test]
    fn radius_scales_with_sqrt_and_metric() {
        let c = CountryStat {
            country: "X".into(),
            country_info: CountryInfo {
                lat: 10.0,
                long: 20.0,
                ..Default::default()
            },
            stats: Snapshot {
                cases: Count::new(10_000),
                deaths: Count::new(100),
                ..Default::default()
            },
            ..Default::default()
        };
        let m = markers(std::slice::from_ref(&c), CasesType::Cases);
        assert_eq!(m[0].radius_m, 100.0 * 800.0);
        assert_eq!((m[0].lat, m[0].long), (10.0, 20.0));
        let d = markers(&[c], CasesType::Deaths);
        assert_eq!(d[0].radius_m, 10.0 * 2000.0);
        assert_eq!(d[0].color, Rgb(0xFB, 0x44, 0x43));
    }
}
