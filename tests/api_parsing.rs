use covid_viz::api::SelectedStats;
use covid_viz::models::{Count, CountryStat, Snapshot, country_options};

#[test]
fn parse_worldwide_sample() {
    let sample = r#"
    {
      "updated": 1700000000000,
      "cases": 697000000,
      "todayCases": 1234,
      "deaths": 6940000,
      "todayDeaths": 5,
      "recovered": 669000000,
      "todayRecovered": null,
      "active": 21000000,
      "critical": 37000,
      "casesPerOneMillion": 89412,
      "tests": 7000000000,
      "population": 7900000000,
      "affectedCountries": 231
    }
    "#;

    let s: Snapshot = serde_json::from_str(sample).unwrap();
    assert_eq!(s.cases, Count::new(697_000_000));
    assert_eq!(s.today_cases, Count::new(1234));
    assert_eq!(s.today_recovered, Count::ABSENT);
    assert_eq!(s.affected_countries, Count::new(231));
    let ts = s.updated_at().unwrap();
    assert_eq!(ts.timestamp_millis(), 1_700_000_000_000);
}

#[test]
fn parse_country_list_sample() {
    let sample = r#"
    [
      {
        "updated": 1700000000000,
        "country": "Germany",
        "countryInfo": {"_id": 276, "iso2": "DE", "iso3": "DEU", "lat": 51, "long": 9,
                        "flag": "https://disease.sh/assets/img/flags/de.png"},
        "cases": 38437756,
        "todayCases": 0,
        "deaths": 174979,
        "todayDeaths": 0,
        "recovered": 38240600,
        "todayRecovered": 0,
        "active": 22177,
        "critical": 0,
        "continent": "Europe"
      },
      {
        "country": "Diamond Princess",
        "countryInfo": {"_id": null, "iso2": null, "iso3": null, "lat": 0, "long": 0},
        "cases": 712,
        "deaths": 13,
        "recovered": 699,
        "continent": ""
      }
    ]
    "#;

    let rows: Vec<CountryStat> = serde_json::from_str(sample).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].country, "Germany");
    assert_eq!(rows[0].country_info.iso2.as_deref(), Some("DE"));
    assert_eq!(rows[0].coordinates(), (51.0, 9.0));
    assert_eq!(rows[0].stats.deaths, Count::new(174_979));
    assert_eq!(rows[1].country_info.iso2, None);
    assert_eq!(rows[1].stats.today_cases, Count::ABSENT);

    // cruise ship has no code, so it is not selectable
    let opts = country_options(&rows);
    assert_eq!(opts.len(), 2);
    assert_eq!(opts[0].value, "worldwide");
    assert_eq!(opts[1].name, "Germany");
    assert_eq!(opts[1].value, "DE");
}

#[test]
fn country_detail_keeps_coordinates_for_recentering() {
    let detail: CountryStat = serde_json::from_str(
        r#"{"country":"France","countryInfo":{"iso2":"FR","lat":46,"long":2},"cases":5}"#,
    )
    .unwrap();
    let sel = SelectedStats::from(detail);
    assert_eq!(sel.snapshot.cases, Count::new(5));
    let info = sel.country_info.unwrap();
    assert_eq!((info.lat, info.long), (46.0, 2.0));
}
