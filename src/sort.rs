use crate::models::{CasesType, CountryStat};

/// Order countries by total cases, largest first.
///
/// Returns a new vector; `countries` is left untouched. The sort is stable, so
/// countries with equal counts keep their input order. Absent counts compare as zero.
pub fn sort_data(countries: &[CountryStat]) -> Vec<CountryStat> {
    sort_by_metric(countries, CasesType::Cases)
}

/// Same as [`sort_data`], ordering by the total of the chosen metric.
pub fn sort_by_metric(countries: &[CountryStat], kind: CasesType) -> Vec<CountryStat> {
    let mut out = countries.to_vec();
    out.sort_by(|a, b| {
        b.metric(kind)
            .value_or_zero()
            .cmp(&a.metric(kind).value_or_zero())
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Count, Snapshot};

    fn c(name: &str, cases: Option<u64>, deaths: u64) -> CountryStat {
        CountryStat {
            country: name.into(),
            stats: Snapshot {
                cases: Count(cases),
                deaths: Count::new(deaths),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn names(v: &[CountryStat]) -> Vec<&str> {
        v.iter().map(|c| c.country.as_str()).collect()
    }

    #[test]
    fn ties_keep_input_order() {
        let input = vec![
            c("A", Some(500), 0),
            c("B", Some(2000), 0),
            c("C", Some(2000), 0),
        ];
        let sorted = sort_data(&input);
        assert_eq!(names(&sorted), ["B", "C", "A"]);
        // input untouched
        assert_eq!(names(&input), ["A", "B", "C"]);
    }

    #[test]
    fn absent_cases_sort_last_and_stay_absent() {
        let input = vec![c("X", None, 0), c("Y", Some(1), 0), c("Z", Some(0), 0)];
        let sorted = sort_data(&input);
        assert_eq!(names(&sorted), ["Y", "X", "Z"]);
        assert_eq!(sorted[1].stats.cases, Count::ABSENT);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(sort_data(&[]).is_empty());
    }

    #[test]
    fn sorting_by_deaths_ignores_cases() {
        let input = vec![c("A", Some(9), 1), c("B", Some(1), 9)];
        assert_eq!(names(&sort_by_metric(&input, CasesType::Deaths)), ["B", "A"]);
    }

    #[test]
    fn sorted_output_is_a_fixed_point() {
        let input = vec![
            c("A", Some(3), 0),
            c("B", None, 0),
            c("C", Some(7), 0),
            c("D", Some(3), 0),
        ];
        let once = sort_data(&input);
        let twice = sort_data(&once);
        assert_eq!(once, twice);
        assert_eq!(once.len(), input.len());
        assert!(
            once.windows(2)
                .all(|w| w[0].stats.cases.value_or_zero() >= w[1].stats.cases.value_or_zero())
        );
    }
}
