//! Display strings for case counts.

use crate::models::Count;
use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Group thousands in English style: `1234567` → `"1,234,567"`, absent → `"0"`.
pub fn pretty_print_stat(stat: Count) -> String {
    pretty_print_stat_locale(stat, "en")
}

/// Like [`pretty_print_stat`] but with the grouping separator of `locale_tag`.
pub fn pretty_print_stat_locale(stat: Count, locale_tag: &str) -> String {
    stat.value_or_zero()
        .to_formatted_string(map_locale(locale_tag))
}

/// Card "today" line: `"+1,234"`.
pub fn pretty_print_delta(stat: Count) -> String {
    pretty_print_delta_locale(stat, "en")
}

pub fn pretty_print_delta_locale(stat: Count, locale_tag: &str) -> String {
    format!("+{}", pretty_print_stat_locale(stat, locale_tag))
}
