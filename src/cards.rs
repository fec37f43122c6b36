//! The three summary cards shown above the map.

use crate::format::{pretty_print_delta_locale, pretty_print_stat_locale};
use crate::models::{CasesType, Snapshot};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoCard {
    pub title: &'static str,
    pub kind: CasesType,
    /// Today's change, e.g. `"+1,234"`.
    pub cases: String,
    /// Running total, e.g. `"1,234,567"`.
    pub total: String,
    /// The card whose metric is currently selected.
    pub active: bool,
    pub is_red: bool,
}

fn title(kind: CasesType) -> &'static str {
    match kind {
        CasesType::Cases => "Coronavirus Cases",
        CasesType::Recovered => "Recovered",
        CasesType::Deaths => "Deaths",
    }
}

pub fn info_cards(snapshot: &Snapshot, selected: CasesType) -> [InfoCard; 3] {
    info_cards_locale(snapshot, selected, "en")
}

pub fn info_cards_locale(
    snapshot: &Snapshot,
    selected: CasesType,
    locale_tag: &str,
) -> [InfoCard; 3] {
    CasesType::ALL.map(|kind| InfoCard {
        title: title(kind),
        kind,
        cases: pretty_print_delta_locale(kind.today(snapshot), locale_tag),
        total: pretty_print_stat_locale(kind.total(snapshot), locale_tag),
        active: kind == selected,
        is_red: kind != CasesType::Recovered,
    })
}
