//! covid_viz
//!
//! A small Rust library for retrieving, sorting, formatting, and mapping COVID-19
//! statistics from the public disease.sh API. Pairs with the `covid-viz` CLI.
//!
//! ### Features
//! - Fetch the worldwide snapshot, the country list, or one country's detail
//! - Sort countries by cases (or recoveries / deaths), stable and non-mutating
//! - Locale-aware thousands grouping for display
//! - Summary cards, CSV/JSON table export, and an SVG/PNG marker map
//! - Request sequencing so a late response never overwrites a newer selection
//!
//! ### Example
//! ```no_run
//! use covid_viz::{Client, CasesType};
//!
//! let client = Client::default();
//! let countries = client.fetch_countries()?;
//! let table = covid_viz::sort::sort_data(&countries);
//! for c in table.iter().take(5) {
//!     println!("{} {}", c.country, covid_viz::format::pretty_print_stat(c.stats.cases));
//! }
//! let markers = covid_viz::map::markers(&countries, CasesType::Deaths);
//! covid_viz::viz::render_map(&markers, "deaths.svg", 1200, 600)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod cards;
pub mod format;
pub mod map;
pub mod models;
pub mod session;
pub mod sort;
pub mod storage;
pub mod viz;

pub use api::Client;
pub use models::{CasesType, Count, CountryStat, Selection, Snapshot};
