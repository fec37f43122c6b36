use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use covid_viz::api::DEFAULT_BASE_URL;
use covid_viz::cards::{InfoCard, info_cards_locale};
use covid_viz::format::pretty_print_stat_locale;
use covid_viz::models::{CasesType, CountryStat, Selection, Snapshot};
use covid_viz::session::Dashboard;
use covid_viz::{Client, map, sort, storage, viz};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "covid-viz",
    version,
    about = "Fetch, sort, format & map COVID-19 statistics from disease.sh"
)]
struct Cli {
    /// API base URL (for mirrors or local test servers).
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show worldwide summary cards.
    World(CardArgs),
    /// Show summary cards for one country (ISO2/ISO3 code).
    Country(CountryArgs),
    /// List the country picker entries (name and code).
    Countries,
    /// Print the country table sorted by a metric (and optionally save it).
    Table(TableArgs),
    /// Render the marker map to an SVG or PNG file.
    Map(MapArgs),
    /// Full dashboard: cards, table and map in one run.
    Dashboard(DashboardArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct CardArgs {
    /// Metric highlighted on the cards.
    #[arg(long, default_value = "cases")]
    cases_type: CasesType,
    /// Locale for thousands separators (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct CountryArgs {
    /// ISO2 or ISO3 code, e.g. DE or DEU.
    code: String,
    #[command(flatten)]
    cards: CardArgs,
}

#[derive(Args, Debug)]
struct TableArgs {
    /// Metric to sort by.
    #[arg(long, default_value = "cases")]
    by: CasesType,
    /// Only print the first N rows.
    #[arg(long)]
    limit: Option<usize>,
    /// Save the sorted table to a file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    #[arg(long, default_value = "en")]
    locale: String,
}

#[derive(Args, Debug)]
struct MapArgs {
    /// Output path (.svg or .png).
    #[arg(long)]
    plot: PathBuf,
    /// Metric that sizes and colours the markers.
    #[arg(long, default_value = "cases")]
    cases_type: CasesType,
    /// Width of the map (default 1200).
    #[arg(long, default_value_t = 1200)]
    width: u32,
    /// Height of the map (default 600).
    #[arg(long, default_value_t = 600)]
    height: u32,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    /// Country to select after the worldwide view loads (default: worldwide).
    #[arg(long, default_value = "worldwide")]
    country: Selection,
    #[arg(long, default_value = "cases")]
    cases_type: CasesType,
    /// Table rows to print.
    #[arg(long, default_value_t = 10)]
    limit: usize,
    /// Also render the map to this path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    #[arg(long, default_value_t = 1200)]
    width: u32,
    #[arg(long, default_value_t = 600)]
    height: u32,
    #[arg(long, default_value = "en")]
    locale: String,
    /// Seconds to wait for the selected snapshot.
    #[arg(long, default_value_t = 30)]
    wait: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::with_base_url(cli.base_url);
    match cli.cmd {
        Command::World(args) => cmd_world(&client, args),
        Command::Country(args) => cmd_country(&client, args),
        Command::Countries => cmd_countries(&client),
        Command::Table(args) => cmd_table(&client, args),
        Command::Map(args) => cmd_map(&client, args),
        Command::Dashboard(args) => cmd_dashboard(&client, args),
    }
}

fn print_cards(heading: &str, snapshot: &Snapshot, cards: &[InfoCard]) {
    println!("{}", heading);
    if let Some(ts) = snapshot.updated_at() {
        println!("updated {}", ts.format("%Y-%m-%d %H:%M UTC"));
    }
    for c in cards {
        let mark = if c.active { '*' } else { ' ' };
        println!("{} {:<18} {:>14}  total {:>16}", mark, c.title, c.cases, c.total);
    }
}

fn print_table(rows: &[CountryStat], by: CasesType, limit: Option<usize>, locale: &str) {
    let n = limit.unwrap_or(rows.len());
    for (i, c) in rows.iter().take(n).enumerate() {
        println!(
            "{:>4}  {:<32} {:>16}",
            i + 1,
            c.country,
            pretty_print_stat_locale(c.metric(by), locale)
        );
    }
}

fn cmd_world(client: &Client, args: CardArgs) -> Result<()> {
    let snapshot = client.fetch_all()?;
    let cards = info_cards_locale(&snapshot, args.cases_type, &args.locale);
    print_cards("Worldwide", &snapshot, &cards);
    Ok(())
}

fn cmd_country(client: &Client, args: CountryArgs) -> Result<()> {
    let detail = client.fetch_country(&args.code)?;
    let cards = info_cards_locale(&detail.stats, args.cards.cases_type, &args.cards.locale);
    print_cards(&detail.country, &detail.stats, &cards);
    Ok(())
}

fn cmd_countries(client: &Client) -> Result<()> {
    let countries = client.fetch_countries()?;
    for opt in covid_viz::models::country_options(&countries) {
        println!("{}\t{}", opt.name, opt.value);
    }
    Ok(())
}

fn cmd_table(client: &Client, args: TableArgs) -> Result<()> {
    let countries = client.fetch_countries()?;
    let rows = sort::sort_by_metric(&countries, args.by);

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&rows, path)?,
            "json" => storage::save_json(&rows, path)?,
            other => bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }

    print_table(&rows, args.by, args.limit, &args.locale);
    Ok(())
}

fn cmd_map(client: &Client, args: MapArgs) -> Result<()> {
    let countries = client.fetch_countries()?;
    let markers = map::markers(&countries, args.cases_type);
    viz::render_map(&markers, &args.plot, args.width, args.height)?;
    eprintln!("Wrote map to {}", args.plot.display());
    Ok(())
}

fn cmd_dashboard(client: &Client, args: DashboardArgs) -> Result<()> {
    let mut dash = Dashboard::new();
    dash.set_cases_type(args.cases_type);

    // Worldwide first, like the page on load; a country pick supersedes it.
    dash.select(client, Selection::Worldwide);
    if args.country != Selection::Worldwide {
        dash.select(client, args.country.clone());
    }

    match client.fetch_countries() {
        Ok(countries) => dash.load_countries(countries),
        Err(e) => log::warn!("country list unavailable: {:#}", e),
    }

    if !dash.wait_current(Duration::from_secs(args.wait)) {
        log::warn!("showing previous snapshot for {}", args.country);
    }

    let heading = match &dash.selection {
        Selection::Worldwide => "Worldwide".to_string(),
        Selection::Country(code) => dash
            .table_data
            .iter()
            .find(|c| {
                c.country_info
                    .iso2
                    .as_deref()
                    .is_some_and(|iso| iso.eq_ignore_ascii_case(code))
            })
            .map(|c| c.country.clone())
            .unwrap_or_else(|| code.clone()),
    };
    let cards = info_cards_locale(&dash.country_info, dash.cases_type, &args.locale);
    print_cards(&heading, &dash.country_info, &cards);
    println!();
    println!("Live cases by country");
    print_table(&dash.table_data, CasesType::Cases, Some(args.limit), &args.locale);

    if let Some(path) = args.plot.as_ref() {
        let markers = map::markers(&dash.map_countries, dash.cases_type);
        viz::render_map(&markers, path, args.width, args.height)?;
        eprintln!(
            "Wrote map to {} (centre {:.2},{:.2} zoom {})",
            path.display(),
            dash.map_view.lat,
            dash.map_view.long,
            dash.map_view.zoom
        );
    }
    Ok(())
}
