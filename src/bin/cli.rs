//! Rate Explorer CLI
//!
//! Command-line front end for browsing rates through the API.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rate_explorer::{
    api::{ApiGet, HttpApi},
    error::{AppError, Result},
    explorer::Explorer,
    models::{
        BusinessSize, Config, ContractYear, EducationLevel, QueryType, RowId, Site, Sort,
        find_schedule, format_price,
    },
    store::{Action, Receipt, Store},
    view::ResultView,
};

/// Rate Explorer - browse schedule labor rates
#[derive(Parser, Debug)]
#[command(
    name = "rate-explorer",
    version,
    about = "Filter and explore schedule labor rates"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "rate-explorer.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available schedules
    Schedules,

    /// Search rates and print the visible rows
    Search(FilterArgs),

    /// Print the CSV export link for a search
    CsvUrl(FilterArgs),

    /// Validate configuration file
    Validate,
}

/// Filter facets shared by `search` and `csv-url`.
#[derive(Args, Debug)]
struct FilterArgs {
    /// Search term
    #[arg(short, long)]
    q: Option<String>,

    /// match_all, match_exact or match_phrase
    #[arg(long)]
    query_type: Option<QueryType>,

    /// Schedule identifier
    #[arg(long)]
    schedule: Option<String>,

    /// Education levels (HS, AA, BA, MA, PHD)
    #[arg(long, value_delimiter = ',')]
    education: Vec<EducationLevel>,

    #[arg(long)]
    min_experience: Option<u32>,

    #[arg(long)]
    max_experience: Option<u32>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    /// customer, contractor or both
    #[arg(long)]
    site: Option<Site>,

    /// s (small) or o (other than small)
    #[arg(long)]
    business_size: Option<BusinessSize>,

    /// current, 1 or 2
    #[arg(long)]
    contract_year: Option<ContractYear>,

    /// Column key, prefixed with '-' for descending
    #[arg(long, allow_hyphen_values = true)]
    sort: Option<Sort>,

    /// 0-based page
    #[arg(long)]
    page: Option<u32>,

    /// Row ids to hide from the output
    #[arg(long = "exclude")]
    excluded: Vec<u64>,
}

impl FilterArgs {
    /// Actions that turn the default state into the requested one.
    fn into_actions(self, current: Sort) -> Vec<Action> {
        let mut actions = Vec::new();

        if let Some(q) = self.q {
            actions.push(Action::SetSearchTerm(q));
        }
        if let Some(query_type) = self.query_type {
            actions.push(Action::SetQueryType(query_type));
        }
        if let Some(schedule) = self.schedule {
            actions.push(Action::SetSchedule(schedule));
        }
        if !self.education.is_empty() {
            actions.push(Action::SetEducation(self.education));
        }
        if self.min_experience.is_some() || self.max_experience.is_some() {
            actions.push(Action::SetExperienceRange {
                min: self.min_experience,
                max: self.max_experience,
            });
        }
        if self.min_price.is_some() || self.max_price.is_some() {
            actions.push(Action::SetPriceRange {
                min: self.min_price,
                max: self.max_price,
            });
        }
        if let Some(site) = self.site {
            actions.push(Action::SetSite(site));
        }
        if let Some(size) = self.business_size {
            actions.push(Action::SetBusinessSize(size));
        }
        if let Some(year) = self.contract_year {
            actions.push(Action::SetContractYear(year));
        }
        if let Some(sort) = self.sort.filter(|sort| *sort != current) {
            // Toggling the sorted column flips it; anything else starts ascending
            actions.push(Action::ToggleSort(sort.column));
            if sort.descending && sort.column != current.column {
                actions.push(Action::ToggleSort(sort.column));
            }
        }
        for id in self.excluded {
            actions.push(Action::ExcludeRow(RowId(id)));
        }
        // Paging last: facet changes reset the page
        if let Some(page) = self.page {
            actions.push(Action::SetPage(page));
        }

        actions
    }
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Print the table as pipe-separated columns.
fn print_view(view: &ResultView) {
    let header: Vec<&str> = view.columns.iter().map(|column| column.title()).collect();
    println!("id | {}", header.join(" | "));
    for row in &view.rows {
        println!("{} | {}", row.id, row.cells.join(" | "));
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Schedules => {
            let api = HttpApi::new(&config.api)?;
            let schedules = api.get_schedules().await?;
            for meta in schedules.iter().filter(|meta| !meta.is_any()) {
                println!("{}\t{}", meta.schedule, meta.label());
            }
            log::info!("{} schedules", schedules.len());
        }

        Command::Search(filters) => {
            let mut explorer = Explorer::new(HttpApi::new(&config.api)?, &config)?;
            let actions = filters.into_actions(explorer.store().filters().sort);

            let receipt = match explorer.dispatch_all(actions).await {
                Some(receipt) => receipt,
                None => explorer.refresh().await,
            };

            if receipt == Receipt::Failed {
                let message = explorer.store().state().error.clone().unwrap_or_default();
                log::error!("Search failed: {}", message);
                return Err(AppError::Fetch(message));
            }

            let filters = explorer.store().filters();
            if !filters.schedule.is_empty() {
                let schedules = explorer.schedules().await?;
                match find_schedule(&schedules, &filters.schedule) {
                    Some(meta) => log::info!("Schedule: {}", meta.label()),
                    None => log::warn!("Schedule '{}' is not listed by the API", filters.schedule),
                }
            }
            log::debug!("{} active filters", filters.active_facet_count());

            let view = explorer.view();
            print_view(&view);

            let results = &explorer.store().state().results;
            let price = |value: Option<f64>| value.map(format_price).unwrap_or_else(|| "-".into());
            log::info!(
                "{} matches, showing {} ({} hidden); min {} / avg {} / max {}",
                view.total_count,
                view.rows.len(),
                view.hidden_count,
                price(results.minimum),
                price(results.average),
                price(results.maximum)
            );
        }

        Command::CsvUrl(filters) => {
            let api = HttpApi::new(&config.api)?;
            let mut store = Store::new(config.explorer.initial_state()?);
            let current = store.filters().sort;
            // Only the resulting state matters; nothing is fetched
            for action in filters.into_actions(current) {
                store.dispatch(action);
            }
            println!("{}", api.csv_url(&store.query())?);
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            config.explorer.initial_state()?;
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
