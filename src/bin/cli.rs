// src/bin/cli.rs

//! OpenSmell CLI
//!
//! Search the odorant catalog by smell or by chemical, page through results
//! and fetch structure depictions.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use opensmell::{
    error::Result,
    models::{ChemicalRecord, Config, RecentSearches, SearchMode, SearchRequest},
    search::{DEFAULT_TOP_DESCRIPTORS, Paginator},
    services::{Catalog, RenderOutcome, RenderSession, RendererHandle},
    storage::LocalDataset,
    utils::log as console,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// OpenSmell - odorant chemical catalog
#[derive(Parser, Debug)]
#[command(
    name = "opensmell",
    version,
    about = "Search odorant chemicals by smell or by structure"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "opensmell.toml")]
    config: PathBuf,

    /// Dataset file, overriding catalog.dataset_path
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search by odor descriptors or chemical identity
    Search {
        /// odor (comma separated descriptors) or chemical (name, CID, SMILES)
        #[arg(short, long, default_value = "chemical")]
        mode: SearchMode,

        /// Number of pages to reveal
        #[arg(short, long, default_value_t = 1)]
        pages: usize,

        /// Reveal every result
        #[arg(long)]
        all: bool,

        /// Query text
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show a single compound
    Show {
        /// Compound id, e.g. 440917 or CID_440917
        #[arg(value_parser = parse_cid_arg)]
        cid: u64,

        /// Write the structure depiction to this SVG file
        #[arg(long)]
        svg: Option<PathBuf>,
    },

    /// Most frequent odor descriptors
    Stats {
        #[arg(long, default_value_t = DEFAULT_TOP_DESCRIPTORS)]
        top: usize,
    },

    /// Interactive search shell
    Browse,

    /// Validate configuration and dataset
    Validate,

    /// Show dataset info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
    console::init(level);
}

/// Accepts `440917`, `CID_440917` or `cid_440917`.
fn parse_cid(value: &str) -> Option<u64> {
    let value = value.trim();
    let digits = match value.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("cid_") => &value[4..],
        _ => value,
    };
    digits.parse().ok().filter(|id| *id > 0)
}

fn parse_cid_arg(value: &str) -> std::result::Result<u64, String> {
    parse_cid(value).ok_or_else(|| format!("'{value}' is not a compound id"))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);
    config.validate()?;

    let base = cli.config.parent().unwrap_or(Path::new("."));
    let dataset_path = cli
        .dataset
        .clone()
        .unwrap_or_else(|| config.dataset_path(base));
    log::debug!("Using dataset {}", dataset_path.display());

    let source = LocalDataset::new(&dataset_path);
    let catalog = Catalog::open(&source, &config.search).await?;

    match cli.command {
        Command::Search {
            mode,
            pages,
            all,
            query,
        } => {
            let request = SearchRequest::new(mode, query.join(" "));
            run_search(&catalog, &config, &request, pages, all);
        }

        Command::Show { cid, svg } => {
            let Some(record) = catalog.lookup(cid) else {
                console::info(&format!("CID_{cid} doesn't exist in the catalog."));
                return Ok(());
            };
            print_record(record, &config);

            if let Some(path) = svg {
                let handle = RendererHandle::http(config.render.clone());
                match handle.render(&record.structure).await {
                    Ok(depiction) => {
                        tokio::fs::write(&path, depiction.fit_to_container().svg()).await?;
                        console::item(&format!("Depiction written to {}", path.display()));
                    }
                    Err(e) => console::notice(&format!(
                        "{}: structure unavailable ({})",
                        record.display_id(),
                        e
                    )),
                }
            }
        }

        Command::Stats { top } => {
            let stats = catalog.stats();
            console::header(&format!("Top {} odor descriptors", top));
            for (rank, (descriptor, count)) in stats.top(top).into_iter().enumerate() {
                console::item(&format!("{:>3}. {:<24} {}", rank + 1, descriptor, count));
            }
            console::summary(
                "Descriptors",
                &[
                    ("Compounds", catalog.len().to_string()),
                    ("Distinct descriptors", stats.total_descriptors().to_string()),
                ],
            );
        }

        Command::Browse => {
            browse(&catalog, &config).await?;
        }

        Command::Validate => {
            console::info(&format!("Configuration OK ({})", cli.config.display()));
            console::info(&format!(
                "Dataset OK: {} records in {}",
                catalog.len(),
                dataset_path.display()
            ));
        }

        Command::Info => {
            let stats = catalog.stats();
            console::summary(
                "Catalog",
                &[
                    ("Config", cli.config.display().to_string()),
                    ("Dataset", dataset_path.display().to_string()),
                    ("Compounds", catalog.len().to_string()),
                    ("Distinct descriptors", stats.total_descriptors().to_string()),
                    ("Result cap", config.search.result_cap.to_string()),
                    ("Page size", config.search.items_per_page.to_string()),
                    ("Renderer", config.render.endpoint.clone()),
                ],
            );
        }
    }

    Ok(())
}

fn format_row(record: &ChemicalRecord, config: &Config) -> String {
    if config.output.result_template.trim().is_empty() {
        console::record_row(record)
    } else {
        console::record_line(
            record,
            &config.output.result_template,
            &config.links.reference_url,
        )
    }
}

fn print_record(record: &ChemicalRecord, config: &Config) {
    console::header(&record.name);
    for (label, value) in console::record_fields(record, &config.links.reference_url) {
        console::item(&format!("{:<12} {}", label, value));
    }
}

fn print_rows(rows: &[&ChemicalRecord], config: &Config) {
    for record in rows {
        console::item(&format_row(record, config));
    }
}

fn print_more_hint(pages: &Paginator<&ChemicalRecord>) {
    if pages.has_more() {
        console::info(&console::more_hint(
            pages.total() - pages.visible_count(),
            pages.next_batch_len(),
        ));
    }
}

fn run_search(
    catalog: &Catalog,
    config: &Config,
    request: &SearchRequest,
    pages: usize,
    all: bool,
) {
    let outcome = catalog.search(request);
    if outcome.is_empty() {
        console::no_results(request.mode.as_str(), &request.query);
        return;
    }
    if let Some(advisory) = outcome.advisory() {
        console::notice(&advisory.to_string());
    }

    let mut window = outcome.paginate();
    let mut revealed = 1;
    while (all || revealed < pages) && window.reveal_more() {
        revealed += 1;
    }

    console::header(&format!(
        "{} result(s) for {} '{}'",
        outcome.total(),
        request.mode,
        request.query
    ));
    print_rows(window.visible_slice(), config);
    print_more_hint(&window);
}

/// State of the interactive shell.
struct Browser<'a> {
    catalog: &'a Catalog,
    config: &'a Config,
    session: RenderSession,
    history: RecentSearches,
    window: Option<Paginator<&'a ChemicalRecord>>,
}

impl<'a> Browser<'a> {
    fn new(catalog: &'a Catalog, config: &'a Config) -> Self {
        Self {
            catalog,
            config,
            session: RenderSession::new(
                RendererHandle::http(config.render.clone()),
                config.render.max_concurrent,
            ),
            history: RecentSearches::new(config.search.recent_capacity),
            window: None,
        }
    }

    async fn search(&mut self, request: SearchRequest) {
        self.session.reset();
        self.history.record(request.clone());

        let catalog = self.catalog;
        let outcome = catalog.search(&request);
        if let Some(advisory) = outcome.advisory() {
            console::notice(&advisory.to_string());
        }
        if outcome.is_empty() {
            console::no_results(request.mode.as_str(), &request.query);
            self.window = None;
            return;
        }

        let window = outcome.paginate();
        console::header(&format!(
            "{} result(s) for {} '{}'",
            outcome.total(),
            request.mode,
            request.query
        ));
        print_rows(window.visible_slice(), self.config);
        print_more_hint(&window);

        let outcomes = self
            .session
            .render_priority(window.visible_slice(), self.config.search.priority_renders)
            .await;
        report_failures(&outcomes);
        self.window = Some(window);
    }

    fn more(&mut self) {
        let Some(window) = self.window.as_mut() else {
            console::info("No active search");
            return;
        };
        let before = window.visible_count();
        if !window.reveal_more() {
            console::info("All results are already shown");
            return;
        }
        print_rows(&window.visible_slice()[before..], self.config);
        print_more_hint(window);
    }

    fn less(&mut self) {
        let Some(window) = self.window.as_mut() else {
            console::info("No active search");
            return;
        };
        if !window.can_collapse() {
            console::info("Already showing the first page");
            return;
        }
        window.collapse();
        let visible: HashSet<u64> = window.visible_slice().iter().map(|r| r.id).collect();
        self.session.retain(&visible);
        print_rows(window.visible_slice(), self.config);
        print_more_hint(window);
    }

    async fn render(&self, id: u64, path: Option<&str>) -> Result<()> {
        let Some(record) = self.catalog.lookup(id) else {
            console::info(&format!("CID_{id} doesn't exist in the catalog."));
            return Ok(());
        };

        // An explicit request retries an earlier failure
        match self.session.retry(id, &record.structure).await {
            RenderOutcome::Rendered(depiction) => {
                console::info(&format!(
                    "Rendered {} ({} bytes)",
                    record.display_id(),
                    depiction.svg().len()
                ));
                if let Some(path) = path {
                    tokio::fs::write(path, depiction.svg()).await?;
                    console::item(&format!("Depiction written to {}", path));
                }
            }
            RenderOutcome::Failed(message) => {
                console::notice(&format!("{}: structure unavailable ({})", record.display_id(), message));
            }
            RenderOutcome::InFlight => {
                console::info(&format!("{} is already being rendered", record.display_id()));
            }
            RenderOutcome::Discarded => {}
        }
        Ok(())
    }

    fn history(&self) {
        if self.history.is_empty() {
            console::info("No searches yet");
            return;
        }
        console::header("Recent searches");
        for entry in self.history.iter() {
            console::item(&format!(
                "{}  {:<8} {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.request.mode,
                entry.request.query
            ));
        }
    }
}

fn report_failures(outcomes: &[(u64, RenderOutcome)]) {
    for (id, outcome) in outcomes {
        if let RenderOutcome::Failed(message) = outcome {
            console::notice(&format!("CID_{id}: structure unavailable ({message})"));
        }
    }
}

const BROWSE_HELP: &[&str] = &[
    "odor <terms>      search by comma separated odor descriptors",
    "chem <query>      search by name, CID or SMILES",
    "?type=..&q=..     search with a URL-style query string",
    "more | less       reveal the next batch / back to the first page",
    "show <cid>        compound details",
    "render <cid> [f]  render a structure, optionally writing SVG to f",
    "history           recent searches",
    "quit",
];

fn prompt() -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "opensmell> ")?;
    stdout.flush()?;
    Ok(())
}

async fn browse(catalog: &Catalog, config: &Config) -> Result<()> {
    let mut browser = Browser::new(catalog, config);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    console::info(&format!(
        "Browsing {} compounds. Type 'help' for commands.",
        catalog.len()
    ));

    loop {
        prompt()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "quit" | "exit" => break,
            "help" => BROWSE_HELP.iter().for_each(|h| console::item(h)),
            "odor" => browser.search(SearchRequest::odor(rest)).await,
            "chem" | "chemical" => browser.search(SearchRequest::chemical(rest)).await,
            "more" => browser.more(),
            "less" => browser.less(),
            "history" => browser.history(),
            "show" => match parse_cid(rest) {
                Some(id) => match catalog.lookup(id) {
                    Some(record) => print_record(record, config),
                    None => console::info(&format!("CID_{id} doesn't exist in the catalog.")),
                },
                None => console::error(&format!("'{rest}' is not a compound id")),
            },
            "render" => {
                let (cid, path) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let path = Some(path.trim()).filter(|p| !p.is_empty());
                match parse_cid(cid) {
                    Some(id) => {
                        if let Err(e) = browser.render(id, path).await {
                            console::error(&e.to_string());
                        }
                    }
                    None => console::error(&format!("'{cid}' is not a compound id")),
                }
            }
            _ if line.starts_with('?') => {
                browser.search(SearchRequest::from_query_string(line)).await;
            }
            other => console::error(&format!("Unknown command '{other}'. Type 'help' for commands.")),
        }
    }

    Ok(())
}
