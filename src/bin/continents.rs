use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use continent_explorer::api::DEFAULT_BASE_URL;
use continent_explorer::render::{render_buttons, render_text};
use continent_explorer::stats::{ContinentSummary, dataset_report};
use continent_explorer::{Client, Dataset, Explorer, Mode, storage};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "continents",
    version,
    about = "Browse continents and their countries, optionally enriched with capitals and flags"
)]
struct Cli {
    /// Continent table (JSON). Defaults to the bundled table.
    #[arg(long, global = true, requires = "countries")]
    continents: Option<PathBuf>,
    /// Country table (JSON). Defaults to the bundled table.
    #[arg(long, global = true, requires = "continents")]
    countries: Option<PathBuf>,
    /// Base URL of the REST Countries API.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    api_base: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List continents (optionally filtered by name).
    List(ListArgs),
    /// Select a continent and print its statistics and countries.
    Show(ShowArgs),
    /// Report country rows without a continent and count mismatches.
    Check,
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Case-insensitive substring of the continent name.
    #[arg(short, long, default_value = "")]
    search: String,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Continent code (e.g., AF, EU, SA)
    code: String,
    /// Fetch capital and flag for every country.
    #[arg(short, long, default_value_t = false)]
    enrich: bool,
    /// Narrow the continent buttons by name.
    #[arg(short, long, default_value = "")]
    search: String,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, default_value = "en")]
    locale: String,
    /// Save the country listing to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let dataset = match (&cli.continents, &cli.countries) {
        (Some(a), Some(b)) => Dataset::load(a, b)?,
        _ => Dataset::bundled().context("bundled tables")?,
    };
    match cli.cmd {
        Command::List(args) => cmd_list(dataset, args),
        Command::Show(args) => cmd_show(dataset, &cli.api_base, args),
        Command::Check => cmd_check(dataset),
    }
}

fn cmd_list(dataset: Dataset, args: ListArgs) -> Result<()> {
    let mut explorer = Explorer::new(dataset, Mode::Plain);
    explorer.set_search_term(args.search);
    for c in explorer.visible_continents() {
        println!("{}  {}", c.code, c.name);
    }
    Ok(())
}

fn cmd_show(dataset: Dataset, api_base: &str, args: ShowArgs) -> Result<()> {
    let mode = if args.enrich { Mode::Enriched } else { Mode::Plain };
    let mut explorer = Explorer::new(dataset, mode);
    explorer.set_search_term(args.search);

    if let Some(req) = explorer.select(&args.code) {
        let client = Client::with_base_url(api_base)?;
        eprintln!("Fetching details for {} countries...", req.countries.len());
        let outcome = req.run(&client);
        explorer.complete(outcome);
    }

    if explorer.selected_continent().is_none() {
        println!("{}", render_buttons(&explorer));
        eprintln!("No continent with code {:?}", args.code);
        return Ok(());
    }

    print!("{}", render_text(&explorer, &args.locale));

    if let Some(continent) = explorer.selected_continent() {
        let summary = ContinentSummary::new(continent, explorer.countries());
        if explorer.error_message().is_none() && !summary.count_matches() {
            eprintln!(
                "note: {} declares {} countries, {} listed",
                summary.code, summary.declared_countries, summary.listed_countries
            );
        }
    }

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        let rows = explorer.countries();
        match fmt.as_str() {
            "csv" => storage::save_csv(rows, path)?,
            "json" => storage::save_json(rows, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    }

    Ok(())
}

fn cmd_check(dataset: Dataset) -> Result<()> {
    let report = dataset_report(&dataset);
    for c in &report.orphans {
        println!(
            "orphan: {} ({}) references unknown continent {}",
            c.name, c.code, c.continent
        );
    }
    for m in &report.mismatches {
        println!(
            "count: {} declares {} countries, {} listed",
            m.code, m.declared, m.listed
        );
    }
    if report.is_clean() {
        println!(
            "ok: {} continents, {} countries",
            dataset.continents().len(),
            dataset.countries().len()
        );
    }
    Ok(())
}
