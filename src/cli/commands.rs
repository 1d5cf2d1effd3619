//! CLI command definitions for sales-forge.
//!
//! Flags override the configuration assembled from defaults, the optional
//! YAML file and `SALES_FORGE_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing::info;

use crate::derivation::AnomalyPolicy;
use crate::pipeline::{ForgeConfig, ForgeRunner, RunOutcome};

/// Synthetic retail sales dataset generator.
#[derive(Parser)]
#[command(name = "sales-forge")]
#[command(about = "Generate a seasonal retail sales dataset and derive analytics-ready fields")]
#[command(version)]
#[command(
    long_about = "sales-forge synthesizes retail orders across US cities, product categories and customer segments, then cleans them and derives calendar, shipping and profitability fields.\n\nExample usage:\n  sales-forge generate --records 10000 --seed 42 --output ./output --parquet\n  sales-forge clean ./output/raw_sales.csv --policy clamp"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    /// YAML configuration file.
    #[arg(short, long, env = "SALES_FORGE_CONFIG", global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate a raw dataset, clean it and export both.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Clean an existing raw CSV dataset.
    Clean(CleanArgs),
}

/// Arguments for `sales-forge generate`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Number of records to generate.
    #[arg(short = 'n', long)]
    pub records: Option<usize>,

    /// First possible order date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub start: Option<NaiveDate>,

    /// Last possible order date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    pub end: Option<NaiveDate>,

    /// RNG seed.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Generation partitions run in parallel.
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Keep generation order instead of sorting by order date.
    #[arg(long)]
    pub unsorted: bool,

    #[command(flatten)]
    pub cleaning: CleaningArgs,
}

/// Arguments for `sales-forge clean`.
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Raw CSV dataset to clean.
    pub input: PathBuf,

    #[command(flatten)]
    pub cleaning: CleaningArgs,
}

/// Cleaning and output flags shared by both commands.
#[derive(clap::Args, Debug)]
pub struct CleaningArgs {
    /// Anomaly policy: exclude or clamp.
    #[arg(short, long)]
    pub policy: Option<AnomalyPolicy>,

    /// Decimal places of profit margin and revenue per unit.
    #[arg(long)]
    pub decimals: Option<u32>,

    /// Clean batches in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Output directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write the cleaned dataset as Parquet.
    #[arg(long)]
    pub parquet: bool,

    /// Print the run summary as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, crate::records::DATE_FORMAT)
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Parse CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Run the CLI by parsing arguments and executing the command.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli())
}

/// Run the CLI with the parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    let base = load_config(cli.config.as_deref())?;
    match cli.command {
        Commands::Generate(args) => run_generate_command(base, args),
        Commands::Clean(args) => run_clean_command(base, args),
    }
}

/// Defaults, then the YAML file, then environment variables.
fn load_config(path: Option<&Path>) -> anyhow::Result<ForgeConfig> {
    let mut config = match path {
        Some(path) => ForgeConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ForgeConfig::default(),
    };
    config
        .apply_env()
        .context("Invalid SALES_FORGE_* environment variable")?;
    Ok(config)
}

fn apply_generate_args(mut config: ForgeConfig, args: &GenerateArgs) -> ForgeConfig {
    if let Some(records) = args.records {
        config.generator.record_count = records;
    }
    if let Some(start) = args.start {
        config.generator.start_date = start;
    }
    if let Some(end) = args.end {
        config.generator.end_date = end;
    }
    if let Some(seed) = args.seed {
        config.generator.seed = seed;
    }
    if let Some(workers) = args.workers {
        config.generator.workers = workers;
    }
    if args.unsorted {
        config.generator.chronological = false;
    }
    apply_cleaning_args(config, &args.cleaning)
}

fn apply_cleaning_args(mut config: ForgeConfig, args: &CleaningArgs) -> ForgeConfig {
    if let Some(policy) = args.policy {
        config = config.with_policy(policy);
    }
    if let Some(decimals) = args.decimals {
        config = config.with_decimals(decimals);
    }
    if args.parallel {
        config.cleaning.parallel = true;
    }
    if let Some(output) = &args.output {
        config = config.with_output_dir(output.clone());
    }
    if args.parquet {
        config = config.with_parquet(true);
    }
    config
}

fn run_generate_command(base: ForgeConfig, args: GenerateArgs) -> anyhow::Result<()> {
    let config = apply_generate_args(base, &args);
    let runner = ForgeRunner::new(config)?;
    let outcome = runner.run_generate()?;
    report(&outcome, args.cleaning.json)
}

fn run_clean_command(base: ForgeConfig, args: CleanArgs) -> anyhow::Result<()> {
    let config = apply_cleaning_args(base, &args.cleaning);
    let runner = ForgeRunner::new(config)?;
    let outcome = runner
        .run_clean(&args.input)
        .with_context(|| format!("Failed to clean {}", args.input.display()))?;
    report(&outcome, args.cleaning.json)
}

fn report(outcome: &RunOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.summary)?);
        return Ok(());
    }

    let summary = &outcome.summary;
    println!("Raw rows:        {}", summary.raw.rows);
    println!("Cleaned rows:    {}", summary.cleaned.rows);
    println!("Excluded rows:   {}", summary.anomalies.excluded_rows);
    println!("Corrected rows:  {}", summary.anomalies.corrected_rows);
    println!("Total sales:     {:.2}", summary.raw.total_sales);
    println!("Total profit:    {:.2}", summary.raw.total_profit);
    for file in &outcome.files {
        println!("  wrote {}", file.display());
    }
    info!(files = outcome.files.len(), "Done");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_command_defaults() {
        let cli = Cli::try_parse_from(["sales-forge", "generate"]).expect("should parse");
        assert_eq!(cli.log_level, "info");

        match cli.command {
            Commands::Generate(args) => {
                assert!(args.records.is_none());
                assert!(args.seed.is_none());
                assert!(!args.unsorted);
                assert!(args.cleaning.policy.is_none());
                assert!(!args.cleaning.parquet);
                assert!(!args.cleaning.json);

                let config = apply_generate_args(ForgeConfig::default(), &args);
                assert_eq!(config, ForgeConfig::default());
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_command_with_all_options() {
        let args = [
            "sales-forge",
            "generate",
            "-n",
            "500",
            "--start",
            "2024-01-01",
            "--end",
            "2024-06-30",
            "-s",
            "7",
            "-w",
            "4",
            "--unsorted",
            "-p",
            "clamp",
            "--decimals",
            "3",
            "--parallel",
            "-o",
            "./my-output",
            "--parquet",
            "-j",
        ];
        let cli = Cli::try_parse_from(args).expect("should parse");

        match cli.command {
            Commands::Generate(args) => {
                let config = apply_generate_args(ForgeConfig::default(), &args);
                assert_eq!(config.generator.record_count, 500);
                assert_eq!(
                    config.generator.start_date,
                    NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
                );
                assert_eq!(
                    config.generator.end_date,
                    NaiveDate::from_ymd_opt(2024, 6, 30).expect("valid date")
                );
                assert_eq!(config.generator.seed, 7);
                assert_eq!(config.generator.workers, 4);
                assert!(!config.generator.chronological);
                assert_eq!(config.cleaning.policy, AnomalyPolicy::Clamp);
                assert_eq!(config.cleaning.decimals, 3);
                assert!(config.cleaning.parallel);
                assert_eq!(config.output.dir, PathBuf::from("./my-output"));
                assert!(config.output.parquet);
                assert!(args.cleaning.json);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_generate_alias() {
        let cli = Cli::try_parse_from(["sales-forge", "gen", "-n", "2"]).expect("should parse");
        match cli.command {
            Commands::Generate(args) => assert_eq!(args.records, Some(2)),
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_clean_command() {
        let cli = Cli::try_parse_from(["sales-forge", "clean", "raw.csv", "--policy", "exclude"])
            .expect("should parse");
        match cli.command {
            Commands::Clean(args) => {
                assert_eq!(args.input, PathBuf::from("raw.csv"));
                assert_eq!(args.cleaning.policy, Some(AnomalyPolicy::Exclude));
            }
            _ => panic!("Expected Clean command"),
        }
    }

    #[test]
    fn test_clean_requires_input() {
        assert!(Cli::try_parse_from(["sales-forge", "clean"]).is_err());
    }

    #[test]
    fn test_rejects_bad_date_and_policy() {
        assert!(Cli::try_parse_from(["sales-forge", "generate", "--start", "01/01/2024"]).is_err());
        assert!(Cli::try_parse_from(["sales-forge", "generate", "-p", "ignore"]).is_err());
    }

    #[test]
    fn test_load_config_from_yaml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("forge.yaml");
        std::fs::write(&path, "generator:\n  seed: 123\n").expect("write");
        let mut config = ForgeConfig::from_yaml_file(&path).expect("load");
        assert_eq!(config.generator.seed, 123);

        let args = CleaningArgs {
            policy: None,
            decimals: Some(4),
            parallel: false,
            output: None,
            parquet: false,
            json: false,
        };
        config = apply_cleaning_args(config, &args);
        assert_eq!(config.generator.seed, 123);
        assert_eq!(config.cleaning.decimals, 4);
    }
}
