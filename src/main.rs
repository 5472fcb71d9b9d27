//! covid-dashboard: summarise a COVID-19 surveillance table under a set of filters

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;

use covid_dashboard::filter::{AgeRange, FilterParams, Selection, apply_filters, option_lists};
use covid_dashboard::loader::DatasetCache;
use covid_dashboard::models::{Outcome, PatientType, Sex};
use covid_dashboard::stats::DashboardSummary;
use covid_dashboard::synth::generate_raw_records;
use covid_dashboard::utils::logging::{create_spinner, finish_and_clear, log_warning};
use covid_dashboard::{DashboardConfig, DashboardError, Decoder};

/// Environment variable naming the data file when `--data` is not given
const DATA_ENV: &str = "COVID_DASHBOARD_DATA";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Plain-text report
    Text,
    /// The full summary as JSON
    Json,
}

/// Filter and summarise patient-level COVID-19 surveillance data
#[derive(Parser)]
#[command(name = "covid-dashboard")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the data file (CSV or Parquet)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Generate N synthetic rows instead of reading a file
    #[arg(long, value_name = "N")]
    synthetic: Option<usize>,

    /// Seed for synthetic data
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Keep only these sexes (repeatable)
    #[arg(long, value_parser = parse_label::<Sex>)]
    sex: Vec<Sex>,

    /// Keep only these patient types (repeatable)
    #[arg(long, value_parser = parse_label::<PatientType>)]
    patient_type: Vec<PatientType>,

    /// Lowest age kept
    #[arg(long, default_value_t = AgeRange::default().min)]
    age_min: i32,

    /// Highest age kept
    #[arg(long, default_value_t = AgeRange::default().max)]
    age_max: i32,

    /// Keep only these outcomes (repeatable)
    #[arg(long, value_parser = parse_label::<Outcome>)]
    outcome: Vec<Outcome>,

    /// Keep only rows with a recorded ICU status
    #[arg(long)]
    icu_only: bool,

    /// Minimum number of comorbidities
    #[arg(long, default_value_t = 0)]
    min_comorbidities: u8,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Include the record preview in the text report
    #[arg(long)]
    preview: bool,

    /// Print the selectable filter options and exit
    #[arg(long)]
    options: bool,
}

impl Cli {
    fn filter_params(&self) -> FilterParams {
        FilterParams::new()
            .with_genders(selection(&self.sex))
            .with_patient_types(selection(&self.patient_type))
            .with_age_range(self.age_min, self.age_max)
            .with_outcomes(selection(&self.outcome))
            .with_icu_only(self.icu_only)
            .with_min_comorbidities(self.min_comorbidities)
    }

    /// Config file, then environment, then `--data`, each overriding the last
    fn dashboard_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_json_file(path)
                .with_context(|| format!("failed to read config {}", path.display()))?,
            None => DashboardConfig::default(),
        };
        if let Some(path) = std::env::var_os(DATA_ENV) {
            config = config.with_data_path(path);
        }
        if let Some(path) = &self.data {
            config = config.with_data_path(path);
        }
        Ok(config)
    }
}

fn parse_label<T: FromStr<Err = DashboardError>>(s: &str) -> Result<T, String> {
    s.parse::<T>().map_err(|e| e.to_string())
}

/// No values on the command line means no restriction
fn selection<T: Ord + Copy>(values: &[T]) -> Selection<T> {
    if values.is_empty() {
        Selection::All
    } else {
        values.iter().copied().collect()
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.dashboard_config()?;

    let cache = match cli.synthetic {
        Some(rows) => {
            info!("Generating {rows} synthetic rows (seed {})", cli.seed);
            let decoder = Decoder::new(config.decoder.clone());
            let dataset = decoder.decode(generate_raw_records(rows, cli.seed));
            DatasetCache::preloaded(config.clone(), dataset)
        }
        None => DatasetCache::new(config.clone()),
    };

    let start = Instant::now();
    let spinner = create_spinner(Some("Loading dataset"));
    let loaded = cache.get();
    finish_and_clear(&spinner);
    let dataset = loaded.with_context(|| format!("failed to load {}", cache.data_path().display()))?;
    info!("Dataset ready: {} rows in {:?}", dataset.len(), start.elapsed());

    let params = cli.filter_params();
    if params.age_range.min > params.age_range.max {
        log_warning("Age range is empty, no rows can match", None);
    }

    if cli.options {
        for (category, labels) in option_lists(&dataset, &params) {
            println!("{}: {}", category.label(), labels.join(", "));
        }
        return Ok(());
    }

    let view = apply_filters(&dataset, &params);
    if view.is_empty() {
        log_warning("No records match the current filters", Some(cache.data_path()));
    }

    let summary = DashboardSummary::compute(&view, &config.report);
    match cli.format {
        OutputFormat::Text => print!("{}", summary.render_text(cli.preview)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
    }

    Ok(())
}
