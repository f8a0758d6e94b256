use clap::Parser;
use edgematch::io::load_gray_image;
use edgematch::{
    Detection, EdgeThresholds, LocateConfig, Locator, OverlapBasis, Preprocess, ScaleOrder,
    ScaleRange,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "EdgeMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Mode {
    #[default]
    Locate,
    Best,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OverlapBasisConfig {
    #[default]
    Picked,
    Candidate,
    Union,
}

impl From<OverlapBasisConfig> for OverlapBasis {
    fn from(value: OverlapBasisConfig) -> Self {
        match value {
            OverlapBasisConfig::Picked => OverlapBasis::Picked,
            OverlapBasisConfig::Candidate => OverlapBasis::Candidate,
            OverlapBasisConfig::Union => OverlapBasis::Union,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ScaleOrderConfig {
    #[default]
    Ascending,
    Descending,
}

impl From<ScaleOrderConfig> for ScaleOrder {
    fn from(value: ScaleOrderConfig) -> Self {
        match value {
            ScaleOrderConfig::Ascending => ScaleOrder::Ascending,
            ScaleOrderConfig::Descending => ScaleOrder::Descending,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum PreprocessConfig {
    #[default]
    Edges,
    Intensity,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ScalesJson {
    min: f32,
    max: f32,
    steps: usize,
}

impl Default for ScalesJson {
    fn default() -> Self {
        let scales = ScaleRange::default();
        Self {
            min: scales.min,
            max: scales.max,
            steps: scales.steps,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct CannyJson {
    low: f32,
    high: f32,
}

impl Default for CannyJson {
    fn default() -> Self {
        let thresholds = EdgeThresholds::default();
        Self {
            low: thresholds.low,
            high: thresholds.high,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LocateConfigJson {
    threshold: f32,
    overlap_threshold: f32,
    overlap_basis: OverlapBasisConfig,
    scales: ScalesJson,
    scale_order: ScaleOrderConfig,
    preprocess: PreprocessConfig,
    canny: CannyJson,
    min_var_i: f64,
    parallel: bool,
}

impl Default for LocateConfigJson {
    fn default() -> Self {
        let cfg = LocateConfig::default();
        Self {
            threshold: cfg.threshold,
            overlap_threshold: cfg.overlap_threshold,
            overlap_basis: OverlapBasisConfig::Picked,
            scales: ScalesJson::default(),
            scale_order: ScaleOrderConfig::Ascending,
            preprocess: PreprocessConfig::Edges,
            canny: CannyJson::default(),
            min_var_i: cfg.min_var_i,
            parallel: cfg.parallel,
        }
    }
}

impl From<LocateConfigJson> for LocateConfig {
    fn from(value: LocateConfigJson) -> Self {
        let preprocess = match value.preprocess {
            PreprocessConfig::Edges => Preprocess::Edges(EdgeThresholds {
                low: value.canny.low,
                high: value.canny.high,
            }),
            PreprocessConfig::Intensity => Preprocess::Intensity,
        };
        Self {
            threshold: value.threshold,
            overlap_threshold: value.overlap_threshold,
            overlap_basis: value.overlap_basis.into(),
            scales: ScaleRange::new(value.scales.min, value.scales.max, value.scales.steps),
            scale_order: value.scale_order.into(),
            preprocess,
            min_var_i: value.min_var_i,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    target_path: String,
    template_path: String,
    output_path: Option<String>,
    mode: Mode,
    locate: LocateConfigJson,
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
    score: f32,
}

impl From<Detection> for MatchRecord {
    fn from(value: Detection) -> Self {
        Self {
            x1: value.x1,
            y1: value.y1,
            x2: value.x2,
            y2: value.y2,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    count: usize,
    matches: Vec<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("edgematch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.target_path.is_empty() || config.template_path.is_empty() {
        return Err("target_path and template_path must be set in the config".into());
    }

    let target = load_gray_image(&config.target_path)?;
    let template = load_gray_image(&config.template_path)?;
    let locator = Locator::new().with_config(config.locate.into());

    let detections = match config.mode {
        Mode::Locate => locator.locate(target.view(), template.view())?,
        Mode::Best => locator
            .best_match(target.view(), template.view())?
            .into_iter()
            .collect(),
    };
    tracing::info!(count = detections.len(), "matches reported");

    let matches: Vec<MatchRecord> = detections.into_iter().map(MatchRecord::from).collect();
    let output = Output {
        count: matches.len(),
        matches,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
