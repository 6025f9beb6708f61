//! `cma` - evaluate cloud maturity assessments from the command line
//!
//! Runs without network access: inline organization data is served by an
//! in-memory lookup, and the critical-issues and cost services report
//! unavailable so their fallbacks apply. Logs go to stderr, the report to
//! stdout.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cma_core::{AssessmentEngine, EngineConfig, EngineServices, EvaluationInput};
use cma_model::{Language, Locale, OrganizationId};
use cma_scoring::TimeEstimate;
use cma_services::{EstimateFormatter, StaticOrganizationLookup};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Organization id used when the input carries a profile but no reference
const INLINE_ORGANIZATION: &str = "inline";

#[derive(Debug, Parser)]
#[command(name = "cma", version, about = "Cloud maturity assessment scoring and roadmap estimation")]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score an assessment and print the report as JSON
    Evaluate {
        /// Assessment input file (JSON)
        #[arg(long)]
        input: PathBuf,

        /// Engine configuration (.toml, .yaml or .yml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Language for cost currency and estimate text (en, ja)
        #[arg(long, default_value = "en")]
        language: Language,
    },
    /// Print the effective configuration as TOML
    Config {
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_format);

    match cli.command {
        Command::Evaluate {
            input,
            config,
            language,
        } => evaluate(&input, config.as_deref(), language).await,
        Command::Config { config } => {
            let config = load_config(config.as_deref())?;
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}

fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

async fn evaluate(input: &Path, config: Option<&Path>, language: Language) -> Result<()> {
    let config = load_config(config)?;
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("reading assessment from {}", input.display()))?;
    let EvaluationInput {
        mut assessment,
        organization,
    } = EvaluationInput::from_json_str(&raw)
        .with_context(|| format!("parsing assessment from {}", input.display()))?;

    let mut lookup = StaticOrganizationLookup::new();
    if let Some(profile) = organization {
        let id = match assessment.organization_id() {
            Some(id) => id.clone(),
            None => {
                let id = OrganizationId::from(INLINE_ORGANIZATION);
                assessment = assessment.with_organization(id.clone());
                id
            }
        };
        lookup = lookup.with_profile(id, profile);
    }

    let services = EngineServices::offline()
        .with_organizations(Arc::new(lookup))
        .with_formatter(Arc::new(PlainFormatter));
    let engine = AssessmentEngine::new(config, services)?;

    let report = engine
        .evaluate_with_cost(&assessment, Locale::for_language(language))
        .await;
    let text = engine.describe_estimate(report.time_estimate.as_ref(), language);
    let report = report.with_time_estimate_text(text);
    tracing::debug!(assessment = %assessment.id(), "report ready");

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Plain-text estimate rendering for terminal output
struct PlainFormatter;

impl EstimateFormatter for PlainFormatter {
    fn format_estimate(&self, estimate: &TimeEstimate, language: Language) -> String {
        match (estimate, language) {
            (TimeEstimate::AtMaximum { level }, Language::En) => {
                format!("Already at the highest maturity level ({level})")
            }
            (TimeEstimate::AtMaximum { level }, Language::Ja) => {
                format!("既に最高の成熟度レベルです ({level})")
            }
            (TimeEstimate::Projected(p), Language::En) => format!(
                "About {} weeks ({} days) to reach {}",
                p.weeks, p.calendar_days, p.target_level
            ),
            (TimeEstimate::Projected(p), Language::Ja) => format!(
                "{}まで約{}週間 ({}日)",
                p.target_level, p.weeks, p.calendar_days
            ),
        }
    }
}
