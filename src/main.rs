use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use cv_match::{
    AnalysisClient, AnalysisController, AnalysisResult, ClientConfig, InputCapture,
    SubmitOutcome, TerminalSurface,
};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "cvmatch")]
#[command(about = "Score a CV against a job description")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    overrides: Overrides,
}

#[derive(Args)]
struct Overrides {
    /// Base URL of the scoring service
    #[arg(long, global = true)]
    service_url: Option<String>,

    /// Display language (en, fr)
    #[arg(long, global = true)]
    lang: Option<String>,

    /// Score animation tick in milliseconds (0 disables the animation)
    #[arg(long, global = true)]
    tick_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Command {
    /// Submit a CV and a job description for scoring
    Analyze {
        /// CV file (.pdf or .docx)
        #[arg(long)]
        cv: Option<PathBuf>,
        /// Job description text
        #[arg(long, conflicts_with = "job_file")]
        job: Option<String>,
        /// Read the job description from a file
        #[arg(long)]
        job_file: Option<PathBuf>,
    },
    /// Render a saved service response without calling the service
    Render { result: PathBuf },
}

impl Overrides {
    fn apply(&self, config: &mut ClientConfig) {
        if let Some(url) = &self.service_url {
            config.service_url = url.clone();
        }
        if let Some(lang) = &self.lang {
            config.language = cv_match::utils::normalize_language(Some(lang));
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
    }
}

/// Saved results are shown settled; only live analyses count up
fn animation_tick(command: &Command, config: &ClientConfig) -> Duration {
    match command {
        Command::Render { .. } => Duration::ZERO,
        Command::Analyze { .. } => config.tick_interval(),
    }
}

fn init_logging(log_path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::load()?;
    cli.overrides.apply(&mut config);
    init_logging(&config.log_path)?;

    info!("Scoring service: {}{}", config.service_url, config.analyze_endpoint);
    info!("Language: {}", config.language);

    let labels = config.labels();
    let client = AnalysisClient::from_config(&config)?;
    let surface = TerminalSurface::new(std::io::stdout(), labels);
    let tick = animation_tick(&cli.command, &config);
    let controller = AnalysisController::new(client, surface, labels, tick);

    match cli.command {
        Command::Analyze { cv, job, job_file } => {
            let mut input = InputCapture::new(labels);
            if let Some(path) = cv {
                input.select_path(&path).await?;
            }
            controller.surface().show_file_label(input.file_label())?;

            match (job, job_file) {
                (Some(text), _) => input.set_job_description(text),
                (None, Some(path)) => input.load_job_description(&path).await?,
                (None, None) => {}
            }

            let outcome = controller.submit(&input).await;
            controller.surface().present().await?;

            match outcome {
                SubmitOutcome::Rendered => Ok(()),
                SubmitOutcome::Invalid(e) => anyhow::bail!("Submission rejected: {}", e),
                SubmitOutcome::Failed(e) => anyhow::bail!("Analysis failed: {}", e),
                SubmitOutcome::Ignored => anyhow::bail!("Analysis already in progress"),
            }
        }
        Command::Render { result } => {
            let content = tokio::fs::read_to_string(&result)
                .await
                .with_context(|| format!("Failed to read result file: {}", result.display()))?;
            let parsed: AnalysisResult = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse result file: {}", result.display()))?;

            controller.display(parsed);
            controller.surface().present().await
        }
    }
}
