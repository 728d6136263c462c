use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use enum_lightsail::aws::client::LightsailClient;
use enum_lightsail::aws::regions;
use enum_lightsail::config::Config;
use enum_lightsail::progress::TracingProgress;
use enum_lightsail::resource::{self, CategoryFlags};
use enum_lightsail::session::FileSession;
use enum_lightsail::summary;
use enum_lightsail::VERSION;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Enumerate Lightsail resources in every region. By default all Lightsail
/// fields are captured; pass one or more field flags to only look at those.
#[derive(Parser, Debug)]
#[command(name = "enum-lightsail", version = VERSION, about, long_about = None)]
struct Args {
    #[command(flatten)]
    fields: CategoryFlags,

    /// Regions to enumerate (comma separated); discovered when omitted
    #[arg(long, value_delimiter = ',')]
    regions: Option<Vec<String>>,

    /// AWS profile to use
    #[arg(long)]
    profile: Option<String>,

    /// Override the Lightsail endpoint for every region
    #[arg(long)]
    endpoint_url: Option<String>,

    /// Session file to store results in
    #[arg(long)]
    session: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Log level for diagnostics on stderr
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Remember profile, regions, endpoint and session path as defaults
    #[arg(long)]
    save_defaults: bool,
}

impl Args {
    /// CLI values take precedence over the config file
    fn apply_to(&self, config: &mut Config) {
        if let Some(profile) = &self.profile {
            config.profile = Some(profile.clone());
        }
        if let Some(regions) = &self.regions {
            config.regions = Some(regions.clone());
        }
        if let Some(endpoint) = &self.endpoint_url {
            config.endpoint_url = Some(endpoint.clone());
        }
        if let Some(session) = &self.session {
            config.session_path = Some(session.clone());
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// RUST_LOG wins over --log-level, `off` included. `None` means no logging.
fn log_filter(level: LogLevel, rust_log: Option<&str>) -> Option<EnvFilter> {
    if let Some(filter) = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return Some(filter);
    }

    let tracing_level = level.to_tracing_level()?;
    Some(EnvFilter::default().add_directive(LevelFilter::from_level(tracing_level).into()))
}

fn setup_logging(
    level: LogLevel,
    log_file: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let Some(filter) = log_filter(level, rust_log.as_deref()) else {
        return Ok(None);
    };

    let Some(log_path) = log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
        return Ok(None);
    };

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr.and(non_blocking))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::debug!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level, args.log_file.as_deref())?;

    let mut config = Config::load();
    args.apply_to(&mut config);

    if args.save_defaults {
        config.save().context("Failed to save config")?;
        tracing::info!("Saved defaults to {:?}", Config::config_path());
    }

    let categories = args.fields.selected();
    let endpoint = config.validated_endpoint()?;
    let profile = config.effective_profile();

    tracing::debug!("enum-lightsail {} (profile: {:?})", VERSION, profile);

    let client =
        LightsailClient::new(profile.as_deref(), endpoint, config.request_timeout()).await?;

    let regions = match config.effective_regions() {
        Some(regions) => regions,
        None => regions::discover_regions(&client).await,
    };

    let mut session = FileSession::open(config.effective_session_path())?;
    tracing::debug!("Using session {} at {:?}", session.id(), session.path());

    let counts = resource::run(
        &client,
        &mut session,
        &categories,
        &regions,
        &TracingProgress,
    )
    .await?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&summary::summary_json(&counts))?
        );
    } else {
        print!("{}", summary::format_summary(&counts));
    }

    Ok(())
}
