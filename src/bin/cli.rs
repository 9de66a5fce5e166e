use citygrid::{
    render_json, render_text, viewer, CityGridError, ConfigLoader, DataSource, LoadOutcome,
    PoolOverrides, TableLoader, TableModel, ViewerOptions,
};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputMode {
    /// Desktop window with a scrollable grid
    Window,
    /// Text table on stdout
    Table,
    /// JSON array on stdout
    Json,
}

/// Show the world.city table from a pooled MySQL connection
#[derive(Parser, Debug)]
#[command(name = "citygrid", version)]
#[command(about = "Show the world.city table from a pooled MySQL connection", long_about = None)]
struct Cli {
    /// Database host
    #[arg(long, env = "CITYGRID_HOST")]
    host: Option<String>,

    /// Database port
    #[arg(long, env = "CITYGRID_PORT")]
    port: Option<u16>,

    /// Database (schema) name
    #[arg(long, env = "CITYGRID_DATABASE")]
    database: Option<String>,

    /// Database user
    #[arg(short, long, env = "CITYGRID_USER")]
    user: Option<String>,

    /// Database password
    #[arg(long, env = "CITYGRID_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Maximum number of pooled connections
    #[arg(long, env = "CITYGRID_MAX_POOL_SIZE")]
    max_pool_size: Option<u32>,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where to show the result
    #[arg(short, long, value_enum, default_value_t = OutputMode::Window)]
    output: OutputMode,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

impl Cli {
    fn overrides(&self) -> PoolOverrides {
        PoolOverrides {
            host: self.host.clone(),
            port: self.port,
            database: self.database.clone(),
            username: self.user.clone(),
            password: self.password.clone(),
            max_pool_size: self.max_pool_size,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> citygrid::Result<ExitCode> {
    let config = ConfigLoader::new().load(cli.config.as_deref(), cli.overrides())?;
    info!(url = %config.url(), "Using database");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let (model, outcome) = runtime.block_on(async {
        let source = DataSource::connect(&config).await?;
        let mut model = TableModel::new();
        let outcome = TableLoader::new().load_and_close(&source, &mut model).await;
        Ok::<_, CityGridError>((model, outcome))
    })?;
    drop(runtime);

    match cli.output {
        OutputMode::Window => {
            viewer::show(model, outcome, ViewerOptions::default())?;
            Ok(ExitCode::SUCCESS)
        }
        OutputMode::Table => print_headless(&outcome, || Ok(render_text(&model))),
        OutputMode::Json => print_headless(&outcome, || render_json(&model)),
    }
}

fn print_headless<F>(outcome: &LoadOutcome, render: F) -> citygrid::Result<ExitCode>
where
    F: FnOnce() -> citygrid::Result<String>,
{
    if let LoadOutcome::Failed { reason } = outcome {
        eprintln!("{} {}", "load failed:".red().bold(), reason);
        return Ok(ExitCode::FAILURE);
    }
    println!("{}", render()?);
    Ok(ExitCode::SUCCESS)
}
