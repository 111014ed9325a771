mod builtin;
mod config_commands;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use {
    anyhow::Context as _,
    clap::{Parser, Subcommand},
    sqlx::sqlite::SqlitePoolOptions,
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    minilla_commands::CommandRegistry,
    minilla_config::MinillaConfig,
    minilla_store::{InMemoryReactionWatcherStore, ReactionWatcherStore, SqliteReactionWatcherStore},
};

#[derive(Parser)]
#[command(name = "minilla", about = "Minilla: Discord command and reaction-role bot")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of searching the default locations.
    #[arg(long, global = true, env = "MINILLA_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and serve events (default when no subcommand is provided).
    Run {
        /// Keep reaction watchers in memory instead of the configured database.
        #[arg(long)]
        memory_store: bool,
    },
    /// Validate the configuration and report errors/warnings.
    CheckConfig,
    /// List the built-in commands.
    Commands,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Load the explicit config file if given, otherwise discover one.
fn load_config(path: Option<&Path>) -> anyhow::Result<MinillaConfig> {
    match path {
        Some(path) => {
            let mut config = minilla_config::load_config(path)?;
            minilla_config::apply_env_overrides(&mut config);
            Ok(config)
        },
        None => Ok(minilla_config::discover_and_load()),
    }
}

fn build_registry(config: &MinillaConfig) -> anyhow::Result<CommandRegistry> {
    let mut registry = CommandRegistry::new();
    builtin::register(&mut registry, &config.commands.prefix)
        .context("failed to register built-in commands")?;
    Ok(registry)
}

async fn open_store(
    config: &MinillaConfig,
    memory: bool,
) -> anyhow::Result<Arc<dyn ReactionWatcherStore>> {
    if memory {
        warn!("using in-memory reaction watcher store; watchers are lost on exit");
        return Ok(Arc::new(InMemoryReactionWatcherStore::new()));
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    SqliteReactionWatcherStore::init(&pool)
        .await
        .context("failed to initialise reaction watcher table")?;
    info!(url = %config.database.url, "reaction watcher store ready");
    Ok(Arc::new(SqliteReactionWatcherStore::new(pool)))
}

async fn run(config: MinillaConfig, memory_store: bool) -> anyhow::Result<()> {
    let diagnostics = minilla_config::validate(&config);
    if diagnostics.has_errors() {
        config_commands::print_diagnostics(&diagnostics);
        anyhow::bail!("configuration has errors; run `minilla check-config` for details");
    }
    for d in &diagnostics.diagnostics {
        warn!(path = d.path, "{}", d.message);
    }

    let registry = build_registry(&config)?;
    let store = open_store(&config, memory_store).await?;
    info!(
        commands = registry.len(),
        prefix = %config.commands.prefix,
        "starting discord client"
    );
    minilla_discord::run(Arc::new(config), Arc::new(registry), store).await
}

fn list_commands(config: &MinillaConfig) -> anyhow::Result<()> {
    let registry = build_registry(config)?;
    for command in registry.iter() {
        match command.description() {
            Some(d) => println!("  {:<70} {d}", command.usage()),
            None => println!("  {}", command.usage()),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "minilla starting");

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        None => run(config, false).await,
        Some(Commands::Run { memory_store }) => run(config, memory_store).await,
        Some(Commands::CheckConfig) => config_commands::check(&config),
        Some(Commands::Commands) => list_commands(&config),
    }
}
