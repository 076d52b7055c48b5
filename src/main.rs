//! cellframe - tabular data visualisation for notebook cells.
//!
//! Installs visualisation plugins into the notebook data directory and emits
//! the scripts that display tables with them.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cellframe::{App, Config, Frame, Javascript, JsValue, Labels};

/// Tabular data visualisation for notebook cells
#[derive(Parser)]
#[command(name = "cellframe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file (defaults to .cellframe.toml or the user config)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Packaged static-asset tree
    #[arg(long, global = true, env = "CELLFRAME_STATIC_ROOT")]
    static_root: Option<String>,

    /// Deployment base below the root, also the URL prefix of installed assets
    #[arg(long, global = true, env = "CELLFRAME_BASE")]
    base: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install every plugin into the deployment root
    Install {
        /// Deployment root (defaults to the notebook data directory)
        #[arg(short, long, env = "CELLFRAME_ROOT")]
        root: Option<String>,
    },

    /// Print the script enabling every plugin
    Enable {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List registered plugins
    Plugins,

    /// Render a JSON table as a DataTables grid
    Table {
        #[command(flatten)]
        render: RenderArgs,
    },

    /// Render a JSON table as a pivot table
    Pivot {
        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show configuration
    Config {
        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(clap::Args)]
struct RenderArgs {
    /// JSON table (`{"columns": [...], "rows": [...]}` or a list of records); `-` for stdin
    data: String,

    /// Column label (column=label)
    #[arg(short, long = "label", value_parser = parse_pair)]
    labels: Vec<(String, String)>,

    /// Options object, as JSON text or a path to a JSON file
    #[arg(short, long)]
    options: Option<String>,

    /// Option set to a raw script fragment (key=fragment)
    #[arg(long = "raw", value_parser = parse_pair)]
    raw: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Script text
    Text,
    /// Display bundle keyed by MIME type
    Json,
}

fn parse_pair(value: &str) -> Result<(String, String), String> {
    value
        .split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{value}'"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose { EnvFilter::new("debug") } else { EnvFilter::new("warn") };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    match &cli.command {
        Commands::Install { root } => {
            cmd_install(&cli, root.clone())?;
        }
        Commands::Enable { format } => {
            cmd_enable(&cli, *format)?;
        }
        Commands::Plugins => {
            cmd_plugins(&cli)?;
        }
        Commands::Table { render } => {
            cmd_render(&cli, render, RenderKind::Table)?;
        }
        Commands::Pivot { render } => {
            cmd_render(&cli, render, RenderKind::Pivot)?;
        }
        Commands::Config { path } => {
            cmd_config(&cli, *path)?;
        }
        Commands::Completions { shell } => {
            cmd_completions(*shell);
        }
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum RenderKind {
    Table,
    Pivot,
}

/// Load configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load()?,
    };

    if let Some(static_root) = &cli.static_root {
        config.assets.static_root = Some(static_root.clone());
    }
    if let Some(base) = &cli.base {
        config.assets.base = base.clone();
    }

    Ok(config)
}

fn load_app(cli: &Cli) -> Result<App> {
    let config = load_config(cli)?;
    let static_root = config.assets.static_root();
    App::new(config).with_context(|| format!("Failed to load plugins from {}", static_root.display()))
}

/// Install plugins.
fn cmd_install(cli: &Cli, root: Option<String>) -> Result<()> {
    let app = load_app(cli)?;

    let root = root.map_or_else(|| app.deployment_root(), PathBuf::from);
    let copied =
        app.install(Some(root.clone())).with_context(|| format!("Failed to install into {}", root.display()))?;

    println!("Installed {} plugins ({} files) into {}", app.plugins.len(), copied, root.display());
    Ok(())
}

/// Print the activation script for every plugin.
fn cmd_enable(cli: &Cli, format: OutputFormat) -> Result<()> {
    let app = load_app(cli)?;
    print_payload(&app.enable(), format)
}

/// List registered plugins.
fn cmd_plugins(cli: &Cli) -> Result<()> {
    let app = load_app(cli)?;

    for (name, plugin) in app.plugins.iter() {
        let deps = if plugin.deps().is_empty() { "-".to_string() } else { plugin.deps().join(", ") };
        println!("{name:<12} {}  deps: {deps}", plugin.to_url(plugin.main()));
    }
    println!("\nTotal: {} plugins", app.plugins.len());

    Ok(())
}

/// Render a table.
fn cmd_render(cli: &Cli, args: &RenderArgs, kind: RenderKind) -> Result<()> {
    let app = load_app(cli)?;

    let text = if args.data == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(&args.data).with_context(|| format!("Failed to read {}", args.data))?
    };
    let frame = Frame::from_json(&text).context("Failed to parse table")?;

    let labels: Labels = args.labels.iter().cloned().collect();
    let options = load_options(args)?;

    let rendered = match kind {
        RenderKind::Table => app.data_table(&frame, Some(&labels), options)?,
        RenderKind::Pivot => app.pivot_table(&frame, Some(&labels), options)?,
    };

    print_payload(rendered.script(), args.format)
}

/// Build the options object from `--options` and `--raw`.
fn load_options(args: &RenderArgs) -> Result<Option<JsValue>> {
    let mut options = match &args.options {
        Some(options) => match serde_json::from_str::<serde_json::Value>(options) {
            Ok(value) => Some(JsValue::from(value)),
            Err(inline_err) => {
                let path = options;
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("--options is neither JSON ({inline_err}) nor a readable file"))?;
                let value: serde_json::Value =
                    serde_json::from_str(&text).with_context(|| format!("Invalid options JSON in {path}"))?;
                Some(JsValue::from(value))
            }
        },
        None => None,
    }
    .filter(|options| !options.is_null());

    if !args.raw.is_empty() {
        let target = options.get_or_insert_with(JsValue::object);
        for (key, fragment) in &args.raw {
            if !target.insert(key.clone(), JsValue::raw(fragment.clone())) {
                anyhow::bail!("--raw requires the options to be a JSON object");
            }
        }
    }

    Ok(options)
}

fn print_payload(payload: &Javascript, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{payload}"),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&payload.to_mime_bundle())?),
    }
    Ok(())
}

/// Show configuration.
fn cmd_config(cli: &Cli, show_path: bool) -> Result<()> {
    if show_path {
        if let Some(path) = Config::config_dir() {
            println!("{}", path.display());
        }
        return Ok(());
    }

    let config = load_config(cli)?;
    let toml = toml::to_string_pretty(&config)?;
    println!("{toml}");

    Ok(())
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "cellframe", &mut io::stdout());
}
