use anyhow::Context;
use clap::{ArgGroup, Args, Parser, Subcommand};
use sidediff::app::editor;
use sidediff::app::{self, AppConfig};
use sidediff::config;
use sidediff::diff::DiffAlgorithm;
use sidediff::domain::ViewMode;
#[cfg(feature = "harness")]
use sidediff::harness;
use sidediff::ui::theme;
use std::fs::OpenOptions;
use std::path::PathBuf;

/// Environment variable holding the log filter, e.g. `SIDEDIFF_LOG=debug`.
const LOG_ENV: &str = "SIDEDIFF_LOG";

/// Terminal side-by-side and inline text diff viewer.
#[derive(Debug, Parser)]
#[command(version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Original file. A file picker opens when omitted.
    old: Option<PathBuf>,

    /// Modified file. A file picker opens when omitted.
    new: Option<PathBuf>,

    /// Start in inline mode instead of side-by-side.
    #[arg(long)]
    inline: bool,

    /// Treat lines differing only in whitespace as equal.
    #[arg(long, short = 'w')]
    ignore_whitespace: bool,

    /// Treat lines differing only in letter case as equal.
    #[arg(long, short = 'i')]
    ignore_case: bool,

    /// Line diff algorithm: myers, patience, or lcs.
    #[arg(long, value_parser = parse_algorithm)]
    algorithm: Option<DiffAlgorithm>,

    #[cfg(feature = "harness")]
    /// Render deterministic frames to stdout without entering interactive mode.
    #[arg(long, default_value_t = false)]
    harness_dump: bool,

    #[cfg(feature = "harness")]
    /// Harness frame width.
    #[arg(long, default_value_t = 140)]
    harness_width: u16,

    #[cfg(feature = "harness")]
    /// Harness frame height.
    #[arg(long, default_value_t = 44)]
    harness_height: u16,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inspect or edit sidediff configuration.
    Config(ConfigCommand),
}

#[derive(Debug, Args)]
#[command(group(
    ArgGroup::new("config_action")
        .required(true)
        .multiple(false)
        .args(["edit", "path"])
))]
struct ConfigCommand {
    /// Open the config file in $VISUAL/$EDITOR/nvim/vim/vi.
    #[arg(long)]
    edit: bool,

    /// Print the config file path.
    #[arg(long)]
    path: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Command::Config(command)) = cli.command {
        return handle_config_command(command);
    }

    init_logging()?;

    let config = config::load_or_create()?;
    theme::apply(config.theme);

    #[cfg(feature = "harness")]
    if cli.harness_dump {
        let dump = harness::render_demo_dump(cli.harness_width, cli.harness_height)?;
        println!("{dump}");
        return Ok(());
    }

    let mut options = config.view.diff;
    options.ignore_whitespace |= cli.ignore_whitespace;
    options.ignore_case |= cli.ignore_case;
    if let Some(algorithm) = cli.algorithm {
        options.algorithm = algorithm;
    }
    let mode = if cli.inline {
        ViewMode::Inline
    } else {
        config.view.mode
    };

    log::info!(
        "starting in {} mode with {} diff",
        mode.label(),
        options.algorithm.label()
    );

    app::run(AppConfig {
        old: cli.old,
        new: cli.new,
        mode,
        options,
    })
    .await
}

fn parse_algorithm(raw: &str) -> Result<DiffAlgorithm, String> {
    DiffAlgorithm::parse(raw).ok_or_else(|| format!("unknown diff algorithm `{raw}`"))
}

/// Sends logs to `~/.sidediff/sidediff.log` when `SIDEDIFF_LOG` is set.
/// The terminal belongs to the TUI, so nothing is ever written to stderr.
fn init_logging() -> anyhow::Result<()> {
    if std::env::var_os(LOG_ENV).is_none() {
        return Ok(());
    }

    let path = config::log_path()?;
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::new().filter(LOG_ENV))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn handle_config_command(command: ConfigCommand) -> anyhow::Result<()> {
    let path = config::ensure_config_file()?;

    if command.path {
        println!("{}", path.display());
        return Ok(());
    }

    if command.edit {
        editor::edit_file_with_system_editor(path.as_path())?;
        return Ok(());
    }

    Ok(())
}
