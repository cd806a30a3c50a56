use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use intake::theme::{self, JsonFileStorage, Theme, ThemeStore};
use intake::{
    ConfigError, DocumentPolicy, EventLoop, FileIntakeController, IntakeConfig, IntakeEvent, IntakePolicy,
    SourceFile, ThemeError, format_size,
};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

const FALLBACK_MIME: &str = "application/octet-stream";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("theme store failed: {0}")]
    Theme(#[from] ThemeError),
    #[error("missing theme file; pass --store or set INTAKE_THEME_FILE")]
    MissingThemeFile,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "intake", about = "Drive the upload, theme, and size helpers from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Offer files to an intake widget and print the resulting view state.
    Check(CheckCommand),
    /// Print human-readable sizes for byte counts.
    Size(SizeCommand),
    /// Show or change the persisted theme preference.
    Theme(ThemeCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WidgetKind {
    Spreadsheet,
    Avatar,
}

#[derive(Args, Debug)]
struct CheckCommand {
    #[arg(long, value_enum, default_value_t = WidgetKind::Spreadsheet)]
    kind: WidgetKind,

    /// Use the file picker path instead of a drag-and-drop.
    #[arg(long)]
    select: bool,

    /// Override the spreadsheet size limit in bytes.
    #[arg(long)]
    max_bytes: Option<u64>,

    /// Override the spreadsheet extensions, e.g. `--extensions csv,tsv`.
    #[arg(long, value_delimiter = ',')]
    extensions: Vec<String>,

    #[arg(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct SizeCommand {
    #[arg(required = true)]
    bytes: Vec<u64>,
}

#[derive(Args, Debug)]
struct ThemeCommand {
    #[arg(long, env = "INTAKE_THEME_FILE")]
    store: Option<PathBuf>,

    /// Treat the system as preferring dark mode.
    #[arg(long)]
    system_dark: bool,

    #[command(subcommand)]
    action: Option<ThemeAction>,
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Toggle,
    Set {
        #[arg(value_enum)]
        theme: ThemeArg,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(value: ThemeArg) -> Self {
        match value {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Check(check) => run_check(check).await,
        Command::Size(size) => {
            run_size(&size);
            Ok(())
        }
        Command::Theme(cmd) => run_theme(cmd),
    }
}

async fn run_check(check: CheckCommand) -> Result<(), CliError> {
    let mut config = IntakeConfig::from_env()?;
    if let Some(max_bytes) = check.max_bytes {
        config.max_bytes = max_bytes;
    }
    if !check.extensions.is_empty() {
        config.allowed_extensions = DocumentPolicy::new(&check.extensions, config.max_bytes).allowed_extensions().to_vec();
    }

    let files = check.files.iter().map(|path| read_source_file(path)).collect::<Result<Vec<_>, _>>()?;

    let report = match check.kind {
        WidgetKind::Spreadsheet => offer(FileIntakeController::spreadsheet(&config), files, check.select).await,
        WidgetKind::Avatar => offer(FileIntakeController::avatar(), files, check.select).await,
    };

    print_json(&report)
}

async fn offer<P: IntakePolicy>(controller: FileIntakeController<P>, files: Vec<SourceFile>, select: bool) -> Value {
    let mut event_loop = EventLoop::new(controller);
    if select {
        event_loop.dispatch(IntakeEvent::ManualSelect(files));
    } else {
        event_loop.dispatch(IntakeEvent::DragEnter);
        event_loop.dispatch(IntakeEvent::Drop(files));
    }
    let handled = event_loop.run_until_idle().await;
    tracing::debug!(handled, "intake idle");

    let controller = event_loop.controller();
    let payload = controller.payload();
    json!({
        "view": controller.view(),
        "payload": {
            "field": payload.field(),
            "file": payload.file().map(|file| file.name.clone()),
        },
    })
}

fn read_source_file(path: &Path) -> Result<SourceFile, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })?;
    let name = path.file_name().map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy()).into_owned();
    let mime = infer::get(&bytes).map_or(FALLBACK_MIME, |kind| kind.mime_type());
    Ok(SourceFile::new(name, mime, bytes))
}

fn run_size(size: &SizeCommand) {
    for bytes in &size.bytes {
        println!("{bytes}\t{}", format_size(*bytes));
    }
}

fn run_theme(cmd: ThemeCommand) -> Result<(), CliError> {
    let path = match cmd.store {
        Some(path) => path,
        None => IntakeConfig::from_env()?.theme_file.ok_or(CliError::MissingThemeFile)?,
    };
    theme::install_global(ThemeStore::init(JsonFileStorage::new(path), cmd.system_dark)?)?;

    match cmd.action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            theme::with_global(ThemeStore::toggle)??;
        }
        ThemeAction::Set { theme: choice } => {
            theme::with_global(|store| store.set(choice.into()))??;
        }
    }

    let (current, user_chosen, root_class) =
        theme::with_global(|store| (store.theme(), store.user_chosen(), store.root_class()))?;
    print_json(&json!({ "theme": current, "user_chosen": user_chosen, "root_class": root_class }))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
