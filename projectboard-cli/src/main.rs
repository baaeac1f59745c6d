use std::fmt::Write as FmtWrite;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use color_eyre::eyre::{Result, WrapErr, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use projectboard::{
    BoardConfig, DEFAULT_MARKUP, DocumentFormat, OutputDestination, OutputOptions, Project,
    ProjectBoard, ProjectBoardUi, ProjectsDocument, TracingNotifier, emit, load_config_file,
};

#[derive(Debug, Parser)]
#[command(
    name = "projectboard",
    version,
    about = "Enter projects in a validated form and move them between active and finished"
)]
struct Cli {
    /// Board config file (.json/.yaml/.toml)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Page markup holding the templates and the host element
    #[arg(short = 'm', long = "markup", value_name = "PATH")]
    markup: Option<PathBuf>,

    /// Title shown at the top of the UI
    #[arg(long = "title", value_name = "TEXT")]
    title: Option<String>,

    /// Where to write the final project list ("-" writes to stdout). Accepts multiple values per flag use.
    #[arg(short = 'o', long = "output", value_name = "DEST", num_args = 1.., action = ArgAction::Append)]
    outputs: Vec<String>,

    /// Emit compact JSON/TOML rather than pretty formatting
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Overwrite output files even if they already exist
    #[arg(short = 'f', long = "force", short_alias = 'y', alias = "yes")]
    force: bool,

    /// Print the rendered page and exit without starting the UI
    #[arg(long = "dump-html")]
    dump_html: bool,

    /// Write logs to this file; filtered by RUST_LOG (default "info")
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if let Some(path) = cli.log_file.as_deref() {
        init_logging(path)?;
    }

    let mut diagnostics = DiagnosticCollector::default();

    let config = load_config(cli.config.as_deref(), &mut diagnostics);
    let markup = load_markup(cli.markup.as_deref(), &mut diagnostics);
    let (output, output_paths) = build_output_options(&cli, &mut diagnostics);
    ensure_output_paths_available(&output_paths, cli.force, &mut diagnostics);

    diagnostics.into_result()?;

    let config = config.unwrap_or_default();
    let markup = markup.unwrap_or_else(|| DEFAULT_MARKUP.to_string());

    if cli.dump_html {
        let board = ProjectBoard::from_markup(&markup, &config, Rc::new(TracingNotifier))
            .wrap_err("failed to parse page markup")?;
        ensure_ready(&board)?;
        println!("{}", board.to_html());
        return Ok(());
    }

    let mut ui = ProjectBoardUi::new(config).with_markup(markup);
    if let Some(title) = cli.title.as_ref() {
        ui = ui.with_title(title.clone());
    }
    let projects = ui.run().map_err(|err| eyre!("{err:#}"))?;
    info!(count = projects.len(), "session finished");

    write_projects(&projects, &output)
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))
}

fn ensure_ready(board: &ProjectBoard) -> Result<()> {
    if board.is_ready() {
        return Ok(());
    }
    let mut body = String::from("failed to build the page:\n");
    for (idx, err) in board.startup_errors().iter().enumerate() {
        let _ = writeln!(body, "  {}. {err}", idx + 1);
    }
    Err(eyre!(body))
}

fn write_projects(projects: &[Project], output: &OutputOptions) -> Result<()> {
    emit(&ProjectsDocument { projects }, output).map_err(|err| eyre!("{err:#}"))
}

fn load_config(
    path: Option<&Path>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<BoardConfig> {
    let path = path?;
    if let ExtensionFormat::UnsupportedFeature {
        format_name,
        feature_flag,
    } = probe_format_from_extension(path)
    {
        diagnostics.push_input(
            "config",
            format!(
                "config '{}' requires {format_name} support, but this build lacks the '{feature_flag}' feature",
                path.display()
            ),
        );
        return None;
    }
    match load_config_file(path) {
        Ok(config) => Some(config),
        Err(err) => {
            diagnostics.push_input("config", format!("{err:#}"));
            None
        }
    }
}

fn load_markup(path: Option<&Path>, diagnostics: &mut DiagnosticCollector) -> Option<String> {
    let path = path?;
    match fs::read_to_string(path) {
        Ok(markup) => Some(markup),
        Err(err) => {
            diagnostics.push_input(
                "markup",
                format!("failed to read file {}: {err}", path.display()),
            );
            None
        }
    }
}

#[derive(Default)]
struct DiagnosticCollector {
    messages: Vec<String>,
}

impl DiagnosticCollector {
    fn push_input(&mut self, label: &str, message: impl Into<String>) {
        self.messages
            .push(format!("input ({label}): {}", message.into()));
    }

    fn push_output(&mut self, message: impl Into<String>) {
        self.messages.push(format!("output: {}", message.into()));
    }

    fn len(&self) -> usize {
        self.messages.len()
    }

    fn into_result(self) -> Result<()> {
        if self.messages.is_empty() {
            return Ok(());
        }
        let mut body = String::from("encountered input/output issues:\n");
        for (idx, msg) in self.messages.iter().enumerate() {
            let _ = writeln!(body, "  {}. {}", idx + 1, msg);
        }
        Err(eyre!(body))
    }
}

/// Destinations default to stdout. Files decide the format through their
/// extension and must agree with each other.
fn build_output_options(
    cli: &Cli,
    diagnostics: &mut DiagnosticCollector,
) -> (OutputOptions, Vec<PathBuf>) {
    let mut destinations = Vec::new();
    for raw in &cli.outputs {
        if raw.trim().is_empty() {
            diagnostics.push_output("output destination cannot be empty");
            continue;
        }
        destinations.push(OutputDestination::parse(raw));
    }
    if destinations.is_empty() {
        destinations.push(OutputDestination::Stdout);
    }

    let file_paths: Vec<PathBuf> = destinations
        .iter()
        .filter_map(|dest| match dest {
            OutputDestination::File(path) => Some(path.clone()),
            OutputDestination::Stdout => None,
        })
        .collect();

    let start = diagnostics.len();
    let format = infer_format_from_files(&file_paths, diagnostics).unwrap_or_default();
    let destinations = if diagnostics.len() > start {
        Vec::new()
    } else {
        destinations
    };

    (
        OutputOptions::new(format)
            .with_pretty(!cli.no_pretty)
            .with_destinations(destinations),
        file_paths,
    )
}

fn infer_format_from_files(
    file_paths: &[PathBuf],
    diagnostics: &mut DiagnosticCollector,
) -> Option<DocumentFormat> {
    let mut detected: Option<DocumentFormat> = None;
    for path in file_paths {
        match probe_format_from_extension(path) {
            ExtensionFormat::Known(format) => match detected {
                Some(existing) if existing != format => diagnostics.push_output(format!(
                    "output file {} uses {format} but other destinations use {existing}; align extensions",
                    path.display()
                )),
                Some(_) => {}
                None => detected = Some(format),
            },
            ExtensionFormat::UnsupportedFeature {
                format_name,
                feature_flag,
            } => diagnostics.push_output(format!(
                "output file {} requires {format_name} support, but this build was compiled without the '{feature_flag}' feature",
                path.display()
            )),
            ExtensionFormat::Unknown => diagnostics.push_output(format!(
                "cannot infer format from output file {}; use .json/.yaml/.toml",
                path.display()
            )),
        }
    }
    detected
}

#[derive(Debug)]
enum ExtensionFormat {
    Known(DocumentFormat),
    #[allow(dead_code)]
    UnsupportedFeature {
        format_name: &'static str,
        feature_flag: &'static str,
    },
    Unknown,
}

fn probe_format_from_extension(path: &Path) -> ExtensionFormat {
    if let Some(format) = DocumentFormat::from_path(path) {
        return ExtensionFormat::Known(format);
    }
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("yaml" | "yml") => ExtensionFormat::UnsupportedFeature {
            format_name: "yaml",
            feature_flag: "yaml",
        },
        Some("toml") => ExtensionFormat::UnsupportedFeature {
            format_name: "toml",
            feature_flag: "toml",
        },
        _ => ExtensionFormat::Unknown,
    }
}

fn ensure_output_paths_available(
    paths: &[PathBuf],
    force: bool,
    diagnostics: &mut DiagnosticCollector,
) {
    if force {
        return;
    }
    for path in paths {
        if path.exists() {
            diagnostics.push_output(format!(
                "file {} already exists (pass --force to overwrite)",
                path.display()
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_outputs_are_recognised() {
        assert!(matches!(
            probe_format_from_extension(Path::new("out.JSON")),
            ExtensionFormat::Known(DocumentFormat::Json)
        ));
        assert!(matches!(
            probe_format_from_extension(Path::new("out.txt")),
            ExtensionFormat::Unknown
        ));
    }

    #[test]
    fn diagnostics_are_numbered() {
        let mut diagnostics = DiagnosticCollector::default();
        diagnostics.push_input("config", "missing");
        diagnostics.push_output("taken");
        let message = diagnostics.into_result().unwrap_err().to_string();
        assert!(message.contains("1. input (config): missing"), "{message}");
        assert!(message.contains("2. output: taken"), "{message}");
    }
}
