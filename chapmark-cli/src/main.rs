//! chapmark CLI Tool
//!
//! Reads an editor project, maps its colored markers onto the final timeline
//! and writes a chapter list ready to paste into a video description.

use anyhow::{Context, Result};
use chapmark_core::probe::EDITOR_PROCESS_NAME;
use chapmark_core::{
    extract_chapters, probe_editor, Error, ExtractorConfig, ProbeStatus, ProjectsRoot,
    DEFAULT_INTRO_LABEL, DEFAULT_TARGET_COLOR,
};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default output file name, placed next to the executable
const OUTPUT_FILE: &str = "YouTube_Chapters.txt";

#[derive(Parser)]
#[command(name = "chapmark")]
#[command(about = "Turn colored editor markers into a timestamped chapter list")]
#[command(version)]
struct Cli {
    /// Project name (prompted for when omitted)
    project: Option<String>,

    /// Folder containing one subfolder per project
    #[arg(long, env = "CHAPMARK_PROJECTS_ROOT")]
    projects_root: Option<PathBuf>,

    /// Read this project content file directly instead of looking up a project
    #[arg(long, conflicts_with = "project")]
    file: Option<PathBuf>,

    /// Output file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Marker color that designates a chapter
    #[arg(long, default_value = DEFAULT_TARGET_COLOR)]
    color: String,

    /// Label of the chapter always placed at 00:00:00
    #[arg(long, default_value = DEFAULT_INTRO_LABEL)]
    intro: String,

    /// Do not check whether the editor is running
    #[arg(long)]
    no_detect: bool,

    /// Exit without waiting for ENTER
    #[arg(long)]
    no_pause: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    println!("chapmark v{}", env!("CARGO_PKG_VERSION"));
    println!("------------------------");

    let code = match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    };

    if !cli.no_pause {
        print!("\nPress ENTER to close...");
        io::stdout().flush().context("Failed to flush stdout")?;
        read_line().context("Failed to read from stdin")?;
    }

    Ok(code)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let content_path = match &cli.file {
        Some(file) => file.clone(),
        None => {
            let root = match &cli.projects_root {
                Some(dir) => ProjectsRoot::new(dir),
                None => ProjectsRoot::from_env()?,
            };
            tracing::info!("projects root: {}", root.path().display());

            let project = match &cli.project {
                Some(name) => name.clone(),
                None => {
                    let detected = detect_project(&root, cli.no_detect);
                    prompt_project(detected.as_deref())?
                }
            };

            println!("Processing project: {}...", project.trim());
            root.locate(&project)?
        }
    };

    let config = ExtractorConfig {
        target_color: cli.color.clone(),
        intro_label: cli.intro.clone(),
    };

    let chapters = extract_chapters(&content_path, &config)?;

    let output_path = match &cli.output {
        Some(path) => path.clone(),
        None => default_output_path(),
    };
    chapters.write_to(&output_path)?;

    println!("\nDone! Exported to:\n{}", output_path.display());
    println!("\nPreview:\n");
    println!("{}", chapters.render());

    Ok(())
}

/// Suggests the most recently modified project when the editor is open
fn detect_project(root: &ProjectsRoot, skip: bool) -> Option<String> {
    if skip {
        return None;
    }

    match probe_editor(EDITOR_PROCESS_NAME) {
        ProbeStatus::Running => {
            let latest = root.latest_project();
            if let Some(name) = &latest {
                println!("Detected open project: {}", name);
            }
            latest
        }
        ProbeStatus::NotRunning => None,
        ProbeStatus::Unavailable => {
            println!("Process listing unavailable, skipping auto-detect.");
            println!("   Pass the project name as an argument or enter it below.");
            None
        }
    }
}

fn prompt_project(detected: Option<&str>) -> Result<String> {
    print!(
        "Enter CapCut project name [{}]: ",
        detected.unwrap_or("None")
    );
    io::stdout().flush().context("Failed to flush stdout")?;

    let answer = read_line().context("Failed to read project name")?;
    choose_project(&answer, detected).ok_or_else(|| Error::NoProjectSelected.into())
}

/// Typed input wins; an empty answer falls back to the detected project
fn choose_project(answer: &str, detected: Option<&str>) -> Option<String> {
    let answer = answer.trim();
    if !answer.is_empty() {
        return Some(answer.to_string());
    }
    detected.map(str::to_string)
}

fn read_line() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

fn default_output_path() -> PathBuf {
    let dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(OUTPUT_FILE)
}

fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<Error>() {
        Some(Error::MissingConfiguration { var }) => {
            println!("Error: {} is not set.", var);
            println!("   Use --projects-root or --file to point at the project.");
        }
        Some(Error::NoProjectSelected) => println!("Error: No project name provided."),
        Some(Error::NotFound(path)) => {
            println!("Error: project file not found:\n{}", path.display())
        }
        Some(Error::Parse { path, source }) => {
            println!("Error: {} is not a valid project file:\n{}", path.display(), source)
        }
        Some(other) => println!("Error: {}", other),
        None => println!("Error: {:#}", err),
    }
    tracing::debug!("run failed: {:?}", err);
}
