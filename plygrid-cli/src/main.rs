//! Command-line front-end for plygrid
//!
//! Drives a viewer session from the terminal: search a directory for point
//! clouds, render a selection into grid payloads, and apply a reference
//! camera to every panel.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use plygrid_visualization::{Event, PanelId, Session, SessionUpdate, ViewerConfig};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "plygrid", version, about = "Browse point cloud files as a synchronised grid")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List point cloud files under a root directory
    Discover(SearchArgs),
    /// Build grid payloads for a selection
    Render(RenderArgs),
    /// Build figures with a reference camera applied to every panel
    Sync {
        #[command(flatten)]
        render: RenderArgs,
        /// JSON relayout record of the reference panel (contains "scene.camera")
        #[arg(long)]
        camera: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Directory to search recursively
    #[arg(long)]
    root: String,
    /// Keep files whose relative path contains this text (case-insensitive)
    #[arg(long, default_value = "")]
    keyword: String,
    /// File extension of point cloud files
    #[arg(long, default_value = "ply")]
    extension: String,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    search: SearchArgs,
    /// Files to show, in order. Defaults to every discovered file.
    #[arg(long = "select")]
    select: Vec<PathBuf>,
    #[arg(long, default_value_t = 1.0)]
    marker_size: f32,
    #[arg(long, default_value_t = NonZeroUsize::new(3).unwrap_or(NonZeroUsize::MIN))]
    columns: NonZeroUsize,
    /// Write JSON here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Discover(args) => {
            let mut session = Session::new(config_for(&args, None, None));
            let options = search(&mut session, args)?;
            write_json(&options, None)
        }
        Command::Render(args) => {
            let (_, output, update) = prepare(args)?;
            match update {
                SessionUpdate::Grid(grid) => write_json(&grid, output),
                other => bail!("unexpected session update: {:?}", other),
            }
        }
        Command::Sync { render, camera } => {
            let relayout: serde_json::Value = serde_json::from_reader(
                File::open(&camera).with_context(|| format!("opening {}", camera.display()))?,
            )
            .with_context(|| format!("parsing {}", camera.display()))?;

            let (mut session, output, _) = prepare(render)?;
            session.handle(Event::CameraReported { panel: PanelId::REFERENCE, relayout });
            if session.cameras().reference().is_none() {
                info!("No camera in {}, panels keep their own view", camera.display());
            }
            match session.handle(Event::SyncCameras) {
                SessionUpdate::Figures(figures) => write_json(&figures, output),
                SessionUpdate::NoUpdate => bail!("nothing selected to sync"),
                other => bail!("unexpected session update: {:?}", other),
            }
        }
    }
}

fn config_for(
    search: &SearchArgs,
    columns: Option<NonZeroUsize>,
    marker_size: Option<f32>,
) -> ViewerConfig {
    let defaults = ViewerConfig::default();
    ViewerConfig {
        columns: columns.unwrap_or(defaults.columns),
        default_marker_size: marker_size.unwrap_or(defaults.default_marker_size),
        extension: search.extension.clone(),
        ..defaults
    }
}

fn search(session: &mut Session, args: SearchArgs) -> Result<plygrid_visualization::SelectionOptions> {
    match session.handle(Event::Search { root: args.root, keyword: args.keyword }) {
        SessionUpdate::Options(options) => {
            info!("{}", options.status);
            Ok(options)
        }
        other => bail!("unexpected session update: {:?}", other),
    }
}

/// Search, then apply the selection with the requested marker size. Returns
/// the session and the grid update produced by the selection.
fn prepare(args: RenderArgs) -> Result<(Session, Option<PathBuf>, SessionUpdate)> {
    let config = config_for(&args.search, Some(args.columns), Some(args.marker_size));
    let mut session = Session::new(config);
    let options = search(&mut session, args.search)?;

    let selection = if args.select.is_empty() {
        options.options.iter().map(|o| PathBuf::from(&o.value)).collect()
    } else {
        args.select
    };
    let update = session.handle(Event::SelectionChanged(selection));
    Ok((session, args.output, update))
}

fn write_json<T: Serialize>(value: &T, output: Option<PathBuf>) -> Result<()> {
    let mut writer: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    if let Some(path) = output {
        info!("Wrote {}", path.display());
    }
    Ok(())
}
