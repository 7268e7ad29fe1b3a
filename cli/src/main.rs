use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use dmsuite_canvas::surface::CommandRecorder;
use dmsuite_canvas::{
    DesignDocument, DesignRenderer, DocError, EngineConfig, EngineCore, LayerKind, LayerPainter, Point, RenderError,
    ResizeMode, View, hit, render,
};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod script;

const DEFAULT_LOG_FILTER: &str = "dmsuite=info,dmsuite_canvas=info";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid document: {0}")]
    Doc(#[from] DocError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

#[derive(Parser, Debug)]
#[command(name = "dmsuite", about = "Inspect, replay and render DMSuite design documents")]
struct Cli {
    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Command,
}

/// Interaction settings shared by every subcommand.
#[derive(Args, Debug)]
struct EngineArgs {
    /// CSS pixels per canvas pixel; screen coordinates are divided by this.
    #[arg(long, global = true, env = "DMSUITE_SCALE", default_value_t = 1.0)]
    scale: f64,

    #[arg(long, global = true, env = "DMSUITE_MIN_LAYER_SIZE")]
    min_layer_size: Option<f64>,

    /// Handle hit slop in screen pixels.
    #[arg(long, global = true, env = "DMSUITE_HANDLE_TOLERANCE")]
    handle_tolerance: Option<f64>,

    #[arg(long, global = true, env = "DMSUITE_DUPLICATE_OFFSET")]
    duplicate_offset: Option<f64>,

    #[arg(long, global = true, env = "DMSUITE_RESIZE_MODE", value_enum, default_value_t = ResizeModeArg::Origin)]
    resize_mode: ResizeModeArg,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum ResizeModeArg {
    Origin,
    OppositeEdge,
}

impl EngineArgs {
    fn config(&self) -> EngineConfig {
        let defaults = EngineConfig::default();
        EngineConfig {
            min_layer_size: self.min_layer_size.unwrap_or(defaults.min_layer_size),
            handle_tolerance_px: self.handle_tolerance.unwrap_or(defaults.handle_tolerance_px),
            duplicate_offset: self.duplicate_offset.unwrap_or(defaults.duplicate_offset),
            resize_mode: match self.resize_mode {
                ResizeModeArg::Origin => ResizeMode::Origin,
                ResizeModeArg::OppositeEdge => ResizeMode::OppositeEdge,
            },
        }
    }

    fn core(&self) -> EngineCore {
        let mut core = EngineCore::with_config(self.config());
        core.view = View::new(self.scale);
        core
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List layers, topmost first.
    Layers {
        #[arg(help = "Document path, or - for stdin")]
        doc: String,
    },
    /// Print the id of the topmost visible layer under a screen point.
    Hit { doc: String, x: f64, y: f64 },
    /// Feed a JSON array of input events through the engine.
    Replay {
        doc: String,
        script: PathBuf,
        #[arg(long, help = "Write the resulting document here instead of stdout")]
        output: Option<PathBuf>,
    },
    /// Print the draw commands for a document as JSON.
    Render {
        doc: String,
        #[arg(long, default_value_t = 1080.0)]
        width: f64,
        #[arg(long, default_value_t = 1080.0)]
        height: f64,
        #[arg(long, default_value_t = false, help = "Include the selection overlay")]
        overlay: bool,
    },
}

fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();
    let core = cli.engine.core();

    match cli.command {
        Command::Layers { doc } => run_layers(&load_document(&doc)?),
        Command::Hit { doc, x, y } => run_hit(&core, &load_document(&doc)?, Point::new(x, y)),
        Command::Replay { doc, script, output } => run_replay(core, load_document(&doc)?, &script, output.as_deref()),
        Command::Render { doc, width, height, overlay } => {
            run_render(&core, &load_document(&doc)?, width, height, overlay)
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run_layers(doc: &DesignDocument) -> Result<(), CliError> {
    let rows: Vec<Value> = doc
        .layers_top_down()
        .map(|layer| {
            json!({
                "id": layer.id,
                "name": layer.name,
                "type": kind_name(&layer.kind),
                "x": layer.x,
                "y": layer.y,
                "width": layer.width,
                "height": layer.height,
                "visible": layer.visible,
                "locked": layer.locked,
                "selected": doc.selection() == Some(&layer.id),
            })
        })
        .collect();
    print_json(&Value::Array(rows))
}

fn run_hit(core: &EngineCore, doc: &DesignDocument, screen_pt: Point) -> Result<(), CliError> {
    let pt = core.view.screen_to_canvas(screen_pt);
    let id = hit::hit_test(doc, pt);
    tracing::debug!(x = pt.x, y = pt.y, hit = ?id, "hit test");
    print_json(&json!({ "id": id, "x": pt.x, "y": pt.y }))
}

fn run_replay(
    mut core: EngineCore,
    doc: DesignDocument,
    script_path: &Path,
    output: Option<&Path>,
) -> Result<(), CliError> {
    let raw = fs::read_to_string(script_path)
        .map_err(|source| CliError::Read { path: script_path.to_path_buf(), source })?;
    let events: Vec<script::ScriptEvent> = serde_json::from_str(&raw)?;

    let result = script::replay(&mut core, doc, &events);
    tracing::info!(
        events = events.len(),
        changes = result.changes,
        prevented = result.prevented,
        cursor = %result.cursor,
        "replay finished"
    );

    let json = result.doc.to_json_pretty()?;
    match output {
        Some(path) => {
            fs::write(path, json).map_err(|source| CliError::Write { path: path.to_path_buf(), source })?;
            tracing::info!(path = %path.display(), "wrote document");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_render(core: &EngineCore, doc: &DesignDocument, width: f64, height: f64, overlay: bool) -> Result<(), CliError> {
    let mut recorder = CommandRecorder::new();
    LayerPainter.render(&mut recorder, doc, width, height)?;
    if overlay {
        render::draw_selection_overlay(&mut recorder, doc, core.view.scale());
    }
    print_json(&serde_json::to_value(recorder.commands())?)
}

fn load_document(path: &str) -> Result<DesignDocument, CliError> {
    let raw = if path == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read { path: PathBuf::from("<stdin>"), source })?;
        buf
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read { path: PathBuf::from(path), source })?
    };
    let doc = DesignDocument::from_json(&raw)?;
    tracing::debug!(layers = doc.len(), "loaded document");
    Ok(doc)
}

fn kind_name(kind: &LayerKind) -> &'static str {
    match kind {
        LayerKind::Text { .. } => "text",
        LayerKind::Image { .. } => "image",
        LayerKind::Shape { .. } => "shape",
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    Ok(())
}
