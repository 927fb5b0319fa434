use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y - %H:%M:%S";

#[derive(Parser, Debug)]
#[command(name = "thoughtline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw a text's trace and save it as a PNG.
    Draw(DrawArgs),
    /// Print the derived parameters of a text as JSON.
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TextSource {
    /// Text to interpret.
    #[arg(long)]
    text: Option<String>,

    /// Read the text from a UTF-8 file.
    #[arg(long)]
    text_file: Option<PathBuf>,
}

impl TextSource {
    fn load(&self) -> anyhow::Result<String> {
        match (&self.text, &self.text_file) {
            (Some(t), _) => Ok(t.clone()),
            (None, Some(p)) => std::fs::read_to_string(p)
                .with_context(|| format!("read text file '{}'", p.display())),
            (None, None) => anyhow::bail!("either --text or --text-file is required"),
        }
    }
}

#[derive(Args, Debug)]
struct CanvasOverrides {
    /// JSON config file (canvas size, colors, caption, font, file prefix).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels (overrides the config).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (overrides the config).
    #[arg(long)]
    height: Option<u32>,
}

impl CanvasOverrides {
    fn resolve(&self) -> anyhow::Result<thoughtline::TraceConfig> {
        let mut cfg = match &self.config {
            Some(p) => thoughtline::TraceConfig::from_path(p)?,
            None => thoughtline::TraceConfig::default(),
        };
        if let Some(w) = self.width {
            cfg.width = w;
        }
        if let Some(h) = self.height {
            cfg.height = h;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Parser, Debug)]
struct DrawArgs {
    #[command(flatten)]
    source: TextSource,

    #[command(flatten)]
    canvas: CanvasOverrides,

    /// Directory for timestamped output files.
    #[arg(long, default_value = "generated")]
    out_dir: PathBuf,

    /// Exact output PNG path (skips timestamped naming).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Title drawn at the top of the image (overrides the config).
    #[arg(long)]
    title: Option<String>,

    /// Draw the current local date and time at the bottom of the image.
    #[arg(long)]
    timestamp: bool,

    /// Font file for title, timestamp and placeholder text (overrides the config).
    #[arg(long)]
    font: Option<PathBuf>,
}

impl DrawArgs {
    fn resolve(&self) -> anyhow::Result<thoughtline::TraceConfig> {
        let mut cfg = self.canvas.resolve()?;
        if let Some(title) = &self.title {
            cfg.caption.title = Some(title.clone());
        }
        if self.timestamp {
            cfg.caption.timestamp =
                Some(chrono::Local::now().format(TIMESTAMP_FORMAT).to_string());
        }
        if let Some(font) = &self.font {
            cfg.font = Some(font.clone());
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

#[derive(Parser, Debug)]
struct InspectArgs {
    #[command(flatten)]
    source: TextSource,

    #[command(flatten)]
    canvas: CanvasOverrides,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Draw(args) => cmd_draw(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_draw(args: DrawArgs) -> anyhow::Result<()> {
    let text = args.source.load()?;
    let cfg = args.resolve()?;
    let out = thoughtline::generate_trace_with(&text, &cfg)?;

    let path = match args.out {
        Some(p) => p,
        None => timestamped_path(&args.out_dir, &cfg.file_prefix),
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let img = &out.image;
    image::save_buffer_with_format(
        &path,
        &img.data,
        img.width,
        img.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    tracing::info!(
        path = %path.display(),
        style = out.interpretation.style.name(),
        "saved trace image"
    );
    println!("{}", path.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let text = args.source.load()?;
    let cfg = args.canvas.resolve()?;
    let it = thoughtline::interpret(&text, cfg.canvas()?)?;

    let report = serde_json::json!({
        "features": it.features,
        "mood": it.mood,
        "plan": it.plan,
        "style": it.style,
        "trace": {
            "points": it.trace.len(),
            "fingerprint": format!("{:016x}", it.trace.fingerprint()),
        },
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// `<dir>/<prefix>_<YYYYmmdd_HHMMSS>.png`, with a numeric suffix if that name is taken.
fn timestamped_path(dir: &Path, prefix: &str) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let first = dir.join(format!("{prefix}_{stamp}.png"));
    if !first.exists() {
        return first;
    }
    (1u32..)
        .map(|n| dir.join(format!("{prefix}_{stamp}_{n}.png")))
        .find(|p| !p.exists())
        .unwrap_or(first)
}
