use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use praisenter_render::{
    Canvas, EasingCurve, EasingMode, FrameRGBA, ImageHandle, RenderConfig, TransitionAnimation,
    TransitionDirection, TransitionEngine, TransitionKind, TransitionSettings,
};

#[derive(Parser, Debug)]
#[command(name = "praisenter-render", version)]
struct Cli {
    /// Render configuration JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a transition between two PNGs as a numbered PNG sequence.
    Transition(TransitionArgs),
    /// List transition and easing ids.
    Ids,
}

#[derive(Parser, Debug)]
struct TransitionArgs {
    /// Outgoing frame (omit to transition from nothing).
    #[arg(long)]
    from: Option<PathBuf>,

    /// Incoming frame (omit to transition to nothing).
    #[arg(long)]
    to: Option<PathBuf>,

    /// Transition id (see `ids`).
    #[arg(long, default_value_t = TransitionKind::Fade.id())]
    transition: u32,

    /// Whether the effect reveals the incoming frame or removes the outgoing one.
    #[arg(long, value_enum, default_value_t = DirectionArg::In)]
    direction: DirectionArg,

    /// Easing id (see `ids`).
    #[arg(long, default_value_t = EasingCurve::Linear.id())]
    easing: u32,

    /// Easing mode.
    #[arg(long, value_enum, default_value_t = ModeArg::InOut)]
    mode: ModeArg,

    /// Transition duration in milliseconds.
    #[arg(long, default_value_t = 500)]
    duration_ms: u64,

    /// Output frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Canvas width when neither input image is given.
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height when neither input image is given.
    #[arg(long)]
    height: Option<u32>,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    In,
    Out,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    In,
    Out,
    InOut,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("PRAISENTER_LOG")
                .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("read config '{}'", path.display()))?;
            RenderConfig::from_json_str(&json)?
        }
        None => RenderConfig::default(),
    };
    match cli.cmd {
        Command::Transition(args) => cmd_transition(args, config),
        Command::Ids => {
            cmd_ids();
            Ok(())
        }
    }
}

fn cmd_transition(args: TransitionArgs, config: RenderConfig) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");

    let settings = TransitionSettings {
        transition_id: args.transition,
        direction: match args.direction {
            DirectionArg::In => TransitionDirection::In,
            DirectionArg::Out => TransitionDirection::Out,
        },
        easing_id: args.easing,
        easing_mode: match args.mode {
            ModeArg::In => EasingMode::In,
            ModeArg::Out => EasingMode::Out,
            ModeArg::InOut => EasingMode::InOut,
        },
        duration_ms: args.duration_ms,
    };
    let anim = TransitionAnimation::from_settings(&settings)?;

    let outgoing = args.from.as_deref().map(load_png).transpose()?;
    let incoming = args.to.as_deref().map(load_png).transpose()?;
    let canvas = match (outgoing.as_ref().or(incoming.as_ref()), args.width, args.height) {
        (Some(f), _, _) => f.canvas(),
        (None, Some(w), Some(h)) => Canvas::new(w, h)?,
        (None, _, _) => anyhow::bail!("give --from/--to images or both --width and --height"),
    };
    let engine = TransitionEngine::new(canvas, config)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let frames = (args.duration_ms * u64::from(args.fps)).div_ceil(1000);
    for i in 0..=frames {
        let elapsed = (i * 1000 / u64::from(args.fps)).min(args.duration_ms);
        let frame = anim.render_at(&engine, outgoing.as_ref(), incoming.as_ref(), elapsed);
        let path = args.out_dir.join(format!("frame_{i:04}.png"));
        save_png(&path, &frame)?;
    }

    tracing::info!(
        frames = frames + 1,
        transition = %anim.transition.kind.name(),
        out_dir = %args.out_dir.display(),
        "wrote transition frames"
    );
    Ok(())
}

fn cmd_ids() {
    println!("transitions:");
    for kind in TransitionKind::ALL {
        println!("  {:>3}  {}", kind.id(), kind.name());
    }
    println!("easings:");
    for curve in EasingCurve::ALL {
        println!("  {:>3}  {}", curve.id(), curve.name());
    }
}

fn load_png(path: &Path) -> anyhow::Result<FrameRGBA> {
    let img = image::open(path)
        .with_context(|| format!("read image '{}'", path.display()))?
        .to_rgba8();
    let handle =
        ImageHandle::from_straight_rgba(0, img.width(), img.height(), img.as_raw().as_slice())?;
    Ok(handle.frame().clone())
}

fn save_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.to_straight_rgba(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
