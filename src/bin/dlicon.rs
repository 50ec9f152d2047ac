use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use dlicon::{
    ActivationKind, AnimationController, AnimatorConfig, DownloadEvent, DownloadTracker,
    PngSequenceAdapter, Surface,
};

#[derive(Parser, Debug)]
#[command(name = "dlicon", version)]
struct Cli {
    /// Animator config JSON (defaults apply to missing fields).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render consecutive frames of one animation as PNGs.
    Frames(FramesArgs),
    /// Replay a timed activation script through the scheduler.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// download, error, complete or progress.
    #[arg(long)]
    kind: String,

    /// Progress value in [0, 1] (progress only).
    #[arg(long)]
    value: Option<f64>,

    /// Number of frames (defaults to one full loop).
    #[arg(long)]
    count: Option<u32>,

    /// Output directory.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Script JSON: `[{"at_ms": 0, "kind": "download"}, ...]`.
    #[arg(long)]
    script: PathBuf,

    /// Output directory for frames and reset markers.
    #[arg(long)]
    out: PathBuf,
}

#[derive(serde::Deserialize, Debug)]
struct ScriptStep {
    at_ms: u64,
    #[serde(flatten)]
    action: ScriptAction,
}

#[derive(serde::Deserialize, Debug)]
#[serde(untagged)]
enum ScriptAction {
    Event { event: DownloadEvent },
    Activate { kind: String, value: Option<f64> },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Frames(args) => cmd_frames(&config, args),
        Command::Simulate(args) => cmd_simulate(config, args),
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AnimatorConfig> {
    let base = match path {
        Some(p) => AnimatorConfig::from_path(p)?,
        None => AnimatorConfig::default(),
    };
    Ok(base.with_env_overrides()?)
}

fn cmd_frames(config: &AnimatorConfig, args: FramesArgs) -> anyhow::Result<()> {
    let activation = ActivationKind::parse(&args.kind, args.value)?;
    let mut anim = dlicon::Animation::for_activation(activation, config);
    let mut surface = Surface::new(config.icon_size());
    let count = args.count.unwrap_or(anim.total_frames());

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    for i in 0..count {
        let frame = anim.draw(&mut surface, 1.0)?;
        let path = args.out.join(format!("frame_{i:05}.png"));
        image::save_buffer_with_format(
            &path,
            &frame.to_straight_rgba8(),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
    }

    eprintln!("wrote {count} frames of {} to {}", anim.kind(), args.out.display());
    Ok(())
}

fn cmd_simulate(config: AnimatorConfig, args: SimulateArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read script '{}'", args.script.display()))?;
    let mut steps: Vec<ScriptStep> = serde_json::from_str(&text)
        .with_context(|| format!("parse script '{}'", args.script.display()))?;
    steps.sort_by_key(|s| s.at_ms);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("build tokio runtime")?;

    runtime.block_on(async move {
        let adapter = PngSequenceAdapter::new(&args.out)?;
        let poll = config.tick_interval();
        let controller = AnimationController::new(config, adapter)?;
        let mut tracker = DownloadTracker::new();
        let start = tokio::time::Instant::now();

        for step in &steps {
            tokio::time::sleep_until(start + Duration::from_millis(step.at_ms)).await;
            match &step.action {
                ScriptAction::Event { event } => {
                    tracker.dispatch(&controller, event);
                }
                ScriptAction::Activate { kind, value } => controller.activate(kind, *value)?,
            }
        }

        loop {
            tokio::time::sleep(poll).await;
            let snap = controller.snapshot_state();
            if !(snap.frame_task || snap.deadline_task || snap.fade_task) {
                break;
            }
        }

        eprintln!(
            "wrote {} entries to {}",
            controller.adapter().written(),
            controller.adapter().dir().display()
        );
        anyhow::Ok(())
    })
}
