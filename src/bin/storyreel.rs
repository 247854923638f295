use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use storyreel::{
    MurfClient, OpenAiClient, ReelConfig, ReelError, RunState, Scene, SceneSource, ServiceConfig,
};

const DEFAULT_PROMPT: &str = "A bedtime story about a unicorn.";

#[derive(Parser, Debug)]
#[command(name = "storyreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a script for a prompt, generate its images and voice-overs, and render the video.
    Generate(GenerateArgs),
    /// Render a video from a JSON list of `{image_url, voiceover_url}` scenes.
    Assemble(AssembleArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Prompt describing the video.
    #[arg(long, default_value = DEFAULT_PROMPT)]
    prompt: String,

    /// Also write the generated scene list as JSON.
    #[arg(long)]
    save_scenes: Option<PathBuf>,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Parser, Debug)]
struct AssembleArgs {
    /// Scene list JSON.
    #[arg(long)]
    scenes: PathBuf,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Output MP4 path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Output frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// ffmpeg video encoder.
    #[arg(long)]
    codec: Option<String>,

    /// Worker threads for scene preparation.
    #[arg(long)]
    threads: Option<usize>,

    /// Prepare scenes one at a time.
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for per-run temporary storage.
    #[arg(long)]
    temp_root: Option<PathBuf>,
}

impl RunArgs {
    fn resolve(&self) -> anyhow::Result<ReelConfig> {
        let mut cfg = match &self.config {
            Some(path) => ReelConfig::from_path(path)?,
            None => ReelConfig::default(),
        };
        cfg.apply_env()?;
        if let Some(out) = &self.out {
            cfg.output_path = out.clone();
        }
        if let Some(fps) = self.fps {
            cfg.fps = fps;
        }
        if let Some(codec) = &self.codec {
            cfg.video_codec = codec.clone();
        }
        if self.threads.is_some() {
            cfg.threads = self.threads;
        }
        if self.sequential {
            cfg.parallel = false;
        }
        if let Some(root) = &self.temp_root {
            cfg.temp_root = Some(root.clone());
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Assemble(args) => cmd_assemble(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err);
            ExitCode::FAILURE
        }
    }
}

/// Log a failed command once, with the run stage when the error carries one.
fn report_failure(err: &anyhow::Error) {
    match err.downcast_ref::<ReelError>() {
        Some(reel) => match RunState::failed(reel) {
            Some(state) => error!(scene = ?reel.scene(), stage = %state, "{reel}"),
            None => error!("{reel}"),
        },
        None => error!("{err:#}"),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let cfg = args.run.resolve()?;
    let services = ServiceConfig::from_env()?;
    let openai = OpenAiClient::new(&services)?;
    let murf = MurfClient::new(&services)?;

    let scenes = storyreel::build_storyboard(&args.prompt, &openai, &openai, &murf)?;
    if let Some(path) = &args.save_scenes {
        save_scenes(path, &scenes)?;
    }
    render(&scenes, &cfg)
}

fn cmd_assemble(args: AssembleArgs) -> anyhow::Result<()> {
    let cfg = args.run.resolve()?;
    let scenes = Scene::sequence(SceneSource::load_list(&args.scenes)?);
    render(&scenes, &cfg)
}

fn render(scenes: &[Scene], cfg: &ReelConfig) -> anyhow::Result<()> {
    let out = storyreel::generate_video(scenes, cfg)?;
    info!(path = %out.display(), scenes = scenes.len(), "done");
    println!("{}", out.display());
    Ok(())
}

fn save_scenes(path: &Path, scenes: &[Scene]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory '{}'", parent.display()))?;
    }
    let sources: Vec<SceneSource> = scenes.iter().map(Scene::to_source).collect();
    let f = std::fs::File::create(path)
        .with_context(|| format!("create scene list '{}'", path.display()))?;
    serde_json::to_writer_pretty(f, &sources).context("write scene list")?;
    info!(path = %path.display(), "scene list saved");
    Ok(())
}
