use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::assets::fetch::{AssetFetcher, HttpFetcher};
use crate::assets::media::{FfprobeProbe, MediaProbe, ffmpeg_tools_available};
use crate::assets::workspace::{RunWorkspace, SceneAssets};
use crate::clip::builder::ClipBuilder;
use crate::clip::{ClipSummary, SceneClip};
use crate::config::ReelConfig;
use crate::encode::export::VideoExporter;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::TimelineSink;
use crate::foundation::error::{ReelError, ReelResult};
use crate::scene::Scene;
use crate::timeline::Timeline;

/// Stage of a generation run.
///
/// `Collecting -> Fetching(scene) -> Building(scene) -> Assembling -> Exporting -> Done`.
/// Every failure is terminal; there is no retry state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Scene list received, run storage being set up.
    Collecting,
    /// Downloading the assets of a scene.
    Fetching(usize),
    /// Probing a scene's assets and building its clip.
    Building(usize),
    /// Concatenating clips into the timeline.
    Assembling,
    /// Encoding the timeline.
    Exporting,
    /// Output written.
    Done,
    /// A scene's asset could not be downloaded.
    FailedFetch(usize),
    /// A scene's asset could not be decoded.
    FailedDecode(usize),
    /// Assembly or encoding failed.
    FailedExport,
}

impl RunState {
    /// Terminal state reached because of `err`, if the error belongs to a run stage.
    ///
    /// Configuration, validation, and service errors happen outside a run and map to `None`.
    pub fn failed(err: &ReelError) -> Option<Self> {
        match err {
            ReelError::AssetFetch { scene, .. } => scene.0.map(Self::FailedFetch),
            ReelError::AssetDecode { scene, .. } => scene.0.map(Self::FailedDecode),
            ReelError::EmptyTimeline | ReelError::VideoEncode(_) => Some(Self::FailedExport),
            _ => None,
        }
    }

    /// Whether no further transition can happen.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Done | Self::FailedFetch(_) | Self::FailedDecode(_) | Self::FailedExport
        )
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collecting => f.write_str("collecting"),
            Self::Fetching(i) => write!(f, "fetching scene {i}"),
            Self::Building(i) => write!(f, "building scene {i}"),
            Self::Assembling => f.write_str("assembling"),
            Self::Exporting => f.write_str("exporting"),
            Self::Done => f.write_str("done"),
            Self::FailedFetch(i) => write!(f, "failed fetching scene {i}"),
            Self::FailedDecode(i) => write!(f, "failed decoding scene {i}"),
            Self::FailedExport => f.write_str("failed exporting"),
        }
    }
}

/// Outcome of a successful run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RunReport {
    /// Where the video was written, if the sink wrote a file.
    pub output_path: Option<PathBuf>,
    /// Total video length in seconds.
    pub total_secs: u64,
    /// Per-scene timing, in timeline order.
    pub clips: Vec<ClipSummary>,
}

/// Drives scenes through fetch, build, assembly, and export.
pub struct Pipeline<'a> {
    config: &'a ReelConfig,
    fetcher: &'a dyn AssetFetcher,
    probe: &'a dyn MediaProbe,
}

impl<'a> Pipeline<'a> {
    /// Pipeline using the given collaborators.
    pub fn new(
        config: &'a ReelConfig,
        fetcher: &'a dyn AssetFetcher,
        probe: &'a dyn MediaProbe,
    ) -> Self {
        Self {
            config,
            fetcher,
            probe,
        }
    }

    /// Turn `scenes` into one video pushed through `sink`.
    ///
    /// Scenes are prepared concurrently but the timeline always follows scene order. Any
    /// failure aborts the run; all temporary storage is released before this returns.
    #[tracing::instrument(skip_all, fields(scenes = scenes.len()))]
    pub fn run(&self, scenes: &[Scene], sink: &mut dyn TimelineSink) -> ReelResult<RunReport> {
        let result = self.run_inner(scenes, sink);
        match &result {
            Ok(report) => enter(RunState::Done, report.total_secs),
            Err(err) => match RunState::failed(err) {
                Some(state) => warn!(state = %state, "run failed"),
                None => warn!("run failed"),
            },
        }
        result
    }

    fn run_inner(&self, scenes: &[Scene], sink: &mut dyn TimelineSink) -> ReelResult<RunReport> {
        self.config.validate()?;
        enter(RunState::Collecting, 0);
        if scenes.is_empty() {
            return Err(ReelError::EmptyTimeline);
        }
        check_scene_order(scenes)?;

        let workspace = RunWorkspace::create(self.config.temp_root.as_deref())?;
        let clips = self.prepare_scenes(&workspace, scenes)?;

        enter(RunState::Assembling, 0);
        let timeline = Timeline::assemble(clips)?;
        let total_secs = timeline.total_secs();
        let summaries: Vec<ClipSummary> = timeline.clips().iter().map(SceneClip::summary).collect();

        enter(RunState::Exporting, total_secs);
        let export = VideoExporter::new(self.config).export(timeline, sink)?;

        Ok(RunReport {
            output_path: export.output_path,
            total_secs,
            clips: summaries,
        })
    }

    fn prepare_scenes(
        &self,
        workspace: &RunWorkspace,
        scenes: &[Scene],
    ) -> ReelResult<Vec<SceneClip>> {
        let cancel = AtomicBool::new(false);
        let builder = ClipBuilder::new(self.probe);
        let prepare = |scene: &Scene| -> Option<ReelResult<SceneClip>> {
            if cancel.load(Ordering::Acquire) {
                debug!(scene = scene.index(), "skipped after earlier failure");
                return None;
            }
            let result = self.prepare_scene(workspace, builder, scene);
            if result.is_err() {
                cancel.store(true, Ordering::Release);
            }
            Some(result)
        };

        // Indexed collect keeps slot `i` for scene `i` whatever the completion order.
        let slots: Vec<Option<ReelResult<SceneClip>>> = if self.config.parallel && scenes.len() > 1
        {
            let pool = build_thread_pool(self.config.threads)?;
            pool.install(|| scenes.par_iter().map(prepare).collect())
        } else {
            scenes.iter().map(prepare).collect()
        };

        let mut clips = Vec::with_capacity(slots.len());
        let mut first_err = None;
        for slot in slots {
            match slot {
                Some(Ok(clip)) => clips.push(clip),
                Some(Err(err)) => {
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
                None => {}
            }
        }
        if let Some(err) = first_err {
            return Err(err);
        }
        if clips.len() != scenes.len() {
            return Err(ReelError::validation(
                "internal error: scene preparation cancelled without a failure",
            ));
        }
        Ok(clips)
    }

    fn prepare_scene(
        &self,
        workspace: &RunWorkspace,
        builder: ClipBuilder<'_>,
        scene: &Scene,
    ) -> ReelResult<SceneClip> {
        let index = scene.index();
        debug!(state = %RunState::Fetching(index), "run state");
        let storage = workspace.scene(index)?;
        let assets = SceneAssets::fetch(
            storage,
            self.fetcher,
            scene.image_url(),
            scene.voiceover_url(),
        )?;

        debug!(state = %RunState::Building(index), "run state");
        builder.build(assets)
    }
}

/// Generate the video for `scenes` with the production fetcher, probe, and `ffmpeg` sink.
///
/// Returns the path of the written MP4. Fails with [`ReelError::Config`] before any download
/// when `ffmpeg` or `ffprobe` is missing from `PATH`.
pub fn generate_video(scenes: &[Scene], config: &ReelConfig) -> ReelResult<PathBuf> {
    config.validate()?;
    if scenes.is_empty() {
        return Err(ReelError::EmptyTimeline);
    }
    if !ffmpeg_tools_available() {
        return Err(ReelError::config("ffmpeg and ffprobe must be on PATH"));
    }
    let fetcher = HttpFetcher::new(config.fetch_timeout())?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts {
        out_path: config.output_path.clone(),
        overwrite: config.overwrite,
    });
    let report = Pipeline::new(config, &fetcher, &FfprobeProbe).run(scenes, &mut sink)?;
    report
        .output_path
        .ok_or_else(|| ReelError::video_encode("ffmpeg sink reported no output file"))
}

fn enter(state: RunState, total_secs: u64) {
    info!(state = %state, total_secs, "run state");
}

fn check_scene_order(scenes: &[Scene]) -> ReelResult<()> {
    for pair in scenes.windows(2) {
        if pair[1].index() <= pair[0].index() {
            return Err(ReelError::validation(format!(
                "scenes must be in strictly increasing index order (scene {} after {})",
                pair[1].index(),
                pair[0].index()
            )));
        }
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> ReelResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(ReelError::config("'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("storyreel-scene-{i}"));
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| ReelError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
