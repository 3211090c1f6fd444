//! subconv - convert, shift and retime subtitle files.
//!
//! Usage:
//!   subconv convert input.srt output.ass
//!   subconv shift input.ass output.ass --ms -1500
//!   subconv retime input.srt output.srt --in-fps 25 --out-fps 23.976
//!   subconv frames --timestamps timestamps.txt --frame 100 --anchor start

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use subconv_core::config::{ConfigManager, Settings};
use subconv_core::logging::{init_tracing, LogLevel};
use subconv_core::subtitles::{LoadOptions, SubtitleData, SubtitleFormat, WriteOptions};
use subconv_core::timestamps::{is_valid_fps, parse_fps_fraction, FrameTimeline, TimeAnchor};

#[derive(Parser, Debug)]
#[command(name = "subconv", author, version, about, long_about = None)]
struct Cli {
    /// Settings file; created with defaults if it doesn't exist
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert a subtitle file to another format
    Convert(ConvertArgs),
    /// Shift all subtitles by a time or frame offset
    Shift(ShiftArgs),
    /// Rescale times from one frame rate to another
    Retime(RetimeArgs),
    /// Convert between frame numbers and milliseconds
    Frames(FramesArgs),
}

/// Frame timing source for frame-based formats.
#[derive(Args, Debug, Default)]
struct TimingArgs {
    /// Constant frame rate, as a number or a fraction like 24000/1001
    #[arg(long, value_parser = parse_fps, conflicts_with = "timestamps")]
    fps: Option<Fps>,

    /// Timestamp file (format v2) for variable frame rate video
    #[arg(long, value_name = "FILE")]
    timestamps: Option<PathBuf>,
}

impl TimingArgs {
    /// Timeline described by the arguments, if any.
    fn timeline(&self) -> Result<Option<FrameTimeline>> {
        if let Some(path) = &self.timestamps {
            let timeline = FrameTimeline::from_timestamp_file(path, true)
                .with_context(|| format!("Failed to load timestamps from {}", path.display()))?;
            return Ok(Some(timeline));
        }
        self.fps.map(Fps::timeline).transpose()
    }

    /// Apply the timing source to reader and writer options.
    fn apply(&self, load: &mut LoadOptions, write: &mut WriteOptions) -> Result<()> {
        if let Some(fps) = self.fps {
            load.fps = Some(fps.value());
            write.fps = Some(fps.value());
        }
        let timeline = self.timeline()?;
        if timeline.is_some() {
            load.timeline = timeline.clone();
            write.timeline = timeline;
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input subtitle file
    input: PathBuf,

    /// Output subtitle file; its extension selects the format unless --to is given
    output: PathBuf,

    /// Input format (detected from content by default)
    #[arg(long, value_name = "FMT")]
    from: Option<SubtitleFormat>,

    /// Output format
    #[arg(long, value_name = "FMT")]
    to: Option<SubtitleFormat>,

    #[command(flatten)]
    timing: TimingArgs,
}

#[derive(Args, Debug)]
struct ShiftArgs {
    /// Input subtitle file
    input: PathBuf,

    /// Output subtitle file
    output: PathBuf,

    /// Offset in milliseconds (negative moves subtitles earlier)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "frames")]
    ms: Option<i64>,

    /// Offset in frames; needs --fps or --timestamps
    #[arg(long, allow_hyphen_values = true)]
    frames: Option<i64>,

    #[command(flatten)]
    timing: TimingArgs,
}

#[derive(Args, Debug)]
struct RetimeArgs {
    /// Input subtitle file
    input: PathBuf,

    /// Output subtitle file
    output: PathBuf,

    /// Frame rate the times were computed with
    #[arg(long, value_parser = parse_fps)]
    in_fps: Fps,

    /// Frame rate the times should match
    #[arg(long, value_parser = parse_fps)]
    out_fps: Fps,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    timing: TimingArgs,

    /// Video file to read frame timestamps from (needs ffprobe)
    #[arg(long, value_name = "PATH", conflicts_with_all = ["fps", "timestamps"])]
    video: Option<PathBuf>,

    /// Stream index of the video track
    #[arg(long, default_value_t = 0)]
    stream: usize,

    /// Frame number to convert to milliseconds
    #[arg(long, conflicts_with = "ms")]
    frame: Option<i64>,

    /// Time in milliseconds to convert to a frame number
    #[arg(long)]
    ms: Option<i64>,

    /// Which instant of a frame to use
    #[arg(long, value_enum, default_value_t = CliAnchor::Exact)]
    anchor: CliAnchor,
}

/// CLI wrapper for TimeAnchor to implement ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliAnchor {
    Start,
    Exact,
    End,
}

impl From<CliAnchor> for TimeAnchor {
    fn from(anchor: CliAnchor) -> Self {
        match anchor {
            CliAnchor::Start => TimeAnchor::Start,
            CliAnchor::Exact => TimeAnchor::Exact,
            CliAnchor::End => TimeAnchor::End,
        }
    }
}

/// Frame rate as given on the command line, kept as an exact fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fps {
    num: u32,
    den: u32,
}

impl Fps {
    fn value(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    fn timeline(self) -> Result<FrameTimeline> {
        Ok(FrameTimeline::from_fps_ratio(self.num, self.den)?)
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.den {
            1 => write!(f, "{}", self.num),
            den => write!(f, "{}/{}", self.num, den),
        }
    }
}

fn parse_fps(s: &str) -> Result<Fps, String> {
    match parse_fps_fraction(s) {
        Some((num, den)) if is_valid_fps(f64::from(num) / f64::from(den)) => Ok(Fps { num, den }),
        _ => Err(format!("`{s}` isn't a valid frame rate")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;
    init_tracing(cli.log_level.unwrap_or(settings.logging.level));

    run(cli.command, &settings)
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let mut manager = ConfigManager::new(path);
    manager
        .load_or_create()
        .with_context(|| format!("Failed to load config {}", path.display()))?;
    Ok(manager.settings().clone())
}

fn run(command: Commands, settings: &Settings) -> Result<()> {
    match command {
        Commands::Convert(args) => convert(args, settings),
        Commands::Shift(args) => shift(args, settings),
        Commands::Retime(args) => retime(args, settings),
        Commands::Frames(args) => frames(args),
    }
}

fn load(path: &Path, options: &LoadOptions) -> Result<SubtitleData> {
    SubtitleData::load(path, options).with_context(|| format!("Failed to read {}", path.display()))
}

fn save(data: &SubtitleData, path: &Path, options: &WriteOptions) -> Result<()> {
    data.save(path, options)
        .with_context(|| format!("Failed to write {}", path.display()))
}

fn convert(args: ConvertArgs, settings: &Settings) -> Result<()> {
    let mut load_options = settings.load_options();
    let mut write_options = settings.write_options();
    load_options.format = args.from;
    write_options.format = args.to;
    args.timing.apply(&mut load_options, &mut write_options)?;

    let data = load(&args.input, &load_options)?;
    save(&data, &args.output, &write_options)?;

    tracing::info!(
        "Converted {} events: {} -> {}",
        data.dialogue_count(),
        args.input.display(),
        args.output.display()
    );
    Ok(())
}

fn shift(args: ShiftArgs, settings: &Settings) -> Result<()> {
    let mut load_options = settings.load_options();
    let mut write_options = settings.write_options();
    args.timing.apply(&mut load_options, &mut write_options)?;

    let mut data = load(&args.input, &load_options)?;

    match (args.ms, args.frames) {
        (Some(ms), _) => {
            data.shift(ms);
            tracing::info!("Shifted by {}ms", ms);
        }
        (None, Some(frames)) => {
            let Some(timeline) = args.timing.timeline()? else {
                bail!("--frames needs --fps or --timestamps");
            };
            data.shift_frames(frames, &timeline)?;
            tracing::info!("Shifted by {} frames", frames);
        }
        (None, None) => bail!("Give an offset with --ms or --frames"),
    }

    save(&data, &args.output, &write_options)
}

fn retime(args: RetimeArgs, settings: &Settings) -> Result<()> {
    let mut data = load(&args.input, &settings.load_options())?;
    data.transform_framerate(args.in_fps.value(), args.out_fps.value())?;
    tracing::info!("Retimed from {} to {} fps", args.in_fps, args.out_fps);
    save(&data, &args.output, &settings.write_options())
}

fn frames(args: FramesArgs) -> Result<()> {
    let timeline = match &args.video {
        Some(video) => FrameTimeline::from_media_probe(video, args.stream, true)
            .with_context(|| format!("Failed to probe {}", video.display()))?,
        None => match args.timing.timeline()? {
            Some(timeline) => timeline,
            None => bail!("Give a timing source with --fps, --timestamps or --video"),
        },
    };

    let anchor = TimeAnchor::from(args.anchor);
    let value = match (args.frame, args.ms) {
        (Some(frame), _) => timeline.frame_to_ms(frame, anchor)?,
        (None, Some(ms)) => timeline.ms_to_frame(ms, anchor)?,
        (None, None) => bail!("Give a value with --frame or --ms"),
    };

    println!("{}", value);
    Ok(())
}
