//! gifscii CLI - convert an animated image to ASCII frames, or replay converted frames

use clap::{CommandFactory, Parser};
use gifscii::extract::save_frames;
use gifscii::{
    extract_frames, open_animation, BitmapFont, Config, Converter, FrameStore, GifsciiError,
    GlyphWeights, Player, TerminalScreen, TrueTypeFont,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gifscii", about = "Play animated images as ASCII art in the terminal")]
struct Args {
    /// Animated image to convert. Without it, replays previously converted frames
    input: Option<PathBuf>,
    /// Directory holding converted frames
    #[arg(short = 'o', long)]
    frames_dir: Option<PathBuf>,
    /// Luminance divisor; higher values favor sparser glyphs
    #[arg(short, long)]
    intensity: Option<f32>,
    /// Seconds to wait between frames
    #[arg(short = 'p', long)]
    frame_pause: Option<f64>,
    /// Keep previous frames on screen instead of clearing
    #[arg(long)]
    no_clear: bool,
    /// Keep transparency instead of painting frames over white
    #[arg(long)]
    no_fill: bool,
    /// Monospaced TrueType font to calibrate glyph weights with
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Pixel size for --font
    #[arg(long)]
    font_size: Option<f32>,
    /// JSON config file; command line options take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Also save the extracted raster frames as PNGs into this directory
    #[arg(long)]
    dump_frames: Option<PathBuf>,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn resolve_config(&self) -> Result<Config, GifsciiError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(dir) = &self.frames_dir {
            config.frames_dir = dir.clone();
        }
        if let Some(intensity) = self.intensity {
            config.intensity_multiplier = intensity;
        }
        if let Some(pause) = self.frame_pause {
            config.frame_pause = pause;
        }
        if let Some(font) = &self.font {
            config.font = Some(font.clone());
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        config.clear_prev_frame &= !self.no_clear;
        config.fill_empty &= !self.no_fill;
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if matches!(
                e,
                GifsciiError::Usage(_) | GifsciiError::DirectoryNotFound(_) | GifsciiError::NoFrames
            ) {
                eprintln!("{}", Args::command().render_usage());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), GifsciiError> {
    let config = args.resolve_config()?;
    match &args.input {
        None => replay(&config),
        Some(path) if !path.is_file() => {
            Err(GifsciiError::Usage(format!("{} is not a file", path.display())))
        }
        Some(path) => convert(path, &config, args.dump_frames.as_deref()),
    }
}

fn convert(path: &Path, config: &Config, dump_dir: Option<&Path>) -> Result<(), GifsciiError> {
    let store = FrameStore::new(&config.frames_dir);
    // Foreign files abort before any decoding or deletion
    store.check_clean()?;

    let weights = match &config.font {
        Some(font) => GlyphWeights::build(&TrueTypeFont::from_file(font, config.font_size)?),
        None => GlyphWeights::build(&BitmapFont),
    };
    let converter = Converter::new(weights).with_intensity(config.intensity_multiplier);

    let frames = extract_frames(open_animation(path)?, config.fill_empty)?;
    if let Some(dir) = dump_dir {
        save_frames(&frames, dir)?;
    }
    let ascii = converter.convert_all(&frames);

    store.reset()?;
    store.write_all(&ascii)?;
    tracing::info!(frames = ascii.len(), dir = %store.dir().display(), "conversion finished");
    Ok(())
}

fn replay(config: &Config) -> Result<(), GifsciiError> {
    let frames = FrameStore::new(&config.frames_dir).read_all()?;
    let mut player = Player::new(TerminalScreen::stdout(), config.player_options()?);
    match player.play(&frames)? {}
}
