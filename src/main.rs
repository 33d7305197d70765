use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;
use url::Url;

use crate::fetch::QuizSource;
use crate::sound::SoundPlayer;

mod fetch;
mod inspect;
mod play;
mod render;
mod sound;

const DEFAULT_QUIZ_URL: &str = "https://api.jsonserve.com/Uw5CrX";
const DEFAULT_LOG_FILTER: &str = "quiz_player=warn,quiz_player_bin=warn";

/// Play a timed multiple-choice quiz in the terminal.
#[derive(Parser)]
#[clap(version, about)]
struct QuizPlayer {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the quiz and play it.
    Play {
        #[clap(flatten)]
        source: SourceArgs,

        #[clap(flatten)]
        sound: SoundArgs,
    },
    /// Fetch the quiz and print what was loaded.
    Inspect {
        #[clap(flatten)]
        source: SourceArgs,

        /// Print the normalized quiz as JSON.
        #[clap(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Address of the quiz payload.
    #[clap(short, long, env = "QUIZ_URL", value_parser, value_name = "URL", default_value = DEFAULT_QUIZ_URL)]
    url: Url,

    /// Read the payload from a JSON file instead. Takes precedence over --url.
    #[clap(short, long, value_parser, value_name = "PATH")]
    file: Option<PathBuf>,
}

impl From<SourceArgs> for QuizSource {
    fn from(args: SourceArgs) -> Self {
        match args.file {
            Some(path) => Self::File(path),
            None => Self::Remote(args.url),
        }
    }
}

#[derive(Args)]
struct SoundArgs {
    /// Command used to play the answer sounds, e.g. `mpg123 -q`.
    #[clap(long, env = "QUIZ_SOUND_PLAYER", value_parser, value_name = "COMMAND")]
    sound_player: Option<String>,

    /// Directory holding `correct.mp3` and `incorrect.mp3`.
    #[clap(long, env = "QUIZ_SOUND_DIR", value_parser, value_name = "PATH")]
    sound_dir: Option<PathBuf>,

    /// Do not play any sound.
    #[clap(long)]
    mute: bool,
}

impl From<SoundArgs> for SoundPlayer {
    fn from(args: SoundArgs) -> Self {
        if args.mute {
            Self::muted()
        } else {
            Self::new(args.sound_player, args.sound_dir)
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    #[cfg(feature = "env-file")]
    dotenvy::dotenv().ok();

    init_tracing();

    let quiz_player = QuizPlayer::parse();

    let result = match quiz_player.command {
        Command::Play { source, sound } => play::play(source.into(), sound.into()).await,
        Command::Inspect { source, json } => inspect::inspect(source.into(), json).await,
    };

    if let Err(e) = result {
        error!("{e:#}");
        process::exit(1);
    }
}
