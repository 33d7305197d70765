use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Correct,
    Incorrect,
}

impl Sound {
    fn asset_name(self) -> &'static str {
        match self {
            Self::Correct => "correct.mp3",
            Self::Incorrect => "incorrect.mp3",
        }
    }
}

/// Best-effort answer sounds. Playback never blocks the caller and failures
/// only end up in the log.
#[derive(Clone, Debug, Default)]
pub struct SoundPlayer {
    muted: bool,
    command: Vec<String>,
    assets_dir: Option<PathBuf>,
}

impl SoundPlayer {
    pub fn new(player: Option<String>, assets_dir: Option<PathBuf>) -> Self {
        let command = player
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(ToOwned::to_owned)
            .collect();

        Self {
            muted: false,
            command,
            assets_dir,
        }
    }

    pub fn muted() -> Self {
        Self {
            muted: true,
            ..Self::default()
        }
    }

    fn asset_path(&self, sound: Sound) -> Option<PathBuf> {
        self.assets_dir
            .as_ref()
            .map(|dir| dir.join(sound.asset_name()))
    }

    /// Must be called from within the tokio runtime when a player command is
    /// configured.
    pub fn play(&self, sound: Sound) {
        if self.muted {
            return;
        }

        match (self.command.split_first(), self.asset_path(sound)) {
            (Some((program, args)), Some(path)) => {
                let mut command = Command::new(program);
                command
                    .args(args)
                    .arg(&path)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null());

                tokio::spawn(async move {
                    match command.status().await {
                        Ok(status) if status.success() => {
                            debug!(path = %path.display(), "Played sound")
                        }
                        Ok(status) => warn!("Audio playback failed: player exited with {status}"),
                        Err(e) => warn!("Audio playback failed: {e}"),
                    }
                });
            }
            _ => ring_bell(),
        }
    }
}

fn ring_bell() {
    let mut stdout = io::stdout();

    if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
        warn!("Audio playback failed: {e}");
    }
}
