//! Terminal playback of stored frames.

use crate::{GifsciiError, Result};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::convert::Infallible;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Where frames are drawn.
pub trait Screen {
    fn show(&mut self, frame: &str) -> io::Result<()>;
    fn clear(&mut self) -> io::Result<()>;
}

/// Writes frames to a terminal and clears it with ANSI commands.
pub struct TerminalScreen<W: Write> {
    out: W,
}

impl TerminalScreen<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalScreen<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Screen for TerminalScreen<W> {
    fn show(&mut self, frame: &str) -> io::Result<()> {
        writeln!(self.out, "{frame}")?;
        self.out.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerOptions {
    pub frame_pause: Duration,
    pub clear_prev_frame: bool,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self { frame_pause: Duration::from_millis(20), clear_prev_frame: true }
    }
}

pub struct Player<S: Screen> {
    screen: S,
    options: PlayerOptions,
}

impl<S: Screen> Player<S> {
    pub fn new(screen: S, options: PlayerOptions) -> Self {
        Self { screen, options }
    }

    #[cfg(test)]
    fn screen(&self) -> &S {
        &self.screen
    }

    /// Show each frame once, pausing after each and clearing if configured.
    pub fn play_once(&mut self, frames: &[String]) -> io::Result<()> {
        for frame in frames {
            self.screen.show(frame)?;
            thread::sleep(self.options.frame_pause);
            if self.options.clear_prev_frame {
                self.screen.clear()?;
            }
        }
        Ok(())
    }

    /// Loop over `frames` until the process is killed. Returns only on error.
    pub fn play(&mut self, frames: &[String]) -> Result<Infallible> {
        if frames.is_empty() {
            return Err(GifsciiError::NoFrames);
        }
        tracing::debug!(count = frames.len(), options = ?self.options, "starting playback");
        loop {
            self.play_once(frames)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Screen for Recorder {
        fn show(&mut self, frame: &str) -> io::Result<()> {
            self.events.push(format!("show:{frame}"));
            Ok(())
        }

        fn clear(&mut self) -> io::Result<()> {
            self.events.push("clear".into());
            Ok(())
        }
    }

    fn quick(clear_prev_frame: bool) -> PlayerOptions {
        PlayerOptions { frame_pause: Duration::ZERO, clear_prev_frame }
    }

    #[test]
    fn defaults() {
        let opts = PlayerOptions::default();
        assert_eq!(opts.frame_pause, Duration::from_millis(20));
        assert!(opts.clear_prev_frame);
    }

    #[test]
    fn shows_then_clears_each_frame() {
        let mut player = Player::new(Recorder::default(), quick(true));
        player.play_once(&["a".into(), "b".into()]).unwrap();
        assert_eq!(player.screen().events, ["show:a", "clear", "show:b", "clear"]);
    }

    #[test]
    fn no_clear_when_disabled() {
        let mut player = Player::new(Recorder::default(), quick(false));
        player.play_once(&["a".into(), "b".into()]).unwrap();
        player.play_once(&["a".into(), "b".into()]).unwrap();
        assert_eq!(player.screen().events, ["show:a", "show:b", "show:a", "show:b"]);
    }

    #[test]
    fn empty_playlist_is_rejected() {
        let mut player = Player::new(Recorder::default(), quick(true));
        assert!(matches!(player.play(&[]), Err(GifsciiError::NoFrames)));
        assert!(player.screen().events.is_empty());
    }

    #[test]
    fn terminal_screen_writes_frame_and_clear_sequence() {
        let mut screen = TerminalScreen::new(Vec::new());
        screen.show("ab\ncd\n").unwrap();
        screen.clear().unwrap();

        let written = String::from_utf8(screen.out).unwrap();
        assert!(written.starts_with("ab\ncd\n\n"));
        assert!(written.contains("\x1b[2J"));
        assert!(written.ends_with("\x1b[1;1H"));
    }

    #[test]
    fn screen_errors_stop_playback() {
        struct Broken;
        impl Screen for Broken {
            fn show(&mut self, _: &str) -> io::Result<()> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn clear(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut player = Player::new(Broken, quick(true));
        assert!(matches!(player.play(&["a".into()]), Err(GifsciiError::Io(_))));
    }
}
