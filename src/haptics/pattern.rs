//! Haptic effect description assets
//!
//! Pattern text is opaque here; the haptic SDK parses it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{BounceError, Result};

/// Which pre-loaded pattern a collision plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Ball hits a boundary wall
    Wall,
    /// Two balls hit each other
    Ball,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Wall => "wall",
            PatternKind::Ball => "ball",
        }
    }
}

/// Read a pattern file as UTF-8, concatenating lines without separators
pub fn load_pattern_text(path: &Path) -> Result<String> {
    let io_err = |source| BounceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut text = String::new();
    for line in BufReader::new(file).lines() {
        text.push_str(&line.map_err(io_err)?);
    }
    Ok(text)
}

/// Both patterns, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct PatternBank {
    wall: String,
    ball: String,
}

impl PatternBank {
    pub fn new(wall: impl Into<String>, ball: impl Into<String>) -> Self {
        Self {
            wall: wall.into(),
            ball: ball.into(),
        }
    }

    /// Load both patterns from `dir`. A missing or unreadable file is logged
    /// and replaced by an empty pattern.
    pub fn load(dir: &Path, wall_file: &str, ball_file: &str) -> Self {
        Self {
            wall: load_or_empty(dir.join(wall_file)),
            ball: load_or_empty(dir.join(ball_file)),
        }
    }

    pub fn get(&self, kind: PatternKind) -> &str {
        match kind {
            PatternKind::Wall => &self.wall,
            PatternKind::Ball => &self.ball,
        }
    }
}

fn load_or_empty(path: PathBuf) -> String {
    match load_pattern_text(&path) {
        Ok(text) => {
            log::info!("Loaded haptic pattern {} ({} bytes)", path.display(), text.len());
            text
        }
        Err(e) => {
            log::error!("{e}");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_lines_are_concatenated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wall.he");
        fs::write(&path, "{\n  \"Metadata\": {}\n}\n").unwrap();

        let text = load_pattern_text(&path).unwrap();
        assert_eq!(text, "{  \"Metadata\": {}}");
    }

    #[test]
    fn test_crlf_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ball.he");
        fs::write(&path, "a\r\nb\r\n").unwrap();

        assert_eq!(load_pattern_text(&path).unwrap(), "ab");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_pattern_text(&dir.path().join("nope.he")).unwrap_err();
        assert!(matches!(err, BounceError::Io { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.he");
        fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

        assert!(load_pattern_text(&path).is_err());
    }

    #[test]
    fn test_bank_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("wall.he"), "W1\nW2").unwrap();

        let bank = PatternBank::load(dir.path(), "wall.he", "ball.he");
        assert_eq!(bank.get(PatternKind::Wall), "W1W2");
        assert_eq!(bank.get(PatternKind::Ball), "");
    }
}
