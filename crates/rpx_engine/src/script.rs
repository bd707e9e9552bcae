//! Scripted hardware input for driving the frame loop without a display.
//!
//! ```json
//! {
//!   "frames": [
//!     { "events": [{ "down": { "keyboard": "q" } }] },
//!     { "repeat": 3 },
//!     { "events": [{ "up": { "keyboard": "q" } }] }
//!   ],
//!   "quit_at_end": true
//! }
//! ```
//!
//! Each entry covers `repeat` frames. Its events are delivered on the first of
//! them; the rest are quiet frames.

use rpx_core::HardwareEvent;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse input script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("input script validation failed: frames list is empty")]
    Empty,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputScript {
    pub frames: Vec<ScriptFrame>,
    #[serde(default = "default_quit_at_end")]
    pub quit_at_end: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScriptFrame {
    #[serde(default)]
    pub events: Vec<HardwareEvent>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl InputScript {
    pub fn from_json(raw: &str) -> Result<Self, ScriptError> {
        let script: InputScript = serde_json::from_str(raw)?;
        script.validate()?;
        Ok(script)
    }

    /// One event batch per frame, in delivery order.
    pub fn expanded_frames(&self) -> Vec<Vec<HardwareEvent>> {
        let mut out = Vec::new();
        for frame in &self.frames {
            out.push(frame.events.clone());
            for _ in 1..frame.repeat.max(1) {
                out.push(Vec::new());
            }
        }
        out
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.frames.is_empty() {
            return Err(ScriptError::Empty);
        }
        Ok(())
    }
}

pub fn load_input_script_from_path(path: &Path) -> Result<InputScript, ScriptError> {
    let raw = fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    InputScript::from_json(&raw)
}

const fn default_repeat() -> u32 {
    1
}

const fn default_quit_at_end() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpx_core::ButtonId;
    use std::io::Write;

    #[test]
    fn script_file_parses_and_expands() {
        let mut file = tempfile::NamedTempFile::new().expect("create script file");
        file.write_all(
            br#"{
              "frames": [
                { "events": [{ "down": { "keyboard": "q" } }] },
                { "repeat": 3 },
                { "events": [{ "up": { "keyboard": "q" } }, "quit"] }
              ]
            }"#,
        )
        .expect("write script file");

        let script = load_input_script_from_path(file.path()).expect("script should load");
        assert!(script.quit_at_end);
        let frames = script.expanded_frames();
        assert_eq!(frames.len(), 5);
        assert_eq!(frames[0], vec![HardwareEvent::Down(ButtonId::Keyboard('q'))]);
        assert!(frames[1..4].iter().all(Vec::is_empty));
        assert_eq!(
            frames[4],
            vec![HardwareEvent::Up(ButtonId::Keyboard('q')), HardwareEvent::Quit]
        );
    }

    #[test]
    fn repeat_zero_still_covers_one_frame() {
        let script = InputScript::from_json(r#"{ "frames": [{ "repeat": 0 }] }"#)
            .expect("script should parse");
        assert_eq!(script.expanded_frames().len(), 1);
    }

    #[test]
    fn empty_script_is_rejected() {
        let err = InputScript::from_json(r#"{ "frames": [] }"#).unwrap_err();
        assert!(matches!(err, ScriptError::Empty));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("absent_script.json");
        let err = load_input_script_from_path(&path).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
        assert!(err.to_string().contains("absent_script.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = InputScript::from_json(r#"{ "frames": [{ "events": ["jump"] }] }"#).unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }
}
