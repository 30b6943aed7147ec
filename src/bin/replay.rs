// SPDX-License-Identifier: GPL-3.0-only

//! Ankkit Gesture Replay
//!
//! Replays a recorded gesture script against the keyboard engine and prints
//! the resulting text. Useful for checking touch models without a device.
//!
//! # Usage
//!
//! ```bash
//! ank-replay script.json [--model "iPhone 6"] [--landscape] [--config ankkit.json]
//! ```
//!
//! The script is a JSON array of gesture events:
//!
//! ```json
//! [
//!     { "point": { "x": 192, "y": 83 }, "phase": "began" },
//!     { "point": { "x": 192, "y": 83 }, "phase": "ended", "tap_count": 1 }
//! ]
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use ankkit::{
    DeviceProfile, GestureEvent, KeyboardBuilder, KeyboardConfig, LoadError, MemoryDocument,
    Orientation, ScreenClass,
};

/// Replay a gesture script against the keyboard engine
#[derive(Parser, Debug)]
#[command(name = "ank-replay", version, about, long_about = None)]
struct Args {
    /// JSON array of gesture events
    #[arg(value_name = "SCRIPT")]
    script: PathBuf,

    /// Device model name, e.g. "iPhone 6 Plus"
    #[arg(long, value_name = "NAME")]
    model: Option<String>,

    /// Replay in landscape orientation
    #[arg(long)]
    landscape: bool,

    /// Keyboard configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn load_script(path: &Path) -> Result<Vec<GestureEvent>, LoadError> {
    let display_path = path.display().to_string();
    let json = fs::read_to_string(path).map_err(|e| LoadError::io_error_with_path(e, &display_path))?;
    serde_json::from_str(&json).map_err(|e| LoadError::json_error_with_resource(e, display_path))
}

fn run(args: Args) -> Result<(), LoadError> {
    let config = match &args.config {
        Some(path) => KeyboardConfig::load(path)?,
        None => KeyboardConfig::default(),
    };

    let screen_class = args
        .model
        .as_deref()
        .map(ScreenClass::from_model_name)
        .unwrap_or_default();
    let orientation = if args.landscape {
        Orientation::Landscape
    } else {
        Orientation::Portrait
    };
    let profile = DeviceProfile::new(screen_class, orientation);

    let events = load_script(&args.script)?;
    tracing::info!(
        "Replaying {} events on {:?} {:?}",
        events.len(),
        screen_class,
        orientation
    );

    let mut keyboard = KeyboardBuilder::new()
        .with_config(config)
        .with_device_profile(profile)
        .build(MemoryDocument::new());

    for event in events {
        keyboard.handle_touch(event);
    }

    let state = *keyboard.state();
    let document = keyboard.into_host();

    println!("{}", document.text());
    tracing::info!(
        "Final state: layout={} caps={} caps_lock={} input_mode_switches={}",
        state.active_layout,
        state.caps_on,
        state.caps_lock_on,
        document.input_mode_switches()
    );

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("ankkit=info".parse().expect("static directive is valid"))
                .add_directive("ank_replay=info".parse().expect("static directive is valid")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["ank-replay", "script.json"]).unwrap();

        assert_eq!(args.script, PathBuf::from("script.json"));
        assert_eq!(args.model, None);
        assert!(!args.landscape);
        assert_eq!(args.config, None);
    }

    #[test]
    fn test_args_all_options() {
        let args = Args::try_parse_from([
            "ank-replay",
            "--model",
            "iPhone 6 Plus",
            "--landscape",
            "--config",
            "ankkit.json",
            "taps.json",
        ])
        .unwrap();

        assert_eq!(args.script, PathBuf::from("taps.json"));
        assert_eq!(args.model.as_deref(), Some("iPhone 6 Plus"));
        assert!(args.landscape);
        assert_eq!(args.config, Some(PathBuf::from("ankkit.json")));
    }

    #[test]
    fn test_args_rejected() {
        assert!(Args::try_parse_from(["ank-replay"]).is_err());
        assert!(Args::try_parse_from(["ank-replay", "a.json", "--model"]).is_err());
        assert!(Args::try_parse_from(["ank-replay", "a.json", "--portrait"]).is_err());
    }

    #[test]
    fn test_replay_script() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let script = dir.path().join("taps.json");
        fs::write(
            &script,
            r#"[
                {"point": {"x": 192, "y": 83}, "phase": "began"},
                {"point": {"x": 192, "y": 83}, "phase": "ended"}
            ]"#,
        )
        .expect("Failed to write script");

        let args = Args::try_parse_from([std::ffi::OsStr::new("ank-replay"), script.as_os_str()]).unwrap();
        assert!(run(args).is_ok());

        let missing = Args::try_parse_from(["ank-replay", "/nonexistent/taps.json"]).unwrap();
        assert!(run(missing).unwrap_err().is_not_found());
    }
}
