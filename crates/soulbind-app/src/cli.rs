//! Command-line options for the headless runner.
//!
//! Usage:
//!   soulbind [--config PATH] [--seed N] [--attempts N] [--meadow N]
//!            [--stone KIND] [--realtime]

use std::path::PathBuf;

use soulbind_core::config::CaptureConfig;
use soulbind_core::enums::StoneKind;
use soulbind_sim::session::SessionConfig;

use crate::autopilot::AutopilotConfig;
use crate::game_loop::LoopConfig;

#[derive(Debug, Clone)]
pub struct CliOptions {
    /// JSON capture config; defaults apply when absent.
    pub config: Option<PathBuf>,
    pub seed: u64,
    /// Attempts to resolve before exiting.
    pub attempts: usize,
    pub meadow_size: usize,
    /// `None` throws no stone.
    pub stone: Option<StoneKind>,
    pub realtime: bool,
}

impl Default for CliOptions {
    fn default() -> Self {
        Self {
            config: None,
            seed: SessionConfig::default().seed,
            attempts: 3,
            meadow_size: 6,
            stone: Some(StoneKind::Plain),
            realtime: false,
        }
    }
}

impl CliOptions {
    /// Loop setup for these options, with the autopilot at the controls.
    pub fn loop_config(&self, capture: CaptureConfig) -> LoopConfig {
        LoopConfig {
            session: SessionConfig {
                seed: self.seed,
                capture,
                ..Default::default()
            },
            meadow_size: self.meadow_size,
            stones: self.stone.into_iter().collect(),
            autopilot: Some(AutopilotConfig {
                seed: self.seed.wrapping_add(2),
                ..Default::default()
            }),
            paced: self.realtime,
        }
    }
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--realtime" => options.realtime = true,
            "--config" | "--seed" | "--attempts" | "--meadow" | "--stone" => {
                i += 1;
                let value = args
                    .get(i)
                    .ok_or_else(|| format!("{} requires a value", arg))?;
                match arg {
                    "--config" => options.config = Some(PathBuf::from(value)),
                    "--seed" => options.seed = parse_number(arg, value)?,
                    "--attempts" => options.attempts = parse_number(arg, value)?,
                    "--meadow" => options.meadow_size = parse_number(arg, value)?,
                    _ => options.stone = parse_stone(value)?,
                }
            }
            _ => return Err(format!("Unknown argument: {}", arg)),
        }
        i += 1;
    }

    Ok(options)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T, String> {
    value
        .parse::<T>()
        .map_err(|_| format!("{} expects a non-negative integer, got '{}'", flag, value))
}

fn parse_stone(s: &str) -> Result<Option<StoneKind>, String> {
    match s.to_lowercase().as_str() {
        "none" => Ok(None),
        "plain" => Ok(Some(StoneKind::Plain)),
        "ember" => Ok(Some(StoneKind::Ember)),
        "tide" => Ok(Some(StoneKind::Tide)),
        "grove" => Ok(Some(StoneKind::Grove)),
        "gale" => Ok(Some(StoneKind::Gale)),
        "prism" => Ok(Some(StoneKind::Prism)),
        _ => Err(format!(
            "Invalid stone '{}'. Use: none, plain, ember, tide, grove, gale, or prism",
            s
        )),
    }
}

pub fn print_help() {
    eprintln!(
        "soulbind: headless capture session driven by an autopilot\n\
         \n\
         Options:\n\
         \n\
           --config <path>    Capture config JSON (defaults when omitted)\n\
           --seed <N>         Session seed (default: 42)\n\
           --attempts <N>     Attempts to resolve before exiting (default: 3)\n\
           --meadow <N>       Wild creatures to spawn (default: 6)\n\
           --stone <kind>     Stone to throw: none, plain, ember, tide, grove, gale, prism\n\
           --realtime         Run at 60 ticks per second instead of flat out\n\
         \n\
         Logging follows RUST_LOG (default: info).\n"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let options = parse_args(&[]).unwrap();
        assert_eq!(options.seed, 42);
        assert_eq!(options.attempts, 3);
        assert_eq!(options.stone, Some(StoneKind::Plain));
        assert!(!options.realtime);
        assert!(options.config.is_none());
    }

    #[test]
    fn test_all_flags() {
        let options = parse_args(&args(&[
            "--seed", "9", "--attempts", "10", "--meadow", "2", "--stone", "Prism", "--config",
            "capture.json", "--realtime",
        ]))
        .unwrap();
        assert_eq!(options.seed, 9);
        assert_eq!(options.attempts, 10);
        assert_eq!(options.meadow_size, 2);
        assert_eq!(options.stone, Some(StoneKind::Prism));
        assert_eq!(options.config, Some(PathBuf::from("capture.json")));
        assert!(options.realtime);
    }

    #[test]
    fn test_stone_none() {
        let options = parse_args(&args(&["--stone", "none"])).unwrap();
        assert_eq!(options.stone, None);
        let config = options.loop_config(CaptureConfig::default());
        assert!(config.stones.is_empty());
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&args(&["--seed"])).unwrap_err().contains("requires a value"));
        assert!(parse_args(&args(&["--attempts", "-1"])).is_err());
        assert!(parse_args(&args(&["--stone", "granite"])).unwrap_err().contains("granite"));
        assert!(parse_args(&args(&["catch"])).unwrap_err().contains("Unknown argument"));
    }

    #[test]
    fn test_loop_config_carries_options() {
        let options = parse_args(&args(&["--seed", "5", "--realtime"])).unwrap();
        let capture = CaptureConfig {
            total_signs_required: 2,
            ..Default::default()
        };
        let config = options.loop_config(capture);
        assert_eq!(config.session.seed, 5);
        assert_eq!(config.session.capture.total_signs_required, 2);
        assert_eq!(config.stones, vec![StoneKind::Plain]);
        assert!(config.paced);
        assert_eq!(config.autopilot.map(|a| a.seed), Some(7));
    }
}
