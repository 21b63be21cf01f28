#[cfg(test)]
mod tests {
    use crate::commands::PlayerCommand;
    use crate::config::CaptureConfig;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::{CommandError, ConfigError, StartError};
    use crate::events::CaptureEvent;
    use crate::state::SessionSnapshot;
    use crate::types::{CreatureStats, Difficulty, SimTime};

    #[test]
    fn test_direction_table_is_complete() {
        for (i, a) in Direction::ALL.iter().enumerate() {
            for b in &Direction::ALL[i + 1..] {
                assert_ne!(a, b, "Direction::ALL must not repeat entries");
            }
        }
        assert_eq!(Direction::ALL.len(), 8);
    }

    #[test]
    fn test_attempt_state_serde() {
        let variants = vec![
            AttemptState::Inactive,
            AttemptState::Starting,
            AttemptState::HandSigns,
            AttemptState::Animation,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: AttemptState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_difficulty_clamps() {
        assert_eq!(Difficulty::clamped(-3).get(), MIN_DIFFICULTY);
        assert_eq!(Difficulty::clamped(0).get(), 1);
        assert_eq!(Difficulty::clamped(7).get(), 7);
        assert_eq!(Difficulty::clamped(11).get(), MAX_DIFFICULTY);
        assert_eq!(Difficulty::clamped(i64::MAX), Difficulty::MAX);
    }

    /// Deserializing an out-of-range difficulty clamps rather than failing.
    #[test]
    fn test_difficulty_serde_clamps() {
        let d: Difficulty = serde_json::from_str("42").unwrap();
        assert_eq!(d, Difficulty::MAX);
        assert_eq!(serde_json::to_string(&Difficulty::clamped(4)).unwrap(), "4");
    }

    #[test]
    fn test_health_ratio() {
        let mut stats = CreatureStats {
            health: 30.0,
            max_health: 120.0,
            level: 3,
            kind: CreatureKind::Tide,
        };
        assert!((stats.health_ratio() - 0.25).abs() < 1e-12);

        stats.health = 500.0;
        assert_eq!(stats.health_ratio(), 1.0);

        stats.health = -4.0;
        assert_eq!(stats.health_ratio(), 0.0);

        stats.max_health = 0.0;
        assert_eq!(stats.health_ratio(), 0.0);
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::StartCapture {
                creature_id: 3,
                stone_id: Some(1),
            },
            PlayerCommand::StartCapture {
                creature_id: 4,
                stone_id: None,
            },
            PlayerCommand::PressDirection {
                direction: Direction::DownLeft,
            },
            PlayerCommand::CancelCapture,
            PlayerCommand::SetBaseDifficulty { difficulty: 8 },
            PlayerCommand::SetSignsRequired { count: 2 },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            // PlayerCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_command_json_shape() {
        let json = r#"{"type":"PressDirection","direction":"UpLeft"}"#;
        let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
        assert!(matches!(
            cmd,
            PlayerCommand::PressDirection {
                direction: Direction::UpLeft
            }
        ));
    }

    #[test]
    fn test_capture_event_serde() {
        let events = vec![
            CaptureEvent::AttemptStarted {
                creature_id: 1,
                stone_id: None,
                difficulty: Difficulty::clamped(6),
            },
            CaptureEvent::SignMissed {
                expected: Direction::Up,
                pressed: Direction::Down,
                time_remaining_secs: 2.5,
            },
            CaptureEvent::OutcomeDrawn {
                probability: 0.68,
                success: true,
            },
            CaptureEvent::AttemptCancelled,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: CaptureEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = CaptureConfig::default();
        assert_eq!(config.base_difficulty, 5);
        assert_eq!(config.total_signs_required, 5);
        assert_eq!(config.animation_duration_secs, 3.0);
        assert_eq!(config.animation_frame_count, 8);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config = CaptureConfig::from_json_str(r#"{ "total_signs_required": 2 }"#).unwrap();
        assert_eq!(config.total_signs_required, 2);
        assert_eq!(config.base_difficulty, DEFAULT_BASE_DIFFICULTY);
    }

    #[test]
    fn test_config_json_is_sanitized() {
        let config = CaptureConfig::from_json_str(
            r#"{ "base_difficulty": 40, "total_signs_required": 0, "animation_frame_count": 0 }"#,
        )
        .unwrap();
        assert_eq!(config.base_difficulty, 10);
        assert_eq!(config.total_signs_required, 1);
        assert_eq!(config.animation_frame_count, 1);

        let low = CaptureConfig {
            base_difficulty: -2,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(low.base_difficulty, 1);
    }

    #[test]
    fn test_config_bad_json_is_parse_error() {
        let err = CaptureConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_config_missing_file_is_io_error() {
        let err = CaptureConfig::load("/definitely/not/here/soulbind.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StartError::Busy.to_string(),
            "a capture attempt is already in progress"
        );
        let wrapped: CommandError = StartError::EngineRefused.into();
        assert_eq!(
            wrapped.to_string(),
            "the timed-input engine refused to start a round"
        );
        assert_eq!(
            CommandError::UnknownStone(9).to_string(),
            "no capture stone with id 9"
        );
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = SessionSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: SessionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(back.attempt.state, AttemptState::Inactive);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance();
        }
        assert_eq!(time.tick, TICK_RATE as u64);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }
}
