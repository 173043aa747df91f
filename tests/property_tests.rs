//! Property-based tests for logpipe using proptest

use chrono::{Duration, FixedOffset, TimeZone};
use logpipe::{Level, LineTemplate, LogRecord, TimePattern};
use proptest::prelude::*;

fn any_level() -> impl Strategy<Value = Level> {
    prop_oneof![
        Just(Level::Debug),
        Just(Level::Info),
        Just(Level::Warning),
        Just(Level::Error),
        Just(Level::Critical),
    ]
}

// ============================================================================
// Level Tests
// ============================================================================

proptest! {
    /// Level string conversions roundtrip correctly
    #[test]
    fn test_level_str_roundtrip(level in any_level()) {
        let as_str = level.as_str();
        let parsed: Level = as_str.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Level ordering is consistent with the numeric discriminants
    #[test]
    fn test_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Parsing accepts case-insensitive input
    #[test]
    fn test_level_case_insensitive(use_lower in any::<bool>()) {
        for name in ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"] {
            let input = if use_lower { name.to_lowercase() } else { name.to_string() };
            prop_assert!(input.parse::<Level>().is_ok(), "Failed to parse: {}", input);
        }
    }
}

// ============================================================================
// Timestamp Pattern Tests
// ============================================================================

proptest! {
    /// The millisecond token always renders exactly three digits
    #[test]
    fn test_millis_token_always_three_digits(millis in 0_i64..1000) {
        let offset = FixedOffset::east_opt(0).unwrap();
        let instant = offset
            .with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .unwrap()
            + Duration::milliseconds(millis);

        let rendered = TimePattern::new("uuu").format(&instant);
        prop_assert_eq!(rendered.len(), 3);
        prop_assert_eq!(rendered.parse::<i64>().unwrap(), millis);
    }

    /// Rendering is timezone-faithful: the offset token reflects the input
    #[test]
    fn test_offset_rendered(hours in -12_i32..=12) {
        let offset = FixedOffset::east_opt(hours * 3600).unwrap();
        let instant = offset.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).single().unwrap();
        let rendered = TimePattern::new("%z").format(&instant);
        let sign = if hours < 0 { '-' } else { '+' };
        prop_assert_eq!(rendered, format!("{}{:02}00", sign, hours.abs()));
    }
}

// ============================================================================
// Line Template Tests
// ============================================================================

proptest! {
    /// Messages appear verbatim in the rendered line, special characters
    /// and braces included
    #[test]
    fn test_message_rendered_verbatim(message in ".*") {
        let template = LineTemplate::parse("{message}").unwrap();
        let record = LogRecord::new(Level::Info, message.clone(), "prop.rs", 1);
        let line = template.render(&record, &TimePattern::default());
        prop_assert_eq!(line, message);
    }

    /// The level placeholder renders at least eight columns for every level
    #[test]
    fn test_level_placeholder_width(level in any_level()) {
        let template = LineTemplate::parse("{level}").unwrap();
        let record = LogRecord::new(level, String::new(), "prop.rs", 1);
        let line = template.render(&record, &TimePattern::default());
        prop_assert!(line.len() >= 8);
        prop_assert!(line.trim_end() == level.as_str());
    }
}
