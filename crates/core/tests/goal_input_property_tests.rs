//! Property-based tests for goal input validation and timeframe resolution.

use chrono::{Datelike, NaiveDate, Timelike};
use mismetas_core::goals::{resolve_target_date, DurationUnit, GoalDuration};
use mismetas_core::wizard::{
    validate_goal_input, GOAL_ACTION_VERBS, MISSING_VERB_MESSAGE, NOT_A_GOAL_MESSAGE,
    TOO_SHORT_MESSAGE,
};
use proptest::prelude::*;

// =============================================================================
// Generators
// =============================================================================

fn arb_verb() -> impl Strategy<Value = &'static str> {
    proptest::sample::select(GOAL_ACTION_VERBS)
}

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1970i32..2100, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

// =============================================================================
// Validator properties
// =============================================================================

proptest! {
    #[test]
    fn short_input_is_too_short(input in "\\PC{0,9}") {
        prop_assume!(input.trim().chars().count() < 10);
        let result = validate_goal_input(&input);
        prop_assert!(!result.is_valid);
        prop_assert_eq!(result.message.as_deref(), Some(TOO_SHORT_MESSAGE));
    }

    #[test]
    fn digits_only_is_invalid(input in "[0-9]{1,40}") {
        prop_assert!(!validate_goal_input(&input).is_valid);
    }

    #[test]
    fn long_digits_are_not_a_goal(input in "[0-9]{10,40}") {
        let result = validate_goal_input(&input);
        prop_assert_eq!(
            result.message.as_deref(),
            Some(NOT_A_GOAL_MESSAGE)
        );
    }

    #[test]
    fn verb_with_object_is_valid(verb in arb_verb(), object in "[a-z]{3,12}( [a-z]{3,12}){1,3}") {
        // Placeholder prefixes are rejected before the verb check.
        prop_assume!(!["test", "asdf", "qwerty", "xxx"].iter().any(|p| verb.starts_with(p)));
        let input = format!("{} {}", verb, object);
        prop_assume!(input.chars().count() >= 10);
        prop_assert!(validate_goal_input(&input).is_valid, "{}", input);
    }

    #[test]
    fn validation_is_case_insensitive(verb in arb_verb(), object in "[a-z]{10,20}") {
        prop_assume!(!["test", "asdf", "qwerty", "xxx"].iter().any(|p| verb.starts_with(p)));
        let lower = format!("{} {}", verb, object);
        let upper = lower.to_uppercase();
        prop_assert_eq!(validate_goal_input(&lower), validate_goal_input(&upper));
    }

    #[test]
    fn validation_is_deterministic(input in "\\PC{0,60}") {
        prop_assert_eq!(validate_goal_input(&input), validate_goal_input(&input));
    }

    #[test]
    fn repeated_letters_lack_a_verb(c in "[b-w]", n in 10usize..40) {
        let input = c.repeat(n);
        let result = validate_goal_input(&input);
        prop_assert_eq!(
            result.message.as_deref(),
            Some(MISSING_VERB_MESSAGE)
        );
    }
}

// =============================================================================
// Timeframe properties
// =============================================================================

proptest! {
    #[test]
    fn resolved_dates_are_end_of_day(
        date in arb_date(),
        value in 0u32..36,
        unit in prop_oneof![
            Just(DurationUnit::Day),
            Just(DurationUnit::Week),
            Just(DurationUnit::Month),
            Just(DurationUnit::Year),
            Just(DurationUnit::EndOfYear),
        ],
    ) {
        let now = date.and_hms_opt(8, 15, 0).unwrap();
        let resolved = resolve_target_date(GoalDuration::new(value, unit), now).unwrap();
        let target = resolved.target_date.unwrap();
        prop_assert!(!resolved.is_habit);
        prop_assert!(target.date() >= date);
        prop_assert_eq!((target.hour(), target.minute(), target.second()), (23, 59, 59));
    }

    #[test]
    fn months_never_overflow_into_next_month(date in arb_date(), day in 28u32..=31, months in 1u32..24) {
        let Some(start) = NaiveDate::from_ymd_opt(date.year(), date.month(), day) else {
            return Ok(());
        };
        let now = start.and_hms_opt(12, 0, 0).unwrap();
        let target = resolve_target_date(GoalDuration::new(months, DurationUnit::Month), now)
            .unwrap()
            .target_date
            .unwrap();
        let expected_month = (start.month0() + months) % 12 + 1;
        prop_assert_eq!(target.month(), expected_month);
        prop_assert!(target.day() <= day);
    }

    #[test]
    fn habits_never_have_a_date(date in arb_date(), value in 0u32..100) {
        let now = date.and_hms_opt(0, 0, 0).unwrap();
        let resolved = resolve_target_date(GoalDuration::new(value, DurationUnit::Habit), now).unwrap();
        prop_assert_eq!(resolved.target_date, None);
        prop_assert!(resolved.is_habit);
    }
}
