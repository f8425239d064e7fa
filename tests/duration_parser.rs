// tests/duration_parser.rs

use stepgraph::parser::{
    DEFAULT_DURATION_SECS, parse_time_taken, parse_timer_durations, parse_to_time,
};

const SEAR: &str = "cook for about 5 min 40 seconds. Turn ribs and cook until second side is golden brown, 1–2 minutes";

#[test]
fn mixed_units_and_en_dash_range() {
    assert_eq!(
        parse_timer_durations(SEAR),
        vec!["5 min 40 seconds", "1–2 minutes"]
    );
    assert_eq!(parse_time_taken(SEAR), 430);
}

#[test]
fn literal_spans_resolve() {
    assert_eq!(parse_to_time("1 hour 10 minutes"), 4200);
    assert_eq!(parse_to_time("20-25mins"), 1350);
    assert_eq!(parse_to_time("five to 10 minutes"), 450);
}

#[test]
fn or_range_with_number_word() {
    let text = "cook for about 2 minutes. Turn ribs and cook until second side is golden brown, 1 or two minutes";
    let spans = parse_timer_durations(text);
    assert_eq!(spans, vec!["2 minutes", "1 or two minutes"]);
    assert_eq!(parse_to_time(&spans[1]), 90);
    assert_eq!(parse_time_taken(text), 210);
}

#[test]
fn ranged_compound_durations_average_both_halves() {
    let text = "Braise for 1 hour to 1 hour 30 minutes";
    let spans = parse_timer_durations(text);
    assert_eq!(spans, vec!["1 hour to 1 hour 30 minutes"]);
    assert_eq!(parse_to_time(&spans[0]), 4500);
}

#[test]
fn compound_joined_by_and_is_one_span() {
    let spans = parse_timer_durations("Simmer 2 hours and 15 minutes");
    assert_eq!(spans, vec!["2 hours and 15 minutes"]);
    assert_eq!(parse_to_time(&spans[0]), 8100);
}

#[test]
fn fractions_decimals_and_words() {
    assert_eq!(parse_time_taken("Rest for 1/2 hour"), 1800);
    assert_eq!(parse_time_taken("Roast 1.5 hours"), 5400);
    assert_eq!(parse_time_taken("Whisk for ten minutes"), 600);
    assert_eq!(parse_time_taken("Wait fifteen seconds"), 15);
}

#[test]
fn compact_and_capitalised_units() {
    assert_eq!(parse_time_taken("Bake 20 Minutes"), 1200);
    assert_eq!(parse_time_taken("Sear 5min"), 300);
    assert_eq!(parse_time_taken("Blitz 30s"), 30);
    assert_eq!(parse_time_taken("Smoke 2h"), 7200);
}

#[test]
fn short_filler_word_between_number_and_unit() {
    assert_eq!(
        parse_timer_durations("Cook 10 more minutes"),
        vec!["10 more minutes"]
    );
    assert_eq!(parse_time_taken("Cook 10 more minutes"), 600);
}

#[test]
fn counts_without_units_are_not_durations() {
    assert!(parse_timer_durations("Whisk 2 eggs with 3 tablespoons of sugar").is_empty());
    assert_eq!(parse_time_taken("Crack 2 eggs"), 0);
    assert_eq!(parse_time_taken("Chop the onions"), 0);
    assert_eq!(parse_time_taken(""), 0);
}

#[test]
fn leading_minus_is_not_a_sign() {
    assert_eq!(parse_timer_durations("Cook -5 minutes"), vec!["5 minutes"]);
    assert_eq!(parse_time_taken("Cook -5 minutes"), 300);
}

#[test]
fn spans_are_returned_in_order() {
    let text = "Boil 10 minutes, drain, then rest 3 minutes";
    assert_eq!(parse_timer_durations(text), vec!["10 minutes", "3 minutes"]);
    assert_eq!(parse_time_taken(text), 780);
}

#[test]
fn unresolvable_span_uses_default() {
    assert_eq!(parse_to_time("some minutes"), DEFAULT_DURATION_SECS);
    assert_eq!(parse_to_time("just text"), DEFAULT_DURATION_SECS);
    assert_eq!(DEFAULT_DURATION_SECS, 900);
}

#[test]
fn huge_durations_saturate_instead_of_overflowing() {
    let text = "Rest 4294967295 seconds, then rest 1 second";
    assert_eq!(
        parse_timer_durations(text),
        vec!["4294967295 seconds", "1 second"]
    );
    assert_eq!(parse_time_taken(text), u32::MAX);
    assert_eq!(parse_to_time("99999999999 hours"), u32::MAX);
}
