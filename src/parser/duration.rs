// src/parser/duration.rs

//! Natural-language duration extraction.
//!
//! Two phases:
//! 1. [`parse_timer_durations`] finds every span of step text that reads
//!    like a duration ("5 min", "1–2 minutes", "five to 10 minutes").
//! 2. [`parse_to_time`] resolves one span to whole seconds.
//!
//! Recipe text is unstructured, so nothing here fails: a span that cannot
//! be resolved falls back to [`DEFAULT_DURATION_SECS`].

use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

/// Seconds used for a matched span whose numbers and units don't line up.
pub const DEFAULT_DURATION_SECS: u32 = 900;

/// Unit spellings grouped by scale. Longer spellings come first so that a
/// prefix ("min", "s") never wins over the full word.
const MINUTE_UNITS: &[&str] = &["minutes", "minute", "mins", "min"];
const HOUR_UNITS: &[&str] = &["hours", "hour", "h"];
const SECOND_UNITS: &[&str] = &["seconds", "second", "secs", "sec", "s"];

const RANGE_DELIMITERS: &[&str] = &["-", "–", r"\bto\b", r"\bor\b"];

const NUMBER_WORDS: &[(&str, f64)] = &[
    ("fifteen", 15.0),
    ("twenty", 20.0),
    ("three", 3.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("zero", 0.0),
    ("four", 4.0),
    ("five", 5.0),
    ("nine", 9.0),
    ("one", 1.0),
    ("two", 2.0),
    ("six", 6.0),
    ("ten", 10.0),
];

/// Fractions, decimals and whole numbers, or a spelled-out number word.
///
/// A leading `-` is never part of a number; it reads as a range delimiter.
fn number_pattern() -> String {
    let words: Vec<&str> = NUMBER_WORDS.iter().map(|(w, _)| *w).collect();
    format!(
        r"(?:[1-9]\d*/[1-9]\d*|0\.\d+|[1-9]\d*(?:\.\d+)?|\b(?:{})\b)",
        words.join("|")
    )
}

fn unit_pattern() -> String {
    let all: Vec<&str> = MINUTE_UNITS
        .iter()
        .chain(HOUR_UNITS)
        .chain(SECOND_UNITS)
        .copied()
        .collect();
    format!("(?:{})", all.join("|"))
}

fn delimiter_pattern() -> String {
    format!("(?:{})", RANGE_DELIMITERS.join("|"))
}

/// Between a number and its unit: nothing but spaces, or one short filler
/// word surrounded by spaces ("10 more minutes"). Keeping the unit on its
/// own stops "2 eggs" from reading as two seconds.
const FILLER: &str = r"(?:\s+[a-z]{1,6}\s+|\s*)";

static SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let num = number_pattern();
    let unit = unit_pattern();
    let delim = delimiter_pattern();
    let segment = format!(r"{num}{FILLER}{unit}\b");
    let pattern = format!(
        r"(?i)(?:{num}(?:\s*{unit}\b)?\s*{delim}\s*)?{segment}(?:\s+(?:and\s+)?{segment})*"
    );
    Regex::new(&pattern).expect("duration span pattern is valid")
});

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", number_pattern())).expect("number pattern is valid")
});

static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)(?:\d|\b)({})\b", unit_pattern())).expect("unit pattern is valid")
});

static DELIMITER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("(?i){}", delimiter_pattern())).expect("delimiter pattern is valid")
});

static MINUTE_RE: LazyLock<Regex> = LazyLock::new(|| exact_unit_re(MINUTE_UNITS));
static HOUR_RE: LazyLock<Regex> = LazyLock::new(|| exact_unit_re(HOUR_UNITS));
static SECOND_RE: LazyLock<Regex> = LazyLock::new(|| exact_unit_re(SECOND_UNITS));

fn exact_unit_re(units: &[&str]) -> Regex {
    Regex::new(&format!("(?i)^(?:{})$", units.join("|"))).expect("unit pattern is valid")
}

/// Return every duration-like span in `text`, in order of appearance.
pub fn parse_timer_durations(text: &str) -> Vec<String> {
    SPAN_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Resolve a single span to whole seconds.
///
/// - As many numbers as units: pair them up and sum. If the span is a range
///   (it has a delimiter and more than one number) the result is the
///   average of the two halves instead.
/// - Two numbers sharing one unit ("1 to 2 minutes"): the midpoint.
/// - Anything else: [`DEFAULT_DURATION_SECS`].
pub fn parse_to_time(span: &str) -> u32 {
    let numbers: Vec<(usize, f64)> = NUMBER_RE
        .find_iter(span)
        .filter_map(|m| number_value(m.as_str()).map(|v| (m.start(), v)))
        .collect();
    let scales: Vec<f64> = UNIT_RE
        .captures_iter(span)
        .filter_map(|c| c.get(1))
        .map(|m| unit_scale(m.as_str()))
        .collect();

    let seconds = if !numbers.is_empty() && numbers.len() == scales.len() {
        let scaled: Vec<(usize, f64)> = numbers
            .iter()
            .zip(&scales)
            .map(|((pos, n), scale)| (*pos, n * scale))
            .collect();

        match range_split(span, &scaled) {
            Some(split) if numbers.len() > 1 => {
                let first: f64 = scaled[..split].iter().map(|(_, v)| v).sum();
                let second: f64 = scaled[split..].iter().map(|(_, v)| v).sum();
                ((first + second) / 2.0) as u32
            }
            _ => scaled.iter().map(|(_, v)| v).sum::<f64>() as u32,
        }
    } else if numbers.len() == 2 && scales.len() == 1 {
        ((numbers[0].1 + numbers[1].1) / 2.0 * scales[0]).round() as u32
    } else {
        trace!(
            text = span,
            numbers = numbers.len(),
            units = scales.len(),
            "unresolvable duration span"
        );
        DEFAULT_DURATION_SECS
    };

    trace!(text = span, seconds, "resolved duration span");
    seconds
}

/// Total seconds over every span found in `text`; zero when there are none.
///
/// Saturates at `u32::MAX` instead of overflowing.
pub fn parse_time_taken(text: &str) -> u32 {
    parse_timer_durations(text)
        .iter()
        .map(|span| parse_to_time(span))
        .fold(0u32, u32::saturating_add)
}

/// Where a ranged span splits into its lower and upper half.
///
/// Returns `None` when the span has no delimiter. The split follows the
/// first delimiter that sits between two values; failing that, the values
/// are cut in half by count.
fn range_split(span: &str, scaled: &[(usize, f64)]) -> Option<usize> {
    let first_pos = scaled.first()?.0;
    let mut delimiters = DELIMITER_RE.find_iter(span).peekable();
    delimiters.peek()?;

    let at_delimiter = delimiters
        .filter(|d| d.start() > first_pos)
        .map(|d| scaled.iter().filter(|(pos, _)| *pos < d.start()).count())
        .find(|split| *split > 0 && *split < scaled.len());

    Some(at_delimiter.unwrap_or(scaled.len() / 2))
}

fn number_value(token: &str) -> Option<f64> {
    let lower = token.to_lowercase();
    if let Some((_, value)) = NUMBER_WORDS.iter().find(|(w, _)| *w == lower) {
        return Some(*value);
    }
    if let Some((num, den)) = lower.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        return (den != 0.0).then_some(num / den);
    }
    lower.parse().ok()
}

/// Seconds per unit. Minutes are checked first so that the bare `s` of the
/// seconds group can never claim a minute spelling.
fn unit_scale(unit: &str) -> f64 {
    if MINUTE_RE.is_match(unit) {
        60.0
    } else if HOUR_RE.is_match(unit) {
        3600.0
    } else if SECOND_RE.is_match(unit) {
        1.0
    } else {
        0.0
    }
}
