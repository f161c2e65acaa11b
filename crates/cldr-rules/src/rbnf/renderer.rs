//! Numeric pattern rendering for `=#,##0=`-style substitutions.

/// Formats a number according to a decimal pattern such as `#,##0` or `0.00`.
///
/// Any `Fn(f64, &str) -> String` is a renderer, so a locale-aware formatter can
/// be plugged into a registry with a closure.
pub trait NumberRenderer: Send + Sync {
    fn render(&self, value: f64, pattern: &str) -> String;
}

impl<F> NumberRenderer for F
where
    F: Fn(f64, &str) -> String + Send + Sync,
{
    fn render(&self, value: f64, pattern: &str) -> String {
        self(value, pattern)
    }
}

/// Locale-neutral renderer: `,` grouping separator and `.` decimal point.
///
/// # Example
///
/// ```
/// use cldr_rules::rbnf::{NumberRenderer, PlainNumberRenderer};
///
/// let renderer = PlainNumberRenderer;
/// assert_eq!(renderer.render(1234567.0, "#,##0"), "1,234,567");
/// assert_eq!(renderer.render(3.14159, "0.00"), "3.14");
/// assert_eq!(renderer.render(2.5, "#,##0.#"), "2.5");
/// assert_eq!(renderer.render(2.0, "#,##0.#"), "2");
/// assert_eq!(renderer.render(7.0, "00"), "07");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNumberRenderer;

impl NumberRenderer for PlainNumberRenderer {
    fn render(&self, value: f64, pattern: &str) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        let sign = if value.is_sign_negative() && value != 0.0 { "-" } else { "" };
        if value.is_infinite() {
            return format!("{sign}∞");
        }

        let pattern = DecimalPattern::parse(pattern);
        let rounded = format!("{:.*}", pattern.max_fraction, value.abs());
        let (integer, fraction) = rounded.split_once('.').unwrap_or((&rounded, ""));

        let mut fraction = fraction.to_string();
        while fraction.len() > pattern.min_fraction && fraction.ends_with('0') {
            fraction.pop();
        }

        let integer = pad_integer(integer, pattern.min_integer);
        let integer = match pattern.grouping {
            Some(size) => group(&integer, size),
            None => integer,
        };

        if fraction.is_empty() {
            format!("{sign}{integer}")
        } else {
            format!("{sign}{integer}.{fraction}")
        }
    }
}

/// The parts of a decimal pattern the plain renderer honors.
#[derive(Debug, PartialEq, Eq)]
struct DecimalPattern {
    min_integer: usize,
    grouping: Option<usize>,
    min_fraction: usize,
    max_fraction: usize,
}

impl DecimalPattern {
    fn parse(pattern: &str) -> DecimalPattern {
        let (integer, fraction) = pattern.split_once('.').unwrap_or((pattern, ""));
        let count = |text: &str, c: char| text.chars().filter(|x| *x == c).count();

        let grouping = integer.rfind(',').map(|pos| {
            let size = integer[pos + 1..]
                .chars()
                .filter(|c| matches!(c, '#' | '0'))
                .count();
            if size == 0 { 3 } else { size }
        });

        let min_fraction = count(fraction, '0');
        DecimalPattern {
            min_integer: count(integer, '0'),
            grouping,
            min_fraction,
            max_fraction: min_fraction + count(fraction, '#'),
        }
    }
}

fn pad_integer(digits: &str, min_integer: usize) -> String {
    let digits = if min_integer == 0 {
        digits.trim_start_matches('0')
    } else {
        digits
    };
    format!("{digits:0>min_integer$}")
}

/// Insert `,` every `size` digits from the right.
fn group(digits: &str, size: usize) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len.div_euclid(size));
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % size == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
