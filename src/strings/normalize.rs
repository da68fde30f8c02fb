/*!
 * Text normalization for subtitle similarity comparison.
 *
 * Comparisons never run on raw subtitle content. Instead each subtitle gets a
 * `content_sim` form that is lower-cased, has digit sequences spelled out as
 * English words, has its paragraph number stripped, and has all whitespace
 * collapsed. Two subtitles that differ only in those respects compare as
 * identical.
 */

use once_cell::sync::Lazy;
use regex::Regex;

/// Leading paragraph number, e.g. `12 ` at the start of a paragraph
static PARAGRAPH_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[0-9]+[.)]?\s+").expect("Invalid paragraph number regex")
});

/// Any run of whitespace, including newlines
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

/// ASCII digit runs, other scripts' digits stay as written
static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]+").expect("Invalid digits regex")
});

/// Digit runs longer than this are spelled digit by digit
const MAX_SPELLED_DIGITS: usize = 12;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 3] = [
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

/// Collapse every whitespace run to a single space.
///
/// Leading and trailing whitespace is kept as a single space so that
/// subtitle content still ends where the next subtitle begins.
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").into_owned()
}

/// Build the comparison form of a subtitle's content.
///
/// `first_in_para` enables stripping of a leading paragraph number.
pub fn content_sim(content: &str, first_in_para: bool) -> String {
    let collapsed = collapse_whitespace(content);
    let without_number = if first_in_para {
        PARAGRAPH_NUMBER_REGEX.replace(&collapsed, "").into_owned()
    } else {
        collapsed
    };
    let spelled = spell_out_digits(&without_number.to_lowercase());

    collapse_whitespace(&spelled).trim().to_string()
}

/// Replace every digit run in `text` with its English words.
///
/// Words are separated from adjacent letters by a space, so `z123`
/// becomes `z one hundred twenty-three`.
pub fn spell_out_digits(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);
    let mut last_end = 0;

    for digits in DIGITS_REGEX.find_iter(text) {
        let before = &text[last_end..digits.start()];
        result.push_str(before);
        if result.chars().last().is_some_and(|c| c.is_alphanumeric()) {
            result.push(' ');
        }
        result.push_str(&spell_digit_run(digits.as_str()));
        if text[digits.end()..].chars().next().is_some_and(|c| c.is_alphanumeric()) {
            result.push(' ');
        }
        last_end = digits.end();
    }
    result.push_str(&text[last_end..]);

    result
}

/// Spell a run of ASCII digits. Leading zeros are spelled individually.
fn spell_digit_run(digits: &str) -> String {
    if digits.len() > MAX_SPELLED_DIGITS {
        return digits
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|d| ONES[d as usize])
            .collect::<Vec<_>>()
            .join(" ");
    }

    let significant = digits.trim_start_matches('0');
    let mut words: Vec<String> = std::iter::repeat("zero".to_string())
        .take(digits.len() - significant.len())
        .collect();
    if significant.is_empty() {
        return words.join(" ");
    }
    // At most 12 ASCII digits, always fits
    let value = significant
        .bytes()
        .fold(0u64, |value, digit| value * 10 + u64::from(digit - b'0'));
    words.push(spell_number(value));

    words.join(" ")
}

/// Spell a number below one trillion in English words.
pub fn spell_number(value: u64) -> String {
    if value == 0 {
        return ONES[0].to_string();
    }

    let mut parts = Vec::new();
    let mut rest = value;
    for (scale, name) in SCALES {
        if rest >= scale {
            parts.push(format!("{} {}", spell_below_thousand(rest / scale), name));
            rest %= scale;
        }
    }
    if rest > 0 {
        parts.push(spell_below_thousand(rest));
    }

    parts.join(" ")
}

fn spell_below_thousand(value: u64) -> String {
    let hundreds = value / 100;
    let rest = value % 100;
    let mut parts = Vec::new();

    if hundreds > 0 {
        parts.push(format!("{} hundred", ONES[hundreds as usize]));
    }
    if rest >= 20 {
        let tens = TENS[(rest / 10) as usize];
        if rest % 10 == 0 {
            parts.push(tens.to_string());
        } else {
            parts.push(format!("{}-{}", tens, ONES[(rest % 10) as usize]));
        }
    } else if rest > 0 {
        parts.push(ONES[rest as usize].to_string());
    }

    parts.join(" ")
}
