//! Digit glyph handling for amounts and phone numbers typed on Persian keyboards.

const PERSIAN_ZERO: u32 = 0x06F0;
const ARABIC_INDIC_ZERO: u32 = 0x0660;
const GROUP_SEPARATOR: char = '\u{066C}';

fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        '\u{06F0}'..='\u{06F9}' => Some(c as u32 - PERSIAN_ZERO),
        '\u{0660}'..='\u{0669}' => Some(c as u32 - ARABIC_INDIC_ZERO),
        _ => None,
    }
}

/// Replaces Persian and Arabic-Indic digits with their Latin counterparts,
/// leaving every other character untouched.
pub fn to_latin_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match digit_value(c) {
            Some(d) => char::from_digit(d, 10).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Drops everything that isn't a digit in one of the accepted scripts and
/// normalizes what's left to Latin digits.
pub fn keep_digits(input: &str) -> String {
    input
        .chars()
        .filter_map(digit_value)
        .filter_map(|d| char::from_digit(d, 10))
        .collect()
}

/// Parses a free-form amount field. Returns `None` for empty input, zero, or a
/// value that overflows `u64`.
pub fn parse_amount(raw: &str) -> Option<u64> {
    keep_digits(raw).parse::<u64>().ok().filter(|n| *n > 0)
}

pub fn to_persian_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32(PERSIAN_ZERO + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// Renders `n` the way `fa-IR` locale formatting does: Persian digits grouped
/// by thousands with the Arabic thousands separator.
pub fn format_grouped(n: u64) -> String {
    let latin = n.to_string();
    let len = latin.len();
    let mut out = String::with_capacity(len * 3);
    for (i, c) in latin.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    to_persian_digits(&out)
}

pub fn format_toman(n: u64) -> String {
    format!("{} تومان", format_grouped(n))
}

/// What the custom amount field should display after an edit: the grouped
/// rendering of the parsed value, or nothing when it doesn't parse.
pub fn reformat_amount_field(raw: &str) -> String {
    parse_amount(raw).map(format_grouped).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persian_and_arabic_digits_normalize() {
        assert_eq!(to_latin_digits("۰۹۱۲"), "0912");
        assert_eq!(to_latin_digits("٠٩x"), "09x");
        assert_eq!(to_latin_digits("abc"), "abc");
    }

    #[test]
    fn keep_digits_strips_separators_and_letters() {
        assert_eq!(keep_digits("۱٬۵۰۰٬۰۰۰"), "1500000");
        assert_eq!(keep_digits("12a,3 4"), "1234");
        assert_eq!(keep_digits("تومان"), "");
    }

    #[test]
    fn parse_amount_rejects_zero_and_empty() {
        assert_eq!(parse_amount("1500000"), Some(1_500_000));
        assert_eq!(parse_amount("۲۰۰۰"), Some(2000));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("000"), None);
        assert_eq!(parse_amount("abc"), None);
    }

    #[test]
    fn parse_amount_rejects_overflow() {
        assert_eq!(parse_amount("99999999999999999999999"), None);
    }

    #[test]
    fn grouped_formatting_matches_fa_ir() {
        assert_eq!(format_grouped(1_500_000), "۱٬۵۰۰٬۰۰۰");
        assert_eq!(format_grouped(600_000), "۶۰۰٬۰۰۰");
        assert_eq!(format_grouped(100), "۱۰۰");
        assert_eq!(format_grouped(0), "۰");
        assert_eq!(format_toman(250_000), "۲۵۰٬۰۰۰ تومان");
    }

    #[test]
    fn amount_field_reformat_drops_invalid_text() {
        assert_eq!(reformat_amount_field("۱۲۳۴a"), "۱٬۲۳۴");
        assert_eq!(reformat_amount_field("0"), "");
        assert_eq!(reformat_amount_field("abc"), "");
    }
}
