//! Scalar literals and tuple value extraction
//!
//! Literal grammar used inside backup tuples:
//!
//! - text: `'...'`, an embedded quote is written as two quotes
//! - null: `NULL`, any letter case, unquoted
//! - number: optional `-`, digits, optional `.` and digits, unquoted
//!
//! [`extract_values`] is deliberately lenient. Anything between literals that
//! is not one of the three forms (commas, whitespace, stray punctuation or
//! bare words) is skipped, so irregular separators still decode but unknown
//! tokens disappear without a trace.

use std::fmt;

/// Quote delimiter for text literals
pub const QUOTE: u8 = b'\'';

/// Unquoted null token
pub const NULL_TOKEN: &str = "NULL";

/// One typed value read from a tuple
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Quoted text with quote doubling undone
    Text(String),
    /// Bare whole number that fits in an `i64`
    Integer(i64),
    /// Any other bare decimal number
    Number(f64),
    /// The null token
    Null,
}

impl SqlValue {
    /// The value as text
    ///
    /// Numbers render in plain decimal form; null has no text.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::Integer(n) => Some(n.to_string()),
            Self::Number(n) => Some(n.to_string()),
            Self::Null => None,
        }
    }

    /// The value as a number
    ///
    /// Text is accepted when it parses as a finite decimal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Self::Null => None,
        }
    }

    /// The value as a whole number
    ///
    /// Integer literals come back exactly. Fractional numbers are truncated
    /// toward zero.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::Number(n) if n.is_finite() => Some(*n as i64),
            Self::Text(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().filter(|n| n.is_finite()).map(|n| n as i64))
            }
            _ => None,
        }
    }

    /// Check if this is the null token
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Render the value as a literal
    pub fn to_literal(&self) -> String {
        match self {
            Self::Text(s) => escape_literal(Some(s)),
            Self::Integer(n) => n.to_string(),
            Self::Number(n) => number_literal(*n),
            Self::Null => NULL_TOKEN.to_string(),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Escape a text value as a literal
///
/// Absent values become the null token.
pub fn escape_literal(value: Option<&str>) -> String {
    match value {
        Some(text) => {
            let mut out = String::with_capacity(text.len() + 2);
            out.push('\'');
            for c in text.chars() {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
            out.push('\'');
            out
        }
        None => NULL_TOKEN.to_string(),
    }
}

/// Render a number as an unquoted literal
///
/// Non-finite values have no numeric literal and are written as null.
pub fn number_literal(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        NULL_TOKEN.to_string()
    }
}

/// Extract the typed values from the inner text of one tuple
///
/// Matches, left to right, a quoted run, then the null token, then a number.
/// Unmatched bytes are skipped.
pub fn extract_values(inner: &str) -> Vec<SqlValue> {
    let bytes = inner.as_bytes();
    let mut values = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == QUOTE {
            if let Some((text, next)) = read_quoted(inner, i) {
                values.push(SqlValue::Text(text));
                i = next;
                continue;
            }
            // Unterminated quote: skip it and keep going
            i += 1;
            continue;
        }

        if let Some(next) = match_null(bytes, i) {
            values.push(SqlValue::Null);
            i = next;
            continue;
        }

        if let Some((number, next)) = read_number(inner, i) {
            values.push(number);
            i = next;
            continue;
        }

        i += 1;
    }

    values
}

/// Read a quoted run starting at `start`, returning the unescaped text and
/// the index just past the closing quote
fn read_quoted(src: &str, start: usize) -> Option<(String, usize)> {
    let bytes = src.as_bytes();
    let mut text = String::new();
    let mut segment = start + 1;
    let mut i = start + 1;

    while i < bytes.len() {
        if bytes[i] == QUOTE {
            text.push_str(&src[segment..i]);
            if bytes.get(i + 1) == Some(&QUOTE) {
                text.push('\'');
                i += 2;
                segment = i;
                continue;
            }
            return Some((text, i + 1));
        }
        i += 1;
    }

    None
}

/// Match a standalone null token at `start`
fn match_null(bytes: &[u8], start: usize) -> Option<usize> {
    let end = start + NULL_TOKEN.len();
    let candidate = bytes.get(start..end)?;
    if !candidate.eq_ignore_ascii_case(NULL_TOKEN.as_bytes()) {
        return None;
    }

    let before_ok = start == 0 || !is_word_byte(bytes[start - 1]);
    let after_ok = bytes.get(end).map_or(true, |b| !is_word_byte(*b));
    if before_ok && after_ok {
        Some(end)
    } else {
        None
    }
}

/// Read `-?digits(.digits)?` starting at `start`
///
/// Whole numbers that fit in an `i64` are kept exact.
fn read_number(src: &str, start: usize) -> Option<(SqlValue, usize)> {
    let bytes = src.as_bytes();
    let mut i = start;

    if bytes[i] == b'-' {
        i += 1;
    }
    let digits_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }

    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }

    let token = &src[start..i];
    if let Ok(n) = token.parse::<i64>() {
        return Some((SqlValue::Integer(n), i));
    }
    token.parse::<f64>().ok().map(|n| (SqlValue::Number(n), i))
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> SqlValue {
        SqlValue::Text(s.to_string())
    }

    #[test]
    fn test_escape_literal() {
        assert_eq!(escape_literal(Some("ATM fee")), "'ATM fee'");
        assert_eq!(escape_literal(Some("O'Brien")), "'O''Brien'");
        assert_eq!(escape_literal(Some("")), "''");
        assert_eq!(escape_literal(None), "NULL");
    }

    #[test]
    fn test_number_literal() {
        assert_eq!(number_literal(-50000.0), "-50000");
        assert_eq!(number_literal(0.25), "0.25");
        assert_eq!(number_literal(f64::INFINITY), "NULL");
    }

    #[test]
    fn test_extract_mixed_values() {
        let values = extract_values("'s1', '01/01/2024', -50000, NULL, 12.75");
        assert_eq!(
            values,
            vec![
                text("s1"),
                text("01/01/2024"),
                SqlValue::Integer(-50000),
                SqlValue::Null,
                SqlValue::Number(12.75),
            ]
        );
    }

    #[test]
    fn test_extract_doubled_quotes() {
        let values = extract_values("'O''Brien''s \"gift\"'");
        assert_eq!(values, vec![text("O'Brien's \"gift\"")]);
    }

    #[test]
    fn test_extract_reserved_punctuation_in_text() {
        let values = extract_values("'a), (b', '; DROP', 'x,y'");
        assert_eq!(values, vec![text("a), (b"), text("; DROP"), text("x,y")]);
    }

    #[test]
    fn test_null_is_case_insensitive_and_standalone() {
        assert_eq!(extract_values("null, Null"), vec![SqlValue::Null, SqlValue::Null]);
        // Part of a bare word: not a null token
        assert_eq!(extract_values("NULLABLE"), Vec::<SqlValue>::new());
    }

    #[test]
    fn test_irregular_separators_are_skipped() {
        let values = extract_values("  'a' ;; 'b'\n\t7 ");
        assert_eq!(values, vec![text("a"), text("b"), SqlValue::Integer(7)]);
    }

    #[test]
    fn test_unknown_tokens_are_dropped() {
        let values = extract_values("'a', TRUE, 'b'");
        assert_eq!(values, vec![text("a"), text("b")]);
    }

    #[test]
    fn test_number_edge_cases() {
        assert_eq!(extract_values("-"), Vec::<SqlValue>::new());
        assert_eq!(extract_values("5."), vec![SqlValue::Integer(5)]);
        assert_eq!(extract_values("-0.5"), vec![SqlValue::Number(-0.5)]);
    }

    #[test]
    fn test_unterminated_quote_is_skipped() {
        assert_eq!(extract_values("'abc"), Vec::<SqlValue>::new());
        assert_eq!(extract_values("1, 'abc"), vec![SqlValue::Integer(1)]);
    }

    #[test]
    fn test_non_ascii_text() {
        let values = extract_values("'Phí rút tiền ATM', 'Nguyễn Văn A'");
        assert_eq!(values, vec![text("Phí rút tiền ATM"), text("Nguyễn Văn A")]);
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(SqlValue::Integer(-5).as_text(), Some("-5".to_string()));
        assert_eq!(SqlValue::Integer(-5).as_number(), Some(-5.0));
        assert_eq!(text(" 42.5 ").as_number(), Some(42.5));
        assert_eq!(text("abc").as_number(), None);
        assert_eq!(SqlValue::Null.as_text(), None);
        assert!(SqlValue::Null.is_null());
    }

    #[test]
    fn test_to_literal() {
        assert_eq!(text("it's").to_literal(), "'it''s'");
        assert_eq!(SqlValue::Integer(3).to_literal(), "3");
        assert_eq!(SqlValue::Number(3.5).to_literal(), "3.5");
        assert_eq!(SqlValue::Null.to_string(), "NULL");
    }

    #[test]
    fn test_large_integers_stay_exact() {
        let big = i64::MAX - 1;
        let values = extract_values(&format!("{}, 9007199254740993", big));
        assert_eq!(values, vec![SqlValue::Integer(big), SqlValue::Integer(9_007_199_254_740_993)]);
        assert_eq!(values[1].as_integer(), Some(9_007_199_254_740_993));
    }

    #[test]
    fn test_integer_overflow_falls_back_to_decimal() {
        let values = extract_values("99999999999999999999");
        assert_eq!(values, vec![SqlValue::Number(1e20)]);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(SqlValue::Number(12.9).as_integer(), Some(12));
        assert_eq!(text(" 42 ").as_integer(), Some(42));
        assert_eq!(text("1.5").as_integer(), Some(1));
        assert_eq!(SqlValue::Null.as_integer(), None);
    }
}
