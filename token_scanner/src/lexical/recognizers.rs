//! Token recognizers
//!
//! Each recognizer starts at a character the dispatcher has already
//! classified and returns the token together with the exclusive end index of
//! what it consumed. Lines are scanned as `char` slices so columns count
//! characters, not bytes.
use super::classifier::{is_digit, is_identifier_char};
use crate::tokens::{Token, TokenCategory};
use crate::utils::Position;

/// A token and the index just past its last character
#[derive(Debug, Clone, PartialEq)]
pub struct Recognized {
    pub token: Token,
    pub end: usize,
}

/// Result of looking up a leading punctuation character in the operator table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelimiterMatch {
    /// Operator spelling of this many characters
    Operator(usize),
    /// `.` followed by a digit starts a floating literal instead
    Number,
}

fn lexeme(line: &[char], start: usize, end: usize) -> String {
    line[start..end].iter().collect()
}

/// Letters, digits and underscores following a letter or underscore
pub fn recognize_identifier(line: &[char], start: usize, line_no: u32) -> Recognized {
    let mut end = start + 1;
    while end < line.len() && is_identifier_char(line[end]) {
        end += 1;
    }

    Recognized {
        token: Token::identifier(lexeme(line, start, end), Position::at_index(line_no, start)),
        end,
    }
}

/// Digits with at most one decimal point.
///
/// `begins_with_integer` is false when the literal starts at a `.`; that
/// point is then the only one allowed and a later `.` ends the literal.
pub fn recognize_number(
    line: &[char],
    start: usize,
    begins_with_integer: bool,
    line_no: u32,
) -> Recognized {
    let mut is_integer = begins_with_integer;
    let mut end = start + 1;

    while end < line.len() {
        match line[end] {
            ch if is_digit(ch) => end += 1,
            '.' if is_integer => {
                is_integer = false;
                end += 1;
            }
            _ => break,
        }
    }

    let text = lexeme(line, start, end);
    let position = Position::at_index(line_no, start);
    let token = if is_integer {
        let value = parse_integer(&text);
        Token::integer(text, value, position)
    } else {
        let value = text.parse::<f64>().unwrap_or(0.0);
        Token::double(text, value, position)
    };

    Recognized { token, end }
}

/// Decimal value of the leading digits as a C `int` reads it: accumulated
/// as a saturating `long`, then truncated to 32 bits.
pub fn parse_integer(text: &str) -> i32 {
    let wide = text
        .chars()
        .map_while(|ch| ch.to_digit(10))
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit))
        });
    wide as i32
}

/// Resolve the character following a backslash
pub fn change_char(ch: char) -> char {
    match ch {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'a' => '\u{07}',
        'b' => '\u{08}',
        'f' => '\u{0c}',
        'v' => '\u{0b}',
        other => other,
    }
}

/// String or character literal opened by `line[start]`.
///
/// The returned flag is false when the line ended before the closing
/// boundary; the literal is still produced.
pub fn recognize_quoted(
    line: &[char],
    start: usize,
    category: TokenCategory,
    line_no: u32,
) -> (Recognized, bool) {
    let boundary = line[start];
    let mut contents = String::new();
    let mut index = start + 1;

    while index < line.len() && line[index] != boundary {
        if line[index] == '\\' {
            match line.get(index + 1) {
                Some(&escaped) => {
                    contents.push(change_char(escaped));
                    index += 2;
                }
                None => {
                    contents.push('\\');
                    index += 1;
                }
            }
        } else {
            contents.push(line[index]);
            index += 1;
        }
    }

    let terminated = index < line.len();
    let end = if terminated { index + 1 } else { index };
    let token = Token::quoted(
        lexeme(line, start, end),
        contents,
        category,
        Position::at_index(line_no, start),
    );

    (Recognized { token, end }, terminated)
}

/// Longest operator spelling starting at `line[start]`
pub fn match_delimiter(line: &[char], start: usize) -> DelimiterMatch {
    let next = line.get(start + 1).copied();
    let third = line.get(start + 2).copied();

    let len = match (line[start], next) {
        ('+', Some('=' | '+')) => 2,
        ('-', Some('=' | '-')) => 2,
        ('-', Some('>')) if third == Some('*') => 3,
        ('-', Some('>')) => 2,
        ('*', Some('=' | '/')) => 2,
        ('/', Some('=' | '/' | '*')) => 2,
        ('<' | '>', Some('=')) => 2,
        ('<', Some('<')) | ('>', Some('>')) if third == Some('=') => 3,
        ('<', Some('<')) | ('>', Some('>')) => 2,
        ('%' | '!' | '=' | '^', Some('=')) => 2,
        ('&', Some('&' | '=')) => 2,
        ('|', Some('|' | '=')) => 2,
        (':', Some(':')) | ('#', Some('#')) => 2,
        ('.', Some('*')) => 2,
        ('.', Some(ch)) if is_digit(ch) => return DelimiterMatch::Number,
        _ => 1,
    };

    DelimiterMatch::Operator(len)
}

/// Operator token, or a floating literal when `.` is followed by a digit
pub fn recognize_delimiter(line: &[char], start: usize, line_no: u32) -> Recognized {
    match match_delimiter(line, start) {
        DelimiterMatch::Number => recognize_number(line, start, false, line_no),
        DelimiterMatch::Operator(len) => {
            let end = start + len;
            let position = Position::at_index(line_no, start);
            Recognized {
                token: Token::delimiter(lexeme(line, start, end), position),
                end,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn delimiter_lexeme(s: &str) -> String {
        let line = chars(s);
        recognize_delimiter(&line, 0, 1).token.lexeme
    }

    #[test]
    fn identifier_stops_at_first_non_word_char() {
        let line = chars("foo_1+bar");
        let r = recognize_identifier(&line, 0, 1);
        assert_eq!(r.token.lexeme, "foo_1");
        assert_eq!(r.end, 5);
        assert_eq!(r.token.position, Position::new(1, 1));
    }

    #[test]
    fn integer_and_double_values() {
        let line = chars("123;");
        let r = recognize_number(&line, 0, true, 1);
        assert_eq!(r.token.category, TokenCategory::Integer);
        assert_eq!(r.token.int_value, 123);
        assert_eq!(r.end, 3);

        let line = chars("3.25 ");
        let r = recognize_number(&line, 0, true, 1);
        assert_eq!(r.token.category, TokenCategory::Double);
        assert_eq!(r.token.double_value, 3.25);
    }

    #[test]
    fn second_decimal_point_ends_the_literal() {
        let line = chars("12.5.3");
        let r = recognize_number(&line, 0, true, 1);
        assert_eq!(r.token.lexeme, "12.5");
        assert_eq!(r.end, 4);
    }

    #[test]
    fn trailing_point_makes_a_double() {
        let line = chars("7.");
        let r = recognize_number(&line, 0, true, 1);
        assert_eq!(r.token.category, TokenCategory::Double);
        assert_eq!(r.token.double_value, 7.0);
    }

    #[test]
    fn integer_parse_wraps_instead_of_failing() {
        assert_eq!(parse_integer("42"), 42);
        assert_eq!(parse_integer("2147483647"), i32::MAX);
        assert_eq!(parse_integer("2147483648"), i32::MIN);
    }

    #[test]
    fn integer_parse_truncates_to_32_bits() {
        assert_eq!(parse_integer("3000000000"), -1_294_967_296);
        assert_eq!(parse_integer("4294967296"), 0);
    }

    #[test]
    fn integer_parse_saturates_before_truncating() {
        assert_eq!(parse_integer("99999999999999999999"), -1);
        assert_eq!(parse_integer("9223372036854775808"), -1);
    }

    #[test]
    fn escapes_resolve_in_contents_only() {
        let line = chars(r#""a\tb" rest"#);
        let (r, terminated) = recognize_quoted(&line, 0, TokenCategory::String, 1);
        assert!(terminated);
        assert_eq!(r.token.lexeme, r#""a\tb""#);
        assert_eq!(r.token.contents, "a\tb");
        assert_eq!(r.end, 6);
    }

    #[test]
    fn every_escape_maps() {
        let mapped: String = "nrtabfvq\\'".chars().map(change_char).collect();
        assert_eq!(mapped, "\n\r\t\u{07}\u{08}\u{0c}\u{0b}q\\'");
    }

    #[test]
    fn escaped_boundary_does_not_close_literal() {
        let line = chars(r#"'\''"#);
        let (r, terminated) = recognize_quoted(&line, 0, TokenCategory::Char, 1);
        assert!(terminated);
        assert_eq!(r.token.contents, "'");
        assert_eq!(r.token.lexeme, r#"'\''"#);
    }

    #[test]
    fn unterminated_literal_is_accepted() {
        let line = chars(r#""abc"#);
        let (r, terminated) = recognize_quoted(&line, 0, TokenCategory::String, 1);
        assert!(!terminated);
        assert_eq!(r.token.lexeme, r#""abc"#);
        assert_eq!(r.token.contents, "abc");
        assert_eq!(r.end, 4);
    }

    #[test]
    fn backslash_at_end_of_line_is_kept() {
        let line = chars(r#""ab\"#);
        let (r, terminated) = recognize_quoted(&line, 0, TokenCategory::String, 1);
        assert!(!terminated);
        assert_eq!(r.token.contents, "ab\\");
        assert_eq!(r.token.lexeme, r#""ab\"#);
    }

    #[test]
    fn operator_table_is_greedy() {
        for op in [
            "+=", "++", "-=", "--", "->", "->*", "*=", "*/", "/=", "//", "/*", "%=", "<=", "<<",
            "<<=", ">=", ">>", ">>=", "!=", "==", "&&", "&=", "||", "|=", "::", "##", ".*", "^=",
        ] {
            assert_eq!(delimiter_lexeme(op), op);
        }
    }

    #[test]
    fn three_char_forms_need_the_doubled_prefix() {
        assert_eq!(delimiter_lexeme("<=="), "<=");
        assert_eq!(delimiter_lexeme("-=*"), "-=");
        assert_eq!(delimiter_lexeme("+++"), "++");
        assert_eq!(delimiter_lexeme("=>"), "=");
    }

    #[test]
    fn unlisted_punctuation_is_single_char() {
        for single in ["~", "`", "(", ")", "@", "$", "?", "\\", ";"] {
            assert_eq!(delimiter_lexeme(single), single);
        }
    }

    #[test]
    fn leading_point_with_digit_redirects_to_number() {
        let line = chars(".5.3");
        assert_eq!(match_delimiter(&line, 0), DelimiterMatch::Number);
        let r = recognize_delimiter(&line, 0, 1);
        assert_eq!(r.token.category, TokenCategory::Double);
        assert_eq!(r.token.lexeme, ".5");
        assert_eq!(r.token.double_value, 0.5);
        assert_eq!(r.end, 2);
    }

    #[test]
    fn lone_point_is_a_delimiter() {
        let line = chars(".y");
        assert_eq!(match_delimiter(&line, 0), DelimiterMatch::Operator(1));
        assert_eq!(delimiter_lexeme("."), ".");
    }
}
