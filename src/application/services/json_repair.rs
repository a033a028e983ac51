//! Lenient JSON ingestion for bodies produced by low-code tooling.
//!
//! Workflow engines splice user text into JSON templates, so bodies arrive
//! with apostrophe-delimited values, raw newlines inside strings and stray
//! control characters. [`parse_with_repair`] tries a strict parse first, then
//! a single repair pass, and otherwise reports where the original text broke.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

/// Half-width of the context window reported around a syntax error.
pub const CONTEXT_RADIUS: usize = 100;

/// C0 and C1 control characters, except the whitespace JSON allows.
static STRAY_CONTROL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F-\x{9F}]").expect("valid regex")
});

#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Parsed(Value),
    /// Parsed only after repair; `text` is the repaired document.
    Repaired { value: Value, text: String },
}

impl ParseOutcome {
    pub fn value(&self) -> &Value {
        match self {
            ParseOutcome::Parsed(value) | ParseOutcome::Repaired { value, .. } => value,
        }
    }

    pub fn into_value(self) -> Value {
        match self {
            ParseOutcome::Parsed(value) | ParseOutcome::Repaired { value, .. } => value,
        }
    }

    pub fn was_repaired(&self) -> bool {
        matches!(self, ParseOutcome::Repaired { .. })
    }
}

/// Where and why a document failed to parse, measured on the text as sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonDiagnostic {
    pub message: String,
    /// Byte offset of the error in the original text.
    pub error_position: usize,
    pub line: usize,
    pub column: usize,
    pub context: String,
    pub problem_character: Option<char>,
}

impl JsonDiagnostic {
    pub fn from_error(text: &str, error: &serde_json::Error) -> Self {
        let line = error.line();
        let column = error.column();
        let error_position = (line_start(text, line) + column.saturating_sub(1)).min(text.len());
        let error_position = floor_char_boundary(text, error_position);

        Self {
            message: error.to_string(),
            error_position,
            line,
            column,
            context: context_window(text, error_position, CONTEXT_RADIUS).to_string(),
            problem_character: text[error_position..].chars().next(),
        }
    }
}

impl std::fmt::Display for JsonDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (position {})", self.message, self.error_position)
    }
}

impl std::error::Error for JsonDiagnostic {}

pub fn parse_with_repair(text: &str) -> Result<ParseOutcome, JsonDiagnostic> {
    let original_error = match serde_json::from_str::<Value>(text) {
        Ok(value) => return Ok(ParseOutcome::Parsed(value)),
        Err(e) => e,
    };

    tracing::warn!("Strict JSON parse failed, attempting repair: {}", original_error);

    let repaired = repair(text);
    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => {
            tracing::info!("JSON parsed after repair");
            Ok(ParseOutcome::Repaired {
                value,
                text: repaired,
            })
        }
        Err(e) => {
            tracing::error!("JSON still invalid after repair: {}", e);
            Err(JsonDiagnostic::from_error(text, &original_error))
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    Outside,
    DoubleQuoted,
    SingleQuoted,
}

/// Rewrites apostrophe-delimited literals as JSON strings, escapes raw
/// newlines, carriage returns and tabs inside strings, and drops the
/// remaining control characters.
pub fn repair(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + 16);
    let mut state = Scan::Outside;
    let mut escaped = false;
    let mut last_significant: Option<char> = None;

    for (i, &c) in chars.iter().enumerate() {
        match state {
            Scan::Outside => {
                match c {
                    '"' => state = Scan::DoubleQuoted,
                    '\'' if opens_literal(last_significant) => {
                        state = Scan::SingleQuoted;
                        out.push('"');
                        last_significant = Some('"');
                        continue;
                    }
                    _ => {}
                }
                out.push(c);
                if !c.is_whitespace() {
                    last_significant = Some(c);
                }
            }
            Scan::DoubleQuoted => {
                if escaped {
                    escaped = false;
                    out.push(c);
                    continue;
                }
                match c {
                    '\\' => {
                        escaped = true;
                        out.push(c);
                    }
                    '"' => {
                        state = Scan::Outside;
                        last_significant = Some('"');
                        out.push(c);
                    }
                    _ => push_string_char(&mut out, c),
                }
            }
            Scan::SingleQuoted => {
                if escaped {
                    escaped = false;
                    if c != '\'' {
                        out.push('\\');
                    }
                    push_string_char(&mut out, c);
                    continue;
                }
                match c {
                    '\\' => escaped = true,
                    '\'' if closes_literal(&chars[i + 1..]) => {
                        state = Scan::Outside;
                        last_significant = Some('"');
                        out.push('"');
                    }
                    '"' => out.push_str("\\\""),
                    _ => push_string_char(&mut out, c),
                }
            }
        }
    }

    STRAY_CONTROL.replace_all(&out, "").into_owned()
}

fn push_string_char(out: &mut String, c: char) {
    match c {
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        _ => out.push(c),
    }
}

fn opens_literal(previous: Option<char>) -> bool {
    matches!(previous, None | Some(':' | ',' | '[' | '{'))
}

/// An apostrophe ends a literal only when the next significant character
/// could follow a JSON value.
fn closes_literal(rest: &[char]) -> bool {
    match rest.iter().find(|c| !c.is_whitespace()) {
        None => true,
        Some(c) => matches!(c, ',' | '}' | ']' | ':'),
    }
}

fn line_start(text: &str, line: usize) -> usize {
    if line <= 1 {
        return 0;
    }
    text.match_indices('\n')
        .nth(line - 2)
        .map(|(index, _)| index + 1)
        .unwrap_or(text.len())
}

fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    while index < text.len() && !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

/// Up to `radius` bytes either side of `position`, widened to char boundaries.
pub fn context_window(text: &str, position: usize, radius: usize) -> &str {
    let start = floor_char_boundary(text, position.saturating_sub(radius));
    let end = ceil_char_boundary(text, (position + radius).min(text.len()));
    &text[start..end]
}

/// Characters that commonly break templated JSON, with their positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JsonIssues {
    pub newline_count: usize,
    pub carriage_return_count: usize,
    pub tab_count: usize,
    pub apostrophe_count: usize,
    pub control_characters: Vec<ControlCharacter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControlCharacter {
    pub position: usize,
    pub code: u32,
}

impl JsonIssues {
    pub fn scan(text: &str) -> Self {
        let mut issues = Self::default();
        for (position, c) in text.char_indices() {
            match c {
                '\n' => issues.newline_count += 1,
                '\r' => issues.carriage_return_count += 1,
                '\t' => issues.tab_count += 1,
                '\'' => issues.apostrophe_count += 1,
                c if c.is_control() => issues.control_characters.push(ControlCharacter {
                    position,
                    code: c as u32,
                }),
                _ => {}
            }
        }
        issues
    }

    /// Human readable summary lines, one per kind of issue found.
    pub fn describe(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.newline_count > 0 {
            lines.push(format!("Found {} newline characters", self.newline_count));
        }
        if self.carriage_return_count > 0 {
            lines.push(format!(
                "Found {} carriage return characters",
                self.carriage_return_count
            ));
        }
        if self.tab_count > 0 {
            lines.push(format!("Found {} tab characters", self.tab_count));
        }
        if self.apostrophe_count > 0 {
            lines.push(format!("Found {} apostrophes", self.apostrophe_count));
        }
        for control in &self.control_characters {
            lines.push(format!(
                "Control character U+{:04X} at position {}",
                control.code, control.position
            ));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_json_is_parsed_strictly() {
        let outcome = parse_with_repair(r#"{"email": "a@b.com"}"#).unwrap();
        assert!(!outcome.was_repaired());
        assert_eq!(outcome.value(), &json!({"email": "a@b.com"}));
    }

    #[test]
    fn test_single_quoted_value_is_repaired() {
        let outcome = parse_with_repair(r#"{"email": 'bad'}"#).unwrap();
        assert!(outcome.was_repaired());
        assert_eq!(outcome.into_value(), json!({"email": "bad"}));
    }

    #[test]
    fn test_apostrophe_inside_single_quoted_value() {
        let outcome = parse_with_repair(r#"{'x_feedback': 'it's "great"', 'n': 1}"#).unwrap();
        assert_eq!(
            outcome.into_value(),
            json!({"x_feedback": "it's \"great\"", "n": 1})
        );
    }

    #[test]
    fn test_apostrophes_in_double_quoted_strings_are_untouched() {
        let text = "{\"x_feedback\": \"don't\nstop\"}";
        let outcome = parse_with_repair(text).unwrap();
        assert_eq!(outcome.into_value(), json!({"x_feedback": "don't\nstop"}));
    }

    #[test]
    fn test_raw_control_characters_inside_strings() {
        let text = "{\"a\": \"tab\there\r\nnext\u{0001}\"}";
        let outcome = parse_with_repair(text).unwrap();
        assert_eq!(outcome.into_value(), json!({"a": "tab\there\r\nnext"}));
    }

    #[test]
    fn test_whitespace_between_tokens_is_kept() {
        let repaired = repair("{\n\t\"a\": 1\n}");
        assert_eq!(repaired, "{\n\t\"a\": 1\n}");
    }

    #[test]
    fn test_diagnostic_points_at_original_error() {
        let diagnostic = parse_with_repair(r#"{"email": }"#).unwrap_err();
        assert_eq!(diagnostic.error_position, 10);
        assert_eq!(diagnostic.problem_character, Some('}'));
        assert_eq!(diagnostic.line, 1);
        assert_eq!(diagnostic.context, r#"{"email": }"#);
    }

    #[test]
    fn test_diagnostic_on_later_line() {
        let text = "{\n  \"a\": 1,\n  \"b\": ]\n}";
        let diagnostic = parse_with_repair(text).unwrap_err();
        assert_eq!(diagnostic.line, 3);
        assert_eq!(diagnostic.problem_character, Some(']'));
        assert_eq!(&text[diagnostic.error_position..diagnostic.error_position + 1], "]");
    }

    #[test]
    fn test_context_window_is_clamped_to_char_boundaries() {
        let text = format!("{}é{}", "a".repeat(150), "b".repeat(150));
        let window = context_window(&text, 151, 100);
        assert!(window.contains('é'));
        assert!(window.len() <= 202);

        assert_eq!(context_window("short", 2, 100), "short");
    }

    #[test]
    fn test_json_issues_scan() {
        let issues = JsonIssues::scan("{'a': \"x\ny\u{0002}\"}");
        assert_eq!(issues.newline_count, 1);
        assert_eq!(issues.apostrophe_count, 2);
        assert_eq!(
            issues.control_characters,
            vec![ControlCharacter { position: 10, code: 2 }]
        );
        assert_eq!(issues.describe().len(), 3);
    }
}
