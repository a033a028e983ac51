//! String hygiene for values arriving from forms and webhooks.
//!
//! Upstream callers routinely wrap values in stray quotes or send the literal
//! placeholder `"string"` that API explorers fill in by default.

/// Placeholder value sent by generated API clients for untouched fields.
pub const PLACEHOLDER: &str = "string";

pub fn strip_quotes(value: &str) -> &str {
    value.trim_matches(|c| c == '"' || c == '\'')
}

/// Trims whitespace, strips surrounding quotes, trims again.
pub fn clean_string_content(value: &str) -> String {
    strip_quotes(value.trim()).trim().to_string()
}

/// `None`, empty and placeholder values become `None`; the rest is
/// quote-stripped.
pub fn clean_form_value(value: Option<&str>) -> Option<String> {
    match value {
        None | Some("") | Some(PLACEHOLDER) => None,
        Some(v) => Some(strip_quotes(v).to_string()),
    }
}

pub fn clean_webhook_value(value: Option<&str>) -> Option<String> {
    match value {
        None | Some("") | Some(PLACEHOLDER) => None,
        Some(v) => Some(clean_string_content(v)),
    }
}

/// Counts of escape-worthy characters in a piece of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EscapeReport {
    pub newlines: usize,
    pub carriage_returns: usize,
    pub tabs: usize,
    pub backslashes: usize,
    pub double_quotes: usize,
    pub other_control: usize,
}

impl EscapeReport {
    pub fn scan(text: &str) -> Self {
        text.chars().fold(Self::default(), |mut report, c| {
            match c {
                '\n' => report.newlines += 1,
                '\r' => report.carriage_returns += 1,
                '\t' => report.tabs += 1,
                '\\' => report.backslashes += 1,
                '"' => report.double_quotes += 1,
                c if c.is_control() => report.other_control += 1,
                _ => {}
            }
            report
        })
    }

    pub fn total(&self) -> usize {
        self.newlines
            + self.carriage_returns
            + self.tabs
            + self.backslashes
            + self.double_quotes
            + self.other_control
    }

    pub fn has_escapes(&self) -> bool {
        self.total() > 0
    }
}

/// Logs one debug line per field that contains escape characters.
/// Returns the number of such fields.
pub fn log_escape_characters<'a, I>(context: &str, fields: I) -> usize
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut flagged = 0;
    for (name, value) in fields {
        let report = EscapeReport::scan(value);
        if report.has_escapes() {
            flagged += 1;
            tracing::debug!(
                "[{}] field '{}' has escape characters: newlines={}, cr={}, tabs={}, backslashes={}, quotes={}, other={}",
                context,
                name,
                report.newlines,
                report.carriage_returns,
                report.tabs,
                report.backslashes,
                report.double_quotes,
                report.other_control
            );
        }
    }
    flagged
}
