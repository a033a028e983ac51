pub mod json_repair;
pub mod text_cleaning;

pub use json_repair::{JsonDiagnostic, JsonIssues, ParseOutcome, parse_with_repair};
pub use text_cleaning::{EscapeReport, clean_form_value, clean_webhook_value, strip_quotes};
