use thiserror::Error;

/// Errors surfaced by the filing conversion pipeline. A failed conversion
/// never returns a partially built document.
#[derive(Debug, Error)]
pub enum ParsingError {
    /// The raw content could not be decoded with the requested charset.
    /// The HTML parse itself is forgiving and never fails.
    #[error("failed to decode filing content: {0}")]
    Parse(String),

    /// The filing's form type is outside the supported allowlist.
    #[error("currently only {supported} forms supported, got {form}")]
    UnsupportedForm { form: String, supported: &'static str },
}
