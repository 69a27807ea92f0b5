use thiserror::Error;

/// Failures that abort extraction of a single document.
///
/// The caller is expected to log the failure and move on to the next
/// document; no partial agenda is produced.
#[derive(Debug, Error)]
pub enum AgendaError {
    /// An element the page layout guarantees is absent.
    #[error("missing document structure: {what}")]
    MissingStructure { what: &'static str },

    #[error("failed to compile {name} regex: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("failed to parse {name} selector: {reason}")]
    Selector { name: &'static str, reason: String },
}
