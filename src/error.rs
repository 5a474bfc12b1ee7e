//! Error types for the pdf2study library.
//!
//! Three distinct error types reflect three distinct failure modes:
//!
//! * [`StudyError`] — **Fatal input/setup problems**: the document cannot be
//!   read, yields too little text, or the configuration is invalid. Detected
//!   before any LLM resource is consumed.
//!
//! * [`TransportError`] — **One classified generation outcome**: the backend
//!   timed out, was unreachable, answered with an error, or returned blank
//!   text. Never retried inside the library.
//!
//! * [`GenerationFailure`] — the `Failed` arm of every
//!   [`crate::generator::StudyGenerator`] call. Wraps the two above plus the
//!   "no usable model" condition, and always renders as a short actionable
//!   message.
//!
//! Malformed model output is deliberately absent from this list: the parser
//! resolves it to a fallback record (see [`crate::pipeline::parse`]).

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised before generation starts.
#[derive(Debug, Error)]
pub enum StudyError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// pdfium could not open the document.
    #[error("PDF '{path}' could not be opened: {detail}")]
    CorruptPdf { path: PathBuf, detail: String },

    /// The document (or supplied text) is too short to generate from.
    ///
    /// Usually a scanned or image-only PDF with no text layer.
    #[error(
        "Only {found} characters of text were extracted (minimum {minimum}).\n\
The document may be scanned or image-only."
    )]
    InsufficientText { found: usize, minimum: usize },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Pdfium binding errors ─────────────────────────────────────────────
    /// Could not bind to a pdfium library.
    #[error(
        "Failed to bind to pdfium library: {0}\n\
Install libpdfium system-wide or set PDFIUM_LIB_PATH=/path/to/libpdfium."
    )]
    PdfiumBindingFailed(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Classification of a failed generation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TransportErrorKind {
    /// The call exceeded the configured generation ceiling.
    Timeout,
    /// The backend could not be reached at all.
    ConnectionFailed,
    /// The backend answered, but with a non-success status or an error body.
    BackendError,
    /// The backend reported success with blank text.
    EmptyOutput,
}

impl TransportErrorKind {
    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "timed out",
            TransportErrorKind::ConnectionFailed => "connection failed",
            TransportErrorKind::BackendError => "backend error",
            TransportErrorKind::EmptyOutput => "empty output",
        }
    }
}

/// A single classified generation failure.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
#[error("LLM request {}: {detail}", .kind.label())]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub detail: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn timeout(secs: u64) -> Self {
        Self::new(
            TransportErrorKind::Timeout,
            format!("no response within {secs}s; the model may be overloaded"),
        )
    }
}

/// Why a generation call produced no content.
///
/// Every variant is recoverable: callers show the message and let the user
/// retry.
#[derive(Debug, Error)]
pub enum GenerationFailure {
    /// The input was rejected before any LLM call.
    #[error(transparent)]
    Input(#[from] StudyError),

    /// The backend lists no models, or could not be queried.
    #[error(
        "Ollama is not available at {base_url} (wanted model '{preferred}').\n\
Start the backend with `ollama serve` and install a model with `ollama pull {preferred}`."
    )]
    Unavailable { base_url: String, preferred: String },

    /// The generation call itself failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl GenerationFailure {
    /// The transport classification, when the failure came from the call itself.
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            GenerationFailure::Transport(e) => Some(e.kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_text_display() {
        let e = StudyError::InsufficientText {
            found: 12,
            minimum: 50,
        };
        let msg = e.to_string();
        assert!(msg.contains("12"), "got: {msg}");
        assert!(msg.contains("50"), "got: {msg}");
    }

    #[test]
    fn transport_display_names_kind() {
        let e = TransportError::timeout(300);
        assert!(e.to_string().contains("timed out"));
        assert!(e.to_string().contains("300s"));

        let e = TransportError::new(TransportErrorKind::EmptyOutput, "blank response");
        assert!(e.to_string().contains("empty output"));
    }

    #[test]
    fn unavailable_is_actionable() {
        let e = GenerationFailure::Unavailable {
            base_url: "http://localhost:11434".into(),
            preferred: "llama3.2:1b".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("ollama serve"));
        assert!(msg.contains("ollama pull llama3.2:1b"));
        assert_eq!(e.transport_kind(), None);
    }

    #[test]
    fn transport_kind_is_exposed() {
        let e: GenerationFailure =
            TransportError::new(TransportErrorKind::ConnectionFailed, "refused").into();
        assert_eq!(e.transport_kind(), Some(TransportErrorKind::ConnectionFailed));
    }
}
