//! Receipt documents
//!
//! The order engine hands a [`ReceiptDocument`] to a [`DocumentRenderer`] and serves the
//! returned bytes; layout is entirely the renderer's concern.

use std::fmt::Debug;

use thiserror::Error;

mod receipt;
mod table;

pub use receipt::{ReceiptDocument, ReceiptLine};
pub use table::TableReceiptRenderer;

/// Errors that can occur while rendering a document.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to lay out document")]
    Layout(#[from] std::fmt::Error),
}

/// Rendered bytes ready to be served as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Turns receipt data into a downloadable document.
pub trait DocumentRenderer: Debug + Send + Sync {
    /// MIME type of the rendered bytes.
    fn content_type(&self) -> &'static str;

    /// File extension used when the document is offered as a download.
    fn extension(&self) -> &'static str;

    /// Render a receipt.
    ///
    /// # Errors
    ///
    /// Returns a [`RenderError`] if the document cannot be produced.
    fn render_receipt(&self, receipt: &ReceiptDocument) -> Result<Vec<u8>, RenderError>;
}
