use std::sync::Arc;

use crate::config::Config;
use crate::cv::extractor::TextExtractor;
use crate::cv::segmenter::Segmenter;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable text extractor. Default: LibraryTextExtractor (pdf-extract + docx-rs).
    pub extractor: Arc<dyn TextExtractor>,
    /// Compiled patterns plus dictionaries; read-only, shared by every parse.
    pub segmenter: Arc<Segmenter>,
}
