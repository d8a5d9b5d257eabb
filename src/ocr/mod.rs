//! OCR Module
//!
//! Turns an uploaded label photo into raw text. Backends:
//! - Tesseract (local binary, invoked as a subprocess)
//! - Ollama vision models (local LLM)
//!
//! The scan pipeline treats OCR failure as non-fatal: a report can be
//! produced from an empty text with a warning attached.

mod provider;
mod service;
mod types;

pub use provider::{OcrProviderTrait, OllamaProvider, TesseractProvider};
pub use service::OcrService;
pub use types::{OcrError, OcrProvider, OcrResult};
