//! OCR subsystem: the reader seam, the per-key reader cache, and the
//! Tesseract backend.
//!
//! A *reader* is one engine instance bound to a language set and an
//! accelerator flag. Construction is expensive (model loading), reuse is
//! cheap, so readers live in a process-wide [`ReaderCache`] keyed by
//! [`ReaderKey`]. Handlers never construct readers directly; they call
//! [`ReaderCache::acquire`].
//!
//! The [`Reader`]/[`ReaderFactory`] traits keep the engine swappable; tests
//! inject a stub factory, production wires in [`TesseractReaderFactory`].

pub mod cache;
pub mod reader;
pub mod tesseract;

pub use cache::ReaderCache;
pub use reader::{Reader, ReaderFactory, ReaderKey};
pub use tesseract::{TesseractReader, TesseractReaderFactory};
