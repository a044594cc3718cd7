//! Core library for receipt OCR processing.
//!
//! This crate provides:
//! - A transcription adapter for external vision-capable recognition services
//! - Heuristic receipt field extraction (merchant, currency, amount)
//! - Receipt data models and pipeline configuration

pub mod error;
pub mod models;
pub mod receipt;
pub mod transcription;

pub use error::{RecrError, Result, TranscriptionError};
pub use models::config::{ExtractionConfig, RecrConfig, TranscriptionConfig};
pub use models::receipt::{Currency, ReceiptRecord};
pub use receipt::{Extraction, ReceiptExtractor, ReceiptParser};
pub use transcription::{RemoteTranscriber, Transcriber};
