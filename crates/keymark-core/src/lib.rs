//! Keymark Core Library
//!
//! Grades multiple-choice response sheets against color-annotated answer
//! keys. Both documents are PDFs: chosen options come from the response
//! sheet's text, correct options from which option numbers the key renders
//! in the highlight color.

pub mod answer_key;
pub mod color;
pub mod config;
pub mod document;
pub mod error;
pub mod format;
pub mod grading;
pub mod logging;
pub mod model;
pub mod pdf;
pub mod report;
pub mod response;
pub mod score;
