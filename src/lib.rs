//! Mathsheet generates a single-page PDF document holding a handful of sample multiple-choice
//! math questions, to be used as test fixture data by tools which extract questions from PDFs.
//!
//! The content is embedded in the crate and the layout is fixed: a bold heading at the top-left
//! of a letter page, followed by one line per question or answer option at a constant vertical step.
//! The entry point is `generator::generate`, which writes the document to the given path.

/// This module contains the `ContextError` type which is the error type used throughout this library.
///
/// An error always carries a context explaining what was being attempted and, when it was propagated
/// from another library, the message of that source error. Its `ErrorCategory` tells I/O failures
/// apart from failures of the PDF library and from invalid configurations.
pub mod error;

/// The standard Type1 fonts of the PDF format and the single-byte encoding used to write text with them.
pub mod fonts;

/// The title and the question lines which make up the document.
pub mod questions;

/// The layout constants of the document, which can be overridden from a JSON configuration file.
pub mod configuration;

/// Placement of the lines on the page, from the top down at fixed steps.
pub mod layout;

/// The module were the `PdfDocument` interface for writing PDF documents is presented.
///
/// # Introduction
///
/// `PdfDocument` wraps a `lopdf::Document` and offers the few operations the generator needs:
/// `add_page`, `add_font`, `write_text_to_page`, `write_all` and the two saving functions
/// `save_to_bytes` and `save_to_file`. The identifiers and the creation date of the document are
/// fixed by default, so that the same content always produces the same bytes.
pub mod pdf;

/// The `generate` operation, which ties the layout and the PDF writing together.
pub mod generator;
