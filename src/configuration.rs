use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContextError, ErrorCategory};
use crate::fonts::StandardFont;

/// The physical dimensions of a page, expressed in points (1/72 of an inch).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// US letter, 8.5in × 11in.
    pub const LETTER: PageSize = PageSize {
        width: 612.0,
        height: 792.0,
    };
}

/// The entries of the document information dictionary which can be customized.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub title: String,
    pub author: String,
    pub subject: String,
    pub creator: String,
    pub producer: String,
}

impl Default for DocumentMetadata {
    fn default() -> Self {
        DocumentMetadata {
            title: crate::questions::TITLE.into(),
            author: "Unknown".into(),
            subject: "Sample multiple-choice math questions".into(),
            creator: env!("CARGO_PKG_NAME").into(),
            producer: format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Every layout constant of the generated page, all distances in points measured from the
/// bottom-left corner of the page as PDF does. Any field missing from a configuration file
/// keeps its default, so an empty JSON object reproduces the standard document.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfiguration {
    pub page_width: f32,
    pub page_height: f32,
    /// Horizontal anchor of every line.
    pub left_margin: f32,
    /// Distance of the title baseline from the top edge of the page.
    pub title_top_offset: f32,
    /// Distance of the first body baseline from the top edge of the page.
    pub body_top_offset: f32,
    /// Vertical step between two consecutive body lines.
    pub line_spacing: f32,
    /// No baseline may fall below this distance from the bottom edge.
    pub bottom_margin: f32,
    pub heading_font: StandardFont,
    pub heading_font_size: f32,
    pub body_font: StandardFont,
    pub body_font_size: f32,
    pub metadata: DocumentMetadata,
}

impl Default for GeneratorConfiguration {
    fn default() -> Self {
        GeneratorConfiguration {
            page_width: PageSize::LETTER.width,
            page_height: PageSize::LETTER.height,
            left_margin: 72.0,
            title_top_offset: 72.0,
            body_top_offset: 120.0,
            line_spacing: 20.0,
            bottom_margin: 72.0,
            heading_font: StandardFont::HelveticaBold,
            heading_font_size: 16.0,
            body_font: StandardFont::Helvetica,
            body_font_size: 12.0,
            metadata: DocumentMetadata::default(),
        }
    }
}

impl GeneratorConfiguration {
    pub fn from_path(configuration_file_path: &Path) -> Result<Self, ContextError> {
        let configuration_file_contents = std::fs::read_to_string(configuration_file_path)
            .map_err(|error| {
                ContextError::io(
                    format!(
                        "Failed to read the configuration file {:?}",
                        configuration_file_path
                    ),
                    &error,
                )
            })?;
        let configuration: GeneratorConfiguration =
            serde_json::from_str(&configuration_file_contents).map_err(|error| {
                ContextError::with_error(
                    ErrorCategory::Configuration,
                    format!(
                        "Failed to parse the configuration file {:?}",
                        configuration_file_path
                    ),
                    &error,
                )
            })?;

        Ok(configuration)
    }

    pub fn page_size(&self) -> PageSize {
        PageSize {
            width: self.page_width,
            height: self.page_height,
        }
    }
}
