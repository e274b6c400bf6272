use std::path::{Path, PathBuf};

use crate::configuration::GeneratorConfiguration;
use crate::error::ContextError;
use crate::layout::{self, PlacedLine};
use crate::pdf::PdfDocument;
use crate::questions::{QUESTION_LINES, TITLE};

/// The file the generator writes to when it is not told otherwise.
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "test_math_questions.pdf";

// Fixed identifiers keep the output reproducible from one run to the next.
const DOCUMENT_IDENTIFIER: &str = "MathTestQuestionsFixture00000001";
const INSTANCE_IDENTIFIER: &str = "MathTestQuestionsInstance0000001";

/// What has been written by a successful generation.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub output_path: PathBuf,
    pub placed_lines: Vec<PlacedLine>,
    pub byte_count: usize,
}

/// Generates the math questions document at the given path with the default layout.
pub fn generate(output_path: &Path) -> Result<GeneratedDocument, ContextError> {
    generate_with_configuration(output_path, &GeneratorConfiguration::default())
}

/// Generates the math questions document at the given path, laid out according to the configuration.
///
/// The layout is validated before anything touches the disk, and success is only returned once the
/// complete file is in place.
pub fn generate_with_configuration(
    output_path: &Path,
    configuration: &GeneratorConfiguration,
) -> Result<GeneratedDocument, ContextError> {
    let placed_lines = layout::place_lines(configuration, TITLE, QUESTION_LINES)?;

    let mut pdf_document = PdfDocument::new(DOCUMENT_IDENTIFIER.into());
    pdf_document.metadata = configuration.metadata.clone();
    let page_index = pdf_document.add_page(configuration.page_size());

    for placed_line in placed_lines.iter() {
        log::debug!("{:?}", placed_line);
        let font_index = pdf_document.add_font(placed_line.font);
        pdf_document.write_text_to_page(
            page_index,
            &placed_line.text,
            font_index,
            placed_line.font_size,
            placed_line.position,
        )?;
    }

    pdf_document.write_all(INSTANCE_IDENTIFIER.into())?;
    let byte_count = pdf_document.save_to_file(output_path)?;
    log::info!("Created test PDF: {}", output_path.display());

    Ok(GeneratedDocument {
        output_path: output_path.to_path_buf(),
        placed_lines,
        byte_count,
    })
}
