use std::{
    ffi::OsString,
    io::{BufWriter, Write as _},
    mem,
    path::{Path, PathBuf},
};

use lopdf::{content::Operation, Object, StringFormat};
use time::OffsetDateTime;

use crate::configuration::{DocumentMetadata, PageSize};
use crate::error::{ContextError, ErrorCategory};
use crate::fonts::{self, StandardFont};

/// The representation of a PDF page, holding the content operations drawn onto it so far.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page width in points.
    pub width: f32,
    /// Page height in points.
    pub height: f32,
    /// The operations of the content stream of the page, in drawing order.
    pub(crate) operations: Vec<Operation>,
}

impl PdfPage {
    /// Encodes the operations of the page into its content stream. The operations are wrapped
    /// into a `q`/`Q` pair, which isolates the graphics state of the page.
    fn to_content_stream(&self) -> Result<lopdf::Stream, ContextError> {
        let mut operations = Vec::with_capacity(self.operations.len() + 2);
        operations.push(Operation::new("q", vec![]));
        operations.extend(self.operations.iter().cloned());
        operations.push(Operation::new("Q", vec![]));

        let stream_content = lopdf::content::Content { operations }
            .encode()
            .map_err(|error| ContextError::library("Failed to encode the page content", &error))?;

        // Page contents are left uncompressed so that they stay readable when inspecting fixtures
        Ok(lopdf::Stream::new(lopdf::Dictionary::new(), stream_content).with_compression(false))
    }
}

/// This struct represents the PDF document on a high-level. It is an interface to the underlying
/// `lopdf::Document` with the addition of the pages, the document identifier, the information
/// entries and the fonts used in the document.
///
/// The usual sequence is `add_page`, `add_font`, one or more `write_text_to_page`, then
/// `write_all` followed by either `save_to_bytes` or `save_to_file`.
pub struct PdfDocument {
    /// The fonts used in the document together with the object they are stored at, the position
    /// in this vector being the font index.
    fonts: Vec<(lopdf::ObjectId, StandardFont)>,
    /// The underlying PDF document: this is a low-level interface and shouldn't be directly interacted with
    /// unless strictly necessary, anyway this is why it is exposed to the user.
    pub inner_document: lopdf::Document,
    /// The identifier of the document, it is used in order to set the PDF `ID` tag.
    pub identifier: String,
    /// The entries of the document information dictionary.
    pub metadata: DocumentMetadata,
    /// Used for both `CreationDate` and `ModDate`, it defaults to the Unix epoch so that
    /// repeated runs produce the same bytes.
    pub creation_date: OffsetDateTime,
    /// The pages of the PDF document.
    pub(crate) pages: Vec<PdfPage>,
    /// Whether `write_all` already assembled the document objects.
    written: bool,
}

impl PdfDocument {
    /// Create a new `PdfDocument` by defaulting the underlying PDF document to version 1.5
    /// of the PDF specification and customly specifying the PDF identifier.
    pub fn new(pdf_document_identifier: String) -> Self {
        PdfDocument {
            fonts: Vec::new(),
            inner_document: lopdf::Document::with_version("1.5"),
            identifier: pdf_document_identifier,
            metadata: DocumentMetadata::default(),
            creation_date: OffsetDateTime::UNIX_EPOCH,
            pages: Vec::new(),
            written: false,
        }
    }

    /// Adds an empty page of the given size and returns its index, which is to be passed to
    /// `write_text_to_page`.
    pub fn add_page(&mut self, page_size: PageSize) -> usize {
        self.pages.push(PdfPage {
            width: page_size.width,
            height: page_size.height,
            operations: Vec::new(),
        });

        self.pages.len() - 1
    }

    /// Registers one of the standard fonts in the document and returns its index. Registering the same
    /// font twice returns the index it was first given.
    pub fn add_font(&mut self, font: StandardFont) -> usize {
        if let Some(font_index) = self
            .fonts
            .iter()
            .position(|(_, registered_font)| *registered_font == font)
        {
            return font_index;
        }

        let font_index = self.fonts.len();
        let font_object_id = self.inner_document.new_object_id();
        self.fonts.push((font_object_id, font));

        font_index
    }

    /// Writes a single line of text at the given position (in points) with the specified font and size.
    /// An empty text still produces a text object, with an empty string operand.
    pub fn write_text_to_page(
        &mut self,
        page_index: usize,
        text: &str,
        font_index: usize,
        font_size: f32,
        caret_position: [f32; 2],
    ) -> Result<(), ContextError> {
        if font_index >= self.fonts.len() {
            return Err(ContextError::with_context(
                ErrorCategory::Library,
                format!("Failed to find the font with index {}", font_index),
            ));
        }
        let encoded_text = fonts::encode_win_ansi(text);

        let [x, y] = caret_position;
        let pdf_page = self.get_mut_page(page_index)?;
        pdf_page.operations.extend(vec![
            Operation::new("BT", vec![]), // Begin text section
            Operation::new(
                "Tf",
                vec![
                    Object::Name(font_resource_name(font_index).into_bytes()),
                    font_size.into(),
                ],
            ), // Set the font and the font size
            Operation::new("Td", vec![x.into(), y.into()]), // Set the position where the text begins to be written
            Operation::new(
                "Tj",
                vec![Object::String(encoded_text, StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);

        Ok(())
    }

    /// Assembles the catalog, the page tree, the fonts and the information dictionary into the
    /// underlying document. The instance ID becomes the second entry of the trailer `ID`.
    pub fn write_all(&mut self, instance_id: String) -> Result<(), ContextError> {
        use lopdf::Object::*;
        use lopdf::StringFormat::*;

        if self.written {
            return Err(ContextError::with_context(
                ErrorCategory::Library,
                "The document has already been written",
            ));
        }

        let timestamp = to_pdf_timestamp_format(&self.creation_date);
        let document_info = lopdf::Dictionary::from_iter(vec![
            ("Trapped", "False".into()),
            ("CreationDate", String(timestamp.clone().into_bytes(), Literal)),
            ("ModDate", String(timestamp.into_bytes(), Literal)),
            ("Title", to_pdf_text_string(&self.metadata.title)),
            ("Author", to_pdf_text_string(&self.metadata.author)),
            ("Subject", to_pdf_text_string(&self.metadata.subject)),
            ("Creator", to_pdf_text_string(&self.metadata.creator)),
            ("Producer", to_pdf_text_string(&self.metadata.producer)),
            ("Identifier", String(self.identifier.clone().into_bytes(), Literal)),
        ]);
        let document_info_id = self.inner_document.add_object(Dictionary(document_info));

        let pages_id = self.inner_document.new_object_id();
        let catalog_id = self.inner_document.add_object(lopdf::Dictionary::from_iter(vec![
            ("Type", "Catalog".into()),
            ("PageLayout", "OneColumn".into()),
            ("PageMode", "UseNone".into()),
            ("Pages", Reference(pages_id)),
        ]));

        self.inner_document.trailer.set("Root", Reference(catalog_id));
        self.inner_document.trailer.set("Info", Reference(document_info_id));
        self.inner_document.trailer.set(
            "ID",
            Array(vec![
                String(self.identifier.clone().into_bytes(), Literal),
                String(instance_id.into_bytes(), Literal),
            ]),
        );

        let fonts_dictionary = self.insert_fonts_into_document();
        let resources_id = self.inner_document.add_object(lopdf::Dictionary::from_iter(vec![(
            "Font",
            Dictionary(fonts_dictionary),
        )]));

        let mut page_ids = Vec::<lopdf::Object>::with_capacity(self.pages.len());
        for page in self.pages.iter() {
            let media_box: lopdf::Object =
                vec![0.into(), 0.into(), page.width.into(), page.height.into()].into();
            let content_id = self.inner_document.add_object(page.to_content_stream()?);
            let page_id = self.inner_document.add_object(lopdf::Dictionary::from_iter(vec![
                ("Type", "Page".into()),
                ("Rotate", Integer(0)),
                ("MediaBox", media_box.clone()),
                ("CropBox", media_box),
                ("Parent", Reference(pages_id)),
                ("Resources", Reference(resources_id)),
                ("Contents", Reference(content_id)),
            ]));
            page_ids.push(Reference(page_id));
        }

        let pages = lopdf::Dictionary::from_iter(vec![
            ("Type", "Pages".into()),
            ("Count", Integer(self.pages.len() as i64)),
            ("Kids", Array(page_ids)),
        ]);
        self.inner_document
            .objects
            .insert(pages_id, Dictionary(pages));

        self.written = true;

        Ok(())
    }

    /// Save the `PdfDocument` to bytes in order for it to be written to a file or further processed.
    pub fn save_to_bytes(&mut self) -> Result<Vec<u8>, ContextError> {
        if !self.written {
            return Err(ContextError::with_context(
                ErrorCategory::Library,
                "The document needs to be written before being saved",
            ));
        }

        let mut pdf_document_bytes = Vec::new();
        let mut writer = BufWriter::new(&mut pdf_document_bytes);
        self.inner_document.save_to(&mut writer).map_err(|error| {
            ContextError::io("Error while saving the PDF document to bytes", &error)
        })?;
        writer.flush().map_err(|error| {
            ContextError::io("Error while flushing the PDF document bytes", &error)
        })?;
        mem::drop(writer);

        Ok(pdf_document_bytes)
    }

    /// Saves the document to the given path, overwriting any previous file.
    ///
    /// The bytes are first written and synced into a sibling file with the `.swp` extension,
    /// which is then renamed to the expected path. Either the whole document ends up at the path,
    /// or the path is left as it was. Returns the number of bytes written.
    pub fn save_to_file(&mut self, pdf_path: &Path) -> Result<usize, ContextError> {
        let pdf_document_bytes = self.save_to_bytes()?;
        let swap_path = swap_file_path(pdf_path);

        if let Err(error) = write_synced(&swap_path, pdf_path, &pdf_document_bytes) {
            // The file may or may not have been created before failing
            let _ = std::fs::remove_file(&swap_path);
            return Err(error);
        }
        std::fs::rename(&swap_path, pdf_path).map_err(|error| {
            let _ = std::fs::remove_file(&swap_path);
            ContextError::io(format!("Unable to move the PDF file to {:?}", pdf_path), &error)
        })?;

        Ok(pdf_document_bytes.len())
    }

    /// Converts the fonts into a dictionary and inserts them into the document.
    fn insert_fonts_into_document(&mut self) -> lopdf::Dictionary {
        let mut font_dictionary = lopdf::Dictionary::new();

        for (font_index, (font_object_id, font)) in self.fonts.iter().enumerate() {
            self.inner_document
                .objects
                .insert(*font_object_id, Object::Dictionary(font.to_dictionary()));
            font_dictionary.set(
                font_resource_name(font_index),
                Object::Reference(*font_object_id),
            );
        }

        font_dictionary
    }

    // Retrieve the page via its index.
    fn get_mut_page(&mut self, page_index: usize) -> Result<&mut PdfPage, ContextError> {
        self.pages
            .get_mut(page_index)
            .ok_or(ContextError::with_context(
                ErrorCategory::Library,
                format!("Failed to find the page with index {}", page_index),
            ))
    }
}

/// The name a font is referenced by in the resources and in the `Tf` operator.
fn font_resource_name(font_index: usize) -> String {
    format!("F{font_index}")
}

fn swap_file_path(pdf_path: &Path) -> PathBuf {
    let mut swap_path: OsString = pdf_path.as_os_str().to_owned();
    swap_path.push(".swp");
    PathBuf::from(swap_path)
}

/// Writes and syncs the bytes at `swap_path`. Errors name `pdf_path`, the file the caller asked for.
fn write_synced(swap_path: &Path, pdf_path: &Path, bytes: &[u8]) -> Result<(), ContextError> {
    let mut file = std::fs::File::create(swap_path).map_err(|error| {
        ContextError::io(format!("Failed to create the output file {:?}", pdf_path), &error)
    })?;
    file.write_all(bytes).map_err(|error| {
        ContextError::io(format!("Failed to write the output file {:?}", pdf_path), &error)
    })?;
    file.sync_all().map_err(|error| {
        ContextError::io(format!("Failed to flush the output file {:?}", pdf_path), &error)
    })?;

    Ok(())
}

/// Encodes a string for a text entry of the document information dictionary. ASCII is kept as a
/// literal string, anything else becomes UTF-16BE preceded by the `FE FF` byte order mark.
fn to_pdf_text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::String(text.as_bytes().to_vec(), StringFormat::Literal);
    }

    let mut encoded_bytes = vec![0xFE, 0xFF];
    for code_unit in text.encode_utf16() {
        encoded_bytes.extend_from_slice(&code_unit.to_be_bytes());
    }

    Object::String(encoded_bytes, StringFormat::Hexadecimal)
}

/// Formats the given time so that it matches what the PDF specification expects.
/// An example of it is the following: D:20170505150224+02'00'.
fn to_pdf_timestamp_format(date: &OffsetDateTime) -> String {
    let offset = date.offset();
    let offset_sign = if offset.is_negative() { '-' } else { '+' };
    format!(
        "D:{:04}{:02}{:02}{:02}{:02}{:02}{offset_sign}{:02}'{:02}'",
        date.year(),
        u8::from(date.month()),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        offset.whole_hours().abs(),
        offset.minutes_past_hour().abs(),
    )
}
