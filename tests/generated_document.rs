use std::path::Path;

use lopdf::{content::Content, Object};
use mathsheet::{
    configuration::GeneratorConfiguration,
    error::ErrorCategory,
    generator::{self, DEFAULT_OUTPUT_FILE_NAME},
    questions,
};

/// A text run read back from the content stream of a page.
#[derive(Debug, Clone, PartialEq)]
struct TextRun {
    text: String,
    base_font: String,
    font_size: f64,
    position: [f64; 2],
}

fn number(object: &Object) -> f64 {
    match object {
        Object::Integer(value) => *value as f64,
        Object::Real(value) => *value as f64,
        other => panic!("{:?} is not a number", other),
    }
}

fn dictionary<'a>(document: &'a lopdf::Document, object: &'a Object) -> &'a lopdf::Dictionary {
    match object {
        Object::Reference(object_id) => document.get_dictionary(*object_id).unwrap(),
        Object::Dictionary(dictionary) => dictionary,
        other => panic!("{:?} is not a dictionary", other),
    }
}

fn load(pdf_path: &Path) -> lopdf::Document {
    let pdf_document_bytes = std::fs::read(pdf_path).unwrap();
    lopdf::Document::load_mem(&pdf_document_bytes).unwrap()
}

fn single_page_id(document: &lopdf::Document) -> lopdf::ObjectId {
    let pages = document.get_pages();
    assert_eq!(pages.len(), 1);
    *pages.values().next().unwrap()
}

fn base_font_of(document: &lopdf::Document, page_id: lopdf::ObjectId, resource_name: &[u8]) -> String {
    let page = document.get_dictionary(page_id).unwrap();
    let resources = dictionary(document, page.get(b"Resources").unwrap());
    let fonts = dictionary(document, resources.get(b"Font").unwrap());
    let font = dictionary(document, fonts.get(resource_name).unwrap());

    String::from_utf8(font.get(b"BaseFont").unwrap().as_name().unwrap().to_vec()).unwrap()
}

fn text_runs(document: &lopdf::Document) -> Vec<TextRun> {
    let page_id = single_page_id(document);
    let content = Content::decode(&document.get_page_content(page_id).unwrap()).unwrap();

    let mut text_runs = Vec::new();
    let (mut base_font, mut font_size, mut position) = (String::new(), 0.0, [0.0, 0.0]);
    for operation in content.operations {
        match operation.operator.as_str() {
            "Tf" => {
                let resource_name = operation.operands[0].as_name().unwrap();
                base_font = base_font_of(document, page_id, resource_name);
                font_size = number(&operation.operands[1]);
            }
            "Td" => {
                position = [
                    number(&operation.operands[0]),
                    number(&operation.operands[1]),
                ]
            }
            "Tj" => {
                let Object::String(bytes, _) = &operation.operands[0] else {
                    panic!("Unexpected operand {:?}", operation.operands[0]);
                };
                text_runs.push(TextRun {
                    text: String::from_utf8(bytes.clone()).unwrap(),
                    base_font: base_font.clone(),
                    font_size,
                    position,
                });
            }
            _ => {}
        }
    }

    text_runs
}

#[test]
fn output_is_a_single_letter_page() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join(DEFAULT_OUTPUT_FILE_NAME);
    generator::generate(&output_path).unwrap();

    let pdf_document_bytes = std::fs::read(&output_path).unwrap();
    assert!(pdf_document_bytes.starts_with(b"%PDF-"));

    let document = load(&output_path);
    let page = document.get_dictionary(single_page_id(&document)).unwrap();
    let media_box: Vec<f64> = page
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(number)
        .collect();
    assert_eq!(media_box, vec![0.0, 0.0, 612.0, 792.0]);
}

#[test]
fn text_reads_back_in_order() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join(DEFAULT_OUTPUT_FILE_NAME);
    generator::generate(&output_path).unwrap();

    let texts: Vec<String> = text_runs(&load(&output_path))
        .into_iter()
        .map(|text_run| text_run.text)
        .collect();
    let expected_texts: Vec<String> = questions::line_items().map(String::from).collect();

    assert_eq!(texts.len(), 18);
    similar_asserts::assert_eq!(texts, expected_texts);
    assert_eq!(
        &texts[1..7],
        &["1. What is 2 + 3?", "A) 4", "B) 5", "C) 6", "D) 7", ""]
    );
}

#[test]
fn fonts_and_positions() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join(DEFAULT_OUTPUT_FILE_NAME);
    generator::generate(&output_path).unwrap();

    let text_runs = text_runs(&load(&output_path));
    let title = &text_runs[0];
    assert_eq!(title.text, "Math Test Questions");
    assert_eq!(title.base_font, "Helvetica-Bold");
    assert_eq!(title.font_size, 16.0);
    assert_eq!(title.position, [72.0, 720.0]);

    for (index, text_run) in text_runs[1..].iter().enumerate() {
        assert_eq!(text_run.base_font, "Helvetica", "{:?}", text_run);
        assert_eq!(text_run.font_size, 12.0, "{:?}", text_run);
        assert_eq!(text_run.position, [72.0, 672.0 - 20.0 * index as f64], "{:?}", text_run);
    }
}

#[test]
fn rerunning_overwrites_the_previous_file() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join(DEFAULT_OUTPUT_FILE_NAME);
    std::fs::write(&output_path, vec![b'x'; 256 * 1024]).unwrap();

    let generated_document = generator::generate(&output_path).unwrap();
    let first_bytes = std::fs::read(&output_path).unwrap();
    assert_eq!(first_bytes.len(), generated_document.byte_count);
    assert!(first_bytes.starts_with(b"%PDF-"));

    generator::generate(&output_path).unwrap();
    let second_bytes = std::fs::read(&output_path).unwrap();
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(text_runs(&load(&output_path)).len(), 18);
}

#[test]
fn missing_directory_fails_without_leaving_a_file() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory
        .path()
        .join("does-not-exist")
        .join(DEFAULT_OUTPUT_FILE_NAME);

    let error = generator::generate(&output_path).unwrap_err();

    assert_eq!(error.category, ErrorCategory::Io);
    assert!(!output_path.exists());
    assert!(!output_path.parent().unwrap().exists());
}

#[test]
fn configuration_changes_the_layout() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("custom.pdf");
    let configuration: GeneratorConfiguration = serde_json::from_str(
        r#"{ "headingFont": "Times-Bold", "bodyFont": "Times-Roman", "lineSpacing": 15 }"#,
    )
    .unwrap();

    generator::generate_with_configuration(&output_path, &configuration).unwrap();

    let text_runs = text_runs(&load(&output_path));
    assert_eq!(text_runs[0].base_font, "Times-Bold");
    assert_eq!(text_runs[1].base_font, "Times-Roman");
    assert_eq!(text_runs[2].position, [72.0, 657.0]);
}

#[test]
fn binary_writes_the_default_file_in_the_working_directory() {
    let directory = tempfile::tempdir().unwrap();

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_mathsheet"))
        .current_dir(directory.path())
        .status()
        .unwrap();

    assert!(status.success());
    let document = load(&directory.path().join(DEFAULT_OUTPUT_FILE_NAME));
    assert_eq!(text_runs(&document).len(), 18);
}

#[test]
fn binary_exits_with_failure_on_unwritable_path() {
    let directory = tempfile::tempdir().unwrap();
    let output_path = directory.path().join("missing").join("out.pdf");

    let status = std::process::Command::new(env!("CARGO_BIN_EXE_mathsheet"))
        .arg("--output")
        .arg(&output_path)
        .status()
        .unwrap();

    assert_eq!(status.code(), Some(1));
    assert!(!output_path.exists());
}
