//! Shared CV and job-description fixtures.

use lopdf::content::{Content, Operation};
use lopdf::{Document as PdfDocument, Object, Stream, dictionary};
use shortlist::Document;

pub const JOB_DESCRIPTION: &str = "Backend engineer with Python, SQL and AWS experience \
    to build data services for a payments platform.";

pub const CV_JANE: &str = "Name: Jane Doe\n\
    Email: jane.doe@example.com | Phone: +91 9876543210\n\
    Backend engineer with 6+ yrs of Python, SQL and AWS building payments data services.\n\
    B.Tech Computer Science, 2015";

pub const CV_SAM: &str = "Sam Lee\n\
    sam.lee@example.org\n\
    Pastry chef with 3 years in French kitchens. Loves sourdough.\n\
    MBA 2019";

/// Single-page PDF whose only text is `line`.
pub fn pdf_bytes(line: &str) -> Vec<u8> {
    let mut doc = PdfDocument::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![72.into(), 720.into()]),
            Operation::new("Tj", vec![Object::string_literal(line)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    });
    let kids: Vec<Object> = vec![page_id.into()];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}

pub fn text_cv(file_name: &str, body: &str) -> Document {
    Document::new(file_name, body)
}

/// Claims to be a PDF but cannot be parsed.
pub fn corrupted_pdf(file_name: &str) -> Document {
    Document::new(file_name, b"%PDF-1.7\n%%garbage without xref".to_vec())
}
