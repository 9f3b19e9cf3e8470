//! Shared fixtures: small PDFs built in memory with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

/// One line of text placed on a page, shown with one `Tj` per piece.
pub struct Line {
    pub font: &'static str,
    pub size: i64,
    pub y: i64,
    pub pieces: Vec<&'static str>,
}

pub fn bold(size: i64, y: i64, text: &'static str) -> Line {
    bold_pieces(size, y, &[text])
}

pub fn bold_pieces(size: i64, y: i64, pieces: &[&'static str]) -> Line {
    Line {
        font: "F2",
        size,
        y,
        pieces: pieces.to_vec(),
    }
}

pub fn regular(size: i64, y: i64, text: &'static str) -> Line {
    Line {
        font: "F1",
        size,
        y,
        pieces: vec![text],
    }
}

/// Build a PDF with one page per entry of `pages`, using Helvetica (`F1`)
/// and Helvetica-Bold (`F2`).
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    build_pdf_with_font_type(pages, "Font")
}

/// Like [`build_pdf`], with `font_type` as the `/Type` of both font
/// resources.
pub fn build_pdf_with_font_type(pages: &[Vec<Line>], font_type: &str) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(dictionary! {
        "Type" => Object::Name(font_type.as_bytes().to_vec()),
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => Object::Name(font_type.as_bytes().to_vec()),
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let kids: Vec<Object> = pages
        .iter()
        .map(|lines| add_page(&mut doc, pages_id, resources_id, lines).into())
        .collect();
    let count = kids.len() as i64;

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn add_page(doc: &mut Document, parent: ObjectId, resources: ObjectId, lines: &[Line]) -> ObjectId {
    let mut operations = Vec::new();
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![Object::Name(line.font.as_bytes().to_vec()), Object::Integer(line.size)],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(72), Object::Integer(line.y)],
        ));
        for piece in &line.pieces {
            operations.push(Operation::new("Tj", vec![Object::string_literal(*piece)]));
        }
        operations.push(Operation::new("ET", vec![]));
    }

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Resources" => resources,
        "Contents" => content_id,
    })
}

/// Two-page kitchen manual used across the integration tests.
///
/// Page 1: title (24pt bold), "Introduction to Safety" (18pt bold), body.
/// Page 2: "Safety Procedures" (18pt bold), "Kitchen Tools" (14pt bold), body.
pub fn kitchen_manual() -> Vec<u8> {
    build_pdf(&kitchen_pages())
}

/// Page content of [`kitchen_manual`].
pub fn kitchen_pages() -> Vec<Vec<Line>> {
    vec![
        vec![
            bold(24, 720, "KITCHEN SAFETY MANUAL"),
            bold(18, 680, "Introduction to Safety"),
            regular(
                10,
                650,
                "Always wash your hands before handling food in the kitchen area. Keep knives sharp.",
            ),
        ],
        vec![
            bold(18, 720, "Safety Procedures"),
            bold(14, 690, "Kitchen Tools"),
            regular(
                10,
                660,
                "Inspect all fire extinguishers in the kitchen every single month. Short one.",
            ),
        ],
    ]
}
