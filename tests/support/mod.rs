use assert_cmd::{cargo::cargo_bin_cmd, Command};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::fs;
use std::path::{Path, PathBuf};

pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
pub const GREEN: [f32; 3] = [0.0, 0.6, 0.2];

/// Get a Command for keymark
pub fn keymark() -> Command {
    cargo_bin_cmd!("keymark")
}

/// Render lines of colored text runs as a single-page PDF
pub fn pdf_bytes(lines: &[Vec<(String, [f32; 3])>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), 10.into()]),
        Operation::new("Td", vec![40.into(), 800.into()]),
    ];
    for (i, spans) in lines.iter().enumerate() {
        if i > 0 {
            operations.push(Operation::new("Td", vec![0.into(), (-12).into()]));
        }
        for (text, color) in spans {
            operations.push(Operation::new(
                "rg",
                color.iter().map(|c| Object::from(*c)).collect(),
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(text.as_str())],
            ));
        }
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

fn plain(text: impl Into<String>) -> Vec<(String, [f32; 3])> {
    vec![(text.into(), BLACK)]
}

/// Write a response sheet with `(question id, chosen field)` entries
pub fn write_response_sheet(dir: &Path, name: &str, answers: &[(&str, &str)]) -> PathBuf {
    let mut lines = vec![plain("Candidate Response Sheet")];
    for (id, chosen) in answers {
        lines.push(plain(format!("Question ID : {}", id)));
        lines.push(plain("Status : Answered"));
        lines.push(plain(format!("Chosen Option : {}", chosen)));
    }
    let path = dir.join(name);
    fs::write(&path, pdf_bytes(&lines)).expect("write response sheet");
    path
}

/// Write an answer key; each question has four options, the listed ones green
pub fn write_answer_key(dir: &Path, name: &str, questions: &[(&str, &[u32], Option<&str>)]) -> PathBuf {
    let mut lines = vec![plain("Answer Key")];
    for (id, correct, note) in questions {
        lines.push(plain(format!("Question Id : {}", id)));
        for n in 1..=4u32 {
            let color = if correct.contains(&n) { GREEN } else { BLACK };
            lines.push(vec![
                (format!("{}.", n), color),
                (format!(" option {}", n), BLACK),
            ]);
        }
        if let Some(note) = note {
            lines.push(plain(*note));
        }
    }
    let path = dir.join(name);
    fs::write(&path, pdf_bytes(&lines)).expect("write answer key");
    path
}
