//! In-memory PDF fixtures for integration tests

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

pub const BLACK: [f32; 3] = [0.0, 0.0, 0.0];
pub const GREEN: [f32; 3] = [0.0, 0.6, 0.2];
pub const RED: [f32; 3] = [0.8, 0.0, 0.0];

type FixtureLine = Vec<(String, [f32; 3])>;

/// Offset between an ASCII character and its Identity-H code
const CID_OFFSET: u8 = 0x1d;

/// Maps codes `0x0003..=0x0061` back to ASCII text
const TO_UNICODE: &str = "/CIDInit /ProcSet findresource begin
12 dict begin
begincmap
/CMapName /Adobe-Identity-UCS def
/CMapType 2 def
1 begincodespacerange
<0000> <FFFF>
endcodespacerange
1 beginbfrange
<0003> <0061> <0020>
endbfrange
endcmap
CMapName currentdict /CMap defineresource pop
end
end
";

/// How text is encoded in the generated content streams
#[allow(dead_code)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontKind {
    /// Helvetica, bytes are the text itself
    #[default]
    Standard,
    /// Type0 font, two-byte glyph codes resolved through a ToUnicode CMap
    Identity,
    /// Type1 font whose `/Differences` assigns every character a small code
    Differences,
}

/// Builds a minimal PDF where every line is a row of colored text runs
#[derive(Debug, Default)]
pub struct PdfBuilder {
    pages: Vec<Vec<FixtureLine>>,
    font: FontKind,
    split: bool,
}

#[allow(dead_code)]
impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new page
    pub fn page(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    /// Add a line made of colored spans to the current page
    pub fn line(mut self, spans: &[(&str, [f32; 3])]) -> Self {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let line = spans.iter().map(|(t, c)| (t.to_string(), *c)).collect();
        if let Some(page) = self.pages.last_mut() {
            page.push(line);
        }
        self
    }

    /// Add a black line
    pub fn text(self, text: &str) -> Self {
        self.line(&[(text, BLACK)])
    }

    pub fn font(mut self, font: FontKind) -> Self {
        self.font = font;
        self
    }

    /// Draw every span in its own `BT … ET` object, placed with `Tm`
    pub fn split_text_objects(mut self) -> Self {
        self.split = true;
        self
    }

    /// Distinct characters in drawing order; Differences code is index + 1
    fn charset(&self) -> Vec<char> {
        let mut chars = Vec::new();
        for c in self
            .pages
            .iter()
            .flatten()
            .flatten()
            .flat_map(|(text, _)| text.chars())
        {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        assert!(chars.len() < 256, "too many distinct characters for one font");
        chars
    }

    fn font_dictionary(&self, doc: &mut Document, charset: &[char]) -> Dictionary {
        match self.font {
            FontKind::Standard => dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => "Helvetica",
            },
            FontKind::Identity => {
                let cmap_id =
                    doc.add_object(Stream::new(dictionary! {}, TO_UNICODE.as_bytes().to_vec()));
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type0",
                    "BaseFont" => "ArialMT",
                    "Encoding" => "Identity-H",
                    "DescendantFonts" => vec![Object::Dictionary(dictionary! {
                        "Type" => "Font",
                        "Subtype" => "CIDFontType2",
                        "BaseFont" => "ArialMT",
                        "CIDSystemInfo" => dictionary! {
                            "Registry" => Object::string_literal("Adobe"),
                            "Ordering" => Object::string_literal("Identity"),
                            "Supplement" => 0,
                        },
                    })],
                    "ToUnicode" => cmap_id,
                }
            }
            FontKind::Differences => {
                let mut differences: Vec<Object> = vec![1.into()];
                differences.extend(charset.iter().map(|&c| Object::Name(glyph_name(c).into_bytes())));
                dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => "Helvetica",
                    "Encoding" => dictionary! {
                        "Type" => "Encoding",
                        "BaseEncoding" => "WinAnsiEncoding",
                        "Differences" => differences,
                    },
                }
            }
        }
    }

    fn encode(&self, text: &str, charset: &[char]) -> Object {
        match self.font {
            FontKind::Standard => Object::string_literal(text),
            FontKind::Identity => {
                let bytes = text
                    .bytes()
                    .flat_map(|b| u16::from(b - CID_OFFSET).to_be_bytes())
                    .collect();
                Object::String(bytes, StringFormat::Hexadecimal)
            }
            FontKind::Differences => {
                let bytes = text
                    .chars()
                    .filter_map(|c| charset.iter().position(|&known| known == c))
                    .map(|index| (index + 1) as u8)
                    .collect();
                Object::String(bytes, StringFormat::Hexadecimal)
            }
        }
    }

    fn page_operations(&self, lines: &[FixtureLine], charset: &[char]) -> Vec<Operation> {
        let mut operations = Vec::new();
        if self.split {
            for (i, spans) in lines.iter().enumerate() {
                let y = 800 - 14 * i as i64;
                let mut x = 50.0_f32;
                for (text, color) in spans {
                    operations.extend([
                        Operation::new("BT", vec![]),
                        Operation::new("Tf", vec!["F1".into(), 11.into()]),
                        Operation::new(
                            "Tm",
                            vec![1.into(), 0.into(), 0.into(), 1.into(), x.into(), y.into()],
                        ),
                        Operation::new("rg", color.iter().map(|c| Object::from(*c)).collect()),
                        Operation::new("Tj", vec![self.encode(text, charset)]),
                        Operation::new("ET", vec![]),
                    ]);
                    x += 6.0 * text.chars().count() as f32;
                }
            }
            return operations;
        }

        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 11.into()]),
            Operation::new("Td", vec![50.into(), 800.into()]),
        ]);
        for (i, spans) in lines.iter().enumerate() {
            if i > 0 {
                operations.push(Operation::new("Td", vec![0.into(), (-14).into()]));
            }
            for (text, color) in spans {
                operations.push(Operation::new(
                    "rg",
                    color.iter().map(|c| Object::from(*c)).collect(),
                ));
                operations.push(Operation::new("Tj", vec![self.encode(text, charset)]));
            }
        }
        operations.push(Operation::new("ET", vec![]));
        operations
    }

    pub fn build(&self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let charset = self.charset();
        let font = self.font_dictionary(&mut doc, &charset);
        let font_id = doc.add_object(font);
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for lines in &self.pages {
            let content = Content {
                operations: self.page_operations(lines, &charset),
            };
            let content_id = doc.add_object(Stream::new(
                dictionary! {},
                content.encode().expect("encode content"),
            ));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
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
}

/// Standard glyph name for a fixture character
fn glyph_name(c: char) -> String {
    let name = match c {
        ' ' => "space",
        ':' => "colon",
        '.' => "period",
        ',' => "comma",
        '-' => "hyphen",
        '|' => "bar",
        '(' => "parenleft",
        ')' => "parenright",
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        c if c.is_ascii_alphabetic() => return c.to_string(),
        c => return format!("uni{:04X}", c as u32),
    };
    name.to_string()
}

/// Builder for a response sheet listing `(question id, chosen field)` pairs
#[allow(dead_code)]
pub fn response_builder(answers: &[(&str, &str)]) -> PdfBuilder {
    let mut builder = PdfBuilder::new().text("Candidate Response Sheet");
    for (id, chosen) in answers {
        builder = builder
            .text(&format!("Question ID : {}", id))
            .text("Status : Answered")
            .text(&format!("Chosen Option : {}", chosen));
    }
    builder
}

/// A response sheet in the standard font
#[allow(dead_code)]
pub fn response_sheet(answers: &[(&str, &str)]) -> Vec<u8> {
    response_builder(answers).build()
}
