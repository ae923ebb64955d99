//! Content-stream walker that turns text operators into styled lines
//!
//! Spans are grouped into lines by baseline: text shown within
//! [`BASELINE_TOLERANCE`] of the open line's device-space y joins it, even
//! across `BT … ET` objects. `T*`, `'` and `"` always start a new line. A
//! text object that starts a new line also starts a new block. Operands are
//! decoded with the font selected by `Tf`; consecutive spans of the same
//! fill color are merged.

use lopdf::content::Operation;
use lopdf::Object;

use super::fonts::PageFonts;
use crate::color::ColorValue;
use crate::document::{Block, Line, Page, Span};

/// `TJ` adjustments at or below this (thousandths of an em) read as a space
const TJ_SPACE_THRESHOLD: f64 = -250.0;

/// Baselines closer than this (device units) belong to one line
pub const BASELINE_TOLERANCE: f64 = 2.0;

fn black() -> Option<ColorValue> {
    Some(ColorValue::Components(vec![0.0, 0.0, 0.0]))
}

/// Affine matrix `[a b c d e f]` in PDF row-vector convention
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f64; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn from_operands(operands: &[Object]) -> Option<Self> {
        let values: Vec<f64> = operands.iter().filter_map(number).collect();
        let values: [f64; 6] = values.try_into().ok()?;
        Some(Matrix(values))
    }

    fn translation(tx: f64, ty: f64) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    /// `self × other`
    fn then(self, other: Matrix) -> Self {
        let [a, b, c, d, e, f] = self.0;
        let [oa, ob, oc, od, oe, of] = other.0;
        Matrix([
            a * oa + b * oc,
            a * ob + b * od,
            c * oa + d * oc,
            c * ob + d * od,
            e * oa + f * oc + oe,
            e * ob + f * od + of,
        ])
    }
}

/// The parts of the graphics state `q`/`Q` save that text extraction needs
#[derive(Debug, Clone)]
struct GraphicsState {
    fill: Option<ColorValue>,
    font: Option<Vec<u8>>,
    ctm: Matrix,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            fill: black(),
            font: None,
            ctm: Matrix::IDENTITY,
        }
    }
}

#[derive(Debug)]
struct ContentWalker<'a> {
    fonts: &'a PageFonts<'a>,
    blocks: Vec<Block>,
    block: Option<Block>,
    line: Vec<Span>,
    line_y: Option<f64>,
    state: GraphicsState,
    saved: Vec<GraphicsState>,
    text_line: Matrix,
    leading: f64,
    block_break: bool,
}

impl<'a> ContentWalker<'a> {
    fn new(fonts: &'a PageFonts<'a>) -> Self {
        Self {
            fonts,
            blocks: Vec::new(),
            block: None,
            line: Vec::new(),
            line_y: None,
            state: GraphicsState::default(),
            saved: Vec::new(),
            text_line: Matrix::IDENTITY,
            leading: 0.0,
            block_break: false,
        }
    }

    fn apply(&mut self, op: &Operation) {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => self.saved.push(self.state.clone()),
            "Q" => {
                if let Some(state) = self.saved.pop() {
                    self.state = state;
                }
            }
            "cm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.state.ctm = m.then(self.state.ctm);
                }
            }
            "cs" => self.state.fill = black(),
            "g" | "rg" | "k" | "sc" | "scn" => {
                if let Some(color) = fill_color(operands) {
                    self.state.fill = Some(color);
                }
            }
            "Tf" => {
                if let Some(Object::Name(name)) = operands.first() {
                    self.state.font = Some(name.clone());
                }
            }
            "BT" => {
                self.text_line = Matrix::IDENTITY;
                self.block_break = true;
            }
            "Td" | "TD" => {
                let tx = operands.first().and_then(number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(number).unwrap_or(0.0);
                if op.operator == "TD" {
                    self.leading = -ty;
                }
                self.move_line(tx, ty);
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    self.leading = leading;
                }
            }
            "Tm" => {
                if let Some(m) = Matrix::from_operands(operands) {
                    self.text_line = m;
                }
            }
            "T*" => self.next_line(),
            "Tj" => {
                if let Some(text) = operands.first().and_then(|o| self.string_operand(o)) {
                    self.show(text);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = self.array_text(items);
                    self.show(text);
                }
            }
            "'" => {
                self.next_line();
                if let Some(text) = operands.first().and_then(|o| self.string_operand(o)) {
                    self.show(text);
                }
            }
            "\"" => {
                self.next_line();
                if let Some(text) = operands.get(2).and_then(|o| self.string_operand(o)) {
                    self.show(text);
                }
            }
            _ => {}
        }
    }

    fn move_line(&mut self, tx: f64, ty: f64) {
        self.text_line = Matrix::translation(tx, ty).then(self.text_line);
    }

    fn next_line(&mut self) {
        self.end_line();
        self.move_line(0.0, -self.leading);
    }

    /// Device-space y of the current text line origin
    fn baseline(&self) -> f64 {
        let [_, _, _, _, e, f] = self.text_line.0;
        let [_, b, _, d, _, ty] = self.state.ctm.0;
        e * b + f * d + ty
    }

    fn string_operand(&self, obj: &Object) -> Option<String> {
        match obj {
            Object::String(bytes, _) => Some(self.fonts.decode(self.state.font.as_deref(), bytes)),
            _ => None,
        }
    }

    fn array_text(&self, items: &[Object]) -> String {
        let mut text = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => {
                    text.push_str(&self.fonts.decode(self.state.font.as_deref(), bytes))
                }
                other => {
                    if number(other).is_some_and(|n| n <= TJ_SPACE_THRESHOLD) {
                        text.push(' ');
                    }
                }
            }
        }
        text
    }

    fn show(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        let baseline = self.baseline();
        if self
            .line_y
            .is_some_and(|y| (y - baseline).abs() > BASELINE_TOLERANCE)
        {
            self.end_line();
        }
        if self.line.is_empty() && std::mem::take(&mut self.block_break) {
            self.end_block();
        }
        if self.line_y.is_none() {
            self.line_y = Some(baseline);
        }

        let fill = &self.state.fill;
        match self.line.last_mut() {
            Some(last) if last.color == *fill => last.text.push_str(&text),
            _ => self.line.push(Span::new(text, fill.clone())),
        }
    }

    fn end_line(&mut self) {
        self.line_y = None;
        if self.line.is_empty() {
            return;
        }
        let spans = std::mem::take(&mut self.line);
        self.block
            .get_or_insert_with(Block::default)
            .lines
            .push(Line::new(spans));
    }

    fn end_block(&mut self) {
        self.end_line();
        if let Some(block) = self.block.take() {
            if !block.lines.is_empty() {
                self.blocks.push(block);
            }
        }
    }

    fn finish(mut self) -> Page {
        self.end_block();
        Page {
            blocks: self.blocks,
        }
    }
}

/// Walk a page's decoded operations into blocks of styled lines
pub fn walk_operations(operations: &[Operation], fonts: &PageFonts<'_>) -> Page {
    let mut walker = ContentWalker::new(fonts);
    for op in operations {
        walker.apply(op);
    }
    walker.finish()
}

fn number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Map a fill-color operator's numeric operands to RGB components
fn fill_color(operands: &[Object]) -> Option<ColorValue> {
    // `scn` may carry a trailing pattern name; only numbers count
    let values: Vec<f64> = operands.iter().filter_map(number).collect();
    match values.as_slice() {
        [gray] => Some(ColorValue::Components(vec![*gray, *gray, *gray])),
        [r, g, b] => Some(ColorValue::Components(vec![*r, *g, *b])),
        [c, m, y, k] => Some(ColorValue::Components(vec![
            (1.0 - c) * (1.0 - k),
            (1.0 - m) * (1.0 - k),
            (1.0 - y) * (1.0 - k),
        ])),
        _ => None,
    }
}

/// Decode a text string: UTF-16BE when it carries a byte-order mark,
/// otherwise one byte per character (simple fonts).
pub fn decode_pdf_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xfe, 0xff]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }
    bytes.iter().map(|&b| char::from(b)).collect()
}
