//! Per-page font decoders for text-showing operands
//!
//! Composite (`Type0`) fonts are decoded two bytes per code through their
//! `ToUnicode` CMap. Simple fonts decode one byte per code: a `ToUnicode`
//! hit wins, then an `/Encoding /Differences` glyph name, then the base
//! encoding, then Latin-1.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Encoding, Object, ObjectId};
use tracing::{debug, warn};

use super::content::decode_pdf_string;

/// Glyph names that are not a single letter or a `uniXXXX` code
const GLYPH_NAMES: &[(&str, char)] = &[
    ("space", ' '),
    ("exclam", '!'),
    ("quotedbl", '"'),
    ("numbersign", '#'),
    ("dollar", '$'),
    ("percent", '%'),
    ("ampersand", '&'),
    ("quotesingle", '\''),
    ("parenleft", '('),
    ("parenright", ')'),
    ("asterisk", '*'),
    ("plus", '+'),
    ("comma", ','),
    ("hyphen", '-'),
    ("period", '.'),
    ("slash", '/'),
    ("zero", '0'),
    ("one", '1'),
    ("two", '2'),
    ("three", '3'),
    ("four", '4'),
    ("five", '5'),
    ("six", '6'),
    ("seven", '7'),
    ("eight", '8'),
    ("nine", '9'),
    ("colon", ':'),
    ("semicolon", ';'),
    ("less", '<'),
    ("equal", '='),
    ("greater", '>'),
    ("question", '?'),
    ("at", '@'),
    ("bracketleft", '['),
    ("backslash", '\\'),
    ("bracketright", ']'),
    ("underscore", '_'),
    ("bar", '|'),
    ("braceleft", '{'),
    ("braceright", '}'),
    ("minus", '\u{2212}'),
    ("endash", '\u{2013}'),
    ("emdash", '\u{2014}'),
    ("quoteleft", '\u{2018}'),
    ("quoteright", '\u{2019}'),
    ("bullet", '\u{2022}'),
    ("nbspace", '\u{a0}'),
];

/// Unicode character for a glyph name, ignoring any `.suffix` variant
fn glyph_to_unicode(name: &[u8]) -> Option<char> {
    let name = std::str::from_utf8(name).ok()?;
    let base = name.split_once('.').map_or(name, |(base, _)| base);

    let hex = base
        .strip_prefix("uni")
        .filter(|hex| hex.len() == 4)
        .or_else(|| base.strip_prefix('u').filter(|hex| (4..=6).contains(&hex.len())));
    if let Some(c) = hex
        .and_then(|hex| u32::from_str_radix(hex, 16).ok())
        .and_then(char::from_u32)
    {
        return Some(c);
    }

    let mut chars = base.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some(c);
        }
    }
    GLYPH_NAMES
        .iter()
        .find(|(glyph, _)| *glyph == base)
        .map(|(_, c)| *c)
}

/// Decoder for one font resource
#[derive(Debug)]
struct FontDecoder<'a> {
    encoding: Option<Encoding<'a>>,
    two_byte: bool,
    differences: BTreeMap<u8, char>,
}

impl<'a> FontDecoder<'a> {
    fn new(doc: &'a Document, font: &'a Dictionary) -> Self {
        let two_byte = font.get(b"Subtype").and_then(Object::as_name).ok() == Some(b"Type0".as_slice());
        let named = font.get(b"Encoding").and_then(Object::as_name).is_ok();

        // Without a named encoding or a ToUnicode map there is nothing lopdf can add
        let encoding = if font.type_is(b"Font") && (two_byte || named || font.has(b"ToUnicode")) {
            match font.get_font_encoding(doc) {
                Ok(encoding) => Some(encoding),
                Err(e) => {
                    debug!(error = %e, "font encoding unavailable");
                    None
                }
            }
        } else {
            None
        };

        Self {
            encoding,
            two_byte,
            differences: differences(doc, font),
        }
    }

    fn decode(&self, bytes: &[u8]) -> String {
        if self.two_byte {
            return self
                .encoding
                .as_ref()
                .and_then(|encoding| encoding.bytes_to_string(bytes).ok())
                .unwrap_or_else(|| decode_pdf_string(bytes));
        }
        let mut text = String::new();
        for &code in bytes {
            self.push_code(code, &mut text);
        }
        text
    }

    fn push_code(&self, code: u8, text: &mut String) {
        if let Some(Encoding::UnicodeMapEncoding(cmap)) = &self.encoding {
            if let Some(units) = cmap.get(u16::from(code)) {
                text.push_str(&String::from_utf16_lossy(&units));
                return;
            }
        }
        if let Some(c) = self.differences.get(&code) {
            text.push(*c);
            return;
        }
        let base = match &self.encoding {
            Some(encoding @ Encoding::OneByteEncoding(_)) => encoding.bytes_to_string(&[code]).ok(),
            _ => None,
        };
        match base.filter(|s| !s.is_empty()) {
            Some(s) => text.push_str(&s),
            None => text.push(char::from(code)),
        }
    }
}

/// Code-to-character overrides from an `/Encoding` dictionary's `/Differences`
fn differences(doc: &Document, font: &Dictionary) -> BTreeMap<u8, char> {
    let mut map = BTreeMap::new();
    let Ok(Object::Dictionary(encoding)) = font.get_deref(b"Encoding", doc) else {
        return map;
    };
    let Ok(entries) = encoding
        .get_deref(b"Differences", doc)
        .and_then(Object::as_array)
    else {
        return map;
    };

    let mut code: Option<i64> = None;
    for entry in entries {
        match entry {
            Object::Integer(start) => code = Some(*start),
            Object::Name(glyph) => {
                if let Some(current) = code {
                    if let (Ok(byte), Some(c)) = (u8::try_from(current), glyph_to_unicode(glyph)) {
                        map.insert(byte, c);
                    }
                    code = Some(current + 1);
                }
            }
            _ => {}
        }
    }
    map
}

/// Decoders for every font a page can select with `Tf`
#[derive(Debug, Default)]
pub struct PageFonts<'a> {
    decoders: BTreeMap<Vec<u8>, FontDecoder<'a>>,
}

impl<'a> PageFonts<'a> {
    /// Resolve the page's font resources, including inherited ones
    pub fn load(doc: &'a Document, page_id: ObjectId) -> Self {
        let fonts = match doc.get_page_fonts(page_id) {
            Ok(fonts) => fonts,
            Err(e) => {
                warn!(error = %e, "failed to read page fonts");
                return Self::default();
            }
        };
        let decoders = fonts
            .into_iter()
            .map(|(name, font)| (name, FontDecoder::new(doc, font)))
            .collect();
        Self { decoders }
    }

    /// Decode a string operand shown with the named font.
    ///
    /// Unknown or unset fonts fall back to [`decode_pdf_string`].
    pub fn decode(&self, font: Option<&[u8]>, bytes: &[u8]) -> String {
        match font.and_then(|name| self.decoders.get(name)) {
            Some(decoder) => decoder.decode(bytes),
            None => decode_pdf_string(bytes),
        }
    }
}
