//! PDF Templates
//!
//! Lays template data out as lines of text on A4 pages, then hands the pages
//! to `lopdf` for object-level encoding.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde::Deserialize;
use thiserror::Error;

const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;
const MARGIN: i64 = 50;
/// x position of the invoice amount column
const AMOUNT_COLUMN: i64 = 460;
/// Characters per body line at 11pt Helvetica
const WRAP_WIDTH: usize = 85;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("PDF encoding failed: {0}")]
    Encode(#[from] lopdf::Error),

    #[error("PDF write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Available document templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    Simple,
    Invoice,
}

impl Template {
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Simple => "simple",
            Template::Invoice => "invoice",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub amount: f64,
}

/// Data used to populate a template
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentData {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<LineItem>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource_name(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// A line of text placed on a page
#[derive(Debug, Clone, PartialEq)]
struct Placed {
    x: i64,
    y: i64,
    size: i64,
    font: Font,
    text: String,
}

/// Top-to-bottom flow of text lines with automatic page breaks
#[derive(Debug, Default)]
struct Layout {
    pages: Vec<Vec<Placed>>,
    cursor: i64,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Reserve vertical space for one line, breaking the page when needed
    fn advance(&mut self, leading: i64) -> i64 {
        if self.cursor - leading < MARGIN {
            self.pages.push(Vec::new());
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
        self.cursor -= leading;
        self.cursor
    }

    fn place(&mut self, x: i64, y: i64, size: i64, font: Font, text: impl Into<String>) {
        if let Some(page) = self.pages.last_mut() {
            page.push(Placed {
                x,
                y,
                size,
                font,
                text: text.into(),
            });
        }
    }

    fn line(&mut self, size: i64, font: Font, text: impl Into<String>) {
        let y = self.advance(size + size / 2);
        self.place(MARGIN, y, size, font, text);
    }

    /// Two cells on one line: a left label and a value in the amount column
    fn row(&mut self, size: i64, font: Font, left: impl Into<String>, right: impl Into<String>) {
        let y = self.advance(size + size / 2);
        self.place(MARGIN, y, size, font, left);
        self.place(AMOUNT_COLUMN, y, size, font, right);
    }

    fn gap(&mut self, height: i64) {
        self.cursor -= height;
    }

    fn paragraph(&mut self, text: &str) {
        for source_line in text.lines() {
            if source_line.trim().is_empty() {
                self.gap(8);
                continue;
            }
            for wrapped in wrap(source_line, WRAP_WIDTH) {
                self.line(11, Font::Regular, wrapped);
            }
        }
    }
}

/// Greedy word wrap on character counts
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

fn layout(template: Template, data: &DocumentData) -> Layout {
    let mut layout = Layout::new();

    layout.line(20, Font::Bold, data.title.as_str());
    if let Some(date) = &data.date {
        layout.line(10, Font::Regular, format!("Date: {}", date));
    }
    layout.gap(12);

    match template {
        Template::Simple => {
            if let Some(content) = &data.content {
                layout.paragraph(content);
            }
        }
        Template::Invoice => {
            if let Some(content) = &data.content {
                layout.paragraph(content);
                layout.gap(12);
            }
            layout.row(11, Font::Bold, "Description", "Amount");
            let items = data.items.as_deref().unwrap_or_default();
            for item in items {
                layout.row(11, Font::Regular, item.description.as_str(), format_amount(item.amount));
            }
            let total: f64 = items.iter().map(|i| i.amount).sum();
            layout.gap(6);
            layout.row(12, Font::Bold, "Total", format_amount(total));
        }
    }

    layout
}

/// Helvetica uses WinAnsi; anything outside Latin-1 becomes `?`
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

fn page_content(page: &[Placed]) -> Content {
    let mut operations = Vec::with_capacity(page.len() * 5);
    for placed in page {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new(
            "Tf",
            vec![
                Object::Name(placed.font.resource_name().as_bytes().to_vec()),
                Object::Integer(placed.size),
            ],
        ));
        operations.push(Operation::new(
            "Td",
            vec![Object::Integer(placed.x), Object::Integer(placed.y)],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_text(&placed.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

fn font(base: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Render `data` with `template` into PDF bytes
pub fn generate_pdf(template: Template, data: &DocumentData) -> Result<Vec<u8>, PdfError> {
    let layout = layout(template, data);

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(font("Helvetica"));
    let bold_id = doc.add_object(font("Helvetica-Bold"));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(page).encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(PAGE_WIDTH),
            Object::Integer(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
