//! Content that can be inserted through an editor.
//!
//! The types here only describe content; they are turned into renderable
//! elements when inserted, at which point fonts are checked and images decoded.

use std::path::{Path, PathBuf};

use genpdf::error::{Context as _, Error};
use genpdf::style::Color;

use crate::editor::TableEditor;
use crate::fonts::SimpleFont;
use crate::model::{colors, Edges, HorizontalAlignment, Size, VerticalAlignment};

/// Padding applied to cells whose style does not set one.
pub const DEFAULT_CELL_PADDING: f32 = 2.0;

/// A run of text rendered with a single font.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimpleParagraph {
    text: String,
    font: Option<SimpleFont>,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
}

impl SimpleParagraph {
    /// A left/top aligned paragraph without a font; editors fill in the default font.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: None,
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }

    pub fn styled(text: impl Into<String>, font: SimpleFont) -> Self {
        Self::new(text).with_font(font)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> Option<&SimpleFont> {
        self.font.as_ref()
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn with_font(mut self, font: SimpleFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    pub(crate) fn into_parts(self) -> (String, Option<SimpleFont>, HorizontalAlignment) {
        (self.text, self.font, self.horizontal_alignment)
    }
}

/// Where the pixels of a [`PdfImage`] come from.
#[derive(Clone, Debug)]
pub enum ImageSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
    Decoded(image::DynamicImage),
}

/// Loads an image from in-memory bytes using the [`image`] crate with descriptive errors.
pub fn decode_image_from_bytes(bytes: impl AsRef<[u8]>) -> Result<image::DynamicImage, Error> {
    image::load_from_memory(bytes.as_ref()).context("Failed to decode image from provided bytes")
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// An image, optionally scaled to a size and surrounded by empty space.
///
/// Without a size the image is drawn one pixel per point.  With a size it is
/// scaled to fit inside it, keeping the aspect ratio.  Inside a table cell the
/// image also shrinks to the width of its column.
#[derive(Clone, Debug)]
pub struct PdfImage {
    source: ImageSource,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    size: Option<Size>,
    edges: Option<Edges>,
}

impl PdfImage {
    fn new(source: ImageSource) -> Self {
        Self {
            source,
            horizontal_alignment: HorizontalAlignment::Center,
            vertical_alignment: VerticalAlignment::Middle,
            size: None,
            edges: Some(Edges::zero()),
        }
    }

    /// Reads the image from `path` when the document is assembled.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(ImageSource::Path(path.into()))
    }

    /// Encoded image data such as PNG or JPEG bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(ImageSource::Bytes(bytes.into()))
    }

    pub fn from_dynamic_image(image: image::DynamicImage) -> Self {
        Self::new(ImageSource::Decoded(image))
    }

    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn size(&self) -> Option<Size> {
        self.size
    }

    pub fn edges(&self) -> Option<Edges> {
        self.edges
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_size_wh(self, width: f32, height: f32) -> Self {
        self.with_size(Size::new(width, height))
    }

    pub fn with_edges(mut self, edges: Edges) -> Self {
        self.edges = Some(edges);
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    /// Decodes the image data.
    pub fn decode(&self) -> Result<image::DynamicImage, Error> {
        match &self.source {
            ImageSource::Path(path) => decode_image_from_path(path),
            ImageSource::Bytes(bytes) => decode_image_from_bytes(bytes),
            ImageSource::Decoded(image) => Ok(image.clone()),
        }
    }
}

/// Background, padding and border of a table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimpleCellStyle {
    background_color: Option<Color>,
    padding: Option<Edges>,
    border_color: Option<Color>,
}

impl SimpleCellStyle {
    pub fn new(background_color: Option<Color>, padding: Option<Edges>) -> Self {
        Self {
            background_color,
            padding,
            border_color: None,
        }
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn padding(&self) -> Option<Edges> {
        self.padding
    }

    pub fn border_color(&self) -> Option<Color> {
        self.border_color
    }

    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub(crate) fn effective_padding(&self) -> Edges {
        self.padding.unwrap_or(Edges::all(DEFAULT_CELL_PADDING))
    }

    pub(crate) fn effective_border_color(&self) -> Color {
        self.border_color.unwrap_or(colors::BLACK)
    }
}

/// What a table cell can hold.
#[derive(Clone, Debug)]
pub enum CellContent {
    Paragraph(SimpleParagraph),
    Image(PdfImage),
}

impl From<SimpleParagraph> for CellContent {
    fn from(paragraph: SimpleParagraph) -> Self {
        Self::Paragraph(paragraph)
    }
}

impl From<PdfImage> for CellContent {
    fn from(image: PdfImage) -> Self {
        Self::Image(image)
    }
}

/// A table cell with its content and style.
#[derive(Clone, Debug)]
pub struct SimpleTableCell {
    content: CellContent,
    style: SimpleCellStyle,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
}

impl SimpleTableCell {
    pub fn new(content: impl Into<CellContent>) -> Self {
        Self {
            content: content.into(),
            style: SimpleCellStyle::default(),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Middle,
        }
    }

    pub fn styled(content: impl Into<CellContent>, style: SimpleCellStyle) -> Self {
        Self::new(content).with_style(style)
    }

    pub fn content(&self) -> &CellContent {
        &self.content
    }

    pub fn style(&self) -> &SimpleCellStyle {
        &self.style
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    pub fn with_style(mut self, style: SimpleCellStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_content(mut self, content: impl Into<CellContent>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn with_vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        CellContent,
        SimpleCellStyle,
        HorizontalAlignment,
        VerticalAlignment,
    ) {
        (
            self.content,
            self.style,
            self.horizontal_alignment,
            self.vertical_alignment,
        )
    }

    /// Gives a paragraph without font the font `font`.
    pub(crate) fn with_fallback_font(self, font: Option<&SimpleFont>) -> Self {
        match (&self.content, font) {
            (CellContent::Paragraph(paragraph), Some(font)) if !paragraph.has_font() => {
                let paragraph = paragraph.clone().with_font(font.clone());
                self.with_content(paragraph)
            }
            _ => self,
        }
    }
}

/// Anything an editor accepts.
pub enum Insertable {
    Paragraph(SimpleParagraph),
    Image(PdfImage),
    Cell(SimpleTableCell),
    Table(TableEditor),
}

impl Insertable {
    /// Short name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Image(_) => "image",
            Self::Cell(_) => "cell",
            Self::Table(_) => "table",
        }
    }
}

impl From<SimpleParagraph> for Insertable {
    fn from(paragraph: SimpleParagraph) -> Self {
        Self::Paragraph(paragraph)
    }
}

impl From<PdfImage> for Insertable {
    fn from(image: PdfImage) -> Self {
        Self::Image(image)
    }
}

impl From<SimpleTableCell> for Insertable {
    fn from(cell: SimpleTableCell) -> Self {
        Self::Cell(cell)
    }
}

impl From<TableEditor> for Insertable {
    fn from(table: TableEditor) -> Self {
        Self::Table(table)
    }
}

impl From<CellContent> for Insertable {
    fn from(content: CellContent) -> Self {
        match content {
            CellContent::Paragraph(paragraph) => Self::Paragraph(paragraph),
            CellContent::Image(image) => Self::Image(image),
        }
    }
}
