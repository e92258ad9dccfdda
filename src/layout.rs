//! Renderable `genpdf` elements built from the content types in [`crate::elements`].
//!
//! `genpdf` renders elements page by page: every call to [`Element::render`]
//! receives the space left on the current page and reports whether part of the
//! element is still pending.  Text continues line by line and tables continue
//! row by row, repeating their header rows on every page.  An element that
//! cannot place anything reports `has_more` with an empty size, which makes
//! `genpdf` fail with a page size error when it happens on a fresh page.

use std::rc::Rc;

use genpdf::elements::{Image, PageBreak};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{Color, Style, StyledString};
use genpdf::{render, Context, Element, Position, RenderResult, Scale};
use image::GenericImageView;
use log::debug;

use crate::configuration::PdfCommons;
use crate::elements::{
    CellContent, Insertable, PdfImage, SimpleCellStyle, SimpleParagraph, SimpleTableCell,
};
use crate::error::{Result, SimplePdfError};
use crate::fonts::{FontRegistry, SimpleFont};
use crate::model::{
    mm_from_f64, mm_to_f64, points_to_mm, Edges, HorizontalAlignment, PdfWidth, Size,
    VerticalAlignment,
};

const IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const UNDERLINE_OFFSET_MM: f64 = 0.4;
const STRIKE_HEIGHT_RATIO: f64 = 0.65;
const EPSILON: f64 = 1e-6;

fn points_mm(points: f32) -> f64 {
    mm_to_f64(points_to_mm(points))
}

fn position(x: f64, y: f64) -> Position {
    Position::new(mm_from_f64(x), mm_from_f64(y))
}

fn str_width(context: &Context, style: Style, s: &str) -> f64 {
    mm_to_f64(StyledString::new(s.to_owned(), style).width(&context.font_cache))
}

fn pending() -> RenderResult {
    let mut result = RenderResult::default();
    result.has_more = true;
    result
}

/// A line produced by [`wrap_text`].
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct WrappedLine {
    pub(crate) words: Vec<String>,
    /// Last line before an explicit line break or the end of the text.
    pub(crate) ends_paragraph: bool,
}

/// Greedy word wrapping.
///
/// `measure` returns the width of a string in the same unit as `max_width`.
/// Explicit `\n` characters always start a new line and words wider than a
/// whole line are split between characters.
pub(crate) fn wrap_text(
    text: &str,
    max_width: f64,
    measure: impl Fn(&str) -> f64,
) -> Vec<WrappedLine> {
    let space = measure(" ");
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut words: Vec<String> = Vec::new();
        let mut width = 0.0;

        for word in paragraph.split_whitespace() {
            for piece in split_word(word, max_width, &measure) {
                let piece_width = measure(&piece);
                let needed = if words.is_empty() {
                    piece_width
                } else {
                    width + space + piece_width
                };

                if !words.is_empty() && needed > max_width + EPSILON {
                    lines.push(WrappedLine {
                        words: std::mem::take(&mut words),
                        ends_paragraph: false,
                    });
                    width = piece_width;
                } else {
                    width = needed;
                }
                words.push(piece);
            }
        }

        lines.push(WrappedLine {
            words,
            ends_paragraph: true,
        });
    }

    lines
}

fn split_word(word: &str, max_width: f64, measure: &impl Fn(&str) -> f64) -> Vec<String> {
    if measure(word) <= max_width + EPSILON {
        return vec![word.to_owned()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        current.push(c);
        if current.chars().count() > 1 && measure(&current) > max_width + EPSILON {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(c);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[derive(Clone, Copy, Debug)]
struct TextMetrics {
    line_height: f64,
    glyph_height: f64,
    space_width: f64,
}

impl TextMetrics {
    fn of(context: &Context, style: Style) -> Self {
        let font = style.font(&context.font_cache);
        Self {
            line_height: mm_to_f64(style.line_height(&context.font_cache)),
            glyph_height: mm_to_f64(font.glyph_height(style.font_size())),
            space_width: str_width(context, style, " "),
        }
    }
}

/// A paragraph: wrapped, aligned and split across pages line by line.
pub struct TextBlock {
    text: String,
    font: SimpleFont,
    alignment: HorizontalAlignment,
    registry: Rc<FontRegistry>,
    next_line: usize,
}

impl TextBlock {
    pub(crate) fn new(paragraph: SimpleParagraph, registry: Rc<FontRegistry>) -> Result<Self> {
        let (text, font, alignment) = paragraph.into_parts();
        let font = font.ok_or(SimplePdfError::MissingFont {
            element: "paragraph",
        })?;
        Ok(Self {
            text,
            font,
            alignment,
            registry,
            next_line: 0,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &SimpleFont {
        &self.font
    }

    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    fn style(&self, base: Style) -> std::result::Result<Style, Error> {
        self.font.apply_to(base, &self.registry)
    }

    fn lines(&self, context: &Context, style: Style, width: f64) -> Vec<WrappedLine> {
        wrap_text(&self.text, width, |s| str_width(context, style, s))
    }

    /// Height in millimetres of the whole text wrapped at `width` millimetres.
    pub(crate) fn measure(
        &self,
        context: &Context,
        base: Style,
        width: f64,
    ) -> std::result::Result<f64, Error> {
        let style = self.style(base)?;
        let lines = self.lines(context, style, width);
        Ok(lines.len() as f64 * TextMetrics::of(context, style).line_height)
    }

    /// Draws every line, ignoring the height of `area`.
    pub(crate) fn draw(
        &self,
        context: &Context,
        area: &render::Area<'_>,
        base: Style,
    ) -> std::result::Result<(), Error> {
        let style = self.style(base)?;
        let width = mm_to_f64(area.size().width);
        let metrics = TextMetrics::of(context, style);
        let mut y = 0.0;
        for line in self.lines(context, style, width) {
            self.draw_line(context, area, style, metrics, &line, y, width)?;
            y += metrics.line_height;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_line(
        &self,
        context: &Context,
        area: &render::Area<'_>,
        style: Style,
        metrics: TextMetrics,
        line: &WrappedLine,
        y: f64,
        width: f64,
    ) -> std::result::Result<(), Error> {
        let widths: Vec<f64> = line
            .words
            .iter()
            .map(|word| str_width(context, style, word))
            .collect();
        let words_width: f64 = widths.iter().sum();
        let gaps = line.words.len().saturating_sub(1);
        let justify = gaps > 0
            && match self.alignment {
                HorizontalAlignment::Justify => !line.ends_paragraph,
                HorizontalAlignment::JustifyAll => true,
                _ => false,
            };

        let (start, end) = if justify {
            let gap = (width - words_width) / gaps as f64;
            let mut x = 0.0;
            for (word, word_width) in line.words.iter().zip(&widths) {
                area.print_str(&context.font_cache, position(x, y), style, word)?;
                x += word_width + gap;
            }
            (0.0, width)
        } else {
            let natural = words_width + metrics.space_width * gaps as f64;
            let x = match self.alignment {
                HorizontalAlignment::Center => (width - natural) / 2.0,
                HorizontalAlignment::Right => width - natural,
                _ => 0.0,
            }
            .max(0.0);
            if !line.words.is_empty() {
                area.print_str(
                    &context.font_cache,
                    position(x, y),
                    style,
                    line.words.join(" "),
                )?;
            }
            (x, x + natural)
        };

        if line.words.is_empty() {
            return Ok(());
        }
        let font_style = self.font.style();
        if font_style.is_underlined() {
            let baseline = y + metrics.glyph_height + UNDERLINE_OFFSET_MM;
            stroke(area, style.color(), start, end, baseline);
        }
        if font_style.is_strikethrough() {
            let middle = y + metrics.glyph_height * STRIKE_HEIGHT_RATIO;
            stroke(area, style.color(), start, end, middle);
        }
        Ok(())
    }
}

fn stroke(area: &render::Area<'_>, color: Option<Color>, from: f64, to: f64, y: f64) {
    let mut line_style = Style::new();
    if let Some(color) = color {
        line_style = line_style.with_color(color);
    }
    area.draw_line(vec![position(from, y), position(to, y)], line_style);
}

fn rgb(color: Color) -> [u8; 3] {
    match color {
        Color::Rgb(r, g, b) => [r, g, b],
        Color::Greyscale(value) => [value; 3],
        Color::Cmyk(c, m, y, k) => {
            let channel = |value: u8| {
                let ink = 1.0 - f64::from(value) / 255.0;
                let key = 1.0 - f64::from(k) / 255.0;
                (255.0 * ink * key).round() as u8
            };
            [channel(c), channel(m), channel(y)]
        }
    }
}

/// Covers `width` by `height` millimetres at the top left of `area` with
/// `color`, drawn as a single pixel image stretched over the whole box.
fn paint(
    context: &Context,
    area: &render::Area<'_>,
    style: Style,
    color: Color,
    width: f64,
    height: f64,
) -> std::result::Result<(), Error> {
    let pixel = image::RgbImage::from_pixel(1, 1, image::Rgb(rgb(color)));
    let mut swatch = Image::from_dynamic_image(image::DynamicImage::ImageRgb8(pixel))?;
    let pixel_mm = MM_PER_INCH / IMAGE_DPI;
    swatch.set_scale(Scale::new(width / pixel_mm, height / pixel_mm));
    swatch.render(context, area.clone(), style)?;
    Ok(())
}

impl Element for TextBlock {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> std::result::Result<RenderResult, Error> {
        let style = self.style(style)?;
        let width = mm_to_f64(area.size().width);
        let available = mm_to_f64(area.size().height);
        let metrics = TextMetrics::of(context, style);
        let lines = self.lines(context, style, width);

        let mut result = RenderResult::default();
        let mut y = 0.0;
        while let Some(line) = lines.get(self.next_line) {
            if y + metrics.line_height > available - EPSILON {
                result.has_more = true;
                break;
            }
            self.draw_line(context, &area, style, metrics, line, y, width)?;
            y += metrics.line_height;
            self.next_line += 1;
        }

        if y > 0.0 {
            result.size = genpdf::Size::new(area.size().width, mm_from_f64(y));
        }
        Ok(result)
    }
}

/// An image scaled to fit its box and surrounded by its edges.
pub struct ImageBlock {
    image: Image,
    pixels: (u32, u32),
    size: Option<Size>,
    edges: Edges,
    horizontal: HorizontalAlignment,
    vertical: VerticalAlignment,
}

impl ImageBlock {
    pub(crate) fn new(source: PdfImage) -> Result<Self> {
        let decoded = source.decode()?;
        let pixels = decoded.dimensions();
        // genpdf rejects images with an alpha channel.
        let rgb = image::DynamicImage::ImageRgb8(decoded.to_rgb8());
        let image = Image::from_dynamic_image(rgb)?;
        Ok(Self {
            image,
            pixels,
            size: source.size(),
            edges: source.edges().unwrap_or_default(),
            horizontal: source.horizontal_alignment(),
            vertical: source.vertical_alignment(),
        })
    }

    /// Pixel dimensions of the decoded image.
    pub fn pixels(&self) -> (u32, u32) {
        self.pixels
    }

    /// Size in millimetres of the drawn image, edges excluded, when it has to
    /// fit into `max_width` by `max_height` millimetres.
    pub(crate) fn fitted(&self, max_width: f64, max_height: Option<f64>) -> (f64, f64) {
        let px_width = f64::from(self.pixels.0.max(1));
        let px_height = f64::from(self.pixels.1.max(1));
        let (requested_width, requested_height) = match self.size {
            Some(size) => (points_mm(size.width()), points_mm(size.height())),
            None => (
                points_mm(self.pixels.0 as f32),
                points_mm(self.pixels.1 as f32),
            ),
        };

        let box_width = requested_width.min(max_width) - points_mm(self.edges.horizontal());
        let box_height = max_height.map_or(requested_height, |max| requested_height.min(max))
            - points_mm(self.edges.vertical());
        let factor = (box_width.max(0.0) / px_width).min(box_height.max(0.0) / px_height);
        (px_width * factor, px_height * factor)
    }

    /// Height in millimetres including the edges.
    pub(crate) fn measure(&self, max_width: f64) -> f64 {
        self.fitted(max_width, None).1 + points_mm(self.edges.vertical())
    }

    fn draw(
        &mut self,
        context: &Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> std::result::Result<(), Error> {
        let (width, _) = self.fitted(mm_to_f64(area.size().width), None);
        let natural_width = f64::from(self.pixels.0.max(1)) * MM_PER_INCH / IMAGE_DPI;
        let scale = width / natural_width;
        self.image.set_scale(Scale::new(scale, scale));
        self.image.set_alignment(
            self.horizontal
                .or(HorizontalAlignment::Center)
                .to_genpdf(),
        );
        area.add_margins(self.edges.to_margins());
        self.image.render(context, area, style)?;
        Ok(())
    }
}

impl Element for ImageBlock {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> std::result::Result<RenderResult, Error> {
        let height = self.measure(mm_to_f64(area.size().width));
        if height > mm_to_f64(area.size().height) + EPSILON {
            return Ok(pending());
        }

        let width = area.size().width;
        self.draw(context, area, style)?;

        let mut result = RenderResult::default();
        result.size = genpdf::Size::new(width, mm_from_f64(height));
        Ok(result)
    }
}

enum CellBody {
    Text(TextBlock),
    Image(ImageBlock),
    Empty,
}

struct CellBlock {
    body: CellBody,
    background: Option<Color>,
    padding: Edges,
    border: Color,
    vertical: VerticalAlignment,
}

impl CellBlock {
    fn new(cell: SimpleTableCell, registry: &Rc<FontRegistry>) -> Result<Self> {
        let (content, style, horizontal, vertical) = cell.into_parts();
        let (body, vertical) = match content {
            CellContent::Paragraph(paragraph) => {
                let content_vertical = paragraph.vertical_alignment().or(vertical);
                let mut text = TextBlock::new(paragraph, Rc::clone(registry))?;
                text.alignment = text.alignment.or(horizontal);
                (CellBody::Text(text), content_vertical)
            }
            CellContent::Image(image) => {
                let mut block = ImageBlock::new(image)?;
                block.horizontal = block.horizontal.or(horizontal);
                let content_vertical = block.vertical.or(vertical);
                (CellBody::Image(block), content_vertical)
            }
        };
        Ok(Self::styled(body, &style, vertical))
    }

    fn empty() -> Self {
        Self::styled(
            CellBody::Empty,
            &SimpleCellStyle::default(),
            VerticalAlignment::Middle,
        )
    }

    fn styled(body: CellBody, style: &SimpleCellStyle, vertical: VerticalAlignment) -> Self {
        Self {
            body,
            background: style.background_color(),
            padding: style.effective_padding(),
            border: style.effective_border_color(),
            vertical,
        }
    }

    fn content_height(
        &self,
        context: &Context,
        style: Style,
        inner_width: f64,
    ) -> std::result::Result<f64, Error> {
        match &self.body {
            CellBody::Text(text) => text.measure(context, style, inner_width),
            CellBody::Image(image) => Ok(image.measure(inner_width)),
            CellBody::Empty => Ok(0.0),
        }
    }

    fn height(
        &self,
        context: &Context,
        style: Style,
        width: f64,
    ) -> std::result::Result<f64, Error> {
        let inner_width = (width - points_mm(self.padding.horizontal())).max(0.0);
        Ok(self.content_height(context, style, inner_width)? + points_mm(self.padding.vertical()))
    }

    fn fill(
        &self,
        context: &Context,
        area: &render::Area<'_>,
        style: Style,
        width: f64,
        height: f64,
    ) -> std::result::Result<(), Error> {
        match self.background {
            Some(color) => paint(context, area, style, color, width, height),
            None => Ok(()),
        }
    }

    fn draw(
        &mut self,
        context: &Context,
        area: &render::Area<'_>,
        style: Style,
        width: f64,
        height: f64,
    ) -> std::result::Result<(), Error> {
        let inner_width = (width - points_mm(self.padding.horizontal())).max(0.0);
        let inner_height = (height - points_mm(self.padding.vertical())).max(0.0);
        let content_height = self.content_height(context, style, inner_width)?;
        let offset = self.vertical.offset(inner_height, content_height);

        let mut inner = area.clone();
        inner.add_margins(self.padding.to_margins());
        inner.add_offset(position(0.0, offset));
        // Keep rounding from dropping the last line of a cell.
        inner.set_height(mm_from_f64(content_height + 1.0));
        match &mut self.body {
            CellBody::Text(text) => text.draw(context, &inner, style)?,
            CellBody::Image(image) => image.draw(context, inner, style)?,
            CellBody::Empty => {}
        }

        area.draw_line(
            vec![
                position(0.0, 0.0),
                position(width, 0.0),
                position(width, height),
                position(0.0, height),
                position(0.0, 0.0),
            ],
            Style::new().with_color(self.border),
        );
        Ok(())
    }
}

/// A table laid out row by row.
pub struct TableBlock {
    columns: Vec<f32>,
    width: PdfWidth,
    alignment: HorizontalAlignment,
    header_rows: usize,
    rows: Vec<Vec<CellBlock>>,
    next_row: usize,
    stalled: bool,
}

impl TableBlock {
    /// Groups `cells` into rows of `columns.len()` cells; a short last row is
    /// completed with empty cells.
    pub(crate) fn new(
        columns: Vec<f32>,
        width: PdfWidth,
        alignment: HorizontalAlignment,
        header_rows: usize,
        cells: Vec<SimpleTableCell>,
        registry: &Rc<FontRegistry>,
    ) -> Result<Self> {
        let column_count = columns.len();
        let mut rows = Vec::new();
        if column_count > 0 {
            let mut row = Vec::with_capacity(column_count);
            for cell in cells {
                row.push(CellBlock::new(cell, registry)?);
                if row.len() == column_count {
                    rows.push(std::mem::replace(
                        &mut row,
                        Vec::with_capacity(column_count),
                    ));
                }
            }
            if !row.is_empty() {
                row.resize_with(column_count, CellBlock::empty);
                rows.push(row);
            }
        }

        Ok(Self {
            columns,
            width,
            alignment,
            header_rows,
            rows,
            next_row: 0,
            stalled: false,
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn width(&self) -> PdfWidth {
        self.width
    }

    /// Splits `table_width` millimetres between the columns by their weights.
    pub(crate) fn column_widths(&self, table_width: f64) -> Vec<f64> {
        let total: f64 = self.columns.iter().map(|w| f64::from(w.max(0.0))).sum();
        let count = self.columns.len() as f64;
        self.columns
            .iter()
            .map(|weight| {
                if total > 0.0 {
                    table_width * f64::from(weight.max(0.0)) / total
                } else {
                    table_width / count
                }
            })
            .collect()
    }

    fn row_height(
        &self,
        context: &Context,
        style: Style,
        row: usize,
        widths: &[f64],
    ) -> std::result::Result<f64, Error> {
        let mut height: f64 = 0.0;
        for (cell, width) in self.rows[row].iter().zip(widths) {
            height = height.max(cell.height(context, style, *width)?);
        }
        Ok(height)
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_row(
        &mut self,
        context: &Context,
        area: &render::Area<'_>,
        style: Style,
        row: usize,
        x: f64,
        y: f64,
        height: f64,
        widths: &[f64],
    ) -> std::result::Result<(), Error> {
        let mut cell_areas = Vec::with_capacity(widths.len());
        let mut left = x;
        for width in widths {
            let mut cell_area = area.clone();
            cell_area.add_offset(position(left, y));
            cell_area.set_width(mm_from_f64(*width));
            cell_area.set_height(mm_from_f64(height));
            cell_areas.push(cell_area);
            left += width;
        }

        let cells = &mut self.rows[row];
        for ((cell, cell_area), width) in cells.iter().zip(&cell_areas).zip(widths) {
            cell.fill(context, cell_area, style, *width, height)?;
        }
        for ((cell, cell_area), width) in cells.iter_mut().zip(&cell_areas).zip(widths) {
            cell.draw(context, cell_area, style, *width, height)?;
        }
        Ok(())
    }
}

impl Element for TableBlock {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> std::result::Result<RenderResult, Error> {
        if self.next_row >= self.rows.len() {
            return Ok(RenderResult::default());
        }

        let available_width = mm_to_f64(area.size().width);
        let available_height = mm_to_f64(area.size().height);
        let table_width = self.width.resolve_mm(available_width);
        let x = match self.alignment {
            HorizontalAlignment::Center => (available_width - table_width) / 2.0,
            HorizontalAlignment::Right => available_width - table_width,
            _ => 0.0,
        };
        let widths = self.column_widths(table_width);

        let header_rows = self.header_rows.min(self.rows.len());
        let has_body = self.rows.len() > header_rows;
        let repeated: Vec<(usize, f64)> = if self.next_row > 0 && has_body {
            (0..header_rows)
                .map(|row| Ok((row, self.row_height(context, style, row, &widths)?)))
                .collect::<std::result::Result<_, Error>>()?
        } else {
            Vec::new()
        };

        let mut used: f64 = repeated.iter().map(|(_, height)| height).sum();
        let mut planned = Vec::new();
        for row in self.next_row..self.rows.len() {
            let height = self.row_height(context, style, row, &widths)?;
            if used + height > available_height + EPSILON {
                break;
            }
            used += height;
            planned.push((row, height));
        }

        // Header rows are not left alone at the bottom of a page.
        let body_rows = planned.iter().filter(|(row, _)| *row >= header_rows).count();
        if planned.is_empty() || (has_body && body_rows == 0) {
            if self.stalled {
                return Err(Error::new(
                    format!(
                        "Table row {} does not fit on an empty page",
                        self.next_row.max(header_rows) + 1
                    ),
                    ErrorKind::PageSizeExceeded,
                ));
            }
            self.stalled = true;
            debug!(
                "Table row {} continues on the next page",
                self.next_row.max(header_rows) + 1
            );
            return Ok(pending());
        }
        self.stalled = false;

        let mut y = 0.0;
        for (row, height) in repeated.into_iter().chain(planned.iter().copied()) {
            self.draw_row(context, &area, style, row, x, y, height, &widths)?;
            y += height;
        }

        if let Some((last, _)) = planned.last() {
            self.next_row = last + 1;
        }

        let mut result = RenderResult::default();
        result.size = genpdf::Size::new(mm_from_f64(x + table_width), mm_from_f64(y));
        result.has_more = self.next_row < self.rows.len();
        if result.has_more {
            debug!(
                "Table continues at row {} of {}",
                self.next_row + 1,
                self.rows.len()
            );
        }
        Ok(result)
    }
}

/// Any element an editor can hand to a document or layout.
pub enum ContentElement {
    Text(TextBlock),
    Image(ImageBlock),
    Table(TableBlock),
    PageBreak(PageBreak),
}

impl ContentElement {
    /// Converts inserted content, decoding images and checking fonts.
    pub(crate) fn from_insertable(insertable: Insertable, commons: &PdfCommons) -> Result<Self> {
        let registry = commons.shared_font_registry();
        Ok(match insertable {
            Insertable::Paragraph(paragraph) => Self::Text(TextBlock::new(paragraph, registry)?),
            Insertable::Image(image) => Self::Image(ImageBlock::new(image)?),
            Insertable::Cell(cell) => Self::Table(TableBlock::new(
                vec![1.0],
                PdfWidth::max(),
                HorizontalAlignment::Left,
                0,
                vec![cell.with_fallback_font(commons.default_font())],
                &registry,
            )?),
            Insertable::Table(table) => Self::Table(table.into_block()?),
        })
    }

    pub(crate) fn page_break() -> Self {
        Self::PageBreak(PageBreak::new())
    }

    /// Short name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Image(_) => "image",
            Self::Table(_) => "table",
            Self::PageBreak(_) => "page break",
        }
    }
}

impl Element for ContentElement {
    fn render(
        &mut self,
        context: &Context,
        area: render::Area<'_>,
        style: Style,
    ) -> std::result::Result<RenderResult, Error> {
        match self {
            Self::Text(text) => text.render(context, area, style),
            Self::Image(image) => image.render(context, area, style),
            Self::Table(table) => table.render(context, area, style),
            Self::PageBreak(page_break) => page_break.render(context, area, style),
        }
    }
}
