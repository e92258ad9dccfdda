//! Editors that place content into a document, a layout or a table.

use std::rc::Rc;

use genpdf::elements::LinearLayout;
use log::debug;
use serde::Serialize;

use crate::configuration::PdfCommons;
use crate::data_table::{DataTableBuilder, DataTableStyle, ObjectTable};
use crate::elements::{Insertable, SimpleTableCell};
use crate::error::{Result, SimplePdfError};
use crate::fonts::SimpleFont;
use crate::layout::{ContentElement, TableBlock};
use crate::model::{HorizontalAlignment, PdfWidth};

/// Shared behaviour of every editor.
///
/// Implementors only decide where converted content goes; [`Editor::add`]
/// takes care of giving paragraphs without a font the default font of the
/// document first.
pub trait Editor {
    fn commons(&self) -> &Rc<PdfCommons>;

    /// Stores an element that is ready to be inserted.
    fn insert_element(&mut self, element: Insertable) -> Result<()>;

    fn default_font(&self) -> Option<&SimpleFont> {
        self.commons().default_font()
    }

    fn add(&mut self, element: impl Into<Insertable>) -> Result<&mut Self>
    where
        Self: Sized,
    {
        let element = match element.into() {
            Insertable::Paragraph(paragraph) if !paragraph.has_font() => {
                match self.default_font() {
                    Some(font) => Insertable::Paragraph(paragraph.with_font(font.clone())),
                    None => Insertable::Paragraph(paragraph),
                }
            }
            other => other,
        };
        self.insert_element(element)?;
        Ok(self)
    }

    /// Builds a [`DataTable`](crate::DataTable) and adds the generated table.
    ///
    /// The builder handed to `build` already carries the commons of this
    /// editor and, when a default font is set, the default style.
    fn add_data_table<R, F>(&mut self, build: F) -> Result<&mut Self>
    where
        Self: Sized,
        R: Serialize,
        F: FnOnce(DataTableBuilder<R>) -> DataTableBuilder<R>,
    {
        let mut builder = DataTableBuilder::new().commons(Rc::clone(self.commons()));
        if let Some(font) = self.default_font() {
            builder = builder.style(DataTableStyle::defaults(font.clone()));
        }
        let table = build(builder).build()?.generate_table()?;
        self.add(table)
    }

    /// Adds an unstyled table with one row per item.
    fn add_object_table<R: Serialize>(&mut self, items: Vec<R>) -> Result<&mut Self>
    where
        Self: Sized,
    {
        let table = ObjectTable::new(Rc::clone(self.commons()), items).generate_table()?;
        self.add(table)
    }
}

/// Somewhere rendered content can be appended to.
pub trait ElementTarget {
    fn push_element(&mut self, element: ContentElement) -> Result<()>;

    fn push_page_break(&mut self) -> Result<()>;
}

impl ElementTarget for genpdf::Document {
    fn push_element(&mut self, element: ContentElement) -> Result<()> {
        self.push(element);
        Ok(())
    }

    fn push_page_break(&mut self) -> Result<()> {
        self.push(ContentElement::page_break());
        Ok(())
    }
}

impl ElementTarget for LinearLayout {
    fn push_element(&mut self, element: ContentElement) -> Result<()> {
        self.push(element);
        Ok(())
    }

    fn push_page_break(&mut self) -> Result<()> {
        Err(SimplePdfError::CouldNotCreatePage)
    }
}

impl ElementTarget for Vec<ContentElement> {
    fn push_element(&mut self, element: ContentElement) -> Result<()> {
        self.push(element);
        Ok(())
    }

    fn push_page_break(&mut self) -> Result<()> {
        self.push(ContentElement::page_break());
        Ok(())
    }
}

/// Editor appending content to a document or to a layout.
pub struct PdfEditor<'a, T> {
    commons: Rc<PdfCommons>,
    target: &'a mut T,
    page_number: usize,
}

impl<'a, T: ElementTarget> PdfEditor<'a, T> {
    pub fn new(commons: Rc<PdfCommons>, target: &'a mut T) -> Self {
        Self::on_page(commons, target, 1)
    }

    pub(crate) fn on_page(commons: Rc<PdfCommons>, target: &'a mut T, page_number: usize) -> Self {
        Self {
            commons,
            target,
            page_number,
        }
    }

    /// Page the editor writes to.
    ///
    /// Header and footer editors see the page being decorated; document
    /// editors count the page breaks they inserted.
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Continues on a new page.
    pub fn new_page(&mut self) -> Result<&mut Self> {
        self.target.push_page_break()?;
        self.page_number += 1;
        debug!("Started page {}", self.page_number);
        Ok(self)
    }

    /// Adds a table of `columns` equally wide columns filled by `edit`.
    pub fn add_table<F>(&mut self, columns: usize, edit: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TableEditor) -> Result<()>,
    {
        let mut table = TableEditor::new(columns, Rc::clone(&self.commons));
        edit(&mut table)?;
        self.add(table)
    }

    /// Adds a table whose columns share the width by the given weights.
    pub fn add_table_with_widths<F>(&mut self, relative_widths: &[f32], edit: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TableEditor) -> Result<()>,
    {
        let mut table = TableEditor::with_relative_widths(relative_widths, Rc::clone(&self.commons));
        edit(&mut table)?;
        self.add(table)
    }
}

impl<T: ElementTarget> Editor for PdfEditor<'_, T> {
    fn commons(&self) -> &Rc<PdfCommons> {
        &self.commons
    }

    fn insert_element(&mut self, element: Insertable) -> Result<()> {
        let element = ContentElement::from_insertable(element, &self.commons)?;
        debug!("Inserting {} on page {}", element.kind(), self.page_number);
        self.target.push_element(element)
    }
}

/// Collects cells row by row, left to right.
///
/// Anything that is not a cell is wrapped in a cell with the default style.
/// The table is 80% of the available width and centered unless configured
/// otherwise.
pub struct TableEditor {
    commons: Rc<PdfCommons>,
    relative_widths: Vec<f32>,
    absolute_widths: Option<Vec<f32>>,
    width: PdfWidth,
    horizontal_alignment: HorizontalAlignment,
    header_rows: usize,
    cells: Vec<SimpleTableCell>,
}

impl TableEditor {
    /// A table with `columns` equally wide columns; at least one column is kept.
    pub fn new(columns: usize, commons: Rc<PdfCommons>) -> Self {
        Self::with_relative_widths(&vec![1.0; columns.max(1)], commons)
    }

    pub fn with_relative_widths(relative_widths: &[f32], commons: Rc<PdfCommons>) -> Self {
        let relative_widths = if relative_widths.is_empty() {
            vec![1.0]
        } else {
            relative_widths.to_vec()
        };
        Self {
            commons,
            relative_widths,
            absolute_widths: None,
            width: PdfWidth::relative(80.0),
            horizontal_alignment: HorizontalAlignment::Center,
            header_rows: 0,
            cells: Vec::new(),
        }
    }

    pub fn set_width(&mut self, width: PdfWidth) -> &mut Self {
        self.width = width;
        self
    }

    /// Fixes every column to a width in points; the table becomes as wide as their sum.
    pub fn set_columns_width(&mut self, widths: &[f32]) -> Result<&mut Self> {
        if widths.len() != self.relative_widths.len() {
            return Err(SimplePdfError::ColumnCountMismatch {
                expected: self.relative_widths.len(),
                actual: widths.len(),
            });
        }
        self.width = PdfWidth::absolute(widths.iter().sum());
        self.absolute_widths = Some(widths.to_vec());
        Ok(self)
    }

    /// Rows repeated at the top of every page the table continues on.
    pub fn set_header_rows(&mut self, rows: usize) -> &mut Self {
        self.header_rows = rows;
        self
    }

    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) -> &mut Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn number_of_columns(&self) -> usize {
        self.relative_widths.len()
    }

    pub fn width(&self) -> PdfWidth {
        self.width
    }

    pub fn relative_widths(&self) -> &[f32] {
        &self.relative_widths
    }

    pub fn absolute_widths(&self) -> Option<&[f32]> {
        self.absolute_widths.as_deref()
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    pub fn header_rows(&self) -> usize {
        self.header_rows
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[SimpleTableCell] {
        &self.cells
    }

    pub(crate) fn into_block(self) -> Result<TableBlock> {
        let weights = self.absolute_widths.unwrap_or(self.relative_widths);
        TableBlock::new(
            weights,
            self.width,
            self.horizontal_alignment,
            self.header_rows,
            self.cells,
            &self.commons.shared_font_registry(),
        )
    }
}

impl Editor for TableEditor {
    fn commons(&self) -> &Rc<PdfCommons> {
        &self.commons
    }

    fn insert_element(&mut self, element: Insertable) -> Result<()> {
        let cell = match element {
            Insertable::Cell(cell) => cell,
            Insertable::Paragraph(paragraph) => SimpleTableCell::new(paragraph),
            Insertable::Image(image) => SimpleTableCell::new(image),
            Insertable::Table(_) => {
                return Err(SimplePdfError::ElementNotSupported("table".to_owned()))
            }
        };
        let cell = cell.with_fallback_font(self.commons.default_font());
        self.cells.push(cell);
        Ok(())
    }
}
