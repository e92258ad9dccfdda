//! Tables generated from lists of serializable records.
//!
//! Every record becomes one row and every serialized field one column, in
//! declaration order.  Column titles are derived from the field names, so
//! `firstName` and `first_name` both become "First name".  Use
//! `#[serde(rename = "...")]` or an explicit column title to choose a title and
//! `#[serde(skip)]` to leave a field out of the table.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use genpdf::style::Color;
use log::{debug, warn};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::configuration::PdfCommons;
use crate::editor::{Editor, TableEditor};
use crate::elements::{SimpleCellStyle, SimpleParagraph, SimpleTableCell};
use crate::error::{Result, SimplePdfError};
use crate::fonts::SimpleFont;
use crate::model::{colors, Edges, FontStyle, HorizontalAlignment, PdfWidth, VerticalAlignment};

/// Text written for fields without a value.
pub const NULL_VALUE: &str = "NULL";

const ODD_ROW_BACKGROUND: Color = Color::Rgb(230, 230, 230);

type Extractor<T> = Box<dyn Fn(&T) -> String>;

#[derive(Clone, Copy, PartialEq, Eq)]
enum CharType {
    Upper,
    Lower,
    Digit,
    Other,
}

impl CharType {
    fn of(c: char) -> Self {
        if c.is_uppercase() {
            Self::Upper
        } else if c.is_lowercase() {
            Self::Lower
        } else if c.is_numeric() {
            Self::Digit
        } else {
            Self::Other
        }
    }
}

/// Splits `value` where the character type changes.  An upper case letter
/// followed by lower case letters starts a new word, so `parseHTMLString`
/// becomes `parse`, `HTML`, `String`.
fn split_camel_case(value: &str) -> Vec<String> {
    let chars: Vec<char> = value.chars().collect();
    let mut words = Vec::new();
    let Some(first) = chars.first() else {
        return words;
    };

    let mut start = 0;
    let mut current = CharType::of(*first);
    for (pos, c) in chars.iter().enumerate().skip(1) {
        let kind = CharType::of(*c);
        if kind == current {
            continue;
        }
        if kind == CharType::Lower && current == CharType::Upper {
            if pos - 1 != start {
                words.push(chars[start..pos - 1].iter().collect());
                start = pos - 1;
            }
        } else {
            words.push(chars[start..pos].iter().collect());
            start = pos;
        }
        current = kind;
    }
    words.push(chars[start..].iter().collect());
    words
}

/// Title of the column showing the field `key`.
///
/// Identifier-like keys are split into words at case changes and underscores;
/// the first word is capitalised and the others are lower case.  Keys that
/// cannot be a Rust field name (`Birth date`, `E-mail`) or have no lower case
/// letter (`ID`, `CPF`) come from `#[serde(rename)]` and are kept as they are.
pub fn column_title(key: &str) -> String {
    let identifier = key.chars().all(|c| c.is_alphanumeric() || c == '_');
    if !identifier || !key.chars().any(char::is_lowercase) {
        return key.to_owned();
    }

    key.split('_')
        .filter(|part| !part.is_empty())
        .flat_map(split_camel_case)
        .enumerate()
        .map(|(index, word)| {
            let lower = word.to_lowercase();
            if index > 0 {
                return lower;
            }
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => lower,
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NULL_VALUE.to_owned(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a map",
    }
}

/// Column keys and the text of every cell, row by row.
fn tabulate<T: Serialize>(
    items: &[T],
    extractors: &HashMap<String, Extractor<T>>,
) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let records = items
        .iter()
        .map(|item| match serde_json::to_value(item)? {
            Value::Object(fields) => Ok(fields),
            other => Err(SimplePdfError::UnsupportedRecord(
                value_kind(&other).to_owned(),
            )),
        })
        .collect::<Result<Vec<Map<String, Value>>>>()?;

    let keys: Vec<String> = match records.first() {
        Some(first) => first.keys().cloned().collect(),
        None => {
            warn!("Table has no items; no columns can be derived");
            Vec::new()
        }
    };

    let rows = items
        .iter()
        .zip(&records)
        .map(|(item, record)| {
            keys.iter()
                .map(|key| match extractors.get(key) {
                    Some(extract) => extract(item),
                    None => format_value(record.get(key)),
                })
                .collect()
        })
        .collect();
    Ok((keys, rows))
}

fn title_of(key: &str, titles: &HashMap<String, String>) -> String {
    titles
        .get(key)
        .cloned()
        .unwrap_or_else(|| column_title(key))
}

fn new_table(columns: usize, commons: &Rc<PdfCommons>) -> TableEditor {
    let mut table = TableEditor::new(columns, Rc::clone(commons));
    table.set_width(PdfWidth::max()).set_header_rows(1);
    table
}

/// Text and position of a body cell, handed to the body style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellInfo {
    row_data: String,
    row_index: usize,
}

impl CellInfo {
    pub fn new(row_data: impl Into<String>, row_index: usize) -> Self {
        Self {
            row_data: row_data.into(),
            row_index,
        }
    }

    pub fn row_data(&self) -> &str {
        &self.row_data
    }

    /// Zero-based index of the record, header excluded.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn is_even(&self) -> bool {
        self.row_index % 2 == 0
    }

    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    pub fn with_row_data(&self, row_data: impl Into<String>) -> Self {
        Self::new(row_data, self.row_index)
    }
}

fn default_header_cell(title: &str, font: &SimpleFont) -> SimpleTableCell {
    let font = font
        .clone()
        .with_style(FontStyle::Bold)
        .with_increased_size(2.0);
    SimpleTableCell::styled(
        SimpleParagraph::styled(title, font),
        SimpleCellStyle::new(Some(colors::LIGHT_GRAY), Some(Edges::all(5.0))),
    )
}

fn default_body_cell(info: &CellInfo, font: &SimpleFont) -> SimpleTableCell {
    let even = SimpleCellStyle::new(Some(colors::WHITE), Some(Edges::all(2.0)));
    let style = if info.is_even() {
        even
    } else {
        even.with_background_color(ODD_ROW_BACKGROUND)
    };
    SimpleTableCell::styled(
        SimpleParagraph::styled(info.row_data(), font.clone())
            .with_vertical_alignment(VerticalAlignment::Middle),
        style,
    )
}

/// Builds the header cell of every column and the body cell of every field.
#[derive(Clone)]
pub struct DataTableStyle {
    header: Rc<dyn Fn(&str) -> SimpleTableCell>,
    body: Rc<dyn Fn(&CellInfo) -> SimpleTableCell>,
}

impl DataTableStyle {
    pub fn new(
        header: impl Fn(&str) -> SimpleTableCell + 'static,
        body: impl Fn(&CellInfo) -> SimpleTableCell + 'static,
    ) -> Self {
        Self {
            header: Rc::new(header),
            body: Rc::new(body),
        }
    }

    /// Bold light grey header and zebra striped body rows, all in `font`.
    pub fn defaults(font: SimpleFont) -> Self {
        let body_font = font.clone();
        Self::new(
            move |title| default_header_cell(title, &font),
            move |info| default_body_cell(info, &body_font),
        )
    }

    pub fn default_header_and_custom_body(
        font: SimpleFont,
        body: impl Fn(&CellInfo) -> SimpleTableCell + 'static,
    ) -> Self {
        Self::new(move |title| default_header_cell(title, &font), body)
    }

    pub fn default_body_and_custom_header(
        font: SimpleFont,
        header: impl Fn(&str) -> SimpleTableCell + 'static,
    ) -> Self {
        Self::new(header, move |info| default_body_cell(info, &font))
    }

    pub fn header_cell(&self, title: &str) -> SimpleTableCell {
        (self.header)(title)
    }

    pub fn body_cell(&self, info: &CellInfo) -> SimpleTableCell {
        (self.body)(info)
    }
}

impl fmt::Debug for DataTableStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTableStyle").finish_non_exhaustive()
    }
}

/// A styled table with one row per record and a header repeated on every page.
pub struct DataTable<T> {
    commons: Rc<PdfCommons>,
    items: Vec<T>,
    custom_extractors: HashMap<String, Extractor<T>>,
    column_titles: HashMap<String, String>,
    style: DataTableStyle,
    horizontal_alignment: HorizontalAlignment,
}

impl<T: Serialize> DataTable<T> {
    pub fn builder() -> DataTableBuilder<T> {
        DataTableBuilder::new()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn style(&self) -> &DataTableStyle {
        &self.style
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    /// Lays the records out in a full width table editor.
    pub fn generate_table(&self) -> Result<TableEditor> {
        let (keys, rows) = tabulate(&self.items, &self.custom_extractors)?;
        let mut table = new_table(keys.len(), &self.commons);
        table.set_horizontal_alignment(self.horizontal_alignment);

        for key in &keys {
            table.add(self.style.header_cell(&title_of(key, &self.column_titles)))?;
        }
        for (index, row) in rows.into_iter().enumerate() {
            let info = CellInfo::new(String::new(), index);
            for value in row {
                table.add(self.style.body_cell(&info.with_row_data(value)))?;
            }
        }

        debug!(
            "Generated data table with {} columns and {} rows",
            keys.len(),
            self.items.len()
        );
        Ok(table)
    }
}

/// Collects the parts of a [`DataTable`]; commons, items and style are required.
pub struct DataTableBuilder<T> {
    commons: Option<Rc<PdfCommons>>,
    items: Option<Vec<T>>,
    custom_extractors: HashMap<String, Extractor<T>>,
    column_titles: HashMap<String, String>,
    style: Option<DataTableStyle>,
    horizontal_alignment: HorizontalAlignment,
}

impl<T> Default for DataTableBuilder<T> {
    fn default() -> Self {
        Self {
            commons: None,
            items: None,
            custom_extractors: HashMap::new(),
            column_titles: HashMap::new(),
            style: None,
            horizontal_alignment: HorizontalAlignment::Left,
        }
    }
}

impl<T: Serialize> DataTableBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commons(mut self, commons: Rc<PdfCommons>) -> Self {
        self.commons = Some(commons);
        self
    }

    pub fn items(mut self, items: impl IntoIterator<Item = T>) -> Self {
        self.items = Some(items.into_iter().collect());
        self
    }

    /// Computes the text of the column `key` instead of using the serialized value.
    ///
    /// `key` is the serialized field name, so it is the renamed name for
    /// fields using `#[serde(rename)]`.
    pub fn custom_extractor(
        mut self,
        key: impl Into<String>,
        extractor: impl Fn(&T) -> String + 'static,
    ) -> Self {
        self.custom_extractors
            .insert(key.into(), Box::new(extractor));
        self
    }

    /// Writes `title` verbatim in the header of the column `key`.
    pub fn column_title(mut self, key: impl Into<String>, title: impl Into<String>) -> Self {
        self.column_titles.insert(key.into(), title.into());
        self
    }

    pub fn style(mut self, style: DataTableStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }

    pub fn build(self) -> Result<DataTable<T>> {
        Ok(DataTable {
            commons: self.commons.ok_or(SimplePdfError::MissingField("commons"))?,
            items: self.items.ok_or(SimplePdfError::MissingField("items"))?,
            custom_extractors: self.custom_extractors,
            column_titles: self.column_titles,
            style: self.style.ok_or(SimplePdfError::MissingField("style"))?,
            horizontal_alignment: self.horizontal_alignment,
        })
    }
}

/// A plain table of records: titles and values as unstyled paragraphs in the
/// default font.
pub struct ObjectTable<T> {
    commons: Rc<PdfCommons>,
    items: Vec<T>,
    custom_extractors: HashMap<String, Extractor<T>>,
    column_titles: HashMap<String, String>,
}

impl<T: Serialize> ObjectTable<T> {
    pub fn new(commons: Rc<PdfCommons>, items: Vec<T>) -> Self {
        Self {
            commons,
            items,
            custom_extractors: HashMap::new(),
            column_titles: HashMap::new(),
        }
    }

    pub fn with_column_title(mut self, key: impl Into<String>, title: impl Into<String>) -> Self {
        self.column_titles.insert(key.into(), title.into());
        self
    }

    pub fn with_custom_extractor(
        mut self,
        key: impl Into<String>,
        extractor: impl Fn(&T) -> String + 'static,
    ) -> Self {
        self.custom_extractors
            .insert(key.into(), Box::new(extractor));
        self
    }

    pub fn generate_table(&self) -> Result<TableEditor> {
        let (keys, rows) = tabulate(&self.items, &self.custom_extractors)?;
        let mut table = new_table(keys.len(), &self.commons);

        let cells = keys
            .iter()
            .map(|key| title_of(key, &self.column_titles))
            .chain(rows.into_iter().flatten());
        for text in cells {
            table.add(SimpleParagraph::new(text).with_vertical_alignment(VerticalAlignment::Middle))?;
        }
        Ok(table)
    }
}
