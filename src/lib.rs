//! Simple PDF documents on top of `genpdf`.
//!
//! A [`PdfWrapper`] collects the page configuration, fonts and page events of
//! a document.  Opening it yields an [`OpenPdf`] whose editors accept
//! paragraphs, images, tables and tables generated from serializable records.
//! All measures in the public API are PDF points.

pub mod builder;
pub mod configuration;
pub mod data_table;
pub mod editor;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;

pub use builder::{OpenPdf, PageEvent, PdfWrapper, RenderedPdf};
pub use configuration::{PageConfiguration, PageSize, PdfCommons};
pub use data_table::{column_title, CellInfo, DataTable, DataTableBuilder, DataTableStyle, ObjectTable};
pub use editor::{Editor, ElementTarget, PdfEditor, TableEditor};
pub use elements::{
    CellContent, ImageSource, Insertable, PdfImage, SimpleCellStyle, SimpleParagraph,
    SimpleTableCell,
};
pub use error::{Result, SimplePdfError};
pub use fonts::{FontRegistry, SimpleFont};
pub use genpdf::style::Color;
pub use model::{
    colors, Edges, FontStyle, HorizontalAlignment, PdfWidth, PdfWidthType, Size,
    VerticalAlignment,
};
