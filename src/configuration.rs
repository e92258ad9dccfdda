//! Page geometry and the state shared by every editor of a document.

use std::rc::Rc;

use crate::fonts::{FontRegistry, SimpleFont};
use crate::model::{points_to_mm, Edges};

const DEFAULT_MARGIN: f32 = 36.0;

/// Paper dimensions in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSize {
    width: f32,
    height: f32,
}

impl PageSize {
    pub const A3: PageSize = PageSize::new(842.0, 1191.0);
    pub const A4: PageSize = PageSize::new(595.0, 842.0);
    pub const A5: PageSize = PageSize::new(420.0, 595.0);
    pub const LETTER: PageSize = PageSize::new(612.0, 792.0);
    pub const LEGAL: PageSize = PageSize::new(612.0, 1008.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Swaps width and height, turning portrait into landscape and back.
    pub fn rotate(self) -> Self {
        Self::new(self.height, self.width)
    }

    pub(crate) fn to_genpdf(self) -> genpdf::Size {
        genpdf::Size::new(points_to_mm(self.width), points_to_mm(self.height))
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

/// Page size and margins, all in points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfiguration {
    page_size: PageSize,
    margin_left: f32,
    margin_right: f32,
    margin_top: f32,
    margin_bottom: f32,
}

impl Default for PageConfiguration {
    /// A4 with half-inch margins.
    fn default() -> Self {
        Self::with_page_size(PageSize::A4)
    }
}

impl PageConfiguration {
    pub fn new(
        page_size: PageSize,
        margin_left: f32,
        margin_right: f32,
        margin_top: f32,
        margin_bottom: f32,
    ) -> Self {
        Self {
            page_size,
            margin_left,
            margin_right,
            margin_top,
            margin_bottom,
        }
    }

    /// The given page size with half-inch margins.
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self::new(
            page_size,
            DEFAULT_MARGIN,
            DEFAULT_MARGIN,
            DEFAULT_MARGIN,
            DEFAULT_MARGIN,
        )
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn margin_left(&self) -> f32 {
        self.margin_left
    }

    pub fn margin_right(&self) -> f32 {
        self.margin_right
    }

    pub fn margin_top(&self) -> f32 {
        self.margin_top
    }

    pub fn margin_bottom(&self) -> f32 {
        self.margin_bottom
    }

    pub fn horizontal_total_margin(&self) -> f32 {
        self.margin_left + self.margin_right
    }

    pub fn vertical_total_margin(&self) -> f32 {
        self.margin_top + self.margin_bottom
    }

    pub fn total_width(&self) -> f32 {
        self.page_size.width()
    }

    pub fn total_height(&self) -> f32 {
        self.page_size.height()
    }

    /// Width left for content once the horizontal margins are removed.
    pub fn utilizable_width(&self) -> f32 {
        self.total_width() - self.horizontal_total_margin()
    }

    /// Height left for content once the vertical margins are removed.
    pub fn utilizable_height(&self) -> f32 {
        self.total_height() - self.vertical_total_margin()
    }

    pub(crate) fn margins(&self) -> Edges {
        Edges::new(
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
            self.margin_left,
        )
    }
}

/// Settings shared by the wrapper and every editor it hands out.
#[derive(Clone, Debug, Default)]
pub struct PdfCommons {
    page_configuration: PageConfiguration,
    registered_fonts: Vec<SimpleFont>,
    default_font: Option<SimpleFont>,
    registry: Rc<FontRegistry>,
}

impl PdfCommons {
    pub fn new(page_configuration: PageConfiguration) -> Self {
        Self {
            page_configuration,
            ..Self::default()
        }
    }

    pub fn page_configuration(&self) -> &PageConfiguration {
        &self.page_configuration
    }

    pub fn registered_fonts(&self) -> &[SimpleFont] {
        &self.registered_fonts
    }

    /// Font applied to text inserted without one.
    pub fn default_font(&self) -> Option<&SimpleFont> {
        self.default_font.as_ref()
    }

    /// Families that were loaded into the document, available once it is open.
    pub fn font_registry(&self) -> &FontRegistry {
        &self.registry
    }

    pub fn register_font(&mut self, font: SimpleFont, set_as_default: bool) {
        if set_as_default {
            self.default_font = Some(font.clone());
        }
        self.registered_fonts.push(font);
    }

    pub fn set_default_font(&mut self, font: SimpleFont) {
        self.default_font = Some(font);
    }

    pub(crate) fn shared_font_registry(&self) -> Rc<FontRegistry> {
        Rc::clone(&self.registry)
    }

    pub(crate) fn set_font_registry(&mut self, registry: FontRegistry) {
        self.registry = Rc::new(registry);
    }
}
