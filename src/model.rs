//! Geometry and alignment primitives shared by every element.
//!
//! All lengths are expressed in PDF points (1/72 inch).  They are converted to
//! the millimetre based [`genpdf::Mm`] only when an element is rendered, so the
//! values in this module stay plain `f32` numbers that are cheap to copy and
//! easy to compare in tests.

use genpdf::style::Color;
use genpdf::Alignment;

const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Converts a length in points to `genpdf` millimetres.
pub(crate) fn points_to_mm(points: f32) -> genpdf::Mm {
    mm_from_f64(f64::from(points) * MM_PER_POINT)
}

pub(crate) fn mm_from_f64(value: f64) -> genpdf::Mm {
    genpdf::Mm::from(printpdf::Mm(value))
}

pub(crate) fn mm_to_f64(value: genpdf::Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Spacing around the four sides of a box, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    top: f32,
    right: f32,
    bottom: f32,
    left: f32,
}

impl Edges {
    /// Creates edges in CSS order: top, right, bottom, left.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Edges with every side set to zero.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Edges with every side set to `value`.
    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Top and bottom set to `vertical`, left and right to zero.
    pub fn symmetric_vertical(vertical: f32) -> Self {
        Self::new(vertical, 0.0, vertical, 0.0)
    }

    /// Left and right set to `horizontal`, top and bottom to zero.
    pub fn symmetric_horizontal(horizontal: f32) -> Self {
        Self::new(0.0, horizontal, 0.0, horizontal)
    }

    pub fn only_top(top: f32) -> Self {
        Self::new(top, 0.0, 0.0, 0.0)
    }

    pub fn only_right(right: f32) -> Self {
        Self::new(0.0, right, 0.0, 0.0)
    }

    pub fn only_bottom(bottom: f32) -> Self {
        Self::new(0.0, 0.0, bottom, 0.0)
    }

    pub fn only_left(left: f32) -> Self {
        Self::new(0.0, 0.0, 0.0, left)
    }

    pub fn top(&self) -> f32 {
        self.top
    }

    pub fn right(&self) -> f32 {
        self.right
    }

    pub fn bottom(&self) -> f32 {
        self.bottom
    }

    pub fn left(&self) -> f32 {
        self.left
    }

    /// Sum of the left and right sides.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of the top and bottom sides.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub fn with_top(mut self, top: f32) -> Self {
        self.top = top;
        self
    }

    pub fn with_right(mut self, right: f32) -> Self {
        self.right = right;
        self
    }

    pub fn with_bottom(mut self, bottom: f32) -> Self {
        self.bottom = bottom;
        self
    }

    pub fn with_left(mut self, left: f32) -> Self {
        self.left = left;
        self
    }

    /// Side-wise sum of both edges.
    pub fn add(&self, other: &Edges) -> Self {
        Self::new(
            self.top + other.top,
            self.right + other.right,
            self.bottom + other.bottom,
            self.left + other.left,
        )
    }

    /// Side-wise difference of both edges.
    pub fn subtract(&self, other: &Edges) -> Self {
        Self::new(
            self.top - other.top,
            self.right - other.right,
            self.bottom - other.bottom,
            self.left - other.left,
        )
    }

    pub(crate) fn to_margins(self) -> genpdf::Margins {
        genpdf::Margins::trbl(
            points_to_mm(self.top),
            points_to_mm(self.right),
            points_to_mm(self.bottom),
            points_to_mm(self.left),
        )
    }
}

/// Width and height of a box, in points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn add(&self, other: &Size) -> Self {
        Self::new(self.width + other.width, self.height + other.height)
    }

    pub fn subtract(&self, other: &Size) -> Self {
        Self::new(self.width - other.width, self.height - other.height)
    }

    /// Grows the size by the spacing of `edges` on every side.
    pub fn add_edges(&self, edges: &Edges) -> Self {
        Self::new(
            self.width + edges.horizontal(),
            self.height + edges.vertical(),
        )
    }

    /// Shrinks the size by the spacing of `edges` on every side.
    pub fn subtract_edges(&self, edges: &Edges) -> Self {
        Self::new(
            self.width - edges.horizontal(),
            self.height - edges.vertical(),
        )
    }
}

/// Horizontal placement of content inside the space it is given.
///
/// The numeric codes returned by [`HorizontalAlignment::value`] are stable and
/// can be used to persist the alignment compactly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    Undefined,
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
    /// Justified text; the last line of a paragraph stays left aligned.
    Justify,
    /// Justified text including the last line.
    JustifyAll,
}

impl HorizontalAlignment {
    pub fn value(self) -> i32 {
        match self {
            Self::Undefined => -1,
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
            Self::Justify => 3,
            Self::JustifyAll => 8,
        }
    }

    /// Maps a numeric code back to an alignment; unknown codes are `Undefined`.
    pub fn from_value(value: i32) -> Self {
        match value {
            0 => Self::Left,
            1 => Self::Center,
            2 => Self::Right,
            3 => Self::Justify,
            8 => Self::JustifyAll,
            _ => Self::Undefined,
        }
    }

    /// Returns `fallback` when the alignment is undefined.
    pub fn or(self, fallback: HorizontalAlignment) -> Self {
        match self {
            Self::Undefined => fallback,
            other => other,
        }
    }

    pub(crate) fn to_genpdf(self) -> Alignment {
        match self {
            Self::Center => Alignment::Center,
            Self::Right => Alignment::Right,
            Self::Undefined | Self::Left | Self::Justify | Self::JustifyAll => Alignment::Left,
        }
    }
}

/// Vertical placement of content inside a table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    Undefined,
    #[default]
    Top,
    Middle,
    Bottom,
    Baseline,
}

impl VerticalAlignment {
    pub fn value(self) -> i32 {
        match self {
            Self::Undefined => -1,
            Self::Top => 4,
            Self::Middle => 5,
            Self::Bottom => 6,
            Self::Baseline => 7,
        }
    }

    pub fn from_value(value: i32) -> Self {
        match value {
            4 => Self::Top,
            5 => Self::Middle,
            6 => Self::Bottom,
            7 => Self::Baseline,
            _ => Self::Undefined,
        }
    }

    pub fn or(self, fallback: VerticalAlignment) -> Self {
        match self {
            Self::Undefined => fallback,
            other => other,
        }
    }

    /// Offset of content of height `content` inside a box of height `available`.
    pub(crate) fn offset(self, available: f64, content: f64) -> f64 {
        let free = (available - content).max(0.0);
        match self {
            Self::Middle => free / 2.0,
            Self::Bottom | Self::Baseline => free,
            Self::Top | Self::Undefined => 0.0,
        }
    }
}

/// Typeface variant and decorations applied to a font.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
    Underline,
    StrikeThru,
    BoldItalic,
    /// No style requested; the surrounding style is kept.
    #[default]
    Undefined,
}

impl FontStyle {
    pub fn value(self) -> i32 {
        match self {
            Self::Normal => 0,
            Self::Bold => 1,
            Self::Italic => 2,
            Self::Underline => 4,
            Self::StrikeThru => 8,
            Self::BoldItalic => 3,
            Self::Undefined => -1,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, Self::Bold | Self::BoldItalic)
    }

    pub fn is_italic(self) -> bool {
        matches!(self, Self::Italic | Self::BoldItalic)
    }

    pub fn is_underlined(self) -> bool {
        matches!(self, Self::Underline)
    }

    pub fn is_strikethrough(self) -> bool {
        matches!(self, Self::StrikeThru)
    }
}

/// Discriminant of a [`PdfWidth`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PdfWidthType {
    Relative,
    Absolute,
}

/// Width of a table, either a percentage of the available width or a fixed
/// amount of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PdfWidth {
    /// Percentage of the available width.
    Relative(f32),
    /// Fixed width in points.
    Absolute(f32),
}

impl PdfWidth {
    pub fn absolute(value: f32) -> Self {
        Self::Absolute(value)
    }

    pub fn relative(percentage: f32) -> Self {
        Self::Relative(percentage)
    }

    /// The full available width.
    pub fn max() -> Self {
        Self::relative(100.0)
    }

    pub fn width_type(&self) -> PdfWidthType {
        match self {
            Self::Relative(_) => PdfWidthType::Relative,
            Self::Absolute(_) => PdfWidthType::Absolute,
        }
    }

    pub fn value(&self) -> f32 {
        match self {
            Self::Relative(value) | Self::Absolute(value) => *value,
        }
    }

    /// Resolves the width against `available` millimetres; never exceeds it.
    pub(crate) fn resolve_mm(&self, available: f64) -> f64 {
        let width = match self {
            Self::Relative(percentage) => available * f64::from(*percentage) / 100.0,
            Self::Absolute(points) => mm_to_f64(points_to_mm(*points)),
        };
        width.clamp(0.0, available)
    }
}

/// Frequently used colors.
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const ORANGE: Color = Color::Rgb(255, 200, 0);
    pub const GRAY: Color = Color::Rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::Rgb(192, 192, 192);
    pub const DARK_GRAY: Color = Color::Rgb(64, 64, 64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_add_is_side_wise() {
        let result = Edges::new(10.0, 20.0, 30.0, 40.0).add(&Edges::new(50.0, 60.0, 70.0, 80.0));
        assert_eq!(result, Edges::new(60.0, 80.0, 100.0, 120.0));
    }

    #[test]
    fn edges_subtract_is_side_wise() {
        let result =
            Edges::new(100.0, 200.0, 300.0, 400.0).subtract(&Edges::new(50.0, 60.0, 70.0, 80.0));
        assert_eq!(result.top(), 50.0);
        assert_eq!(result.right(), 140.0);
        assert_eq!(result.bottom(), 230.0);
        assert_eq!(result.left(), 320.0);
    }

    #[test]
    fn edges_shortcuts_only_touch_named_sides() {
        assert_eq!(Edges::only_left(2.0), Edges::new(0.0, 0.0, 0.0, 2.0));
        assert_eq!(Edges::symmetric_vertical(3.0).vertical(), 6.0);
        assert_eq!(Edges::symmetric_vertical(3.0).horizontal(), 0.0);
        assert_eq!(Edges::all(4.0).with_top(1.0).top(), 1.0);
    }

    #[test]
    fn size_arithmetic() {
        let sum = Size::new(10.0, 20.0).add(&Size::new(30.0, 40.0));
        assert_eq!((sum.width(), sum.height()), (40.0, 60.0));

        let difference = Size::new(50.0, 60.0).subtract(&Size::new(30.0, 40.0));
        assert_eq!((difference.width(), difference.height()), (20.0, 20.0));
    }

    #[test]
    fn size_edges_arithmetic() {
        let edges = Edges::new(1.0, 2.0, 3.0, 4.0);
        let grown = Size::new(10.0, 10.0).add_edges(&edges);
        assert_eq!(grown, Size::new(16.0, 14.0));
        assert_eq!(grown.subtract_edges(&edges), Size::new(10.0, 10.0));
    }

    #[test]
    fn alignment_codes_round_trip_and_fall_back() {
        assert_eq!(HorizontalAlignment::from_value(8), HorizontalAlignment::JustifyAll);
        assert_eq!(HorizontalAlignment::from_value(42), HorizontalAlignment::Undefined);
        assert_eq!(VerticalAlignment::from_value(5), VerticalAlignment::Middle);
        assert_eq!(VerticalAlignment::from_value(0), VerticalAlignment::Undefined);
        assert_eq!(VerticalAlignment::Bottom.value(), 6);
    }

    #[test]
    fn vertical_offset_centers_and_clamps() {
        assert_eq!(VerticalAlignment::Middle.offset(10.0, 4.0), 3.0);
        assert_eq!(VerticalAlignment::Bottom.offset(10.0, 4.0), 6.0);
        assert_eq!(VerticalAlignment::Top.offset(10.0, 4.0), 0.0);
        assert_eq!(VerticalAlignment::Middle.offset(4.0, 10.0), 0.0);
    }

    #[test]
    fn font_style_flags() {
        assert!(FontStyle::BoldItalic.is_bold());
        assert!(FontStyle::BoldItalic.is_italic());
        assert!(!FontStyle::Underline.is_bold());
        assert_eq!(FontStyle::StrikeThru.value(), 8);
    }

    #[test]
    fn pdf_width_constructors() {
        let absolute = PdfWidth::absolute(50.0);
        assert_eq!(absolute.width_type(), PdfWidthType::Absolute);
        assert_eq!(absolute.value(), 50.0);

        let relative = PdfWidth::relative(75.0);
        assert_eq!(relative.width_type(), PdfWidthType::Relative);
        assert_eq!(relative.value(), 75.0);

        assert_eq!(PdfWidth::max(), PdfWidth::Relative(100.0));
    }

    #[test]
    fn pdf_width_resolution_is_clamped_to_available_space() {
        assert!((PdfWidth::relative(50.0).resolve_mm(100.0) - 50.0).abs() < 1e-9);
        assert_eq!(PdfWidth::absolute(10_000.0).resolve_mm(100.0), 100.0);
        // 72pt is one inch.
        assert!((PdfWidth::absolute(72.0).resolve_mm(500.0) - 25.4).abs() < 1e-6);
    }
}
