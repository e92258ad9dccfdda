//! Font references and the registry of families loaded into a document.

mod discovery;

pub use discovery::{
    default_font_family, default_fonts_available, DEFAULT_FONT_FAMILY_NAME, FONTS_DIR_ENV,
    SYSTEM_FONTS_DIR_ENV,
};

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, Font, FontData, FontFamily};
use genpdf::style::{Color, Style};
use log::{debug, warn};

use crate::error::{Result, SimplePdfError};
use crate::model::FontStyle;

/// Font size used when neither the element nor the document sets one.
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// A font family reference together with size, style and color.
///
/// A `SimpleFont` either carries the glyph data of its family (when it was
/// loaded from files) or only names a family registered elsewhere.  Only fonts
/// with data can be registered with a [`PdfWrapper`](crate::PdfWrapper); named
/// references are resolved against the registered families when rendering.
#[derive(Clone)]
pub struct SimpleFont {
    name: String,
    data: Option<Rc<FontFamily<FontData>>>,
    size: Option<f32>,
    style: FontStyle,
    color: Option<Color>,
}

impl SimpleFont {
    /// References the family registered under `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data: None,
            size: None,
            style: FontStyle::Undefined,
            color: None,
        }
    }

    /// Wraps an already loaded family.
    pub fn from_family(name: impl Into<String>, family: FontFamily<FontData>) -> Self {
        let mut font = Self::named(name);
        font.data = Some(Rc::new(family));
        font
    }

    /// Loads a single font file and uses it for every face of the family.
    ///
    /// The family is named after the family name stored in the font, or after
    /// the file stem when the font has none.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read_font_file(path)?;
        let name = family_name(&bytes).unwrap_or_else(|| {
            let stem = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            debug!("{} has no family name; using '{}'", path.display(), stem);
            stem
        });
        Self::single_face(path, bytes, name)
    }

    /// Loads a single font file under an explicit family name.
    pub fn from_file_with_name(path: impl AsRef<Path>, name: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read_font_file(path)?;
        Self::single_face(path, bytes, name.into())
    }

    fn single_face(path: &Path, bytes: Vec<u8>, name: String) -> Result<Self> {
        let data = FontData::new(bytes, None)?;
        debug!("Loaded font '{}' from {}", name, path.display());
        Ok(Self::from_family(
            name,
            FontFamily {
                regular: data.clone(),
                bold: data.clone(),
                italic: data.clone(),
                bold_italic: data,
            },
        ))
    }

    /// Loads `<family>-Regular.ttf`, `-Bold`, `-Italic` and `-BoldItalic` from `directory`.
    pub fn from_directory(directory: impl AsRef<Path>, family: &str) -> Result<Self> {
        let directory = directory.as_ref();
        if !directory.is_dir() {
            return Err(SimplePdfError::FileNotFound(directory.to_path_buf()));
        }
        let data = fonts::from_files(directory, family, None)?;
        Ok(Self::from_family(family, data))
    }

    /// The bundled family, or the platform family used in its place.
    pub fn default_family() -> Result<Self> {
        let (name, family) = discovery::load_default_font_family()?;
        Ok(Self::from_family(name, family))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> Option<f32> {
        self.size
    }

    pub fn style(&self) -> FontStyle {
        self.style
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// Whether glyph data is attached, so the font can be embedded.
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub(crate) fn data(&self) -> Option<&FontFamily<FontData>> {
        self.data.as_deref()
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    /// Grows the size by `increment`; an unset size counts as [`DEFAULT_FONT_SIZE`].
    pub fn with_increased_size(mut self, increment: f32) -> Self {
        self.size = Some(self.size.unwrap_or(DEFAULT_FONT_SIZE) + increment);
        self
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Combines the style of the surrounding element with this font.
    ///
    /// Size and color fall back to `base`.  An explicit [`FontStyle::Normal`]
    /// drops bold and italic inherited from `base`; any other style adds to it.
    pub fn apply_to(
        &self,
        base: Style,
        registry: &FontRegistry,
    ) -> std::result::Result<Style, Error> {
        Ok(self.merge(base, self.to_style(registry)?))
    }

    fn merge(&self, base: Style, own: Style) -> Style {
        if self.style != FontStyle::Normal {
            return base.and(own);
        }
        let mut style = own;
        if self.size.is_none() {
            style.set_font_size(base.font_size());
        }
        if self.color.is_none() {
            if let Some(color) = base.color() {
                style.set_color(color);
            }
        }
        style
    }

    /// Builds the `genpdf` style for this font using the families in `registry`.
    pub fn to_style(&self, registry: &FontRegistry) -> std::result::Result<Style, Error> {
        let family = registry.get(&self.name).ok_or_else(|| {
            Error::new(
                format!("Font '{}' is not registered with the document", self.name),
                ErrorKind::InvalidData,
            )
        })?;

        let mut style = Style::new().with_font_family(family);
        if let Some(size) = self.size {
            style.set_font_size(font_size_points(size));
        }
        if self.style.is_bold() {
            style.set_bold();
        }
        if self.style.is_italic() {
            style.set_italic();
        }
        if let Some(color) = self.color {
            style.set_color(color);
        }
        Ok(style)
    }
}

impl PartialEq for SimpleFont {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.size == other.size
            && self.style == other.style
            && self.color == other.color
            && self.has_data() == other.has_data()
    }
}

impl fmt::Debug for SimpleFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleFont")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("style", &self.style)
            .field("color", &self.color)
            .field("has_data", &self.has_data())
            .finish()
    }
}

fn read_font_file(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(SimplePdfError::FileNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(SimplePdfError::NotAFile(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}

/// Typographic family name of a TrueType or OpenType font, falling back to
/// the legacy family name.
fn family_name(bytes: &[u8]) -> Option<String> {
    let face = ttf_parser::Face::parse(bytes, 0).ok()?;
    let lookup = |id: u16| {
        face.names()
            .into_iter()
            .filter(|name| name.name_id == id)
            .find_map(|name| name.to_string())
            .filter(|name| !name.trim().is_empty())
    };
    lookup(ttf_parser::name_id::TYPOGRAPHIC_FAMILY).or_else(|| lookup(ttf_parser::name_id::FAMILY))
}

/// PDF font sizes are whole points between 1 and 255.
fn font_size_points(size: f32) -> u8 {
    if !size.is_finite() {
        warn!(
            "Font size {} is not a number; using {}",
            size, DEFAULT_FONT_SIZE
        );
        return DEFAULT_FONT_SIZE as u8;
    }
    let points = size.round().clamp(1.0, f32::from(u8::MAX));
    if points != size.round() {
        warn!("Font size {} is out of range; using {}", size, points);
    } else if points != size {
        debug!("Font size {} rounded to {}", size, points);
    }
    points as u8
}

/// Families added to a document, keyed by font name.
#[derive(Clone, Debug, Default)]
pub struct FontRegistry {
    families: HashMap<String, FontFamily<Font>>,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: impl Into<String>, family: FontFamily<Font>) {
        self.families.insert(name.into(), family);
    }

    pub fn get(&self, name: &str) -> Option<FontFamily<Font>> {
        self.families.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.families.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::colors;

    #[test]
    fn named_font_has_no_data() {
        let font = SimpleFont::named("Roboto");
        assert_eq!(font.name(), "Roboto");
        assert!(!font.has_data());
        assert_eq!(font.size(), None);
        assert_eq!(font.style(), FontStyle::Undefined);
    }

    #[test]
    fn builders_keep_the_name() {
        let font = SimpleFont::named("Roboto")
            .with_size(10.0)
            .with_style(FontStyle::Bold)
            .with_color(colors::RED);
        assert_eq!(font.name(), "Roboto");
        assert_eq!(font.size(), Some(10.0));
        assert!(font.style().is_bold());
        assert_eq!(font.color(), Some(colors::RED));
    }

    #[test]
    fn increased_size_starts_from_default() {
        assert_eq!(
            SimpleFont::named("Roboto").with_increased_size(2.0).size(),
            Some(DEFAULT_FONT_SIZE + 2.0)
        );
        assert_eq!(
            SimpleFont::named("Roboto")
                .with_size(8.0)
                .with_increased_size(2.0)
                .size(),
            Some(10.0)
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("Nope.ttf");
        match SimpleFont::from_file(&missing) {
            Err(SimplePdfError::FileNotFound(path)) => assert_eq!(path, missing),
            other => panic!("unexpected result: {:?}", other.map(|font| font.name().to_owned())),
        }
    }

    #[test]
    fn directory_is_not_a_font_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert!(matches!(
            SimpleFont::from_file(dir.path()),
            Err(SimplePdfError::NotAFile(_))
        ));
    }

    #[test]
    fn unregistered_font_cannot_build_a_style() {
        let registry = FontRegistry::new();
        let err = SimpleFont::named("Missing")
            .to_style(&registry)
            .expect_err("font is not registered");
        assert!(err.to_string().contains("Missing"));
    }

    #[test]
    fn font_sizes_are_clamped_to_pdf_range() {
        assert_eq!(font_size_points(0.2), 1);
        assert_eq!(font_size_points(10.6), 11);
        assert_eq!(font_size_points(1000.0), 255);
        assert_eq!(font_size_points(f32::NAN), 12);
        assert_eq!(font_size_points(f32::INFINITY), 12);
    }

    #[test]
    fn normal_style_clears_inherited_emphasis() {
        let base = Style::new().bold().italic().with_font_size(9).with_color(colors::RED);

        let normal = SimpleFont::named("Roboto").with_style(FontStyle::Normal);
        let merged = normal.merge(base, Style::new());
        assert!(!merged.is_bold());
        assert!(!merged.is_italic());
        assert_eq!(merged.font_size(), 9);
        assert_eq!(merged.color(), Some(colors::RED));

        let inherited = SimpleFont::named("Roboto").merge(base, Style::new());
        assert!(inherited.is_bold());
        assert!(inherited.is_italic());
    }

    #[test]
    fn bytes_without_a_font_have_no_family_name() {
        assert_eq!(family_name(b"not a font"), None);
        assert_eq!(family_name(&[]), None);
    }

    #[test]
    fn font_files_are_named_after_their_family() {
        let Some((expected, path)) = discovery::regular_face_path() else {
            return;
        };
        let font = SimpleFont::from_file(&path).expect("load font");
        let stem = path.file_stem().map(|stem| stem.to_string_lossy().into_owned());
        assert_ne!(Some(font.name().to_owned()), stem);
        assert!(font.name().starts_with(&expected[..4]), "{}", font.name());
    }
}
