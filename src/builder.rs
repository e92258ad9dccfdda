//! The document wrapper: font registration, page events and rendering.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use genpdf::elements::LinearLayout;
use genpdf::error::{Error, ErrorKind};
use genpdf::style;
use genpdf::{Element, Margins, PageDecorator, Position};
use log::{debug, info};

use crate::configuration::{PageConfiguration, PdfCommons};
use crate::editor::PdfEditor;
use crate::error::{Result, SimplePdfError};
use crate::fonts::{FontRegistry, SimpleFont};
use crate::model::points_to_mm;

/// Callback filling the header or footer of a page.
pub type PageEvent = dyn Fn(&mut PdfEditor<'_, LinearLayout>) -> Result<()>;

struct FooterEvent {
    height: f32,
    callback: Rc<PageEvent>,
}

/// Collects the configuration of a document before it is opened.
///
/// ```no_run
/// use simple_pdf::{Editor, PageConfiguration, PdfWrapper, SimpleFont, SimpleParagraph};
///
/// # fn main() -> simple_pdf::Result<()> {
/// let mut pdf = PdfWrapper::new(PageConfiguration::default())
///     .register_font(SimpleFont::from_file("fonts/Roboto-Regular.ttf")?, true)
///     .open()?;
/// pdf.to_editor().add(SimpleParagraph::new("Hello, PDF!"))?;
/// pdf.render_to_file("hello.pdf")?;
/// # Ok(())
/// # }
/// ```
pub struct PdfWrapper {
    commons: PdfCommons,
    title: Option<String>,
    header: Option<Rc<PageEvent>>,
    footer: Option<FooterEvent>,
    events_registered: bool,
}

impl Default for PdfWrapper {
    fn default() -> Self {
        Self::new(PageConfiguration::default())
    }
}

impl PdfWrapper {
    pub fn new(page_configuration: PageConfiguration) -> Self {
        Self {
            commons: PdfCommons::new(page_configuration),
            title: None,
            header: None,
            footer: None,
            events_registered: false,
        }
    }

    pub fn commons(&self) -> &PdfCommons {
        &self.commons
    }

    /// Registers a font loaded from files so it is embedded in the document.
    pub fn register_font(mut self, font: SimpleFont, set_as_default: bool) -> Self {
        self.commons.register_font(font, set_as_default);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Content drawn at the top of every page, above the page content.
    pub fn set_header_event<F>(mut self, header: F) -> Self
    where
        F: Fn(&mut PdfEditor<'_, LinearLayout>) -> Result<()> + 'static,
    {
        self.header = Some(Rc::new(header));
        self
    }

    /// Content drawn inside `height` points reserved at the bottom of every page.
    pub fn set_footer_event<F>(mut self, height: f32, footer: F) -> Self
    where
        F: Fn(&mut PdfEditor<'_, LinearLayout>) -> Result<()> + 'static,
    {
        self.footer = Some(FooterEvent {
            height,
            callback: Rc::new(footer),
        });
        self
    }

    /// Activates the header and footer events; without this call they never run.
    pub fn register_events(mut self) -> Self {
        self.events_registered = true;
        self
    }

    /// Loads the fonts into a new document and makes it ready for editing.
    ///
    /// The default font, or else the first registered font, becomes the base
    /// font of the document.  Without any font the bundled default family is
    /// loaded and registered as the default font.
    pub fn open(self) -> Result<OpenPdf> {
        let Self {
            mut commons,
            title,
            header,
            footer,
            events_registered,
        } = self;

        let base = match commons
            .default_font()
            .or_else(|| commons.registered_fonts().first())
        {
            Some(font) => font.clone(),
            None => {
                let font = SimpleFont::default_family()?;
                debug!("No font registered; using the '{}' family", font.name());
                commons.register_font(font.clone(), true);
                font
            }
        };
        let base_data = font_data(&commons, &base)?;

        let mut document = genpdf::Document::new(base_data);
        let mut registry = FontRegistry::new();
        registry.insert(base.name(), document.font_cache().default_font_family());
        for font in commons.registered_fonts() {
            if registry.contains(font.name()) {
                continue;
            }
            let data = font
                .data()
                .ok_or_else(|| SimplePdfError::FontNotLoaded(font.name().to_owned()))?;
            let family = document.add_font_family(data.clone());
            registry.insert(font.name(), family);
        }
        debug!(
            "Opened document with base font '{}' and {} font families",
            base.name(),
            registry.len()
        );
        commons.set_font_registry(registry);

        let page_configuration = *commons.page_configuration();
        document.set_paper_size(page_configuration.page_size().to_genpdf());
        if let Some(title) = title {
            document.set_title(title);
        }

        let commons = Rc::new(commons);
        let (header, footer) = if events_registered {
            (header, footer)
        } else {
            if header.is_some() || footer.is_some() {
                debug!("Page events were set but not registered; they will not run");
            }
            (None, None)
        };
        document.set_page_decorator(SimplePageDecorator {
            page: 0,
            commons: Rc::clone(&commons),
            margins: page_configuration.margins().to_margins(),
            header,
            footer,
        });

        Ok(OpenPdf { commons, document })
    }
}

/// Glyph data for `base`, taken from a registered font of the same name when
/// `base` only names its family.
fn font_data(
    commons: &PdfCommons,
    base: &SimpleFont,
) -> Result<genpdf::fonts::FontFamily<genpdf::fonts::FontData>> {
    std::iter::once(base)
        .chain(commons.registered_fonts())
        .filter(|font| font.name() == base.name())
        .find_map(SimpleFont::data)
        .cloned()
        .ok_or_else(|| SimplePdfError::FontNotLoaded(base.name().to_owned()))
}

/// An open document accepting content until it is rendered.
pub struct OpenPdf {
    commons: Rc<PdfCommons>,
    document: genpdf::Document,
}

impl OpenPdf {
    pub fn commons(&self) -> &Rc<PdfCommons> {
        &self.commons
    }

    /// An editor appending to the document body.
    pub fn to_editor(&mut self) -> PdfEditor<'_, genpdf::Document> {
        PdfEditor::new(Rc::clone(&self.commons), &mut self.document)
    }

    /// Lays out every page and returns the PDF bytes.
    pub fn render(self) -> Result<RenderedPdf> {
        let mut bytes = Vec::new();
        self.document.render(&mut bytes)?;
        info!("Rendered PDF ({} bytes)", bytes.len());
        Ok(RenderedPdf { bytes })
    }

    pub fn render_to_file(self, path: impl AsRef<Path>) -> Result<RenderedPdf> {
        let path = path.as_ref();
        let rendered = self.render()?;
        rendered.write_to_file(path)?;
        info!("Wrote {}", path.display());
        Ok(rendered)
    }
}

/// The bytes of a rendered document.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
}

impl RenderedPdf {
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }
}

struct SimplePageDecorator {
    page: usize,
    commons: Rc<PdfCommons>,
    margins: Margins,
    header: Option<Rc<PageEvent>>,
    footer: Option<FooterEvent>,
}

impl SimplePageDecorator {
    fn run_event(&self, event: &PageEvent) -> std::result::Result<LinearLayout, Error> {
        let mut layout = LinearLayout::vertical();
        let mut editor = PdfEditor::on_page(Rc::clone(&self.commons), &mut layout, self.page);
        event(&mut editor).map_err(SimplePdfError::into_pdf_error)?;
        Ok(layout)
    }
}

impl PageDecorator for SimplePageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> std::result::Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;
        area.add_margins(self.margins);

        if let Some(header) = &self.header {
            let mut element = self.run_event(header.as_ref())?;
            let result = element.render(context, area.clone(), style)?;
            if result.has_more {
                return Err(Error::new(
                    format!("Header of page {} does not fit on the page", self.page),
                    ErrorKind::PageSizeExceeded,
                ));
            }
            area.add_offset(Position::new(0, result.size.height));
        }

        if let Some(footer) = &self.footer {
            let available = area.size().height;
            let height = points_to_mm(footer.height);
            if height > available {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - height));
            footer_area.set_height(height);
            let mut element = self.run_event(footer.callback.as_ref())?;
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - height);
        }

        debug!("Decorated page {}", self.page);
        Ok(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::PageSize;

    #[test]
    fn registering_fonts_sets_the_default() {
        let wrapper = PdfWrapper::new(PageConfiguration::with_page_size(PageSize::LETTER))
            .register_font(SimpleFont::named("Body"), false)
            .register_font(SimpleFont::named("Title"), true);
        assert_eq!(wrapper.commons().registered_fonts().len(), 2);
        assert_eq!(
            wrapper.commons().default_font().map(SimpleFont::name),
            Some("Title")
        );
        assert_eq!(
            wrapper.commons().page_configuration().page_size(),
            PageSize::LETTER
        );
    }

    #[test]
    fn fonts_without_data_cannot_be_opened() {
        let result = PdfWrapper::default()
            .register_font(SimpleFont::named("Helvetica"), true)
            .open();
        match result {
            Err(SimplePdfError::FontNotLoaded(name)) => assert_eq!(name, "Helvetica"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("a font without data must not open"),
        }
    }

    #[test]
    fn events_are_inactive_until_registered() {
        let wrapper = PdfWrapper::default().set_header_event(|_| Ok(()));
        assert!(wrapper.header.is_some());
        assert!(!wrapper.events_registered);
        assert!(wrapper.register_events().events_registered);
    }
}
