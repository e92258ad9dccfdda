use std::cell::Cell;
use std::rc::Rc;

use serde::Serialize;
use sha2::{Digest, Sha256};
use simple_pdf::fonts;
use simple_pdf::{
    colors, DataTableStyle, Editor, FontStyle, HorizontalAlignment, OpenPdf, PageConfiguration,
    PdfImage, PdfWrapper, SimpleCellStyle, SimpleParagraph, SimpleTableCell,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Employee {
    id: u32,
    full_name: String,
    #[serde(rename = "E-mail address")]
    email: String,
    manager: Option<String>,
}

fn employees(count: u32) -> Vec<Employee> {
    (1..=count)
        .map(|id| Employee {
            id,
            full_name: format!("Employee number {id}"),
            email: format!("employee{id}@example.com"),
            manager: (id % 3 == 0).then(|| String::from("Ana")),
        })
        .collect()
}

fn skip(test: &str) {
    eprintln!(
        "Skipping {test}: no usable font family. Set SIMPLE_PDF_FONTS_DIR to a directory with the Roboto fonts."
    );
}

fn open(wrapper: PdfWrapper) -> Option<OpenPdf> {
    if !fonts::default_fonts_available() {
        return None;
    }
    Some(wrapper.open().expect("open document"))
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("parse rendered pdf")
        .get_pages()
        .len()
}

/// Content stream operators of every page, in page order.
fn page_operators(bytes: &[u8]) -> Vec<Vec<String>> {
    let document = lopdf::Document::load_mem(bytes).expect("parse rendered pdf");
    document
        .get_pages()
        .values()
        .map(|page| {
            document
                .get_and_decode_page_content(*page)
                .expect("page content")
                .operations
                .into_iter()
                .map(|operation| operation.operator)
                .collect()
        })
        .collect()
}

fn count(operators: &[String], names: &[&str]) -> usize {
    operators
        .iter()
        .filter(|operator| names.contains(&operator.as_str()))
        .count()
}

fn shown_text(operators: &[String]) -> usize {
    count(operators, &["Tj", "TJ"])
}

fn strokes(operators: &[String]) -> usize {
    count(operators, &["S"])
}

fn painted_images(operators: &[String]) -> usize {
    count(operators, &["Do"])
}

fn render_paragraph(paragraph: SimpleParagraph) -> Option<Vec<String>> {
    let mut pdf = open(PdfWrapper::default())?;
    pdf.to_editor().add(paragraph).expect("paragraph");
    let bytes = pdf.render().expect("render").bytes;
    page_operators(&bytes).into_iter().next()
}

fn render_sample_pdf() -> Option<Vec<u8>> {
    let mut pdf = open(PdfWrapper::default().with_title("Sample"))?;
    let mut editor = pdf.to_editor();
    let font = editor.default_font().cloned().expect("default font");
    editor
        .add(SimpleParagraph::styled(
            "Hello, PDF!",
            font.with_style(FontStyle::Bold).with_size(18.0),
        ))
        .and_then(|editor| {
            editor.add(
                SimpleParagraph::new("Centered text under the title.")
                    .with_horizontal_alignment(HorizontalAlignment::Center),
            )
        })
        .and_then(|editor| editor.add_object_table(employees(3)))
        .expect("add content");

    Some(pdf.render().expect("render sample pdf").bytes)
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    for tag in [
        "xmp:CreateDate",
        "xmp:ModifyDate",
        "xmp:MetadataDate",
        "xmpMM:DocumentID",
        "xmpMM:InstanceID",
        "xmpMM:VersionID",
    ] {
        let start = format!("<{tag}>");
        let end = format!("</{tag}>");
        scrub_xml(&mut normalized, start.as_bytes(), end.as_bytes());
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

#[test]
fn renders_non_empty_output() {
    let Some(bytes) = render_sample_pdf() else {
        return skip("renders_non_empty_output");
    };
    assert!(bytes.starts_with(b"%PDF"), "output should be a PDF file");
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn rendering_is_deterministic() {
    let (Some(bytes_a), Some(bytes_b)) = (render_sample_pdf(), render_sample_pdf()) else {
        return skip("rendering_is_deterministic");
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn long_data_tables_continue_on_new_pages() {
    let Some(mut pdf) = open(PdfWrapper::default()) else {
        return skip("long_data_tables_continue_on_new_pages");
    };
    pdf.to_editor()
        .add_data_table(|table| {
            table
                .items(employees(150))
                .custom_extractor("id", |employee: &Employee| format!("#{:03}", employee.id))
        })
        .expect("data table");

    let bytes = pdf.render().expect("render").bytes;
    assert!(page_count(&bytes) > 1, "150 rows should not fit on one page");
}

#[test]
fn explicit_page_breaks_start_new_pages() {
    let Some(mut pdf) = open(PdfWrapper::default()) else {
        return skip("explicit_page_breaks_start_new_pages");
    };
    let mut editor = pdf.to_editor();
    editor
        .add(SimpleParagraph::new("first page"))
        .and_then(|editor| editor.new_page())
        .and_then(|editor| editor.add(SimpleParagraph::new("second page")))
        .and_then(|editor| editor.new_page())
        .and_then(|editor| editor.add(SimpleParagraph::new("third page")))
        .expect("content");
    assert_eq!(editor.page_number(), 3);

    let bytes = pdf.render().expect("render").bytes;
    assert_eq!(page_count(&bytes), 3);
}

#[test]
fn header_events_run_once_per_page() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let wrapper = PdfWrapper::new(PageConfiguration::default())
        .set_header_event(move |editor| {
            counter.set(counter.get() + 1);
            let title = format!("Page {}", editor.page_number());
            editor.add(SimpleParagraph::new(title))?;
            Ok(())
        })
        .set_footer_event(20.0, |editor| {
            editor.add(
                SimpleParagraph::new("footer").with_horizontal_alignment(HorizontalAlignment::Right),
            )?;
            Ok(())
        })
        .register_events();
    let Some(mut pdf) = open(wrapper) else {
        return skip("header_events_run_once_per_page");
    };
    pdf.to_editor()
        .add(SimpleParagraph::new("body"))
        .and_then(|editor| editor.new_page())
        .and_then(|editor| editor.add(SimpleParagraph::new("more body")))
        .expect("content");

    let bytes = pdf.render().expect("render").bytes;
    assert_eq!(page_count(&bytes), 2);
    assert_eq!(calls.get(), 2);
}

#[test]
fn unregistered_events_never_run() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let wrapper = PdfWrapper::default().set_header_event(move |_| {
        counter.set(counter.get() + 1);
        Ok(())
    });
    let Some(mut pdf) = open(wrapper) else {
        return skip("unregistered_events_never_run");
    };
    pdf.to_editor()
        .add(SimpleParagraph::new("body"))
        .expect("content");
    pdf.render().expect("render");
    assert_eq!(calls.get(), 0);
}

#[test]
fn header_editors_cannot_break_pages() {
    let wrapper = PdfWrapper::default()
        .set_header_event(|editor| {
            editor.new_page()?;
            Ok(())
        })
        .register_events();
    let Some(mut pdf) = open(wrapper) else {
        return skip("header_editors_cannot_break_pages");
    };
    pdf.to_editor()
        .add(SimpleParagraph::new("body"))
        .expect("content");
    let err = pdf.render().err().expect("header must fail");
    assert!(err.to_string().contains("Could not create a new page"));
}

#[test]
fn tables_with_images_and_styles_render() {
    let Some(mut pdf) = open(PdfWrapper::default()) else {
        return skip("tables_with_images_and_styles_render");
    };
    let logo = image::DynamicImage::new_rgb8(64, 32);
    pdf.to_editor()
        .add_table_with_widths(&[1.0, 3.0], |table| {
            table.set_header_rows(1);
            table.add(SimpleTableCell::styled(
                SimpleParagraph::new("Logo"),
                SimpleCellStyle::default().with_background_color(colors::LIGHT_GRAY),
            ))?;
            table.add(SimpleParagraph::new("Description"))?;
            table.add(PdfImage::from_dynamic_image(logo).with_size_wh(60.0, 30.0))?;
            table.add(SimpleParagraph::new("A generated image inside a cell"))?;
            Ok(())
        })
        .and_then(|editor| editor.add(SimpleTableCell::new(SimpleParagraph::new("lone cell"))))
        .expect("table");

    let bytes = pdf.render().expect("render").bytes;
    assert_eq!(page_count(&bytes), 1);
}

#[test]
fn rows_taller_than_a_page_are_reported() {
    let Some(mut pdf) = open(PdfWrapper::default()) else {
        return skip("rows_taller_than_a_page_are_reported");
    };
    let text = "word ".repeat(20_000);
    pdf.to_editor()
        .add_table(1, |table| {
            table.add(SimpleParagraph::new(text))?;
            Ok(())
        })
        .expect("table");
    assert!(pdf.render().is_err());
}

#[test]
fn render_to_file_writes_the_pdf() {
    let Some(mut pdf) = open(PdfWrapper::default()) else {
        return skip("render_to_file_writes_the_pdf");
    };
    pdf.to_editor()
        .add(SimpleParagraph::new("saved"))
        .expect("content");

    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("saved.pdf");
    let rendered = pdf.render_to_file(&path).expect("render to file");
    let written = std::fs::read(&path).expect("read output");
    assert_eq!(written, rendered.bytes);
}

#[test]
fn footers_are_drawn_on_every_page_inside_their_reserved_space() {
    let body = |pdf: &mut OpenPdf| {
        pdf.to_editor()
            .add(SimpleParagraph::new("first"))
            .and_then(|editor| editor.new_page())
            .and_then(|editor| editor.add(SimpleParagraph::new("second")))
            .expect("content");
    };
    let Some(mut plain) = open(PdfWrapper::default()) else {
        return skip("footers_are_drawn_on_every_page_inside_their_reserved_space");
    };
    body(&mut plain);
    let plain = page_operators(&plain.render().expect("render").bytes);

    let wrapper = PdfWrapper::default()
        .set_footer_event(30.0, |editor| {
            let text = format!("page {}", editor.page_number());
            editor.add(SimpleParagraph::new(text))?;
            Ok(())
        })
        .register_events();
    let mut with_footer = open(wrapper).expect("fonts are available");
    body(&mut with_footer);
    let with_footer = page_operators(&with_footer.render().expect("render").bytes);

    assert_eq!(with_footer.len(), 2);
    for (page, (plain, footed)) in plain.iter().zip(&with_footer).enumerate() {
        assert_eq!(
            shown_text(footed),
            shown_text(plain) + 1,
            "footer missing on page {}",
            page + 1
        );
    }
}

#[test]
fn footer_space_is_taken_from_the_body() {
    let lines = |footer_height: Option<f32>| {
        let mut wrapper = PdfWrapper::default();
        if let Some(height) = footer_height {
            wrapper = wrapper.set_footer_event(height, |_| Ok(())).register_events();
        }
        let mut pdf = open(wrapper)?;
        let text = (0..60).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        pdf.to_editor().add(SimpleParagraph::new(text)).expect("text");
        let pages = page_operators(&pdf.render().expect("render").bytes);
        Some(shown_text(&pages[0]))
    };

    let (Some(without), Some(with)) = (lines(None), lines(Some(400.0))) else {
        return skip("footer_space_is_taken_from_the_body");
    };
    assert!(
        with < without,
        "a 400pt footer should leave room for fewer lines ({with} vs {without})"
    );
}

#[test]
fn underline_and_strike_through_draw_strokes() {
    let paragraph = |style: FontStyle| {
        let font = simple_pdf::SimpleFont::default_family()
            .ok()?
            .with_style(style);
        render_paragraph(SimpleParagraph::styled("decorated text", font))
    };

    let (Some(plain), Some(underlined), Some(struck)) = (
        paragraph(FontStyle::Normal),
        paragraph(FontStyle::Underline),
        paragraph(FontStyle::StrikeThru),
    ) else {
        return skip("underline_and_strike_through_draw_strokes");
    };
    assert_eq!(strokes(&plain), 0);
    assert_eq!(strokes(&underlined), 1);
    assert_eq!(strokes(&struck), 1);
}

#[test]
fn justified_lines_place_words_one_by_one() {
    let text = "justified text spreads the words of every line except the last one \
                over the whole width of the page so both margins are straight. "
        .repeat(3);
    let (Some(left), Some(justified)) = (
        render_paragraph(SimpleParagraph::new(text.clone())),
        render_paragraph(
            SimpleParagraph::new(text).with_horizontal_alignment(HorizontalAlignment::Justify),
        ),
    ) else {
        return skip("justified_lines_place_words_one_by_one");
    };
    assert!(shown_text(&left) >= 2, "text should wrap");
    assert!(shown_text(&justified) > shown_text(&left) * 3);
}

#[test]
fn cell_backgrounds_and_borders_are_painted() {
    let table = |style: SimpleCellStyle| {
        let mut pdf = open(PdfWrapper::default())?;
        pdf.to_editor()
            .add_table(2, |table| {
                table.add(SimpleTableCell::styled(SimpleParagraph::new("a"), style))?;
                table.add(SimpleTableCell::styled(SimpleParagraph::new("b"), style))?;
                Ok(())
            })
            .expect("table");
        page_operators(&pdf.render().expect("render").bytes)
            .into_iter()
            .next()
    };

    let (Some(plain), Some(filled)) = (
        table(SimpleCellStyle::default()),
        table(SimpleCellStyle::default().with_background_color(colors::LIGHT_GRAY)),
    ) else {
        return skip("cell_backgrounds_and_borders_are_painted");
    };
    assert_eq!(painted_images(&plain), 0);
    assert_eq!(strokes(&plain), 2, "one border per cell");
    assert_eq!(painted_images(&filled), 2, "one fill per cell");
    assert_eq!(strokes(&filled), 2);
}

#[test]
fn data_table_headers_have_a_background() {
    let Some(mut pdf) = open(PdfWrapper::default()) else {
        return skip("data_table_headers_have_a_background");
    };
    let font = pdf.commons().default_font().cloned().expect("default font");
    pdf.to_editor()
        .add_data_table(|table| {
            table.items(employees(1)).style(DataTableStyle::default_header_and_custom_body(
                font,
                |info| SimpleTableCell::new(SimpleParagraph::new(info.row_data())),
            ))
        })
        .expect("data table");

    let pages = page_operators(&pdf.render().expect("render").bytes);
    assert_eq!(painted_images(&pages[0]), 4, "one fill per header cell");
}

#[test]
fn header_only_tables_are_not_repeated_across_pages() {
    let Some(mut pdf) = open(PdfWrapper::default()) else {
        return skip("header_only_tables_are_not_repeated_across_pages");
    };
    let rows = 150;
    pdf.to_editor()
        .add_table(1, |table| {
            table.set_header_rows(rows);
            for row in 0..rows {
                table.add(SimpleParagraph::new(format!("header {row}")))?;
            }
            Ok(())
        })
        .expect("table");

    let pages = page_operators(&pdf.render().expect("render").bytes);
    assert!(pages.len() > 1);
    let drawn: usize = pages.iter().map(|page| shown_text(page)).sum();
    assert_eq!(drawn, rows);
}
