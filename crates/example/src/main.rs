mod employees;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use simple_pdf::{
    colors, Edges, Editor, ElementTarget, FontStyle, HorizontalAlignment, PageConfiguration,
    PageSize, PdfEditor, PdfImage, PdfWidth, PdfWrapper, SimpleCellStyle, SimpleFont,
    SimpleParagraph, SimpleTableCell, VerticalAlignment,
};

use employees::{random_employees, Employee};

const LOGO_COLUMN_WIDTH: f32 = 100.0;

/// Renders the simple-pdf sample documents.
///
/// Fonts are looked up as described in `simple_pdf::fonts` unless
/// `--fonts-dir` points to a directory with the four Roboto files.
#[derive(Parser)]
#[command(author, version, about = "Renders the simple-pdf sample documents")]
struct Cli {
    /// Directory the PDF files are written to.
    #[arg(long, global = true, default_value = "pdf-out")]
    output_dir: PathBuf,

    /// Directory containing Roboto-Regular.ttf, -Bold, -Italic and -BoldItalic.
    #[arg(long, global = true)]
    fonts_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an employee list followed by styled text to `HelloWorld.pdf`.
    #[command(name = "hello-world", aliases = ["hello_world", "hello"])]
    HelloWorld {
        #[arg(long, default_value_t = 50)]
        employees: u32,
    },

    /// Render a styled, multi-page data table to `DataTableExample.pdf`.
    #[command(name = "data-table", aliases = ["data_table"])]
    DataTable {
        #[arg(long, default_value_t = 70)]
        employees: u32,
    },

    /// Render every sample document.
    All,

    /// Remove the output directory.
    Clean,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::HelloWorld { employees } => {
            hello_world(&cli.output_dir, cli.fonts_dir.as_deref(), employees)
        }
        Commands::DataTable { employees } => {
            data_table(&cli.output_dir, cli.fonts_dir.as_deref(), employees)
        }
        Commands::All => hello_world(&cli.output_dir, cli.fonts_dir.as_deref(), 50)
            .and_then(|()| data_table(&cli.output_dir, cli.fonts_dir.as_deref(), 70)),
        Commands::Clean => clean(&cli.output_dir),
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}

fn load_font(fonts_dir: Option<&Path>) -> simple_pdf::Result<SimpleFont> {
    match fonts_dir {
        Some(directory) => SimpleFont::from_directory(directory, "Roboto"),
        None => SimpleFont::default_family(),
    }
}

fn prepare_output(output_dir: &Path, file_name: &str) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(output_dir)
        .map_err(|err| format!("Could not create directory {}: {err}", output_dir.display()))?;
    Ok(output_dir.join(file_name))
}

/// A small generated logo: a blue to orange gradient with a white frame.
fn logo() -> PdfImage {
    let size = 64;
    let image = image::RgbImage::from_fn(size, size, |x, y| {
        if x < 4 || y < 4 || x >= size - 4 || y >= size - 4 {
            return image::Rgb([255, 255, 255]);
        }
        let t = (x + y) as f32 / (2 * size) as f32;
        image::Rgb([
            (40.0 + 215.0 * t) as u8,
            (90.0 + 110.0 * t) as u8,
            (200.0 * (1.0 - t)) as u8,
        ])
    });
    PdfImage::from_dynamic_image(image::DynamicImage::ImageRgb8(image))
}

/// Logo, title and date in a three column table, followed by a blank line.
fn report_header<T: ElementTarget>(
    editor: &mut PdfEditor<'_, T>,
    logo: &PdfImage,
    title_font: Option<&SimpleFont>,
) -> simple_pdf::Result<()> {
    let page = *editor.commons().page_configuration();
    let center = page.utilizable_width() - 2.0 * LOGO_COLUMN_WIDTH;
    let today = Local::now().format("%d/%m/%Y").to_string();

    let mut title = SimpleParagraph::new("Report of Employees")
        .with_horizontal_alignment(HorizontalAlignment::Center)
        .with_vertical_alignment(VerticalAlignment::Middle);
    if let Some(font) = title_font {
        title = title.with_font(font.clone());
    }

    editor.add_table(3, |table| {
        table.set_width(PdfWidth::max());
        table.set_columns_width(&[LOGO_COLUMN_WIDTH, center, LOGO_COLUMN_WIDTH])?;
        table.add(
            logo.clone()
                .with_horizontal_alignment(HorizontalAlignment::Center)
                .with_vertical_alignment(VerticalAlignment::Middle)
                .with_size_wh(40.0, 40.0)
                .with_edges(Edges::all(4.0)),
        )?;
        table.add(title)?;
        table.add(SimpleTableCell::styled(
            SimpleParagraph::new(format!("Date: {today}"))
                .with_vertical_alignment(VerticalAlignment::Middle),
            SimpleCellStyle::new(None, Some(Edges::only_left(2.0))),
        ))?;
        Ok(())
    })?;
    editor.add(SimpleParagraph::new(" "))?;
    Ok(())
}

fn hello_world(
    output_dir: &Path,
    fonts_dir: Option<&Path>,
    count: u32,
) -> Result<(), Box<dyn Error>> {
    let path = prepare_output(output_dir, "HelloWorld.pdf")?;
    let font = load_font(fonts_dir)?;
    let employees = random_employees(count);
    let payroll: f64 = employees.iter().map(|employee| employee.salary).sum();
    info!("Generated {} employees, payroll {:.2}", employees.len(), payroll);

    let logo = logo();
    let mut pdf = PdfWrapper::new(PageConfiguration::with_page_size(PageSize::A4))
        .with_title("Hello World")
        .register_font(font.clone().with_size(8.0), true)
        .set_header_event(move |editor| report_header(editor, &logo, None))
        .register_events()
        .open()?;

    {
        let large = font.clone().with_size(20.0);
        let mut editor = pdf.to_editor();
        editor
            .add_object_table(employees)?
            .new_page()?
            .add(SimpleParagraph::styled(
                format!("{} ITALIC RED", font.name()),
                large
                    .clone()
                    .with_style(FontStyle::Italic)
                    .with_color(colors::RED),
            ))?
            .add(SimpleParagraph::styled(
                format!("{} BOLD CYAN", font.name()),
                large
                    .clone()
                    .with_style(FontStyle::Bold)
                    .with_color(colors::CYAN),
            ))?
            .add(SimpleParagraph::styled(
                format!("{} BOLD_ITALIC ORANGE", font.name()),
                large
                    .with_style(FontStyle::BoldItalic)
                    .with_color(colors::ORANGE),
            ))?;
    }

    let rendered = pdf.render_to_file(&path)?;
    println!(
        "Generated {} ({} bytes)",
        path.display(),
        rendered.bytes.len()
    );
    Ok(())
}

fn data_table(
    output_dir: &Path,
    fonts_dir: Option<&Path>,
    count: u32,
) -> Result<(), Box<dyn Error>> {
    let path = prepare_output(output_dir, "DataTableExample.pdf")?;
    let font = load_font(fonts_dir)?;
    let title_font = font.clone().with_style(FontStyle::Bold).with_size(14.0);
    let employees = random_employees(count);

    let logo = logo();
    let mut pdf = PdfWrapper::new(PageConfiguration::with_page_size(PageSize::A4))
        .with_title("Data table example")
        .register_font(font.with_size(8.0), true)
        .set_header_event(move |editor| report_header(editor, &logo, Some(&title_font)))
        .register_events()
        .open()?;

    pdf.to_editor().add_data_table(|table| {
        table
            .items(employees)
            .custom_extractor("Active", |employee: &Employee| {
                String::from(if employee.is_active { "Yes" } else { "No" })
            })
    })?;

    let rendered = pdf.render_to_file(&path)?;
    println!(
        "Generated {} ({} bytes)",
        path.display(),
        rendered.bytes.len()
    );
    Ok(())
}

fn clean(output_dir: &Path) -> Result<(), Box<dyn Error>> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)?;
        println!("Removed {}", output_dir.display());
    } else {
        println!("Nothing to clean at {}", output_dir.display());
    }
    Ok(())
}
