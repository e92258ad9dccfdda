//! Lookup of the font family used when no font was registered explicitly.
//!
//! Families are tried in order: the bundled Roboto files first, then the
//! platform families.  A family is usable when one directory of its search
//! path holds all four faces.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable pointing to a directory with the bundled font files.
pub const FONTS_DIR_ENV: &str = "SIMPLE_PDF_FONTS_DIR";

/// Environment variable overriding the directory searched for platform fonts.
pub const SYSTEM_FONTS_DIR_ENV: &str = "SIMPLE_PDF_SYSTEM_FONTS_DIR";

#[derive(Clone, Copy, PartialEq, Eq)]
enum Origin {
    /// Shipped next to the binary or the crate, overridable by [`FONTS_DIR_ENV`].
    Bundled,
    /// Installed on the machine, overridable by [`SYSTEM_FONTS_DIR_ENV`].
    Platform,
}

struct KnownFamily {
    name: &'static str,
    origin: Origin,
    directories: &'static [&'static str],
    /// Regular, bold, italic and bold italic faces.
    faces: [&'static str; 4],
}

const KNOWN_FAMILIES: &[KnownFamily] = &[
    KnownFamily {
        name: DEFAULT_FONT_FAMILY_NAME,
        origin: Origin::Bundled,
        directories: &[],
        faces: [
            "Roboto-Regular.ttf",
            "Roboto-Bold.ttf",
            "Roboto-Italic.ttf",
            "Roboto-BoldItalic.ttf",
        ],
    },
    KnownFamily {
        name: "DejaVuSans",
        origin: Origin::Platform,
        directories: &[
            "/usr/share/fonts/truetype/dejavu",
            "/usr/share/fonts/dejavu",
            "/usr/share/fonts/TTF",
            "/usr/local/share/fonts/dejavu",
        ],
        faces: [
            "DejaVuSans.ttf",
            "DejaVuSans-Bold.ttf",
            "DejaVuSans-Oblique.ttf",
            "DejaVuSans-BoldOblique.ttf",
        ],
    },
    KnownFamily {
        name: "Arial",
        origin: Origin::Platform,
        directories: &[],
        faces: ["arial.ttf", "arialbd.ttf", "ariali.ttf", "arialbi.ttf"],
    },
];

fn env_directory(var: &str) -> Option<PathBuf> {
    env::var_os(var)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

impl KnownFamily {
    fn search_path(&self) -> Vec<PathBuf> {
        let mut candidates = Vec::new();
        match self.origin {
            Origin::Bundled => {
                candidates.extend(env_directory(FONTS_DIR_ENV));
                if let Some(bin_dir) = env::current_exe()
                    .ok()
                    .and_then(|exe| exe.parent().map(Path::to_path_buf))
                {
                    candidates.push(bin_dir.join("assets/fonts"));
                }
                candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"));
            }
            Origin::Platform => {
                candidates.extend(env_directory(SYSTEM_FONTS_DIR_ENV));
                if cfg!(windows) {
                    candidates.extend(
                        ["WINDIR", "SystemRoot"]
                            .into_iter()
                            .filter_map(env_directory)
                            .map(|root| root.join("Fonts")),
                    );
                }
            }
        }
        candidates.extend(self.directories.iter().map(PathBuf::from));

        let mut unique: Vec<PathBuf> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if !unique.contains(&candidate) {
                unique.push(candidate);
            }
        }
        unique
    }

    fn missing_faces(&self, directory: &Path) -> Vec<&'static str> {
        self.faces
            .iter()
            .copied()
            .filter(|face| !directory.join(face).is_file())
            .collect()
    }

    /// The first directory holding every face, or a description of each miss.
    fn locate(&self) -> Result<PathBuf, String> {
        let mut misses = Vec::new();
        for directory in self.search_path() {
            if !directory.is_dir() {
                misses.push(format!("{} (no such directory)", directory.display()));
                continue;
            }
            let missing = self.missing_faces(&directory);
            if missing.is_empty() {
                return Ok(directory);
            }
            misses.push(format!(
                "{} (missing {})",
                directory.display(),
                missing.join(", ")
            ));
        }
        Err(misses.join(", "))
    }

    fn load(&self, directory: &Path) -> Result<FontFamily<FontData>, Error> {
        let face = |file: &str| {
            let path = directory.join(file);
            FontData::load(&path, None).map_err(|err| {
                Error::new(
                    format!("Failed to load {} from {}: {}", self.name, path.display(), err),
                    io::Error::new(io::ErrorKind::InvalidData, err.to_string()),
                )
            })
        };
        let [regular, bold, italic, bold_italic] = self.faces;
        Ok(FontFamily {
            regular: face(regular)?,
            bold: face(bold)?,
            italic: face(italic)?,
            bold_italic: face(bold_italic)?,
        })
    }
}

/// Loads the first usable known family.  Returns the family together with
/// its name.
pub(crate) fn load_default_font_family() -> Result<(&'static str, FontFamily<FontData>), Error> {
    let mut misses = Vec::new();
    for family in KNOWN_FAMILIES {
        match family.locate() {
            Ok(directory) => {
                if family.origin == Origin::Platform {
                    warn!(
                        "Bundled fonts unavailable ({}); falling back to the '{}' family",
                        misses.join("; "),
                        family.name
                    );
                }
                debug!("Loading {} fonts from {}", family.name, directory.display());
                return family.load(&directory).map(|loaded| (family.name, loaded));
            }
            Err(reason) => misses.push(format!("{}: {}", family.name, reason)),
        }
    }

    Err(Error::new(
        format!(
            "No usable font family found. Set {} to a directory containing {}. Checked {}",
            FONTS_DIR_ENV,
            KNOWN_FAMILIES[0].faces.join(", "),
            misses.join("; ")
        ),
        io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
    ))
}

/// Returns the default font family as a `genpdf` font family definition.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    load_default_font_family().map(|(_, family)| family)
}

/// Name and regular face file of the family [`default_font_family`] loads.
#[cfg(test)]
pub(crate) fn regular_face_path() -> Option<(&'static str, PathBuf)> {
    KNOWN_FAMILIES.iter().find_map(|family| {
        let directory = family.locate().ok()?;
        Some((family.name, directory.join(family.faces[0])))
    })
}

/// Indicates whether [`default_font_family`] can find a family on this machine.
pub fn default_fonts_available() -> bool {
    KNOWN_FAMILIES.iter().any(|family| family.locate().is_ok())
}
