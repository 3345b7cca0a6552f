//! The loaders for everything that ends up in memory before the first step.
use std::{fs, path::Path};

use crate::{
    definitions::{cpu, display::fontset},
    ConfigError,
};

#[derive(Clone, Debug)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program bytes stored on the heap
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data, rejecting empty
    /// programs and programs that do not fit behind `0x200`.
    pub fn new(name: &str, data: impl Into<Box<[u8]>>) -> Result<Self, ConfigError> {
        let data = data.into();
        if data.is_empty() {
            return Err(ConfigError::EmptyRom);
        }
        if data.len() > cpu::MAX_ROM_SIZE {
            return Err(ConfigError::RomTooLarge {
                len: data.len(),
                max: cpu::MAX_ROM_SIZE,
            });
        }
        Ok(Rom {
            name: name.to_string(),
            data,
        })
    }

    /// Will read the rom from disk, the file stem becomes the rom name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("loading rom {}", path.display());
        let data = fs::read(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(&name, data)
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }
}

/// The prefix marking a glyph byte inside of a font file.
const GLYPH_PREFIX: &str = "0b";
/// The amount of binary digits following the prefix.
const GLYPH_DIGITS: usize = 8;

/// Finds the first `0b` followed by eight binary digits in the line.
fn find_glyph(line: &str) -> Option<u8> {
    line.match_indices(GLYPH_PREFIX).find_map(|(start, _)| {
        let digits = line[start + GLYPH_PREFIX.len()..].get(..GLYPH_DIGITS)?;
        if !digits.bytes().all(|b| b == b'0' || b == b'1') {
            return None;
        }
        u8::from_str_radix(digits, 2).ok()
    })
}

/// The 16 hexadecimal glyphs, five rows of four pixels each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Font {
    data: [u8; fontset::SIZE],
}

impl Default for Font {
    fn default() -> Self {
        Self {
            data: fontset::FONTSET,
        }
    }
}

impl Font {
    /// Parses a glyph table. Every line carrying a `0b` token followed by
    /// eight binary digits contributes one byte, all other lines are
    /// skipped. Exactly 80 bytes are required.
    ///
    /// # Example
    /// ```rust
    /// # use chip::resources::Font;
    /// let text = "0b11110000\n".repeat(80);
    /// let font = Font::parse(&text).expect("80 valid lines");
    /// assert!(font.get_data().iter().all(|&row| row == 0xF0));
    ///
    /// assert!(Font::parse("0b1111").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, crate::ConfigError> {
        let mut data = [0; fontset::SIZE];
        let mut count = 0;

        for (line_number, line) in text.lines().enumerate() {
            let value = match find_glyph(line) {
                Some(value) => value,
                None => {
                    log::trace!("no glyph on line {}", line_number + 1);
                    continue;
                }
            };

            if count < fontset::SIZE {
                data[count] = value;
            }
            count += 1;
        }

        if count != fontset::SIZE {
            return Err(ConfigError::FontLength(count));
        }
        Ok(Self { data })
    }

    /// Will read the glyph table from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("loading font {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Will read the glyph table from disk, any problem with the file falls
    /// back to the built in table.
    pub fn from_file_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path) {
            Ok(font) => font,
            Err(err) => {
                log::warn!("bad font file: {}", err);
                log::info!("reverting to default font");
                Self::default()
            }
        }
    }

    /// The raw glyph rows.
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }
}
