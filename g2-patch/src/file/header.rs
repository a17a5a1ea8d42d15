//! Textual file header
//!
//! ```text
//! Version=Nord Modular G2 File Format 1\r\n
//! Type=Patch\r\n
//! Version=23\r\n
//! Info=BUILD 266\r\n
//! \0
//! ```
//!
//! The first `Version` line names the format, the second one carries the
//! binary version.

use std::fmt;

use crate::error::{G2Error, Result};
use crate::{BINARY_VERSION, BUILD_VERSION};

/// Format name written by the editor
pub const FORMAT_NAME: &str = "Nord Modular G2 File Format 1";

/// What a file contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Patch,
    Performance,
}

impl FileType {
    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Patch => "Patch",
            FileType::Performance => "Performance",
        }
    }

    /// Binary revision byte stored after the text header
    pub fn revision(self) -> u8 {
        match self {
            FileType::Patch => 0,
            FileType::Performance => 1,
        }
    }

    /// Usual file extension
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Patch => "pch2",
            FileType::Performance => "prf2",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed text header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextHeader {
    pub format_name: String,
    pub file_type: FileType,
    pub version: u32,
    pub build: u32,
}

impl TextHeader {
    /// Header the editor writes for a fresh file
    pub fn standard(file_type: FileType) -> Self {
        Self {
            format_name: FORMAT_NAME.to_string(),
            file_type,
            version: BINARY_VERSION as u32,
            build: BUILD_VERSION,
        }
    }

    /// Parse the text before the NUL terminator
    pub fn parse(text: &str) -> Result<Self> {
        let mut format_name = None;
        let mut file_type = None;
        let mut version = 0;
        let mut build = 0;

        for line in text.split("\r\n").map(str::trim).filter(|l| !l.is_empty()) {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            match key {
                "Version" if format_name.is_none() => format_name = Some(value.to_string()),
                "Version" => version = value.trim().parse().unwrap_or_default(),
                "Type" => file_type = Some(value.to_string()),
                "Info" => {
                    build = value
                        .trim()
                        .strip_prefix("BUILD")
                        .and_then(|b| b.trim().parse().ok())
                        .unwrap_or_default()
                }
                _ => tracing::debug!("Ignoring header line {:?}", line),
            }
        }

        let file_type = match file_type.as_deref() {
            Some("Patch") => FileType::Patch,
            Some("Performance") => FileType::Performance,
            other => return Err(G2Error::UnknownFileType(other.unwrap_or_default().to_string())),
        };
        Ok(Self {
            format_name: format_name.unwrap_or_default(),
            file_type,
            version,
            build,
        })
    }

    /// Header text including the NUL terminator
    pub fn render(&self) -> String {
        format!(
            "Version={}\r\nType={}\r\nVersion={}\r\nInfo=BUILD {}\r\n\0",
            self.format_name, self.file_type, self.version, self.build
        )
    }
}
