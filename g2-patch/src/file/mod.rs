//! `.pch2` / `.prf2` file container
//!
//! ```text
//! text header, NUL terminated
//! binary version (u8, 23)
//! binary revision (u8, 0 = patch, 1 = performance)
//! sections
//! checksum (u16 BE) over everything from the binary version on
//! ```
//!
//! A patch file holds one patch record. A performance file holds the
//! PerformanceDescription section, four patch records and the
//! GlobalKnobAssignments section.

mod header;


pub use header::{FORMAT_NAME, FileType, TextHeader};

use std::path::Path;

use crate::bits::{decode_latin1, encode_latin1};
use crate::catalog::ModuleCatalog;
use crate::checksum::checksum;
use crate::error::{G2Error, Result};
use crate::model::{Patch, Performance};
use crate::section;
use crate::BINARY_VERSION;

/// Decoded file contents
#[derive(Debug, Clone)]
pub enum G2Document {
    Patch(Patch),
    Performance(Box<Performance>),
}

/// Stored and recomputed checksum of a parsed file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumStatus {
    pub stored: u16,
    pub computed: u16,
}

impl ChecksumStatus {
    pub fn is_valid(&self) -> bool {
        self.stored == self.computed
    }
}

/// A G2 patch or performance file
#[derive(Debug, Clone)]
pub struct G2File {
    pub header: TextHeader,
    pub binary_version: u8,
    pub binary_revision: u8,
    pub document: G2Document,
    checksum: Option<ChecksumStatus>,
}

impl G2File {
    /// Empty patch with the standard header
    pub fn new_patch() -> Self {
        Self::with_document(FileType::Patch, G2Document::Patch(Patch::new()))
    }

    /// Empty performance with the standard header
    pub fn new_performance() -> Self {
        Self::with_document(
            FileType::Performance,
            G2Document::Performance(Box::default()),
        )
    }

    fn with_document(file_type: FileType, document: G2Document) -> Self {
        Self {
            header: TextHeader::standard(file_type),
            binary_version: BINARY_VERSION,
            binary_revision: file_type.revision(),
            document,
            checksum: None,
        }
    }

    pub fn file_type(&self) -> FileType {
        match self.document {
            G2Document::Patch(_) => FileType::Patch,
            G2Document::Performance(_) => FileType::Performance,
        }
    }

    pub fn patch(&self) -> Option<&Patch> {
        match &self.document {
            G2Document::Patch(patch) => Some(patch),
            G2Document::Performance(_) => None,
        }
    }

    pub fn patch_mut(&mut self) -> Option<&mut Patch> {
        match &mut self.document {
            G2Document::Patch(patch) => Some(patch),
            G2Document::Performance(_) => None,
        }
    }

    pub fn performance(&self) -> Option<&Performance> {
        match &self.document {
            G2Document::Performance(perf) => Some(&**perf),
            G2Document::Patch(_) => None,
        }
    }

    pub fn performance_mut(&mut self) -> Option<&mut Performance> {
        match &mut self.document {
            G2Document::Performance(perf) => Some(&mut **perf),
            G2Document::Patch(_) => None,
        }
    }

    /// Checksums seen when the file was parsed; `None` for files built in code
    pub fn checksum_status(&self) -> Option<ChecksumStatus> {
        self.checksum
    }

    /// Parse a complete file image.
    ///
    /// A checksum mismatch or an unexpected binary version is logged and
    /// parsing continues. Structural problems are returned as errors.
    pub fn parse(data: &[u8], catalog: &ModuleCatalog) -> Result<Self> {
        // the terminator must show up well within twice the standard header
        let limit = 2 * TextHeader::standard(FileType::Performance).render().len();
        let nul = data
            .iter()
            .take(limit)
            .position(|&b| b == 0)
            .ok_or(G2Error::MissingNulTerminator)?;
        let header = TextHeader::parse(&decode_latin1(&data[..nul]))?;

        let body = &data[nul + 1..];
        if body.len() < 4 {
            return Err(G2Error::Truncated("binary header"));
        }
        let (signed, trailer) = body.split_at(body.len() - 2);
        let binary_version = signed[0];
        let binary_revision = signed[1];
        if binary_version != BINARY_VERSION {
            tracing::warn!(
                "Binary version {} (version {} supported), file may fail to load",
                binary_version,
                BINARY_VERSION
            );
        }

        let status = ChecksumStatus {
            stored: u16::from_be_bytes([trailer[0], trailer[1]]),
            computed: checksum(signed),
        };
        if !status.is_valid() {
            tracing::warn!(
                "Bad checksum 0x{:04x}, computed 0x{:04x}",
                status.stored,
                status.computed
            );
        }

        let sections = &signed[2..];
        let (document, rest) = match header.file_type {
            FileType::Patch => {
                let mut patch = Patch::new();
                let rest = section::parse_patch(sections, &mut patch, catalog)?;
                (G2Document::Patch(patch), rest)
            }
            FileType::Performance => {
                let mut perf = Box::<Performance>::default();
                let mut rest = section::parse_performance_head(sections, &mut perf)?;
                for slot in &mut perf.slots {
                    rest = section::parse_patch(rest, &mut slot.patch, catalog)?;
                }
                let rest = section::parse_performance_tail(rest, &mut perf)?;
                (G2Document::Performance(perf), rest)
            }
        };
        if !rest.is_empty() {
            tracing::warn!("{} unparsed bytes before the checksum", rest.len());
        }

        Ok(Self {
            header,
            binary_version,
            binary_revision,
            document,
            checksum: Some(status),
        })
    }

    /// Encode the complete file image
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut header = self.header.clone();
        header.file_type = self.file_type();
        let text = header.render();

        let mut signed = vec![self.binary_version, self.binary_revision];
        match &self.document {
            G2Document::Patch(patch) => section::format_patch(&mut signed, patch)?,
            G2Document::Performance(perf) => {
                section::format_performance_head(&mut signed, perf)?;
                for slot in &perf.slots {
                    section::format_patch(&mut signed, &slot.patch)?;
                }
                section::format_performance_tail(&mut signed, perf)?;
            }
        }

        let mut out = Vec::with_capacity(text.len() + signed.len() + 2);
        out.extend_from_slice(&encode_latin1(&text));
        out.extend_from_slice(&signed);
        out.extend_from_slice(&checksum(&signed).to_be_bytes());
        Ok(out)
    }

    /// Read and parse a file from disk
    pub fn read(path: impl AsRef<Path>, catalog: &ModuleCatalog) -> Result<Self> {
        let path = path.as_ref();
        std::fs::read(path)
            .map_err(G2Error::from)
            .and_then(|data| Self::parse(&data, catalog))
            .map_err(|e| e.in_file(path))
    }

    /// Encode and write the file to disk
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_bytes()
            .and_then(|data| std::fs::write(path, data).map_err(G2Error::from))
            .map_err(|e| e.in_file(path))
    }
}
