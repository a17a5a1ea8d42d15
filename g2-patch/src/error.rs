//! Error types for G2 file parsing and writing

use std::io;
use std::path::PathBuf;

use crate::model::{ParamRef, PortRef};
use crate::section::SectionTag;

/// Convenience alias used throughout the crate
pub type Result<T, E = G2Error> = std::result::Result<T, E>;

/// Errors that abort parsing or formatting of a G2 file.
///
/// Content problems that the format tolerates (bad checksum, dangling cable
/// endpoints, unknown module indices in parameter tables, ...) are not
/// represented here. They are logged with `tracing::warn!` and skipped.
#[derive(Debug, thiserror::Error)]
pub enum G2Error {
    /// A bit read ran past the end of the buffer
    #[error("read of {needed} bits at bit {position} exceeds buffer ({available} bits left)")]
    OutOfRange {
        position: usize,
        needed: u32,
        available: usize,
    },

    /// Bit widths are limited to 0-32
    #[error("invalid bit width {0} (must be 0-32)")]
    InvalidBitWidth(u32),

    /// Seek target lies before the start of the stream
    #[error("seek to negative bit position {0}")]
    InvalidSeek(i64),

    /// The textual header has no NUL terminator
    #[error("invalid G2 file: text header is missing its NUL terminator")]
    MissingNulTerminator,

    /// The text header names a type other than Patch or Performance
    #[error("unknown G2 file type {0:?}")]
    UnknownFileType(String),

    /// The file ends before a complete header, section or checksum
    #[error("truncated file: {0}")]
    Truncated(&'static str),

    /// A record did not start with the section it must start with
    #[error("expected {expected} section, found tag 0x{found:02x}")]
    UnexpectedSection { expected: SectionTag, found: u8 },

    /// A 2-bit area field held a value that is not valid here
    #[error("invalid area code {0}")]
    InvalidArea(u32),

    /// Module type ID not present in the module catalog
    #[error("unknown module type id {0}")]
    UnknownModuleType(u8),

    /// A net would end up driven by two different outputs
    #[error("two outputs connected to one net: {existing} and {new}")]
    MultipleOutputs { existing: PortRef, new: PortRef },

    /// A cable built in code does not address real ports
    #[error("invalid cable {source_port} -> {dest}: {reason}")]
    InvalidCable {
        source_port: PortRef,
        dest: PortRef,
        reason: &'static str,
    },

    /// A parameter reference that resolves to nothing in this patch
    #[error("no parameter at {0}")]
    UnknownParam(ParamRef),

    /// Knob slot outside 0-119
    #[error("knob {0} out of range")]
    InvalidKnob(usize),

    /// Variation outside 0-8
    #[error("variation {0} out of range")]
    InvalidVariation(usize),

    /// Morph outside 0-7
    #[error("morph {0} out of range")]
    InvalidMorph(u8),

    /// All 255 module indices of an area are in use
    #[error("no free module index left in area")]
    AreaFull,

    /// A variation already holds the most morph maps the editor allows
    #[error("variation {0} already has {max} morph maps", max = crate::NMORPHMAPS)]
    MorphMapsFull(usize),

    /// A count or length does not fit its wire field
    #[error("{field} of {value} does not fit its field")]
    FieldOverflow { field: &'static str, value: usize },

    /// Formatted section does not fit its 16-bit length field
    #[error("section {tag} payload of {len} bytes exceeds 65535")]
    SectionTooLarge { tag: SectionTag, len: usize },

    /// Error raised while parsing or formatting a specific section
    #[error("section {tag}: {source}")]
    Section {
        tag: SectionTag,
        #[source]
        source: Box<G2Error>,
    },

    /// Error raised while reading or writing a specific file
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<G2Error>,
    },

    /// Module catalog could not be deserialized
    #[error("invalid module catalog: {0}")]
    Catalog(#[from] toml::de::Error),

    /// IO error while reading or writing
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl G2Error {
    /// Attach the section that was being processed
    pub(crate) fn in_section(self, tag: SectionTag) -> Self {
        match self {
            // keep the innermost section
            err @ G2Error::Section { .. } => err,
            err => G2Error::Section {
                tag,
                source: Box::new(err),
            },
        }
    }

    /// Attach the file that was being processed
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        G2Error::File {
            path: path.into(),
            source: Box::new(self),
        }
    }

    /// True for errors that mean the input is not a valid file of this format
    pub fn is_structural(&self) -> bool {
        match self {
            G2Error::Section { source, .. } | G2Error::File { source, .. } => {
                source.is_structural()
            }
            G2Error::Io(_) | G2Error::Catalog(_) => false,
            _ => true,
        }
    }
}
