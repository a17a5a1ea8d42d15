//! G2-Patch: Nord Modular G2 patch and performance file codec
//!
//! This crate reads and writes the `.pch2` (patch) and `.prf2`
//! (performance) files produced by the Clavia Nord Modular G2 editor, and
//! exposes their content as an owned in-memory graph of modules, cables,
//! parameters and controller bindings.
//!
//! # Key Features
//!
//! - **Bit exact**: a parsed file writes back to the same bytes, apart from
//!   reserved fields the editor always sets to zero
//! - **Catalog driven**: module port/parameter layouts come from a
//!   [`ModuleCatalog`] that can be loaded from TOML
//! - **Netlist tracking**: cable edits keep an output-to-inputs net view of
//!   each area consistent
//! - **Lenient where the editor is**: bad checksums and dangling bindings
//!   are logged through `tracing` instead of failing the load
//!
//! # File Format Overview
//!
//! A file starts with a NUL-terminated text header, followed by a binary
//! version byte, a revision byte, a run of tagged sections and a CRC-16
//! checksum. Section payloads are MSB-first bit streams; see [`section`]
//! for the list of tags.
//!
//! # Usage
//!
//! ```ignore
//! use g2_patch::{G2File, ModuleCatalog};
//!
//! let catalog = ModuleCatalog::load("modules.toml").unwrap();
//! let file = G2File::read("bass.pch2", &catalog).unwrap();
//!
//! let patch = file.patch().unwrap();
//! for module in patch.voice.modules() {
//!     println!("{} {}", module.index(), module.name);
//! }
//!
//! file.write("bass-copy.pch2").unwrap();
//! ```

mod bits;
mod catalog;
mod checksum;
mod error;
mod file;
pub mod model;
pub mod section;

pub use bits::BitStream;
pub use catalog::{ModuleCatalog, ModuleType, PortType, SignalRate, ValueType};
pub use checksum::{checksum, checksum_update};
pub use error::{G2Error, Result};
pub use file::{ChecksumStatus, FORMAT_NAME, FileType, G2Document, G2File, TextHeader};
pub use model::{
    Area, AreaId, Cable, Module, Net, NetList, ParamRef, Parameter, Patch, Performance, PortRef,
};
pub use section::SectionTag;

// =============================================================================
// Constants
// =============================================================================

/// Binary format version written after the text header
pub const BINARY_VERSION: u8 = 23;

/// Editor build number written in the text header
pub const BUILD_VERSION: u32 = 266;

/// Variations per parameter (8 user variations plus the init variation)
pub const NVARIATIONS: usize = 9;

/// Morph groups per patch
pub const NMORPHS: usize = 8;

/// Morph maps the editor allows per variation
pub const NMORPHMAPS: usize = 25;

/// Entries in a knob assignment table
pub const NKNOBS: usize = 120;

/// SeqNote, the one module type with edit modes in the Labels section
pub const SEQ_NOTE_TYPE_ID: u8 = 121;
