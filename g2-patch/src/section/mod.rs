//! Section codec
//!
//! The body of a G2 file is a stream of sections. Each one is framed as a tag
//! byte, a big-endian `u16` payload length and the bit-packed payload:
//!
//! ```text
//! +-----+---------+---------------------+
//! | tag | len u16 | payload (len bytes) |
//! +-----+---------+---------------------+
//! ```
//!
//! Sections that exist once per area carry the area in the first two bits of
//! their payload. A patch record is always written in [`PATCH_SECTIONS`]
//! order; when parsing, any order is accepted and the record ends at the
//! next PatchDescription or at a tag that does not belong to a patch.
//!
//! Submodules:
//! - `description` - PatchDescription and PerformanceDescription
//! - `modules` - ModuleList
//! - `notes` - CurrentNote
//! - `cables` - CableList
//! - `params` - Parameters, for FX/VOICE modules and for SETTINGS
//! - `morphs` - MorphParameters
//! - `assign` - KnobAssignments, CtrlAssignments, GlobalKnobAssignments
//! - `labels` - Labels, for module parameters and for morphs
//! - `names` - ModuleNames and TextPad

mod assign;
mod cables;
mod description;
mod labels;
mod modules;
mod morphs;
mod names;
mod notes;
mod params;

#[cfg(test)]
mod tests;

use std::fmt;

use crate::bits::BitStream;
use crate::catalog::ModuleCatalog;
use crate::error::{G2Error, Result};
use crate::model::{Area, AreaId, Patch, Performance};

/// Section type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SectionTag {
    PerformanceDescription = 0x11,
    PatchDescription = 0x21,
    ModuleList = 0x4a,
    Parameters = 0x4d,
    CableList = 0x52,
    ModuleNames = 0x5a,
    Labels = 0x5b,
    GlobalKnobAssignments = 0x5f,
    CtrlAssignments = 0x60,
    KnobAssignments = 0x62,
    MorphParameters = 0x65,
    CurrentNote = 0x69,
    TextPad = 0x6f,
}

impl SectionTag {
    pub fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0x11 => SectionTag::PerformanceDescription,
            0x21 => SectionTag::PatchDescription,
            0x4a => SectionTag::ModuleList,
            0x4d => SectionTag::Parameters,
            0x52 => SectionTag::CableList,
            0x5a => SectionTag::ModuleNames,
            0x5b => SectionTag::Labels,
            0x5f => SectionTag::GlobalKnobAssignments,
            0x60 => SectionTag::CtrlAssignments,
            0x62 => SectionTag::KnobAssignments,
            0x65 => SectionTag::MorphParameters,
            0x69 => SectionTag::CurrentNote,
            0x6f => SectionTag::TextPad,
            _ => return None,
        })
    }

    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Whether the section may appear inside a patch record
    pub fn in_patch(self) -> bool {
        !matches!(
            self,
            SectionTag::PerformanceDescription | SectionTag::GlobalKnobAssignments
        )
    }
}

impl fmt::Display for SectionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One entry of a patch record: a section type plus the area it covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    PatchDescription,
    ModuleList(AreaId),
    CurrentNote,
    CableList(AreaId),
    Parameters(AreaId),
    MorphParameters,
    KnobAssignments,
    CtrlAssignments,
    Labels(AreaId),
    ModuleNames(AreaId),
    TextPad,
}

/// Sections of a patch record in the order they are written
pub const PATCH_SECTIONS: [Section; 18] = [
    Section::PatchDescription,
    Section::ModuleList(AreaId::Voice),
    Section::ModuleList(AreaId::Fx),
    Section::CurrentNote,
    Section::CableList(AreaId::Voice),
    Section::CableList(AreaId::Fx),
    Section::Parameters(AreaId::Settings),
    Section::Parameters(AreaId::Voice),
    Section::Parameters(AreaId::Fx),
    Section::MorphParameters,
    Section::KnobAssignments,
    Section::CtrlAssignments,
    Section::Labels(AreaId::Settings),
    Section::Labels(AreaId::Voice),
    Section::Labels(AreaId::Fx),
    Section::ModuleNames(AreaId::Voice),
    Section::ModuleNames(AreaId::Fx),
    Section::TextPad,
];

impl Section {
    pub fn tag(self) -> SectionTag {
        match self {
            Section::PatchDescription => SectionTag::PatchDescription,
            Section::ModuleList(_) => SectionTag::ModuleList,
            Section::CurrentNote => SectionTag::CurrentNote,
            Section::CableList(_) => SectionTag::CableList,
            Section::Parameters(_) => SectionTag::Parameters,
            Section::MorphParameters => SectionTag::MorphParameters,
            Section::KnobAssignments => SectionTag::KnobAssignments,
            Section::CtrlAssignments => SectionTag::CtrlAssignments,
            Section::Labels(_) => SectionTag::Labels,
            Section::ModuleNames(_) => SectionTag::ModuleNames,
            Section::TextPad => SectionTag::TextPad,
        }
    }
}

// =============================================================================
// Framing
// =============================================================================

/// Size of the tag + length header
pub const SECTION_HEADER_LEN: usize = 3;

/// Split the next section off `data`: (tag byte, payload, rest)
pub fn split_section(data: &[u8]) -> Result<(u8, &[u8], &[u8])> {
    let [tag, hi, lo, body @ ..] = data else {
        return Err(G2Error::Truncated("section header"));
    };
    let len = u16::from_be_bytes([*hi, *lo]) as usize;
    if body.len() < len {
        return Err(G2Error::Truncated("section payload"));
    }
    let (payload, rest) = body.split_at(len);
    Ok((*tag, payload, rest))
}

/// Append a framed section to `out`
pub fn write_section(out: &mut Vec<u8>, tag: SectionTag, payload: &[u8]) -> Result<()> {
    let len = u16::try_from(payload.len()).map_err(|_| G2Error::SectionTooLarge {
        tag,
        len: payload.len(),
    })?;
    out.reserve(SECTION_HEADER_LEN + payload.len());
    out.push(tag.tag());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(payload);
    Ok(())
}

// =============================================================================
// Per-section dispatch
// =============================================================================

/// Decode one patch section into `patch`
pub fn parse_patch_section(
    tag: SectionTag,
    payload: &[u8],
    patch: &mut Patch,
    catalog: &ModuleCatalog,
) -> Result<()> {
    tracing::debug!(section = %tag, len = payload.len(), "parsing section");
    let mut bits = BitStream::from_bytes(payload);
    let result = match tag {
        SectionTag::PatchDescription => description::parse_patch(&mut patch.description, &mut bits),
        SectionTag::ModuleList => modules::parse(patch, &mut bits, catalog),
        SectionTag::CurrentNote => notes::parse(patch, &mut bits),
        SectionTag::CableList => cables::parse(patch, &mut bits),
        SectionTag::Parameters => params::parse(patch, &mut bits),
        SectionTag::MorphParameters => morphs::parse(patch, &mut bits),
        SectionTag::KnobAssignments => assign::parse_knobs(patch, &mut bits),
        SectionTag::CtrlAssignments => assign::parse_ctrls(patch, &mut bits),
        SectionTag::Labels => labels::parse(patch, &mut bits),
        SectionTag::ModuleNames => names::parse_module_names(patch, &mut bits),
        SectionTag::TextPad => {
            names::parse_text_pad(patch, payload);
            Ok(())
        }
        SectionTag::PerformanceDescription | SectionTag::GlobalKnobAssignments => {
            Err(G2Error::UnexpectedSection {
                expected: SectionTag::PatchDescription,
                found: tag.tag(),
            })
        }
    };
    result.map_err(|e| e.in_section(tag))
}

/// Encode one patch section
pub fn format_patch_section(section: Section, patch: &Patch) -> Result<Vec<u8>> {
    let mut bits = BitStream::new();
    let result = match section {
        Section::PatchDescription => description::format_patch(&patch.description, &mut bits),
        Section::ModuleList(area) => modules::format(patch, area, &mut bits),
        Section::CurrentNote => notes::format(patch, &mut bits),
        Section::CableList(area) => cables::format(patch, area, &mut bits),
        Section::Parameters(area) => params::format(patch, area, &mut bits),
        Section::MorphParameters => morphs::format(patch, &mut bits),
        Section::KnobAssignments => assign::format_knobs(patch, &mut bits),
        Section::CtrlAssignments => assign::format_ctrls(patch, &mut bits),
        Section::Labels(area) => labels::format(patch, area, &mut bits),
        Section::ModuleNames(area) => names::format_module_names(patch, area, &mut bits),
        Section::TextPad => names::format_text_pad(patch, &mut bits),
    };
    result.map_err(|e| e.in_section(section.tag()))?;
    let payload = bits.into_bytes();
    tracing::debug!(section = %section.tag(), len = payload.len(), "formatted section");
    Ok(payload)
}

// =============================================================================
// Records
// =============================================================================

/// Parse one patch record from the front of `data`, returning the bytes that
/// follow it
pub fn parse_patch<'a>(
    data: &'a [u8],
    patch: &mut Patch,
    catalog: &ModuleCatalog,
) -> Result<&'a [u8]> {
    let (tag, payload, mut rest) = split_section(data)?;
    if tag != SectionTag::PatchDescription.tag() {
        return Err(G2Error::UnexpectedSection {
            expected: SectionTag::PatchDescription,
            found: tag,
        });
    }
    parse_patch_section(SectionTag::PatchDescription, payload, patch, catalog)?;

    while let Some(&next) = rest.first() {
        let tag = match SectionTag::from_tag(next) {
            // the next patch of a performance
            Some(SectionTag::PatchDescription) => break,
            Some(tag) if tag.in_patch() => tag,
            Some(_) => break,
            None => {
                tracing::warn!("Unknown section tag 0x{:02x}, stopping patch record", next);
                break;
            }
        };
        let (_, payload, after) = split_section(rest).map_err(|e| e.in_section(tag))?;
        parse_patch_section(tag, payload, patch, catalog)?;
        rest = after;
    }
    Ok(rest)
}

/// Append a full patch record to `out`
pub fn format_patch(out: &mut Vec<u8>, patch: &Patch) -> Result<()> {
    for section in PATCH_SECTIONS {
        let payload = format_patch_section(section, patch)?;
        write_section(out, section.tag(), &payload)?;
    }
    Ok(())
}

/// Parse the PerformanceDescription section at the front of `data`
pub fn parse_performance_head<'a>(data: &'a [u8], perf: &mut Performance) -> Result<&'a [u8]> {
    let tag = SectionTag::PerformanceDescription;
    let (found, payload, rest) = split_section(data)?;
    if found != tag.tag() {
        return Err(G2Error::UnexpectedSection {
            expected: tag,
            found,
        });
    }
    tracing::debug!(section = %tag, len = payload.len(), "parsing section");
    let mut bits = BitStream::from_bytes(payload);
    description::parse_performance(perf, &mut bits).map_err(|e| e.in_section(tag))?;
    Ok(rest)
}

/// Parse the GlobalKnobAssignments section at the front of `data`
pub fn parse_performance_tail<'a>(data: &'a [u8], perf: &mut Performance) -> Result<&'a [u8]> {
    let tag = SectionTag::GlobalKnobAssignments;
    let (found, payload, rest) = split_section(data)?;
    if found != tag.tag() {
        return Err(G2Error::UnexpectedSection {
            expected: tag,
            found,
        });
    }
    tracing::debug!(section = %tag, len = payload.len(), "parsing section");
    let mut bits = BitStream::from_bytes(payload);
    assign::parse_global_knobs(perf, &mut bits).map_err(|e| e.in_section(tag))?;
    Ok(rest)
}

/// Append the PerformanceDescription section
pub fn format_performance_head(out: &mut Vec<u8>, perf: &Performance) -> Result<()> {
    let tag = SectionTag::PerformanceDescription;
    let mut bits = BitStream::new();
    description::format_performance(perf, &mut bits).map_err(|e| e.in_section(tag))?;
    write_section(out, tag, &bits.into_bytes())
}

/// Append the GlobalKnobAssignments section
pub fn format_performance_tail(out: &mut Vec<u8>, perf: &Performance) -> Result<()> {
    let tag = SectionTag::GlobalKnobAssignments;
    let mut bits = BitStream::new();
    assign::format_global_knobs(perf, &mut bits).map_err(|e| e.in_section(tag))?;
    write_section(out, tag, &bits.into_bytes())
}

/// Read the 2-bit area field of an FX/VOICE-only section
fn read_module_area(bits: &mut BitStream) -> Result<AreaId> {
    match AreaId::from_bits(bits.read_bits(2)?)? {
        AreaId::Settings => Err(G2Error::InvalidArea(AreaId::Settings.bits())),
        area => Ok(area),
    }
}

/// Reject SETTINGS for sections that only exist per module area
fn module_area(patch: &Patch, area: AreaId) -> Result<&Area> {
    patch.area(area).ok_or(G2Error::InvalidArea(area.bits()))
}
