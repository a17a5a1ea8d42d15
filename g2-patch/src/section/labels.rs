//! Labels (0x5b)
//!
//! SETTINGS holds the morph labels: `area:2`, the bytes `01 01 50`, then per
//! morph the bytes `01 01 (8 + morph)` and a 7-byte padded label.
//!
//! FX/VOICE hold per-module records: `area:2 nmodules:8`, then per module
//! `index:8 len:8` followed by `len` bytes of entries `01 plen param` with
//! `(plen - 1) / 7` padded labels each. SeqNote modules store raw edit-mode
//! bytes instead of entries.

use crate::bits::{BitStream, encode_latin1};
use crate::error::{G2Error, Result};
use crate::model::{AreaId, Module, Patch, Settings};
use crate::{NMORPHS, SEQ_NOTE_TYPE_ID};

const LABEL_LEN: usize = 7;

/// Header of the morph label block: one entry of 10 bytes per morph
const MORPH_BLOCK_HEADER: [u8; 3] = [1, 1, (NMORPHS * (3 + LABEL_LEN)) as u8];

pub(super) fn parse(patch: &mut Patch, bits: &mut BitStream) -> Result<()> {
    match AreaId::from_bits(bits.read_bits(2)?)? {
        AreaId::Settings => parse_morph_labels(&mut patch.settings, bits),
        area => parse_area(patch, area, bits),
    }
}

pub(super) fn format(patch: &Patch, area: AreaId, bits: &mut BitStream) -> Result<()> {
    match area {
        AreaId::Settings => format_morph_labels(&patch.settings, bits),
        area => format_area(patch, area, bits),
    }
}

fn parse_morph_labels(settings: &mut Settings, bits: &mut BitStream) -> Result<()> {
    bits.read_bytes(MORPH_BLOCK_HEADER.len())?;
    for morph in &mut settings.morphs {
        bits.read_bytes(3)?;
        morph.label = bits.read_padded_string(LABEL_LEN)?;
    }
    Ok(())
}

fn format_morph_labels(settings: &Settings, bits: &mut BitStream) -> Result<()> {
    bits.write_bits(2, AreaId::Settings.bits())?;
    bits.write_bytes(&MORPH_BLOCK_HEADER)?;
    for (i, morph) in settings.morphs.iter().enumerate() {
        bits.write_bytes(&[1, 1, (NMORPHS + i) as u8])?;
        bits.write_padded_string(&morph.label, LABEL_LEN)?;
    }
    Ok(())
}

fn parse_area(patch: &mut Patch, area_id: AreaId, bits: &mut BitStream) -> Result<()> {
    let nmodules = bits.read_bits(8)?;
    let Some(area) = patch.area_mut(area_id) else {
        return Ok(());
    };

    for _ in 0..nmodules {
        let [index, len] = bits.read_fields([8, 8])?;
        let Some(module) = area.find_module_mut(index as u8) else {
            tracing::warn!(area = %area_id, "Labels for missing module {}", index);
            bits.read_bytes(len as usize)?;
            continue;
        };
        if module.type_id() == SEQ_NOTE_TYPE_ID {
            module.edit_modes = Some(bits.read_bytes(len as usize)?);
        } else {
            parse_module_labels(module, len as usize, bits)?;
        }
    }
    Ok(())
}

fn parse_module_labels(module: &mut Module, len: usize, bits: &mut BitStream) -> Result<()> {
    let mut remaining = len;
    while remaining >= 3 {
        let [_entry, entry_len, param] = bits.read_fields([8, 8, 8])?;
        remaining -= 3;
        // entry_len counts the param byte plus the labels
        let body = (entry_len as usize).saturating_sub(1).min(remaining);
        let count = body / LABEL_LEN;
        let labels = (0..count)
            .map(|_| bits.read_padded_string(LABEL_LEN))
            .collect::<Result<Vec<_>>>()?;
        bits.read_bytes(body - count * LABEL_LEN)?;
        remaining -= body;

        match module.params.get_mut(param as usize) {
            Some(p) => p.labels = Some(labels),
            None => tracing::warn!(
                "Labels for missing parameter {} of module {}",
                param,
                module.index()
            ),
        }
    }
    bits.read_bytes(remaining)?;
    Ok(())
}

/// Entry bytes of one module, or `None` if it carries no labels
fn module_entries(module: &Module) -> Option<Vec<u8>> {
    if let Some(modes) = &module.edit_modes {
        return Some(modes.clone());
    }
    let mut out = Vec::new();
    let mut any = false;
    for (i, param) in module.params.iter().enumerate() {
        let Some(labels) = &param.labels else {
            continue;
        };
        any = true;
        out.extend_from_slice(&[1, (1 + labels.len() * LABEL_LEN) as u8, i as u8]);
        for label in labels {
            let mut bytes = encode_latin1(label);
            bytes.resize(LABEL_LEN, 0);
            out.extend_from_slice(&bytes);
        }
    }
    any.then_some(out)
}

fn format_area(patch: &Patch, area_id: AreaId, bits: &mut BitStream) -> Result<()> {
    let records: Vec<(u8, Vec<u8>)> = patch
        .area(area_id)
        .map(|area| {
            area.modules()
                .iter()
                .filter_map(|m| module_entries(m).map(|e| (m.index(), e)))
                .collect()
        })
        .unwrap_or_default();

    bits.write_fields([2, 8], [area_id.bits(), records.len() as u32])?;
    for (index, entries) in records {
        let len = u8::try_from(entries.len()).map_err(|_| G2Error::FieldOverflow {
            field: "label record length",
            value: entries.len(),
        })?;
        bits.write_fields([8, 8], [index as u32, len as u32])?;
        bits.write_bytes(&entries)?;
    }
    Ok(())
}
