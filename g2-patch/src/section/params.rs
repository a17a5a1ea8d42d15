//! Parameters (0x4d)
//!
//! FX/VOICE layout:
//!
//! ```text
//! area:2 nmodules:8 nvariations:8
//! per module: index:8 nparams:7
//!   per variation: variation:8 value:7 * nparams
//! ```
//!
//! SETTINGS layout: a header `area:2 nsections:8 nvariations:8 section:8
//! nentries:7`, the morph block (per variation: variation:8, 8 dials and 8
//! modes of 7 bits), then one group per settings module `section:8
//! nentries:7` with the same per-variation value rows.

use crate::bits::BitStream;
use crate::error::Result;
use crate::model::{AreaId, FIRST_GROUP_MODULE, MORPH_MODULE, Patch, Settings, SettingsParam};
use crate::{NMORPHS, NVARIATIONS};

/// Morph block plus one section per settings group
const SETTINGS_SECTIONS: u32 = 1 + SettingsParam::GROUP_SIZES.len() as u32;

/// 8 dials and 8 modes per variation
const MORPH_ENTRIES: u32 = 2 * NMORPHS as u32;

pub(super) fn parse(patch: &mut Patch, bits: &mut BitStream) -> Result<()> {
    match AreaId::from_bits(bits.read_bits(2)?)? {
        AreaId::Settings => parse_settings(&mut patch.settings, bits),
        area => parse_area(patch, area, bits),
    }
}

pub(super) fn format(patch: &Patch, area: AreaId, bits: &mut BitStream) -> Result<()> {
    match area {
        AreaId::Settings => format_settings(&patch.settings, bits),
        area => format_area(patch, area, bits),
    }
}

fn parse_settings(settings: &mut Settings, bits: &mut BitStream) -> Result<()> {
    let [nsections, nvariations, _section, _nentries] = bits.read_fields([8, 8, 8, 7])?;

    for _ in 0..nvariations {
        let variation = bits.read_bits(8)? as usize;
        for morph in 0..NMORPHS {
            let dial = bits.read_bits(7)? as u8;
            if variation < NVARIATIONS {
                settings.morphs[morph].dial.variations[variation] = dial;
            }
        }
        for morph in 0..NMORPHS {
            let mode = bits.read_bits(7)? as u8;
            if variation < NVARIATIONS {
                settings.morphs[morph].mode.variations[variation] = mode;
            }
        }
    }

    for _ in 1..nsections {
        let [section, nentries] = bits.read_fields([8, 7])?;
        for _ in 0..nvariations {
            let variation = bits.read_bits(8)? as usize;
            for entry in 0..nentries {
                let value = bits.read_bits(7)? as u8;
                if variation >= NVARIATIONS {
                    continue;
                }
                match SettingsParam::from_location(section as u8, entry as u8) {
                    Some(p) => settings.get_mut(p).variations[variation] = value,
                    None if variation == 0 => {
                        tracing::warn!("Ignoring unknown setting {}.{}", section, entry)
                    }
                    None => {}
                }
            }
        }
    }
    Ok(())
}

fn format_settings(settings: &Settings, bits: &mut BitStream) -> Result<()> {
    bits.write_fields(
        [2, 8, 8, 8, 7],
        [
            AreaId::Settings.bits(),
            SETTINGS_SECTIONS,
            NVARIATIONS as u32,
            MORPH_MODULE as u32,
            MORPH_ENTRIES,
        ],
    )?;

    for variation in 0..NVARIATIONS {
        bits.write_bits(8, variation as u32)?;
        for morph in &settings.morphs {
            bits.write_bits(7, morph.dial.variations[variation] as u32)?;
        }
        for morph in &settings.morphs {
            bits.write_bits(7, morph.mode.variations[variation] as u32)?;
        }
    }

    for (i, &size) in SettingsParam::GROUP_SIZES.iter().enumerate() {
        let module = FIRST_GROUP_MODULE + i as u8;
        bits.write_fields([8, 7], [module as u32, size as u32])?;
        for variation in 0..NVARIATIONS {
            bits.write_bits(8, variation as u32)?;
            for p in SettingsParam::group(module) {
                bits.write_bits(7, settings.get(p).variations[variation] as u32)?;
            }
        }
    }
    Ok(())
}

fn parse_area(patch: &mut Patch, area_id: AreaId, bits: &mut BitStream) -> Result<()> {
    let [nmodules, nvariations] = bits.read_fields([8, 8])?;
    let Some(area) = patch.area_mut(area_id) else {
        return Ok(());
    };

    for _ in 0..nmodules {
        let [index, nparams] = bits.read_fields([8, 7])?;
        let mut module = area.find_module_mut(index as u8);
        if module.is_none() {
            tracing::warn!(area = %area_id, "Parameters for missing module {}", index);
        }

        for _ in 0..nvariations {
            let variation = bits.read_bits(8)? as usize;
            for param in 0..nparams as usize {
                let value = bits.read_bits(7)? as u8;
                if variation >= NVARIATIONS {
                    continue;
                }
                if let Some(p) = module.as_deref_mut().and_then(|m| m.params.get_mut(param)) {
                    p.variations[variation] = value;
                }
            }
        }
    }
    Ok(())
}

fn format_area(patch: &Patch, area_id: AreaId, bits: &mut BitStream) -> Result<()> {
    let mut modules: Vec<_> = patch
        .area(area_id)
        .map(|a| a.modules().iter().filter(|m| !m.params.is_empty()).collect())
        .unwrap_or_default();
    modules.sort_by_key(|m| m.index());

    bits.write_fields([2, 8], [area_id.bits(), modules.len() as u32])?;
    if modules.is_empty() {
        return bits.write_bits(8, 0);
    }

    bits.write_bits(8, NVARIATIONS as u32)?;
    for module in modules {
        bits.write_fields([8, 7], [module.index() as u32, module.params.len() as u32])?;
        for variation in 0..NVARIATIONS {
            bits.write_bits(8, variation as u32)?;
            for param in &module.params {
                bits.write_bits(7, param.variations[variation] as u32)?;
            }
        }
    }
    Ok(())
}
