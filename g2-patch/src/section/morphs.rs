//! MorphParameters (0x65)
//!
//! ```text
//! nvariations:8 nmorphs:4 reserved:10 reserved:10
//! per variation: variation:4 zeros:56 nmaps:8
//!   per map: area:2 module:8 param:7 morph:4 range:8 (signed)
//!   reserved:4, omitted after the last variation
//! ```
//!
//! Morph numbers are 1-8 on the wire and 0-7 in [`MorphMap`].

use std::io::SeekFrom;

use crate::bits::BitStream;
use crate::error::{G2Error, Result};
use crate::model::{AreaId, MorphMap, ParamRef, Patch};
use crate::{NMORPHS, NVARIATIONS};

/// Unused bits between the variation number and the map count
const VARIATION_GAP: i64 = 4 + 6 * 8 + 4;

pub(super) fn parse(patch: &mut Patch, bits: &mut BitStream) -> Result<()> {
    let [nvariations, _nmorphs, _, _] = bits.read_fields([8, 4, 10, 10])?;

    for i in 0..nvariations {
        let variation = bits.read_bits(4)? as usize;
        bits.seek_bit(SeekFrom::Current(VARIATION_GAP))?;
        let nmaps = bits.read_bits(8)?;

        for _ in 0..nmaps {
            let [area, module, param, morph] = bits.read_fields([2, 8, 7, 4])?;
            let range = bits.read_signed(8)? as i8;

            let Ok(area) = AreaId::from_bits(area) else {
                tracing::warn!("Morph map with invalid area {}", area);
                continue;
            };
            let target = ParamRef::new(area, module as u8, param as u8);
            if variation >= NVARIATIONS {
                continue;
            }
            if !(1..=NMORPHS as u32).contains(&morph) {
                tracing::warn!("Morph map for {} names morph {}", target, morph);
                continue;
            }
            if patch.param(target).is_none() {
                tracing::warn!("Morph map for missing parameter {}", target);
                continue;
            }
            patch.settings.morph_maps[variation].push(MorphMap {
                param: target,
                morph: morph as u8 - 1,
                range,
            });
        }

        // the trailing reserved nibble only separates variations
        if i + 1 < nvariations {
            bits.read_bits(4)?;
        }
    }
    Ok(())
}

pub(super) fn format(patch: &Patch, bits: &mut BitStream) -> Result<()> {
    bits.write_fields([8, 4, 10, 10], [NVARIATIONS as u32, NMORPHS as u32, 0, 0])?;

    for (variation, maps) in patch.settings.morph_maps.iter().enumerate() {
        bits.write_bits(4, variation as u32)?;
        bits.seek_bit(SeekFrom::Current(VARIATION_GAP))?;
        let count = u8::try_from(maps.len()).map_err(|_| G2Error::FieldOverflow {
            field: "morph map count",
            value: maps.len(),
        })?;
        bits.write_bits(8, count as u32)?;
        for map in maps {
            bits.write_fields(
                [2, 8, 7, 4],
                [
                    map.param.area.bits(),
                    map.param.module as u32,
                    map.param.param as u32,
                    map.morph as u32 + 1,
                ],
            )?;
            bits.write_signed(8, map.range as i32)?;
        }
        bits.write_bits(4, 0)?;
    }

    // drop the reserved nibble after the last variation
    bits.seek_bit(SeekFrom::Current(-4))?;
    Ok(())
}
