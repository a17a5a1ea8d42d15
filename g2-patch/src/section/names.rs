//! ModuleNames (0x5a) and TextPad (0x6f)

use crate::bits::{BitStream, decode_latin1, encode_latin1};
use crate::error::Result;
use crate::model::{AreaId, Patch};

use super::{module_area, read_module_area};

const NAME_LEN: usize = 16;

pub(super) fn parse_module_names(patch: &mut Patch, bits: &mut BitStream) -> Result<()> {
    let area_id = read_module_area(bits)?;
    let [_area_copy, count] = bits.read_fields([6, 8])?;
    let Some(area) = patch.area_mut(area_id) else {
        return Ok(());
    };

    for _ in 0..count {
        let index = bits.read_bits(8)? as u8;
        let name = bits.read_string(NAME_LEN)?;
        match area.find_module_mut(index) {
            Some(module) => module.name = name,
            None => tracing::warn!(area = %area_id, "Name {:?} for missing module {}", name, index),
        }
    }
    Ok(())
}

pub(super) fn format_module_names(patch: &Patch, area_id: AreaId, bits: &mut BitStream) -> Result<()> {
    let area = module_area(patch, area_id)?;
    bits.write_fields(
        [2, 6, 8],
        [area_id.bits(), area_id.bits(), area.modules().len() as u32],
    )?;
    for module in area.modules() {
        bits.write_bits(8, module.index() as u32)?;
        bits.write_string(&module.name, NAME_LEN)?;
    }
    Ok(())
}

pub(super) fn parse_text_pad(patch: &mut Patch, payload: &[u8]) {
    patch.text_pad = decode_latin1(payload);
}

pub(super) fn format_text_pad(patch: &Patch, bits: &mut BitStream) -> Result<()> {
    bits.write_bytes(&encode_latin1(&patch.text_pad))
}
