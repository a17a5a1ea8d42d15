//! ModuleList (0x4a)
//!
//! ```text
//! area:2 count:8
//! per module: type:8 index:8 horiz:7 vert:7 color:8 uprate:1 leds:1
//!             reserved:6 nmodes:4 mode:6 * nmodes
//! ```

use crate::bits::BitStream;
use crate::catalog::ModuleCatalog;
use crate::error::{G2Error, Result};
use crate::model::{AreaId, Module, Patch};

use super::{module_area, read_module_area};

const MODULE_FIELDS: [u32; 7] = [8, 7, 7, 8, 1, 1, 6];

pub(super) fn parse(patch: &mut Patch, bits: &mut BitStream, catalog: &ModuleCatalog) -> Result<()> {
    let area_id = read_module_area(bits)?;
    let count = bits.read_bits(8)?;
    let area = patch
        .area_mut(area_id)
        .ok_or(G2Error::InvalidArea(area_id.bits()))?;

    for _ in 0..count {
        let type_id = bits.read_bits(8)? as u8;
        let module_type = catalog.require(type_id)?;
        // leds and reserved are regenerated as zero
        let [index, horiz, vert, color, uprate, _leds, _reserved] = bits.read_fields(MODULE_FIELDS)?;
        let nmodes = bits.read_bits(4)? as usize;

        let mut module = Module::new(module_type, index as u8);
        module.horiz = horiz as u8;
        module.vert = vert as u8;
        module.color = color as u8;
        module.uprate = uprate != 0;

        let stored = (0..nmodes)
            .map(|_| bits.read_bits(6).map(|m| m as u8))
            .collect::<Result<Vec<_>>>()?;
        // older files store fewer modes than the type declares; the rest
        // keep the type defaults set by Module::new
        if stored.len() < module.modes.len() {
            module.modes[..stored.len()].copy_from_slice(&stored);
        } else {
            module.modes = stored;
        }

        area.push_module(module);
    }
    Ok(())
}

pub(super) fn format(patch: &Patch, area_id: AreaId, bits: &mut BitStream) -> Result<()> {
    let area = module_area(patch, area_id)?;
    bits.write_bits(2, area_id.bits())?;
    bits.write_bits(8, area.modules().len() as u32)?;

    for module in area.modules() {
        bits.write_bits(8, module.type_id() as u32)?;
        bits.write_fields(
            MODULE_FIELDS,
            [
                module.index() as u32,
                module.horiz as u32,
                module.vert as u32,
                module.color as u32,
                module.uprate as u32,
                0,
                0,
            ],
        )?;
        bits.write_bits(4, module.modes.len() as u32)?;
        for &mode in &module.modes {
            bits.write_bits(6, mode as u32)?;
        }
    }
    Ok(())
}
