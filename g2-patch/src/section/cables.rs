//! CableList (0x52)
//!
//! ```text
//! area:2 reserved:6 count:16
//! per cable: color:3 src_module:8 src_port:6 direction:1 dst_module:8 dst_port:6
//! ```
//!
//! `direction` is 1 when the source is an output and 0 when two inputs are
//! tied together. Cables that do not address real ports are dropped with a
//! warning; a net that ends up with two outputs aborts the parse.

use crate::bits::BitStream;
use crate::error::{G2Error, Result};
use crate::model::{AreaId, Cable, Patch, PortDirection, PortRef};

use super::{module_area, read_module_area};

const CABLE_FIELDS: [u32; 6] = [3, 8, 6, 1, 8, 6];

pub(super) fn parse(patch: &mut Patch, bits: &mut BitStream) -> Result<()> {
    let area_id = read_module_area(bits)?;
    let [_reserved, count] = bits.read_fields([6, 16])?;
    let area = patch
        .area_mut(area_id)
        .ok_or(G2Error::InvalidArea(area_id.bits()))?;

    for i in 0..count {
        let [color, src_module, src_port, direction, dst_module, dst_port] =
            bits.read_fields(CABLE_FIELDS)?;
        let source = PortRef::new(
            src_module as u8,
            PortDirection::from_bit(direction),
            src_port as u8,
        );
        let dest = PortRef::input(dst_module as u8, dst_port as u8);

        if let Err(fault) = area.check_cable(source, dest) {
            tracing::warn!(
                area = %area_id,
                "Invalid cable {}: {} -> {}: {}",
                i,
                source,
                dest,
                fault.reason()
            );
            continue;
        }
        area.push_cable(Cable {
            color: color as u8,
            source,
            dest,
        })?;
    }
    Ok(())
}

pub(super) fn format(patch: &Patch, area_id: AreaId, bits: &mut BitStream) -> Result<()> {
    let area = module_area(patch, area_id)?;
    bits.write_fields([2, 6, 16], [area_id.bits(), 0, area.cables().len() as u32])?;
    for cable in area.cables() {
        bits.write_fields(
            CABLE_FIELDS,
            [
                cable.color as u32,
                cable.source.module as u32,
                cable.source.index as u32,
                cable.source.direction.bit(),
                cable.dest.module as u32,
                cable.dest.index as u32,
            ],
        )?;
    }
    Ok(())
}
