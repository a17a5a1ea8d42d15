//! KnobAssignments (0x62), GlobalKnobAssignments (0x5f), CtrlAssignments (0x60)
//!
//! ```text
//! knobs: count:16, per knob: assigned:1 [area:2 module:8 led:2 param:7 (slot:2)]
//! ctrls: count:7, per ctrl: midicc:7 area:2 module:8 param:7
//! ```
//!
//! The slot field only exists in the global knob table of a performance.
//! Bindings to parameters that do not exist are dropped with a warning.

use crate::bits::BitStream;
use crate::error::{G2Error, Result};
use crate::model::{AreaId, Ctrl, Knob, ParamRef, Patch, Performance};

const KNOB_FIELDS: [u32; 4] = [2, 8, 2, 7];
const CTRL_FIELDS: [u32; 4] = [7, 2, 8, 7];

/// Largest controller table the 7-bit count can describe
const MAX_CTRLS: usize = 127;

fn parse_knob_table(
    bits: &mut BitStream,
    with_slot: bool,
    exists: impl Fn(u8, ParamRef) -> bool,
) -> Result<Vec<Option<Knob>>> {
    let count = bits.read_bits(16)?;
    let mut knobs = Vec::with_capacity(count as usize);
    for i in 0..count {
        if bits.read_bits(1)? == 0 {
            knobs.push(None);
            continue;
        }
        let [area, module, is_led, param] = bits.read_fields(KNOB_FIELDS)?;
        let slot = if with_slot { bits.read_bits(2)? as u8 } else { 0 };

        let knob = AreaId::from_bits(area).ok().map(|area| Knob {
            param: ParamRef::new(area, module as u8, param as u8),
            is_led: is_led as u8,
            slot,
        });
        match knob {
            Some(knob) if exists(slot, knob.param) => knobs.push(Some(knob)),
            _ => {
                tracing::warn!(
                    "Knob {} bound to missing parameter (area {}, module {}, param {}, slot {})",
                    i,
                    area,
                    module,
                    param,
                    slot
                );
                knobs.push(None);
            }
        }
    }
    Ok(knobs)
}

fn format_knob_table(bits: &mut BitStream, knobs: &[Option<Knob>], with_slot: bool) -> Result<()> {
    let count = u16::try_from(knobs.len()).map_err(|_| G2Error::FieldOverflow {
        field: "knob count",
        value: knobs.len(),
    })?;
    bits.write_bits(16, count as u32)?;
    for knob in knobs {
        let Some(knob) = knob else {
            bits.write_bits(1, 0)?;
            continue;
        };
        bits.write_bits(1, 1)?;
        bits.write_fields(
            KNOB_FIELDS,
            [
                knob.param.area.bits(),
                knob.param.module as u32,
                knob.is_led as u32,
                knob.param.param as u32,
            ],
        )?;
        if with_slot {
            bits.write_bits(2, knob.slot as u32)?;
        }
    }
    Ok(())
}

pub(super) fn parse_knobs(patch: &mut Patch, bits: &mut BitStream) -> Result<()> {
    let knobs = parse_knob_table(bits, false, |_, at| patch.param(at).is_some())?;
    patch.knobs = knobs;
    Ok(())
}

pub(super) fn format_knobs(patch: &Patch, bits: &mut BitStream) -> Result<()> {
    format_knob_table(bits, &patch.knobs, false)
}

pub(super) fn parse_global_knobs(perf: &mut Performance, bits: &mut BitStream) -> Result<()> {
    let knobs = parse_knob_table(bits, true, |slot, at| perf.param(slot, at).is_some())?;
    perf.global_knobs = knobs;
    Ok(())
}

pub(super) fn format_global_knobs(perf: &Performance, bits: &mut BitStream) -> Result<()> {
    format_knob_table(bits, &perf.global_knobs, true)
}

pub(super) fn parse_ctrls(patch: &mut Patch, bits: &mut BitStream) -> Result<()> {
    let count = bits.read_bits(7)?;
    let mut ctrls = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let [midi_cc, area, module, param] = bits.read_fields(CTRL_FIELDS)?;
        let target = AreaId::from_bits(area)
            .ok()
            .map(|area| ParamRef::new(area, module as u8, param as u8))
            .filter(|&at| patch.param(at).is_some());
        match target {
            Some(param) => ctrls.push(Ctrl {
                midi_cc: midi_cc as u8,
                param,
            }),
            None => tracing::warn!(
                "MIDI CC {} bound to missing parameter (area {}, module {}, param {})",
                midi_cc,
                area,
                module,
                param
            ),
        }
    }
    patch.ctrls = ctrls;
    Ok(())
}

pub(super) fn format_ctrls(patch: &Patch, bits: &mut BitStream) -> Result<()> {
    if patch.ctrls.len() > MAX_CTRLS {
        return Err(G2Error::FieldOverflow {
            field: "controller count",
            value: patch.ctrls.len(),
        });
    }
    bits.write_bits(7, patch.ctrls.len() as u32)?;
    for ctrl in &patch.ctrls {
        bits.write_fields(
            CTRL_FIELDS,
            [
                ctrl.midi_cc as u32,
                ctrl.param.area.bits(),
                ctrl.param.module as u32,
                ctrl.param.param as u32,
            ],
        )?;
    }
    Ok(())
}
