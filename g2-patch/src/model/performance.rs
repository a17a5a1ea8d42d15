//! Performance: four patch slots plus global knobs

use crate::NKNOBS;
use crate::error::{G2Error, Result};
use crate::model::{Knob, ParamRef, Parameter, Patch};

/// Number of patch slots in a performance
pub const NSLOTS: usize = 4;

/// Performance-wide fields of the PerformanceDescription section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceDescription {
    pub unk1: u8,
    pub unk2: u8,
    /// Slot with editor focus (2-bit)
    pub focus: u8,
    pub unk3: u8,
    pub range_select: u8,
    pub bpm: u8,
    pub split: u8,
    pub clock: u8,
    pub unk4: u8,
    pub unk5: u8,
}

/// Per-slot routing fields, one byte each on disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotDescription {
    pub active: u8,
    pub keyboard: u8,
    pub hold: u8,
    pub bank: u8,
    pub patch: u8,
    pub key_low: u8,
    pub key_high: u8,
    pub unk3: u8,
    pub unk4: u8,
    pub unk5: u8,
}

#[derive(Debug, Clone, Default)]
pub struct Slot {
    /// Patch name, at most 16 bytes on disk
    pub name: String,
    pub description: SlotDescription,
    pub patch: Patch,
}

#[derive(Debug, Clone)]
pub struct Performance {
    pub description: PerformanceDescription,
    pub slots: [Slot; NSLOTS],
    /// Knobs that may address a parameter in any slot
    pub global_knobs: Vec<Option<Knob>>,
}

impl Default for Performance {
    fn default() -> Self {
        Self {
            description: PerformanceDescription::default(),
            slots: Default::default(),
            global_knobs: vec![None; NKNOBS],
        }
    }
}

impl Performance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a parameter inside one slot's patch
    pub fn param(&self, slot: u8, at: ParamRef) -> Option<&Parameter> {
        self.slots.get(slot as usize)?.patch.param(at)
    }

    /// Bind global knob `knob` to a parameter of slot `slot`
    pub fn assign_global_knob(&mut self, knob: usize, slot: u8, param: ParamRef, is_led: u8) -> Result<()> {
        self.param(slot, param).ok_or(G2Error::UnknownParam(param))?;
        let entry = self.global_knobs.get_mut(knob).ok_or(G2Error::InvalidKnob(knob))?;
        *entry = Some(Knob {
            param,
            is_led,
            slot,
        });
        Ok(())
    }

    /// The global knob bound to `param` of `slot`
    pub fn global_knob_for(&self, slot: u8, param: ParamRef) -> Option<(usize, &Knob)> {
        self.global_knobs.iter().enumerate().find_map(|(i, k)| {
            k.as_ref()
                .filter(|k| k.slot == slot && k.param == param)
                .map(|k| (i, k))
        })
    }
}
