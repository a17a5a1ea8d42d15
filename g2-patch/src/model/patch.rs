//! Patch: two areas, settings, notes and controller assignments

use crate::error::{G2Error, Result};
use crate::model::{Area, AreaId, MorphMap, ParamRef, Parameter, Settings};
use crate::{NKNOBS, NMORPHMAPS, NMORPHS, NVARIATIONS};

/// Fields of the PatchDescription section
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchDescription {
    pub reserved: u8,
    pub voices: u8,
    /// Editor height of the VOICE area (14-bit)
    pub height: u16,
    pub unk2: u8,
    pub red: bool,
    pub blue: bool,
    pub yellow: bool,
    pub orange: bool,
    pub green: bool,
    pub purple: bool,
    pub white: bool,
    /// 0 = poly, 1 = mono, 2 = legato
    pub monopoly: u8,
    /// Active variation
    pub variation: u8,
    pub category: u8,
}

/// A recorded note: pitch plus attack/release velocities (7-bit each)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Note {
    pub note: u8,
    pub attack: u8,
    pub release: u8,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            note: 64,
            attack: 0,
            release: 0,
        }
    }
}

/// A panel knob bound to a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Knob {
    pub param: ParamRef,
    /// 2-bit LED flag
    pub is_led: u8,
    /// Performance slot the parameter lives in; always 0 inside a patch
    pub slot: u8,
}

/// A MIDI continuous controller bound to a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl {
    pub midi_cc: u8,
    pub param: ParamRef,
}

/// One complete patch
#[derive(Debug, Clone)]
pub struct Patch {
    pub description: PatchDescription,
    pub fx: Area,
    pub voice: Area,
    pub settings: Settings,
    /// Last played note; only written when `notes` is non-empty, otherwise
    /// the CurrentNote section is written as 64/0/0
    pub last_note: Note,
    /// Recently played notes, at most 32 on disk
    pub notes: Vec<Note>,
    /// Knob slots; `None` marks an unassigned knob
    pub knobs: Vec<Option<Knob>>,
    pub ctrls: Vec<Ctrl>,
    pub text_pad: String,
}

impl Default for Patch {
    fn default() -> Self {
        Self {
            description: PatchDescription::default(),
            fx: Area::new(AreaId::Fx),
            voice: Area::new(AreaId::Voice),
            settings: Settings::new(),
            last_note: Note::default(),
            notes: Vec::new(),
            knobs: vec![None; NKNOBS],
            ctrls: Vec::new(),
            text_pad: String::new(),
        }
    }
}

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    /// FX or VOICE area; SETTINGS has no modules
    pub fn area(&self, id: AreaId) -> Option<&Area> {
        match id {
            AreaId::Fx => Some(&self.fx),
            AreaId::Voice => Some(&self.voice),
            AreaId::Settings => None,
        }
    }

    pub fn area_mut(&mut self, id: AreaId) -> Option<&mut Area> {
        match id {
            AreaId::Fx => Some(&mut self.fx),
            AreaId::Voice => Some(&mut self.voice),
            AreaId::Settings => None,
        }
    }

    /// Resolve a parameter reference in any area
    pub fn param(&self, at: ParamRef) -> Option<&Parameter> {
        match self.area(at.area) {
            Some(area) => area.find_module(at.module)?.params.get(at.param as usize),
            None => self.settings.param(at.module, at.param),
        }
    }

    pub fn param_mut(&mut self, at: ParamRef) -> Option<&mut Parameter> {
        if at.area == AreaId::Settings {
            return self.settings.param_mut(at.module, at.param);
        }
        self.area_mut(at.area)?
            .find_module_mut(at.module)?
            .params
            .get_mut(at.param as usize)
    }

    /// The knob bound to `param`, with its slot number
    pub fn knob_for(&self, param: ParamRef) -> Option<(usize, &Knob)> {
        self.knobs
            .iter()
            .enumerate()
            .find_map(|(i, k)| k.as_ref().filter(|k| k.param == param).map(|k| (i, k)))
    }

    pub fn ctrl_for(&self, param: ParamRef) -> Option<&Ctrl> {
        self.ctrls.iter().find(|c| c.param == param)
    }

    fn require_param(&self, param: ParamRef) -> Result<()> {
        self.param(param)
            .map(|_| ())
            .ok_or(G2Error::UnknownParam(param))
    }

    /// Bind knob slot `knob` to an existing parameter
    pub fn assign_knob(&mut self, knob: usize, param: ParamRef, is_led: u8) -> Result<()> {
        self.require_param(param)?;
        let slot = self.knobs.get_mut(knob).ok_or(G2Error::InvalidKnob(knob))?;
        *slot = Some(Knob {
            param,
            is_led,
            slot: 0,
        });
        Ok(())
    }

    /// Bind a MIDI CC to an existing parameter, replacing an earlier binding
    /// of the same controller
    pub fn assign_ctrl(&mut self, midi_cc: u8, param: ParamRef) -> Result<()> {
        self.require_param(param)?;
        self.ctrls.retain(|c| c.midi_cc != midi_cc);
        self.ctrls.push(Ctrl { midi_cc, param });
        Ok(())
    }

    /// Attach a morph map to one variation
    pub fn add_morph_map(&mut self, variation: usize, map: MorphMap) -> Result<()> {
        if variation >= NVARIATIONS {
            return Err(G2Error::InvalidVariation(variation));
        }
        if map.morph as usize >= NMORPHS {
            return Err(G2Error::InvalidMorph(map.morph));
        }
        self.require_param(map.param)?;
        let maps = &mut self.settings.morph_maps[variation];
        if maps.len() >= NMORPHMAPS {
            return Err(G2Error::MorphMapsFull(variation));
        }
        maps.push(map);
        Ok(())
    }
}
