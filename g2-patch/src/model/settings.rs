//! Patch-wide settings: morph controllers and the named setting groups
//!
//! On the wire the SETTINGS area looks like a set of pseudo-modules. Module 1
//! holds the 8 morph dials (parameters 0-7) and their modes (8-15); modules
//! 2-7 are the setting groups below, each with a handful of parameters.

use crate::model::{AreaId, ParamRef, Parameter};
use crate::{NMORPHS, NVARIATIONS};

/// Pseudo-module index of the morph block
pub const MORPH_MODULE: u8 = 1;

/// Pseudo-module index of the first settings group
pub const FIRST_GROUP_MODULE: u8 = 2;

/// Panel names shown for the morphs of a fresh patch
pub const DEFAULT_MORPH_LABELS: [&str; NMORPHS] = [
    "Wheel", "Vel", "Keyb", "Aft.Tch", "Sust.Pd", "Ctrl.Pd", "P.Stick", "G.Wh 2",
];

/// Typed handle for the global patch settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsParam {
    PatchVolume,
    ActiveMuted,
    Glide,
    GlideTime,
    Bend,
    Semitones,
    Vibrato,
    Cents,
    Rate,
    Arpeggiator,
    ArpTime,
    ArpType,
    Octaves,
    OctaveShift,
    Sustain,
}

impl SettingsParam {
    /// Every setting in wire order
    pub const ALL: [SettingsParam; 15] = [
        SettingsParam::PatchVolume,
        SettingsParam::ActiveMuted,
        SettingsParam::Glide,
        SettingsParam::GlideTime,
        SettingsParam::Bend,
        SettingsParam::Semitones,
        SettingsParam::Vibrato,
        SettingsParam::Cents,
        SettingsParam::Rate,
        SettingsParam::Arpeggiator,
        SettingsParam::ArpTime,
        SettingsParam::ArpType,
        SettingsParam::Octaves,
        SettingsParam::OctaveShift,
        SettingsParam::Sustain,
    ];

    /// Number of parameters in each group, groups numbered from module 2
    pub const GROUP_SIZES: [u8; 6] = [2, 2, 2, 3, 4, 2];

    const LOCATIONS: [(u8, u8); 15] = [
        (2, 0),
        (2, 1),
        (3, 0),
        (3, 1),
        (4, 0),
        (4, 1),
        (5, 0),
        (5, 1),
        (5, 2),
        (6, 0),
        (6, 1),
        (6, 2),
        (6, 3),
        (7, 0),
        (7, 1),
    ];

    /// (pseudo-module, parameter) this setting lives at
    pub fn location(self) -> (u8, u8) {
        Self::LOCATIONS[self as usize]
    }

    pub fn from_location(module: u8, param: u8) -> Option<Self> {
        Self::LOCATIONS
            .iter()
            .position(|&loc| loc == (module, param))
            .map(|i| Self::ALL[i])
    }

    /// Settings of one group, in wire order
    pub fn group(module: u8) -> impl Iterator<Item = SettingsParam> {
        Self::ALL.into_iter().filter(move |p| p.location().0 == module)
    }

    pub fn param_ref(self) -> ParamRef {
        let (module, param) = self.location();
        ParamRef::new(AreaId::Settings, module, param)
    }

    pub fn name(self) -> &'static str {
        match self {
            SettingsParam::PatchVolume => "patchvol",
            SettingsParam::ActiveMuted => "activemuted",
            SettingsParam::Glide => "glide",
            SettingsParam::GlideTime => "glidetime",
            SettingsParam::Bend => "bend",
            SettingsParam::Semitones => "semi",
            SettingsParam::Vibrato => "vibrato",
            SettingsParam::Cents => "cents",
            SettingsParam::Rate => "rate",
            SettingsParam::Arpeggiator => "arpeggiator",
            SettingsParam::ArpTime => "arptime",
            SettingsParam::ArpType => "arptype",
            SettingsParam::Octaves => "octaves",
            SettingsParam::OctaveShift => "octaveshift",
            SettingsParam::Sustain => "sustain",
        }
    }
}

/// Assignment of a morph to one parameter in one variation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MorphMap {
    pub param: ParamRef,
    /// Morph index, 0-7
    pub morph: u8,
    /// Signed depth
    pub range: i8,
}

/// One of the 8 morph controllers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Morph {
    index: u8,
    pub dial: Parameter,
    pub mode: Parameter,
    /// Panel label, at most 7 characters on disk
    pub label: String,
}

impl Morph {
    /// Morph `index` (0-7) with its default label
    pub(crate) fn new(index: u8) -> Self {
        Self {
            index,
            dial: Parameter::new(index, 0),
            mode: Parameter::new(index + NMORPHS as u8, 1),
            label: DEFAULT_MORPH_LABELS
                .get(index as usize)
                .copied()
                .unwrap_or_default()
                .to_string(),
        }
    }

    /// Position among the 8 morphs, 0-7
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn dial_ref(&self) -> ParamRef {
        ParamRef::new(AreaId::Settings, MORPH_MODULE, self.dial.index)
    }

    pub fn mode_ref(&self) -> ParamRef {
        ParamRef::new(AreaId::Settings, MORPH_MODULE, self.mode.index)
    }
}

/// The SETTINGS area of a patch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub morphs: [Morph; NMORPHS],
    params: [Parameter; 15],
    /// Morph maps of each variation, in stream order
    pub morph_maps: [Vec<MorphMap>; NVARIATIONS],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            morphs: std::array::from_fn(|i| Morph::new(i as u8)),
            params: std::array::from_fn(|i| {
                let (_, param) = SettingsParam::ALL[i].location();
                Parameter::new(param, 0)
            }),
            morph_maps: Default::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, which: SettingsParam) -> &Parameter {
        &self.params[which as usize]
    }

    pub fn get_mut(&mut self, which: SettingsParam) -> &mut Parameter {
        &mut self.params[which as usize]
    }

    /// Resolve a wire (module, param) pair. Module indices below 2 address
    /// the morph block: parameters 0-7 are dials, 8-15 are modes.
    pub fn param(&self, module: u8, param: u8) -> Option<&Parameter> {
        if module < FIRST_GROUP_MODULE {
            let morph = self.morphs.get((param & 7) as usize)?;
            return match param {
                0..8 => Some(&morph.dial),
                8..16 => Some(&morph.mode),
                _ => None,
            };
        }
        SettingsParam::from_location(module, param).map(|p| self.get(p))
    }

    pub fn param_mut(&mut self, module: u8, param: u8) -> Option<&mut Parameter> {
        if module < FIRST_GROUP_MODULE {
            let morph = self.morphs.get_mut((param & 7) as usize)?;
            return match param {
                0..8 => Some(&mut morph.dial),
                8..16 => Some(&mut morph.mode),
                _ => None,
            };
        }
        SettingsParam::from_location(module, param).map(|p| self.get_mut(p))
    }

    /// Morph maps that target `param`, with the variation they belong to
    pub fn morph_maps_for(&self, param: ParamRef) -> impl Iterator<Item = (usize, &MorphMap)> {
        self.morph_maps
            .iter()
            .enumerate()
            .flat_map(|(variation, maps)| maps.iter().map(move |m| (variation, m)))
            .filter(move |(_, m)| m.param == param)
    }

    /// Morph maps of one morph in one variation
    pub fn maps_of_morph(&self, morph: u8, variation: usize) -> impl Iterator<Item = &MorphMap> {
        self.morph_maps
            .get(variation)
            .into_iter()
            .flatten()
            .filter(move |m| m.morph == morph)
    }
}
