//! Parameters and parameter references

use std::fmt;

use crate::NVARIATIONS;
use crate::model::AreaId;

/// A module parameter with one value per variation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub index: u8,
    /// Values for variations 0-8 (7-bit, 0-127)
    pub variations: [u8; NVARIATIONS],
    /// Per-variation display labels. `Some(vec![])` is a label entry with no
    /// text; `None` means the parameter has no label entry at all.
    pub labels: Option<Vec<String>>,
}

impl Parameter {
    pub fn new(index: u8, default: u8) -> Self {
        Self {
            index,
            variations: [default; NVARIATIONS],
            labels: None,
        }
    }

    /// Value in one variation
    pub fn get(&self, variation: usize) -> Option<u8> {
        self.variations.get(variation).copied()
    }

    /// Set the value of every variation
    pub fn set_all(&mut self, value: u8) {
        self.variations = [value; NVARIATIONS];
    }
}

/// Location of a parameter as stored on the wire: area, module index and
/// parameter index. For the SETTINGS area the module index selects the
/// morph block (1) or a settings group (2-7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamRef {
    pub area: AreaId,
    pub module: u8,
    pub param: u8,
}

impl ParamRef {
    pub const fn new(area: AreaId, module: u8, param: u8) -> Self {
        Self {
            area,
            module,
            param,
        }
    }
}

impl fmt::Display for ParamRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}.{}", self.area, self.module, self.param)
    }
}
