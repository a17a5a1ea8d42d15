//! Module ports and port references

use std::fmt;

use crate::catalog::SignalRate;

/// Which side of a module a port sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    /// Wire encoding of a cable source: 1 = output, 0 = input
    pub fn bit(self) -> u32 {
        match self {
            PortDirection::Input => 0,
            PortDirection::Output => 1,
        }
    }

    pub fn from_bit(bit: u32) -> Self {
        if bit != 0 {
            PortDirection::Output
        } else {
            PortDirection::Input
        }
    }
}

/// Address of a port within one area: module index, side and port index.
///
/// Cables, nets and lookups all refer to ports by value; the ports themselves
/// are owned by their modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PortRef {
    pub module: u8,
    pub direction: PortDirection,
    pub index: u8,
}

impl PortRef {
    pub const fn new(module: u8, direction: PortDirection, index: u8) -> Self {
        Self {
            module,
            direction,
            index,
        }
    }

    pub const fn input(module: u8, index: u8) -> Self {
        Self::new(module, PortDirection::Input, index)
    }

    pub const fn output(module: u8, index: u8) -> Self {
        Self::new(module, PortDirection::Output, index)
    }

    pub fn is_output(&self) -> bool {
        self.direction == PortDirection::Output
    }
}

impl fmt::Display for PortRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.direction {
            PortDirection::Input => "input",
            PortDirection::Output => "output",
        };
        write!(f, "module {} {} {}", self.module, side, self.index)
    }
}

/// A connector on a module
#[derive(Debug, Clone)]
pub struct Port {
    direction: PortDirection,
    index: u8,
    rate: SignalRate,
    cables: Vec<usize>,
}

impl Port {
    pub(crate) fn new(direction: PortDirection, index: u8, rate: SignalRate) -> Self {
        Self {
            direction,
            index,
            rate,
            cables: Vec::new(),
        }
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn rate(&self) -> SignalRate {
        self.rate
    }

    /// Indices into the owning area's cable list
    pub fn cables(&self) -> &[usize] {
        &self.cables
    }

    pub fn is_connected(&self) -> bool {
        !self.cables.is_empty()
    }

    pub(crate) fn attach(&mut self, cable: usize) {
        self.cables.push(cable);
    }
}
