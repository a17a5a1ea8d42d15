//! Netlist built from point-to-point cables
//!
//! Cables on disk connect two ports each. A net is the set of ports that end
//! up carrying the same signal: at most one driving output plus every input
//! reachable through cables, including inputs tied directly to other inputs.

use hashbrown::HashMap;

use crate::error::{G2Error, Result};
use crate::model::PortRef;

/// One signal net
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Net {
    pub output: Option<PortRef>,
    pub inputs: Vec<PortRef>,
}

impl Net {
    pub fn contains(&self, port: &PortRef) -> bool {
        self.output.as_ref() == Some(port) || self.inputs.contains(port)
    }

    /// Every port on the net, output first
    pub fn ports(&self) -> impl Iterator<Item = &PortRef> {
        self.output.iter().chain(self.inputs.iter())
    }
}

/// Nets of one area plus a port -> net lookup
#[derive(Debug, Clone, Default)]
pub struct NetList {
    nets: Vec<Net>,
    owner: HashMap<PortRef, usize>,
}

impl NetList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    /// Net a port belongs to
    pub fn net_of(&self, port: &PortRef) -> Option<&Net> {
        self.owner.get(port).map(|&i| &self.nets[i])
    }

    /// Record a cable from `source` to `dest`.
    ///
    /// Every net already holding `source` (as output or input) or `dest`
    /// collapses into one net together with both ports. An output source
    /// drives the net; an input source is tied in as one more input. Fails
    /// without modifying the netlist when the result would have two outputs.
    ///
    /// Returns the index of the net the connection ended up in.
    pub fn add_connection(&mut self, source: PortRef, dest: PortRef) -> Result<usize> {
        let mut matched: Vec<usize> = [self.owner.get(&source), self.owner.get(&dest)]
            .into_iter()
            .flatten()
            .copied()
            .collect();
        matched.sort_unstable();
        matched.dedup();

        let mut output = if source.is_output() { Some(source) } else { None };
        for &i in &matched {
            if let Some(existing) = self.nets[i].output {
                match output {
                    Some(new) if new != existing => {
                        return Err(G2Error::MultipleOutputs { existing, new });
                    }
                    _ => output = Some(existing),
                }
            }
        }

        let Some((&target, rest)) = matched.split_first() else {
            let mut net = Net {
                output,
                inputs: vec![dest],
            };
            if !source.is_output() && source != dest {
                net.inputs.push(source);
            }
            let index = self.nets.len();
            for port in net.ports() {
                self.owner.insert(*port, index);
            }
            self.nets.push(net);
            return Ok(index);
        };

        // fold the other nets into the lowest-numbered one
        for &i in rest.iter().rev() {
            let absorbed = self.nets.remove(i);
            for port in absorbed.inputs {
                if !self.nets[target].inputs.contains(&port) {
                    self.nets[target].inputs.push(port);
                }
            }
        }

        let net = &mut self.nets[target];
        net.output = output;
        if !net.inputs.contains(&dest) {
            net.inputs.push(dest);
        }
        if !source.is_output() && !net.inputs.contains(&source) {
            net.inputs.push(source);
        }

        if rest.is_empty() {
            self.owner.insert(source, target);
            self.owner.insert(dest, target);
        } else {
            self.reindex();
        }
        Ok(target)
    }

    /// Drop all nets
    pub fn clear(&mut self) {
        self.nets.clear();
        self.owner.clear();
    }

    fn reindex(&mut self) {
        self.owner.clear();
        for (i, net) in self.nets.iter().enumerate() {
            for port in net.ports() {
                self.owner.insert(*port, i);
            }
        }
    }
}
