use fxhash::FxHashSet;

use crate::{GateId, Network};

/// Depth-first evaluation of a network, following the wires backwards from a gate
///
/// Each gate is evaluated at most once per traversal, after the gates driving it.
/// A gate reached again through a wiring cycle keeps its stored value, so values on a cycle
/// may lag one evaluation pass behind a fixed point.
pub struct RecursiveSimulator<'a> {
    net: &'a mut Network,
    visited: FxHashSet<GateId>,
    stack: Vec<(GateId, bool)>,
}

impl<'a> RecursiveSimulator<'a> {
    /// Create a simulator with an empty visited set
    pub fn new(net: &'a mut Network) -> RecursiveSimulator<'a> {
        RecursiveSimulator {
            net,
            visited: FxHashSet::default(),
            stack: Vec::new(),
        }
    }

    /// Forget visited gates, to start a new traversal
    pub fn reset(&mut self) {
        self.visited.clear();
        self.stack.clear();
    }

    /// Evaluate a gate and everything that drives it; return its value
    ///
    /// Gates already visited since the last reset are not evaluated again.
    pub fn run(&mut self, root: GateId) -> bool {
        self.stack.push((root, false));
        while let Some((id, expanded)) = self.stack.pop() {
            if expanded {
                self.evaluate(id);
                continue;
            }
            if !self.net.contains(id) || !self.visited.insert(id) {
                continue;
            }
            self.stack.push((id, true));
            let g = self.net.gate(id);
            for s in g.inputs().iter().rev().flatten() {
                self.stack.push((*s, false));
            }
        }
        self.net.value(root).unwrap_or(false)
    }

    /// Evaluate a single gate from the current values of its operands
    fn evaluate(&mut self, id: GateId) -> bool {
        let operands: Vec<bool> = self
            .net
            .gate(id)
            .inputs()
            .iter()
            .map(|s| s.and_then(|g| self.net.value(g)).unwrap_or(false))
            .collect();
        self.net.gate_mut(id).evaluate(&operands)
    }
}
