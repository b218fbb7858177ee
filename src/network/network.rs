use core::fmt;

use fxhash::FxHashMap;
use log::{debug, trace};

use crate::network::gates::{Gate, GateKind};
use crate::network::handle::{GateId, WireId};
use crate::network::wire::Wire;
use crate::sim;

/// Result of an undo step
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Undone {
    /// The most recent wire was removed
    Wire(WireId),
    /// There was no wire left, and the most recent gate was removed
    Gate(GateId),
}

/// Representation of an interactive logic network, with gates connected by wires
///
/// Gates are stored in an arena and referenced by stable identifiers, so that wiring cycles are allowed.
/// Creation order of gates and wires is kept: it defines the truth table columns and the undo order.
/// Every mutation re-evaluates the whole network.
#[derive(Debug, Clone, Default)]
pub struct Network {
    gates: FxHashMap<GateId, Gate>,
    order: Vec<GateId>,
    wires: Vec<Wire>,
    nb_input_labels: usize,
    nb_output_labels: usize,
    next_gate: u32,
    next_wire: u32,
}

impl Network {
    /// Create a new network
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the number of gates
    pub fn nb_gates(&self) -> usize {
        self.order.len()
    }

    /// Return the number of wires
    pub fn nb_wires(&self) -> usize {
        self.wires.len()
    }

    /// Return whether the network has no gate
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns whether the gate exists in the network
    pub fn contains(&self, id: GateId) -> bool {
        self.gates.contains_key(&id)
    }

    /// Get a gate; panics if it doesn't exist
    pub fn gate(&self, id: GateId) -> &Gate {
        &self.gates[&id]
    }

    /// Get a gate if it exists
    pub fn get_gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.get(&id)
    }

    /// Identifiers of all gates, in creation order
    pub fn gate_ids(&self) -> &[GateId] {
        &self.order
    }

    /// All gates, in creation order
    pub fn gates(&self) -> impl Iterator<Item = (GateId, &Gate)> + '_ {
        self.order.iter().map(|id| (*id, &self.gates[id]))
    }

    /// All wires, in creation order
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Get a wire if it exists
    pub fn wire(&self, id: WireId) -> Option<&Wire> {
        self.wires.iter().find(|w| w.id() == id)
    }

    /// Primary inputs, in creation order
    pub fn inputs(&self) -> Vec<GateId> {
        self.of_kind(GateKind::Input)
    }

    /// Primary outputs, in creation order
    pub fn outputs(&self) -> Vec<GateId> {
        self.of_kind(GateKind::Output)
    }

    /// Gates of a given kind, in creation order
    pub fn of_kind(&self, kind: GateKind) -> Vec<GateId> {
        self.gates()
            .filter(|(_, g)| g.kind() == kind)
            .map(|(id, _)| id)
            .collect()
    }

    /// Current output value of a gate
    pub fn value(&self, id: GateId) -> Option<bool> {
        self.gates.get(&id).map(|g| g.value())
    }

    /// Value carried by a wire, which is the output value of its source
    pub fn wire_value(&self, id: WireId) -> Option<bool> {
        self.wire(id).and_then(|w| self.value(w.source()))
    }

    /// Add a new gate; inputs and outputs get a fresh numbered label
    pub fn add_gate(&mut self, kind: GateKind) -> GateId {
        let label = match kind {
            GateKind::Input => {
                self.nb_input_labels += 1;
                format!("{}{}", kind.name(), self.nb_input_labels)
            }
            GateKind::Output => {
                self.nb_output_labels += 1;
                format!("{}{}", kind.name(), self.nb_output_labels)
            }
            _ => kind.name().to_string(),
        };
        let id = GateId::from_raw(self.next_gate);
        self.next_gate += 1;
        debug!("Adding gate {id} ({label})");
        self.gates.insert(id, Gate::new(kind, label));
        self.order.push(id);
        self.evaluate_all();
        id
    }

    /// Connect the output of a gate to the first free input slot of another
    ///
    /// Returns None without modifying the network if the gates are the same, if one of them
    /// doesn't exist, or if the destination has no free slot.
    pub fn connect(&mut self, source: GateId, destination: GateId) -> Option<WireId> {
        if source == destination {
            debug!("Rejecting connection of {source} to itself");
            return None;
        }
        if !self.contains(source) || !self.contains(destination) {
            debug!("Rejecting connection {source} -> {destination}: unknown gate");
            return None;
        }
        let Some(slot) = self.gate(destination).first_free_slot() else {
            debug!("Rejecting connection {source} -> {destination}: no free slot");
            return None;
        };
        let id = WireId::from_raw(self.next_wire);
        self.next_wire += 1;
        debug!("Connecting {source} -> {destination}[{slot}] as {id}");
        self.gate_mut(destination).set_input(slot, Some(source));
        self.wires.push(Wire::new(id, source, destination, slot));
        self.evaluate_all();
        Some(id)
    }

    /// Remove a wire, freeing the destination slot
    pub fn disconnect(&mut self, id: WireId) -> bool {
        let Some(pos) = self.wires.iter().position(|w| w.id() == id) else {
            return false;
        };
        let w = self.wires.remove(pos);
        debug!("Removing wire {w}");
        self.free_slot(&w);
        self.evaluate_all();
        true
    }

    /// Remove a gate and all wires connected to it
    pub fn delete_gate(&mut self, id: GateId) -> bool {
        if !self.contains(id) {
            return false;
        }
        let (removed, kept): (Vec<Wire>, Vec<Wire>) =
            self.wires.drain(..).partition(|w| w.touches(id));
        self.wires = kept;
        for w in &removed {
            if w.destination() != id {
                self.free_slot(w);
            }
        }
        debug!("Removing gate {id} and {} wires", removed.len());
        self.gates.remove(&id);
        self.order.retain(|g| *g != id);
        self.evaluate_all();
        true
    }

    /// Undo the last action: remove the most recent wire, or the most recent gate if there is no wire
    pub fn undo(&mut self) -> Option<Undone> {
        if let Some(w) = self.wires.last() {
            let id = w.id();
            self.disconnect(id);
            Some(Undone::Wire(id))
        } else if let Some(g) = self.order.last() {
            let id = *g;
            self.delete_gate(id);
            Some(Undone::Gate(id))
        } else {
            None
        }
    }

    /// Remove all gates and wires, and restart input and output numbering
    pub fn clear(&mut self) {
        debug!("Clearing network with {} gates", self.nb_gates());
        self.gates.clear();
        self.order.clear();
        self.wires.clear();
        self.nb_input_labels = 0;
        self.nb_output_labels = 0;
    }

    /// Flip the value of an input and re-evaluate the network
    ///
    /// Returns false without any change if the gate is not an input.
    pub fn toggle(&mut self, id: GateId) -> bool {
        let Some(g) = self.gates.get_mut(&id).filter(|g| g.kind().is_input()) else {
            return false;
        };
        g.value = !g.value;
        debug!("Toggling {id} to {}", g.value as u8);
        self.evaluate_all();
        true
    }

    /// Set the value of an input, without re-evaluating the network
    pub fn set_input(&mut self, id: GateId, value: bool) -> bool {
        match self.gates.get_mut(&id) {
            Some(g) if g.kind().is_input() => {
                g.value = value;
                true
            }
            _ => false,
        }
    }

    /// Evaluate all gates, in creation order, each with a fresh traversal
    pub fn evaluate_all(&mut self) {
        trace!("Evaluating {} gates", self.nb_gates());
        sim::evaluate_all(self);
    }

    pub(crate) fn gate_mut(&mut self, id: GateId) -> &mut Gate {
        self.gates
            .get_mut(&id)
            .unwrap_or_else(|| panic!("Gate {id} is not in the network"))
    }

    /// Reset the destination slot of a removed wire
    fn free_slot(&mut self, w: &Wire) {
        if let Some(g) = self.gates.get_mut(&w.destination()) {
            if g.input(w.slot()) == Some(w.source()) {
                g.set_input(w.slot(), None);
            }
        }
    }

    /// Check consistency of the datastructure
    pub fn check(&self) {
        assert_eq!(self.order.len(), self.gates.len());
        for id in &self.order {
            assert!(self.contains(*id), "Missing gate {id}");
        }
        for w in &self.wires {
            assert!(self.contains(w.source()), "Invalid source in {w}");
            assert!(self.contains(w.destination()), "Invalid destination in {w}");
            assert_eq!(
                self.gate(w.destination()).input(w.slot()),
                Some(w.source()),
                "Slot not filled by {w}"
            );
        }
        for (id, g) in self.gates() {
            assert_eq!(g.arity(), g.kind().arity());
            for (slot, s) in g.inputs().iter().enumerate() {
                if s.is_some() {
                    let nb = self
                        .wires
                        .iter()
                        .filter(|w| w.destination() == id && w.slot() == slot)
                        .count();
                    assert_eq!(nb, 1, "Slot {slot} of {id} must have exactly one wire");
                }
            }
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Network with {} gates, {} wires:",
            self.nb_gates(),
            self.nb_wires()
        )?;
        for (id, g) in self.gates() {
            writeln!(f, "\t{id}: {g}")?;
        }
        for w in &self.wires {
            writeln!(f, "\t{w}")?;
        }
        Ok(())
    }
}
