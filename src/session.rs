//! Command and query interface for a presentation layer
//!
//! A [`Session`] owns a network and keeps its truth table up to date: every command re-evaluates the
//! network and recomputes the table. Invalid requests are never errors; they leave the network
//! unchanged and set an advisory [`Status`].

use std::fmt;

use log::{debug, info};

use crate::network::generators;
use crate::truth_table::{truth_table, TruthTable};
use crate::{GateId, GateKind, Network, Undone, WireId};

/// Advisory message describing the outcome of the last command
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Status {
    /// Nothing happened yet
    Ready,
    /// A gate was added
    Added(GateKind),
    /// A wire was started, and waits for its destination
    PickDestination,
    /// A wire was created
    Connected,
    /// A wire was removed
    Disconnected,
    /// A gate cannot be connected to itself
    SelfConnection,
    /// The destination has no free input slot
    NoFreeSlot,
    /// The gate or wire doesn't exist
    Unknown,
    /// An input was toggled
    Toggled,
    /// Only inputs can be toggled
    NotAnInput,
    /// A gate was deleted
    Deleted,
    /// The last action was undone
    Reverted,
    /// There was nothing to undo
    NothingToUndo,
    /// The network was cleared
    Cleared,
    /// A template was loaded
    Loaded,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Status::*;
        match self {
            Ready => write!(f, "Ready"),
            Added(kind) => write!(f, "Added gate {kind}"),
            PickDestination => write!(f, "Select the destination of the wire"),
            Connected => write!(f, "Wire created"),
            Disconnected => write!(f, "Wire removed"),
            SelfConnection => write!(f, "A gate cannot be connected to itself"),
            NoFreeSlot => write!(f, "No free input on the destination"),
            Unknown => write!(f, "No such gate or wire"),
            Toggled => write!(f, "Input toggled"),
            NotAnInput => write!(f, "Only inputs can be toggled"),
            Deleted => write!(f, "Gate deleted"),
            Reverted => write!(f, "Last action undone"),
            NothingToUndo => write!(f, "Nothing to undo"),
            Cleared => write!(f, "Circuit cleared"),
            Loaded => write!(f, "Template loaded"),
        }
    }
}

/// State of a gate, as needed for rendering
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct GateState {
    /// Identifier of the gate
    pub id: GateId,
    /// Label of the gate
    pub label: String,
    /// Kind of the gate
    pub kind: GateKind,
    /// Current output value
    pub value: bool,
    /// Whether each input slot is connected
    pub filled_slots: Vec<bool>,
}

/// State of a wire, as needed for rendering
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct WireState {
    /// Identifier of the wire
    pub id: WireId,
    /// Source gate
    pub source: GateId,
    /// Destination gate
    pub destination: GateId,
    /// Input slot of the destination
    pub slot: usize,
    /// Value carried by the wire
    pub value: bool,
}

/// An interactive editing session on a network
#[derive(Debug, Clone)]
pub struct Session {
    net: Network,
    table: Option<TruthTable>,
    status: Status,
    pending: Option<GateId>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with an empty network
    pub fn new() -> Self {
        Self::from_network(Network::new())
    }

    /// Create a session editing an existing network
    pub fn from_network(net: Network) -> Self {
        let mut ret = Session {
            net,
            table: None,
            status: Status::Ready,
            pending: None,
        };
        ret.refresh();
        ret
    }

    /// The network being edited
    pub fn network(&self) -> &Network {
        &self.net
    }

    /// Outcome of the last command
    pub fn status(&self) -> Status {
        self.status
    }

    /// Source of the wire being drawn, if any
    pub fn pending_wire(&self) -> Option<GateId> {
        self.pending
    }

    /// Current truth table
    ///
    /// None if the network lacks inputs or outputs, or has more than
    /// [`MAX_TABLE_INPUTS`](crate::truth_table::MAX_TABLE_INPUTS) inputs.
    pub fn truth_table(&self) -> Option<&TruthTable> {
        self.table.as_ref()
    }

    /// Add a gate
    pub fn add_gate(&mut self, kind: GateKind) -> GateId {
        let id = self.net.add_gate(kind);
        self.finish(Status::Added(kind));
        id
    }

    /// Connect the output of a gate to the first free slot of another; return whether a wire was created
    pub fn connect(&mut self, source: GateId, destination: GateId) -> bool {
        let status = if source == destination {
            Status::SelfConnection
        } else if !self.net.contains(source) || !self.net.contains(destination) {
            Status::Unknown
        } else if self.net.gate(destination).is_full() {
            Status::NoFreeSlot
        } else {
            match self.net.connect(source, destination) {
                Some(_) => Status::Connected,
                None => Status::NoFreeSlot,
            }
        };
        self.finish(status);
        status == Status::Connected
    }

    /// Start drawing a wire from the output of a gate
    pub fn start_wire(&mut self, source: GateId) -> bool {
        if !self.net.contains(source) {
            self.finish(Status::Unknown);
            return false;
        }
        self.pending = Some(source);
        self.status = Status::PickDestination;
        true
    }

    /// Finish drawing a wire to a destination gate; return whether a wire was created
    ///
    /// The pending source is forgotten in all cases.
    pub fn finish_wire(&mut self, destination: GateId) -> bool {
        match self.pending.take() {
            Some(source) => self.connect(source, destination),
            None => {
                self.finish(Status::Ready);
                false
            }
        }
    }

    /// Remove a wire
    pub fn disconnect(&mut self, wire: WireId) -> bool {
        let ok = self.net.disconnect(wire);
        self.finish(if ok {
            Status::Disconnected
        } else {
            Status::Unknown
        });
        ok
    }

    /// Flip the value of an input
    pub fn toggle_input(&mut self, id: GateId) -> bool {
        let status = match self.net.get_gate(id).map(|g| g.kind()) {
            None => Status::Unknown,
            Some(kind) if !kind.is_input() => Status::NotAnInput,
            Some(_) => {
                self.net.toggle(id);
                Status::Toggled
            }
        };
        self.finish(status);
        status == Status::Toggled
    }

    /// Delete a gate and its wires
    pub fn delete_gate(&mut self, id: GateId) -> bool {
        let ok = self.net.delete_gate(id);
        if ok && self.pending == Some(id) {
            self.pending = None;
        }
        self.finish(if ok { Status::Deleted } else { Status::Unknown });
        ok
    }

    /// Undo the last action
    pub fn undo(&mut self) -> Option<Undone> {
        let ret = self.net.undo();
        if let Some(Undone::Gate(g)) = ret {
            if self.pending == Some(g) {
                self.pending = None;
            }
        }
        self.finish(if ret.is_some() {
            Status::Reverted
        } else {
            Status::NothingToUndo
        });
        ret
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.net.clear();
        self.pending = None;
        self.finish(Status::Cleared);
    }

    /// Replace the network by a template; return false if the name is unknown
    pub fn load_template(&mut self, name: &str) -> bool {
        match generators::template(name) {
            Some(net) => {
                self.net = net;
                self.pending = None;
                self.finish(Status::Loaded);
                true
            }
            None => {
                self.finish(Status::Unknown);
                false
            }
        }
    }

    /// State of a gate
    pub fn gate_state(&self, id: GateId) -> Option<GateState> {
        self.net.get_gate(id).map(|g| GateState {
            id,
            label: g.label().to_string(),
            kind: g.kind(),
            value: g.value(),
            filled_slots: g.filled_slots(),
        })
    }

    /// State of all gates, in creation order
    pub fn gate_states(&self) -> Vec<GateState> {
        self.net
            .gate_ids()
            .iter()
            .filter_map(|id| self.gate_state(*id))
            .collect()
    }

    /// State of all wires, in creation order
    pub fn wire_states(&self) -> Vec<WireState> {
        self.net
            .wires()
            .iter()
            .map(|w| WireState {
                id: w.id(),
                source: w.source(),
                destination: w.destination(),
                slot: w.slot(),
                value: self.net.value(w.source()).unwrap_or(false),
            })
            .collect()
    }

    /// Record the outcome of a command and bring the network and its table up to date
    fn finish(&mut self, status: Status) {
        match status {
            Status::SelfConnection | Status::NoFreeSlot | Status::Unknown | Status::NotAnInput => {
                debug!("Request rejected: {status}")
            }
            _ => info!("{status}"),
        }
        self.status = status;
        self.refresh();
    }

    fn refresh(&mut self) {
        self.net.evaluate_all();
        self.table = truth_table(&mut self.net);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_and() {
        let mut s = Session::new();
        assert_eq!(s.status(), Status::Ready);
        assert!(s.truth_table().is_none());
        let i0 = s.add_gate(GateKind::Input);
        let i1 = s.add_gate(GateKind::Input);
        let a = s.add_gate(GateKind::And);
        let o = s.add_gate(GateKind::Output);
        assert_eq!(s.status(), Status::Added(GateKind::Output));
        assert!(s.connect(i0, a));
        assert!(s.connect(i1, a));
        assert!(s.connect(a, o));
        assert_eq!(s.status(), Status::Connected);

        let t = s.truth_table().unwrap();
        assert_eq!(t.headers(), &["IN1", "IN2", "OUT1"]);
        assert_eq!(
            t.rows(),
            &[
                vec![false, false, false],
                vec![false, true, false],
                vec![true, false, false],
                vec![true, true, true],
            ]
        );

        assert!(s.toggle_input(i0));
        assert!(s.toggle_input(i1));
        assert_eq!(s.status(), Status::Toggled);
        let st = s.gate_state(o).unwrap();
        assert_eq!(st.label, "OUT1");
        assert_eq!(st.kind, GateKind::Output);
        assert!(st.value);
        assert_eq!(st.filled_slots, vec![true]);
        assert!(s.wire_states().iter().all(|w| w.value));
    }

    #[test]
    fn test_rejected() {
        let mut s = Session::new();
        let i0 = s.add_gate(GateKind::Input);
        let n = s.add_gate(GateKind::Not);
        assert!(!s.connect(n, n));
        assert_eq!(s.status(), Status::SelfConnection);
        assert!(s.connect(i0, n));
        assert!(!s.connect(i0, n));
        assert_eq!(s.status(), Status::NoFreeSlot);
        assert!(!s.toggle_input(n));
        assert_eq!(s.status(), Status::NotAnInput);
        assert!(!s.toggle_input(GateId::from_raw(77)));
        assert_eq!(s.status(), Status::Unknown);
        assert!(!s.delete_gate(GateId::from_raw(77)));
        assert_eq!(s.status(), Status::Unknown);
        assert!(!s.disconnect(WireId::from_raw(77)));
        assert_eq!(s.network().nb_gates(), 2);
        assert_eq!(s.network().nb_wires(), 1);
    }

    #[test]
    fn test_two_step_wire() {
        let mut s = Session::new();
        let i0 = s.add_gate(GateKind::Input);
        let o = s.add_gate(GateKind::Output);
        assert!(!s.finish_wire(o));
        assert!(s.start_wire(i0));
        assert_eq!(s.status(), Status::PickDestination);
        assert_eq!(s.pending_wire(), Some(i0));
        assert!(s.finish_wire(o));
        assert_eq!(s.pending_wire(), None);

        // A failed wire still forgets its source
        assert!(s.start_wire(o));
        assert!(!s.finish_wire(o));
        assert_eq!(s.status(), Status::SelfConnection);
        assert_eq!(s.pending_wire(), None);

        // Deleting the source cancels the wire
        assert!(s.start_wire(i0));
        assert!(s.delete_gate(i0));
        assert_eq!(s.pending_wire(), None);
        assert!(!s.start_wire(i0));
    }

    #[test]
    fn test_undo() {
        let mut s = Session::new();
        let i0 = s.add_gate(GateKind::Input);
        let o = s.add_gate(GateKind::Output);
        assert!(s.connect(i0, o));
        assert!(s.truth_table().is_some());
        assert!(matches!(s.undo(), Some(Undone::Wire(_))));
        assert_eq!(s.network().nb_wires(), 0);
        assert_eq!(s.network().nb_gates(), 2);
        assert_eq!(s.undo(), Some(Undone::Gate(o)));
        assert!(s.truth_table().is_none());
        assert_eq!(s.undo(), Some(Undone::Gate(i0)));
        assert_eq!(s.network().nb_gates(), 0);
        assert_eq!(s.network().nb_wires(), 0);
        assert_eq!(s.undo(), None);
        assert_eq!(s.status(), Status::NothingToUndo);
    }

    #[test]
    fn test_toggle_keeps_table() {
        let mut s = Session::from_network(generators::half_adder());
        let ins = s.network().inputs();
        let before = s.truth_table().cloned();
        s.toggle_input(ins[0]);
        assert_eq!(s.truth_table().cloned(), before);
        // The toggled value survives the table computation
        assert_eq!(s.gate_state(ins[0]).map(|g| g.value), Some(true));
        assert_eq!(s.gate_state(ins[1]).map(|g| g.value), Some(false));
    }

    #[test]
    fn test_latch_memory() {
        let mut s = Session::from_network(generators::sr_latch());
        let ins = s.network().inputs();
        let outs = s.network().outputs();
        let value = |s: &Session, id| s.gate_state(id).map(|g| g.value);

        s.toggle_input(ins[0]);
        assert_eq!(value(&s, outs[0]), Some(true));
        assert_eq!(value(&s, outs[1]), Some(false));
        s.toggle_input(ins[0]);
        // Set released: the latch still holds
        assert_eq!(value(&s, outs[0]), Some(true));
        assert_eq!(value(&s, outs[1]), Some(false));
        assert!(s.truth_table().is_some());

        // Other edits keep the state too
        s.add_gate(GateKind::And);
        assert_eq!(value(&s, outs[0]), Some(true));
        s.toggle_input(ins[1]);
        s.toggle_input(ins[1]);
        assert_eq!(value(&s, outs[0]), Some(false));
        assert_eq!(value(&s, outs[1]), Some(true));
    }

    #[test]
    fn test_many_inputs() {
        let mut s = Session::new();
        let i0 = s.add_gate(GateKind::Input);
        let o = s.add_gate(GateKind::Output);
        s.connect(i0, o);
        for _ in 0..40 {
            s.add_gate(GateKind::Input);
        }
        assert!(s.truth_table().is_none());
        assert!(s.toggle_input(i0));
        assert_eq!(s.gate_state(o).map(|g| g.value), Some(true));
    }

    #[test]
    fn test_clear_and_template() {
        let mut s = Session::new();
        assert!(s.load_template("full_adder"));
        assert_eq!(s.status(), Status::Loaded);
        assert_eq!(s.truth_table().map(|t| t.nb_rows()), Some(8));
        assert!(!s.load_template("unknown"));
        assert_eq!(s.network().nb_gates(), 10);
        s.clear();
        assert_eq!(s.status(), Status::Cleared);
        assert!(s.network().is_empty());
        assert!(s.truth_table().is_none());
        let i0 = s.add_gate(GateKind::Input);
        assert_eq!(s.gate_state(i0).unwrap().label, "IN1");
        assert_eq!(s.status().to_string(), "Added gate IN");
    }
}
