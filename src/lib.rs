//! Interactive logic network simulation
//!
//! This crate provides the model behind an interactive logic circuit editor: gates connected by wires,
//! evaluated after every edit, with an exhaustive truth table of the whole circuit.
//! Rendering is left to the user of the library; a small line-oriented shell is provided as a binary.
//!
//! # Usage
//!
//! ```bash
//! # Build a circuit interactively, printing the truth table after each command
//! gatesim
//! > add in
//! > add not
//! > add out
//! > connect g0 g1
//! > connect g1 g2
//! # Start from a ready-made circuit
//! gatesim --template full_adder
//! ```
//!
//! # Datastructures
//!
//! `Network` owns gates and wires. Gates are referenced by stable identifiers rather than pointers,
//! so arbitrary wiring is allowed, including cycles. Each gate kind has a fixed number of input slots:
//! one for Not and Output, two for every other kind. A wire always fills the lowest free slot of its
//! destination, and never replaces an existing wire.
//!
//! Every edit re-evaluates all gates. Evaluation is a depth-first traversal from each gate in creation
//! order, with a visited set to stop at wiring cycles. On a cycle, the value read back is the one stored
//! by the previous pass, so the result may lag one pass behind a fixed point; evaluation always terminates.
//!
//! For example, here is a half adder:
//! ```
//! # use gatesim::{GateKind, Network};
//! use gatesim::truth_table::truth_table;
//!
//! let mut net = Network::new();
//! let a = net.add_gate(GateKind::Input);
//! let b = net.add_gate(GateKind::Input);
//! let sum = net.add_gate(GateKind::Xor);
//! let carry = net.add_gate(GateKind::And);
//! for g in [sum, carry] {
//!     net.connect(a, g);
//!     net.connect(b, g);
//! }
//! let o1 = net.add_gate(GateKind::Output);
//! let o2 = net.add_gate(GateKind::Output);
//! net.connect(sum, o1);
//! net.connect(carry, o2);
//!
//! let table = truth_table(&mut net).unwrap();
//! assert_eq!(table.headers(), &["IN1", "IN2", "OUT1", "OUT2"]);
//! assert_eq!(table.outputs_of(3), &[false, true]);
//! ```

#![warn(missing_docs)]

pub mod cmd;
pub mod network;
pub mod session;
pub mod sim;
pub mod truth_table;

pub use network::{stats, Gate, GateId, GateKind, Network, Undone, Wire, WireId};
pub use session::{GateState, Session, Status, WireState};
pub use truth_table::TruthTable;
