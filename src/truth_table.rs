//! Exhaustive truth table of a network
//!
//! Every assignment of the primary inputs is applied in turn, in ascending binary order with the first
//! input as the most significant bit, and the primary outputs are recorded.
//!
//! ```
//! # use gatesim::{GateKind, Network};
//! use gatesim::truth_table::truth_table;
//!
//! let mut net = Network::new();
//! let i = net.add_gate(GateKind::Input);
//! let n = net.add_gate(GateKind::Not);
//! let o = net.add_gate(GateKind::Output);
//! net.connect(i, n);
//! net.connect(n, o);
//!
//! let table = truth_table(&mut net).unwrap();
//! assert_eq!(table.headers(), &["IN1", "OUT1"]);
//! assert_eq!(table.rows(), &[vec![false, true], vec![true, false]]);
//! ```

use std::fmt;

use itertools::Itertools;
use log::debug;

use crate::Network;

/// Truth table, with one column per input then one column per output
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TruthTable {
    headers: Vec<String>,
    rows: Vec<Vec<bool>>,
    nb_inputs: usize,
}

impl TruthTable {
    /// Column labels: inputs then outputs, in creation order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// All rows, in ascending order of the input assignment
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// Number of rows, excluding the header
    pub fn nb_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn nb_columns(&self) -> usize {
        self.headers.len()
    }

    /// Number of input columns
    pub fn nb_inputs(&self) -> usize {
        self.nb_inputs
    }

    /// Number of output columns
    pub fn nb_outputs(&self) -> usize {
        self.headers.len() - self.nb_inputs
    }

    /// Input assignment of a row
    pub fn inputs_of(&self, row: usize) -> &[bool] {
        &self.rows[row][..self.nb_inputs]
    }

    /// Output values of a row
    pub fn outputs_of(&self, row: usize) -> &[bool] {
        &self.rows[row][self.nb_inputs..]
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.headers.iter().map(|h| h.len().max(1)).collect_vec();
        let header = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, &w)| format!("{h:^w$}"))
            .join(" | ");
        writeln!(f, "{header}")?;
        writeln!(f, "{}", widths.iter().map(|w| "-".repeat(*w)).join("-+-"))?;
        for row in &self.rows {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(v, &w)| format!("{:^w$}", *v as u8))
                .join(" | ");
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Largest number of inputs for which a truth table is computed
///
/// Every assignment is evaluated, so the cost doubles with each input.
pub const MAX_TABLE_INPUTS: usize = 12;

/// Compute the truth table of the network
///
/// Returns None if the network has no input, no output, or more than [`MAX_TABLE_INPUTS`] inputs.
/// The stored value of every gate is restored afterwards, so the state of the network is unchanged.
pub fn truth_table(net: &mut Network) -> Option<TruthTable> {
    let ins = net.inputs();
    let outs = net.outputs();
    if ins.is_empty() || outs.is_empty() {
        return None;
    }
    if ins.len() > MAX_TABLE_INPUTS {
        debug!(
            "Truth table unavailable: {} inputs, at most {MAX_TABLE_INPUTS} supported",
            ins.len()
        );
        return None;
    }
    let nb_rows = 1usize.checked_shl(ins.len() as u32)?;
    debug!("Enumerating {nb_rows} patterns for {} outputs", outs.len());

    let headers = ins
        .iter()
        .chain(outs.iter())
        .map(|id| net.gate(*id).label().to_string())
        .collect();
    let saved = net.gates().map(|(id, g)| (id, g.value())).collect_vec();

    let mut rows = Vec::with_capacity(nb_rows);
    for mut row in ins
        .iter()
        .map(|_| [false, true].into_iter())
        .multi_cartesian_product()
    {
        for (id, v) in ins.iter().zip(&row) {
            net.set_input(*id, *v);
        }
        net.evaluate_all();
        row.extend(outs.iter().map(|id| net.value(*id).unwrap_or(false)));
        rows.push(row);
    }

    // Gates on a cycle hold state that evaluation alone cannot rebuild
    for (id, v) in saved {
        net.gate_mut(id).value = v;
    }

    Some(TruthTable {
        headers,
        rows,
        nb_inputs: ins.len(),
    })
}
