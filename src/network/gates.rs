use std::fmt;
use std::str::FromStr;

use crate::network::handle::GateId;

/// Kinds of logic gates available in a network
///
/// Inputs hold a value set by the user, outputs copy their single operand.
/// Other gates compute a boolean function of one or two operands.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum GateKind {
    /// Primary input, toggled by the user
    Input,
    /// Primary output, a buffer of its operand
    Output,
    /// 2-input And gate
    And,
    /// 2-input Or gate
    Or,
    /// 2-input Xor gate
    Xor,
    /// Inverter
    Not,
    /// 2-input Nand gate
    Nand,
    /// 2-input Nor gate
    Nor,
    /// 2-input Xnor gate
    Xnor,
}

impl GateKind {
    /// Number of gate kinds
    pub const NB_KINDS: usize = 9;

    /// All gate kinds, in palette order
    pub const ALL: [GateKind; Self::NB_KINDS] = [
        GateKind::Input,
        GateKind::Output,
        GateKind::And,
        GateKind::Or,
        GateKind::Xor,
        GateKind::Not,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xnor,
    ];

    /// Number of input slots of a gate of this kind
    pub fn arity(&self) -> usize {
        use GateKind::*;
        match self {
            Not | Output => 1,
            Input | And | Or | Xor | Nand | Nor | Xnor => 2,
        }
    }

    /// Boolean function of the gate; the second operand is ignored for single-input kinds
    ///
    /// Inputs have no function of their operands, and evaluate to false here.
    pub fn eval(&self, a: bool, b: bool) -> bool {
        use GateKind::*;
        match self {
            Input => false,
            Output => a,
            And => a & b,
            Or => a | b,
            Xor => a ^ b,
            Not => !a,
            Nand => !(a & b),
            Nor => !(a | b),
            Xnor => !(a ^ b),
        }
    }

    /// Returns whether this is a primary input
    pub fn is_input(&self) -> bool {
        matches!(self, GateKind::Input)
    }

    /// Returns whether this is a primary output
    pub fn is_output(&self) -> bool {
        matches!(self, GateKind::Output)
    }

    /// Short name of the kind, also used as a label for unnumbered gates
    pub fn name(&self) -> &'static str {
        use GateKind::*;
        match self {
            Input => "IN",
            Output => "OUT",
            And => "AND",
            Or => "OR",
            Xor => "XOR",
            Not => "NOT",
            Nand => "NAND",
            Nor => "NOR",
            Xnor => "XNOR",
        }
    }
}

impl FromStr for GateKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use GateKind::*;
        match s.trim().to_ascii_uppercase().as_str() {
            "IN" | "INPUT" => Ok(Input),
            "OUT" | "OUTPUT" => Ok(Output),
            "AND" => Ok(And),
            "OR" => Ok(Or),
            "XOR" => Ok(Xor),
            "NOT" => Ok(Not),
            "NAND" => Ok(Nand),
            "NOR" => Ok(Nor),
            "XNOR" => Ok(Xnor),
            _ => Err(format!("Unknown gate kind {s:?}")),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A logic gate, as stored in a network
///
/// The input slots reference the gates driving them. Their number is fixed by the kind.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Gate {
    kind: GateKind,
    label: String,
    inputs: Box<[Option<GateId>]>,
    pub(crate) value: bool,
}

impl Gate {
    /// Create an unconnected gate
    pub(crate) fn new(kind: GateKind, label: String) -> Gate {
        Gate {
            kind,
            label,
            inputs: vec![None; kind.arity()].into(),
            value: false,
        }
    }

    /// Kind of the gate
    pub fn kind(&self) -> GateKind {
        self.kind
    }

    /// Human-readable label (IN1, OUT2, AND, ...)
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Last computed output value
    pub fn value(&self) -> bool {
        self.value
    }

    /// Number of input slots
    pub fn arity(&self) -> usize {
        self.inputs.len()
    }

    /// Gate driving the input slot i, if connected; panics if i is not below the arity
    pub fn input(&self, i: usize) -> Option<GateId> {
        self.inputs[i]
    }

    /// All input slots
    pub fn inputs(&self) -> &[Option<GateId>] {
        &self.inputs
    }

    /// Gates driving this gate, in slot order
    pub fn sources(&self) -> impl Iterator<Item = GateId> + '_ {
        self.inputs.iter().flatten().copied()
    }

    /// Lowest-index unconnected slot
    pub fn first_free_slot(&self) -> Option<usize> {
        self.inputs.iter().position(|s| s.is_none())
    }

    /// Whether each slot is connected
    pub fn filled_slots(&self) -> Vec<bool> {
        self.inputs.iter().map(|s| s.is_some()).collect()
    }

    /// Returns whether all slots are connected
    pub fn is_full(&self) -> bool {
        self.first_free_slot().is_none()
    }

    pub(crate) fn set_input(&mut self, i: usize, src: Option<GateId>) {
        self.inputs[i] = src;
    }

    /// Compute the output value from the values of the operands, and store it
    ///
    /// Unconnected operands read as false. Inputs keep their stored value.
    pub(crate) fn evaluate(&mut self, operands: &[bool]) -> bool {
        if !self.kind.is_input() {
            let a = operands.first().copied().unwrap_or(false);
            let b = operands.get(1).copied().unwrap_or(false);
            self.value = self.kind.eval(a, b);
        }
        self.value
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if self.kind.is_input() {
            return write!(f, " = {}", self.value as u8);
        }
        let st = self
            .inputs
            .iter()
            .map(|s| match s {
                Some(g) => g.to_string(),
                None => "_".to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "({}) = {}", st, self.value as u8)
    }
}
