//! Wires, registers, and the ordered list of operations making up a circuit.
//!
//! A [`Circuit`] is built through the methods below (or deserialized) and is
//! only checked for well-formedness when it is drawn; see
//! [`Circuit::validate`].

use std::fmt;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use serde::{ Deserialize, Serialize };
use thiserror::Error;

pub(crate) mod wire;
pub use wire::*;

/// Points to an operation in a circuit for error reporting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpRef {
    /// Position of the operation in the circuit's operation list.
    pub position: usize,
    /// Opcode of the operation.
    pub name: String,
}

impl fmt::Display for OpRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation {} (`{}`)", self.position, self.name)
    }
}

#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("{0}: operation has no operands")]
    EmptyOperands(OpRef),

    #[error("{0}: {1} does not exist")]
    MissingWire(OpRef, WireId),

    #[error("{0}: {1} appears more than once in the operand list")]
    RepeatedWire(OpRef, WireId),

    #[error("{0}: classical register `{1}` does not exist")]
    MissingRegister(OpRef, String),

    #[error("{0}: condition value {1} does not fit in register `{2}` of size {3}")]
    ConditionOverflow(OpRef, u64, String, usize),

    #[error("{0}: measurement expects exactly one qubit followed by one classical bit")]
    BadMeasure(OpRef),

    #[error("{0}: condition is drawn on {1}, which is also an operand")]
    ConditionOnOperand(OpRef, WireId),

    #[error("duplicate register name `{0}`")]
    DuplicateRegister(String),
}
pub type CircuitResult<T> = Result<T, CircuitError>;
use CircuitError::*;

/// A classical condition attached to an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Apply the operation only if a single classical bit has this value.
    Bit { clbit: usize, value: bool },
    /// Apply the operation only if a classical register, read as an unsigned
    /// integer, has this value.
    Register { register: String, value: u64 },
}

impl Condition {
    /// Create a new single-bit condition.
    pub fn bit(clbit: usize, value: bool) -> Self {
        Self::Bit { clbit, value }
    }

    /// Create a new whole-register condition.
    pub fn register<S>(register: S, value: u64) -> Self
    where S: Into<String>
    {
        Self::Register { register: register.into(), value }
    }

    /// Return the expected value as an integer.
    pub fn value(&self) -> u64 {
        match self {
            Self::Bit { value, .. } => u64::from(*value),
            Self::Register { value, .. } => *value,
        }
    }
}

/// A single event in a circuit: a gate, a measurement, or a barrier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Opcode, e.g. `h`, `cx`, `c3sx`, `measure`, or `barrier`.
    pub name: String,
    /// Wires acted on, in order. Controls come first for controlled gates; a
    /// measurement lists its qubit, then its classical bit.
    pub operands: Vec<WireId>,
    /// Numeric parameters, usually rotation angles in radians.
    #[serde(default)]
    pub params: Vec<f64>,
    /// Classical condition.
    #[serde(default)]
    pub condition: Option<Condition>,
    /// Text displayed in place of the gate's usual symbol.
    #[serde(default)]
    pub label: Option<String>,
}

impl Operation {
    /// Create a new operation with no parameters, condition, or label.
    pub fn new<S, I>(name: S, operands: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = WireId>,
    {
        Self {
            name: name.into(),
            operands: operands.into_iter().collect(),
            params: Vec::new(),
            condition: None,
            label: None,
        }
    }

    /// Set numeric parameters.
    pub fn with_params<I>(mut self, params: I) -> Self
    where I: IntoIterator<Item = f64>
    {
        self.params = params.into_iter().collect();
        self
    }

    /// Set a classical condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Set a display label.
    pub fn with_label<S>(mut self, label: S) -> Self
    where S: Into<String>
    {
        self.label = Some(label.into());
        self
    }

    /// Return a reference to `self` for error reporting, given its position in
    /// a circuit.
    pub fn at(&self, position: usize) -> OpRef {
        OpRef { position, name: self.name.clone() }
    }

    /// Return `true` if `self` is a barrier.
    pub fn is_barrier(&self) -> bool { self.name == "barrier" }

    /// Return `true` if `self` is a measurement.
    pub fn is_measure(&self) -> bool { self.name == "measure" }
}

/// A quantum circuit: quantum and classical registers, and an ordered list of
/// operations.
///
/// The order of operations is the order in which they were appended and is
/// treated as the circuit's topological order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    #[serde(default)]
    pub(crate) qregs: Vec<Register>,
    #[serde(default)]
    pub(crate) cregs: Vec<Register>,
    #[serde(default)]
    pub(crate) ops: Vec<Operation>,
}

impl Circuit {
    /// Create a new, empty circuit with no wires.
    pub fn new() -> Self { Self::default() }

    /// Create a new circuit with a single quantum register `q` holding
    /// `qubits` qubits and a single classical register `c` holding `clbits`
    /// bits. Empty registers are omitted.
    pub fn with_size(qubits: usize, clbits: usize) -> Self {
        let mut circuit = Self::new();
        if qubits > 0 { circuit.add_qreg("q", qubits); }
        if clbits > 0 { circuit.add_creg("c", clbits); }
        circuit
    }

    /// Append a quantum register and return the global index of its first
    /// qubit.
    pub fn add_qreg<S>(&mut self, name: S, size: usize) -> usize
    where S: Into<String>
    {
        let first = self.num_qubits();
        self.qregs.push(Register::new(name, size));
        first
    }

    /// Append a classical register and return the global index of its first
    /// bit.
    pub fn add_creg<S>(&mut self, name: S, size: usize) -> usize
    where S: Into<String>
    {
        let first = self.num_clbits();
        self.cregs.push(Register::new(name, size));
        first
    }

    /// Return the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qregs.iter().map(|r| r.size).sum()
    }

    /// Return the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.cregs.iter().map(|r| r.size).sum()
    }

    /// Return the total number of wires.
    pub fn num_wires(&self) -> usize { self.num_qubits() + self.num_clbits() }

    /// Return the number of operations.
    pub fn num_ops(&self) -> usize { self.ops.len() }

    /// Return the quantum registers in declaration order.
    pub fn qregs(&self) -> &[Register] { &self.qregs }

    /// Return the classical registers in declaration order.
    pub fn cregs(&self) -> &[Register] { &self.cregs }

    /// Return the operations in order.
    pub fn ops(&self) -> &[Operation] { &self.ops }

    /// Iterate over all wires in canonical order: every qubit in register
    /// order, then every classical bit in register order.
    pub fn wires(&self) -> impl Iterator<Item = Wire<'_>> + '_ {
        let qubits =
            self.qregs.iter()
            .flat_map(|reg| (0..reg.size).map(move |index| (reg, index)))
            .enumerate()
            .map(|(k, (register, index))| {
                Wire { id: WireId::Qubit(k), register, index, abs: k }
            });
        let nq = self.num_qubits();
        let clbits =
            self.cregs.iter()
            .flat_map(|reg| (0..reg.size).map(move |index| (reg, index)))
            .enumerate()
            .map(move |(k, (register, index))| {
                Wire { id: WireId::Clbit(k), register, index, abs: nq + k }
            });
        qubits.chain(clbits)
    }

    /// Build the map from wires to absolute diagram positions.
    pub fn wire_index(&self) -> WireIndex {
        WireIndex::new(self.num_qubits(), self.cregs.iter())
    }

    /// Check that every operation only refers to wires and registers that
    /// exist, has at least one operand, and does not repeat an operand.
    pub fn validate(&self) -> CircuitResult<()> {
        let mut names: FxHashSet<&str> = FxHashSet::default();
        for reg in self.qregs.iter().chain(self.cregs.iter()) {
            if !names.insert(reg.name.as_str()) {
                return Err(DuplicateRegister(reg.name.clone()));
            }
        }
        let index = self.wire_index();
        self.ops.iter().enumerate()
            .try_for_each(|(k, op)| Self::validate_op(&index, k, op))
    }

    fn validate_op(index: &WireIndex, position: usize, op: &Operation)
        -> CircuitResult<()>
    {
        if op.operands.is_empty() {
            return Err(EmptyOperands(op.at(position)));
        }
        if let Some(id) = op.operands.iter().find(|id| index.abs(**id).is_none()) {
            return Err(MissingWire(op.at(position), *id));
        }
        if let Some(id) = op.operands.iter().duplicates().next() {
            return Err(RepeatedWire(op.at(position), *id));
        }
        if op.is_measure()
            && !matches!(op.operands[..], [WireId::Qubit(_), WireId::Clbit(_)])
        {
            return Err(BadMeasure(op.at(position)));
        }
        let anchor =
            match &op.condition {
                None => return Ok(()),
                Some(Condition::Bit { clbit, .. }) => {
                    if index.abs(WireId::Clbit(*clbit)).is_none() {
                        return Err(MissingWire(op.at(position), WireId::Clbit(*clbit)));
                    }
                    WireId::Clbit(*clbit)
                },
                Some(Condition::Register { register, value }) => {
                    let (first, size) =
                        index.creg(register)
                        .ok_or_else(|| {
                            MissingRegister(op.at(position), register.clone())
                        })?;
                    if size < 64 && *value >> size != 0 {
                        return Err(ConditionOverflow(
                            op.at(position), *value, register.clone(), size));
                    }
                    WireId::Clbit(first)
                },
            };
        // the condition marker and the operand would share one cell
        if op.operands.contains(&anchor) {
            return Err(ConditionOnOperand(op.at(position), anchor));
        }
        Ok(())
    }

    /// Append an operation.
    pub fn append(&mut self, op: Operation) -> &mut Self {
        self.ops.push(op);
        self
    }

    /// Attach a classical condition to the most recently appended operation.
    ///
    /// Does nothing if the circuit has no operations.
    pub fn c_if(&mut self, condition: Condition) -> &mut Self {
        if let Some(op) = self.ops.last_mut() {
            op.condition = Some(condition);
        }
        self
    }

    /// Append a gate acting on some qubits.
    pub fn gate<S, I, P>(&mut self, name: S, qubits: I, params: P) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = usize>,
        P: IntoIterator<Item = f64>,
    {
        let op =
            Operation::new(name, qubits.into_iter().map(WireId::Qubit))
            .with_params(params);
        self.append(op)
    }

    /// Append a Hadamard gate.
    pub fn h(&mut self, q: usize) -> &mut Self { self.gate("h", [q], []) }

    /// Append a Pauli *X* gate.
    pub fn x(&mut self, q: usize) -> &mut Self { self.gate("x", [q], []) }

    /// Append a Pauli *Y* gate.
    pub fn y(&mut self, q: usize) -> &mut Self { self.gate("y", [q], []) }

    /// Append a Pauli *Z* gate.
    pub fn z(&mut self, q: usize) -> &mut Self { self.gate("z", [q], []) }

    /// Append an *S* gate.
    pub fn s(&mut self, q: usize) -> &mut Self { self.gate("s", [q], []) }

    /// Append a *T* gate.
    pub fn t(&mut self, q: usize) -> &mut Self { self.gate("t", [q], []) }

    /// Append a phase gate.
    pub fn p(&mut self, theta: f64, q: usize) -> &mut Self {
        self.gate("p", [q], [theta])
    }

    /// Append a rotation about *x*.
    pub fn rx(&mut self, theta: f64, q: usize) -> &mut Self {
        self.gate("rx", [q], [theta])
    }

    /// Append a rotation about *y*.
    pub fn ry(&mut self, theta: f64, q: usize) -> &mut Self {
        self.gate("ry", [q], [theta])
    }

    /// Append a rotation about *z*.
    pub fn rz(&mut self, theta: f64, q: usize) -> &mut Self {
        self.gate("rz", [q], [theta])
    }

    /// Append an *X* gate on `t`, controlled by `c`.
    pub fn cx(&mut self, c: usize, t: usize) -> &mut Self {
        self.gate("cx", [c, t], [])
    }

    /// Append a *Y* gate on `t`, controlled by `c`.
    pub fn cy(&mut self, c: usize, t: usize) -> &mut Self {
        self.gate("cy", [c, t], [])
    }

    /// Append a *Z* gate controlled by `a` and `b`.
    ///
    /// This gate is symmetric with respect to its inputs.
    pub fn cz(&mut self, a: usize, b: usize) -> &mut Self {
        self.gate("cz", [a, b], [])
    }

    /// Append a phase gate controlled by `a` and `b`.
    ///
    /// This gate is symmetric with respect to its inputs.
    pub fn cp(&mut self, theta: f64, a: usize, b: usize) -> &mut Self {
        self.gate("cp", [a, b], [theta])
    }

    /// Append a swap gate.
    pub fn swap(&mut self, a: usize, b: usize) -> &mut Self {
        self.gate("swap", [a, b], [])
    }

    /// Append a Toffoli gate: *X* on `t`, controlled by `c0` and `c1`.
    pub fn ccx(&mut self, c0: usize, c1: usize, t: usize) -> &mut Self {
        self.gate("ccx", [c0, c1, t], [])
    }

    /// Append a Fredkin gate: swap of `a` and `b`, controlled by `c`.
    pub fn cswap(&mut self, c: usize, a: usize, b: usize) -> &mut Self {
        self.gate("cswap", [c, a, b], [])
    }

    /// Append a rotation about *xx*.
    pub fn rxx(&mut self, theta: f64, a: usize, b: usize) -> &mut Self {
        self.gate("rxx", [a, b], [theta])
    }

    /// Append a rotation about *zz*.
    pub fn rzz(&mut self, theta: f64, a: usize, b: usize) -> &mut Self {
        self.gate("rzz", [a, b], [theta])
    }

    /// Append a √*X* gate.
    pub fn sx(&mut self, q: usize) -> &mut Self { self.gate("sx", [q], []) }

    /// Append a universal single-qubit gate.
    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, q: usize)
        -> &mut Self
    {
        self.gate("u", [q], [theta, phi, lambda])
    }

    /// Append a measurement of qubit `q` into classical bit `c`.
    pub fn measure(&mut self, q: usize, c: usize) -> &mut Self {
        self.append(
            Operation::new("measure", [WireId::Qubit(q), WireId::Clbit(c)]))
    }

    /// Measure every qubit into a new classical register named `meas`,
    /// preceded by a barrier across all qubits.
    pub fn measure_all(&mut self) -> &mut Self {
        let nq = self.num_qubits();
        if nq == 0 { return self; }
        let first = self.add_creg("meas", nq);
        self.barrier(0..nq);
        (0..nq).for_each(|q| { self.measure(q, first + q); });
        self
    }

    /// Append a barrier across some qubits.
    pub fn barrier<I>(&mut self, qubits: I) -> &mut Self
    where I: IntoIterator<Item = usize>
    {
        self.append(
            Operation::new("barrier", qubits.into_iter().map(WireId::Qubit)))
    }

    /// Append a barrier across all qubits.
    pub fn barrier_all(&mut self) -> &mut Self {
        let nq = self.num_qubits();
        self.barrier(0..nq)
    }

    /// Append a Pauli-evolution style box labeled `"<label> (<time>)"`.
    pub fn evolution<S, I>(&mut self, label: S, time: f64, qubits: I)
        -> &mut Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = usize>,
    {
        let op =
            Operation::new("PauliEvolution", qubits.into_iter().map(WireId::Qubit))
            .with_params([time])
            .with_label(format!("{} ({})", label.as_ref(), time));
        self.append(op)
    }
}
