//! Dense wire × depth matrix of `quill` instructions, and its serialization
//! as a `quantum-circuit(...)` call.

use ndarray::{ Array2, ArrayView1, Axis };
use itertools::Itertools;
use crate::{
    circuit::{ Wire, WireKind },
    quilldefs::{
        CLASSICAL_WIRE,
        IMPORT_PHYSICA,
        IMPORT_QUILL,
        NOOP,
        ROW_BREAK,
        TYPST_SYMBOLS,
    },
};

/// Left-hand label for a wire, in Typst math mode.
///
/// Register names of one character or naming a Typst symbol are written bare;
/// all others are quoted. The position inside the register is added as a
/// subscript when the register holds more than one wire, and quantum wires
/// are written as kets.
pub fn wire_label(wire: &Wire<'_>) -> String {
    let name = wire.register.name.as_str();
    let mut label =
        if name.chars().count() == 1 || TYPST_SYMBOLS.contains(&name) {
            name.to_string()
        } else {
            format!("\"{}\"", name)
        };
    if wire.register.size > 1 {
        label = format!("{}_({})", label, wire.index);
    }
    if wire.kind() == WireKind::Quantum {
        label = format!("ket({})", label);
    }
    format!("${}$", label)
}

/// Rendering options for [`Grid::to_typst`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Markup {
    /// Prefix the call with `#`, for use in Typst markup mode.
    pub leading_hash: bool,
    /// Prepend import lines for the `physica` and `quill` packages.
    pub imports: bool,
}

impl Default for Markup {
    fn default() -> Self { Self { leading_hash: true, imports: false } }
}

/// Instructions for every wire at every depth.
///
/// Row `i` holds wire `i` in canonical order; column `d` holds depth `d`.
/// Cells not written by any operation hold the neutral instruction `1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Array2<String>,
    labels: Vec<String>,
    kinds: Vec<WireKind>,
}

impl Grid {
    /// Create a new grid of empty cells for the given wires.
    pub fn new<'a, I>(wires: I, depth: usize) -> Self
    where I: IntoIterator<Item = Wire<'a>>
    {
        let (labels, kinds): (Vec<String>, Vec<WireKind>) =
            wires.into_iter()
            .map(|w| (wire_label(&w), w.kind()))
            .unzip();
        let cells = Array2::from_elem((labels.len(), depth), NOOP.to_string());
        Self { cells, labels, kinds }
    }

    /// Return the number of wires.
    pub fn num_wires(&self) -> usize { self.cells.nrows() }

    /// Return the number of depth columns.
    pub fn depth(&self) -> usize { self.cells.ncols() }

    /// Write an instruction into a cell, returning the previous one.
    ///
    /// Returns `None` and does nothing if the cell is out of bounds.
    pub fn place<S>(&mut self, wire: usize, depth: usize, instr: S)
        -> Option<String>
    where S: Into<String>
    {
        self.cells.get_mut((wire, depth))
            .map(|cell| std::mem::replace(cell, instr.into()))
    }

    /// Return the instruction in a cell.
    pub fn get(&self, wire: usize, depth: usize) -> Option<&str> {
        self.cells.get((wire, depth)).map(String::as_str)
    }

    /// Return the instructions for a single wire.
    pub fn row(&self, wire: usize) -> Option<ArrayView1<'_, String>> {
        (wire < self.num_wires()).then(|| self.cells.row(wire))
    }

    /// Return the instructions at a single depth.
    pub fn column(&self, depth: usize) -> Option<ArrayView1<'_, String>> {
        (depth < self.depth()).then(|| self.cells.column(depth))
    }

    /// Return the left-hand labels of all wires.
    pub fn labels(&self) -> &[String] { &self.labels }

    /// Flatten the grid into the argument list of `quantum-circuit`.
    ///
    /// Each wire contributes its `lstick` label, a double-line marker if it is
    /// classical, one instruction per depth, a trailing `1`, and a row break
    /// unless it is the last wire.
    pub fn tokens(&self) -> Vec<String> {
        let n = self.num_wires();
        let mut tokens: Vec<String> = Vec::with_capacity(n * (self.depth() + 4));
        let rows = self.cells.axis_iter(Axis(0)).zip(self.kinds.iter());
        for (i, (row, kind)) in rows.enumerate() {
            tokens.push(format!("lstick({})", self.labels[i]));
            if *kind == WireKind::Classical {
                tokens.push(CLASSICAL_WIRE.to_string());
            }
            tokens.extend(row.iter().cloned());
            tokens.push(NOOP.to_string());
            if i + 1 != n { tokens.push(ROW_BREAK.to_string()); }
        }
        tokens
    }

    /// Render the final Typst text.
    pub fn to_typst(&self, markup: Markup) -> String {
        let mut out = String::new();
        if markup.imports {
            out.push_str(IMPORT_PHYSICA);
            out.push('\n');
            out.push_str(IMPORT_QUILL);
            out.push('\n');
        }
        if markup.leading_hash { out.push('#'); }
        out.push_str("quantum-circuit(");
        out.push_str(&self.tokens().iter().join(","));
        out.push(')');
        out
    }
}
