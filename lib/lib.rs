//! This package draws quantum circuits as [Typst][typst] markup for the
//! [`quill`][quill] package.
//!
//! - [`circuit`] provides a plain description of a circuit: quantum and
//! classical registers plus an ordered list of gates, measurements, and
//! barriers, optionally conditioned on classical values.
//! - [`layer`] packs operations into as few columns as possible without
//! reordering any two that overlap.
//! - [`render`] turns each operation into `quill` instructions for the wires it
//! touches, using a configurable [`SymbolTable`] for gate names.
//! - [`grid`] collects the instructions of all operations into a single
//! wire × column grid and writes it out as a `quantum-circuit(...)` call.
//! - [`diagram`] ties the above together.
//!
//! ```
//! use std::f64::consts::PI;
//! use quill_draw::{ Circuit, DrawOptions };
//!
//! let mut circuit = Circuit::with_size(2, 0);
//! circuit.h(0).cp(PI / 2.0, 0, 1);
//! let typst = circuit.draw(&DrawOptions::default()).unwrap();
//! assert!(typst.starts_with("#quantum-circuit(lstick($ket(q_(0))$),$H$,ctrl(1, "));
//! ```
//!
//! [typst]: https://typst.app
//! [quill]: https://typst.app/universe/package/quill

pub mod angle;
pub mod circuit;
pub mod layer;
pub mod render;
pub mod grid;
pub mod diagram;
pub(crate) mod quilldefs;

pub use circuit::{
    Circuit,
    CircuitError,
    CircuitResult,
    Condition,
    Operation,
    Register,
    WireId,
};
pub use diagram::{ Diagram, DrawError, DrawOptions, DrawResult, draw };
pub use render::{ RenderError, RenderResult, SymbolTable };
