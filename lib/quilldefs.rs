//! Fixed tokens of the `quill` markup.

/// Empty wire cell.
pub const NOOP: &str = "1";

/// Filler written by a barrier to every wire it does not start on.
pub const BARRIER_FILL: &str = "0";

/// Row break between wires.
pub const ROW_BREAK: &str = r"[\ ]";

/// Double-line marker for classical wires.
pub const CLASSICAL_WIRE: &str = "setwire(2)";

pub const IMPORT_PHYSICA: &str = r#"#import "@preview/physica:0.9.3": *"#;
pub const IMPORT_QUILL: &str = r#"#import "@preview/quill:0.3.0": *"#;

pub const BOX_WIDTH: f64 = 5.0; // em
pub const BOX_WIDTH_WIDE: f64 = 6.5; // em
pub const LABEL_DY: &str = "-0.75em";

/// Register names that Typst math mode understands as symbols and can
/// therefore be written unquoted.
pub const TYPST_SYMBOLS: &[&str] = &[
    "alpha",   "Alpha",
    "beta",    "Beta",
    "chi",     "Chi",
    "delta",   "Delta",
    "epsilon", "Epsilon",
    "eta",     "Eta",
    "gamma",   "Gamma",
    "iota",    "Iota",
    "kai",     "Kai",
    "kappa",   "Kappa",
    "lambda",  "Lambda",
    "mu",      "Mu",
    "nu",      "Nu",
    "omega",   "Omega",
    "omicron", "Omicron",
    "phi",     "Phi",
    "pi",      "Pi",
    "psi",     "Psi",
    "rho",     "Rho",
    "sigma",   "Sigma",
    "tau",     "Tau",
    "theta",   "Theta",
    "upsilon", "Upsilon",
    "xi",      "Xi",
    "zeta",    "Zeta",
];
