use rustc_hash::FxHashMap;
use crate::angle::as_fraction_of_pi;

/// How gate parameters are written into a symbol template.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParamStyle {
    /// Parameters are angles, written as fractions of π where possible.
    Angle,
    /// Parameters are written as plain decimal numbers.
    Raw,
}

/// Typst markup for a gate name, with `{k}` placeholders standing for the
/// gate's `k`-th parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub template: String,
    pub style: ParamStyle,
}

impl Symbol {
    /// Create a new symbol whose parameters are angles.
    pub fn angle<S>(template: S) -> Self
    where S: Into<String>
    {
        Self { template: template.into(), style: ParamStyle::Angle }
    }

    /// Create a new symbol whose parameters are plain numbers.
    pub fn raw<S>(template: S) -> Self
    where S: Into<String>
    {
        Self { template: template.into(), style: ParamStyle::Raw }
    }

    /// Fill in the template's placeholders.
    ///
    /// Only `{` + decimal digits + `}` counts as a placeholder; any other
    /// braces are copied as-is. On failure, returns the index of the first
    /// placeholder with no matching parameter.
    pub fn fill(&self, params: &[f64]) -> Result<String, usize> {
        let mut out = String::with_capacity(self.template.len());
        let mut rest = self.template.as_str();
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let digits_end =
                after.find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after.len());
            let index: Option<usize> =
                (digits_end > 0 && after[digits_end..].starts_with('}'))
                .then(|| after[..digits_end].parse().ok())
                .flatten();
            match index {
                Some(k) => {
                    let param = params.get(k).copied().ok_or(k)?;
                    match self.style {
                        ParamStyle::Angle => out.push_str(&as_fraction_of_pi(param)),
                        ParamStyle::Raw => out.push_str(&param.to_string()),
                    }
                    rest = &after[digits_end + 1..];
                },
                None => {
                    out.push('{');
                    rest = after;
                },
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// Lookup table from gate names to their Typst symbols.
///
/// [`SymbolTable::default`] holds the standard gate set; entries may be added
/// or replaced with [`insert`][Self::insert] and [`insert_raw`][Self::insert_raw].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolTable {
    entries: FxHashMap<String, Symbol>,
}

const DEFAULT_SYMBOLS: &[(&str, &str)] = &[
    ("gr",            "$G R ({0}, {1})$"          ),
    ("grx",           "$G R_X ({0})$"             ),
    ("gry",           "$G R_Y ({0})$"             ),
    ("h",             "$H$"                       ),
    ("id",            "$I$"                       ),
    ("iswap",         "\"iSWAP\""                 ),
    ("p",             "$P({0})$"                  ),
    ("r",             "$R({0})$"                  ),
    ("rx",            "$R_X ({0})$"               ),
    ("rxx",           "$R_(X X) ({0})$"           ),
    ("ry",            "$R_Y ({0})$"               ),
    ("ryy",           "$R_(Y Y) ({0})$"           ),
    ("rz",            "$R_Z ({0})$"               ),
    ("rzx",           "$R_(Z X) ({0})$"           ),
    ("s",             "$S$"                       ),
    ("sdg",           "$S^dagger$"                ),
    ("sx",            "$sqrt(X)$"                 ),
    ("sxdg",          "$sqrt(X)^dagger$"          ),
    ("t",             "$T$"                       ),
    ("tdg",           "$T^dagger$"                ),
    ("u",             "$U({0}, {1}, {2})$"        ),
    ("u1",            "$P({0})$"                  ),
    ("u2",            "$U(pi / 2, {0}, {1})$"     ),
    ("u3",            "$U({0}, {1}, {2})$"        ),
    ("unitary",       "\"Unitary\""               ),
    ("x",             "$X$"                       ),
    ("y",             "$Y$"                       ),
    ("z",             "$Z$"                       ),
    ("inner_product", "\"InnerProd.\""            ),
    ("xx_minus_yy",   "$(X X - Y Y) ({0}, {1})$"  ),
    ("xx_plus_yy",    "$(X X + Y Y) ({0}, {1})$"  ),
];

impl Default for SymbolTable {
    fn default() -> Self {
        let mut table = Self::empty();
        DEFAULT_SYMBOLS.iter()
            .for_each(|(name, template)| { table.insert(*name, *template); });
        table.insert_raw("rv", "$R_V ({0}, {1}, {2})$");
        table
    }
}

impl SymbolTable {
    /// Create a new table with no entries.
    pub fn empty() -> Self { Self { entries: FxHashMap::default() } }

    /// Add or replace an entry whose parameters are angles.
    pub fn insert<N, T>(&mut self, name: N, template: T) -> &mut Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        self.entries.insert(name.into(), Symbol::angle(template));
        self
    }

    /// Add or replace an entry whose parameters are written as plain numbers.
    pub fn insert_raw<N, T>(&mut self, name: N, template: T) -> &mut Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        self.entries.insert(name.into(), Symbol::raw(template));
        self
    }

    /// Remove an entry, returning it if it existed.
    pub fn remove(&mut self, name: &str) -> Option<Symbol> {
        self.entries.remove(name)
    }

    /// Look up a gate name.
    pub fn get(&self, name: &str) -> Option<&Symbol> { self.entries.get(name) }

    /// Return `true` if `name` has an entry.
    pub fn contains(&self, name: &str) -> bool { self.entries.contains_key(name) }

    /// Return the number of entries.
    pub fn len(&self) -> usize { self.entries.len() }

    /// Return `true` if there are no entries.
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

/// Box content for a name with no symbol: word-like names are upper-cased and
/// quoted, anything else is used verbatim.
pub(crate) fn fallback_symbol(name: &str) -> String {
    let is_word =
        !name.is_empty()
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    if is_word {
        format!("\"{}\"", name.to_uppercase())
    } else {
        name.to_string()
    }
}
