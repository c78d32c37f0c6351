use vecmodel_expr::ids::VariableId;

/// Optimization sense
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

impl Sense {
    pub fn as_str(self) -> &'static str {
        match self {
            Sense::Minimize => "minimize",
            Sense::Maximize => "maximize",
        }
    }
}

/// Bounds for a variable or constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lower: f64,
    pub upper: f64,
}

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `(-inf, +inf)`
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// Bounds from optional limits; `None` means unbounded on that side.
    pub fn from_options(lower: Option<f64>, upper: Option<f64>) -> Self {
        Self::new(
            lower.unwrap_or(f64::NEG_INFINITY),
            upper.unwrap_or(f64::INFINITY),
        )
    }

    /// Neither side is NaN, `lower <= upper`, and no side is infinite in the
    /// wrong direction.
    pub(crate) fn is_valid(self) -> bool {
        !self.lower.is_nan()
            && !self.upper.is_nan()
            && self.lower <= self.upper
            && !is_pos_inf(self.lower)
            && !is_neg_inf(self.upper)
    }

    /// The offending side when a row's bounds cannot be handed to a solver:
    /// NaN on either side, a `+inf` lower bound, or a `-inf` upper bound.
    pub(crate) fn invalid_side(self) -> Option<f64> {
        if self.lower.is_nan() || is_pos_inf(self.lower) {
            Some(self.lower)
        } else if self.upper.is_nan() || is_neg_inf(self.upper) {
            Some(self.upper)
        } else {
            None
        }
    }
}

fn is_pos_inf(value: f64) -> bool {
    value.is_infinite() && value.is_sign_positive()
}

fn is_neg_inf(value: f64) -> bool {
    value.is_infinite() && value.is_sign_negative()
}

/// Variable type requested by the caller.
///
/// The single-letter tags follow the usual MIP convention: `C` continuous,
/// `B` binary, `I` integer. Unknown tags are carried verbatim in
/// [`VarKind::Other`] and left for the model to accept or reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum VarKind {
    #[default]
    Continuous,
    Binary,
    Integer,
    Other(String),
}

impl VarKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "C" => VarKind::Continuous,
            "B" => VarKind::Binary,
            "I" => VarKind::Integer,
            other => VarKind::Other(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            VarKind::Continuous => "C",
            VarKind::Binary => "B",
            VarKind::Integer => "I",
            VarKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for VarKind {
    fn from(tag: &str) -> Self {
        VarKind::from_tag(tag)
    }
}

impl From<char> for VarKind {
    fn from(tag: char) -> Self {
        VarKind::from_tag(tag.encode_utf8(&mut [0; 4]))
    }
}

impl std::fmt::Display for VarKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A decision variable with bounds and integrality constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variable {
    pub bounds: Bounds,
    pub is_integer: bool,
}

impl Variable {
    /// Create a binary variable with bounds [0, 1] and integer constraint.
    pub fn binary() -> Self {
        Self {
            bounds: Bounds::new(0.0, 1.0),
            is_integer: true,
        }
    }

    /// Create a continuous variable with specified bounds.
    pub fn continuous(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: false,
        }
    }

    /// Create an integer variable with specified bounds.
    pub fn integer(bounds: Bounds) -> Self {
        Self {
            bounds,
            is_integer: true,
        }
    }
}

/// A stored row: `bounds.lower <= Σ coeff * var <= bounds.upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub bounds: Bounds,
    pub terms: Vec<(VariableId, f64)>,
}

/// Objective function with a sense, linear terms and a constant offset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Objective {
    pub sense: Option<Sense>,
    pub terms: Vec<(VariableId, f64)>,
    pub constant: f64,
}
