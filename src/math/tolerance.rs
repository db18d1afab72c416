/// Tolerances used by predicates and near-zero decisions.
///
/// A `Tolerance` is passed explicitly into every call that needs one, so
/// concurrent callers never observe each other's settings.
///
/// - `abs`: absolute tolerance, used when comparing against zero.
/// - `rel`: relative tolerance, scaled by the larger magnitude of the operands.
/// - `rank`: absolute singular-value threshold for numerical rank. `None`
///   selects `sigma_max * max(rel, max(rows, cols) * f64::EPSILON)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub abs: f64,
    pub rel: f64,
    pub rank: Option<f64>,
}

impl Tolerance {
    pub const DEFAULT_ABS: f64 = 1e-9;
    pub const DEFAULT_REL: f64 = 1e-9;

    /// Creates a tolerance with the given absolute and relative parts.
    #[must_use]
    pub fn new(abs: f64, rel: f64) -> Self {
        Self {
            abs,
            rel,
            rank: None,
        }
    }

    /// A tolerance that only accepts exact equality.
    #[must_use]
    pub fn exact() -> Self {
        Self {
            abs: 0.0,
            rel: 0.0,
            rank: Some(0.0),
        }
    }

    #[must_use]
    pub fn with_abs(mut self, abs: f64) -> Self {
        self.abs = abs;
        self
    }

    #[must_use]
    pub fn with_rel(mut self, rel: f64) -> Self {
        self.rel = rel;
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: f64) -> Self {
        self.rank = Some(rank);
        self
    }

    /// Checks `|a - b| <= max(rel * max(|a|, |b|), abs)`.
    #[must_use]
    pub fn is_close(self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        let diff = (a - b).abs();
        diff <= (self.rel * a.abs().max(b.abs())).max(self.abs)
    }

    /// Checks `|x| <= abs`.
    #[must_use]
    pub fn is_zero(self, x: f64) -> bool {
        x.abs() <= self.abs
    }

    /// Singular-value threshold for a `rows x cols` matrix whose largest
    /// singular value is `sigma_max`.
    #[must_use]
    pub fn rank_threshold(self, sigma_max: f64, rows: usize, cols: usize) -> f64 {
        match self.rank {
            Some(tol) => tol,
            #[allow(clippy::cast_precision_loss)]
            None => sigma_max * (rows.max(cols) as f64 * f64::EPSILON).max(self.rel),
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ABS, Self::DEFAULT_REL)
    }
}
