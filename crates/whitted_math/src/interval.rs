/// A closed range `[min, max]` on the real line.
///
/// Used to accept or reject ray parameters and to clamp color channels. NaN
/// is never contained in any interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Finite, non-negative ray parameters: hits in front of the ray origin.
    pub const FORWARD: Interval = Interval {
        min: 0.0,
        max: f64::MAX,
    };

    /// The displayable channel range.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Create a new interval given min and max values.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }
}
