//! Signal: an ordered series of `(x, y)` samples and the registry trait the
//! expression evaluator resolves `[n]` references against.

use serde::{Deserialize, Serialize};

/// Ordered `(x, y)` samples. `x` and `y` always have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SignalSerde")]
pub struct Signal {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Serializable mirror used to validate lengths on deserialization.
#[derive(Deserialize)]
struct SignalSerde {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TryFrom<SignalSerde> for Signal {
    type Error = String;

    fn try_from(s: SignalSerde) -> Result<Self, Self::Error> {
        Signal::new(s.x, s.y)
    }
}

impl Signal {
    /// Build a signal from separate axis vectors.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, String> {
        if x.len() != y.len() {
            return Err(format!(
                "x and y must have the same number of points (x: {}, y: {})",
                x.len(),
                y.len()
            ));
        }
        Ok(Self { x, y })
    }

    /// Build a signal from `[x, y]` pairs.
    pub fn from_points(points: &[[f64; 2]]) -> Self {
        Self {
            x: points.iter().map(|p| p[0]).collect(),
            y: points.iter().map(|p| p[1]).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn points(&self) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.x.iter().zip(self.y.iter()).map(|(&x, &y)| [x, y])
    }

    /// Multiply every x value by `factor`.
    pub fn scale_x(mut self, factor: f64) -> Self {
        for x in self.x.iter_mut() {
            *x *= factor;
        }
        self
    }

    /// Apply `f` to every y value, keeping x untouched.
    pub fn map_y(mut self, f: impl Fn(f64) -> f64) -> Self {
        for y in self.y.iter_mut() {
            *y = f(*y);
        }
        self
    }

    /// Combine two signals index for index. x values come from `self`.
    ///
    /// Returns `None` when the point counts differ.
    pub fn zip_y(mut self, other: &Signal, f: impl Fn(f64, f64) -> f64) -> Option<Self> {
        if self.len() != other.len() {
            return None;
        }
        for (a, &b) in self.y.iter_mut().zip(other.y.iter()) {
            *a = f(*a, b);
        }
        Some(self)
    }

    pub(crate) fn with_y(&self, y: Vec<f64>) -> Self {
        debug_assert_eq!(self.x.len(), y.len());
        Self { x: self.x.clone(), y }
    }
}

/// Read-only, index-addressed collection of signals.
///
/// Indices must stay stable for the duration of one solve.
pub trait DatasetRegistry {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&Signal>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DatasetRegistry for Vec<Signal> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&Signal> {
        self.as_slice().get(index)
    }
}
