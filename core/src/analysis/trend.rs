use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::math::MatrixHelper;

/// Fewer points than this cannot constrain a degree-2 polynomial.
pub const MIN_TREND_POINTS: usize = 3;

/// Abscissa used when fitting a trend over the summary rows.
///
/// `Index` treats rows as evenly spaced regardless of their radii, which
/// matches how the bar charts lay them out. `Radius` fits in physical
/// kilometres, so irregular radius steps weight the curve accordingly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendSpacing {
    #[default]
    Index,
    Radius,
}

/// Degree-2 least-squares fit, stored as ascending coefficients
/// `c0 + c1 * x + c2 * x^2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendCurve {
    coefficients: [f64; 3],
}

impl TrendCurve {
    /// Fit via the normal equations. Returns `None` when there are too few
    /// points, the slices disagree in length, or the system is singular
    /// (for example all abscissae identical).
    pub fn fit(xs: &[f64], ys: &[f64]) -> Option<Self> {
        if xs.len() != ys.len() || xs.len() < MIN_TREND_POINTS {
            return None;
        }

        let n = xs.len();
        let mut vandermonde = Array2::zeros((n, 3));
        for (i, &x) in xs.iter().enumerate() {
            vandermonde[[i, 0]] = 1.0;
            vandermonde[[i, 1]] = x;
            vandermonde[[i, 2]] = x * x;
        }
        let y = Array1::from_vec(ys.to_vec());
        let normal = vandermonde.t().dot(&vandermonde);
        let rhs = vandermonde.t().dot(&y);

        let solution = MatrixHelper::solve(normal, rhs)?;
        Some(Self {
            coefficients: [solution[0], solution[1], solution[2]],
        })
    }

    /// Fit against row indices or physical radii depending on `spacing`.
    pub fn fit_spaced(values: &[f64], radii: &[f64], spacing: TrendSpacing) -> Option<Self> {
        match spacing {
            TrendSpacing::Index => {
                let xs: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();
                Self::fit(&xs, values)
            }
            TrendSpacing::Radius => Self::fit(radii, values),
        }
    }

    pub fn coefficients(&self) -> [f64; 3] {
        self.coefficients
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let [c0, c1, c2] = self.coefficients;
        c0 + c1 * x + c2 * x * x
    }

    /// Evaluate `count` evenly spaced points across `[x_min, x_max]`,
    /// endpoints included.
    pub fn sample(&self, x_min: f64, x_max: f64, count: usize) -> Vec<(f64, f64)> {
        match count {
            0 => Vec::new(),
            1 => vec![(x_min, self.evaluate(x_min))],
            _ => {
                let span = x_max - x_min;
                (0..count)
                    .map(|i| {
                        let x = x_min + span * (i as f64 / (count - 1) as f64);
                        (x, self.evaluate(x))
                    })
                    .collect()
            }
        }
    }
}
