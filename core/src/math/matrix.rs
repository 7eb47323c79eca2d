use ndarray::{Array1, Array2};

const PIVOT_EPS: f64 = 1e-12;

pub struct MatrixHelper;

impl MatrixHelper {
    /// Solve `lhs * x = rhs` by Gaussian elimination with partial pivoting.
    ///
    /// Returns `None` when the system is singular (a pivot falls below
    /// `PIVOT_EPS`), which callers treat as "no solution available" rather
    /// than an error.
    pub fn solve(lhs: Array2<f64>, rhs: Array1<f64>) -> Option<Array1<f64>> {
        let n = rhs.len();
        if lhs.nrows() != n || lhs.ncols() != n {
            return None;
        }

        let mut a = lhs;
        let mut b = rhs;

        for col in 0..n {
            let mut pivot = col;
            for row in (col + 1)..n {
                if a[[row, col]].abs() > a[[pivot, col]].abs() {
                    pivot = row;
                }
            }
            if a[[pivot, col]].abs() < PIVOT_EPS {
                return None;
            }
            if pivot != col {
                for k in 0..n {
                    let tmp = a[[col, k]];
                    a[[col, k]] = a[[pivot, k]];
                    a[[pivot, k]] = tmp;
                }
                b.swap(col, pivot);
            }

            for row in (col + 1)..n {
                let factor = a[[row, col]] / a[[col, col]];
                for k in col..n {
                    a[[row, k]] -= factor * a[[col, k]];
                }
                b[row] -= factor * b[col];
            }
        }

        let mut x = Array1::zeros(n);
        for col in (0..n).rev() {
            let mut acc = b[col];
            for k in (col + 1)..n {
                acc -= a[[col, k]] * x[k];
            }
            x[col] = acc / a[[col, col]];
        }
        Some(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn solves_well_conditioned_system() {
        let lhs = array![[2.0, 1.0], [1.0, 3.0]];
        let rhs = array![5.0, 10.0];
        let x = MatrixHelper::solve(lhs, rhs).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn pivoting_handles_zero_leading_entry() {
        let lhs = array![[0.0, 1.0], [1.0, 0.0]];
        let rhs = array![2.0, 3.0];
        let x = MatrixHelper::solve(lhs, rhs).unwrap();
        assert!((x[0] - 3.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn singular_system_returns_none() {
        let lhs = array![[1.0, 2.0], [2.0, 4.0]];
        let rhs = array![1.0, 2.0];
        assert!(MatrixHelper::solve(lhs, rhs).is_none());
    }

    #[test]
    fn dimension_mismatch_returns_none() {
        let lhs = Array2::zeros((3, 2));
        let rhs = Array1::zeros(3);
        assert!(MatrixHelper::solve(lhs, rhs).is_none());
    }
}
