//! Dense linear solve for the small indifference systems of support enumeration

/// Pivots smaller than this are treated as zero
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve the square system `a · x = b` by Gaussian elimination with partial
/// pivoting. Returns `None` when the system is singular or the solution is
/// not finite.
pub fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Option<Vec<f64>> {
    let n = b.len();
    if a.len() != n || a.iter().any(|row| row.len() != n) {
        return None;
    }

    for col in 0..n {
        let pivot = (col..n).max_by(|&x, &y| a[x][col].abs().total_cmp(&a[y][col].abs()))?;
        if a[pivot][col].abs() <= PIVOT_TOLERANCE {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        let pivot_row = a[col].clone();
        let pivot_rhs = b[col];
        for row in (col + 1)..n {
            let factor = a[row][col] / pivot_row[col];
            if factor == 0.0 {
                continue;
            }
            for (cell, &p) in a[row][col..].iter_mut().zip(&pivot_row[col..]) {
                *cell -= factor * p;
            }
            b[row] -= factor * pivot_rhs;
        }
    }

    let mut x = vec![0.0_f64; n];
    for row in (0..n).rev() {
        let tail: f64 = ((row + 1)..n).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    x.iter().all(|v| v.is_finite()).then_some(x)
}
