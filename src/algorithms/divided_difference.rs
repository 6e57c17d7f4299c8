use ndarray::{s, Array2, ArrayViewMut2};

///
/// One dimensional divided difference scheme, computed in place.
///
/// Every column of `solution` holds function values at `nodes` on input and the corresponding
/// Newton coefficients on output. Seeded with the identity this yields the lower triangular
/// Lagrange to Newton matrix. Node distinctness is not checked here: coinciding nodes divide by zero.
///
pub fn dds_1d(nodes: &[f64], mut solution: ArrayViewMut2<f64>)
{
    let n = solution.nrows();
    for i in 1..n
    {
        let x_prev = nodes[i - 1];
        // rows >= i hold f[x_0..x_{i-2}, x_j], row i-1 already holds f[x_0..x_{i-1}]
        let (previous, mut rows) = solution.multi_slice_mut((s![i - 1, ..], s![i.., ..]));
        for (j, mut row) in rows.outer_iter_mut().enumerate()
        {
            let denominator = nodes[i + j] - x_prev;
            row.zip_mut_with(&previous, |value, &p| *value = (*value - p) / denominator);
        }
    }
}

///
/// Lagrange to Newton matrix for the first `n` nodes.
///
pub fn lagrange_to_newton_1d(nodes: &[f64], n: usize) -> Array2<f64>
{
    let mut solution = Array2::eye(n);
    dds_1d(&nodes[..n], solution.view_mut());
    solution
}

///
/// Newton to Lagrange matrix for the first `n` nodes: entry `(i, j)` is the `j`-th Newton
/// polynomial evaluated at node `i`, i.e. the product of `nodes[i] - nodes[k]` for `k < j`.
///
pub fn newton_evaluation_1d(nodes: &[f64], n: usize) -> Array2<f64>
{
    let mut matrix = Array2::zeros((n, n));
    for i in 0..n
    {
        let mut product = 1.0;
        for j in 0..=i
        {
            matrix[[i, j]] = product;
            product *= nodes[i] - nodes[j];
        }
    }
    matrix
}
