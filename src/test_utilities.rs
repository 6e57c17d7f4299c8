use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::one_dimensional_nodes::GeneratingPoints;

///
/// All multi-indices of the box `[0, max_exponent]^ndim` accepted by `keep`, in lexicographical
/// order with the first dimension varying fastest. `keep` must describe a downward-closed set.
///
pub(crate) fn lower_set_exponents(ndim: usize, max_exponent: usize, keep: impl Fn(&[usize]) -> bool) -> Vec<usize>
{
    let base = max_exponent + 1;
    let mut exponents = Vec::new();
    let mut index = vec![0; ndim];
    for i in 0..base.pow(ndim as u32)
    {
        let mut rest = i;
        for value in index.iter_mut()
        {
            *value = rest % base;
            rest /= base;
        }
        if keep(&index)
        {
            exponents.extend_from_slice(&index);
        }
    }
    exponents
}

pub(crate) fn total_degree_exponents(ndim: usize, degree: usize) -> Vec<usize>
{
    lower_set_exponents(ndim, degree, |index| index.iter().sum::<usize>() <= degree)
}

pub(crate) fn hyperbolic_exponents(ndim: usize, degree: usize) -> Vec<usize>
{
    lower_set_exponents(ndim, degree, |index| index.iter().map(|&e| e + 1).product::<usize>() <= degree + 1)
}

///
/// Dense Newton to Lagrange matrix computed directly: entry `(i, j)` is the `j`-th multivariate
/// Newton polynomial evaluated at the `i`-th unisolvent node.
///
pub(crate) fn newton_evaluation_matrix(points: &GeneratingPoints, exponents: &[usize], ndim: usize) -> Array2<f64>
{
    let indices: Vec<&[usize]> = exponents.chunks_exact(ndim).collect();
    let n = indices.len();
    let mut matrix = Array2::zeros((n, n));
    for (i, node) in indices.iter().enumerate()
    {
        for (j, newton) in indices.iter().enumerate()
        {
            let mut value = 1.0;
            for d in 0..ndim
            {
                let x = points.dim(d)[node[d]];
                for k in 0..newton[d]
                {
                    value *= x - points.dim(d)[k];
                }
            }
            matrix[[i, j]] = value;
        }
    }
    matrix
}

pub(crate) fn random_coefficients(n: usize, seed: u64) -> Vec<f64>
{
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

pub(crate) fn assert_close(actual: &[f64], expected: &[f64], tolerance: f64)
{
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected)
    {
        assert!((a - e).abs() <= tolerance * e.abs().max(1.0), "{a} != {e}");
    }
}
