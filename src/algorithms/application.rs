use ndarray::{linalg::general_mat_vec_mul, s, Array2, ArrayView1, ArrayView2, ArrayViewMut1};
use crate::storage::trafo_dict::{NodePair, TrafoDict};

///
/// Adds `piece · coeffs_in[start_in..]` to `coeffs_out[start_out..]`, scaled by `factor`.
/// The slice lengths are implied by the shape of the piece.
///
#[inline]
fn accumulate_piece(piece: ArrayView2<f64>, factor: f64, coeffs_in: &[f64], start_in: usize, coeffs_out: &mut [f64], start_out: usize)
{
    let (size_out, size_in) = piece.dim();
    let slice_in = ArrayView1::from(&coeffs_in[start_in..start_in + size_in]);
    let mut slice_out = ArrayViewMut1::from(&mut coeffs_out[start_out..start_out + size_out]);
    general_mat_vec_mul(factor, &piece, &slice_in, 1.0, &mut slice_out);
}

///
/// Performs the piecewise (barycentric) transformation encoded in a dictionary.
///
/// Every piece transforms the slice of its left leaf and the result is summed up into the slice
/// of its right leaf, as several left leaves contribute to the same right leaf.
/// `coeffs_out` is expected to be zero initialised.
///
pub fn transform_barycentric_dict(coeffs_in: &[f64], coeffs_out: &mut [f64], trafo_dict: &TrafoDict, leaf_positions: &[usize])
{
    for (pair, piece) in trafo_dict.iter()
    {
        accumulate_piece(piece.view(), 1.0, coeffs_in, leaf_positions[pair.left], coeffs_out, leaf_positions[pair.right]);
    }
}

///
/// Reconstructs the global transformation matrix from a dictionary.
///
pub fn merge_trafo_dict(trafo_dict: &TrafoDict, leaf_positions: &[usize], leaf_sizes: &[usize]) -> Array2<f64>
{
    let expected_size = combined_size(leaf_positions, leaf_sizes);
    let mut combined_matrix = Array2::zeros((expected_size, expected_size));
    for (pair, piece) in trafo_dict.iter()
    {
        let (size_out, size_in) = piece.dim();
        let start_in = leaf_positions[pair.left];
        let start_out = leaf_positions[pair.right];
        combined_matrix.slice_mut(s![start_out..start_out + size_out, start_in..start_in + size_in]).assign(piece);
    }
    combined_matrix
}

///
/// Transformation using one shared leaf template and a scalar factor per leaf combination.
/// Avoids storing the redundant scaled copies of the template at the cost of a multiplication
/// per application.
///
pub fn transform_barycentric_factorised(coeffs_in: &[f64], coeffs_out: &mut [f64], leaf_solution: &Array2<f64>, leaf_factors: &[(NodePair, f64)],
    leaf_positions: &[usize], leaf_sizes: &[usize])
{
    for &(pair, factor) in leaf_factors
    {
        let piece = leaf_solution.slice(s![..leaf_sizes[pair.right], ..leaf_sizes[pair.left]]);
        accumulate_piece(piece, factor, coeffs_in, leaf_positions[pair.left], coeffs_out, leaf_positions[pair.right]);
    }
}

pub fn merge_trafo_factorised(leaf_solution: &Array2<f64>, leaf_factors: &[(NodePair, f64)], leaf_positions: &[usize], leaf_sizes: &[usize]) -> Array2<f64>
{
    let expected_size = combined_size(leaf_positions, leaf_sizes);
    let mut combined_matrix = Array2::zeros((expected_size, expected_size));
    for &(pair, factor) in leaf_factors
    {
        let size_out = leaf_sizes[pair.right];
        let size_in = leaf_sizes[pair.left];
        let start_in = leaf_positions[pair.left];
        let start_out = leaf_positions[pair.right];
        let template = leaf_solution.slice(s![..size_out, ..size_in]);
        combined_matrix.slice_mut(s![start_out..start_out + size_out, start_in..start_in + size_in])
            .zip_mut_with(&template, |value, &t| *value = t * factor);
    }
    combined_matrix
}

///
/// Transformation of the piecewise representation. `pieces` is grouped by output leaf, with the
/// pieces of leaf `r` at `pieces[offsets[r]..offsets[r + 1]]`. Each output window only receives
/// contributions of its own group, so the windows are processed independently.
///
pub fn transform_barycentric_piecewise(coeffs_in: &[f64], coeffs_out: &mut [f64], pieces: &[(NodePair, Array2<f64>)], offsets: &[usize],
    leaf_positions: &[usize], leaf_sizes: &[usize])
{
    let accumulate_leaf = |(leaf, window): (usize, &mut [f64])|
    {
        for (pair, piece) in &pieces[offsets[leaf]..offsets[leaf + 1]]
        {
            accumulate_piece(piece.view(), 1.0, coeffs_in, leaf_positions[pair.left], window, 0);
        }
    };
    let windows = leaf_windows(coeffs_out, leaf_sizes);
    #[cfg(feature = "rayon")]
    {
        use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
        windows.into_par_iter().enumerate().for_each(accumulate_leaf);
    }
    #[cfg(not(feature = "rayon"))]
    windows.into_iter().enumerate().for_each(accumulate_leaf);
}

pub fn merge_trafo_piecewise(pieces: &[(NodePair, Array2<f64>)], leaf_positions: &[usize], leaf_sizes: &[usize]) -> Array2<f64>
{
    let expected_size = combined_size(leaf_positions, leaf_sizes);
    let mut combined_matrix = Array2::zeros((expected_size, expected_size));
    for (pair, piece) in pieces
    {
        let start_in = leaf_positions[pair.left];
        let start_out = leaf_positions[pair.right];
        combined_matrix.slice_mut(s![start_out..start_out + leaf_sizes[pair.right], start_in..start_in + leaf_sizes[pair.left]]).assign(piece);
    }
    combined_matrix
}

#[inline]
fn combined_size(leaf_positions: &[usize], leaf_sizes: &[usize]) -> usize
{
    match (leaf_positions.last(), leaf_sizes.last())
    {
        (Some(position), Some(size)) => position + size,
        _ => 0,
    }
}

///
/// Splits `coeffs` into the consecutive, non-overlapping windows of all leaves.
///
fn leaf_windows<'a>(coeffs: &'a mut [f64], leaf_sizes: &[usize]) -> Vec<&'a mut [f64]>
{
    let mut windows = Vec::with_capacity(leaf_sizes.len());
    let mut rest = coeffs;
    for &size in leaf_sizes
    {
        let (window, tail) = std::mem::take(&mut rest).split_at_mut(size);
        windows.push(window);
        rest = tail;
    }
    windows
}
