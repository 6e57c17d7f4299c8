use ndarray::{Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use crate::{algorithms::{application::{merge_trafo_piecewise, transform_barycentric_piecewise}, dds_solutions::DdsSolutions, expansion::barycentric_dds},
    storage::{trafo_dict::NodePair, BarycentricTransformation}, tree::{LeafLayout, NodeTree}};

///
/// Piecewise representation: the pieces sorted by `(right, left)`, i.e. grouped by output leaf.
/// Any sub-matrix of the global transformation can be looked up directly, and each output leaf
/// is computed independently of all others.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarycentricPiecewise
{
    pieces: Vec<(NodePair, Array2<f64>)>,
    /// pieces of output leaf `r` are at `offsets[r]..offsets[r + 1]`
    offsets: Vec<usize>,
    layout: LeafLayout,
}

impl BarycentricPiecewise
{
    pub fn build(dds_solutions: &DdsSolutions, tree: &NodeTree) -> Self
    {
        let mut pieces = barycentric_dds(dds_solutions, tree).into_pieces();
        pieces.sort_unstable_by_key(|(pair, _)| (pair.right, pair.left));
        let num_leaves = tree.num_leaves();
        let mut offsets = vec![0; num_leaves + 1];
        for (pair, _) in &pieces
        {
            offsets[pair.right + 1] += 1;
        }
        for leaf in 0..num_leaves
        {
            offsets[leaf + 1] += offsets[leaf];
        }
        Self { pieces, offsets, layout: tree.leaf_layout() }
    }

    #[inline]
    pub fn len(&self) -> usize
    {
        self.pieces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool
    {
        self.pieces.is_empty()
    }

    ///
    /// All stored pieces with output leaf `leaf`, ordered by input leaf.
    ///
    pub fn pieces_of_output(&self, leaf: usize) -> &[(NodePair, Array2<f64>)]
    {
        &self.pieces[self.offsets[leaf]..self.offsets[leaf + 1]]
    }

    ///
    /// The stored piece transforming leaf `left` into leaf `right`, if it is not a zero block.
    ///
    pub fn piece(&self, left: usize, right: usize) -> Option<ArrayView2<'_, f64>>
    {
        let group = self.pieces_of_output(right);
        group.binary_search_by_key(&left, |(pair, _)| pair.left).ok().map(|index| group[index].1.view())
    }

    ///
    /// Sub-matrix of the global transformation selected by two leaves, including zero blocks.
    ///
    pub fn submatrix(&self, left: usize, right: usize) -> Array2<f64>
    {
        match self.piece(left, right)
        {
            Some(piece) => piece.to_owned(),
            None => Array2::zeros((self.layout.sizes[right], self.layout.sizes[left])),
        }
    }
}

impl BarycentricTransformation for BarycentricPiecewise
{
    fn transform(&self, coeffs_in: &[f64], coeffs_out: &mut [f64]) {
        transform_barycentric_piecewise(coeffs_in, coeffs_out, &self.pieces, &self.offsets, &self.layout.positions, &self.layout.sizes);
    }

    fn merge(&self) -> Array2<f64> {
        merge_trafo_piecewise(&self.pieces, &self.layout.positions, &self.layout.sizes)
    }

    fn layout(&self) -> &LeafLayout {
        &self.layout
    }
}
