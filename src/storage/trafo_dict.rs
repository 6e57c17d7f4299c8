use indexmap::IndexMap;
use ndarray::Array2;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};
use crate::{algorithms::{application::{merge_trafo_dict, transform_barycentric_dict}, dds_solutions::DdsSolutions, expansion::barycentric_dds}, storage::BarycentricTransformation, tree::{LeafLayout, NodeTree}};

///
/// A combination of two nodes of the same dimension. `left` selects the input (Lagrange side,
/// columns) and `right` the output (Newton side, rows) of a matrix piece.
///
#[derive(Copy, Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodePair
{
    pub left: usize,
    pub right: usize,
}

impl NodePair
{
    #[inline]
    pub fn new(left: usize, right: usize) -> Self
    {
        Self { left, right }
    }

    #[inline]
    pub fn is_diagonal(&self) -> bool
    {
        self.left == self.right
    }
}

///
/// Composite lower triangular block matrix: one dense piece of shape `(size_right, size_left)` per
/// node pair. Only pairs with `left <= right` are ever stored, absent pairs are zero blocks.
/// Iteration follows insertion order, which makes every consumer deterministic.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafoDict
{
    pieces: IndexMap<NodePair, Array2<f64>, FxBuildHasher>,
}

impl TrafoDict
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self
    {
        Self { pieces: IndexMap::with_capacity_and_hasher(capacity, FxBuildHasher) }
    }

    #[inline]
    pub fn insert(&mut self, pair: NodePair, piece: Array2<f64>)
    {
        debug_assert!(pair.left <= pair.right, "only lower triangular pieces are stored");
        self.pieces.insert(pair, piece);
    }

    #[inline]
    pub fn get(&self, pair: NodePair) -> Option<&Array2<f64>>
    {
        self.pieces.get(&pair)
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

    pub fn iter(&self) -> impl Iterator<Item = (&NodePair, &Array2<f64>)>
    {
        self.pieces.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &NodePair>
    {
        self.pieces.keys()
    }

    pub fn into_pieces(self) -> Vec<(NodePair, Array2<f64>)>
    {
        self.pieces.into_iter().collect()
    }
}

impl FromIterator<(NodePair, Array2<f64>)> for TrafoDict
{
    fn from_iter<I: IntoIterator<Item = (NodePair, Array2<f64>)>>(iter: I) -> Self {
        let mut dict = TrafoDict::new();
        for (pair, piece) in iter
        {
            dict.insert(pair, piece);
        }
        dict
    }
}

///
/// Dictionary representation: one materialised piece per leaf combination.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarycentricDict
{
    pub trafo_dict: TrafoDict,
    pub layout: LeafLayout,
}

impl BarycentricDict
{
    pub fn build(dds_solutions: &DdsSolutions, tree: &NodeTree) -> Self
    {
        Self { trafo_dict: barycentric_dds(dds_solutions, tree), layout: tree.leaf_layout() }
    }
}

impl BarycentricTransformation for BarycentricDict
{
    fn transform(&self, coeffs_in: &[f64], coeffs_out: &mut [f64]) {
        transform_barycentric_dict(coeffs_in, coeffs_out, &self.trafo_dict, &self.layout.positions);
    }

    fn merge(&self) -> Array2<f64> {
        merge_trafo_dict(&self.trafo_dict, &self.layout.positions, &self.layout.sizes)
    }

    fn layout(&self) -> &LeafLayout {
        &self.layout
    }
}

#[test]
fn test_insertion_order()
{
    let dict: TrafoDict = [(NodePair::new(1, 2), Array2::zeros((1, 1))), (NodePair::new(0, 0), Array2::eye(2)), (NodePair::new(0, 1), Array2::zeros((1, 2)))]
        .into_iter().collect();
    assert_eq!(dict.len(), 3);
    let keys: Vec<NodePair> = dict.keys().copied().collect();
    assert_eq!(keys, vec![NodePair::new(1, 2), NodePair::new(0, 0), NodePair::new(0, 1)]);
    assert_eq!(dict.get(NodePair::new(0, 0)), Some(&Array2::eye(2)));
    assert!(dict.get(NodePair::new(1, 0)).is_none());
}
