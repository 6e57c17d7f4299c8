use ndarray::Array2;
use serde::{Deserialize, Serialize};
use crate::{algorithms::{application::{merge_trafo_factorised, transform_barycentric_factorised}, dds_solutions::DdsSolutions, expansion::barycentric_factors},
    storage::{trafo_dict::NodePair, BarycentricTransformation}, tree::{LeafLayout, NodeTree}};

///
/// Factorised representation: all leaf pieces are scalar multiples of the top left blocks of the
/// dimension 0 maximal solution, so only that template and one factor per leaf pair are stored.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarycentricFactorised
{
    pub leaf_solution: Array2<f64>,
    pub leaf_factors: Vec<(NodePair, f64)>,
    pub layout: LeafLayout,
}

impl BarycentricFactorised
{
    pub fn build(dds_solutions: &DdsSolutions, tree: &NodeTree) -> Self
    {
        Self
        {
            leaf_solution: dds_solutions.solution(0).clone(),
            leaf_factors: barycentric_factors(dds_solutions, tree),
            layout: tree.leaf_layout(),
        }
    }
}

impl BarycentricTransformation for BarycentricFactorised
{
    fn transform(&self, coeffs_in: &[f64], coeffs_out: &mut [f64]) {
        transform_barycentric_factorised(coeffs_in, coeffs_out, &self.leaf_solution, &self.leaf_factors, &self.layout.positions, &self.layout.sizes);
    }

    fn merge(&self) -> Array2<f64> {
        merge_trafo_factorised(&self.leaf_solution, &self.leaf_factors, &self.layout.positions, &self.layout.sizes)
    }

    fn layout(&self) -> &LeafLayout {
        &self.layout
    }
}
