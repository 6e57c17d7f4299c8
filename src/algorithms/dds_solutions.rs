use ndarray::{s, Array2, ArrayView2};
use serde::{Deserialize, Serialize};
use crate::{errors::TrafoError, one_dimensional_nodes::GeneratingPoints, options::{Direction, TransformationOptions}, tree::NodeTree};

///
/// Solves the 1D problem of every dimension once, at the largest size that appears in that dimension.
/// Due to the lexicographical ordering the first node of a dimension is always the largest.
/// No validation is performed.
///
pub fn compute_dds_solutions(generating_points: &GeneratingPoints, problem_sizes: &[Vec<usize>], direction: Direction) -> Vec<Array2<f64>>
{
    problem_sizes.iter().enumerate().map(|(dim, sizes)|
    {
        // ATTENTION: the generating points differ per dimension
        direction.solve_1d(generating_points.dim(dim), sizes[0])
    }).collect()
}

///
/// Per dimension maximal 1D solutions. The solution of any smaller sub-problem in a dimension is
/// the leading principal sub-block, since divided differences of a node prefix do not depend on
/// nodes appended afterwards.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DdsSolutions
{
    direction: Direction,
    solutions: Vec<Array2<f64>>,
}

impl DdsSolutions
{
    pub fn compute(generating_points: &GeneratingPoints, tree: &NodeTree, options: &TransformationOptions) -> Result<Self, TrafoError>
    {
        if generating_points.ndim() != tree.ndim()
        {
            return Err(TrafoError::DimensionMismatch);
        }
        for dim in 0..tree.ndim()
        {
            generating_points.check_prefix(dim, tree.max_problem_size(dim), options.node_separation_tolerance)?;
        }
        let solutions = compute_dds_solutions(generating_points, tree.problem_sizes(), options.direction);
        log::debug!("computed {:?} 1D solutions of sizes {:?}", options.direction, solutions.iter().map(|s| s.nrows()).collect::<Vec<_>>());
        Ok(Self { direction: options.direction, solutions })
    }

    #[inline]
    pub fn direction(&self) -> Direction
    {
        self.direction
    }

    #[inline]
    pub fn ndim(&self) -> usize
    {
        self.solutions.len()
    }

    #[inline]
    pub fn solution(&self, dim: usize) -> &Array2<f64>
    {
        &self.solutions[dim]
    }

    ///
    /// Top left `rows x cols` block of the maximal solution in `dim`.
    ///
    #[inline]
    pub fn sub_block(&self, dim: usize, rows: usize, cols: usize) -> ArrayView2<'_, f64>
    {
        self.solutions[dim].slice(s![..rows, ..cols])
    }
}
