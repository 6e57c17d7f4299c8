use ndarray::Array2;
use serde::{Deserialize, Serialize};
use crate::algorithms::divided_difference::{lagrange_to_newton_1d, newton_evaluation_1d};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction
{
    /// Lagrange coefficients (values at the unisolvent nodes) to Newton coefficients.
    #[default]
    LagrangeToNewton,
    /// Newton coefficients to Lagrange coefficients.
    NewtonToLagrange,
}

impl Direction
{
    pub fn inverse(&self) -> Self
    {
        match self
        {
            Direction::LagrangeToNewton => Direction::NewtonToLagrange,
            Direction::NewtonToLagrange => Direction::LagrangeToNewton,
        }
    }

    ///
    /// The lower triangular 1D transformation for the first `n` nodes.
    ///
    pub fn solve_1d(&self, nodes: &[f64], n: usize) -> Array2<f64>
    {
        match self
        {
            Direction::LagrangeToNewton => lagrange_to_newton_1d(nodes, n),
            Direction::NewtonToLagrange => newton_evaluation_1d(nodes, n),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Representation
{
    /// One materialised matrix piece per leaf pair.
    #[default]
    Dict,
    /// One scalar factor per leaf pair and a shared leaf template.
    Factorised,
    /// Matrix pieces grouped by output leaf, with sub-matrix lookup.
    Piecewise,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformationOptions
{
    pub direction: Direction,
    pub representation: Representation,
    /// Generating points closer than this within one dimension are rejected as degenerate.
    pub node_separation_tolerance: f64,
}

impl Default for TransformationOptions
{
    fn default() -> Self {
        Self { direction: Direction::default(), representation: Representation::default(), node_separation_tolerance: 1e-14 }
    }
}

impl TransformationOptions
{
    pub fn new(direction: Direction, representation: Representation) -> Self
    {
        Self { direction, representation, ..Default::default() }
    }
}
