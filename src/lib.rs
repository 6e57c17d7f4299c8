//!
//! Barycentric basis transformations between Lagrange and Newton coefficients of multivariate
//! interpolating polynomials on downward-closed multi-index sets.
//!
//! The transformation matrix of a multi-index set with `N` elements is never formed densely.
//! Instead the 1D problem of every dimension is solved once and a dictionary of scaled sub-blocks,
//! one per pair of leaf nodes of the multi-index tree, encodes the full lower triangular matrix.
//!
pub mod algorithms;
pub mod errors;
pub mod one_dimensional_nodes;
pub mod operators;
pub mod options;
pub mod rules;
pub mod serialization;
pub mod storage;
pub mod tree;

#[cfg(test)]
pub(crate) mod test_utilities;

pub use errors::TrafoError;
pub use one_dimensional_nodes::GeneratingPoints;
pub use operators::{barycentric::BarycentricOperator, matrix::MatrixOperator, LinearOperator, TransformationOperator};
pub use options::{Direction, Representation, TransformationOptions};
pub use tree::NodeTree;
