use ndarray::Array2;
use crate::{errors::TrafoError, one_dimensional_nodes::GeneratingPoints, options::TransformationOptions, tree::NodeTree};

pub mod barycentric;
pub mod matrix;

use barycentric::BarycentricOperator;
use matrix::MatrixOperator;

///
/// A linear change of basis acting on flat coefficient vectors.
///
pub trait LinearOperator
{
    fn num_coefficients(&self) -> usize;
    fn apply(&self, coeffs_in: &[f64]) -> Result<Vec<f64>, TrafoError>;
    fn array_representation(&self) -> &Array2<f64>;

    ///
    /// The operator applying `other` first and `self` afterwards, as a dense matrix.
    ///
    fn compose(&self, other: &dyn LinearOperator) -> Result<MatrixOperator, TrafoError>
    {
        if self.num_coefficients() != other.num_coefficients()
        {
            return Err(TrafoError::DimensionMismatch);
        }
        MatrixOperator::new(self.array_representation().dot(other.array_representation()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransformationOperator
{
    Matrix(MatrixOperator),
    Barycentric(BarycentricOperator),
}

impl TransformationOperator
{
    pub fn barycentric(generating_points: &GeneratingPoints, tree: &NodeTree, options: &TransformationOptions) -> Result<Self, TrafoError>
    {
        Ok(TransformationOperator::Barycentric(BarycentricOperator::new(generating_points, tree, options)?))
    }
}

impl From<MatrixOperator> for TransformationOperator
{
    fn from(value: MatrixOperator) -> Self {
        TransformationOperator::Matrix(value)
    }
}

impl From<BarycentricOperator> for TransformationOperator
{
    fn from(value: BarycentricOperator) -> Self {
        TransformationOperator::Barycentric(value)
    }
}

impl LinearOperator for TransformationOperator
{
    fn num_coefficients(&self) -> usize {
        match self
        {
            TransformationOperator::Matrix(op) => op.num_coefficients(),
            TransformationOperator::Barycentric(op) => op.num_coefficients(),
        }
    }

    fn apply(&self, coeffs_in: &[f64]) -> Result<Vec<f64>, TrafoError> {
        match self
        {
            TransformationOperator::Matrix(op) => op.apply(coeffs_in),
            TransformationOperator::Barycentric(op) => op.apply(coeffs_in),
        }
    }

    fn array_representation(&self) -> &Array2<f64> {
        match self
        {
            TransformationOperator::Matrix(op) => op.array_representation(),
            TransformationOperator::Barycentric(op) => op.array_representation(),
        }
    }
}
