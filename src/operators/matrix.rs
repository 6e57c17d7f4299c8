use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use crate::{errors::TrafoError, operators::LinearOperator};

///
/// A transformation given by its dense matrix.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatrixOperator
{
    matrix: Array2<f64>,
}

impl MatrixOperator
{
    pub fn new(matrix: Array2<f64>) -> Result<Self, TrafoError>
    {
        if !matrix.is_square()
        {
            return Err(TrafoError::DimensionMismatch);
        }
        Ok(Self { matrix })
    }

    pub fn into_inner(self) -> Array2<f64>
    {
        self.matrix
    }
}

impl LinearOperator for MatrixOperator
{
    fn num_coefficients(&self) -> usize {
        self.matrix.nrows()
    }

    fn apply(&self, coeffs_in: &[f64]) -> Result<Vec<f64>, TrafoError> {
        if coeffs_in.len() != self.num_coefficients()
        {
            return Err(TrafoError::CoefficientLengthMismatch);
        }
        Ok(self.matrix.dot(&ArrayView1::from(coeffs_in)).to_vec())
    }

    fn array_representation(&self) -> &Array2<f64> {
        &self.matrix
    }
}
