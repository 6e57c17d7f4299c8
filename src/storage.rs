use ndarray::Array2;
use crate::tree::LeafLayout;

pub mod factorised;
pub mod piecewise;
pub mod trafo_dict;

///
/// A hierarchically decomposed linear transformation of coefficient vectors.
///
pub trait BarycentricTransformation
{
    /// Adds the transformed `coeffs_in` to `coeffs_out`, which must be zero initialised and of the same length.
    fn transform(&self, coeffs_in: &[f64], coeffs_out: &mut [f64]);
    /// Reconstructs the global (dense) transformation matrix.
    fn merge(&self) -> Array2<f64>;
    fn layout(&self) -> &LeafLayout;
}
