use std::sync::OnceLock;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use crate::{algorithms::dds_solutions::DdsSolutions, errors::TrafoError, one_dimensional_nodes::GeneratingPoints, operators::LinearOperator,
    options::{Direction, Representation, TransformationOptions}, serialization::SerializationFormat,
    storage::{factorised::BarycentricFactorised, piecewise::BarycentricPiecewise, trafo_dict::BarycentricDict, BarycentricTransformation}, tree::{LeafLayout, NodeTree}};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum BarycentricData
{
    Dict(BarycentricDict),
    Factorised(BarycentricFactorised),
    Piecewise(BarycentricPiecewise),
}

impl BarycentricData
{
    pub fn build(dds_solutions: &DdsSolutions, tree: &NodeTree, representation: Representation) -> Self
    {
        match representation
        {
            Representation::Dict => BarycentricData::Dict(BarycentricDict::build(dds_solutions, tree)),
            Representation::Factorised => BarycentricData::Factorised(BarycentricFactorised::build(dds_solutions, tree)),
            Representation::Piecewise => BarycentricData::Piecewise(BarycentricPiecewise::build(dds_solutions, tree)),
        }
    }

    pub fn representation(&self) -> Representation
    {
        match self
        {
            BarycentricData::Dict(_) => Representation::Dict,
            BarycentricData::Factorised(_) => Representation::Factorised,
            BarycentricData::Piecewise(_) => Representation::Piecewise,
        }
    }
}

impl BarycentricTransformation for BarycentricData
{
    fn transform(&self, coeffs_in: &[f64], coeffs_out: &mut [f64]) {
        match self
        {
            BarycentricData::Dict(data) => data.transform(coeffs_in, coeffs_out),
            BarycentricData::Factorised(data) => data.transform(coeffs_in, coeffs_out),
            BarycentricData::Piecewise(data) => data.transform(coeffs_in, coeffs_out),
        }
    }

    fn merge(&self) -> Array2<f64> {
        match self
        {
            BarycentricData::Dict(data) => data.merge(),
            BarycentricData::Factorised(data) => data.merge(),
            BarycentricData::Piecewise(data) => data.merge(),
        }
    }

    fn layout(&self) -> &LeafLayout {
        match self
        {
            BarycentricData::Dict(data) => data.layout(),
            BarycentricData::Factorised(data) => data.layout(),
            BarycentricData::Piecewise(data) => data.layout(),
        }
    }
}

///
/// Basis transformation operator backed by a hierarchical (barycentric) decomposition.
///
/// The dense matrix is only reconstructed on request and kept afterwards.
///
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BarycentricOperator
{
    direction: Direction,
    data: BarycentricData,
    #[serde(skip)]
    array_representation: OnceLock<Array2<f64>>,
}

impl BarycentricOperator
{
    pub fn new(generating_points: &GeneratingPoints, tree: &NodeTree, options: &TransformationOptions) -> Result<Self, TrafoError>
    {
        let dds_solutions = DdsSolutions::compute(generating_points, tree, options)?;
        Ok(Self::from_solutions(&dds_solutions, tree, options.representation))
    }

    pub fn from_solutions(dds_solutions: &DdsSolutions, tree: &NodeTree, representation: Representation) -> Self
    {
        Self { direction: dds_solutions.direction(), data: BarycentricData::build(dds_solutions, tree, representation), array_representation: OnceLock::new() }
    }

    #[inline]
    pub fn direction(&self) -> Direction
    {
        self.direction
    }

    #[inline]
    pub fn data(&self) -> &BarycentricData
    {
        &self.data
    }

    #[inline]
    pub fn representation(&self) -> Representation
    {
        self.data.representation()
    }

    #[inline]
    pub fn layout(&self) -> &LeafLayout
    {
        self.data.layout()
    }

    ///
    /// Serializes the decomposition. The cached dense matrix is not stored.
    ///
    pub fn to_bytes(&self, format: SerializationFormat) -> Result<Vec<u8>, TrafoError>
    {
        crate::serialization::serialize(self, format)
    }

    pub fn from_bytes(buffer: &[u8], format: SerializationFormat) -> Result<Self, TrafoError>
    {
        crate::serialization::deserialize(buffer, format)
    }
}

impl LinearOperator for BarycentricOperator
{
    fn num_coefficients(&self) -> usize {
        self.data.layout().num_coefficients()
    }

    fn apply(&self, coeffs_in: &[f64]) -> Result<Vec<f64>, TrafoError> {
        if coeffs_in.len() != self.num_coefficients()
        {
            return Err(TrafoError::CoefficientLengthMismatch);
        }
        let mut coeffs_out = vec![0.0; coeffs_in.len()];
        self.data.transform(coeffs_in, &mut coeffs_out);
        Ok(coeffs_out)
    }

    fn array_representation(&self) -> &Array2<f64> {
        self.array_representation.get_or_init(||
        {
            log::warn!("building a full transformation matrix from a barycentric transformation. this is inefficient.");
            self.data.merge()
        })
    }
}

impl PartialEq for BarycentricOperator
{
    fn eq(&self, other: &Self) -> bool {
        self.direction == other.direction && self.data == other.data
    }
}
