use core::f64;
use f64::consts::PI;
use serde::{Deserialize, Serialize};
use crate::{errors::TrafoError, rules::GeneratingRule};

///
/// The 1D interpolation node coordinates of every spatial dimension.
/// Dimension `d` is indexed by the exponent in that dimension, so the first
/// `k` values are the nodes of every 1D sub-problem of size `k`.
///
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratingPoints(Vec<Vec<f64>>);

impl GeneratingPoints
{
    pub fn new(points: Vec<Vec<f64>>) -> Self
    {
        Self(points)
    }

    ///
    /// The same 1D `points` in each of the `ndim` dimensions.
    ///
    pub fn uniform(points: &[f64], ndim: usize) -> Self
    {
        Self(vec![points.to_owned(); ndim])
    }

    ///
    /// `num_points` nodes of `rule` in each of the `ndim` dimensions.
    ///
    pub fn from_rule(rule: GeneratingRule, ndim: usize, num_points: usize) -> Self
    {
        Self::uniform(&generating_values(rule, num_points), ndim)
    }

    #[inline]
    pub fn ndim(&self) -> usize
    {
        self.0.len()
    }

    #[inline]
    pub fn dim(&self, dim: usize) -> &[f64]
    {
        &self.0[dim]
    }

    ///
    /// Checks that dimension `dim` provides `num_points` values that are pairwise separated by more than `tolerance`.
    ///
    pub fn check_prefix(&self, dim: usize, num_points: usize, tolerance: f64) -> Result<(), TrafoError>
    {
        let values = self.0.get(dim).ok_or(TrafoError::DimensionMismatch)?;
        if values.len() < num_points
        {
            return Err(TrafoError::InsufficientGeneratingPoints);
        }
        let prefix = &values[..num_points];
        for (i, &xi) in prefix.iter().enumerate()
        {
            if !xi.is_finite() || prefix[..i].iter().any(|&xj| (xi - xj).abs() <= tolerance)
            {
                return Err(TrafoError::DegenerateGeneratingPoints);
            }
        }
        Ok(())
    }
}

pub fn generating_values(rule: GeneratingRule, num_points: usize) -> Vec<f64>
{
    match rule
    {
        GeneratingRule::ChebyshevLeja => leja_order(&chebyshev_lobatto_nodes(num_points)),
        GeneratingRule::ChebyshevLobatto => chebyshev_lobatto_nodes(num_points),
        GeneratingRule::Equidistant => equidistant_nodes(num_points),
    }
}

/// Return Chebyshev-Lobatto nodes cos(k*pi/(n-1)) over [-1,1], starting at 1.
pub fn chebyshev_lobatto_nodes(num_points: usize) -> Vec<f64>
{
    match num_points
    {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|k| f64::cos(PI * k as f64 / (n - 1) as f64)).collect(),
    }
}

/// Return equally spaced nodes over [-1,1], starting at -1.
pub fn equidistant_nodes(num_points: usize) -> Vec<f64>
{
    match num_points
    {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n).map(|k| -1.0 + 2.0 * k as f64 / (n - 1) as f64).collect(),
    }
}

///
/// Greedy Leja ordering: start at the value of largest magnitude, then repeatedly pick the
/// value maximising the product of distances to all values picked so far. Ties keep input order.
///
pub fn leja_order(values: &[f64]) -> Vec<f64>
{
    let mut remaining = values.to_owned();
    let mut ordered = Vec::with_capacity(values.len());
    if remaining.is_empty()
    {
        return ordered;
    }
    let mut first = 0;
    for (i, x) in remaining.iter().enumerate()
    {
        if x.abs() > remaining[first].abs()
        {
            first = i;
        }
    }
    ordered.push(remaining.remove(first));
    while !remaining.is_empty()
    {
        let mut best = 0;
        let mut best_product = -1.0;
        for (i, &x) in remaining.iter().enumerate()
        {
            let product = ordered.iter().map(|&y| (x - y).abs()).product::<f64>();
            if product > best_product
            {
                best = i;
                best_product = product;
            }
        }
        ordered.push(remaining.remove(best));
    }
    ordered
}

#[test]
fn test_chebyshev_lobatto()
{
    let nodes = chebyshev_lobatto_nodes(3);
    assert_eq!(nodes.len(), 3);
    assert!((nodes[0] - 1.0).abs() < 1e-15);
    assert!(nodes[1].abs() < 1e-15);
    assert!((nodes[2] + 1.0).abs() < 1e-15);
    assert_eq!(chebyshev_lobatto_nodes(1), vec![0.0]);
}

#[test]
fn test_leja_order()
{
    let nodes = leja_order(&chebyshev_lobatto_nodes(5));
    // 1, -1, then the interior point furthest from both ends
    assert!((nodes[0] - 1.0).abs() < 1e-15);
    assert!((nodes[1] + 1.0).abs() < 1e-15);
    assert!(nodes[2].abs() < 1e-15);
    let mut sorted = nodes.clone();
    sorted.sort_by(|a, b| b.partial_cmp(a).unwrap());
    let mut reference = chebyshev_lobatto_nodes(5);
    reference.sort_by(|a, b| b.partial_cmp(a).unwrap());
    assert_eq!(sorted, reference);
}

#[test]
fn test_check_prefix()
{
    let points = GeneratingPoints::new(vec![vec![-1.0, 0.0, 1.0, 0.0]]);
    assert!(points.check_prefix(0, 3, 1e-14).is_ok());
    assert_eq!(points.check_prefix(0, 4, 1e-14), Err(TrafoError::DegenerateGeneratingPoints));
    assert_eq!(points.check_prefix(0, 5, 1e-14), Err(TrafoError::InsufficientGeneratingPoints));
    assert_eq!(points.check_prefix(1, 1, 1e-14), Err(TrafoError::DimensionMismatch));
}

#[test]
fn test_from_rule()
{
    let points = GeneratingPoints::from_rule(GeneratingRule::Equidistant, 3, 5);
    assert_eq!(points.ndim(), 3);
    assert_eq!(points.dim(2), &[-1.0, -0.5, 0.0, 0.5, 1.0]);
}
