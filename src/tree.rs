use std::{cmp::Ordering, ops::Range};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use crate::errors::TrafoError;

///
/// Offsets and widths of the leaf blocks in the flat coefficient vector.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafLayout
{
    pub positions: Vec<usize>,
    pub sizes: Vec<usize>,
}

impl LeafLayout
{
    #[inline]
    pub fn num_leaves(&self) -> usize
    {
        self.positions.len()
    }

    ///
    /// Total number of coefficients covered by the leaves.
    ///
    pub fn num_coefficients(&self) -> usize
    {
        match (self.positions.last(), self.sizes.last())
        {
            (Some(position), Some(size)) => position + size,
            _ => 0,
        }
    }

    #[inline]
    pub fn window(&self, leaf: usize) -> Range<usize>
    {
        self.positions[leaf]..self.positions[leaf] + self.sizes[leaf]
    }
}

///
/// Nested node subdivision of a downward-closed multi-index set.
///
/// Dimension 0 holds the leaves, dimension `ndim-1` holds the single root. A node at dimension `d`
/// groups all exponents sharing their values in the dimensions above `d`; its direct children are
/// the nodes at `d-1` whose coefficients start inside the node's range.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeTree
{
    split_positions: Vec<Vec<usize>>,
    subtree_sizes: Vec<Vec<usize>>,
    problem_sizes: Vec<Vec<usize>>,
}

impl NodeTree
{
    ///
    /// Creates a tree from externally supplied metadata, indexed `[dim][node]`.
    /// The structure is checked once here so that the transformation kernels can index without guards.
    ///
    pub fn new(split_positions: Vec<Vec<usize>>, subtree_sizes: Vec<Vec<usize>>, problem_sizes: Vec<Vec<usize>>) -> Result<Self, TrafoError>
    {
        let tree = Self { split_positions, subtree_sizes, problem_sizes };
        tree.validate()?;
        Ok(tree)
    }

    ///
    /// Builds the tree of a downward-closed exponent set. `exponents` holds `ndim` entries per multi-index,
    /// ordered lexicographically with the first dimension varying fastest.
    ///
    pub fn from_exponents(exponents: &[usize], ndim: usize) -> Result<Self, TrafoError>
    {
        if ndim == 0 || exponents.is_empty() || exponents.len() % ndim != 0
        {
            return Err(TrafoError::InvalidExponents);
        }
        let rows: Vec<&[usize]> = exponents.chunks_exact(ndim).collect();
        for pair in rows.windows(2)
        {
            if pair[0].iter().rev().cmp(pair[1].iter().rev()) != Ordering::Less
            {
                return Err(TrafoError::InvalidExponents);
            }
        }
        let set: FxHashSet<&[usize]> = rows.iter().copied().collect();
        let mut lowered = vec![0; ndim];
        for row in &rows
        {
            for d in 0..ndim
            {
                if row[d] > 0
                {
                    lowered.copy_from_slice(row);
                    lowered[d] -= 1;
                    if !set.contains(lowered.as_slice())
                    {
                        return Err(TrafoError::InvalidExponents);
                    }
                }
            }
        }

        let num_coefficients = rows.len();
        let mut split_positions = vec![Vec::new(); ndim];
        let mut subtree_sizes = vec![Vec::new(); ndim];
        for d in 0..ndim
        {
            for (i, row) in rows.iter().enumerate()
            {
                if i == 0 || rows[i - 1][d + 1..] != row[d + 1..]
                {
                    split_positions[d].push(i);
                }
            }
            let splits = &split_positions[d];
            subtree_sizes[d] = splits.iter().enumerate().map(|(node, &start)|
            {
                splits.get(node + 1).copied().unwrap_or(num_coefficients) - start
            }).collect();
        }

        let mut tree = Self { split_positions, subtree_sizes, problem_sizes: Vec::with_capacity(ndim) };
        tree.problem_sizes.push(tree.subtree_sizes[0].clone());
        for d in 1..ndim
        {
            let sizes = (0..tree.num_nodes(d)).map(|node| tree.child_range(d, node).len()).collect();
            tree.problem_sizes.push(sizes);
        }
        tree.validate()?;
        Ok(tree)
    }

    fn validate(&self) -> Result<(), TrafoError>
    {
        let ndim = self.split_positions.len();
        if ndim == 0 || self.subtree_sizes.len() != ndim || self.problem_sizes.len() != ndim
        {
            return Err(TrafoError::InvalidTreeStructure);
        }
        if self.split_positions[ndim - 1].len() != 1
        {
            return Err(TrafoError::InvalidTreeStructure);
        }
        let mut total = None;
        for d in 0..ndim
        {
            let splits = &self.split_positions[d];
            let sizes = &self.subtree_sizes[d];
            if splits.is_empty() || sizes.len() != splits.len() || self.problem_sizes[d].len() != splits.len()
            {
                return Err(TrafoError::InvalidTreeStructure);
            }
            // contiguous partition starting at 0
            let mut position = 0;
            for (&start, &size) in splits.iter().zip(sizes)
            {
                if start != position || size == 0
                {
                    return Err(TrafoError::InvalidTreeStructure);
                }
                position += size;
            }
            if *total.get_or_insert(position) != position
            {
                return Err(TrafoError::InvalidTreeStructure);
            }
        }
        for d in 0..ndim
        {
            let max_size = self.problem_sizes[d][0];
            for node in 0..self.num_nodes(d)
            {
                let expected = if d == 0
                {
                    self.subtree_sizes[0][node]
                }
                else
                {
                    if self.split_positions[d - 1].binary_search(&self.split_positions[d][node]).is_err()
                    {
                        return Err(TrafoError::InvalidTreeStructure);
                    }
                    self.child_range(d, node).len()
                };
                let size = self.problem_sizes[d][node];
                if size != expected || size > max_size
                {
                    return Err(TrafoError::InvalidTreeStructure);
                }
            }
        }
        Ok(())
    }

    #[inline]
    pub fn ndim(&self) -> usize
    {
        self.split_positions.len()
    }

    #[inline]
    pub fn num_nodes(&self, dim: usize) -> usize
    {
        self.split_positions[dim].len()
    }

    #[inline]
    pub fn num_leaves(&self) -> usize
    {
        self.num_nodes(0)
    }

    pub fn num_coefficients(&self) -> usize
    {
        self.split_positions[0].last().copied().unwrap_or(0) + self.subtree_sizes[0].last().copied().unwrap_or(0)
    }

    ///
    /// Size of the local 1D problem of `node`: the number of direct children, or the leaf width in dimension 0.
    ///
    #[inline]
    pub fn problem_size(&self, dim: usize, node: usize) -> usize
    {
        self.problem_sizes[dim][node]
    }

    /// The first node of every dimension carries the largest problem.
    #[inline]
    pub fn max_problem_size(&self, dim: usize) -> usize
    {
        self.problem_sizes[dim][0]
    }

    pub fn problem_sizes(&self) -> &[Vec<usize>]
    {
        &self.problem_sizes
    }

    pub fn split_positions(&self) -> &[Vec<usize>]
    {
        &self.split_positions
    }

    pub fn subtree_sizes(&self) -> &[Vec<usize>]
    {
        &self.subtree_sizes
    }

    ///
    /// Indices of the direct children of `node` among the nodes of dimension `dim-1`.
    ///
    pub fn child_range(&self, dim: usize, node: usize) -> Range<usize>
    {
        debug_assert!(dim > 0, "nodes in the lowest dimension have no children");
        let start = self.split_positions[dim][node];
        let end = start + self.subtree_sizes[dim][node];
        let children = &self.split_positions[dim - 1];
        children.partition_point(|&p| p < start)..children.partition_point(|&p| p < end)
    }

    pub fn leaf_layout(&self) -> LeafLayout
    {
        LeafLayout { positions: self.split_positions[0].clone(), sizes: self.subtree_sizes[0].clone() }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::test_utilities::total_degree_exponents;

    #[test]
    fn test_total_degree_2d()
    {
        let exponents = total_degree_exponents(2, 2);
        let tree = NodeTree::from_exponents(&exponents, 2).unwrap();
        assert_eq!(tree.ndim(), 2);
        assert_eq!(tree.num_coefficients(), 6);
        assert_eq!(tree.split_positions(), &[vec![0, 3, 5], vec![0]]);
        assert_eq!(tree.subtree_sizes(), &[vec![3, 2, 1], vec![6]]);
        assert_eq!(tree.problem_sizes(), &[vec![3, 2, 1], vec![3]]);
        assert_eq!(tree.child_range(1, 0), 0..3);
        let layout = tree.leaf_layout();
        assert_eq!(layout.positions, vec![0, 3, 5]);
        assert_eq!(layout.sizes, vec![3, 2, 1]);
        assert_eq!(layout.window(1), 3..5);
        assert_eq!(layout.num_coefficients(), 6);
    }

    #[test]
    fn test_total_degree_3d_children()
    {
        let exponents = total_degree_exponents(3, 2);
        let tree = NodeTree::from_exponents(&exponents, 3).unwrap();
        assert_eq!(tree.num_coefficients(), 10);
        assert_eq!(tree.problem_sizes()[2], vec![3]);
        // dim 1 nodes: e2 = 0 (3 children), e2 = 1 (2 children), e2 = 2 (1 child)
        assert_eq!(tree.problem_sizes()[1], vec![3, 2, 1]);
        assert_eq!(tree.child_range(2, 0), 0..3);
        assert_eq!(tree.child_range(1, 0), 0..3);
        assert_eq!(tree.child_range(1, 1), 3..5);
        assert_eq!(tree.child_range(1, 2), 5..6);
        assert_eq!(tree.problem_sizes()[0], vec![3, 2, 1, 2, 1, 1]);
    }

    #[test]
    fn test_single_node()
    {
        let tree = NodeTree::from_exponents(&[0], 1).unwrap();
        assert_eq!(tree.num_leaves(), 1);
        assert_eq!(tree.max_problem_size(0), 1);
    }

    #[test]
    fn test_invalid_exponents()
    {
        // unordered
        assert_eq!(NodeTree::from_exponents(&[1, 0, 0, 0], 2), Err(TrafoError::InvalidExponents));
        // not downward closed: (0,1) without (0,0)
        assert_eq!(NodeTree::from_exponents(&[1, 0, 0, 1], 2), Err(TrafoError::InvalidExponents));
        // duplicate
        assert_eq!(NodeTree::from_exponents(&[0, 0, 0, 0], 2), Err(TrafoError::InvalidExponents));
        assert_eq!(NodeTree::from_exponents(&[0, 0, 0], 2), Err(TrafoError::InvalidExponents));
    }

    #[test]
    fn test_invalid_metadata()
    {
        let valid = NodeTree::new(vec![vec![0, 3, 5], vec![0]], vec![vec![3, 2, 1], vec![6]], vec![vec![3, 2, 1], vec![3]]);
        assert!(valid.is_ok());
        // gap between leaves
        let gap = NodeTree::new(vec![vec![0, 4, 5], vec![0]], vec![vec![3, 1, 1], vec![6]], vec![vec![3, 1, 1], vec![3]]);
        assert_eq!(gap, Err(TrafoError::InvalidTreeStructure));
        // wrong child count
        let children = NodeTree::new(vec![vec![0, 3, 5], vec![0]], vec![vec![3, 2, 1], vec![6]], vec![vec![3, 2, 1], vec![2]]);
        assert_eq!(children, Err(TrafoError::InvalidTreeStructure));
        // first node is not the largest
        let order = NodeTree::new(vec![vec![0, 1, 3], vec![0]], vec![vec![1, 2, 3], vec![6]], vec![vec![1, 2, 3], vec![3]]);
        assert_eq!(order, Err(TrafoError::InvalidTreeStructure));
        // two roots
        let roots = NodeTree::new(vec![vec![0, 3]], vec![vec![3, 3]], vec![vec![3, 3]]);
        assert_eq!(roots, Err(TrafoError::InvalidTreeStructure));
    }
}
