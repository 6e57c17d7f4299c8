use ndarray::{s, Array2};
use crate::{algorithms::dds_solutions::DdsSolutions, storage::trafo_dict::{NodePair, TrafoDict}, tree::NodeTree};

///
/// Enumerates the child node combinations of one parent pair at `dim_par` together with their factor.
///
/// `factors` is the (triangular) solution of the parent combination and holds one factor per
/// combination of children. A child `l` of the left parent is only combined with children of the
/// right parent at the same or a later relative position: all other factors are zero.
///
pub(crate) fn child_combinations(parent: NodePair, factors: &Array2<f64>, dim_par: usize, tree: &NodeTree) -> Vec<(NodePair, f64)>
{
    let children_l = tree.child_range(dim_par, parent.left);
    let children_r = tree.child_range(dim_par, parent.right);
    let mut combinations = Vec::with_capacity(children_l.len() * children_r.len());
    // ATTENTION: relative and absolute indexing required
    for (idx_l_rel, idx_l_abs) in children_l.enumerate()
    {
        for (idx_r_rel, idx_r_abs) in children_r.clone().enumerate().skip(idx_l_rel)
        {
            combinations.push((NodePair::new(idx_l_abs, idx_r_abs), factors[[idx_r_rel, idx_l_rel]]));
        }
    }
    combinations
}

///
/// Expands the solutions of all node combinations in dimension `dim_par` into the solutions of
/// their child combinations in dimension `dim_par - 1`. The solution of a child combination is the
/// top left part of the maximal 1D solution of the child dimension, scaled by the parent factor.
///
pub fn expand_solution(prev_solutions: &TrafoDict, dds_solution_max: &Array2<f64>, dim_par: usize, tree: &NodeTree) -> TrafoDict
{
    let dim_child = dim_par - 1;
    let expand_pair = |&(pair, factors): &(&NodePair, &Array2<f64>)|
    {
        child_combinations(*pair, factors, dim_par, tree).into_iter().map(|(child, factor)|
        {
            let rows = tree.problem_size(dim_child, child.right);
            let cols = tree.problem_size(dim_child, child.left);
            (child, dds_solution_max.slice(s![..rows, ..cols]).mapv(|value| value * factor))
        }).collect::<Vec<_>>()
    };
    // parent pairs never present are zero and so are all of their children
    let parents: Vec<(&NodePair, &Array2<f64>)> = prev_solutions.iter().collect();
    #[cfg(feature = "rayon")]
    let expanded: Vec<Vec<(NodePair, Array2<f64>)>> =
    {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        parents.par_iter().map(expand_pair).collect()
    };
    #[cfg(not(feature = "rayon"))]
    let expanded: Vec<Vec<(NodePair, Array2<f64>)>> = parents.iter().map(expand_pair).collect();

    let mut solutions = TrafoDict::with_capacity(expanded.iter().map(|pieces| pieces.len()).sum());
    for (pair, piece) in expanded.into_iter().flatten()
    {
        solutions.insert(pair, piece);
    }
    solutions
}

fn root_solution(dds_solutions: &DdsSolutions) -> TrafoDict
{
    let top = dds_solutions.ndim() - 1;
    [(NodePair::new(0, 0), dds_solutions.solution(top).clone())].into_iter().collect()
}

///
/// Divided difference scheme for multiple dimensions, evaluated directly on the leaf level.
///
/// Starting from the maximal solution of the single root combination in the coarsest dimension,
/// every step expands the node combinations of one dimension into those of the next finer one.
/// Returns one triangular matrix piece for every combination of leaves.
///
pub fn barycentric_dds(dds_solutions: &DdsSolutions, tree: &NodeTree) -> TrafoDict
{
    let mut curr_solutions = root_solution(dds_solutions);
    for dim_idx_par in (1..tree.ndim()).rev()
    {
        curr_solutions = expand_solution(&curr_solutions, dds_solutions.solution(dim_idx_par - 1), dim_idx_par, tree);
    }
    log::debug!("barycentric DDS: {} dimensions, {} leaves, {} matrix pieces", tree.ndim(), tree.num_leaves(), curr_solutions.len());
    curr_solutions
}

///
/// The scalar factor of every leaf combination: the leaf piece of `(l, r)` equals the top left
/// `(size(r), size(l))` block of the dimension 0 maximal solution times this factor.
///
pub fn barycentric_factors(dds_solutions: &DdsSolutions, tree: &NodeTree) -> Vec<(NodePair, f64)>
{
    if tree.ndim() == 1
    {
        return vec![(NodePair::new(0, 0), 1.0)];
    }
    let mut curr_solutions = root_solution(dds_solutions);
    for dim_idx_par in (2..tree.ndim()).rev()
    {
        curr_solutions = expand_solution(&curr_solutions, dds_solutions.solution(dim_idx_par - 1), dim_idx_par, tree);
    }
    curr_solutions.iter().flat_map(|(pair, factors)| child_combinations(*pair, factors, 1, tree)).collect()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use ndarray::array;
    use crate::{one_dimensional_nodes::GeneratingPoints, options::{Direction, TransformationOptions}, rules::GeneratingRule, test_utilities::total_degree_exponents};

    fn build(ndim: usize, degree: usize, direction: Direction) -> (DdsSolutions, NodeTree)
    {
        let tree = NodeTree::from_exponents(&total_degree_exponents(ndim, degree), ndim).unwrap();
        let points = GeneratingPoints::from_rule(GeneratingRule::ChebyshevLeja, ndim, degree + 1);
        let options = TransformationOptions { direction, ..Default::default() };
        (DdsSolutions::compute(&points, &tree, &options).unwrap(), tree)
    }

    #[test]
    fn test_trivial_size()
    {
        let tree = NodeTree::from_exponents(&[0], 1).unwrap();
        let points = GeneratingPoints::new(vec![vec![0.3]]);
        let solutions = DdsSolutions::compute(&points, &tree, &TransformationOptions::default()).unwrap();
        let dict = barycentric_dds(&solutions, &tree);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get(NodePair::new(0, 0)), Some(&array![[1.0]]));
        assert_eq!(barycentric_factors(&solutions, &tree), vec![(NodePair::new(0, 0), 1.0)]);
    }

    #[test]
    fn test_one_dimension_is_1d_solution()
    {
        let (solutions, tree) = build(1, 6, Direction::LagrangeToNewton);
        let dict = barycentric_dds(&solutions, &tree);
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get(NodePair::new(0, 0)), Some(solutions.solution(0)));
    }

    #[test]
    fn test_two_dimensions()
    {
        let tree = NodeTree::from_exponents(&total_degree_exponents(2, 2), 2).unwrap();
        let points = GeneratingPoints::uniform(&[-1.0, 0.0, 1.0], 2);
        let solutions = DdsSolutions::compute(&points, &tree, &TransformationOptions::default()).unwrap();
        let dict = barycentric_dds(&solutions, &tree);
        // every leaf pair of the single root combination is lower triangular
        let keys: Vec<NodePair> = dict.keys().copied().collect();
        assert_eq!(keys, vec![NodePair::new(0, 0), NodePair::new(0, 1), NodePair::new(0, 2), NodePair::new(1, 1), NodePair::new(1, 2), NodePair::new(2, 2)]);
        let d = array![[1.0, 0.0, 0.0], [-1.0, 1.0, 0.0], [0.5, -1.0, 0.5]];
        assert_eq!(dict.get(NodePair::new(0, 0)), Some(&d));
        assert_eq!(dict.get(NodePair::new(0, 1)), Some(&(d.slice(s![..2, ..3]).mapv(|v| -v))));
        assert_eq!(dict.get(NodePair::new(0, 2)), Some(&(d.slice(s![..1, ..3]).mapv(|v| 0.5 * v))));
        assert_eq!(dict.get(NodePair::new(1, 2)), Some(&(d.slice(s![..1, ..2]).mapv(|v| -v))));
        assert_eq!(dict.get(NodePair::new(2, 2)), Some(&array![[0.5]]));
    }

    #[test]
    fn test_triangularity()
    {
        for ndim in 1..=4
        {
            let (solutions, tree) = build(ndim, 3, Direction::LagrangeToNewton);
            let dict = barycentric_dds(&solutions, &tree);
            for (pair, piece) in dict.iter()
            {
                assert!(pair.left <= pair.right);
                assert_eq!(piece.dim(), (tree.problem_size(0, pair.right), tree.problem_size(0, pair.left)));
                if pair.is_diagonal()
                {
                    for ((i, j), &value) in piece.indexed_iter()
                    {
                        if j > i
                        {
                            assert_eq!(value, 0.0);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_factors_match_pieces()
    {
        for direction in [Direction::LagrangeToNewton, Direction::NewtonToLagrange]
        {
            let (solutions, tree) = build(3, 4, direction);
            let dict = barycentric_dds(&solutions, &tree);
            let factors = barycentric_factors(&solutions, &tree);
            assert_eq!(factors.len(), dict.len());
            for (pair, factor) in factors
            {
                let rows = tree.problem_size(0, pair.right);
                let cols = tree.problem_size(0, pair.left);
                let expected = solutions.sub_block(0, rows, cols).mapv(|v| v * factor);
                assert_eq!(dict.get(pair), Some(&expected));
            }
        }
    }

    #[test]
    fn test_determinism()
    {
        let (solutions, tree) = build(4, 4, Direction::LagrangeToNewton);
        let first = barycentric_dds(&solutions, &tree);
        let second = barycentric_dds(&solutions, &tree);
        assert_eq!(first, second);
        assert!(first.keys().eq(second.keys()));
    }
}
