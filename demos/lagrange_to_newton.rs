use barytrafo::{errors::TrafoError, BarycentricOperator, Direction, GeneratingPoints, LinearOperator, NodeTree, Representation, TransformationOptions};

fn main() -> Result<(), TrafoError>
{
    // Total degree 2 in two dimensions, first dimension varying fastest.
    let exponents = [0, 0, 1, 0, 2, 0, 0, 1, 1, 1, 0, 2];
    let tree = NodeTree::from_exponents(&exponents, 2)?;
    let points = GeneratingPoints::uniform(&[-1.0, 0.0, 1.0], 2);

    // f(x, y) = x^2 + y at the unisolvent nodes (points[exponent])
    let values: Vec<f64> = exponents.chunks_exact(2).map(|e|
    {
        let (x, y) = (points.dim(0)[e[0]], points.dim(1)[e[1]]);
        x * x + y
    }).collect();

    let l2n = BarycentricOperator::new(&points, &tree, &TransformationOptions::new(Direction::LagrangeToNewton, Representation::Dict))?;
    let n2l = BarycentricOperator::new(&points, &tree, &TransformationOptions::new(Direction::NewtonToLagrange, Representation::Factorised))?;
    let newton = l2n.apply(&values)?;
    let lagrange = n2l.apply(&newton)?;
    for (e, (c, v)) in exponents.chunks_exact(2).zip(newton.iter().zip(&lagrange))
    {
        println!("{:?}: newton={c:+.4} lagrange={v:+.4}", e);
    }
    Ok(())
}
