use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId};
use barytrafo::{errors::TrafoError, rules::GeneratingRule, BarycentricOperator, Direction, GeneratingPoints, LinearOperator, NodeTree, Representation, TransformationOptions};

/// Total degree multi-indices, first dimension varying fastest.
fn total_degree_exponents(ndim: usize, degree: usize) -> Vec<usize>
{
    let base = degree + 1;
    let mut exponents = Vec::new();
    let mut index = vec![0; ndim];
    for i in 0..base.pow(ndim as u32)
    {
        let mut rest = i;
        for value in index.iter_mut()
        {
            *value = rest % base;
            rest /= base;
        }
        if index.iter().sum::<usize>() <= degree
        {
            exponents.extend_from_slice(&index);
        }
    }
    exponents
}

fn build_operator(ndim: usize, degree: usize, representation: Representation) -> Result<BarycentricOperator, TrafoError>
{
    let tree = NodeTree::from_exponents(&total_degree_exponents(ndim, degree), ndim)?;
    let points = GeneratingPoints::from_rule(GeneratingRule::ChebyshevLeja, ndim, degree + 1);
    BarycentricOperator::new(&points, &tree, &TransformationOptions::new(Direction::LagrangeToNewton, representation))
}

fn run_build(c: &mut Criterion)
{
    let mut group = c.benchmark_group("build_4d_degree_8");
    for representation in [Representation::Dict, Representation::Factorised, Representation::Piecewise]
    {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{representation:?}")), &representation,
            |b, &representation| b.iter(|| build_operator(4, 8, representation).unwrap()));
    }
    group.finish();
}

fn run_apply(c: &mut Criterion)
{
    let mut group = c.benchmark_group("apply_4d_degree_8");
    for representation in [Representation::Dict, Representation::Factorised, Representation::Piecewise]
    {
        let op = build_operator(4, 8, representation).unwrap();
        let coeffs: Vec<f64> = (0..op.num_coefficients()).map(|i| (i as f64).sin()).collect();
        group.bench_with_input(BenchmarkId::from_parameter(format!("{representation:?}")), &coeffs,
            |b, coeffs| b.iter(|| op.apply(coeffs).unwrap()));
    }
    group.finish();
}

criterion_group!(benches, run_build, run_apply);
criterion_main!(benches);
