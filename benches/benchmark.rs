use criterion::{black_box, criterion_group, criterion_main, Criterion};
use exprscope::{evaluate, new_engine, parse, Builtins, Environment, Scope};

const INPUT: &str = "max(x + y, 5, 3 * x * y) * 2.5 ** 2 >= 10 and not (name == 'bench' or x > y)";

fn bench_scope() -> Scope {
    let scope = Environment::new();
    {
        let mut env = scope.borrow_mut();
        env.define("x", 1).unwrap();
        env.define("y", 2).unwrap();
        env.define("name", "expr").unwrap();
        Builtins::register(&mut env).unwrap();
    }
    scope
}

fn expression_benchmark(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| parse(black_box(INPUT)).unwrap())
    });

    let scope = bench_scope();
    let expression = parse(INPUT).unwrap();
    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box(&expression), &scope).unwrap())
    });

    c.bench_function("engine", |b| {
        b.iter(|| {
            let mut engine = new_engine(bench_scope());
            engine.run(black_box(INPUT)).unwrap();
        })
    });
}

criterion_group!(benches, expression_benchmark);
criterion_main!(benches);
