//! Benchmarks for the reachable-value analysis.
//!
//! Measures the analysis on synthetic functions of increasing size:
//! - Long straight-line chains (deep dominator trees)
//! - Ladders of diamonds (wide trees with many joins)
//! - Whole modules, sequential and parallel

extern crate rivscope;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rivscope::{
    analysis::{RivAnalysis, RivConfig},
    ir::{FunctionId, IrType, Module, Opcode, Operand},
};
use std::hint::black_box;

/// Appends a chain of `len` blocks, each defining one integer, to `module`.
fn build_chain(module: &mut Module, name: &str, len: usize) -> FunctionId {
    let mut fb = module.function(name, &[("a", IrType::I32)]);
    let a = fb.param(0).unwrap();
    let blocks: Vec<_> = (0..len).map(|i| fb.block(format!("b{i}"))).collect();

    for (i, &block) in blocks.iter().enumerate() {
        fb.binary(block, &format!("v{i}"), Opcode::Add, IrType::I32, Operand::Value(a), Operand::Imm(i as i64))
            .unwrap();
        match blocks.get(i + 1) {
            Some(&next) => fb.br(block, next).unwrap(),
            None => fb.ret(block, None).unwrap(),
        };
    }
    fb.finish().unwrap()
}

/// Appends `count` diamonds in sequence: head -> (left | right) -> next head.
fn build_diamonds(module: &mut Module, name: &str, count: usize) -> FunctionId {
    let mut fb = module.function(name, &[("a", IrType::I32)]);
    let a = fb.param(0).unwrap();
    let heads: Vec<_> = (0..=count).map(|i| fb.block(format!("h{i}"))).collect();

    for i in 0..count {
        let left = fb.block(format!("l{i}"));
        let right = fb.block(format!("r{i}"));
        let cond = fb
            .icmp(heads[i], &format!("c{i}"), Operand::Value(a), Operand::Imm(i as i64))
            .unwrap();
        fb.cond_br(heads[i], cond, left, right).unwrap();
        fb.binary(left, &format!("x{i}"), Opcode::Add, IrType::I32, Operand::Value(a), Operand::Imm(1))
            .unwrap();
        fb.br(left, heads[i + 1]).unwrap();
        fb.binary(right, &format!("y{i}"), Opcode::Sub, IrType::I32, Operand::Value(a), Operand::Imm(1))
            .unwrap();
        fb.br(right, heads[i + 1]).unwrap();
    }
    fb.ret(heads[count], None).unwrap();
    fb.finish().unwrap()
}

/// Benchmark straight-line functions of increasing length.
fn bench_riv_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("riv_chain");
    for len in [16, 128, 1024] {
        let mut module = Module::new("chain");
        let f = build_chain(&mut module, "chain", len);
        // Warm the dominator tree cache so only the analysis is measured
        let _ = module.func(f).unwrap().dominators();
        let analysis = RivAnalysis::new(&module, RivConfig::default());

        group.bench_with_input(BenchmarkId::from_parameter(len), &f, |b, &f| {
            b.iter(|| black_box(analysis.run(black_box(f)).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark ladders of diamonds of increasing length.
fn bench_riv_diamonds(c: &mut Criterion) {
    let mut group = c.benchmark_group("riv_diamonds");
    for count in [8, 64, 512] {
        let mut module = Module::new("diamonds");
        let f = build_diamonds(&mut module, "diamonds", count);
        let _ = module.func(f).unwrap().dominators();
        let analysis = RivAnalysis::new(&module, RivConfig::unchecked());

        group.bench_with_input(BenchmarkId::from_parameter(count), &f, |b, &f| {
            b.iter(|| black_box(analysis.run(black_box(f)).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark a module of many medium-sized functions.
fn bench_riv_module(c: &mut Criterion) {
    let mut module = Module::new("many");
    for i in 0..64 {
        build_diamonds(&mut module, &format!("f{i}"), 32);
    }
    for func in module.functions() {
        let _ = func.dominators();
    }
    let analysis = RivAnalysis::new(&module, RivConfig::default());

    c.bench_function("riv_module_sequential", |b| {
        b.iter(|| black_box(analysis.run_module().unwrap()));
    });
    c.bench_function("riv_module_parallel", |b| {
        b.iter(|| black_box(analysis.run_module_parallel().unwrap()));
    });
}

criterion_group!(benches, bench_riv_chain, bench_riv_diamonds, bench_riv_module);
criterion_main!(benches);
