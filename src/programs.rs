//! Sample programs used by the integration tests and the benchmark driver.
//!
//! These are ordinary consumers of the `expr` builder sugar: tree
//! construction sugar, not part of the evaluation core itself.

use crate::expr::{binary, constant, load, sequence, store, while_, BinOp, Expr};

/// Computes a Fibonacci-style loop, per §8 scenario 3: memory[0] is read as
/// the iteration count (the caller sets it, typically to 1000), and the
/// program returns `m[1]` after counting `m[0]` down to zero.
///
/// Layout: `m[1]`, `m[2]` hold the running pair; `m[3]` is scratch for the
/// next value.
pub fn fibonacci() -> Expr {
    sequence([
        store(constant(1), constant(0.0)),
        store(constant(2), constant(1.0)),
        while_(
            load(constant(0)),
            sequence([
                store(constant(3), binary(BinOp::Add, load(constant(1)), load(constant(2)))),
                store(constant(1), load(constant(2))),
                store(constant(2), load(constant(3))),
                store(constant(0), binary(BinOp::Sub, load(constant(0)), constant(1.0))),
            ]),
        ),
        load(constant(1)),
    ])
}

/// Insertion-sorts `m[1..=n]` in place (`m[0]` holds `n`), then returns the
/// sum of the sorted array at the odd indices `1, 3, 5, ..., n-1`, per §8
/// scenario 4.
///
/// Working cells above the array: `m[101]` outer index `i`, `m[102]` the
/// key being inserted, `m[103]` inner index `j`, `m[104]` the running sum,
/// `m[105]` the summation index `k`.
pub fn insertion_sort_alternating_sum() -> Expr {
    const I: i32 = 101;
    const KEY: i32 = 102;
    const J: i32 = 103;
    const SUM: i32 = 104;
    const K: i32 = 105;

    let sort = sequence([
        store(constant(I), constant(2.0)),
        while_(
            binary(BinOp::Lte, load(constant(I)), load(constant(0))),
            sequence([
                store(constant(KEY), load(load(constant(I)))),
                store(constant(J), binary(BinOp::Sub, load(constant(I)), constant(1.0))),
                while_(
                    binary(
                        BinOp::And,
                        binary(BinOp::Gte, load(constant(J)), constant(1.0)),
                        binary(BinOp::Gt, load(load(constant(J))), load(constant(KEY))),
                    ),
                    sequence([
                        store(
                            binary(BinOp::Add, load(constant(J)), constant(1.0)),
                            load(load(constant(J))),
                        ),
                        store(constant(J), binary(BinOp::Sub, load(constant(J)), constant(1.0))),
                    ]),
                ),
                store(
                    binary(BinOp::Add, load(constant(J)), constant(1.0)),
                    load(constant(KEY)),
                ),
                store(constant(I), binary(BinOp::Add, load(constant(I)), constant(1.0))),
            ]),
        ),
    ]);

    let sum = sequence([
        store(constant(K), constant(1.0)),
        store(constant(SUM), constant(0.0)),
        while_(
            binary(BinOp::Lte, load(constant(K)), load(constant(0))),
            sequence([
                store(constant(SUM), binary(BinOp::Add, load(constant(SUM)), load(load(constant(K))))),
                store(constant(K), binary(BinOp::Add, load(constant(K)), constant(2.0))),
            ]),
        ),
        load(constant(SUM)),
    ]);

    sequence([sort, sum])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::lower;
    use crate::compiler::compile;
    use crate::context::Context;
    use crate::evaluator::evaluate;
    use crate::vm::run;

    fn seeded_fibonacci_context(n: f64) -> Context {
        let mut ctx = Context::new(256);
        ctx.set(0.0, n);
        ctx
    }

    fn seeded_sort_context() -> Context {
        let mut ctx = Context::new(256);
        ctx.set(0.0, 100.0);
        for i in 1..=100 {
            ctx.set(i as f64, (100 - i) as f64);
        }
        ctx
    }

    #[test]
    fn fibonacci_agrees_across_all_three_backends() {
        let tree = fibonacci();

        let mut ctx_eval = seeded_fibonacci_context(30.0);
        let eval_result = evaluate(&tree, &mut ctx_eval);

        let mut ctx_closure = seeded_fibonacci_context(30.0);
        let closure_result = lower(&tree).call(&mut ctx_closure);

        let mut ctx_vm = seeded_fibonacci_context(30.0);
        let vm_result = run(&compile(&tree), &mut ctx_vm).unwrap();

        assert_eq!(eval_result, closure_result);
        assert_eq!(eval_result, vm_result);
        assert_eq!(eval_result, 832_040.0);
    }

    #[test]
    fn insertion_sort_produces_ascending_array_and_matching_sum() {
        let tree = insertion_sort_alternating_sum();

        let mut ctx = seeded_sort_context();
        let result = evaluate(&tree, &mut ctx);

        for i in 1..100 {
            assert!(ctx.get(i as f64) <= ctx.get((i + 1) as f64), "index {i} out of order");
        }
        let expected_sum: f64 = (1..=100).step_by(2).map(|i| ctx.get(i as f64)).sum();
        assert_eq!(result, expected_sum);
    }

    #[test]
    fn insertion_sort_agrees_across_all_three_backends() {
        let tree = insertion_sort_alternating_sum();

        let mut ctx_eval = seeded_sort_context();
        let eval_result = evaluate(&tree, &mut ctx_eval);

        let mut ctx_closure = seeded_sort_context();
        let closure_result = lower(&tree).call(&mut ctx_closure);

        let mut ctx_vm = seeded_sort_context();
        let vm_result = run(&compile(&tree), &mut ctx_vm).unwrap();

        assert_eq!(eval_result, closure_result);
        assert_eq!(eval_result, vm_result);
        assert_eq!(ctx_eval.get(50.0), ctx_vm.get(50.0));
    }
}
