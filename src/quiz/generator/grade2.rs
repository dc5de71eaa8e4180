//! Grade 2: two-digit arithmetic within 100, order of operations

use super::{GenerationError, Strategy, ensure};
use crate::quiz::question::{Expr, QuestionKind};
use crate::quiz::rng::RandomSource;

pub(super) const STRATEGIES: &[Strategy] = &[
    Strategy {
        kind: QuestionKind::TwoDigitAddCarry,
        draw: two_digit_add_carry,
    },
    Strategy {
        kind: QuestionKind::TwoDigitAddNoCarry,
        draw: two_digit_add_no_carry,
    },
    Strategy {
        kind: QuestionKind::TwoDigitSubBorrow,
        draw: two_digit_sub_borrow,
    },
    Strategy {
        kind: QuestionKind::TwoDigitSubNoBorrow,
        draw: two_digit_sub_no_borrow,
    },
    Strategy {
        kind: QuestionKind::TwoDigitOneDigitRegroup,
        draw: two_digit_one_digit_regroup,
    },
    Strategy {
        kind: QuestionKind::ChainSub,
        draw: chain_sub,
    },
    Strategy {
        kind: QuestionKind::MixedOrder,
        draw: mixed_order,
    },
    Strategy {
        kind: QuestionKind::ChainAddUnderHundred,
        draw: chain_add_under_hundred,
    },
    Strategy {
        kind: QuestionKind::ParenSumTimes,
        draw: paren_sum_times,
    },
    Strategy {
        kind: QuestionKind::TimesParenSum,
        draw: times_paren_sum,
    },
];

fn carries(a: i64, b: i64) -> bool {
    a % 10 + b % 10 >= 10
}

fn borrows(minuend: i64, subtrahend: i64) -> bool {
    minuend % 10 < subtrahend % 10
}

/// Two two-digit addends whose sum stays below 100
fn two_digit_addends(rng: &mut dyn RandomSource) -> (i64, i64) {
    let a = rng.next_int(10, 89);
    let b = rng.next_int(10, 99 - a);
    (a, b)
}

fn two_digit_add_carry(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let (a, b) = two_digit_addends(rng);
    ensure(carries(a, b), QuestionKind::TwoDigitAddCarry, "units do not carry")?;
    Ok(Expr::add(Expr::num(a), Expr::num(b)))
}

fn two_digit_add_no_carry(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let (a, b) = two_digit_addends(rng);
    ensure(!carries(a, b), QuestionKind::TwoDigitAddNoCarry, "units carry")?;
    Ok(Expr::add(Expr::num(a), Expr::num(b)))
}

fn two_digit_sub_borrow(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(11, 99);
    let b = rng.next_int(10, a - 1);
    ensure(borrows(a, b), QuestionKind::TwoDigitSubBorrow, "units do not borrow")?;
    Ok(Expr::sub(Expr::num(a), Expr::num(b)))
}

fn two_digit_sub_no_borrow(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(10, 99);
    let b = rng.next_int(10, a);
    ensure(!borrows(a, b), QuestionKind::TwoDigitSubNoBorrow, "units borrow")?;
    Ok(Expr::sub(Expr::num(a), Expr::num(b)))
}

/// Two-digit ± one-digit that must regroup
fn two_digit_one_digit_regroup(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    const KIND: QuestionKind = QuestionKind::TwoDigitOneDigitRegroup;
    if rng.next_int(0, 1) == 0 {
        let a = rng.next_int(10, 90);
        let b = rng.next_int(1, 9);
        ensure(carries(a, b), KIND, "units do not carry")?;
        ensure(a + b < 100, KIND, "sum reaches 100")?;
        Ok(Expr::add(Expr::num(a), Expr::num(b)))
    } else {
        let a = rng.next_int(10, 99);
        let b = rng.next_int(1, 9);
        ensure(borrows(a, b), KIND, "units do not borrow")?;
        Ok(Expr::sub(Expr::num(a), Expr::num(b)))
    }
}

fn chain_sub(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(30, 99);
    let b = rng.next_int(5, 40);
    let c = rng.next_int(5, 40);
    ensure(a - b - c > 0, QuestionKind::ChainSub, "result not positive")?;
    Ok(Expr::sub(Expr::sub(Expr::num(a), Expr::num(b)), Expr::num(c)))
}

/// `a ± b×c` or `b×c ± a` without parentheses
fn mixed_order(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    const KIND: QuestionKind = QuestionKind::MixedOrder;
    let form = rng.next_int(0, 3);
    let a = rng.next_int(1, 50);
    let b = rng.next_int(2, 9);
    let c = rng.next_int(2, 9);
    let product = || Expr::mul(Expr::num(b), Expr::num(c));
    let expr = match form {
        0 => Expr::add(Expr::num(a), product()),
        1 => Expr::sub(Expr::num(a), product()),
        2 => Expr::add(product(), Expr::num(a)),
        _ => Expr::sub(product(), Expr::num(a)),
    };
    let value = expr.eval();
    ensure(value >= 0, KIND, "negative result")?;
    ensure(value < 100, KIND, "result reaches 100")?;
    Ok(expr)
}

fn chain_add_under_hundred(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(10, 50);
    let b = rng.next_int(10, 50);
    let c = rng.next_int(10, 50);
    ensure(
        a + b + c < 100,
        QuestionKind::ChainAddUnderHundred,
        "sum reaches 100",
    )?;
    Ok(Expr::add(Expr::add(Expr::num(a), Expr::num(b)), Expr::num(c)))
}

fn paren_sum_times(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(1, 20);
    let b = rng.next_int(1, 20);
    let c = rng.next_int(2, 9);
    let expr = Expr::mul(Expr::add(Expr::num(a), Expr::num(b)), Expr::num(c));
    ensure(expr.eval() < 100, QuestionKind::ParenSumTimes, "product reaches 100")?;
    Ok(expr)
}

fn times_paren_sum(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(2, 9);
    let b = rng.next_int(1, 20);
    let c = rng.next_int(1, 20);
    let expr = Expr::mul(Expr::num(a), Expr::add(Expr::num(b), Expr::num(c)));
    ensure(expr.eval() < 100, QuestionKind::TimesParenSum, "product reaches 100")?;
    Ok(expr)
}
