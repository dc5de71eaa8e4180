//! Grade 1: addition and subtraction within 20, simple two-digit work

use super::{GenerationError, Strategy, ensure};
use crate::quiz::question::{Expr, QuestionKind};
use crate::quiz::rng::RandomSource;

pub(super) const STRATEGIES: &[Strategy] = &[
    Strategy {
        kind: QuestionKind::AddWithinTen,
        draw: add_within_ten,
    },
    Strategy {
        kind: QuestionKind::SubWithinTen,
        draw: sub_within_ten,
    },
    Strategy {
        kind: QuestionKind::MakeTenAdd,
        draw: make_ten_add,
    },
    Strategy {
        kind: QuestionKind::BreakTenSub,
        draw: break_ten_sub,
    },
    Strategy {
        kind: QuestionKind::ChainAddWithinTwenty,
        draw: chain_add_within_twenty,
    },
    Strategy {
        kind: QuestionKind::TwoDigitAddOneDigitNoCarry,
        draw: two_digit_add_one_digit_no_carry,
    },
    Strategy {
        kind: QuestionKind::TwoDigitSubOneDigitNoBorrow,
        draw: two_digit_sub_one_digit_no_borrow,
    },
    Strategy {
        kind: QuestionKind::TensAdd,
        draw: tens_add,
    },
    Strategy {
        kind: QuestionKind::TensSub,
        draw: tens_sub,
    },
    Strategy {
        kind: QuestionKind::TwoDigitAddSubTens,
        draw: two_digit_add_sub_tens,
    },
];

/// Subtraction with the larger operand first
fn ordered_sub(a: i64, b: i64) -> Expr {
    Expr::sub(Expr::num(a.max(b)), Expr::num(a.min(b)))
}

fn add_within_ten(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(1, 10);
    let b = rng.next_int(1, 10);
    Ok(Expr::add(Expr::num(a), Expr::num(b)))
}

fn sub_within_ten(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(1, 10);
    let b = rng.next_int(1, 10);
    Ok(ordered_sub(a, b))
}

/// 8 + 5: the sum crosses ten
fn make_ten_add(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(2, 9);
    let b = rng.next_int(2, 9);
    ensure(a + b > 10, QuestionKind::MakeTenAdd, "sum stays below ten")?;
    Ok(Expr::add(Expr::num(a), Expr::num(b)))
}

/// 13 - 5: the subtraction borrows from the ten
fn break_ten_sub(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(11, 18);
    let b = rng.next_int(2, 9);
    ensure(a % 10 < b, QuestionKind::BreakTenSub, "no borrow from the ten")?;
    Ok(Expr::sub(Expr::num(a), Expr::num(b)))
}

fn chain_add_within_twenty(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(1, 9);
    let b = rng.next_int(1, 9);
    let c = rng.next_int(1, 9);
    ensure(
        a + b + c <= 20,
        QuestionKind::ChainAddWithinTwenty,
        "sum above 20",
    )?;
    Ok(Expr::add(Expr::add(Expr::num(a), Expr::num(b)), Expr::num(c)))
}

fn two_digit_add_one_digit_no_carry(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(10, 99);
    let b = rng.next_int(1, 9);
    ensure(
        a % 10 + b < 10,
        QuestionKind::TwoDigitAddOneDigitNoCarry,
        "units carry",
    )?;
    Ok(Expr::add(Expr::num(a), Expr::num(b)))
}

fn two_digit_sub_one_digit_no_borrow(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(10, 99);
    let b = rng.next_int(1, 9);
    ensure(
        a % 10 >= b,
        QuestionKind::TwoDigitSubOneDigitNoBorrow,
        "units borrow",
    )?;
    Ok(Expr::sub(Expr::num(a), Expr::num(b)))
}

fn tens_add(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(1, 9) * 10;
    let b = rng.next_int(1, 9) * 10;
    ensure(a + b <= 100, QuestionKind::TensAdd, "sum above 100")?;
    Ok(Expr::add(Expr::num(a), Expr::num(b)))
}

fn tens_sub(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(1, 9) * 10;
    let b = rng.next_int(1, 9) * 10;
    Ok(ordered_sub(a, b))
}

fn two_digit_add_sub_tens(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    const KIND: QuestionKind = QuestionKind::TwoDigitAddSubTens;
    let a = rng.next_int(10, 99);
    let b = rng.next_int(1, 9) * 10;
    if rng.next_int(0, 1) == 0 {
        ensure(a + b <= 99, KIND, "sum leaves two digits")?;
        Ok(Expr::add(Expr::num(a), Expr::num(b)))
    } else {
        ensure(a >= b, KIND, "negative difference")?;
        Ok(Expr::sub(Expr::num(a), Expr::num(b)))
    }
}
