//! Grade 3: multiplication with mental-math shortcuts
//!
//! None of these draws can miss: the digit-pattern identities are built
//! directly from the pattern instead of being sampled and filtered.

use super::{GenerationError, Strategy};
use crate::quiz::question::{Expr, QuestionKind};
use crate::quiz::rng::RandomSource;

pub(super) const STRATEGIES: &[Strategy] = &[
    Strategy {
        kind: QuestionKind::TwoDigitTimesEleven,
        draw: two_digit_times_eleven,
    },
    Strategy {
        kind: QuestionKind::RoundTimesOneDigit,
        draw: round_times_one_digit,
    },
    Strategy {
        kind: QuestionKind::TeenTimesTeen,
        draw: teen_times_teen,
    },
    Strategy {
        kind: QuestionKind::EndsInOne,
        draw: ends_in_one,
    },
    Strategy {
        kind: QuestionKind::TwoDigitTimesNinetyNine,
        draw: two_digit_times_ninety_nine,
    },
    Strategy {
        kind: QuestionKind::TwoDigitTimesHundredOne,
        draw: two_digit_times_hundred_one,
    },
    Strategy {
        kind: QuestionKind::SameTensUnitsSumTen,
        draw: same_tens_units_sum_ten,
    },
    Strategy {
        kind: QuestionKind::SameUnitsTensSumTen,
        draw: same_units_tens_sum_ten,
    },
    Strategy {
        kind: QuestionKind::ThreeDigitTimesEleven,
        draw: three_digit_times_eleven,
    },
];

fn times(a: i64, b: i64) -> Result<Expr, GenerationError> {
    Ok(Expr::mul(Expr::num(a), Expr::num(b)))
}

fn two_digit_times_eleven(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    times(rng.next_int(10, 99), 11)
}

/// 30 × 7, 400 × 6, 2000 × 9
fn round_times_one_digit(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let digit = rng.next_int(1, 9);
    let zeros = rng.next_int(1, 3) as u32;
    let factor = rng.next_int(2, 9);
    times(digit * 10_i64.pow(zeros), factor)
}

fn teen_times_teen(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let a = rng.next_int(11, 19);
    let b = rng.next_int(11, 19);
    times(a, b)
}

/// X1 × Y1
fn ends_in_one(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let x = rng.next_int(1, 9);
    let y = rng.next_int(1, 9);
    times(x * 10 + 1, y * 10 + 1)
}

fn two_digit_times_ninety_nine(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    times(rng.next_int(10, 99), 99)
}

fn two_digit_times_hundred_one(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    times(rng.next_int(10, 99), 101)
}

/// Same tens digit, units summing to ten: 46 × 44
fn same_tens_units_sum_ten(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let head = rng.next_int(1, 9);
    let tail = rng.next_int(1, 9);
    times(head * 10 + tail, head * 10 + (10 - tail))
}

/// Same units digit, tens summing to ten: 37 × 77
fn same_units_tens_sum_ten(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    let units = rng.next_int(0, 9);
    let tens = rng.next_int(1, 9);
    times(tens * 10 + units, (10 - tens) * 10 + units)
}

fn three_digit_times_eleven(rng: &mut dyn RandomSource) -> Result<Expr, GenerationError> {
    times(rng.next_int(100, 999), 11)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::rng::{ScriptedRandom, SeededRandom};

    #[test]
    fn test_grade3_never_rejects() {
        let mut rng = SeededRandom::new(11);
        for strategy in STRATEGIES {
            for _ in 0..200 {
                let expr = (strategy.draw)(&mut rng).unwrap();
                assert!(matches!(expr, Expr::Mul(..)), "{:?}", strategy.kind);
                assert!(expr.eval() > 0);
            }
        }
    }

    #[test]
    fn test_same_tens_identity() {
        let e = same_tens_units_sum_ten(&mut ScriptedRandom::new([4, 6])).unwrap();
        assert_eq!(e.operands(), vec![46, 44]);
        assert_eq!(e.eval(), 2024);

        let mut rng = SeededRandom::new(3);
        for _ in 0..200 {
            let e = same_tens_units_sum_ten(&mut rng).unwrap();
            let ops = e.operands();
            let (a, b) = (ops[0], ops[1]);
            assert_eq!(a / 10, b / 10);
            assert_eq!(a % 10 + b % 10, 10);
            // head × (head + 1) followed by the units product
            let head = a / 10;
            assert_eq!(e.eval(), head * (head + 1) * 100 + (a % 10) * (b % 10));
        }
    }

    #[test]
    fn test_same_units_identity() {
        let e = same_units_tens_sum_ten(&mut ScriptedRandom::new([7, 3])).unwrap();
        assert_eq!(e.operands(), vec![37, 77]);
        assert_eq!(e.eval(), 2849);

        let mut rng = SeededRandom::new(4);
        for _ in 0..200 {
            let ops = same_units_tens_sum_ten(&mut rng).unwrap().operands();
            assert_eq!(ops[0] % 10, ops[1] % 10);
            assert_eq!(ops[0] / 10 + ops[1] / 10, 10);
        }
    }

    #[test]
    fn test_round_factor_shapes() {
        let e = round_times_one_digit(&mut ScriptedRandom::new([4, 2, 6])).unwrap();
        assert_eq!(e.to_string(), "400 × 6");
        assert_eq!(e.eval(), 2400);
    }

    #[test]
    fn test_ends_in_one() {
        let e = ends_in_one(&mut ScriptedRandom::new([3, 5])).unwrap();
        assert_eq!(e.operands(), vec![31, 51]);
        assert_eq!(e.eval(), 1581);
    }
}
