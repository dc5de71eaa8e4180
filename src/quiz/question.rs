//! Question values and the expression tree they are built from

use std::fmt;

use serde::{Deserialize, Serialize};

/// Difficulty tier. Always 1, 2 or 3; out-of-range input clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub struct GradeLevel(u8);

impl GradeLevel {
    pub const ONE: GradeLevel = GradeLevel(1);
    pub const TWO: GradeLevel = GradeLevel(2);
    pub const THREE: GradeLevel = GradeLevel(3);
    pub const ALL: [GradeLevel; 3] = [Self::ONE, Self::TWO, Self::THREE];

    /// Clamp any integer into a valid grade (below 1 → 1, above 3 → 3)
    pub fn new(level: i64) -> Self {
        GradeLevel(level.clamp(1, 3) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Menu/HUD name
    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "G1 - Addition & subtraction within 20",
            2 => "G2 - Two-digit arithmetic within 100",
            _ => "G3 - Multiplication tricks",
        }
    }
}

impl Default for GradeLevel {
    fn default() -> Self {
        Self::ONE
    }
}

impl From<i64> for GradeLevel {
    fn from(level: i64) -> Self {
        Self::new(level)
    }
}

impl From<GradeLevel> for i64 {
    fn from(grade: GradeLevel) -> Self {
        i64::from(grade.0)
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G{}", self.0)
    }
}

/// Which strategy produced a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    // Grade 1
    AddWithinTen,
    SubWithinTen,
    MakeTenAdd,
    BreakTenSub,
    ChainAddWithinTwenty,
    TwoDigitAddOneDigitNoCarry,
    TwoDigitSubOneDigitNoBorrow,
    TensAdd,
    TensSub,
    TwoDigitAddSubTens,
    // Grade 2
    TwoDigitAddCarry,
    TwoDigitAddNoCarry,
    TwoDigitSubBorrow,
    TwoDigitSubNoBorrow,
    TwoDigitOneDigitRegroup,
    ChainSub,
    MixedOrder,
    ChainAddUnderHundred,
    ParenSumTimes,
    TimesParenSum,
    // Grade 3
    TwoDigitTimesEleven,
    RoundTimesOneDigit,
    TeenTimesTeen,
    EndsInOne,
    TwoDigitTimesNinetyNine,
    TwoDigitTimesHundredOne,
    SameTensUnitsSumTen,
    SameUnitsTensSumTen,
    ThreeDigitTimesEleven,
    /// Single-digit addition used when a strategy exhausts its retries
    Fallback,
}

impl QuestionKind {
    /// Grade whose registry holds this strategy (`None` for the fallback)
    pub fn grade(self) -> Option<GradeLevel> {
        use QuestionKind::*;
        match self {
            AddWithinTen
            | SubWithinTen
            | MakeTenAdd
            | BreakTenSub
            | ChainAddWithinTwenty
            | TwoDigitAddOneDigitNoCarry
            | TwoDigitSubOneDigitNoBorrow
            | TensAdd
            | TensSub
            | TwoDigitAddSubTens => Some(GradeLevel::ONE),
            TwoDigitAddCarry
            | TwoDigitAddNoCarry
            | TwoDigitSubBorrow
            | TwoDigitSubNoBorrow
            | TwoDigitOneDigitRegroup
            | ChainSub
            | MixedOrder
            | ChainAddUnderHundred
            | ParenSumTimes
            | TimesParenSum => Some(GradeLevel::TWO),
            TwoDigitTimesEleven
            | RoundTimesOneDigit
            | TeenTimesTeen
            | EndsInOne
            | TwoDigitTimesNinetyNine
            | TwoDigitTimesHundredOne
            | SameTensUnitsSumTen
            | SameUnitsTensSumTen
            | ThreeDigitTimesEleven => Some(GradeLevel::THREE),
            Fallback => None,
        }
    }
}

/// Arithmetic expression a question is rendered from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Num(i64),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn num(n: i64) -> Self {
        Expr::Num(n)
    }

    pub fn add(a: Expr, b: Expr) -> Self {
        Expr::Add(Box::new(a), Box::new(b))
    }

    pub fn sub(a: Expr, b: Expr) -> Self {
        Expr::Sub(Box::new(a), Box::new(b))
    }

    pub fn mul(a: Expr, b: Expr) -> Self {
        Expr::Mul(Box::new(a), Box::new(b))
    }

    pub fn eval(&self) -> i64 {
        match self {
            Expr::Num(n) => *n,
            Expr::Add(a, b) => a.eval() + b.eval(),
            Expr::Sub(a, b) => a.eval() - b.eval(),
            Expr::Mul(a, b) => a.eval() * b.eval(),
        }
    }

    /// Leaf numbers, left to right
    pub fn operands(&self) -> Vec<i64> {
        let mut out = Vec::new();
        self.collect_operands(&mut out);
        out
    }

    fn collect_operands(&self, out: &mut Vec<i64>) {
        match self {
            Expr::Num(n) => out.push(*n),
            Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) => {
                a.collect_operands(out);
                b.collect_operands(out);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Add(..) | Expr::Sub(..) => 1,
            Expr::Mul(..) => 2,
            Expr::Num(_) => 3,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({self})")
        } else {
            write!(f, "{self}")
        }
    }
}

impl fmt::Display for Expr {
    /// Renders with the minimum parentheses needed to keep the tree's meaning
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (a, b, symbol) = match self {
            Expr::Num(n) => return write!(f, "{n}"),
            Expr::Add(a, b) => (a, b, "+"),
            Expr::Sub(a, b) => (a, b, "-"),
            Expr::Mul(a, b) => (a, b, "×"),
        };
        let p = self.precedence();
        a.fmt_child(f, a.precedence() < p)?;
        write!(f, " {symbol} ")?;
        // a - (b - c) and a - (b + c) keep their parentheses
        let right_parens =
            b.precedence() < p || (b.precedence() == p && matches!(self, Expr::Sub(..)));
        b.fmt_child(f, right_parens)
    }
}

/// A generated arithmetic question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub display_text: String,
    pub answer: i64,
    pub kind: QuestionKind,
    pub operands: Vec<i64>,
}

impl Question {
    pub fn from_expr(kind: QuestionKind, expr: &Expr) -> Self {
        Self {
            display_text: format!("{expr} = ?"),
            answer: expr.eval(),
            kind,
            operands: expr.operands(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_clamps() {
        assert_eq!(GradeLevel::new(0), GradeLevel::ONE);
        assert_eq!(GradeLevel::new(-7), GradeLevel::ONE);
        assert_eq!(GradeLevel::new(2), GradeLevel::TWO);
        assert_eq!(GradeLevel::new(9), GradeLevel::THREE);
        let parsed: GradeLevel = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, GradeLevel::THREE);
        assert_eq!(serde_json::to_string(&GradeLevel::TWO).unwrap(), "2");
    }

    #[test]
    fn test_display_precedence() {
        let e = Expr::add(Expr::num(7), Expr::mul(Expr::num(2), Expr::num(3)));
        assert_eq!(e.to_string(), "7 + 2 × 3");
        assert_eq!(e.eval(), 13);

        let e = Expr::mul(Expr::add(Expr::num(3), Expr::num(4)), Expr::num(5));
        assert_eq!(e.to_string(), "(3 + 4) × 5");
        assert_eq!(e.eval(), 35);

        let e = Expr::mul(Expr::num(6), Expr::add(Expr::num(2), Expr::num(9)));
        assert_eq!(e.to_string(), "6 × (2 + 9)");
    }

    #[test]
    fn test_display_left_assoc_chain() {
        let e = Expr::sub(Expr::sub(Expr::num(80), Expr::num(12)), Expr::num(9));
        assert_eq!(e.to_string(), "80 - 12 - 9");
        assert_eq!(e.eval(), 59);

        let e = Expr::sub(Expr::num(80), Expr::sub(Expr::num(12), Expr::num(9)));
        assert_eq!(e.to_string(), "80 - (12 - 9)");
        assert_eq!(e.eval(), 77);
    }

    #[test]
    fn test_question_from_expr() {
        let q = Question::from_expr(
            QuestionKind::SameTensUnitsSumTen,
            &Expr::mul(Expr::num(46), Expr::num(44)),
        );
        assert_eq!(q.display_text, "46 × 44 = ?");
        assert_eq!(q.answer, 2024);
        assert_eq!(q.operands, vec![46, 44]);
        assert_eq!(q.kind.grade(), Some(GradeLevel::THREE));
    }
}
