//! 제한된 정수 사칙연산 계산기
//!
//! 숫자, `+ - * /`, 공백만 허용합니다. 나눗셈은 유리수로 정확히 계산하므로
//! `7/2`는 3이 아니라 7/2입니다. 임의의 식은 절대 평가하지 않습니다.

use std::fmt;

use num_rational::Ratio;
use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};

/// 계산 오류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// 0으로 나눔
    DivisionByZero,
    /// 예상하지 못한 문자
    UnexpectedToken(char),
    /// 식이 중간에 끝남
    UnexpectedEnd,
    /// 허용되지 않은 문자가 포함된 식
    UnsafeInput(String),
    /// 정수 범위 초과
    Overflow,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DivisionByZero => write!(f, "0으로 나눌 수 없음"),
            EvalError::UnexpectedToken(c) => write!(f, "예상하지 못한 문자: '{}'", c),
            EvalError::UnexpectedEnd => write!(f, "식이 완결되지 않음"),
            EvalError::UnsafeInput(s) => write!(f, "허용되지 않은 식: {}", s),
            EvalError::Overflow => write!(f, "정수 범위 초과"),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<std::num::ParseIntError> for EvalError {
    fn from(_: std::num::ParseIntError) -> Self {
        EvalError::Overflow
    }
}

/// 정확한 유리수 (기약분수, 분모는 항상 양수)
pub type Rational = Ratio<i128>;

fn checked(value: Option<Rational>) -> Result<Rational, EvalError> {
    value.ok_or(EvalError::Overflow)
}

/// 좌변이 숫자/연산자/공백으로만 이루어졌는지
pub fn is_safe_expression(expr: &str) -> bool {
    !expr.trim().is_empty()
        && expr
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/'))
}

/// 식 계산
///
/// 우선순위: 단항 부호 > `* /` > `+ -`, 같은 순위는 왼쪽부터.
pub fn evaluate(expr: &str) -> Result<Rational, EvalError> {
    if !is_safe_expression(expr) {
        return Err(EvalError::UnsafeInput(expr.to_string()));
    }
    let tokens: Vec<char> = expr.chars().filter(|c| !c.is_whitespace()).collect();
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expr()?;
    match parser.peek() {
        Some(c) => Err(EvalError::UnexpectedToken(c)),
        None => Ok(value),
    }
}

struct Parser {
    tokens: Vec<char>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<char> {
        self.tokens.get(self.pos).copied()
    }

    fn expr(&mut self) -> Result<Rational, EvalError> {
        let mut value = self.term()?;
        while let Some(op @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            let rhs = self.term()?;
            value = checked(if op == '+' {
                value.checked_add(&rhs)
            } else {
                value.checked_sub(&rhs)
            })?;
        }
        Ok(value)
    }

    fn term(&mut self) -> Result<Rational, EvalError> {
        let mut value = self.unary()?;
        while let Some(op @ ('*' | '/')) = self.peek() {
            self.pos += 1;
            let rhs = self.unary()?;
            value = if op == '*' {
                checked(value.checked_mul(&rhs))?
            } else if rhs.is_zero() {
                return Err(EvalError::DivisionByZero);
            } else {
                checked(value.checked_div(&rhs))?
            };
        }
        Ok(value)
    }

    /// 연속된 부호는 한 번에 읽음 (`- - 3`은 3)
    fn unary(&mut self) -> Result<Rational, EvalError> {
        let mut negative = false;
        while let Some(sign @ ('+' | '-')) = self.peek() {
            self.pos += 1;
            if sign == '-' {
                negative = !negative;
            }
        }
        let value = self.number()?;
        if negative {
            checked(Rational::zero().checked_sub(&value))
        } else {
            Ok(value)
        }
    }

    fn number(&mut self) -> Result<Rational, EvalError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return match self.peek() {
                Some(c) => Err(EvalError::UnexpectedToken(c)),
                None => Err(EvalError::UnexpectedEnd),
            };
        }
        let digits: String = self.tokens[start..self.pos].iter().collect();
        Ok(Rational::from_integer(digits.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(s: &str) -> String {
        evaluate(s).unwrap().to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2 + 3 * 4"), "14");
        assert_eq!(eval("10 - 4 - 3"), "3");
        assert_eq!(eval("12 / 4 * 3"), "9");
        assert_eq!(eval("3 - -2"), "5");
    }

    #[test]
    fn test_exact_division() {
        assert_eq!(eval("7 / 2"), "7/2");
        assert_eq!(eval("6 / 4"), "3/2");
        assert_eq!(eval("7 / 2 * 2"), "7");
        assert!(!evaluate("1/3").unwrap().is_integer());
    }

    #[test]
    fn test_errors() {
        assert_eq!(evaluate("5 / 0"), Err(EvalError::DivisionByZero));
        assert_eq!(evaluate("3 +"), Err(EvalError::UnexpectedEnd));
        assert_eq!(evaluate("3 * / 2"), Err(EvalError::UnexpectedToken('/')));
        assert!(matches!(evaluate("2 ** 3"), Err(EvalError::UnexpectedToken('*'))));
        assert!(matches!(evaluate("__import__"), Err(EvalError::UnsafeInput(_))));
        assert!(matches!(evaluate(""), Err(EvalError::UnsafeInput(_))));
        assert_eq!(
            evaluate("99999999999999999999999999999999999999999"),
            Err(EvalError::Overflow)
        );
    }

    #[test]
    fn test_long_sign_run() {
        let expr = format!("1 {} 1", "-".repeat(20_000));
        assert_eq!(eval(&expr), "2");
        let expr = format!("{}5", "-+".repeat(20_001));
        assert_eq!(eval(&expr), "-5");
        assert_eq!(evaluate(&"-".repeat(20_000)), Err(EvalError::UnexpectedEnd));
    }

    #[test]
    fn test_overflow_reported() {
        let max = i128::MAX.to_string();
        assert_eq!(evaluate(&format!("{} + 1", max)), Err(EvalError::Overflow));
        assert_eq!(evaluate(&format!("{} * 2", max)), Err(EvalError::Overflow));
    }

    #[test]
    fn test_safe_expression() {
        assert!(is_safe_expression("12 + 3*4 "));
        assert!(!is_safe_expression("2x + 1"));
        assert!(!is_safe_expression("(1+2)"));
    }
}
