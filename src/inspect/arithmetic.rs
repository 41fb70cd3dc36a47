//! 본문 속 단순 정수 사칙연산 검증 (`a OP b = c`)

use std::sync::LazyLock;

use regex::Regex;

use super::eval::{evaluate, Rational};

static EQUATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+[\s+\-*/]+\d+\s*=\s*\d+").expect("valid equation regex")
});

/// 계산이 틀린 등식
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// 본문에서의 바이트 구간
    pub start: usize,
    pub end: usize,
    /// 등식 원문
    pub equation: String,
    /// 좌변 계산 결과
    pub computed: Rational,
}

/// 소수의 일부인지 (앞뒤에 숫자나 마침표가 붙어 있음)
fn touches_number(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    [before, after]
        .into_iter()
        .flatten()
        .any(|c| c == '.' || c.is_ascii_digit())
}

/// 본문의 모든 등식을 계산해 틀린 것만 반환
///
/// 계산할 수 없는 등식(0으로 나눔 등)은 건너뜁니다.
pub fn check_arithmetic(text: &str) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    for m in EQUATION_RE.find_iter(text) {
        if touches_number(text, m.start(), m.end()) {
            continue;
        }
        let equation = m.as_str();
        let Some((lhs, rhs)) = equation.split_once('=') else {
            continue;
        };

        let computed = match evaluate(lhs) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("등식 '{}' 건너뜀: {}", equation, e);
                continue;
            }
        };
        let Ok(stated) = rhs.trim().parse::<i128>() else {
            continue;
        };

        if computed != Rational::from_integer(stated) {
            mismatches.push(Mismatch {
                start: m.start(),
                end: m.end(),
                equation: equation.to_string(),
                computed,
            });
        }
    }

    mismatches
}
