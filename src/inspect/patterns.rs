//! 수식 표기 규칙 패턴

use std::sync::LazyLock;

use regex::Regex;

use crate::report::IssueKind;

/// `$...$` 수식 구간
pub(super) static FORMULA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$([^$]+)\$").expect("valid formula regex"));

/// 숫자 사이의 `*`
static ASCII_TIMES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d\s*\*\s*\d").expect("valid ascii times regex"));

/// 분수 명령과 바로 뒤 중괄호
static FRAC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[dtc]?frac(\s*\{)?").expect("valid frac regex"));

/// 표기 규칙 위반 한 건
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotationRule {
    pub kind: IssueKind,
    pub message: &'static str,
}

const ASCII_TIMES: NotationRule = NotationRule {
    kind: IssueKind::Notation,
    message: r"곱하기 기호 '*' 사용됨 ($\times$ 권장)",
};

const ASCII_INEQUALITY: NotationRule = NotationRule {
    kind: IssueKind::Notation,
    message: r"부등호 '<=', '>=' 사용됨 ($\le, \ge$ 권장)",
};

const FRAC_WITHOUT_GROUP: NotationRule = NotationRule {
    kind: IssueKind::Syntax,
    message: r"\frac 명령어 인자 누락 의심",
};

/// 수식 하나에서 어긴 표기 규칙 (규칙마다 최대 한 번)
pub fn check_notation(formula: &str) -> Vec<NotationRule> {
    let mut violations = Vec::new();

    if ASCII_TIMES_RE.is_match(formula) {
        violations.push(ASCII_TIMES);
    }
    if formula.contains("<=") || formula.contains(">=") {
        violations.push(ASCII_INEQUALITY);
    }
    if FRAC_RE.captures_iter(formula).any(|caps| caps.get(1).is_none()) {
        violations.push(FRAC_WITHOUT_GROUP);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(formula: &str) -> Vec<IssueKind> {
        check_notation(formula).into_iter().map(|r| r.kind).collect()
    }

    #[test]
    fn test_clean_formula() {
        assert!(check_notation(r"2 \times 3 \le \frac{1}{2}").is_empty());
        assert!(check_notation("a*b").is_empty());
    }

    #[test]
    fn test_ascii_times() {
        assert_eq!(kinds("2 * 3"), vec![IssueKind::Notation]);
        assert_eq!(kinds("2*3*4"), vec![IssueKind::Notation]);
    }

    #[test]
    fn test_ascii_inequality() {
        assert_eq!(kinds("x <= 3"), vec![IssueKind::Notation]);
        assert_eq!(kinds("x>=3"), vec![IssueKind::Notation]);
    }

    #[test]
    fn test_frac_without_group() {
        assert_eq!(kinds(r"\frac12"), vec![IssueKind::Syntax]);
        assert_eq!(kinds(r"\frac{1}{2} + \dfrac 3"), vec![IssueKind::Syntax]);
        assert!(kinds(r"\dfrac {1}{2}").is_empty());
    }

    #[test]
    fn test_independent_rules() {
        assert_eq!(
            kinds(r"2*3 <= \frac x"),
            vec![IssueKind::Notation, IssueKind::Notation, IssueKind::Syntax]
        );
    }
}
