//! 수식 검수
//!
//! 각 `$...$` 수식의 괄호 짝과 표기 규칙을 검사하고, 본문 전체에서
//! 단순 정수 사칙연산 등식을 계산해 봅니다. 검사들은 서로 독립이며
//! 한 검사의 결과가 다른 검사를 막지 않습니다.

mod arithmetic;
mod brackets;
pub mod eval;
mod patterns;

pub use arithmetic::{check_arithmetic, Mismatch};
pub use brackets::{check_brackets, BracketError};
pub use eval::{evaluate, EvalError, Rational};
pub use patterns::{check_notation, NotationRule};

use crate::core::text::snippet;
use crate::report::{FormulaIssue, IssueKind};
use patterns::FORMULA_RE;

/// 수식 검수기
#[derive(Debug, Clone)]
pub struct FormulaInspector {
    /// 문맥 앞뒤 글자 수
    window: usize,
}

impl Default for FormulaInspector {
    fn default() -> Self {
        Self::new(15)
    }
}

impl FormulaInspector {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    /// 본문 검수
    ///
    /// 수식별 괄호/표기 문제를 수식 순서대로 먼저 담고, 계산 오류를 뒤에 붙입니다.
    pub fn run(&self, text: &str) -> Vec<FormulaIssue> {
        let mut issues = Vec::new();

        for caps in FORMULA_RE.captures_iter(text) {
            let Some(body) = caps.get(1) else { continue };
            let formula = body.as_str();
            let target = format!("${}$", formula);

            for error in check_brackets(formula) {
                let at = body.start() + error.position();
                issues.push(FormulaIssue {
                    offset: at,
                    kind: IssueKind::Bracket,
                    context: snippet(text, at, at + 1, self.window),
                    target: target.clone(),
                    message: error.message(),
                });
            }

            for rule in check_notation(formula) {
                issues.push(FormulaIssue {
                    offset: body.start(),
                    kind: rule.kind,
                    context: snippet(text, body.start(), body.end(), self.window),
                    target: target.clone(),
                    message: rule.message.to_string(),
                });
            }
        }

        for mismatch in check_arithmetic(text) {
            issues.push(FormulaIssue {
                offset: mismatch.start,
                kind: IssueKind::Arithmetic,
                context: snippet(text, mismatch.start, mismatch.end, self.window),
                target: mismatch.equation,
                message: format!("계산 불일치 (좌변 결과: {})", mismatch.computed),
            });
        }

        if !issues.is_empty() {
            log::debug!("수식 검수: {}건", issues.len());
        }
        issues
    }
}
