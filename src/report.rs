//! 교정/검수 기록 타입
//!
//! 한 번의 실행이 만든 기록은 그 실행의 결과값으로만 반환되며
//! 실행 사이에 공유되지 않습니다.

use serde::Serialize;
use std::fmt;

/// 교정 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrectionReason {
    #[serde(rename = "받침 호응 오류")]
    BatchimMismatch,
    #[serde(rename = "불필요한 마침표 제거")]
    RedundantPeriod,
    #[serde(rename = "맞춤법/표준어 오류")]
    Spelling,
    /// 수식 바깥 일반 텍스트의 조사
    #[serde(rename = "조사 호응 오류")]
    ParticleAgreement,
}

impl CorrectionReason {
    pub fn label(&self) -> &'static str {
        match self {
            CorrectionReason::BatchimMismatch => "받침 호응 오류",
            CorrectionReason::RedundantPeriod => "불필요한 마침표 제거",
            CorrectionReason::Spelling => "맞춤법/표준어 오류",
            CorrectionReason::ParticleAgreement => "조사 호응 오류",
        }
    }
}

impl fmt::Display for CorrectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 교정 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionLogEntry {
    /// 원문에서 일치 구간이 시작하는 바이트 위치
    pub offset: usize,
    /// 앞뒤 문맥
    pub context: String,
    /// 사람이 읽기 쉬운 대상 (수식 또는 단어)
    pub target: String,
    /// 원문
    pub original: String,
    /// 수정안
    pub corrected: String,
    pub reason: CorrectionReason,
}

/// 수식 검수 오류 유형
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    #[serde(rename = "괄호 오류")]
    Bracket,
    #[serde(rename = "표기 오류")]
    Notation,
    #[serde(rename = "문법 오류")]
    Syntax,
    #[serde(rename = "계산 오류")]
    Arithmetic,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::Bracket => "괄호 오류",
            IssueKind::Notation => "표기 오류",
            IssueKind::Syntax => "문법 오류",
            IssueKind::Arithmetic => "계산 오류",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 수식 검수 결과 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormulaIssue {
    /// 원문에서 문제 구간이 시작하는 바이트 위치
    pub offset: usize,
    pub kind: IssueKind,
    pub context: String,
    /// 문제가 된 수식(`$...$`) 또는 등식
    pub target: String,
    pub message: String,
}
