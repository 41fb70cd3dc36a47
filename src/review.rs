//! 문서 검수 파이프라인
//!
//! 한 문서에 대해 봉투 풀기 → 수식 검수 → 조사 교정 → 맞춤법 교정을 차례로 돌려
//! 하나의 보고서로 묶습니다. 문서끼리는 독립이므로 여러 문서를 스레드로 나눠
//! 처리할 수 있으며, 결과는 입력 순서를 따릅니다.

use serde::Serialize;
use std::num::NonZeroUsize;
use std::thread;

use crate::config::ReviewConfig;
use crate::envelope::unwrap_text;
use crate::inspect::FormulaInspector;
use crate::josa::JosaCorrector;
use crate::report::{CorrectionLogEntry, FormulaIssue};
use crate::spelling::{PlainJosaCorrector, TypoDictionary};

/// 한 문서의 검수 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewReport {
    /// 봉투를 푼 원문
    pub original: String,
    /// 최종 교정본
    pub corrected: String,
    /// 수식 검수 결과 (원문 기준 위치)
    pub issues: Vec<FormulaIssue>,
    /// 조사/마침표 교정 기록 (원문 기준 위치)
    pub corrections: Vec<CorrectionLogEntry>,
    /// 맞춤법 교정 기록 (조사 교정본 기준 위치), 이어서 일반 텍스트 조사 교정 기록
    /// (오타 교정본 기준 위치)
    pub spelling: Vec<CorrectionLogEntry>,
}

impl ReviewReport {
    /// 고칠 것도, 지적할 것도 없음
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.corrections.is_empty() && self.spelling.is_empty()
    }
}

/// 검수기
#[derive(Debug, Clone)]
pub struct Reviewer {
    corrector: JosaCorrector,
    inspector: FormulaInspector,
    typos: Option<TypoDictionary>,
    /// 맞춤법 교정이 켜져 있을 때만 실행
    plain_josa: PlainJosaCorrector,
}

impl Default for Reviewer {
    fn default() -> Self {
        Self::from_config(&ReviewConfig::default())
    }
}

impl Reviewer {
    pub fn from_config(config: &ReviewConfig) -> Self {
        Self {
            corrector: JosaCorrector::new(config.josa_policy()),
            inspector: FormulaInspector::new(config.inspection_window()),
            typos: Some(TypoDictionary::new(&config.extra_typos, config.context_window)),
            plain_josa: PlainJosaCorrector::new(config.context_window),
        }
    }

    /// 맞춤법 교정 켜기/끄기
    pub fn with_spelling(mut self, enabled: bool) -> Self {
        if !enabled {
            self.typos = None;
        } else if self.typos.is_none() {
            self.typos = Some(TypoDictionary::new(
                &Default::default(),
                self.corrector.policy().context_window,
            ));
        }
        self
    }

    /// 문서 하나 검수
    pub fn review(&self, raw: &str) -> ReviewReport {
        let original = unwrap_text(raw);
        let issues = self.inspector.run(&original);
        let josa = self.corrector.run(&original);

        let (corrected, spelling) = match &self.typos {
            Some(typos) => {
                let typo = typos.apply(&josa.text);
                let particles = self.plain_josa.run(&typo.text);
                let mut entries = typo.entries;
                entries.extend(particles.entries);
                (particles.text, entries)
            }
            None => (josa.text, Vec::new()),
        };

        log::debug!(
            "검수 완료: 수식 문제 {}건, 조사 교정 {}건, 맞춤법 교정 {}건",
            issues.len(),
            josa.entries.len(),
            spelling.len()
        );

        ReviewReport {
            original,
            corrected,
            issues,
            corrections: josa.entries,
            spelling,
        }
    }

    /// 여러 문서 검수 (입력 순서대로 반환)
    pub fn review_batch<S: AsRef<str> + Sync>(&self, docs: &[S]) -> Vec<ReviewReport> {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .min(docs.len());
        if workers <= 1 {
            return docs.iter().map(|d| self.review(d.as_ref())).collect();
        }

        let chunk_size = docs.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = docs
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|d| self.review(d.as_ref()))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(reports) => reports,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CorrectionReason, IssueKind};

    #[test]
    fn test_full_pipeline() {
        let raw = r#"{"result": "$x$이 두 자리수일 때 $f(x$의 값은 1 + 1 = 3이다."}"#;
        let report = Reviewer::default().review(raw);

        assert_eq!(report.original, "$x$이 두 자리수일 때 $f(x$의 값은 1 + 1 = 3이다.");
        assert_eq!(report.corrected, "$x$가 두 자릿수일 때 $f(x$의 값은 1 + 1 = 3이다.");
        assert_eq!(report.corrections.len(), 1);
        assert_eq!(report.corrections[0].reason, CorrectionReason::BatchimMismatch);
        assert_eq!(report.spelling.len(), 1);
        let kinds: Vec<IssueKind> = report.issues.iter().map(|i| i.kind).collect();
        assert_eq!(kinds, vec![IssueKind::Bracket, IssueKind::Arithmetic]);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_spelling_can_be_disabled() {
        let reviewer = Reviewer::default().with_spelling(false);
        let report = reviewer.review("최대값은 $3$이다");
        assert_eq!(report.corrected, "최대값은 $3$이다");
        assert!(report.is_clean());

        let reviewer = reviewer.with_spelling(true);
        assert_eq!(reviewer.review("최대값").corrected, "최댓값");
    }

    #[test]
    fn test_batch_preserves_order() {
        let docs: Vec<String> = (0..40)
            .map(|i| if i % 2 == 0 { format!("$x$은 {}", i) } else { format!("$3$는 {}", i) })
            .collect();
        let reviewer = Reviewer::default();
        let reports = reviewer.review_batch(&docs);
        assert_eq!(reports.len(), docs.len());
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report, &reviewer.review(&docs[i]));
        }
        assert_eq!(reports[0].corrected, "$x$는 0");
        assert_eq!(reports[1].corrected, "$3$은 1");
    }

    #[test]
    fn test_plain_text_particles() {
        let report = Reviewer::default().review("점 ㉠는 $x$이 지나는 꼭지점이다");
        assert_eq!(report.corrected, "점 ㉠은 $x$가 지나는 꼭짓점이다");
        let reasons: Vec<CorrectionReason> = report.spelling.iter().map(|e| e.reason).collect();
        assert_eq!(
            reasons,
            vec![CorrectionReason::Spelling, CorrectionReason::ParticleAgreement]
        );

        let report = Reviewer::default().with_spelling(false).review("점 ㉠는");
        assert_eq!(report.corrected, "점 ㉠는");
    }

    #[test]
    fn test_batch_empty() {
        let docs: [&str; 0] = [];
        assert!(Reviewer::default().review_batch(&docs).is_empty());
    }

    #[test]
    fn test_report_serializes() {
        let report = Reviewer::default().review("$y$을");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["corrected"], "$y$를");
        assert_eq!(value["corrections"][0]["reason"], "받침 호응 오류");
    }
}
