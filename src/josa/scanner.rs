//! 수식-조사 스캐너
//!
//! 본문을 한 번 훑으며 `$수식$` 바로 뒤의 조사를 찾아 받침에 맞게 고칩니다.
//! 일치 구간은 서로 겹치지 않으며, 처리한 구간은 다시 검사하지 않습니다.
//!
//! 일치마다:
//! 1. 조사 자리에 한글이 없고 마침표만 붙어 있으면 마침표 제거
//! 2. 한글이 있으면 수식 단순화 → 대상 판별 → 받침 판정 → 조사 교체

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::classifier::TargetClassifier;
use crate::core::latex::Formula;
use crate::core::simplifier::simplify;
use crate::core::text::{readable_formula, snippet};
use crate::core::unicode::is_complete_hangul;
use crate::report::{CorrectionLogEntry, CorrectionReason};

use super::batchim;
use super::particle::{is_exact_allomorph, ParticleRewriter, ProtectedWords};
use super::policy::JosaPolicy;

/// `$수식$` + 연결부(공백, 줄바꿈, `\\`) + 첫 한글 덩어리 또는 마침표
static FORMULA_PARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$([^$]+)\$((?:\s|\\\\)*)([가-힣]+|\.+)?")
        .expect("valid formula particle regex")
});

/// 한 번의 교정 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// 교정된 전체 본문
    pub text: String,
    /// 원문 등장 순서대로 정렬된 교정 기록
    pub entries: Vec<CorrectionLogEntry>,
}

impl ScanResult {
    pub fn is_unchanged(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 수식 뒤 조사 교정기
#[derive(Debug, Clone)]
pub struct JosaCorrector {
    policy: JosaPolicy,
    classifier: TargetClassifier,
    rewriter: ParticleRewriter,
}

impl Default for JosaCorrector {
    fn default() -> Self {
        Self::new(JosaPolicy::default())
    }
}

impl JosaCorrector {
    pub fn new(policy: JosaPolicy) -> Self {
        let classifier = TargetClassifier::new(policy.complement_on_caret_c);
        let rewriter = ParticleRewriter::new(ProtectedWords::new(
            policy.protect_range_words,
            &policy.extra_protected_words,
        ));
        Self {
            policy,
            classifier,
            rewriter,
        }
    }

    pub fn policy(&self) -> &JosaPolicy {
        &self.policy
    }

    /// 본문 전체 교정
    pub fn run(&self, text: &str) -> ScanResult {
        let mut out = String::with_capacity(text.len());
        let mut entries = Vec::new();
        let mut last = 0;

        for caps in FORMULA_PARTICLE_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&text[last..whole.start()]);

            match self.correct_match(text, &caps) {
                Some((replacement, entry)) => {
                    out.push_str(&replacement);
                    entries.push(entry);
                }
                None => out.push_str(whole.as_str()),
            }
            last = whole.end();
        }
        out.push_str(&text[last..]);

        ScanResult { text: out, entries }
    }

    /// 일치 하나를 교정. 바꿀 것이 없으면 None
    fn correct_match(
        &self,
        text: &str,
        caps: &Captures<'_>,
    ) -> Option<(String, CorrectionLogEntry)> {
        let whole = caps.get(0)?;
        let formula = caps.get(1)?.as_str();
        let bridge = caps.get(2).map_or("", |m| m.as_str());
        let tail = caps.get(3)?;
        let token = tail.as_str();

        let (corrected, reason) = if token.starts_with('.') {
            // 마침표 뒤에 한글이 이어지면 문장 끝이 아님
            let followed_by_hangul = text[tail.end()..]
                .chars()
                .next()
                .is_some_and(is_complete_hangul);
            if !self.policy.strip_glued_periods || !bridge.is_empty() || followed_by_hangul {
                return None;
            }
            (String::new(), CorrectionReason::RedundantPeriod)
        } else {
            (
                self.correct_particle(formula, bridge, token)?,
                CorrectionReason::BatchimMismatch,
            )
        };

        let entry = CorrectionLogEntry {
            offset: whole.start(),
            context: snippet(text, whole.start(), whole.end(), self.policy.context_window),
            target: readable_formula(formula),
            original: token.to_string(),
            corrected: corrected.clone(),
            reason,
        };
        let replacement = format!("${}${}{}", formula, bridge, corrected);
        Some((replacement, entry))
    }

    /// 조사 교정. 그대로 두어야 하면 None
    fn correct_particle(&self, formula: &str, bridge: &str, token: &str) -> Option<String> {
        if bridge.chars().count() > self.policy.max_bridge_chars {
            return None;
        }
        if self.rewriter.is_protected(token) {
            return None;
        }
        // 띄어 쓴 한글은 조사 하나와 정확히 같을 때만 조사로 봄 (예: "가장"은 제외)
        if !bridge.is_empty() && !is_exact_allomorph(token) {
            return None;
        }

        let target = self.classifier.classify(&simplify(&Formula::parse(formula)));
        let Some(decision) = batchim::resolve(&target) else {
            log::debug!("수식 '{}': 읽을 대상 없음, 조사 '{}' 유지", formula, token);
            return None;
        };

        let corrected = self.rewriter.rewrite(decision, token);
        log::debug!(
            "수식 '{}': 대상 '{}' {:?}, 조사 '{}' → '{}'",
            formula,
            target.key(),
            decision,
            token,
            corrected
        );
        (corrected != token).then_some(corrected)
    }
}
