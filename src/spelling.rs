//! 맞춤법/표준어 오타 사전과 일반 텍스트 조사 교정
//!
//! 수식(`$...$`) 바깥의 일반 텍스트에서만 사전 단어를 찾아 바꿉니다.
//! 여러 단어가 겹치면 긴 단어가 먼저 일치합니다.
//!
//! 조사 교정은 한글 한 글자(또는 ㉠~㉭) 바로 뒤에 붙은 조사를 그 글자의
//! 받침에 맞춥니다. 조사 뒤에 한글이 이어지면 단어의 일부로 보고 두며,
//! 조사처럼 보이는 낱말은 예외 목록으로 거릅니다.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::text::snippet;
use crate::josa::batchim::resolve_char;
use crate::josa::{ParticleRewriter, ScanResult};
use crate::report::{CorrectionLogEntry, CorrectionReason};

static FORMULA_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$[^$]+\$").expect("valid formula span regex"));

/// 글자 + 조사. 세 번째 묶음은 뒤에 한글이 이어지는지 확인용
static PLAIN_PARTICLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([가-힣㉠-㉭])(으로|은|는|이|가|을|를|과|와|로)([가-힣])?")
        .expect("valid plain particle regex")
});

/// 조사가 붙은 것처럼 보이지만 한 낱말인 말
pub const PARTICLE_EXCEPTIONS: [&str; 44] = [
    "증가", "추가", "결과", "효과", "초과", "교과", "부과", "사과", "투과",
    "평가", "원가", "정가", "단가", "시가",
    "사이", "차이", "나이", "아이", "오이", "놀이",
    "경로", "진로", "선로", "항로",
    "없는", "있는", "갖는", "맞는", "맡는", "웃는", "씻는", "깎는", "볶는", "않는",
    "이은", "이을", "깊은", "높은", "작은", "좁은",
    "인가", "는가", "은가", "던가",
];

/// 기본 오타 사전 (틀린 표기, 바른 표기)
pub const DEFAULT_TYPOS: [(&str, &str); 25] = [
    // 수학 용어 (사이시옷)
    ("자리수", "자릿수"),
    ("최대값", "최댓값"),
    ("최소값", "최솟값"),
    ("극대값", "극댓값"),
    ("극소값", "극솟값"),
    ("절대값", "절댓값"),
    ("근사값", "근삿값"),
    ("대표값", "대푯값"),
    ("함수값", "함숫값"),
    ("꼭지점", "꼭짓점"),
    ("촛점", "초점"),
    ("갯수", "개수"),
    ("나누기", "나눗셈"),
    // 일반 맞춤법
    ("않되", "안 되"),
    ("않돼", "안 돼"),
    ("않된다", "안 된다"),
    ("문안", "무난"),
    ("금새", "금세"),
    ("역활", "역할"),
    ("제작년", "재작년"),
    ("어떻해", "어떡해"),
    ("몇일", "며칠"),
    ("들어나다", "드러나다"),
    ("가르키다", "가리키다"),
    ("맞추다", "맞히다"),
];

/// 오타 사전
#[derive(Debug, Clone)]
pub struct TypoDictionary {
    typos: HashMap<String, String>,
    /// 모든 틀린 표기의 선택 패턴 (긴 것부터)
    matcher: Option<Regex>,
    window: usize,
}

impl Default for TypoDictionary {
    fn default() -> Self {
        Self::new(&HashMap::new(), 10)
    }
}

impl TypoDictionary {
    /// 기본 사전에 `extra`를 더해 생성 (같은 단어는 `extra`가 우선)
    pub fn new(extra: &HashMap<String, String>, window: usize) -> Self {
        let mut typos: HashMap<String, String> = DEFAULT_TYPOS
            .iter()
            .map(|(wrong, right)| (wrong.to_string(), right.to_string()))
            .collect();
        for (wrong, right) in extra {
            if wrong.is_empty() || wrong == right {
                log::warn!("오타 사전 항목 무시: '{}' → '{}'", wrong, right);
                continue;
            }
            typos.insert(wrong.clone(), right.clone());
        }

        let mut keys: Vec<&str> = typos.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        let pattern = keys.iter().map(|k| regex::escape(k)).collect::<Vec<_>>().join("|");
        let matcher = match Regex::new(&pattern) {
            Ok(re) if !keys.is_empty() => Some(re),
            Ok(_) => None,
            Err(e) => {
                log::warn!("오타 사전 패턴 생성 실패: {}", e);
                None
            }
        };

        Self {
            typos,
            matcher,
            window,
        }
    }

    pub fn len(&self) -> usize {
        self.typos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.typos.is_empty()
    }

    /// 틀린 표기의 바른 표기
    pub fn lookup(&self, wrong: &str) -> Option<&str> {
        self.typos.get(wrong).map(String::as_str)
    }

    /// 수식 바깥의 오타 교정
    pub fn apply(&self, text: &str) -> ScanResult {
        let Some(matcher) = &self.matcher else {
            return ScanResult {
                text: text.to_string(),
                entries: Vec::new(),
            };
        };

        let mut out = String::with_capacity(text.len());
        let mut entries = Vec::new();
        let mut last = 0;

        let mut plain = |start: usize, end: usize, out: &mut String| {
            let segment = &text[start..end];
            let fixed = matcher.replace_all(segment, |caps: &Captures<'_>| {
                let Some(m) = caps.get(0) else {
                    return String::new();
                };
                let wrong = m.as_str();
                let right = self.lookup(wrong).unwrap_or(wrong);
                let at = start + m.start();
                entries.push(CorrectionLogEntry {
                    offset: at,
                    context: snippet(text, at, at + wrong.len(), self.window),
                    target: wrong.to_string(),
                    original: wrong.to_string(),
                    corrected: right.to_string(),
                    reason: CorrectionReason::Spelling,
                });
                right.to_string()
            });
            out.push_str(&fixed);
        };

        for span in FORMULA_SPAN_RE.find_iter(text) {
            plain(last, span.start(), &mut out);
            out.push_str(span.as_str());
            last = span.end();
        }
        plain(last, text.len(), &mut out);

        ScanResult { text: out, entries }
    }
}

/// 수식 바깥 일반 텍스트의 조사 교정기
#[derive(Debug, Clone)]
pub struct PlainJosaCorrector {
    rewriter: ParticleRewriter,
    window: usize,
}

impl Default for PlainJosaCorrector {
    fn default() -> Self {
        Self::new(10)
    }
}

impl PlainJosaCorrector {
    pub fn new(window: usize) -> Self {
        Self {
            rewriter: ParticleRewriter::default(),
            window,
        }
    }

    /// 수식 바깥의 조사 교정
    pub fn run(&self, text: &str) -> ScanResult {
        let mut out = String::with_capacity(text.len());
        let mut entries = Vec::new();
        let mut last = 0;

        for span in FORMULA_SPAN_RE.find_iter(text) {
            self.correct_segment(text, last, span.start(), &mut out, &mut entries);
            out.push_str(span.as_str());
            last = span.end();
        }
        self.correct_segment(text, last, text.len(), &mut out, &mut entries);

        ScanResult { text: out, entries }
    }

    fn correct_segment(
        &self,
        text: &str,
        start: usize,
        end: usize,
        out: &mut String,
        entries: &mut Vec<CorrectionLogEntry>,
    ) {
        let segment = &text[start..end];
        let mut copied = 0;
        let mut pos = 0;

        while let Some(caps) = PLAIN_PARTICLE_RE.captures_at(segment, pos) {
            let (Some(noun), Some(particle)) = (caps.get(1), caps.get(2)) else {
                break;
            };
            // 뒤에 한글이 이어지면 조사가 아님. 조사 자리 글자부터 다시 찾음
            if caps.get(3).is_some() {
                pos = noun.end();
                continue;
            }
            pos = particle.end();

            let Some(corrected) = self.correct_particle(noun.as_str(), particle.as_str()) else {
                continue;
            };
            let at = start + noun.start();
            out.push_str(&segment[copied..particle.start()]);
            out.push_str(&corrected);
            copied = particle.end();

            entries.push(CorrectionLogEntry {
                offset: at,
                context: snippet(text, at, start + particle.end(), self.window),
                target: format!("{}{}", noun.as_str(), particle.as_str()),
                original: particle.as_str().to_string(),
                corrected,
                reason: CorrectionReason::ParticleAgreement,
            });
        }
        out.push_str(&segment[copied..]);
    }

    /// 글자에 맞는 조사. 그대로 두어야 하면 None
    fn correct_particle(&self, noun: &str, particle: &str) -> Option<String> {
        let word = format!("{}{}", noun, particle);
        if PARTICLE_EXCEPTIONS.contains(&word.as_str()) {
            return None;
        }
        let decision = noun.chars().next().and_then(resolve_char)?;
        let corrected = self.rewriter.rewrite(decision, particle);
        (corrected != particle).then_some(corrected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix_particles(text: &str) -> String {
        PlainJosaCorrector::default().run(text).text
    }

    #[test]
    fn test_default_typos() {
        let dict = TypoDictionary::default();
        assert_eq!(dict.len(), DEFAULT_TYPOS.len());
        let result = dict.apply("두 자리수의 최대값과 꼭지점의 갯수");
        assert_eq!(result.text, "두 자릿수의 최댓값과 꼭짓점의 개수");
        assert_eq!(result.entries.len(), 4);
        assert!(result
            .entries
            .iter()
            .all(|e| e.reason == CorrectionReason::Spelling));
        assert_eq!(result.entries[0].original, "자리수");
        assert_eq!(result.entries[0].corrected, "자릿수");
    }

    #[test]
    fn test_formula_untouched() {
        let dict = TypoDictionary::default();
        let result = dict.apply(r"$\text{최대값}$과 최대값");
        assert_eq!(result.text, r"$\text{최대값}$과 최댓값");
        assert_eq!(result.entries.len(), 1);
        assert_eq!(result.entries[0].offset, r"$\text{최대값}$과 ".len());
    }

    #[test]
    fn test_longest_match_first() {
        let dict = TypoDictionary::default();
        assert_eq!(dict.apply("그러면 않된다").text, "그러면 안 된다");
        assert_eq!(dict.apply("않되고").text, "안 되고");
    }

    #[test]
    fn test_extra_typos() {
        let mut extra = HashMap::new();
        extra.insert("넓이값".to_string(), "넓잇값".to_string());
        extra.insert("갯수".to_string(), "개수(個數)".to_string());
        extra.insert(String::new(), "무시".to_string());
        let dict = TypoDictionary::new(&extra, 10);
        assert_eq!(dict.lookup("넓이값"), Some("넓잇값"));
        assert_eq!(dict.apply("넓이값과 갯수").text, "넓잇값과 개수(個數)");
    }

    #[test]
    fn test_idempotent() {
        let dict = TypoDictionary::default();
        let once = dict.apply("자리수, 절대값, 몇일");
        let twice = dict.apply(&once.text);
        assert_eq!(twice.text, once.text);
        assert!(twice.entries.is_empty());
    }

    #[test]
    fn test_circled_consonant_particles() {
        let result = PlainJosaCorrector::default().run("점 ㉠는 직선 위에 있다");
        assert_eq!(result.text, "점 ㉠은 직선 위에 있다");
        assert_eq!(result.entries.len(), 1);
        let entry = &result.entries[0];
        assert_eq!(entry.target, "㉠는");
        assert_eq!(entry.original, "는");
        assert_eq!(entry.corrected, "은");
        assert_eq!(entry.reason, CorrectionReason::ParticleAgreement);
        assert_eq!(entry.offset, "점 ".len());

        assert_eq!(fix_particles("㉣으로 표시"), "㉣로 표시");
        assert_eq!(fix_particles("㉡로 표시"), "㉡으로 표시");
    }

    #[test]
    fn test_hangul_particles() {
        assert_eq!(fix_particles("수을 구하시오"), "수를 구하시오");
        assert_eq!(fix_particles("길으로 간다"), "길로 간다");
        assert_eq!(fix_particles("선분와 점"), "선분과 점");
        // 조사 뒤에 한글이 이어지면 단어의 일부
        assert_eq!(fix_particles("수이다"), "수이다");
        assert_eq!(fix_particles("점이면"), "점이면");
    }

    #[test]
    fn test_particle_exceptions() {
        for text in ["두 점 사이 거리", "경로 위", "있는 수", "결과 값", "작은 원"] {
            assert_eq!(fix_particles(text), text);
        }
    }

    #[test]
    fn test_particles_inside_formula_untouched() {
        let result = PlainJosaCorrector::default().run("$수을$ 수을");
        assert_eq!(result.text, "$수을$ 수를");
        assert_eq!(result.entries[0].offset, "$수을$ ".len());
    }

    #[test]
    fn test_particles_idempotent() {
        let corrector = PlainJosaCorrector::default();
        let once = corrector.run("점 ㉠는 선분을 ㉣으로 나눈 수을 구한다");
        assert_eq!(once.entries.len(), 3);
        let twice = corrector.run(&once.text);
        assert_eq!(twice.text, once.text);
        assert!(twice.is_unchanged());
    }
}
