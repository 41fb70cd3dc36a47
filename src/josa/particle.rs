//! 조사 이형태 표와 교체
//!
//! 조사 토큰의 앞부분에서 가장 긴 이형태를 찾아 받침에 맞는 형태로 바꾸고,
//! 그 뒤에 붙은 어미("이면" + "서")는 그대로 둡니다.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::batchim::BatchimDecision;

/// 한 조사의 두 이형태 (받침 있을 때, 받침 없을 때)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticlePair {
    pub with_final: &'static str,
    pub without_final: &'static str,
}

const fn pair(with_final: &'static str, without_final: &'static str) -> ParticlePair {
    ParticlePair {
        with_final,
        without_final,
    }
}

/// 이형태 쌍 (우선순위 순: 연결 어미가 단음절 조사보다 앞)
pub const PARTICLE_PAIRS: [ParticlePair; 10] = [
    pair("이므로", "므로"),
    pair("이라서", "라서"),
    pair("이라고", "라고"),
    pair("이라", "라"),
    pair("이면", "면"),
    pair("은", "는"),
    pair("이", "가"),
    pair("을", "를"),
    pair("과", "와"),
    pair("으로", "로"),
];

/// 조사로 오인하면 안 되는 단어와 고정 어미
pub const PROTECTED_WORDS: [&str; 31] = [
    "이다", "입니다", "이므로", "이며", "이고", "이나", "이면서", "이지만", "이어서",
    "이때", "이어야", "가지", "이은", "이을", "이어", "이으므로", "이어진", "이루어진",
    "이루는", "이동", "이용", "없는", "있는", "없고", "있고", "없이", "있어", "없어",
    // 수식 뒤에 붙여 쓰는 명사
    "이차", "이항", "이등분",
];

/// 범위를 나타내는 명사 (정책으로 보호 여부 결정)
pub const RANGE_WORDS: [&str; 6] = ["이상", "이하", "이내", "이외", "미만", "초과"];

/// 이형태 → 쌍 순위 (같은 이형태가 여러 쌍에 있으면 앞 순위)
static ALLOMORPH_INDEX: LazyLock<HashMap<&'static str, usize>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for (rank, p) in PARTICLE_PAIRS.iter().enumerate() {
        index.entry(p.with_final).or_insert(rank);
        index.entry(p.without_final).or_insert(rank);
    }
    index
});

/// 토큰 앞부분과 일치하는 가장 긴 이형태
///
/// 반환: (조사 쌍, 일치한 이형태)
pub fn find_allomorph(token: &str) -> Option<(&'static ParticlePair, &'static str)> {
    let ends = token.char_indices().map(|(i, c)| i + c.len_utf8()).rev();
    for end in ends {
        if let Some((&allomorph, &rank)) = ALLOMORPH_INDEX.get_key_value(&token[..end]) {
            return Some((&PARTICLE_PAIRS[rank], allomorph));
        }
    }
    None
}

/// 토큰 전체가 이형태 하나와 정확히 같은지
pub fn is_exact_allomorph(token: &str) -> bool {
    ALLOMORPH_INDEX.contains_key(token)
}

/// 보호 단어 집합
#[derive(Debug, Clone)]
pub struct ProtectedWords {
    words: Vec<String>,
}

impl Default for ProtectedWords {
    fn default() -> Self {
        Self::new(true, &[])
    }
}

impl ProtectedWords {
    pub fn new(include_range_words: bool, extra: &[String]) -> Self {
        let mut words: Vec<String> = PROTECTED_WORDS.iter().map(|w| w.to_string()).collect();
        if include_range_words {
            words.extend(RANGE_WORDS.iter().map(|w| w.to_string()));
        }
        words.extend(extra.iter().filter(|w| !w.is_empty()).cloned());
        Self { words }
    }

    /// 토큰이 보호 단어로 시작하는지
    pub fn is_protected(&self, token: &str) -> bool {
        self.words.iter().any(|w| token.starts_with(w.as_str()))
    }
}

/// 조사 교체기
#[derive(Debug, Clone, Default)]
pub struct ParticleRewriter {
    protected: ProtectedWords,
}

impl ParticleRewriter {
    pub fn new(protected: ProtectedWords) -> Self {
        Self { protected }
    }

    pub fn is_protected(&self, token: &str) -> bool {
        self.protected.is_protected(token)
    }

    /// 받침 판정에 맞는 조사로 교체
    ///
    /// 보호 단어이거나 알 수 없는 조사면 원문 그대로 반환합니다.
    pub fn rewrite(&self, decision: BatchimDecision, token: &str) -> String {
        if self.is_protected(token) {
            return token.to_string();
        }
        let Some((pair, matched)) = find_allomorph(token) else {
            return token.to_string();
        };

        let chosen = if pair.with_final == "으로" {
            if decision.has_final && !decision.rieul_final {
                "으로"
            } else {
                "로"
            }
        } else if decision.has_final {
            pair.with_final
        } else {
            pair.without_final
        };

        format!("{}{}", chosen, &token[matched.len()..])
    }
}
