//! 조사 교정 정책 설정
//!
//! 판본마다 달랐던 휴리스틱을 하드코딩하지 않고 정책으로 둡니다.

/// 조사 교정 정책
#[derive(Debug, Clone)]
pub struct JosaPolicy {
    /// 이상/이하/이내/이외/미만/초과 보호
    pub protect_range_words: bool,

    /// 지수 인자에 `C`가 있으면 여집합으로 읽음
    /// false면 `C`라는 변수의 거듭제곱("제곱")으로 읽음
    pub complement_on_caret_c: bool,

    /// 수식 바로 뒤에 붙은 마침표 제거
    pub strip_glued_periods: bool,

    /// 수식과 조사 사이 공백/줄바꿈 최대 길이 (글자 수)
    pub max_bridge_chars: usize,

    /// 로그 문맥 앞뒤 글자 수
    pub context_window: usize,

    /// 추가 보호 단어
    pub extra_protected_words: Vec<String>,
}

impl Default for JosaPolicy {
    fn default() -> Self {
        Self {
            protect_range_words: true,
            complement_on_caret_c: true,
            strip_glued_periods: true,
            max_bridge_chars: 8,
            context_window: 10,
            extra_protected_words: Vec::new(),
        }
    }
}

impl JosaPolicy {
    /// 새 정책 생성
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_range_words_protected(mut self, protect: bool) -> Self {
        self.protect_range_words = protect;
        self
    }

    pub fn with_complement_on_caret_c(mut self, enabled: bool) -> Self {
        self.complement_on_caret_c = enabled;
        self
    }

    pub fn with_glued_period_stripping(mut self, enabled: bool) -> Self {
        self.strip_glued_periods = enabled;
        self
    }

    pub fn with_max_bridge_chars(mut self, max: usize) -> Self {
        self.max_bridge_chars = max;
        self
    }

    pub fn with_context_window(mut self, window: usize) -> Self {
        self.context_window = window;
        self
    }

    /// 보호 단어 추가
    pub fn with_protected_word(mut self, word: impl Into<String>) -> Self {
        self.extra_protected_words.push(word.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = JosaPolicy::default();
        assert!(policy.protect_range_words);
        assert!(policy.complement_on_caret_c);
        assert!(policy.strip_glued_periods);
        assert_eq!(policy.max_bridge_chars, 8);
        assert_eq!(policy.context_window, 10);
    }

    #[test]
    fn test_builder_pattern() {
        let policy = JosaPolicy::new()
            .with_range_words_protected(false)
            .with_complement_on_caret_c(false)
            .with_max_bridge_chars(2)
            .with_protected_word("이차");

        assert!(!policy.protect_range_words);
        assert!(!policy.complement_on_caret_c);
        assert_eq!(policy.max_bridge_chars, 2);
        assert_eq!(policy.extra_protected_words, vec!["이차".to_string()]);
    }
}
