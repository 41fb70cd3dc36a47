//! 리포트용 문자열 도우미

use std::sync::LazyLock;

use regex::Regex;

/// 표시용으로 지우는 서식 명령
static STYLE_COMMAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\(left|right|mathrm|text|bf|it)").expect("valid style command regex")
});

/// `[start, end)` 바이트 구간 앞뒤로 `window`글자씩 잘라 문맥 문자열 생성
///
/// 줄바꿈은 공백으로 바꾸고 양끝에 `...`을 붙입니다.
pub fn snippet(text: &str, start: usize, end: usize, window: usize) -> String {
    let start = start.min(text.len());
    let end = end.clamp(start, text.len());

    let before: String = {
        let mut chars: Vec<char> = text[..start].chars().rev().take(window).collect();
        chars.reverse();
        chars.into_iter().collect()
    };
    let after: String = text[end..].chars().take(window).collect();

    let context = format!("{}{}{}", before, &text[start..end], after).replace('\n', " ");
    format!("...{}...", context)
}

/// LaTeX 수식을 사람이 읽기 쉬운 형태로 (표시 전용)
///
/// 예: `Q\left(n\right)` → `Q(n)`
pub fn readable_formula(latex: &str) -> String {
    STYLE_COMMAND_RE
        .replace_all(latex, "")
        .chars()
        .filter(|c| !matches!(c, '{' | '}' | '\\'))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_window() {
        let text = "0123456789abcdefghij";
        assert_eq!(snippet(text, 10, 11, 3), "...789abcd...");
        assert_eq!(snippet(text, 0, 2, 3), "...01234...");
        assert_eq!(snippet(text, 19, 20, 5), "...efghij...");
    }

    #[test]
    fn test_snippet_multibyte_and_newline() {
        let text = "가나다\n$x$는 라마";
        let start = text.find('$').unwrap();
        assert_eq!(snippet(text, start, start + 3, 2), "...다 $x$는 ...");
    }

    #[test]
    fn test_readable_formula() {
        assert_eq!(readable_formula(r"Q\left(n\right)"), "Q(n)");
        assert_eq!(readable_formula(r"5\mathrm{kg}"), "5kg");
        assert_eq!(readable_formula(r" \frac{a}{b} "), "fracab");
    }
}
