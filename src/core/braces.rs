//! 중괄호 그룹 추출
//!
//! `{`부터 짝이 맞는 `}`까지의 내용을 중첩 깊이를 고려해 잘라냅니다.
//! `\{`, `\}`처럼 이스케이프된 중괄호는 구조 문자로 보지 않습니다.

/// 추출된 중괄호 그룹
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BraceGroup<'a> {
    /// 바깥 중괄호를 제외한 내용
    pub content: &'a str,
    /// 여는 중괄호의 바이트 위치
    pub start: usize,
    /// 닫는 중괄호 다음 바이트 위치
    pub end: usize,
}

/// `open` 위치의 `{`에서 시작하는 균형 잡힌 그룹을 추출
///
/// `open`이 `{`를 가리키지 않거나 그룹이 닫히지 않으면 None
pub fn extract_group(text: &str, open: usize) -> Option<BraceGroup<'_>> {
    let rest = text.get(open..)?;
    if !rest.starts_with('{') {
        return None;
    }

    let mut depth = 0usize;
    let mut escaped = false;
    for (i, ch) in rest.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(BraceGroup {
                        content: &rest[1..i],
                        start: open,
                        end: open + i + 1,
                    });
                }
            }
            _ => {}
        }
    }
    None
}
