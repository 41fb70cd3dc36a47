//! 수식 안 괄호 짝 검사
//!
//! `( ) { } [ ]`의 짝을 스택으로 맞춥니다. `\{`, `\}`는 집합 기호로 쓰이는
//! 글자일 뿐 구조 괄호가 아니므로 건너뜁니다.

/// 괄호 짝 오류
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketError {
    /// 짝이 없는 닫는 괄호 (수식 안 바이트 위치, 괄호)
    UnmatchedClose(usize, char),
    /// 닫히지 않은 여는 괄호 (수식 안 바이트 위치, 괄호)
    Unclosed(usize, char),
}

impl BracketError {
    pub fn position(&self) -> usize {
        match self {
            BracketError::UnmatchedClose(pos, _) | BracketError::Unclosed(pos, _) => *pos,
        }
    }

    pub fn message(&self) -> String {
        match self {
            BracketError::UnmatchedClose(_, c) => format!("닫는 괄호 '{}'의 짝이 맞지 않음", c),
            BracketError::Unclosed(_, c) => format!("여는 괄호 '{}'가 닫히지 않음", c),
        }
    }
}

fn opening_for(close: char) -> Option<char> {
    match close {
        ')' => Some('('),
        '}' => Some('{'),
        ']' => Some('['),
        _ => None,
    }
}

/// 괄호 짝 검사
///
/// 짝이 틀린 닫는 괄호를 만나면 기록하고 스택 맨 위를 버린 뒤 계속 진행합니다.
/// 끝까지 남은 여는 괄호는 여는 순서대로 기록합니다.
pub fn check_brackets(formula: &str) -> Vec<BracketError> {
    let mut errors = Vec::new();
    let mut stack: Vec<(usize, char)> = Vec::new();
    let mut chars = formula.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                // \{ \} 는 글자, \\ 는 줄바꿈
                if matches!(chars.peek(), Some((_, '{' | '}' | '\\'))) {
                    chars.next();
                }
            }
            '(' | '{' | '[' => stack.push((i, c)),
            ')' | '}' | ']' => {
                let expected = opening_for(c);
                match stack.last() {
                    Some(&(_, open)) if Some(open) == expected => {
                        stack.pop();
                    }
                    _ => {
                        errors.push(BracketError::UnmatchedClose(i, c));
                        stack.pop();
                    }
                }
            }
            _ => {}
        }
    }

    errors.extend(stack.into_iter().map(|(i, c)| BracketError::Unclosed(i, c)));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced() {
        assert!(check_brackets(r"\frac{a}{b} + (x+1)[2]").is_empty());
        assert!(check_brackets(r"\left\{ x \mid x > 0 \right\}").is_empty());
        assert!(check_brackets("").is_empty());
    }

    #[test]
    fn test_unclosed() {
        assert_eq!(check_brackets("f(x"), vec![BracketError::Unclosed(1, '(')]);
        assert_eq!(
            check_brackets(r"\frac{a}{b"),
            vec![BracketError::Unclosed(8, '{')]
        );
    }

    #[test]
    fn test_mismatched_close() {
        assert_eq!(check_brackets("x)"), vec![BracketError::UnmatchedClose(1, ')')]);
        assert_eq!(
            check_brackets("(a]"),
            vec![BracketError::UnmatchedClose(2, ']')]
        );
    }

    #[test]
    fn test_escaped_braces_ignored() {
        assert!(check_brackets(r"\{1, 2\}").is_empty());
        assert!(check_brackets(r"\{1, 2").is_empty());
        // 줄바꿈 뒤의 중괄호는 구조 괄호
        assert_eq!(check_brackets(r"a \\{"), vec![BracketError::Unclosed(4, '{')]);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            BracketError::UnmatchedClose(0, ')').message(),
            "닫는 괄호 ')'의 짝이 맞지 않음"
        );
        assert_eq!(BracketError::Unclosed(3, '{').position(), 3);
    }
}
