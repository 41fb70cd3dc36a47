//! 수식 단순화
//!
//! 조사 호응에 영향을 주는 마지막 항만 남기도록 수식을 줄입니다.
//! - `\left`, `\right` 장식 제거 (괄호 문자는 유지)
//! - `\frac{분자}{분모}` → 분자 (분수에 붙는 조사는 분자의 끝소리를 따름)
//! - `\sqrt[n]{...}`의 지수 `[n]` 제거
//! - 수식 전체를 감싼 중괄호 한 겹 벗기기
//!
//! 더 이상 바뀌지 않을 때까지 반복합니다. 규칙마다 노드 수가 줄거나
//! 지수가 사라지므로 반복은 반드시 끝납니다.

use super::latex::{Formula, Node};

/// 고정점에 도달할 때까지 단순화 규칙 적용
pub fn simplify(formula: &Formula) -> Formula {
    let mut current = formula.nodes().to_vec();
    loop {
        let next = unwrap_whole_group(reduce(&current));
        if next == current {
            return Formula::from_nodes(current);
        }
        current = next;
    }
}

/// 한 번의 단순화 패스 (중첩 그룹 안쪽까지)
fn reduce(nodes: &[Node]) -> Vec<Node> {
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            Node::Command(name) if name == "left" || name == "right" => {}
            Node::Fraction { num, .. } => out.extend(reduce(num)),
            Node::Root { radicand, .. } => out.push(Node::Root {
                index: None,
                radicand: reduce(radicand),
            }),
            Node::Group(inner) => out.push(Node::Group(reduce(inner))),
            Node::Sup(inner) => out.push(Node::Sup(reduce(inner))),
            Node::Sub(inner) => out.push(Node::Sub(reduce(inner))),
            other => out.push(other.clone()),
        }
    }
    out
}

fn unwrap_whole_group(mut nodes: Vec<Node>) -> Vec<Node> {
    if nodes.len() == 1 && matches!(nodes[0], Node::Group(_)) {
        if let Some(Node::Group(inner)) = nodes.pop() {
            return inner;
        }
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simplified(src: &str) -> String {
        simplify(&Formula::parse(src)).to_string()
    }

    #[test]
    fn test_left_right_removed() {
        assert_eq!(simplified(r"Q\left(n\right)"), "Q(n)");
        assert_eq!(simplified(r"\left| x \right|"), "|x|");
    }

    #[test]
    fn test_fraction_reduces_to_numerator() {
        assert_eq!(simplified(r"\frac{a}{b}"), "a");
        assert_eq!(simplified(r"2\frac{a+b}{c}"), "2a+b");
        // 중첩 분수
        assert_eq!(simplified(r"\frac{\frac{1}{x}}{y}"), "1");
    }

    #[test]
    fn test_fraction_equivalence() {
        for (num, den) in [("a+b", "c"), ("x^{2}", "3"), (r"\sqrt{2}", "k"), ("", "z")] {
            let frac = format!(r"\frac{{{}}}{{{}}}", num, den);
            assert_eq!(
                simplify(&Formula::parse(&frac)),
                simplify(&Formula::parse(num)),
                "{}",
                frac
            );
        }
    }

    #[test]
    fn test_root_index_removed() {
        assert_eq!(simplified(r"\sqrt[3]{x}"), r"\sqrt{x}");
        assert_eq!(simplified(r"\sqrt{2}"), r"\sqrt{2}");
    }

    #[test]
    fn test_whole_group_unwrapped() {
        assert_eq!(simplified("{{a+b}}"), "a+b");
        // 일부만 감싼 그룹은 유지
        assert_eq!(simplified("{a}+{b}"), "{a}+{b}");
    }

    #[test]
    fn test_unbalanced_input_terminates() {
        assert_eq!(simplified(r"\frac{a"), r"\frac {a");
        assert_eq!(simplified("{{a}"), "{{a}");
    }

    #[test]
    fn test_idempotent() {
        for src in [r"\frac{x}{y}", r"\left(\sqrt[n]{a}\right)", "{b}"] {
            let once = simplify(&Formula::parse(src));
            assert_eq!(simplify(&once), once);
        }
    }
}
