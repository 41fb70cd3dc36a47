//! 조사 호응 대상 판별
//!
//! 단순화된 수식을 최상위 연산자 기준으로 나눈 뒤 마지막 항을 읽어
//! 조사가 붙는 소리(대상)를 결정합니다. 중괄호 안의 연산자는 트리 안에
//! 있으므로 최상위 분할에 끼어들지 않습니다.

use super::latex::{Formula, Node};
use super::unicode::is_complete_hangul;

/// 길이 단위 (지수와 함께 쓰이면 "제곱미터"처럼 읽힘)
const LENGTH_UNITS: [&str; 4] = ["m", "cm", "mm", "km"];

/// 판별된 대상
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 마지막으로 읽히는 글자 (문자, 숫자, 한글)
    Glyph(String),
    /// `\mathrm{...}` 단위
    Unit(String),
    /// 거듭제곱 ("제곱")
    Power,
    /// 여집합 (`A^C`)
    Complement,
    /// 각도 ("도")
    Degree,
    /// 길이 단위의 거듭제곱 ("제곱미터")
    Metre,
    /// 읽을 글자가 남지 않음 (교정 불가)
    Empty,
}

impl Target {
    /// 로그용 키 표현
    pub fn key(&self) -> String {
        match self {
            Target::Glyph(s) => s.clone(),
            Target::Unit(unit) => format!("unit:{}", unit),
            Target::Power => "제곱".to_string(),
            Target::Complement => "여집합".to_string(),
            Target::Degree => "도".to_string(),
            Target::Metre => "미터".to_string(),
            Target::Empty => String::new(),
        }
    }
}

/// 대상 판별기
#[derive(Debug, Clone)]
pub struct TargetClassifier {
    /// 지수 인자에 `C`가 있으면 여집합으로 읽음
    pub complement_on_caret_c: bool,
}

impl Default for TargetClassifier {
    fn default() -> Self {
        Self {
            complement_on_caret_c: true,
        }
    }
}

impl TargetClassifier {
    pub fn new(complement_on_caret_c: bool) -> Self {
        Self {
            complement_on_caret_c,
        }
    }

    /// 단순화된 수식의 대상 판별
    pub fn classify(&self, formula: &Formula) -> Target {
        let term = last_term(formula.nodes());

        if any_node(term, &is_degree_marker) {
            return Target::Degree;
        }

        if any_node(term, &|n: &Node| matches!(n, Node::Sup(_))) {
            if self.complement_on_caret_c && any_node(term, &is_complement_exponent) {
                return Target::Complement;
            }
            if base_has_length_unit(term) {
                return Target::Metre;
            }
            return Target::Power;
        }

        if let Some(unit) = first_unit(term) {
            return Target::Unit(unit);
        }

        if let Some(c) = before_closing_parens(term) {
            return Target::Glyph(c.to_string());
        }

        let mut visible = Vec::new();
        collect_visible(term, &mut visible);
        match visible.last() {
            Some(c) => Target::Glyph(c.to_string()),
            None => Target::Empty,
        }
    }
}

/// 마지막 최상위 연산자 뒤의 항
fn last_term(nodes: &[Node]) -> &[Node] {
    match nodes.iter().rposition(|n| matches!(n, Node::Operator(_))) {
        Some(i) => &nodes[i + 1..],
        None => nodes,
    }
}

fn children(node: &Node) -> Vec<&[Node]> {
    match node {
        Node::Group(inner) | Node::Sup(inner) | Node::Sub(inner) => vec![inner.as_slice()],
        Node::Fraction { num, den } => vec![num.as_slice(), den.as_slice()],
        Node::Root { index, radicand } => {
            let mut v = Vec::with_capacity(2);
            if let Some(index) = index {
                v.push(index.as_slice());
            }
            v.push(radicand.as_slice());
            v
        }
        Node::Atom(_) | Node::Command(_) | Node::Operator(_) | Node::Unit(_) => Vec::new(),
    }
}

/// 중첩 포함 조건을 만족하는 노드가 있는지
fn any_node(nodes: &[Node], pred: &dyn Fn(&Node) -> bool) -> bool {
    nodes
        .iter()
        .any(|n| pred(n) || children(n).into_iter().any(|c| any_node(c, pred)))
}

fn is_degree_marker(node: &Node) -> bool {
    match node {
        Node::Command(name) => name == "degree",
        Node::Sup(inner) => inner
            .iter()
            .any(|n| matches!(n, Node::Command(name) if name == "circ")),
        _ => false,
    }
}

fn is_complement_exponent(node: &Node) -> bool {
    match node {
        Node::Sup(inner) => any_node(inner, &|n: &Node| matches!(n, Node::Atom('C'))),
        _ => false,
    }
}

/// 첫 지수 앞부분(밑)에 길이 단위가 있는지
fn base_has_length_unit(term: &[Node]) -> bool {
    let base_len = term
        .iter()
        .position(|n| matches!(n, Node::Sup(_)))
        .unwrap_or(term.len());
    any_node(&term[..base_len], &|n: &Node| {
        matches!(n, Node::Unit(unit) if LENGTH_UNITS.contains(&unit.as_str()))
    })
}

fn first_unit(nodes: &[Node]) -> Option<String> {
    for node in nodes {
        if let Node::Unit(unit) = node {
            return Some(unit.clone());
        }
        for child in children(node) {
            if let Some(unit) = first_unit(child) {
                return Some(unit);
            }
        }
    }
    None
}

/// `f(x)`처럼 닫는 괄호 앞의 글자 (함수 표기 읽기)
fn before_closing_parens(term: &[Node]) -> Option<char> {
    let closing = term
        .iter()
        .rev()
        .take_while(|n| matches!(n, Node::Atom(')')))
        .count();
    if closing == 0 || closing == term.len() {
        return None;
    }
    match term[term.len() - closing - 1] {
        Node::Atom(c) if c.is_ascii_alphanumeric() || is_complete_hangul(c) => Some(c),
        _ => None,
    }
}

/// 명령과 괄호, 마침표, 쉼표를 뺀 보이는 글자들
fn collect_visible(nodes: &[Node], out: &mut Vec<char>) {
    for node in nodes {
        match node {
            Node::Atom(c) => {
                if !matches!(*c, '{' | '}' | '(' | ')' | '[' | ']' | '.' | ',' | '\\') {
                    out.push(*c);
                }
            }
            Node::Operator(op) => {
                let latex = op.as_latex();
                if !latex.starts_with('\\') {
                    out.extend(latex.chars());
                }
            }
            Node::Unit(unit) => out.extend(unit.chars()),
            Node::Command(_) => {}
            _ => {
                for child in children(node) {
                    collect_visible(child, out);
                }
            }
        }
    }
}
