//! LaTeX 수식 조각 파서
//!
//! 조사 호응 판단에 필요한 만큼만 구조를 읽습니다. 매크로 확장이나
//! 사용자 정의 명령은 다루지 않으며, 알 수 없는 명령은 `Command` 노드로 남깁니다.
//!
//! 공백은 읽는 소리에 영향이 없으므로 파싱 단계에서 버립니다.

use std::fmt;

use super::braces::extract_group;

/// 분수 명령 이름
const FRACTION_COMMANDS: [&str; 4] = ["frac", "dfrac", "tfrac", "cfrac"];

/// 그룹/명령 인자 중첩 한도. 넘어서는 `{`, `}`, `\`는 일반 문자 노드로 남음
pub const MAX_NESTING: usize = 64;

/// 최상위 분할 기준이 되는 이항/관계 연산자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Approx,
    Ne,
    Lt,
    Gt,
    Ge,
    Le,
    Times,
    Div,
    Plus,
    Minus,
    Cdot,
    Cap,
    Cup,
    SetMinus,
    Subset,
    SubsetEq,
    In,
    Ni,
}

impl Operator {
    /// 단일 문자 연산자
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '=' => Some(Operator::Eq),
            '<' => Some(Operator::Lt),
            '>' => Some(Operator::Gt),
            '+' => Some(Operator::Plus),
            '-' => Some(Operator::Minus),
            _ => None,
        }
    }

    /// 명령형 연산자 (`\le`, `\times` 등)
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            "approx" => Some(Operator::Approx),
            "ne" | "neq" => Some(Operator::Ne),
            "ge" | "geq" => Some(Operator::Ge),
            "le" | "leq" => Some(Operator::Le),
            "times" => Some(Operator::Times),
            "div" => Some(Operator::Div),
            "cdot" => Some(Operator::Cdot),
            "cap" => Some(Operator::Cap),
            "cup" => Some(Operator::Cup),
            "setminus" => Some(Operator::SetMinus),
            "subset" => Some(Operator::Subset),
            "subseteq" => Some(Operator::SubsetEq),
            "in" => Some(Operator::In),
            "ni" => Some(Operator::Ni),
            _ => None,
        }
    }

    /// LaTeX 표기
    pub fn as_latex(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Approx => r"\approx",
            Operator::Ne => r"\ne",
            Operator::Lt => "<",
            Operator::Gt => ">",
            Operator::Ge => r"\ge",
            Operator::Le => r"\le",
            Operator::Times => r"\times",
            Operator::Div => r"\div",
            Operator::Plus => "+",
            Operator::Minus => "-",
            Operator::Cdot => r"\cdot",
            Operator::Cap => r"\cap",
            Operator::Cup => r"\cup",
            Operator::SetMinus => r"\setminus",
            Operator::Subset => r"\subset",
            Operator::SubsetEq => r"\subseteq",
            Operator::In => r"\in",
            Operator::Ni => r"\ni",
        }
    }
}

/// 수식 구문 노드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// 보이는 문자 하나 (문자, 숫자, 괄호, 구두점, 한글 등)
    Atom(char),
    /// 인자를 따로 해석하지 않는 명령 (`\alpha`, `\left`, `\{` 등)
    Command(String),
    /// 최상위 분할 연산자
    Operator(Operator),
    /// `{...}` 그룹
    Group(Vec<Node>),
    /// `\frac{num}{den}`
    Fraction { num: Vec<Node>, den: Vec<Node> },
    /// `\sqrt[index]{radicand}`
    Root {
        index: Option<Vec<Node>>,
        radicand: Vec<Node>,
    },
    /// `^` 지수 인자
    Sup(Vec<Node>),
    /// `_` 첨자 인자
    Sub(Vec<Node>),
    /// `\mathrm{단위}` (영문자만으로 된 경우)
    Unit(String),
}

/// 파싱된 수식 조각
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Formula {
    nodes: Vec<Node>,
}

impl Formula {
    /// LaTeX 문자열을 파싱 (실패하지 않음)
    ///
    /// 닫히지 않은 `{`나 짝 없는 `}`는 일반 문자 노드로 남습니다.
    /// [`MAX_NESTING`]보다 깊은 중첩도 풀지 않고 문자 노드로 둡니다.
    pub fn parse(src: &str) -> Self {
        Self {
            nodes: Parser::new(src, 0).parse_sequence(),
        }
    }

    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    /// 현재 중첩 깊이
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str, depth: usize) -> Self {
        Self { src, pos: 0, depth }
    }

    fn can_descend(&self) -> bool {
        self.depth < MAX_NESTING
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.bump();
        }
    }

    fn parse_sequence(&mut self) -> Vec<Node> {
        let mut nodes = Vec::new();
        while let Some(node) = self.next_node() {
            nodes.push(node);
        }
        nodes
    }

    fn next_node(&mut self) -> Option<Node> {
        self.skip_whitespace();
        let c = self.peek()?;
        match c {
            '{' => Some(self.parse_group().unwrap_or_else(|| {
                self.bump();
                Node::Atom('{')
            })),
            '\\' => {
                self.bump();
                Some(self.parse_command())
            }
            '^' => {
                self.bump();
                Some(Node::Sup(self.parse_script_arg()))
            }
            '_' => {
                self.bump();
                Some(Node::Sub(self.parse_script_arg()))
            }
            _ => {
                self.bump();
                Some(match Operator::from_char(c) {
                    Some(op) => Node::Operator(op),
                    None => Node::Atom(c),
                })
            }
        }
    }

    /// 현재 위치의 `{...}`를 그룹 노드로 (닫히지 않았거나 너무 깊으면 None, 위치 유지)
    fn parse_group(&mut self) -> Option<Node> {
        if !self.can_descend() {
            return None;
        }
        let group = extract_group(self.src, self.pos)?;
        self.pos = group.end;
        let nodes = Parser::new(group.content, self.depth + 1).parse_sequence();
        Some(Node::Group(nodes))
    }

    /// `\` 다음부터 명령 이름을 읽고 구조 명령이면 인자까지 해석
    fn parse_command(&mut self) -> Node {
        let name = self.read_command_name();
        if name.is_empty() {
            return Node::Atom('\\');
        }

        if FRACTION_COMMANDS.contains(&name.as_str()) {
            return self.parse_fraction().unwrap_or(Node::Command(name));
        }
        if name == "sqrt" {
            return self.parse_root().unwrap_or(Node::Command(name));
        }
        if name == "mathrm" {
            if let Some(unit) = self.parse_unit() {
                return unit;
            }
        }
        match Operator::from_command(&name) {
            Some(op) => Node::Operator(op),
            None => Node::Command(name),
        }
    }

    fn read_command_name(&mut self) -> String {
        let start = self.pos;
        match self.peek() {
            Some(c) if c.is_ascii_alphabetic() => {
                while matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
                    self.bump();
                }
                self.src[start..self.pos].to_string()
            }
            Some(c) => {
                self.bump();
                c.to_string()
            }
            None => String::new(),
        }
    }

    /// 명령 인자 하나: 그룹, 명령, 또는 영숫자 한 글자
    fn parse_arg(&mut self) -> Option<Vec<Node>> {
        self.skip_whitespace();
        match self.peek()? {
            '{' => match self.parse_group()? {
                Node::Group(nodes) => Some(nodes),
                other => Some(vec![other]),
            },
            '\\' if self.can_descend() => {
                self.bump();
                self.depth += 1;
                let command = self.parse_command();
                self.depth -= 1;
                Some(vec![command])
            }
            c if c.is_alphanumeric() => {
                self.bump();
                Some(vec![Node::Atom(c)])
            }
            _ => None,
        }
    }

    /// `^`/`_` 인자. 바로 뒤의 부호는 지수에 속함 (`x^-1`)
    fn parse_script_arg(&mut self) -> Vec<Node> {
        self.skip_whitespace();
        match self.peek() {
            Some(sign @ ('+' | '-')) => {
                self.bump();
                let mut nodes = vec![Node::Atom(sign)];
                if let Some(rest) = self.parse_arg() {
                    nodes.extend(rest);
                }
                nodes
            }
            _ => self.parse_arg().unwrap_or_default(),
        }
    }

    fn parse_fraction(&mut self) -> Option<Node> {
        let saved = self.pos;
        let parsed = self
            .parse_arg()
            .and_then(|num| self.parse_arg().map(|den| Node::Fraction { num, den }));
        if parsed.is_none() {
            self.pos = saved;
        }
        parsed
    }

    fn parse_root(&mut self) -> Option<Node> {
        let saved = self.pos;
        self.skip_whitespace();

        let mut index = None;
        if self.peek() == Some('[') && self.can_descend() {
            if let Some(close) = self.src[self.pos..].find(']') {
                let inner = &self.src[self.pos + 1..self.pos + close];
                index = Some(Parser::new(inner, self.depth + 1).parse_sequence());
                self.pos += close + 1;
            }
        }

        match self.parse_arg() {
            Some(radicand) => Some(Node::Root { index, radicand }),
            None => {
                self.pos = saved;
                None
            }
        }
    }

    /// `\mathrm{cm}`처럼 영문자만 든 그룹이면 단위 노드
    fn parse_unit(&mut self) -> Option<Node> {
        let saved = self.pos;
        self.skip_whitespace();
        match extract_group(self.src, self.pos) {
            Some(group)
                if !group.content.is_empty()
                    && group.content.chars().all(|c| c.is_ascii_alphabetic()) =>
            {
                self.pos = group.end;
                Some(Node::Unit(group.content.to_string()))
            }
            _ => {
                self.pos = saved;
                None
            }
        }
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for node in nodes {
        write!(f, "{}", node)?;
    }
    Ok(())
}

fn write_braced(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    write!(f, "{{")?;
    write_nodes(f, nodes)?;
    write!(f, "}}")
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atom(c) => write!(f, "{}", c),
            Node::Command(name) if name.chars().all(|c| c.is_ascii_alphabetic()) => {
                write!(f, "\\{} ", name)
            }
            Node::Command(name) => write!(f, "\\{}", name),
            Node::Operator(op) => write!(f, "{}", op.as_latex()),
            Node::Group(nodes) => write_braced(f, nodes),
            Node::Fraction { num, den } => {
                write!(f, r"\frac")?;
                write_braced(f, num)?;
                write_braced(f, den)
            }
            Node::Root { index, radicand } => {
                write!(f, r"\sqrt")?;
                if let Some(index) = index {
                    write!(f, "[")?;
                    write_nodes(f, index)?;
                    write!(f, "]")?;
                }
                write_braced(f, radicand)
            }
            Node::Sup(nodes) => {
                write!(f, "^")?;
                write_braced(f, nodes)
            }
            Node::Sub(nodes) => {
                write!(f, "_")?;
                write_braced(f, nodes)
            }
            Node::Unit(unit) => write!(f, r"\mathrm{{{}}}", unit),
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atoms(s: &str) -> Vec<Node> {
        s.chars().map(Node::Atom).collect()
    }

    #[test]
    fn test_plain_atoms_and_operators() {
        let f = Formula::parse("a + b = c");
        assert_eq!(
            f.nodes(),
            &[
                Node::Atom('a'),
                Node::Operator(Operator::Plus),
                Node::Atom('b'),
                Node::Operator(Operator::Eq),
                Node::Atom('c'),
            ]
        );
    }

    #[test]
    fn test_fraction() {
        let f = Formula::parse(r"\frac{a+b}{c}");
        assert_eq!(
            f.nodes(),
            &[Node::Fraction {
                num: vec![Node::Atom('a'), Node::Operator(Operator::Plus), Node::Atom('b')],
                den: atoms("c"),
            }]
        );

        // 한 글자 인자
        let f = Formula::parse(r"\dfrac12");
        assert_eq!(
            f.nodes(),
            &[Node::Fraction {
                num: atoms("1"),
                den: atoms("2"),
            }]
        );
    }

    #[test]
    fn test_fraction_missing_argument() {
        let f = Formula::parse(r"\frac{a}");
        assert_eq!(
            f.nodes(),
            &[Node::Command("frac".into()), Node::Group(atoms("a"))]
        );
    }

    #[test]
    fn test_root_with_index() {
        let f = Formula::parse(r"\sqrt[3]{x}");
        assert_eq!(
            f.nodes(),
            &[Node::Root {
                index: Some(atoms("3")),
                radicand: atoms("x"),
            }]
        );
    }

    #[test]
    fn test_script_sign_belongs_to_exponent() {
        let f = Formula::parse("x^-1");
        assert_eq!(
            f.nodes(),
            &[Node::Atom('x'), Node::Sup(vec![Node::Atom('-'), Node::Atom('1')])]
        );

        let f = Formula::parse(r"30^\circ");
        assert_eq!(
            f.nodes(),
            &[
                Node::Atom('3'),
                Node::Atom('0'),
                Node::Sup(vec![Node::Command("circ".into())]),
            ]
        );
    }

    #[test]
    fn test_unit_and_commands() {
        let f = Formula::parse(r"3\mathrm{cm}");
        assert_eq!(f.nodes()[1], Node::Unit("cm".into()));

        let f = Formula::parse(r"\mathrm{A B}");
        assert_eq!(f.nodes()[0], Node::Command("mathrm".into()));

        let f = Formula::parse(r"x \le y");
        assert_eq!(f.nodes()[1], Node::Operator(Operator::Le));

        // 정확한 이름만 연산자로 인정
        let f = Formula::parse(r"\infty");
        assert_eq!(f.nodes(), &[Node::Command("infty".into())]);
    }

    #[test]
    fn test_escaped_braces_and_left_right() {
        let f = Formula::parse(r"\left\{ x \right\}");
        assert_eq!(
            f.nodes(),
            &[
                Node::Command("left".into()),
                Node::Command("{".into()),
                Node::Atom('x'),
                Node::Command("right".into()),
                Node::Command("}".into()),
            ]
        );
    }

    #[test]
    fn test_unbalanced_braces_become_atoms() {
        let f = Formula::parse("{a");
        assert_eq!(f.nodes(), &[Node::Atom('{'), Node::Atom('a')]);

        let f = Formula::parse("a}");
        assert_eq!(f.nodes(), &[Node::Atom('a'), Node::Atom('}')]);
    }

    #[test]
    fn test_deep_nesting_stops_at_limit() {
        let depth = 3000;
        let src = format!("{}x{}", "{".repeat(depth), "}".repeat(depth));
        let f = Formula::parse(&src);

        let mut nodes = f.nodes();
        let mut levels = 0;
        while let [Node::Group(inner)] = nodes {
            nodes = inner.as_slice();
            levels += 1;
        }
        assert_eq!(levels, MAX_NESTING);
        assert_eq!(nodes.len(), 2 * (depth - MAX_NESTING) + 1);
        assert_eq!(nodes[0], Node::Atom('{'));
        assert_eq!(nodes[depth - MAX_NESTING], Node::Atom('x'));
    }

    #[test]
    fn test_deep_command_chain_does_not_overflow() {
        let src = format!("{}x", r"\frac".repeat(5000));
        assert!(!Formula::parse(&src).is_empty());

        let src = format!("{}x", r"\sqrt".repeat(5000));
        assert!(!Formula::parse(&src).is_empty());
    }

    #[test]
    fn test_display_roundtrip_is_stable() {
        let src = r"\frac{x^{2}}{\sqrt[3]{y}}+\mathrm{kg}";
        let once = Formula::parse(src).to_string();
        let twice = Formula::parse(&once).to_string();
        assert_eq!(once, twice);
    }
}
