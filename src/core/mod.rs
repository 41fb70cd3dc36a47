//! 수식 해석 기반: 한글 유니코드, 중괄호 그룹, LaTeX 파서, 단순화, 대상 판별

pub mod braces;
pub mod classifier;
pub mod latex;
pub mod simplifier;
pub mod text;
pub mod unicode;

pub use classifier::{Target, TargetClassifier};
pub use latex::{Formula, Node, Operator};
pub use simplifier::simplify;
