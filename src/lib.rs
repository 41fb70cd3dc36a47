//! mathjosa - 수학 문항 한국어 검수기
//!
//! LaTeX 수식 바로 뒤 조사의 받침 호응을 교정하고, 수식 표기와 단순 계산을
//! 검사하며, 수식 바깥 본문의 맞춤법 오타와 조사를 고칩니다.

pub mod config;
pub mod core;
pub mod envelope;
pub mod inspect;
pub mod josa;
pub mod report;
pub mod review;
pub mod spelling;

pub use config::{load_config, ConfigError, ReviewConfig};
pub use inspect::FormulaInspector;
pub use josa::{JosaCorrector, JosaPolicy, ScanResult};
pub use report::{CorrectionLogEntry, CorrectionReason, FormulaIssue, IssueKind};
pub use review::{ReviewReport, Reviewer};
pub use spelling::{PlainJosaCorrector, TypoDictionary};
