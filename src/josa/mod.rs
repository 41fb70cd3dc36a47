//! 수식 뒤 조사 호응 교정
//!
//! `$...$` 수식 바로 뒤에 붙은 조사(은/는, 이/가, 으로/로 …)가
//! 수식을 소리 내어 읽었을 때의 받침과 맞는지 검사하고 고칩니다.
//!
//! # 사용 예시
//!
//! ```
//! use mathjosa::josa::{JosaCorrector, JosaPolicy};
//!
//! let corrector = JosaCorrector::new(JosaPolicy::default());
//! let result = corrector.run("$x$이 양수이고 $3$로 나눈 나머지");
//! assert_eq!(result.text, "$x$가 양수이고 $3$으로 나눈 나머지");
//! assert_eq!(result.entries.len(), 2);
//! ```

pub mod batchim;
mod particle;
mod policy;
mod scanner;

pub use batchim::BatchimDecision;
pub use particle::{
    find_allomorph, ParticlePair, ParticleRewriter, ProtectedWords, PARTICLE_PAIRS,
};
pub use policy::JosaPolicy;
pub use scanner::{JosaCorrector, ScanResult};
