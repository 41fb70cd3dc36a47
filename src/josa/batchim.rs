//! 받침 판별
//!
//! 대상이 소리 내어 읽힐 때 받침(종성)으로 끝나는지, 그 받침이 ㄹ인지 판별합니다.
//! ㄹ 받침 뒤에서는 "으로" 대신 "로"를 씁니다.
//!
//! 숫자: 영(ㅇ) 일(ㄹ) 이 삼(ㅁ) 사 오 육(ㄱ) 칠(ㄹ) 팔(ㄹ) 구, 십(ㅂ)
//! 영문자: 엘(ㄹ) 엠(ㅁ) 엔(ㄴ) 알(ㄹ), 나머지는 모음으로 끝남

use crate::core::classifier::Target;
use crate::core::unicode::{
    has_final_consonant, is_circled_consonant, is_compat_consonant, is_rieul_final,
};

/// 받침 판정 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchimDecision {
    /// 받침 있음
    pub has_final: bool,
    /// ㄹ 받침
    pub rieul_final: bool,
}

impl BatchimDecision {
    pub const VOWEL: Self = Self {
        has_final: false,
        rieul_final: false,
    };
    pub const CONSONANT: Self = Self {
        has_final: true,
        rieul_final: false,
    };
    pub const RIEUL: Self = Self {
        has_final: true,
        rieul_final: true,
    };
}

/// 대상의 받침 판정 (읽을 수 없는 대상이면 None)
pub fn resolve(target: &Target) -> Option<BatchimDecision> {
    match target {
        Target::Glyph(key) => resolve_key(key),
        Target::Unit(unit) => Some(resolve_unit(unit)),
        // 제곱, 여집합
        Target::Power | Target::Complement => Some(BatchimDecision::CONSONANT),
        // 도, 제곱미터
        Target::Degree | Target::Metre => Some(BatchimDecision::VOWEL),
        Target::Empty => None,
    }
}

/// 단위 읽기의 받침 (모르는 단위는 받침 없음)
pub fn resolve_unit(unit: &str) -> BatchimDecision {
    match unit {
        // 그램
        "g" | "kg" | "mg" => BatchimDecision::CONSONANT,
        // m, cm, L, mL, A, V, W, Hz, deg 등 (미터, 리터, 암페어, 볼트, 와트, 헤르츠, 도)
        _ => BatchimDecision::VOWEL,
    }
}

/// 글자 키의 받침 판정
///
/// 표에 있는 키("10" 포함)는 그대로, 그 밖의 여러 글자 키는 마지막 글자로 판정합니다.
pub fn resolve_key(key: &str) -> Option<BatchimDecision> {
    if key == "10" {
        return Some(BatchimDecision::CONSONANT);
    }
    key.chars().last().and_then(resolve_char)
}

/// 글자 하나의 받침 판정
pub fn resolve_char(c: char) -> Option<BatchimDecision> {
    match c {
        '1' | '7' | '8' => Some(BatchimDecision::RIEUL),
        '0' | '3' | '6' => Some(BatchimDecision::CONSONANT),
        '2' | '4' | '5' | '9' => Some(BatchimDecision::VOWEL),
        'L' | 'l' | 'R' | 'r' => Some(BatchimDecision::RIEUL),
        'M' | 'm' | 'N' | 'n' => Some(BatchimDecision::CONSONANT),
        c if c.is_ascii_alphabetic() => Some(BatchimDecision::VOWEL),
        'ㄹ' | '㉣' => Some(BatchimDecision::RIEUL),
        c if is_compat_consonant(c) || is_circled_consonant(c) => {
            Some(BatchimDecision::CONSONANT)
        }
        c => has_final_consonant(c).map(|has_final| BatchimDecision {
            has_final,
            rieul_final: is_rieul_final(c),
        }),
    }
}
