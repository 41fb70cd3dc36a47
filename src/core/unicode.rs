//! 유니코드 한글 음절 분해 및 받침 판별 유틸리티

/// 한글 음절 시작 코드포인트 (가)
const HANGUL_SYLLABLE_BASE: u32 = 0xAC00;
/// 한글 음절 끝 코드포인트 (힣)
const HANGUL_SYLLABLE_LAST: u32 = 0xD7A3;

/// 중성 개수
const JUNGSEONG_COUNT: u32 = 21;
/// 종성 개수 (종성 없음 포함)
const JONGSEONG_COUNT: u32 = 28;

/// ㄹ 종성 인덱스
pub const JONGSEONG_RIEUL: u32 = 8;

/// 문자가 완성형 한글(가-힣)인지 확인
pub fn is_complete_hangul(ch: char) -> bool {
    (HANGUL_SYLLABLE_BASE..=HANGUL_SYLLABLE_LAST).contains(&(ch as u32))
}

/// 완성형 한글을 초성/중성/종성 인덱스로 분해
/// 반환: (초성 인덱스, 중성 인덱스, 종성 인덱스)
pub fn decompose_syllable(c: char) -> Option<(u32, u32, u32)> {
    if !is_complete_hangul(c) {
        return None;
    }
    let offset = c as u32 - HANGUL_SYLLABLE_BASE;
    let jongseong = offset % JONGSEONG_COUNT;
    let jungseong = (offset / JONGSEONG_COUNT) % JUNGSEONG_COUNT;
    let choseong = offset / (JUNGSEONG_COUNT * JONGSEONG_COUNT);
    Some((choseong, jungseong, jongseong))
}

/// 완성형 한글의 종성 인덱스 (0 = 받침 없음)
pub fn jongseong_index(c: char) -> Option<u32> {
    decompose_syllable(c).map(|(_, _, jong)| jong)
}

/// 받침 유무: (코드포인트 - 0xAC00) % 28 != 0
/// 완성형 한글이 아니면 None
pub fn has_final_consonant(c: char) -> Option<bool> {
    jongseong_index(c).map(|jong| jong != 0)
}

/// ㄹ 받침 여부: (코드포인트 - 0xAC00) % 28 == 8
pub fn is_rieul_final(c: char) -> bool {
    jongseong_index(c) == Some(JONGSEONG_RIEUL)
}

/// 호환용 자음 자모(ㄱ-ㅎ)인지 확인
pub fn is_compat_consonant(c: char) -> bool {
    ('\u{3131}'..='\u{314E}').contains(&c)
}

/// 원문자 자음(㉠-㉭)인지 확인
pub fn is_circled_consonant(c: char) -> bool {
    ('\u{3260}'..='\u{326D}').contains(&c)
}
