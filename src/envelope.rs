//! 입력 봉투 풀기
//!
//! 입력이 `{"result": "..."}` 형태의 JSON이면 `result` 문자열을 꺼내고,
//! 그 밖에는 입력 전체를 그대로 본문으로 씁니다. 실패하는 경우는 없습니다.

use serde::Deserialize;

#[derive(Deserialize)]
struct Envelope {
    result: String,
}

/// 본문 꺼내기
pub fn unwrap_text(raw: &str) -> String {
    let trimmed = raw.trim_start();
    if !trimmed.starts_with('{') {
        return raw.to_string();
    }
    match serde_json::from_str::<Envelope>(raw) {
        Ok(envelope) => envelope.result,
        Err(e) => {
            log::debug!("봉투 해석 실패, 원문 사용: {}", e);
            raw.to_string()
        }
    }
}
