pub mod envelope;

pub use envelope::parse_response;

use serde_json::Value;
use std::fmt;

/// 성공한 원격 호출의 디코딩된 페이로드
#[derive(Debug, Clone, PartialEq)]
pub enum InvocationResult {
    /// 본문이 JSON으로 디코딩된 경우 (JSON `null` 포함)
    Json(Value),
    /// JSON이 아닌 본문. trim된 원문 그대로
    Text(String),
}

impl InvocationResult {
    /// JSON 디코딩을 시도하고 실패하면 텍스트로 남깁니다.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => InvocationResult::Json(value),
            Err(_) => InvocationResult::Text(body.to_string()),
        }
    }

    /// 빈 결과 여부 (JSON `null`, 빈 텍스트, 빈 배열/객체)
    pub fn is_empty(&self) -> bool {
        match self {
            InvocationResult::Json(Value::Null) => true,
            InvocationResult::Json(Value::Array(items)) => items.is_empty(),
            InvocationResult::Json(Value::Object(map)) => map.is_empty(),
            InvocationResult::Json(_) => false,
            InvocationResult::Text(s) => s.is_empty(),
        }
    }

    /// 보안 토큰 문자열로 변환
    ///
    /// 문자열이 아닌 JSON 값은 compact JSON 텍스트로 저장됩니다.
    pub fn into_token(self) -> String {
        match self {
            InvocationResult::Json(Value::String(s)) => s,
            InvocationResult::Text(s) => s,
            InvocationResult::Json(other) => other.to_string(),
        }
    }

    /// 쿼리 결과 레코드 목록으로 변환
    pub fn into_records(self) -> Vec<Value> {
        match self {
            InvocationResult::Json(Value::Array(items)) => items,
            InvocationResult::Json(Value::Null) => Vec::new(),
            InvocationResult::Json(other) => vec![other],
            InvocationResult::Text(s) if s.is_empty() => Vec::new(),
            InvocationResult::Text(s) => vec![Value::String(s)],
        }
    }
}

impl fmt::Display for InvocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationResult::Json(value) => write!(f, "{}", value),
            InvocationResult::Text(text) => f.write_str(text),
        }
    }
}
