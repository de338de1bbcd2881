use thiserror::Error;

/// 서버가 실패를 보고했거나 응답 봉투를 해석할 수 없을 때의 에러
///
/// 알 수 없는 상태 단어는 코드 0으로 보고됩니다.
///
/// `Display`는 서버가 보낸 메시지만 출력합니다. 코드는 `code()`로 확인합니다.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProtocolError {
    code: i64,
    message: String,
}

impl ProtocolError {
    /// 응답 봉투 자체를 해석하지 못했을 때 사용하는 코드
    pub const MALFORMED_CODE: i64 = 1;

    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
pub enum EpoError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EpoError {
    /// 서버 프로토콜 에러라면 그 코드를 반환
    pub fn protocol_code(&self) -> Option<i64> {
        match self {
            EpoError::Protocol(e) => Some(e.code()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, EpoError>;
