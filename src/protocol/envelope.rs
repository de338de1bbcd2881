//! `OK:` / `Error #:` 응답 봉투 디코더
//!
//! 서버 응답은 다음 형태입니다.
//!
//! ```text
//! OK:\r\ntrue                      → true
//! Error 12:\r\nBad query id        → ProtocolError(12, "Bad query id")
//! ```

use super::InvocationResult;
use crate::error::ProtocolError;

const MALFORMED_MESSAGE: &str = "Unable to parse the server's response";

/// 파싱 도중에만 존재하는 봉투. 호출자에게 노출되지 않습니다.
#[derive(Debug, PartialEq, Eq)]
enum Envelope<'a> {
    Ok { body: &'a str },
    ServerError { code: i64, body: &'a str },
    Malformed,
    Unknown { status: &'a str, code: i64, body: &'a str },
}

impl<'a> Envelope<'a> {
    fn parse(text: &'a str) -> Self {
        let Some((status_line, body)) = text.split_once(':') else {
            return Envelope::Malformed;
        };
        let body = body.trim();

        let mut tokens = status_line.split(' ');
        match tokens.next().unwrap_or_default() {
            "OK" => Envelope::Ok { body },
            "Error" => match tokens.next().and_then(|code| code.parse::<i64>().ok()) {
                Some(code) => Envelope::ServerError { code, body },
                None => Envelope::Malformed,
            },
            status => Envelope::Unknown { status, code: 0, body },
        }
    }
}

/// 원격 호출의 원본 응답 텍스트를 해석합니다.
///
/// 성공 본문은 JSON으로 디코딩을 시도하고, 실패하면 trim된 텍스트를 그대로 돌려줍니다.
///
/// # Examples
/// ```
/// use epo_remote::protocol::{parse_response, InvocationResult};
///
/// let result = parse_response("OK:\r\ntrue").unwrap();
/// assert_eq!(result, InvocationResult::Json(serde_json::json!(true)));
///
/// let err = parse_response("Error 12:\r\nBad query id").unwrap_err();
/// assert_eq!(err.code(), 12);
/// ```
pub fn parse_response(text: &str) -> Result<InvocationResult, ProtocolError> {
    match Envelope::parse(text) {
        Envelope::Ok { body } => Ok(InvocationResult::from_body(body)),
        Envelope::ServerError { code, body } => Err(ProtocolError::new(code, body)),
        Envelope::Malformed => Err(ProtocolError::new(
            ProtocolError::MALFORMED_CODE,
            MALFORMED_MESSAGE,
        )),
        Envelope::Unknown { status, code, body } => Err(ProtocolError::new(
            code,
            format!("Unknown error occurred.  Status: ({}) Result: {}", status, body),
        )),
    }
}
