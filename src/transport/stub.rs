use super::{Credentials, QueryParams, Transport};
use crate::error::{EpoError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// 스텁 전송 계층이 기록한 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub params: QueryParams,
    pub auth: Option<Credentials>,
}

impl RecordedRequest {
    /// URL의 `/remote/` 뒤 action 이름
    pub fn action(&self) -> &str {
        action_of(&self.url)
    }
}

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Failure(String),
}

/// 네트워크 없이 action별로 미리 정해둔 응답을 돌려주는 테스트용 전송 계층
///
/// action마다 응답 큐를 가지며, 마지막 응답은 소진되지 않고 계속 반복됩니다.
#[derive(Default)]
pub struct StubTransport {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// action에 대한 응답 텍스트 추가
    pub fn reply(self, action: &str, text: impl Into<String>) -> Self {
        self.push(action, Reply::Text(text.into()));
        self
    }

    /// action에 대한 전송 실패 추가
    pub fn fail(self, action: &str, message: impl Into<String>) -> Self {
        self.push(action, Reply::Failure(message.into()));
        self
    }

    /// 지금까지 받은 요청 목록
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    fn push(&self, action: &str, reply: Reply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.entry(action.to_string()).or_default().push_back(reply);
        }
    }

    fn next_reply(&self, action: &str) -> Option<Reply> {
        let mut replies = self.replies.lock().ok()?;
        let queue = replies.get_mut(action)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        auth: Option<&Credentials>,
    ) -> Result<String> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                params: params.clone(),
                auth: auth.cloned(),
            });
        }

        let action = action_of(url);
        match self.next_reply(action) {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Failure(message)) => Err(EpoError::Transport(message)),
            None => Err(EpoError::Transport(format!(
                "No stubbed reply for action '{}'",
                action
            ))),
        }
    }
}

fn action_of(url: &str) -> &str {
    url.rsplit_once("/remote/")
        .map(|(_, action)| action)
        .unwrap_or(url)
}
