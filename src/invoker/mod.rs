//! 토큰 기반 원격 명령 호출
//!
//! `RemoteInvoker`는 전송 계층과 자격 증명, 그리고 캐시된 보안 토큰을 들고
//! `<domain>/remote/<action>` 호출을 수행합니다. 토큰은 `authenticate`가 성공할 때만
//! 바뀌고, 만료는 추적하지 않습니다.

use crate::error::Result;
use crate::protocol::{parse_response, InvocationResult};
use crate::transport::{Credentials, QueryParams, Transport};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error};

/// 보안 토큰을 발급하는 action. 이 action만 basic 인증을 함께 보냅니다.
pub const SECURITY_TOKEN_ACTION: &str = "core.getSecurityToken";

pub const TOKEN_PARAM: &str = "orion.user.security.token";
pub const OUTPUT_PARAM: &str = ":output";
pub const OUTPUT_FORMAT: &str = "json";

pub struct RemoteInvoker {
    domain: String,
    credentials: Credentials,
    transport: Arc<dyn Transport>,
    token: RwLock<Option<String>>,
}

impl RemoteInvoker {
    pub fn new(
        domain: impl Into<String>,
        credentials: Credentials,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            domain: domain.into(),
            credentials,
            transport,
            token: RwLock::new(None),
        }
    }

    /// 외부에서 받은 토큰으로 세션을 시작
    pub fn with_token(self, token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
            ..self
        }
    }

    /// 현재 저장된 보안 토큰
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// action 호출 URL
    pub fn action_url(&self, action: &str) -> String {
        format!("{}/remote/{}", self.domain.trim_end_matches('/'), action)
    }

    /// 원격 action 실행
    ///
    /// 위치 인자는 `param1..paramN`으로, 이름 있는 인자는 그 이름 그대로 전송됩니다.
    /// 실패는 action 이름과 함께 로그를 남긴 뒤 그대로 반환합니다.
    pub async fn invoke(
        &self,
        action: &str,
        positional: &[Value],
        named: &[(String, Value)],
    ) -> Result<InvocationResult> {
        let result = self.send(action, positional, named).await;
        if let Err(e) = &result {
            error!(action, error = %e, "Error running remote action");
        }
        result
    }

    async fn send(
        &self,
        action: &str,
        positional: &[Value],
        named: &[(String, Value)],
    ) -> Result<InvocationResult> {
        let token = self.token().await;
        let params = build_params(token.as_deref(), positional, named);
        let url = self.action_url(action);

        let auth = (action == SECURITY_TOKEN_ACTION).then_some(&self.credentials);
        debug!(action, url = %url, params = params.as_slice().len(), basic_auth = auth.is_some(), "invoking");

        let text = self.transport.get(&url, &params, auth).await?;
        Ok(parse_response(&text)?)
    }

    /// 보안 토큰을 새로 발급받아 저장하고 반환
    ///
    /// 실패하면 기존 토큰은 그대로 남습니다.
    pub async fn authenticate(&self) -> Result<String> {
        match self.invoke(SECURITY_TOKEN_ACTION, &[], &[]).await {
            Ok(result) => {
                let token = result.into_token();
                *self.token.write().await = Some(token.clone());
                Ok(token)
            }
            Err(e) => {
                error!(error = %e, "Failed to get token");
                Err(e)
            }
        }
    }
}

/// 쿼리 파라미터 구성
///
/// 순서: 토큰, `:output=json`, `param1..paramN`, 이름 있는 인자. 같은 키는 나중 값이
/// 이깁니다. 토큰이 없으면 토큰 키는 아예 보내지 않습니다.
pub fn build_params(
    token: Option<&str>,
    positional: &[Value],
    named: &[(String, Value)],
) -> QueryParams {
    let mut params = QueryParams::new();

    if let Some(token) = token {
        params.set(TOKEN_PARAM, token);
    }
    params.set(OUTPUT_PARAM, OUTPUT_FORMAT);

    for (index, value) in positional.iter().enumerate() {
        params.set(format!("param{}", index + 1), param_text(value));
    }
    for (name, value) in named {
        params.set(name.as_str(), param_text(value));
    }

    params
}

/// 쿼리 문자열 값. 문자열은 그대로, 나머지는 compact JSON
fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
