use crate::config::Settings;
use crate::error::Result;
use crate::invoker::RemoteInvoker;
use crate::protocol::InvocationResult;
use crate::transport::{HttpTransport, Transport};
use serde_json::Value;
use std::sync::Arc;

/// 임의의 action 실행 요청
#[derive(Debug, Clone, Default)]
pub struct ActionRequest {
    pub action: String,
    pub positional: Vec<Value>,
    pub named: Vec<(String, Value)>,
}

impl ActionRequest {
    /// CLI 문자열 인자로부터 생성. 값은 문자열 그대로 전송됩니다.
    pub fn from_strings(
        action: impl Into<String>,
        params: &[String],
        args: &[(String, String)],
    ) -> Self {
        Self {
            action: action.into(),
            positional: params.iter().cloned().map(Value::String).collect(),
            named: args
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        }
    }
}

/// 한 번 인증한 뒤 action을 실행. 인증 실패는 그대로 반환됩니다.
pub async fn invoke_action(
    invoker: &RemoteInvoker,
    request: &ActionRequest,
) -> Result<InvocationResult> {
    invoker.authenticate().await?;
    invoker
        .invoke(&request.action, &request.positional, &request.named)
        .await
}

pub async fn run_action(settings: &Settings, request: &ActionRequest) -> Result<InvocationResult> {
    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new(&settings.proxies)?);
    let invoker = RemoteInvoker::new(
        settings.domain.clone(),
        settings.credentials.clone(),
        transport,
    );

    invoke_action(&invoker, request).await
}
