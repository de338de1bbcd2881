use crate::config::Settings;
use crate::error::Result;
use crate::invoker::RemoteInvoker;
use crate::transport::HttpTransport;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

pub const EXECUTE_QUERY_ACTION: &str = "core.executeQuery";

/// 쿼리 결과 레코드 목록
pub type QueryResults = Vec<Value>;

/// 인증 후 저장된 쿼리를 실행하고 결과 레코드를 반환
///
/// 인증을 두 번 합니다. 첫 번째 실패는 경고만 남기고 넘어가며, 두 번째 실패는 그대로
/// 반환됩니다. 쿼리 ID가 없으면 `target` 없이 호출하고 판단은 서버에 맡깁니다.
pub async fn list_query_results(
    invoker: &RemoteInvoker,
    query_id: Option<&str>,
) -> Result<QueryResults> {
    if let Err(e) = invoker.authenticate().await {
        warn!(error = %e, "initial authentication failed, continuing");
    }

    invoker.authenticate().await?;

    let named: Vec<(String, Value)> = query_id
        .map(|id| ("target".to_string(), Value::String(id.to_string())))
        .into_iter()
        .collect();
    let result = invoker.invoke(EXECUTE_QUERY_ACTION, &[], &named).await?;

    let records = result.into_records();
    info!(query_id = query_id.unwrap_or("-"), records = records.len(), "query finished");
    Ok(records)
}

/// 설정으로 HTTP 세션을 만들어 쿼리를 실행
pub async fn run_query(settings: &Settings) -> Result<QueryResults> {
    let transport = Arc::new(HttpTransport::new(&settings.proxies)?);
    let invoker = RemoteInvoker::new(
        settings.domain.clone(),
        settings.credentials.clone(),
        transport,
    );

    list_query_results(&invoker, settings.query_id.as_deref()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoker::{SECURITY_TOKEN_ACTION, TOKEN_PARAM};
    use crate::transport::{Credentials, StubTransport};
    use serde_json::json;

    fn invoker_with(stub: Arc<StubTransport>) -> RemoteInvoker {
        RemoteInvoker::new("https://epo.local", Credentials::new("admin", "secret"), stub)
    }

    #[tokio::test]
    async fn test_query_workflow() {
        let stub = Arc::new(
            StubTransport::new()
                .reply(SECURITY_TOKEN_ACTION, "OK:\r\n\"tok123\"")
                .reply(EXECUTE_QUERY_ACTION, "OK:\r\n[{\"a\":1}]"),
        );
        let invoker = invoker_with(stub.clone());

        let records = list_query_results(&invoker, Some("17")).await.unwrap();
        assert_eq!(records, vec![json!({"a": 1})]);

        let actions: Vec<String> = stub
            .requests()
            .iter()
            .map(|r| r.action().to_string())
            .collect();
        assert_eq!(
            actions,
            vec![SECURITY_TOKEN_ACTION, SECURITY_TOKEN_ACTION, EXECUTE_QUERY_ACTION]
        );

        let query = &stub.requests()[2];
        assert_eq!(query.params.get("target"), Some("17"));
        assert_eq!(query.params.get(TOKEN_PARAM), Some("tok123"));
        assert!(query.auth.is_none());
    }

    #[tokio::test]
    async fn test_first_authentication_failure_is_absorbed() {
        let stub = Arc::new(
            StubTransport::new()
                .fail(SECURITY_TOKEN_ACTION, "connection reset")
                .reply(SECURITY_TOKEN_ACTION, "OK:\r\n\"tok456\"")
                .reply(EXECUTE_QUERY_ACTION, "OK:\r\n[]"),
        );
        let invoker = invoker_with(stub.clone());

        let records = list_query_results(&invoker, Some("17")).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(invoker.token().await.as_deref(), Some("tok456"));
        assert_eq!(stub.requests()[2].params.get(TOKEN_PARAM), Some("tok456"));
    }

    #[tokio::test]
    async fn test_second_authentication_failure_is_fatal() {
        let stub = Arc::new(
            StubTransport::new()
                .reply(SECURITY_TOKEN_ACTION, "OK:\r\n\"tok123\"")
                .reply(SECURITY_TOKEN_ACTION, "Error 401:\r\nInvalid credentials")
                .reply(EXECUTE_QUERY_ACTION, "OK:\r\n[]"),
        );
        let invoker = invoker_with(stub.clone());

        let err = list_query_results(&invoker, Some("17")).await.unwrap_err();
        assert_eq!(err.protocol_code(), Some(401));
        // 쿼리는 실행되지 않음
        assert_eq!(stub.requests().len(), 2);
        assert_eq!(invoker.token().await.as_deref(), Some("tok123"));
    }

    #[tokio::test]
    async fn test_query_error_propagates() {
        let stub = Arc::new(
            StubTransport::new()
                .reply(SECURITY_TOKEN_ACTION, "OK:\r\n\"tok\"")
                .reply(EXECUTE_QUERY_ACTION, "Error 12:\r\nBad query id"),
        );
        let invoker = invoker_with(stub);

        let err = list_query_results(&invoker, Some("nope")).await.unwrap_err();
        assert_eq!(err.protocol_code(), Some(12));
    }

    #[tokio::test]
    async fn test_empty_query_result() {
        let stub = Arc::new(
            StubTransport::new()
                .reply(SECURITY_TOKEN_ACTION, "OK:\r\n\"tok\"")
                .reply(EXECUTE_QUERY_ACTION, "OK:\r\n"),
        );
        let invoker = invoker_with(stub);

        assert!(list_query_results(&invoker, Some("17")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_without_id_omits_target() {
        let stub = Arc::new(
            StubTransport::new()
                .reply(SECURITY_TOKEN_ACTION, "OK:\r\n\"tok\"")
                .reply(EXECUTE_QUERY_ACTION, "Error 1:\r\nMissing required parameter target"),
        );
        let invoker = invoker_with(stub.clone());

        let err = list_query_results(&invoker, None).await.unwrap_err();
        assert_eq!(err.protocol_code(), Some(1));

        let query = &stub.requests()[2];
        assert_eq!(query.action(), EXECUTE_QUERY_ACTION);
        assert!(!query.params.contains_key("target"));
        assert_eq!(query.params.get(TOKEN_PARAM), Some("tok"));
    }
}
