pub mod stub;

use crate::config::ProxyConfig;
use crate::error::{EpoError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::fmt;
use tracing::debug;

pub use stub::StubTransport;

/// Basic 인증 자격 증명
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// 순서를 유지하는 쿼리 파라미터 목록
///
/// 같은 키를 다시 넣으면 처음 위치는 그대로 두고 값만 덮어씁니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.pairs
    }
}

/// 원격 서버로 GET 요청을 보내는 전송 계층
///
/// 응답 본문을 그대로 돌려주며 봉투 해석은 호출자가 합니다.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        auth: Option<&Credentials>,
    ) -> Result<String>;
}

/// reqwest 기반 HTTP 전송 계층
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(proxies: &ProxyConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if proxies.is_empty() {
            return Ok(Self {
                client: builder.build()?,
            });
        }

        if let Some(url) = &proxies.http {
            let proxy = reqwest::Proxy::http(url)
                .map_err(|e| EpoError::Transport(format!("Invalid http proxy '{}': {}", url, e)))?;
            builder = builder.proxy(proxy);
        }
        if let Some(url) = &proxies.https {
            let proxy = reqwest::Proxy::https(url)
                .map_err(|e| EpoError::Transport(format!("Invalid https proxy '{}': {}", url, e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        auth: Option<&Credentials>,
    ) -> Result<String> {
        let mut request = self.client.get(url).query(params.as_slice());
        if let Some(credentials) = auth {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        // 에러 상태도 본문(서버의 Error 봉투)을 그대로 넘김
        if !status.is_success() {
            debug!(%status, url, "non-success HTTP status");
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_last_write_wins() {
        let mut params = QueryParams::new();
        params.set("a", "1");
        params.set("b", "2");
        params.set("a", "3");

        assert_eq!(params.as_slice().len(), 2);
        assert_eq!(params.get("a"), Some("3"));
        assert_eq!(
            params.as_slice(),
            &[
                ("a".to_string(), "3".to_string()),
                ("b".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let credentials = Credentials::new("admin", "hunter2");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_http_transport_rejects_bad_proxy() {
        let proxies = ProxyConfig {
            http: Some("http://bad host:3128".to_string()),
            https: None,
        };
        assert!(matches!(
            HttpTransport::new(&proxies),
            Err(EpoError::Transport(_))
        ));
    }

    #[test]
    fn test_http_transport_without_proxies() {
        assert!(HttpTransport::new(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_http_transport_with_proxies() {
        let proxies = ProxyConfig {
            http: Some("http://proxy.local:3128".to_string()),
            https: Some("http://proxy.local:3129".to_string()),
        };
        assert!(HttpTransport::new(&proxies).is_ok());
    }
}
