use super::{Config, ProxyConfig};
use crate::cli::Cli;
use crate::error::{EpoError, Result};
use crate::transport::Credentials;

/// CLI 인자와 설정 파일을 합친 실행 설정. CLI 값이 우선합니다.
#[derive(Debug, Clone)]
pub struct Settings {
    pub domain: String,
    pub credentials: Credentials,
    pub query_id: Option<String>,
    pub proxies: ProxyConfig,
}

impl Settings {
    pub fn resolve(cli: &Cli, config: &Config) -> Result<Self> {
        let domain = cli
            .domain
            .clone()
            .or_else(|| config.domain.clone())
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| EpoError::Config("domain is required (--domain)".to_string()))?;

        let username = cli
            .username
            .clone()
            .or_else(|| config.username.clone())
            .ok_or_else(|| EpoError::Config("username is required (--username)".to_string()))?;

        let password = cli.password.clone().ok_or_else(|| {
            EpoError::Config("password is required (--password or EPO_PASSWORD)".to_string())
        })?;

        let proxies = match &cli.proxies {
            Some(json) => ProxyConfig::from_json(json)
                .map_err(|e| EpoError::Config(format!("invalid --proxies: {}", e)))?,
            None => config.proxies.clone(),
        };

        Ok(Self {
            domain,
            credentials: Credentials::new(username, password),
            query_id: cli.query_id.clone().or_else(|| config.query_id.clone()),
            proxies,
        })
    }
}
