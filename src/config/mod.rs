pub mod settings;

pub use settings::Settings;

use crate::error::{EpoError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// epo-remote 사용자 설정
///
/// 설정 파일은 ~/.epo-remote/config.toml에 저장됩니다.
/// 비밀번호는 파일에 두지 않고 `--password` 또는 `EPO_PASSWORD`로만 받습니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 서버 주소 (예: https://epo.example.com:8443)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// 보안 토큰 발급에 사용할 사용자 이름
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// 기본으로 실행할 쿼리 ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,

    /// HTTP/HTTPS 프록시
    pub proxies: ProxyConfig,
}

/// 프록시 설정. `{"http": "...", "https": "..."}` 형태의 JSON과도 호환됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub https: Option<String>,
}

impl ProxyConfig {
    /// `--proxies` 인자의 JSON 파싱
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none()
    }
}

impl Config {
    /// 설정 디렉토리 경로
    fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".epo-remote")
    }

    /// 설정 파일 경로 가져오기
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// 설정 파일에서 로드 (없으면 기본값 사용)
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| EpoError::Config(format!("{}: {}", path.display(), e)))
    }

    /// 설정을 파일에 저장
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let toml_string =
            toml::to_string_pretty(self).map_err(|e| EpoError::Config(e.to_string()))?;
        fs::write(path, toml_string)?;

        Ok(())
    }

    /// 설정 파일 초기화 (기본값으로). 저장한 경로를 반환
    pub fn init() -> Result<PathBuf> {
        let path = Self::config_path();
        Self::default().save_to(&path)?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.domain, None);
        assert_eq!(config.username, None);
        assert!(config.proxies.is_empty());
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            domain = "https://epo.example.com:8443"
            username = "svc-reporting"
            query_id = "42"

            [proxies]
            https = "http://proxy.example.com:3128"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.domain.as_deref(), Some("https://epo.example.com:8443"));
        assert_eq!(config.username.as_deref(), Some("svc-reporting"));
        assert_eq!(config.query_id.as_deref(), Some("42"));
        assert_eq!(config.proxies.http, None);
        assert_eq!(
            config.proxies.https.as_deref(),
            Some("http://proxy.example.com:3128")
        );
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir()
            .join(format!("epo-remote-test-{}", std::process::id()))
            .join("config.toml");

        let config = Config {
            domain: Some("https://epo.local".to_string()),
            username: Some("admin".to_string()),
            query_id: None,
            proxies: ProxyConfig::default(),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = std::env::temp_dir().join("epo-remote-does-not-exist/config.toml");
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_proxies_from_json() {
        let proxies =
            ProxyConfig::from_json(r#"{"http": "http://p:1", "https": "http://p:2"}"#).unwrap();
        assert_eq!(proxies.http.as_deref(), Some("http://p:1"));
        assert_eq!(proxies.https.as_deref(), Some("http://p:2"));

        assert!(ProxyConfig::from_json("not json").is_err());
    }
}
