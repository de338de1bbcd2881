use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "epo-remote")]
#[command(version)]
#[command(about = "Remote command client for ePO-style /remote/ endpoints", long_about = None)]
pub struct Cli {
    /// 사용자 이름 (설정 파일의 username보다 우선)
    #[arg(long)]
    pub username: Option<String>,

    /// 비밀번호
    #[arg(long, env = "EPO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// 결과를 가져올 쿼리 ID
    #[arg(long = "query-id", visible_alias = "query_id")]
    pub query_id: Option<String>,

    /// 서버 주소 (예: https://epo.example.com:8443)
    #[arg(long)]
    pub domain: Option<String>,

    /// 'http'/'https' 프록시 URL을 담은 JSON
    #[arg(long)]
    pub proxies: Option<String>,

    /// 쿼리 대신 임의의 action 실행 (예: core.help)
    #[arg(long, conflicts_with = "query_id")]
    pub action: Option<String>,

    /// action의 위치 인자 (param1, param2, ... 순서로 전송)
    #[arg(long = "param", requires = "action")]
    pub params: Vec<String>,

    /// action의 이름 있는 인자 (key=value)
    #[arg(long = "arg", requires = "action", value_parser = parse_key_value)]
    pub args: Vec<(String, String)>,

    /// 디버그 로그 출력
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// 기본 설정 파일 생성
    #[arg(long)]
    pub init_config: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", raw)),
    }
}
