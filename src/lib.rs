//! ePO 스타일 `/remote/<action>` 엔드포인트용 원격 명령 클라이언트
//!
//! - [`protocol`]: `OK:` / `Error #:` 응답 봉투 해석
//! - [`invoker`]: 보안 토큰 세션과 action 호출
//! - [`commands`]: 쿼리 실행 등 상위 워크플로

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod invoker;
pub mod protocol;
pub mod transport;
pub mod ui;

pub use error::{EpoError, ProtocolError, Result};
pub use invoker::RemoteInvoker;
pub use protocol::{parse_response, InvocationResult};
