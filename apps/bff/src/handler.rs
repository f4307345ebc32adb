//! # HTTP ハンドラ
//!
//! BFF の HTTP エンドポイントを提供する。
//!
//! - [`auth`]: ログイン・ログアウト・セッション照会（隣接フロー）
//! - [`health`]: ヘルスチェック
//! - [`operation`]: 操作ディスパッチ（オーケストレータへの入口）

pub mod auth;
pub mod health;
pub mod operation;

pub use auth::{AuthState, login, logout, me};
pub use health::health_check;
pub use operation::{OperationState, execute_operation};

/// セッショントークンを運ぶ Cookie 名
pub(crate) const SESSION_COOKIE_NAME: &str = "session_id";
