//! # BFF 設定
//!
//! 環境変数から BFF サーバーの設定を読み込む。

use std::env;

/// セッション TTL のデフォルト（秒）
/// 8時間 = 28800秒
const DEFAULT_SESSION_TTL_SECS: i64 = 28800;

/// BFF サーバーの設定
#[derive(Debug, Clone)]
pub struct BffConfig {
    /// バインドアドレス
    pub host: String,
    /// ポート番号
    pub port: u16,
    /// データ API のベース URL
    pub data_api_url: String,
    /// セッションの有効期限（秒）
    pub session_ttl_secs: i64,
}

impl BffConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host: env::var("BFF_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("BFF_PORT")
                .expect("BFF_PORT が設定されていません")
                .parse()
                .expect("BFF_PORT は有効なポート番号である必要があります"),
            data_api_url: env::var("DATA_API_URL")
                .expect("DATA_API_URL が設定されていません"),
            session_ttl_secs: parse_session_ttl(env::var("SESSION_TTL_SECS").ok().as_deref()),
        })
    }
}

/// SESSION_TTL_SECS の値をパースする
///
/// 未設定の場合はデフォルト（8時間）。不正な値は設定ミスなので panic する。
fn parse_session_ttl(value: Option<&str>) -> i64 {
    match value {
        Some(raw) => {
            let secs: i64 = raw
                .parse()
                .expect("SESSION_TTL_SECS は秒数の整数である必要があります");
            assert!(secs > 0, "SESSION_TTL_SECS は正の値である必要があります");
            secs
        }
        None => DEFAULT_SESSION_TTL_SECS,
    }
}
