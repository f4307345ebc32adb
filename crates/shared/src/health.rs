//! # ヘルスチェックレスポンス
//!
//! `/health` エンドポイントのレスポンス型を提供する。

use serde::{Deserialize, Serialize};

/// Liveness Check のレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// 稼働状態（常に `"healthy"`）
    pub status:  String,
    /// クレートのバージョン
    pub version: String,
}
