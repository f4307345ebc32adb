//! # 操作ディスパッチハンドラ
//!
//! クライアントは操作識別子と引数リストを POST し、常に統一
//! エンベロープを受け取る。セッショントークンは HttpOnly Cookie
//! で帯域外に運ばれる。

use std::sync::Arc;

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;
use blogflow_shared::Envelope;
use serde::Deserialize;
use serde_json::Value;

use super::SESSION_COOKIE_NAME;
use crate::operation::Orchestrator;

/// 操作ディスパッチの共有状態
pub struct OperationState {
    pub orchestrator: Orchestrator,
}

/// 操作リクエスト
///
/// `operation` はカタログの識別子、`args` は操作固有の位置引数。
#[derive(Debug, Deserialize)]
pub struct OperationRequest {
    pub operation: String,
    #[serde(default)]
    pub args:      Vec<Value>,
}

/// POST /api/v1/operations
///
/// 操作をオーケストレータにディスパッチする。レスポンスは
/// HTTP ステータスによらず常にエンベロープ（失敗も `error`
/// フィールドで表現される）。
#[tracing::instrument(skip_all)]
pub async fn execute_operation(
    State(state): State<Arc<OperationState>>,
    jar: CookieJar,
    Json(req): Json<OperationRequest>,
) -> Json<Envelope<Value>> {
    let token = jar
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());

    Json(
        state
            .orchestrator
            .execute(&req.operation, token.as_deref(), &req.args)
            .await,
    )
}
