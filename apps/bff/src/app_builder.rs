//! # BFF アプリケーション構築
//!
//! State の注入とルーター構築を担当する。`main.rs` はインフラ
//! 初期化とサーバー起動に集中し、統合テストはここから
//! スタブ入りのルーターを組み立てる。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::handler::{
    AuthState,
    OperationState,
    execute_operation,
    health_check,
    login,
    logout,
    me,
};

/// ルーターを構築する
///
/// Request ID + TraceLayer により、すべての HTTP リクエストに
/// request_id が付与されログに自動注入される。
pub fn build_app(auth_state: Arc<AuthState>, operation_state: Arc<OperationState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/auth/me", get(me))
        .with_state(auth_state)
        .merge(
            Router::new()
                .route("/api/v1/operations", post(execute_operation))
                .with_state(operation_state),
        )
        // Request ID レイヤー（レイヤー順序が重要: 下に書いたものが外側）
        // 1. SetRequestIdLayer（最外）: リクエスト受信時に UUID を生成
        // 2. TraceLayer: スパンに request_id を含め、ログに自動注入
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
