//! # BFF (Backend for Frontend) サーバー
//!
//! ブラウザクライアント専用の API サーバー。
//!
//! ## 役割
//!
//! BFF はフロントエンド（ブログ SPA）とデータ API の間に位置し、
//! 以下の責務を担う:
//!
//! - **認証・セッション管理**: HTTPOnly Cookie によるセッション管理
//! - **アクセス制御**: 操作ごとの許可ロール集合による RBAC
//! - **オーケストレーション**: 複数のデータ API 呼び出しを 1 つの操作にまとめる
//! - **レスポンス最適化**: フロントエンドに最適な形式にデータを変換
//!
//! ## アーキテクチャ
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Browser    │────▶│     BFF      │────▶│  Data API    │
//! │   (SPA)      │     │  port: 13000 │     │  port: 13100 │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! セッションはプロセス内ストアで管理する（分散レプリケーションは
//! スコープ外）。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `BFF_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `BFF_PORT` | **Yes** | ポート番号 |
//! | `DATA_API_URL` | **Yes** | データ API のベース URL |
//! | `SESSION_TTL_SECS` | No | セッション TTL 秒（デフォルト: 28800） |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境（.env ファイルを使用）
//! cargo run -p blogflow-bff
//!
//! # 本番環境（環境変数を直接指定）
//! BFF_PORT=3000 DATA_API_URL=http://... cargo run -p blogflow-bff --release
//! ```

mod config;

use std::{net::SocketAddr, sync::Arc};

use blogflow_bff::{
    app_builder::build_app,
    client::DataApiClientImpl,
    handler::{AuthState, OperationState},
    operation::Orchestrator,
};
use blogflow_domain::clock::{Clock, SystemClock};
use blogflow_infra::{
    Argon2PasswordChecker,
    InMemorySessionStore,
    PasswordChecker,
    SessionStore,
};
use blogflow_shared::observability::TracingConfig;
use chrono::Duration;
use config::BffConfig;
use tokio::net::TcpListener;

/// BFF サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. 依存関係（セッションストア・クライアント）の構築
/// 5. ルーターの構築と HTTP サーバーの起動
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    // 本番環境では .env ファイルは使用せず、環境変数を直接設定する
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("bff");
    blogflow_shared::observability::init_tracing(tracing_config);
    let _tracing_guard = tracing::info_span!("app", service = "bff").entered();

    // 設定読み込み
    let config = BffConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!("BFF サーバーを起動します: {}:{}", config.host, config.port);

    // 依存関係の初期化
    // 具象型で構築し、State 注入時に必要なトレイトオブジェクトへ coerce する
    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(
        Duration::seconds(config.session_ttl_secs),
    ));
    let data_api = Arc::new(DataApiClientImpl::new(&config.data_api_url));
    let password_checker: Arc<dyn PasswordChecker> = Arc::new(Argon2PasswordChecker::new());
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // AuthState はユーザー検索のみ必要（ISP: 認証に不要なメソッドを公開しない）
    let auth_state = Arc::new(AuthState {
        data_api:         data_api.clone(),
        session_store:    session_store.clone(),
        password_checker: password_checker.clone(),
        session_ttl_secs: config.session_ttl_secs,
    });

    // OperationState は操作カタログの全依存を束ねる
    let operation_state = Arc::new(OperationState {
        orchestrator: Orchestrator::new(session_store, data_api, password_checker, clock),
    });

    // ルーター構築
    let app = build_app(auth_state, operation_state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("BFF サーバーが起動しました: {}", addr);

    // Graceful shutdown は axum::serve が自動的に処理する
    axum::serve(listener, app).await?;

    Ok(())
}
