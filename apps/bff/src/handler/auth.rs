//! # 認証ハンドラ
//!
//! セッション発行の隣接フローを提供する。オーケストレートされる
//! 操作カタログには含まれないが、カタログ操作が前提とする
//! セッションをここで確立する。
//!
//! ## エンドポイント
//!
//! - `POST /api/v1/auth/login` - ログイン（セッション作成 + Cookie 設定）
//! - `POST /api/v1/auth/logout` - ログアウト（セッション破棄 + Cookie クリア）
//! - `GET /api/v1/auth/me` - 現在のセッションのユーザー情報を取得
//!
//! ## タイミング攻撃対策
//!
//! ユーザーが存在しない場合もダミーハッシュに対して検証を実行し、
//! 処理時間を均一化してアカウント存在確認攻撃を防ぐ。失敗の文言も
//! ユーザー不存在とパスワード不一致で区別しない。

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use blogflow_domain::{
    password::{PasswordHash, PlainPassword},
    role::Role,
    user::{Login, UserId},
};
use blogflow_infra::{PasswordChecker, SessionStore, password::TIMING_DUMMY_HASH};
use blogflow_shared::Envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::SESSION_COOKIE_NAME;
use crate::{
    client::{UserApi, UserDto},
    error::{
        INVALID_CREDENTIALS_MESSAGE,
        NO_SESSION_MESSAGE,
        envelope_from_data_api_error,
        internal_error_envelope,
    },
};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub data_api:         Arc<dyn UserApi>,
    pub session_store:    Arc<dyn SessionStore>,
    pub password_checker: Arc<dyn PasswordChecker>,
    /// Cookie の Max-Age に使うセッション TTL（秒）
    pub session_ttl_secs: i64,
}

// --- リクエスト/レスポンス型 ---

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login:    String,
    pub password: String,
}

/// 認証フローが返すユーザー情報
///
/// パスワードハッシュは含まない。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserData {
    pub id:            Uuid,
    pub login:         String,
    pub registered_at: DateTime<Utc>,
    pub role_id:       Role,
}

impl From<UserDto> for AuthUserData {
    fn from(dto: UserDto) -> Self {
        Self {
            id:            dto.id,
            login:         dto.login,
            registered_at: dto.registered_at,
            role_id:       dto.role_id,
        }
    }
}

// --- Cookie ヘルパー ---

/// セッション Cookie を構築する
fn build_session_cookie(token: &str, max_age_secs: i64) -> Cookie<'static> {
    // 本番環境では Secure フラグを有効にする
    let is_production = std::env::var("ENV").unwrap_or_default() == "production";

    let mut builder = Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .http_only(true)
        .same_site(SameSite::Lax);

    if is_production {
        builder = builder.secure(true);
    }

    builder.build()
}

/// Cookie をクリアするための Cookie を構築する
fn build_clear_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .max_age(time::Duration::seconds(0))
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

// --- ハンドラ ---

/// POST /api/v1/auth/login
///
/// ログイン名/パスワードで認証し、セッションを確立する。
///
/// ## フロー
///
/// 1. データ API でユーザーを検索（`GET /users?login=`）
/// 2. Argon2 でパスワードを検証
/// 3. セッションを作成し Cookie を設定
#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    // 形式の不正なログイン名・パスワードは存在し得ない。
    // 文言は認証失敗と統一し、検証ルールを漏らさない
    let Ok(login) = Login::new(req.login) else {
        return (
            jar,
            Json(Envelope::<AuthUserData>::error(INVALID_CREDENTIALS_MESSAGE)),
        )
            .into_response();
    };
    let Ok(password) = PlainPassword::new(req.password) else {
        return (
            jar,
            Json(Envelope::<AuthUserData>::error(INVALID_CREDENTIALS_MESSAGE)),
        )
            .into_response();
    };

    // Step 1: ログイン名でユーザーを検索
    let user = match state.data_api.get_user_by_login(login.as_str()).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            // タイミング攻撃対策: ユーザーが存在しない場合もダミー検証を実行
            let _ = state
                .password_checker
                .verify(&password, &PasswordHash::new(TIMING_DUMMY_HASH));

            tracing::debug!("ログイン失敗: ユーザー不存在");
            return (
                jar,
                Json(Envelope::<AuthUserData>::error(INVALID_CREDENTIALS_MESSAGE)),
            )
                .into_response();
        }
        Err(e) => {
            return (
                jar,
                Json(envelope_from_data_api_error::<AuthUserData>(
                    "ユーザー検索",
                    e,
                )),
            )
                .into_response();
        }
    };

    // Step 2: パスワードを検証
    match state
        .password_checker
        .verify(&password, &PasswordHash::new(user.password_hash.as_str()))
    {
        Ok(result) if result.is_match() => {}
        Ok(_) => {
            tracing::debug!(user_id = %user.id, "ログイン失敗: パスワード不一致");
            return (
                jar,
                Json(Envelope::<AuthUserData>::error(INVALID_CREDENTIALS_MESSAGE)),
            )
                .into_response();
        }
        Err(e) => {
            return (
                jar,
                Json(internal_error_envelope::<AuthUserData>("パスワード検証", e)),
            )
                .into_response();
        }
    }

    // Step 3: セッションを作成（ロールはログイン時点のコピー）
    let token = match state
        .session_store
        .create(UserId::from_uuid(user.id), user.role_id)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            return (
                jar,
                Json(internal_error_envelope::<AuthUserData>("セッション作成", e)),
            )
                .into_response();
        }
    };

    tracing::info!(user_id = %user.id, "ログイン成功");

    let jar = jar.add(build_session_cookie(&token, state.session_ttl_secs));
    (jar, Json(Envelope::ok(AuthUserData::from(user)))).into_response()
}

/// POST /api/v1/auth/logout
///
/// セッションを破棄してログアウトする。
/// セッションが存在しなくてもエラーにはしない。
#[tracing::instrument(skip_all)]
pub async fn logout(State(state): State<Arc<AuthState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        // セッション破棄の失敗はログアウトを妨げない（警告のみ）
        if let Err(e) = state.session_store.delete(cookie.value()).await {
            tracing::warn!("セッション削除に失敗（無視）: {}", e);
        }
    }

    let jar = jar.add(build_clear_cookie());
    (jar, StatusCode::NO_CONTENT).into_response()
}

/// GET /api/v1/auth/me
///
/// 現在のセッションに紐づくユーザー情報を返す。
/// フロントエンドがリロード時に状態を復元するために使う。
#[tracing::instrument(skip_all)]
pub async fn me(
    State(state): State<Arc<AuthState>>,
    jar: CookieJar,
) -> Json<Envelope<AuthUserData>> {
    let Some(cookie) = jar.get(SESSION_COOKIE_NAME) else {
        return Json(Envelope::error(NO_SESSION_MESSAGE));
    };

    let session = match state.session_store.get(cookie.value()).await {
        Ok(Some(session)) => session,
        Ok(None) => return Json(Envelope::error(NO_SESSION_MESSAGE)),
        Err(e) => return Json(internal_error_envelope("セッション取得", e)),
    };

    match state
        .data_api
        .get_user_by_id(*session.user_id().as_uuid())
        .await
    {
        Ok(user) => Json(Envelope::ok(AuthUserData::from(user))),
        Err(e) => Json(envelope_from_data_api_error("ユーザー取得", e)),
    }
}
