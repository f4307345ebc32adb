//! ユーザー関連の操作
//!
//! - `register`: ユーザー登録（ゲスト専用）
//! - `fetchUsersWithRoles`: ユーザー一覧とロール一覧の並行取得
//! - `removeUser`: ユーザー削除
//! - `updateUserRole`: ロール変更

use blogflow_domain::{
    password::PlainPassword,
    role::Role,
    user::Login,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{OperationFailure, Orchestrator, parse_args, to_result_value, upstream};
use crate::client::{NewUserDto, RoleDto, UserDto};

/// フロントエンド向けのユーザー表現
///
/// `UserDto` からパスワードハッシュを落とした形。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserData {
    pub id:            Uuid,
    pub login:         String,
    pub registered_at: DateTime<Utc>,
    pub role_id:       Role,
}

impl From<UserDto> for UserData {
    fn from(dto: UserDto) -> Self {
        Self {
            id:            dto.id,
            login:         dto.login,
            registered_at: dto.registered_at,
            role_id:       dto.role_id,
        }
    }
}

/// ロール表現（管理画面のロール選択用）
#[derive(Debug, Serialize)]
pub(super) struct RoleData {
    pub id:   Role,
    pub name: String,
}

impl From<RoleDto> for RoleData {
    fn from(dto: RoleDto) -> Self {
        Self {
            id:   dto.id,
            name: dto.name,
        }
    }
}

/// ユーザー一覧とロール一覧（管理画面用）
#[derive(Debug, Serialize)]
pub(super) struct UsersWithRolesData {
    pub users: Vec<UserData>,
    pub roles: Vec<RoleData>,
}

/// `register` の引数
///
/// クライアントが `role` や `registered_at` を送ってきても無視する。
/// これらは常にサーバー側で決める（リクエストボディ偽装による
/// 権限昇格の防止）。
#[derive(Debug, Deserialize)]
struct RegisterArgs {
    login:    String,
    password: String,
}

/// `register`: ユーザーを登録する
///
/// ロールは固定で reader、登録日時はサーバー時刻。
pub(super) async fn register(
    orch: &Orchestrator,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (req,): (RegisterArgs,) = parse_args(args)?;

    let login =
        Login::new(req.login).map_err(|e| OperationFailure::InvalidArgs(e.to_string()))?;
    let password = PlainPassword::new(req.password)
        .map_err(|e| OperationFailure::InvalidArgs(e.to_string()))?;

    // ログイン名の一意性チェック
    let existing = orch
        .data_api
        .get_user_by_login(login.as_str())
        .await
        .map_err(upstream("ログイン名の重複確認"))?;
    if existing.is_some() {
        return Err(OperationFailure::Rejected("Такой логин уже занят".to_string()));
    }

    let password_hash = orch
        .password_checker
        .hash(&password)
        .map_err(|e| OperationFailure::Internal(format!("ハッシュ生成に失敗: {e}")))?;

    let user = orch
        .data_api
        .create_user(&NewUserDto {
            login:         login.into_string(),
            password_hash: password_hash.into_string(),
            registered_at: orch.clock.now(),
            role_id:       Role::Reader,
        })
        .await
        .map_err(upstream("ユーザー登録"))?;

    to_result_value(&UserData::from(user))
}

/// `fetchUsersWithRoles`: ユーザー一覧とロール一覧を取得する
///
/// 2 つの読み取りは独立しているため並行に発行する。どちらか
/// 一方でも失敗したら全体を失敗させる（両方揃わないと管理画面が
/// 成立しない）。
pub(super) async fn fetch_users_with_roles(
    orch: &Orchestrator,
) -> Result<Value, OperationFailure> {
    let (users, roles) = tokio::join!(orch.data_api.get_users(), orch.data_api.get_roles());

    let users = users.map_err(upstream("ユーザー一覧取得"))?;
    let roles = roles.map_err(upstream("ロール一覧取得"))?;

    to_result_value(&UsersWithRolesData {
        users: users.into_iter().map(UserData::from).collect(),
        roles: roles.into_iter().map(RoleData::from).collect(),
    })
}

/// `removeUser`: ユーザーを削除する
pub(super) async fn remove_user(
    orch: &Orchestrator,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (user_id,): (Uuid,) = parse_args(args)?;

    orch.data_api
        .remove_user(user_id)
        .await
        .map_err(upstream("ユーザー削除"))?;

    Ok(Value::Bool(true))
}

/// `updateUserRole`: ユーザーのロールを変更する
///
/// 変更は次回ログインのセッションから反映される（既存セッションの
/// ロールはログイン時点のコピーのまま）。
pub(super) async fn update_user_role(
    orch: &Orchestrator,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (user_id, role): (Uuid, Role) = parse_args(args)?;

    let updated = orch
        .data_api
        .update_user_role(user_id, role)
        .await
        .map_err(upstream("ロール変更"))?;

    to_result_value(&UserData::from(updated))
}
