//! # アクセスガード
//!
//! セッショントークンと許可ロール集合からアクセス可否を判定する、
//! すべての操作が通過する単一の認可チョークポイント。
//!
//! ## 判定アルゴリズム
//!
//! 1. トークンがあればセッションストアで解決する
//! 2. セッションなし（トークンなし・未知・失効）の場合:
//!    - 許可集合に `Guest` が含まれていれば、匿名ゲストとして許可する
//!    - 含まれなければ `NoSession` で拒否する
//! 3. セッションありの場合、ロールポリシーで評価する
//!
//! ゲストフォールバックはセキュリティ境界を変える: 許可集合に
//! `Guest` を列挙した操作は匿名クライアントから到達可能になる。
//! この分岐は明示的にテストする。
//!
//! ## 副作用
//!
//! なし。セッションストアに対して読み取り専用。

use std::sync::Arc;

use blogflow_domain::role::{Role, is_allowed};
use blogflow_infra::{InfraError, SessionData, SessionStore};

/// 拒否理由コード
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// セッションが存在しない（未知・失効を含む）
    NoSession,
    /// セッションのロールが許可集合に含まれない
    RoleNotAllowed,
}

/// 許可されたアクセスの内容
#[derive(Debug, Clone)]
pub struct Grant {
    /// 評価に使われた実効ロール
    pub role:    Role,
    /// 解決されたセッション（匿名ゲストの場合は `None`）
    pub session: Option<SessionData>,
}

/// アクセス判定の結果
///
/// 一時的な値であり、永続化されない。
#[derive(Debug, Clone)]
pub enum AccessDecision {
    Granted(Grant),
    Denied(DenyReason),
}

impl AccessDecision {
    /// 許可されたかどうかを返す
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// アクセスガード
pub struct AccessGuard {
    session_store: Arc<dyn SessionStore>,
}

impl AccessGuard {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }

    /// トークンと許可ロール集合からアクセス可否を判定する
    ///
    /// # Errors
    ///
    /// セッションストアの障害時のみ `InfraError` を返す。
    /// 認可の失敗はエラーではなく [`AccessDecision::Denied`]。
    pub async fn authorize(
        &self,
        token: Option<&str>,
        allowed_roles: &[Role],
    ) -> Result<AccessDecision, InfraError> {
        let session = match token {
            Some(token) => self.session_store.get(token).await?,
            None => None,
        };

        let decision = match session {
            Some(session) => {
                if is_allowed(allowed_roles, session.role()) {
                    AccessDecision::Granted(Grant {
                        role:    session.role(),
                        session: Some(session),
                    })
                } else {
                    AccessDecision::Denied(DenyReason::RoleNotAllowed)
                }
            }
            // セッションなしは匿名ゲストとして評価する
            None => {
                if is_allowed(allowed_roles, Role::Guest) {
                    AccessDecision::Granted(Grant {
                        role:    Role::Guest,
                        session: None,
                    })
                } else {
                    AccessDecision::Denied(DenyReason::NoSession)
                }
            }
        };

        Ok(decision)
    }
}
