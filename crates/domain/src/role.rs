//! # ロール（アクセス制御）
//!
//! ユーザーのロールと、操作ごとの許可ロール集合を評価する
//! ロールポリシーを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 要件 |
//! |---|------------|------|
//! | [`Role`] | ロール | RBAC（役割ベースアクセス制御）。操作ごとに許可ロール集合を宣言する |
//! | [`is_allowed`] | ロールポリシー | ロールが許可集合に含まれるかの純粋な判定 |
//!
//! ## 設計方針
//!
//! - **階層なし**: ロール間に包含関係はない。`Moderator` が `Reader`
//!   の権利を自動的に持つことはなく、各操作が許可集合を明示する
//! - **未認証は Guest**: セッションを持たないクライアントは
//!   [`Role::Guest`] として評価される
//! - **ワイヤ表現は数値**: フロントエンドとデータ API は
//!   0（管理者）〜3（ゲスト）の数値 ID でロールを表現する
//!
//! ## 使用例
//!
//! ```rust
//! use blogflow_domain::role::{Role, is_allowed};
//!
//! let allowed = [Role::Admin, Role::Moderator];
//! assert!(is_allowed(&allowed, Role::Admin));
//! assert!(!is_allowed(&allowed, Role::Reader));
//! ```

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// ユーザーロール
///
/// ワイヤ表現（JSON）は数値 ID。`serde(try_from, into)` により
/// 不正な数値はデシリアライズ時点で検出される。
#[derive(
   Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
   /// 管理者（ワイヤ ID: 0）
   Admin,
   /// モデレーター（ワイヤ ID: 1）
   Moderator,
   /// 読者（ワイヤ ID: 2）
   Reader,
   /// ゲスト = 未認証（ワイヤ ID: 3）
   Guest,
}

impl Role {
   /// ワイヤ表現の数値 ID を取得する
   pub fn as_id(self) -> u8 {
      match self {
         Role::Admin => 0,
         Role::Moderator => 1,
         Role::Reader => 2,
         Role::Guest => 3,
      }
   }
}

impl From<Role> for u8 {
   fn from(role: Role) -> Self {
      role.as_id()
   }
}

impl TryFrom<u8> for Role {
   type Error = DomainError;

   fn try_from(id: u8) -> Result<Self, Self::Error> {
      match id {
         0 => Ok(Role::Admin),
         1 => Ok(Role::Moderator),
         2 => Ok(Role::Reader),
         3 => Ok(Role::Guest),
         other => Err(DomainError::validation(format!(
            "Неизвестная роль: {other}"
         ))),
      }
   }
}

/// ロールポリシー: ロールが許可集合に含まれるかを判定する
///
/// 純粋関数であり副作用を持たない。
///
/// # 評価規則
///
/// - `role ∈ allowed_roles` のときのみ `true`
/// - 空の許可集合はすべて拒否する（「全許可」には決してならない）
/// - [`Role::Guest`] も明示的に列挙された場合のみ許可される
pub fn is_allowed(allowed_roles: &[Role], role: Role) -> bool {
   allowed_roles.contains(&role)
}
