//! # ユーザー
//!
//! ユーザー ID とログイン名の値オブジェクトを定義する。
//!
//! ユーザーエンティティそのものはデータ API が所有しており、
//! BFF は ID とログイン名を通じて参照するのみ。
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: UserId は UUID をラップし、型安全性を確保
//! - **バリデーション**: ログイン名は生成時に形式を検証する

use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::DomainError;

/// ユーザー ID（一意識別子）
///
/// UUID v7 を使用し、生成順にソート可能。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct UserId(Uuid);

impl UserId {
   /// 新しいユーザー ID を生成する
   pub fn new() -> Self {
      Self(Uuid::now_v7())
   }

   /// 既存の UUID からユーザー ID を作成する
   pub fn from_uuid(uuid: Uuid) -> Self {
      Self(uuid)
   }

   /// 内部の UUID 参照を取得する
   pub fn as_uuid(&self) -> &Uuid {
      &self.0
   }
}

impl Default for UserId {
   fn default() -> Self {
      Self::new()
   }
}

/// ログイン名（値オブジェクト）
///
/// 登録・認証時の識別子。生成時にバリデーションを実行し、
/// 不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login(String);

impl Login {
   /// ログイン名の最小長
   const MIN_LEN: usize = 3;
   /// ログイン名の最大長
   const MAX_LEN: usize = 15;

   /// ログイン名を作成する
   ///
   /// # バリデーション
   ///
   /// - 3〜15 文字
   /// - 英数字とアンダースコアのみ
   ///
   /// # エラー
   ///
   /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
   /// メッセージはクライアント表示用。
   pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();

      if value.chars().count() < Self::MIN_LEN {
         return Err(DomainError::validation(
            "Неверно заполнен логин, минимум 3 символа",
         ));
      }

      if value.chars().count() > Self::MAX_LEN {
         return Err(DomainError::validation(
            "Неверно заполнен логин, максимум 15 символов",
         ));
      }

      if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
         return Err(DomainError::validation(
            "Неверно заполнен логин, допускаются только буквы и цифры",
         ));
      }

      Ok(Self(value))
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }

   /// 所有権を持つ文字列に変換する
   pub fn into_string(self) -> String {
      self.0
   }
}

impl std::fmt::Display for Login {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "{}", self.0)
   }
}

#[cfg(test)]
mod tests {
   use pretty_assertions::assert_eq;
   use rstest::rstest;

   use super::*;

   // UserId のテスト

   #[rstest]
   fn test_ユーザーidは一意に生成される() {
      let a = UserId::new();
      let b = UserId::new();
      assert_ne!(a, b);
   }

   #[rstest]
   fn test_uuidとの相互変換() {
      let uuid = Uuid::now_v7();
      let id = UserId::from_uuid(uuid);
      assert_eq!(id.as_uuid(), &uuid);
   }

   // Login のテスト

   #[rstest]
   #[case("bob")]
   #[case("ivan_petrov")]
   #[case("user123456789_0")]
   fn test_正しいログイン名を作成できる(#[case] value: &str) {
      let login = Login::new(value).unwrap();
      assert_eq!(login.as_str(), value);
   }

   #[rstest]
   #[case("ab")]
   #[case("")]
   fn test_短すぎるログイン名は拒否される(#[case] value: &str) {
      assert!(Login::new(value).is_err());
   }

   #[rstest]
   fn test_長すぎるログイン名は拒否される() {
      assert!(Login::new("a".repeat(16)).is_err());
   }

   #[rstest]
   #[case("иван")]
   #[case("bob smith")]
   #[case("bob!")]
   fn test_使用できない文字を含むログイン名は拒否される(#[case] value: &str) {
      assert!(Login::new(value).is_err());
   }
}
