//! # ドメイン層エラー定義
//!
//! ビジネスルール違反を表現するエラー型。
//!
//! BFF はすべての失敗をレスポンスエンベロープの `error`
//! フィールドに収束させるため、エラーメッセージはそのまま
//! クライアントに表示されるロシア語の文言を保持する。

use thiserror::Error;

/// ドメイン層で発生するエラー
///
/// 値オブジェクトの生成時バリデーションなど、ビジネスルールの
/// 違反を表現する。オーケストレータ層でエンベロープの `error` に
/// 変換される。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
   /// バリデーションエラー
   ///
   /// 入力値がビジネスルールに違反している場合に使用する。
   /// メッセージはクライアント表示用の文言。
   #[error("{0}")]
   Validation(String),
}

impl DomainError {
   /// バリデーションエラーを生成する
   pub fn validation(message: impl Into<String>) -> Self {
      Self::Validation(message.into())
   }
}
