//! # インフラ層エラー定義
//!
//! セッションストアやパスワードハッシュで発生するエラーを表現する。
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`InfraError`]: エラー種別（[`InfraErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`InfraErrorKind`]: エラーの具体的な種別（Session, PasswordHash 等）
//!
//! convenience constructor でエラーを生成すると、その時点のスパン情報が
//! 自動的にキャプチャされ、ログでエラー発生経路を追跡できる。

use std::fmt;

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// インフラ層で発生するエラー
///
/// エラー種別（[`InfraErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// BFF のオーケストレータ層では内部エラーとして扱われ、
/// クライアントには汎用メッセージのみが返る。
#[derive(Display)]
#[display("{kind}")]
pub struct InfraError {
   kind:       InfraErrorKind,
   span_trace: SpanTrace,
}

/// インフラ層エラーの種別
#[derive(Debug, Error)]
pub enum InfraErrorKind {
   /// セッションストアエラー
   ///
   /// ロックの汚染など、ストア操作の失敗。
   #[error("セッションストアエラー: {0}")]
   Session(String),

   /// パスワードハッシュエラー
   ///
   /// ハッシュの生成失敗や不正なハッシュ形式。
   #[error("パスワードハッシュエラー: {0}")]
   PasswordHash(String),

   /// 予期しないエラー
   #[error("予期しないエラー: {0}")]
   Unexpected(String),
}

// ===== InfraError のメソッド =====

impl InfraError {
   /// エラー種別を取得する
   pub fn kind(&self) -> &InfraErrorKind {
      &self.kind
   }

   /// SpanTrace を取得する
   pub fn span_trace(&self) -> &SpanTrace {
      &self.span_trace
   }

   // ===== Convenience constructors =====

   /// セッションストアエラーを生成する
   pub fn session(msg: impl Into<String>) -> Self {
      Self {
         kind:       InfraErrorKind::Session(msg.into()),
         span_trace: SpanTrace::capture(),
      }
   }

   /// パスワードハッシュエラーを生成する
   pub fn password_hash(msg: impl Into<String>) -> Self {
      Self {
         kind:       InfraErrorKind::PasswordHash(msg.into()),
         span_trace: SpanTrace::capture(),
      }
   }

   /// 予期しないエラーを生成する
   pub fn unexpected(msg: impl Into<String>) -> Self {
      Self {
         kind:       InfraErrorKind::Unexpected(msg.into()),
         span_trace: SpanTrace::capture(),
      }
   }
}

// ===== トレイト実装 =====

impl fmt::Debug for InfraError {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("InfraError")
         .field("kind", &self.kind)
         .field("span_trace", &self.span_trace)
         .finish()
   }
}

impl std::error::Error for InfraError {
   fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
      self.kind.source()
   }
}
