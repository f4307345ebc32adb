//! # レスポンスエンベロープ
//!
//! オーケストレートされたすべての操作が返す統一レスポンス形式
//! `{ "error": string | null, "result": T | null }` を提供する。
//!
//! ## 不変条件
//!
//! `error` と `result` のうち、常にどちらか一方だけが設定される。
//! 両方 null・両方設定のレスポンスは存在しない。コンストラクタ
//! （[`Envelope::ok`] / [`Envelope::error`]）経由でのみ生成する
//! ことでこの不変条件を守る。

use serde::{Deserialize, Serialize};

/// 操作の統一レスポンス型
///
/// この型は以下の場所で使用される:
/// - BFF ハンドラ（Serialize でクライアントにレスポンスを返す）
/// - オーケストレータ（すべての失敗モードをこの形に収束させる）
/// - テスト（Deserialize でレスポンスを検証する）
///
/// ## 使用例
///
/// ```
/// use blogflow_shared::Envelope;
///
/// let ok = Envelope::ok(42);
/// assert!(ok.is_ok());
///
/// let err = Envelope::<i32>::error("Доступ запрещен");
/// assert!(!err.is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub error:  Option<String>,
    pub result: Option<T>,
}

impl<T> Envelope<T> {
    /// 成功エンベロープを作成する
    pub fn ok(result: T) -> Self {
        Self {
            error:  None,
            result: Some(result),
        }
    }

    /// 失敗エンベロープを作成する
    ///
    /// `message` はクライアントにそのまま表示される文言。
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error:  Some(message.into()),
            result: None,
        }
    }

    /// 成功エンベロープかどうかを返す
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
