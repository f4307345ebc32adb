//! # BFF エラーハンドリング
//!
//! すべての失敗モードをレスポンスエンベロープの `error` に収束
//! させるための、クライアント向け文言とログ出力のヘルパーを集約する。
//!
//! クライアント向けの文言はフロントエンドの表示言語（ロシア語）、
//! ログは開発チームの言語で出力する。

use blogflow_shared::Envelope;

use crate::client::DataApiError;

// --- クライアント向け文言 ---

/// アクセス拒否（セッションなし・失効・ロール不許可のすべて）
pub const ACCESS_DENIED_MESSAGE: &str = "Доступ запрещен";

/// 内部エラー（詳細はログのみに出力し、クライアントには漏らさない）
pub const INTERNAL_ERROR_MESSAGE: &str = "Внутренняя ошибка сервера";

/// データ API 障害（ネットワーク断・予期しない応答）
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Сервис данных временно недоступен";

/// 認証失敗（ユーザー不存在とパスワード不一致を区別しない）
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Неверный логин или пароль";

/// セッションなし（`/auth/me` 用）
pub const NO_SESSION_MESSAGE: &str = "Нет активной сессии";

// --- エンベロープ変換ヘルパー ---

/// データ API エラーをログ付きでエンベロープに変換する
///
/// `Network` / `Unexpected` はコンテキスト付きで `tracing::error!`
/// を出力し、内部詳細を含まない汎用メッセージに置き換える。
/// その他のエラーは文言をそのままエンベロープに載せる。
pub fn envelope_from_data_api_error<T>(context: &str, err: DataApiError) -> Envelope<T> {
    match &err {
        DataApiError::Network(_) | DataApiError::Unexpected(_) => {
            tracing::error!(
                error.category = "external_service",
                error.kind = "data_api",
                "{}で内部エラー: {}",
                context,
                err
            );
            Envelope::error(UPSTREAM_FAILURE_MESSAGE)
        }
        DataApiError::Timeout => {
            tracing::warn!(
                error.category = "external_service",
                error.kind = "data_api_timeout",
                "{}でタイムアウト",
                context
            );
            Envelope::error(err.to_string())
        }
        _ => Envelope::error(err.to_string()),
    }
}

/// 内部エラーをログ付きでエンベロープに変換する
///
/// セッションストアの失敗など、クライアント入力に起因しない
/// 失敗に使用する。
pub fn internal_error_envelope<T>(context: &str, detail: impl std::fmt::Display) -> Envelope<T> {
    tracing::error!(error.category = "internal", "{}で内部エラー: {}", context, detail);
    Envelope::error(INTERNAL_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_not_foundエラーは文言がそのまま載る() {
        let envelope: Envelope<()> =
            envelope_from_data_api_error("テスト操作", DataApiError::PostNotFound);

        assert_eq!(envelope.error.as_deref(), Some("Статья не найдена"));
        assert!(envelope.result.is_none());
    }

    #[test]
    fn test_networkエラーは汎用メッセージに置き換わる() {
        let envelope: Envelope<()> = envelope_from_data_api_error(
            "テスト操作",
            DataApiError::Network("connection refused".to_string()),
        );

        assert_eq!(envelope.error.as_deref(), Some(UPSTREAM_FAILURE_MESSAGE));
        // 内部詳細はクライアントに漏れない
        assert!(!envelope.error.unwrap().contains("connection refused"));
    }

    #[test]
    fn test_unexpectedエラーは汎用メッセージに置き換わる() {
        let envelope: Envelope<()> = envelope_from_data_api_error(
            "テスト操作",
            DataApiError::Unexpected("status 500".to_string()),
        );

        assert_eq!(envelope.error.as_deref(), Some(UPSTREAM_FAILURE_MESSAGE));
    }

    #[test]
    fn test_timeoutはタイムアウト文言が載る() {
        let envelope: Envelope<()> =
            envelope_from_data_api_error("テスト操作", DataApiError::Timeout);

        assert_eq!(
            envelope.error.as_deref(),
            Some("Сервер данных не отвечает")
        );
    }

    #[test]
    fn test_内部エラーは汎用メッセージになる() {
        let envelope: Envelope<()> = internal_error_envelope("テスト操作", "lock poisoned");

        assert_eq!(envelope.error.as_deref(), Some(INTERNAL_ERROR_MESSAGE));
    }
}
