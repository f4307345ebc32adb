//! データ API クライアントのエラー型

use thiserror::Error;

/// データ API クライアントエラー
///
/// メッセージはそのままエンベロープの `error` に載ることがある
/// ため、クライアント表示用のロシア語の文言を保持する。
/// `Network` / `Unexpected` は内部詳細を含むため、エンベロープ
/// 変換時に汎用メッセージへ置き換えられる。
#[derive(Debug, Clone, Error)]
pub enum DataApiError {
   /// ユーザーが見つからない（404）
   #[error("Пользователь не найден")]
   UserNotFound,

   /// 記事が見つからない（404）
   #[error("Статья не найдена")]
   PostNotFound,

   /// コメントが見つからない（404）
   #[error("Комментарий не найден")]
   CommentNotFound,

   /// バリデーションエラー（400）
   #[error("Некорректный запрос: {0}")]
   Validation(String),

   /// タイムアウト
   #[error("Сервер данных не отвечает")]
   Timeout,

   /// ネットワークエラー
   #[error("Сетевая ошибка: {0}")]
   Network(String),

   /// 予期しないエラー
   #[error("Неожиданная ошибка: {0}")]
   Unexpected(String),
}

impl From<reqwest::Error> for DataApiError {
   fn from(err: reqwest::Error) -> Self {
      if err.is_timeout() {
         DataApiError::Timeout
      } else {
         DataApiError::Network(err.to_string())
      }
   }
}
