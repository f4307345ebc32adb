//! データ API レスポンスの共通ハンドリング

use serde::de::DeserializeOwned;

use super::error::DataApiError;

/// データ API レスポンスの共通ハンドリング
///
/// 成功時はレスポンスボディを `T` にデシリアライズし、
/// エラー時はステータスコードに応じた `DataApiError` を返す。
///
/// # 引数
///
/// - `response`: データ API からの HTTP レスポンス
/// - `not_found_error`: 404 レスポンス時に返すエラー。`None` の場合は
///   `Unexpected` にフォールスルー
pub(super) async fn handle_response<T: DeserializeOwned>(
   response: reqwest::Response,
   not_found_error: Option<DataApiError>,
) -> Result<T, DataApiError> {
   let status = response.status();

   if status.is_success() {
      let body = response.json::<T>().await?;
      return Ok(body);
   }

   if status == reqwest::StatusCode::NOT_FOUND
      && let Some(err) = not_found_error
   {
      return Err(err);
   }

   let body = response.text().await.unwrap_or_default();

   let error = match status {
      reqwest::StatusCode::BAD_REQUEST => DataApiError::Validation(body),
      _ => DataApiError::Unexpected(format!("неожиданный статус {}: {}", status, body)),
   };

   Err(error)
}

/// ボディを持たない（または無視する）レスポンスの共通ハンドリング
///
/// 削除系の呼び出しで使用する。成功ステータスならボディを読まずに
/// `Ok(())` を返す。
pub(super) async fn handle_empty_response(
   response: reqwest::Response,
   not_found_error: Option<DataApiError>,
) -> Result<(), DataApiError> {
   let status = response.status();

   if status.is_success() {
      return Ok(());
   }

   if status == reqwest::StatusCode::NOT_FOUND
      && let Some(err) = not_found_error
   {
      return Err(err);
   }

   let body = response.text().await.unwrap_or_default();
   Err(DataApiError::Unexpected(format!(
      "неожиданный статус {}: {}",
      status, body
   )))
}

#[cfg(test)]
mod tests {
   use serde::Deserialize;

   use super::*;

   /// テスト用のレスポンスデータ型
   #[derive(Debug, Deserialize, PartialEq)]
   struct TestData {
      value: String,
   }

   /// テスト用の HTTP レスポンスを構築する
   fn make_response(status: u16, body: &str) -> reqwest::Response {
      let http_resp = http::Response::builder()
         .status(status)
         .header("content-type", "application/json")
         .body(body.to_string())
         .unwrap();
      reqwest::Response::from(http_resp)
   }

   #[tokio::test]
   async fn test_成功レスポンスをデシリアライズする() {
      let response = make_response(200, r#"{"value": "hello"}"#);

      let result: Result<TestData, _> = handle_response(response, None).await;

      assert_eq!(
         result.unwrap(),
         TestData {
            value: "hello".to_string(),
         }
      );
   }

   #[tokio::test]
   async fn test_404でnot_found_errorありのとき指定エラーを返す() {
      let response = make_response(404, "");

      let result: Result<TestData, _> =
         handle_response(response, Some(DataApiError::PostNotFound)).await;

      assert!(matches!(result, Err(DataApiError::PostNotFound)));
   }

   #[tokio::test]
   async fn test_404でnot_found_errorなしのときunexpectedを返す() {
      let response = make_response(404, "not found");

      let result: Result<TestData, _> = handle_response(response, None).await;

      match result {
         Err(DataApiError::Unexpected(msg)) => {
            assert!(
               msg.contains("404"),
               "メッセージにステータスコードが含まれること: {msg}"
            );
         }
         other => panic!("Unexpected を期待したが {other:?} を受け取った"),
      }
   }

   #[tokio::test]
   async fn test_400でvalidationエラーを返す() {
      let response = make_response(400, "invalid input");

      let result: Result<TestData, _> = handle_response(response, None).await;

      assert!(matches!(
         result,
         Err(DataApiError::Validation(body)) if body == "invalid input"
      ));
   }

   #[tokio::test]
   async fn test_500でunexpectedを返す() {
      let response = make_response(500, "server error");

      let result: Result<TestData, _> = handle_response(response, None).await;

      match result {
         Err(DataApiError::Unexpected(msg)) => {
            assert!(msg.contains("500"), "ステータスコードが含まれること: {msg}");
            assert!(msg.contains("server error"), "ボディが含まれること: {msg}");
         }
         other => panic!("Unexpected を期待したが {other:?} を受け取った"),
      }
   }

   #[tokio::test]
   async fn test_成功だが不正なjsonでnetworkエラーを返す() {
      let response = make_response(200, "not json");

      let result: Result<TestData, _> = handle_response(response, None).await;

      assert!(matches!(result, Err(DataApiError::Network(_))));
   }

   // ===== handle_empty_response テスト =====

   #[tokio::test]
   async fn test_空レスポンスは成功ステータスでokを返す() {
      let response = make_response(200, "{}");

      let result = handle_empty_response(response, None).await;

      assert!(result.is_ok());
   }

   #[tokio::test]
   async fn test_空レスポンスの404で指定エラーを返す() {
      let response = make_response(404, "");

      let result = handle_empty_response(response, Some(DataApiError::CommentNotFound)).await;

      assert!(matches!(result, Err(DataApiError::CommentNotFound)));
   }

   #[tokio::test]
   async fn test_空レスポンスの500でunexpectedを返す() {
      let response = make_response(500, "oops");

      let result = handle_empty_response(response, None).await;

      assert!(matches!(result, Err(DataApiError::Unexpected(_))));
   }
}
