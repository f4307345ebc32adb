//! コメント関連のデータ API クライアント

use async_trait::async_trait;
use uuid::Uuid;

use super::{
   client_impl::DataApiClientImpl,
   error::DataApiError,
   response::{handle_empty_response, handle_response},
   types::{CommentDto, NewCommentDto},
};

/// コメント関連のデータ API クライアントトレイト
#[async_trait]
pub trait CommentApi: Send + Sync {
   /// コメントを追加する
   ///
   /// データ API の `POST /comments` を呼び出す。
   async fn add_comment(&self, req: &NewCommentDto) -> Result<CommentDto, DataApiError>;

   /// 記事のコメント一覧を取得する
   ///
   /// データ API の `GET /comments?post_id=` を呼び出す。
   async fn get_comments_by_post(&self, post_id: Uuid) -> Result<Vec<CommentDto>, DataApiError>;

   /// コメントを削除する
   ///
   /// データ API の `DELETE /comments/{id}` を呼び出す。
   async fn remove_comment(&self, id: Uuid) -> Result<(), DataApiError>;
}

#[async_trait]
impl CommentApi for DataApiClientImpl {
   async fn add_comment(&self, req: &NewCommentDto) -> Result<CommentDto, DataApiError> {
      let url = format!("{}/comments", self.base_url);

      let response = self.client.post(&url).json(req).send().await?;
      handle_response(response, None).await
   }

   async fn get_comments_by_post(&self, post_id: Uuid) -> Result<Vec<CommentDto>, DataApiError> {
      let url = format!("{}/comments?post_id={}", self.base_url, post_id);

      let response = self.client.get(&url).send().await?;
      handle_response(response, None).await
   }

   async fn remove_comment(&self, id: Uuid) -> Result<(), DataApiError> {
      let url = format!("{}/comments/{}", self.base_url, id);

      let response = self.client.delete(&url).send().await?;
      handle_empty_response(response, Some(DataApiError::CommentNotFound)).await
   }
}
