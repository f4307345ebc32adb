//! 記事関連のデータ API クライアント

use async_trait::async_trait;
use uuid::Uuid;

use super::{
   client_impl::DataApiClientImpl,
   error::DataApiError,
   response::{handle_empty_response, handle_response},
   types::{NewPostDto, PostDto, PostsPageDto, UpdatePostDto},
};

/// 記事関連のデータ API クライアントトレイト
#[async_trait]
pub trait PostApi: Send + Sync {
   /// 記事を取得する
   ///
   /// データ API の `GET /posts/{id}` を呼び出す。
   async fn get_post(&self, id: Uuid) -> Result<PostDto, DataApiError>;

   /// 記事一覧ページを取得する
   ///
   /// データ API の `GET /posts` を呼び出す。
   ///
   /// # 引数
   ///
   /// - `search`: タイトルの部分一致検索（省略可）
   /// - `page`: 1 始まりのページ番号
   /// - `limit`: 1 ページあたりの件数
   async fn get_posts(
      &self,
      search: Option<&str>,
      page: u32,
      limit: u32,
   ) -> Result<PostsPageDto, DataApiError>;

   /// 記事を作成する
   ///
   /// データ API の `POST /posts` を呼び出す。
   async fn create_post(&self, req: &NewPostDto) -> Result<PostDto, DataApiError>;

   /// 記事を更新する
   ///
   /// データ API の `PATCH /posts/{id}` を呼び出す。
   async fn update_post(&self, id: Uuid, req: &UpdatePostDto) -> Result<PostDto, DataApiError>;

   /// 記事を削除する
   ///
   /// データ API の `DELETE /posts/{id}` を呼び出す。
   async fn remove_post(&self, id: Uuid) -> Result<(), DataApiError>;
}

#[async_trait]
impl PostApi for DataApiClientImpl {
   async fn get_post(&self, id: Uuid) -> Result<PostDto, DataApiError> {
      let url = format!("{}/posts/{}", self.base_url, id);

      let response = self.client.get(&url).send().await?;
      handle_response(response, Some(DataApiError::PostNotFound)).await
   }

   async fn get_posts(
      &self,
      search: Option<&str>,
      page: u32,
      limit: u32,
   ) -> Result<PostsPageDto, DataApiError> {
      let mut url = format!("{}/posts?page={}&limit={}", self.base_url, page, limit);
      if let Some(phrase) = search {
         url.push_str(&format!("&search={}", urlencoding::encode(phrase)));
      }

      let response = self.client.get(&url).send().await?;
      handle_response(response, None).await
   }

   async fn create_post(&self, req: &NewPostDto) -> Result<PostDto, DataApiError> {
      let url = format!("{}/posts", self.base_url);

      let response = self.client.post(&url).json(req).send().await?;
      handle_response(response, None).await
   }

   async fn update_post(&self, id: Uuid, req: &UpdatePostDto) -> Result<PostDto, DataApiError> {
      let url = format!("{}/posts/{}", self.base_url, id);

      let response = self.client.patch(&url).json(req).send().await?;
      handle_response(response, Some(DataApiError::PostNotFound)).await
   }

   async fn remove_post(&self, id: Uuid) -> Result<(), DataApiError> {
      let url = format!("{}/posts/{}", self.base_url, id);

      let response = self.client.delete(&url).send().await?;
      handle_empty_response(response, Some(DataApiError::PostNotFound)).await
   }
}
