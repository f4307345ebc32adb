//! ユーザー・ロール関連のデータ API クライアント

use async_trait::async_trait;
use blogflow_domain::role::Role;
use uuid::Uuid;

use super::{
   client_impl::DataApiClientImpl,
   error::DataApiError,
   response::{handle_empty_response, handle_response},
   types::{NewUserDto, RoleDto, UserDto},
};

/// ユーザー・ロール関連のデータ API クライアントトレイト
#[async_trait]
pub trait UserApi: Send + Sync {
   /// ユーザーを作成する
   ///
   /// データ API の `POST /users` を呼び出す。
   async fn create_user(&self, req: &NewUserDto) -> Result<UserDto, DataApiError>;

   /// ユーザー一覧を取得する
   ///
   /// データ API の `GET /users` を呼び出す。
   async fn get_users(&self) -> Result<Vec<UserDto>, DataApiError>;

   /// ID でユーザーを取得する
   ///
   /// データ API の `GET /users/{id}` を呼び出す。
   async fn get_user_by_id(&self, id: Uuid) -> Result<UserDto, DataApiError>;

   /// ログイン名でユーザーを検索する
   ///
   /// データ API の `GET /users?login=` を呼び出す。
   /// 認証・登録フローでは不在が正常系なので `Option` を返す。
   async fn get_user_by_login(&self, login: &str) -> Result<Option<UserDto>, DataApiError>;

   /// ユーザーのロールを変更する
   ///
   /// データ API の `PATCH /users/{id}` を呼び出す。
   async fn update_user_role(&self, id: Uuid, role: Role) -> Result<UserDto, DataApiError>;

   /// ユーザーを削除する
   ///
   /// データ API の `DELETE /users/{id}` を呼び出す。
   async fn remove_user(&self, id: Uuid) -> Result<(), DataApiError>;

   /// ロール一覧を取得する
   ///
   /// データ API の `GET /roles` を呼び出す。
   async fn get_roles(&self) -> Result<Vec<RoleDto>, DataApiError>;
}

#[async_trait]
impl UserApi for DataApiClientImpl {
   async fn create_user(&self, req: &NewUserDto) -> Result<UserDto, DataApiError> {
      let url = format!("{}/users", self.base_url);

      let response = self.client.post(&url).json(req).send().await?;
      handle_response(response, None).await
   }

   async fn get_users(&self) -> Result<Vec<UserDto>, DataApiError> {
      let url = format!("{}/users", self.base_url);

      let response = self.client.get(&url).send().await?;
      handle_response(response, None).await
   }

   async fn get_user_by_id(&self, id: Uuid) -> Result<UserDto, DataApiError> {
      let url = format!("{}/users/{}", self.base_url, id);

      let response = self.client.get(&url).send().await?;
      handle_response(response, Some(DataApiError::UserNotFound)).await
   }

   async fn get_user_by_login(&self, login: &str) -> Result<Option<UserDto>, DataApiError> {
      let url = format!(
         "{}/users?login={}",
         self.base_url,
         urlencoding::encode(login)
      );

      let response = self.client.get(&url).send().await?;
      let users: Vec<UserDto> = handle_response(response, None).await?;
      Ok(users.into_iter().next())
   }

   async fn update_user_role(&self, id: Uuid, role: Role) -> Result<UserDto, DataApiError> {
      let url = format!("{}/users/{}", self.base_url, id);
      let body = serde_json::json!({ "role_id": role });

      let response = self.client.patch(&url).json(&body).send().await?;
      handle_response(response, Some(DataApiError::UserNotFound)).await
   }

   async fn remove_user(&self, id: Uuid) -> Result<(), DataApiError> {
      let url = format!("{}/users/{}", self.base_url, id);

      let response = self.client.delete(&url).send().await?;
      handle_empty_response(response, Some(DataApiError::UserNotFound)).await
   }

   async fn get_roles(&self) -> Result<Vec<RoleDto>, DataApiError> {
      let url = format!("{}/roles", self.base_url);

      let response = self.client.get(&url).send().await?;
      handle_response(response, None).await
   }
}
