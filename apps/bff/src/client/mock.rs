//! # テスト用モックデータ API
//!
//! オーケストレータと統合テストで使用するインメモリのデータ API 実装。
//!
//! - 発行された呼び出しをメソッド名で記録する（認可の
//!   ショートサーキットを検証するため）
//! - メソッド名単位で失敗を注入できる（部分失敗ポリシーを
//!   検証するため）

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use blogflow_domain::role::Role;
use chrono::Utc;
use uuid::Uuid;

use super::{
   error::DataApiError,
   types::{CommentDto, NewCommentDto, NewPostDto, NewUserDto, PostDto, PostsPageDto, RoleDto,
           UpdatePostDto, UserDto},
   user_api::UserApi,
};
use crate::client::{comment_api::CommentApi, post_api::PostApi};

/// インメモリのモックデータ API
#[derive(Clone, Default)]
pub struct MockDataApi {
   users:    Arc<Mutex<Vec<UserDto>>>,
   roles:    Arc<Mutex<Vec<RoleDto>>>,
   posts:    Arc<Mutex<Vec<PostDto>>>,
   comments: Arc<Mutex<Vec<CommentDto>>>,
   /// 失敗させるメソッド名の集合
   failures: Arc<Mutex<Vec<&'static str>>>,
   /// 発行された呼び出しの記録（メソッド名）
   calls:    Arc<Mutex<Vec<&'static str>>>,
}

impl MockDataApi {
   pub fn new() -> Self {
      Self::default()
   }

   /// ユーザーを事前投入する
   pub fn add_user(&self, user: UserDto) {
      self.users.lock().unwrap().push(user);
   }

   /// ロールを事前投入する
   pub fn add_role(&self, role: RoleDto) {
      self.roles.lock().unwrap().push(role);
   }

   /// 記事を事前投入する
   pub fn add_post(&self, post: PostDto) {
      self.posts.lock().unwrap().push(post);
   }

   /// 指定メソッドをネットワークエラーで失敗させる
   pub fn fail_on(&self, method: &'static str) {
      self.failures.lock().unwrap().push(method);
   }

   /// 発行された呼び出しのメソッド名一覧を返す
   pub fn calls(&self) -> Vec<&'static str> {
      self.calls.lock().unwrap().clone()
   }

   /// 投入済みユーザーをログイン名で参照する（検証用、呼び出しは記録しない）
   pub fn find_user_by_login(&self, login: &str) -> Option<UserDto> {
      self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.login == login)
         .cloned()
   }

   /// 保存されているコメント数を返す（検証用、呼び出しは記録しない）
   pub fn comment_count(&self) -> usize {
      self.comments.lock().unwrap().len()
   }

   /// 呼び出しを記録し、失敗が注入されていればエラーを返す
   fn record(&self, method: &'static str) -> Result<(), DataApiError> {
      self.calls.lock().unwrap().push(method);
      if self.failures.lock().unwrap().contains(&method) {
         return Err(DataApiError::Network("имитация сбоя".to_string()));
      }
      Ok(())
   }
}

#[async_trait]
impl UserApi for MockDataApi {
   async fn create_user(&self, req: &NewUserDto) -> Result<UserDto, DataApiError> {
      self.record("create_user")?;
      let user = UserDto {
         id:            Uuid::now_v7(),
         login:         req.login.clone(),
         password_hash: req.password_hash.clone(),
         registered_at: req.registered_at,
         role_id:       req.role_id,
      };
      self.users.lock().unwrap().push(user.clone());
      Ok(user)
   }

   async fn get_users(&self) -> Result<Vec<UserDto>, DataApiError> {
      self.record("get_users")?;
      Ok(self.users.lock().unwrap().clone())
   }

   async fn get_user_by_id(&self, id: Uuid) -> Result<UserDto, DataApiError> {
      self.record("get_user_by_id")?;
      self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.id == id)
         .cloned()
         .ok_or(DataApiError::UserNotFound)
   }

   async fn get_user_by_login(&self, login: &str) -> Result<Option<UserDto>, DataApiError> {
      self.record("get_user_by_login")?;
      Ok(self
         .users
         .lock()
         .unwrap()
         .iter()
         .find(|u| u.login == login)
         .cloned())
   }

   async fn update_user_role(&self, id: Uuid, role: Role) -> Result<UserDto, DataApiError> {
      self.record("update_user_role")?;
      let mut users = self.users.lock().unwrap();
      let Some(user) = users.iter_mut().find(|u| u.id == id) else {
         return Err(DataApiError::UserNotFound);
      };
      user.role_id = role;
      Ok(user.clone())
   }

   async fn remove_user(&self, id: Uuid) -> Result<(), DataApiError> {
      self.record("remove_user")?;
      let mut users = self.users.lock().unwrap();
      if !users.iter().any(|u| u.id == id) {
         return Err(DataApiError::UserNotFound);
      }
      users.retain(|u| u.id != id);
      Ok(())
   }

   async fn get_roles(&self) -> Result<Vec<RoleDto>, DataApiError> {
      self.record("get_roles")?;
      Ok(self.roles.lock().unwrap().clone())
   }
}

#[async_trait]
impl PostApi for MockDataApi {
   async fn get_post(&self, id: Uuid) -> Result<PostDto, DataApiError> {
      self.record("get_post")?;
      self
         .posts
         .lock()
         .unwrap()
         .iter()
         .find(|p| p.id == id)
         .cloned()
         .ok_or(DataApiError::PostNotFound)
   }

   async fn get_posts(
      &self,
      search: Option<&str>,
      page: u32,
      limit: u32,
   ) -> Result<PostsPageDto, DataApiError> {
      self.record("get_posts")?;
      let posts = self.posts.lock().unwrap();
      let filtered: Vec<PostDto> = posts
         .iter()
         .filter(|p| search.is_none_or(|phrase| p.title.contains(phrase)))
         .cloned()
         .collect();

      let limit = limit.max(1) as usize;
      let last_page = filtered.len().div_ceil(limit).max(1) as u32;
      let start = (page.max(1) as usize - 1) * limit;
      let page_posts = filtered.into_iter().skip(start).take(limit).collect();

      Ok(PostsPageDto {
         posts: page_posts,
         last_page,
      })
   }

   async fn create_post(&self, req: &NewPostDto) -> Result<PostDto, DataApiError> {
      self.record("create_post")?;
      let post = PostDto {
         id:           Uuid::now_v7(),
         title:        req.title.clone(),
         content:      req.content.clone(),
         published_at: req.published_at,
         author:       req.author,
      };
      self.posts.lock().unwrap().push(post.clone());
      Ok(post)
   }

   async fn update_post(&self, id: Uuid, req: &UpdatePostDto) -> Result<PostDto, DataApiError> {
      self.record("update_post")?;
      let mut posts = self.posts.lock().unwrap();
      let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
         return Err(DataApiError::PostNotFound);
      };
      post.title = req.title.clone();
      post.content = req.content.clone();
      Ok(post.clone())
   }

   async fn remove_post(&self, id: Uuid) -> Result<(), DataApiError> {
      self.record("remove_post")?;
      let mut posts = self.posts.lock().unwrap();
      if !posts.iter().any(|p| p.id == id) {
         return Err(DataApiError::PostNotFound);
      }
      posts.retain(|p| p.id != id);
      Ok(())
   }
}

#[async_trait]
impl CommentApi for MockDataApi {
   async fn add_comment(&self, req: &NewCommentDto) -> Result<CommentDto, DataApiError> {
      self.record("add_comment")?;
      let comment = CommentDto {
         id:           Uuid::now_v7(),
         post_id:      req.post_id,
         author_id:    req.author_id,
         content:      req.content.clone(),
         published_at: Utc::now(),
      };
      self.comments.lock().unwrap().push(comment.clone());
      Ok(comment)
   }

   async fn get_comments_by_post(&self, post_id: Uuid) -> Result<Vec<CommentDto>, DataApiError> {
      self.record("get_comments_by_post")?;
      Ok(self
         .comments
         .lock()
         .unwrap()
         .iter()
         .filter(|c| c.post_id == post_id)
         .cloned()
         .collect())
   }

   async fn remove_comment(&self, id: Uuid) -> Result<(), DataApiError> {
      self.record("remove_comment")?;
      let mut comments = self.comments.lock().unwrap();
      if !comments.iter().any(|c| c.id == id) {
         return Err(DataApiError::CommentNotFound);
      }
      comments.retain(|c| c.id != id);
      Ok(())
   }
}
