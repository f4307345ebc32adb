//! データ API とやり取りする DTO 定義
//!
//! ワイヤ表現はデータ API の snake_case スキーマに従う。
//! フロントエンド向けの camelCase への変換はオーケストレータ層の
//! レスポンス型が担う。

use blogflow_domain::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ユーザーレコード
///
/// `password_hash` を含むため、このままクライアントに返しては
/// ならない。レスポンスにはオーケストレータ層の変換型を使う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
   pub id:            Uuid,
   pub login:         String,
   pub password_hash: String,
   pub registered_at: DateTime<Utc>,
   pub role_id:       Role,
}

/// ユーザー作成リクエスト
///
/// `registered_at` と `role_id` は常にサーバー側で採番される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUserDto {
   pub login:         String,
   pub password_hash: String,
   pub registered_at: DateTime<Utc>,
   pub role_id:       Role,
}

/// ロールレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDto {
   pub id:   Role,
   pub name: String,
}

/// 記事レコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDto {
   pub id:           Uuid,
   pub title:        String,
   pub content:      String,
   pub published_at: DateTime<Utc>,
   /// 記事の著者（ユーザー ID）
   pub author:       Uuid,
}

/// 記事一覧ページ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostsPageDto {
   pub posts:     Vec<PostDto>,
   pub last_page: u32,
}

/// 記事作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPostDto {
   pub title:        String,
   pub content:      String,
   pub published_at: DateTime<Utc>,
   pub author:       Uuid,
}

/// 記事更新リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePostDto {
   pub title:   String,
   pub content: String,
}

/// コメントレコード
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDto {
   pub id:           Uuid,
   pub post_id:      Uuid,
   pub author_id:    Uuid,
   pub content:      String,
   pub published_at: DateTime<Utc>,
}

/// コメント作成リクエスト
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCommentDto {
   pub post_id:   Uuid,
   pub author_id: Uuid,
   pub content:   String,
}
