//! # データ API クライアント
//!
//! ドメインデータ（ユーザー、記事、コメント、ロール）を所有する
//! 外部 CRUD サービスへの薄いリクエスト/レスポンスラッパー。
//!
//! ## 構成
//!
//! エンティティごとのサブトレイト（[`UserApi`] / [`PostApi`] /
//! [`CommentApi`]）と、それらを束ねるスーパートレイト
//! [`DataApiClient`] からなる。テストではサブトレイト単位で
//! スタブを使用できる。
//!
//! ## 契約
//!
//! すべての呼び出しは成功ペイロードか構造化エラー
//! （[`DataApiError`]）のどちらかを返す。通信の失敗が空の成功
//! ペイロードに化けることはない。タイムアウトはこのクライアント
//! の責務であり、[`DataApiError::Timeout`] として返る。

mod client_impl;
mod comment_api;
mod error;
pub mod mock;
mod post_api;
mod response;
mod types;
mod user_api;

pub use client_impl::{DataApiClient, DataApiClientImpl};
pub use comment_api::CommentApi;
pub use error::DataApiError;
pub use post_api::PostApi;
pub use types::{
   CommentDto,
   NewCommentDto,
   NewPostDto,
   NewUserDto,
   PostDto,
   PostsPageDto,
   RoleDto,
   UpdatePostDto,
   UserDto,
};
pub use user_api::UserApi;
