//! 記事関連の操作
//!
//! - `fetchPost`: 記事とコメント+著者の並行取得
//! - `fetchPosts`: 検索・ページング付きの記事一覧
//! - `savePost`: 記事の作成・更新
//! - `removePost`: 記事の削除

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::{
    OperationFailure, Orchestrator, comment::{CommentWithAuthorData, comments_with_authors},
    parse_args, session_of, to_result_value, upstream,
};
use crate::{
    access::Grant,
    client::{NewPostDto, PostDto, PostsPageDto, UpdatePostDto},
};

/// フロントエンド向けの記事表現
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostData {
    pub id:           Uuid,
    pub title:        String,
    pub content:      String,
    pub published_at: DateTime<Utc>,
    pub author:       Uuid,
}

impl From<PostDto> for PostData {
    fn from(dto: PostDto) -> Self {
        Self {
            id:           dto.id,
            title:        dto.title,
            content:      dto.content,
            published_at: dto.published_at,
            author:       dto.author,
        }
    }
}

/// コメント付きの記事（`fetchPost` / `addPostComment` の結果）
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostWithCommentsData {
    pub id:           Uuid,
    pub title:        String,
    pub content:      String,
    pub published_at: DateTime<Utc>,
    pub author:       Uuid,
    pub comments:     Vec<CommentWithAuthorData>,
}

impl PostWithCommentsData {
    pub(super) fn new(post: PostDto, comments: Vec<CommentWithAuthorData>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            published_at: post.published_at,
            author: post.author,
            comments,
        }
    }
}

/// 記事一覧ページ
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostsPageData {
    pub posts:     Vec<PostData>,
    pub last_page: u32,
}

impl From<PostsPageDto> for PostsPageData {
    fn from(dto: PostsPageDto) -> Self {
        Self {
            posts:     dto.posts.into_iter().map(PostData::from).collect(),
            last_page: dto.last_page,
        }
    }
}

/// `savePost` の引数
///
/// クライアントが余計なフィールドを送っても無視する。
#[derive(Debug, Deserialize)]
struct SavePostArgs {
    /// 省略時は新規作成、指定時は更新
    #[serde(default)]
    id:      Option<Uuid>,
    title:   String,
    content: String,
}

/// `fetchPost`: 記事とコメント+著者を取得してマージする
///
/// 記事とコメントは独立しているため並行に取得する。
/// どちらか一方でも失敗したら全体を失敗させる（両方揃わないと
/// 記事ページが成立しない）。
pub(super) async fn fetch_post(
    orch: &Orchestrator,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (post_id,): (Uuid,) = parse_args(args)?;

    let (post, comments) = tokio::join!(
        orch.data_api.get_post(post_id),
        comments_with_authors(orch.data_api.as_ref(), post_id),
    );

    let post = post.map_err(upstream("記事取得"))?;
    let comments = comments?;

    to_result_value(&PostWithCommentsData::new(post, comments))
}

/// `fetchPosts`: 検索・ページング付きの記事一覧を取得する
pub(super) async fn fetch_posts(
    orch: &Orchestrator,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (search, page, limit): (Option<String>, u32, u32) = parse_args(args)?;
    let search = search.filter(|phrase| !phrase.is_empty());

    let page = orch
        .data_api
        .get_posts(search.as_deref(), page.max(1), limit.clamp(1, 100))
        .await
        .map_err(upstream("記事一覧取得"))?;

    to_result_value(&PostsPageData::from(page))
}

/// `savePost`: 記事を作成または更新する
///
/// 公開日時と著者はサーバー側で決める。クライアントから渡された
/// 値は使わない。
pub(super) async fn save_post(
    orch: &Orchestrator,
    grant: &Grant,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (post_data,): (SavePostArgs,) = parse_args(args)?;

    if post_data.title.trim().is_empty() {
        return Err(OperationFailure::InvalidArgs(
            "Заполните заголовок статьи".to_string(),
        ));
    }
    if post_data.content.trim().is_empty() {
        return Err(OperationFailure::InvalidArgs(
            "Статья не может быть пустой".to_string(),
        ));
    }

    let saved = match post_data.id {
        Some(id) => orch
            .data_api
            .update_post(
                id,
                &UpdatePostDto {
                    title:   post_data.title,
                    content: post_data.content,
                },
            )
            .await
            .map_err(upstream("記事更新"))?,
        None => {
            let session = session_of(grant)?;
            orch.data_api
                .create_post(&NewPostDto {
                    title:        post_data.title,
                    content:      post_data.content,
                    published_at: orch.clock.now(),
                    author:       *session.user_id().as_uuid(),
                })
                .await
                .map_err(upstream("記事作成"))?
        }
    };

    to_result_value(&PostData::from(saved))
}

/// `removePost`: 記事を削除する
///
/// 単一ステップのため補償処理は不要。失敗したらそのまま中断する。
pub(super) async fn remove_post(
    orch: &Orchestrator,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (post_id,): (Uuid,) = parse_args(args)?;

    orch.data_api
        .remove_post(post_id)
        .await
        .map_err(upstream("記事削除"))?;

    Ok(Value::Bool(true))
}
