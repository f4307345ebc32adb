//! コメント関連の操作
//!
//! - `addPostComment`: コメント追加 → 記事再取得 → コメント+著者取得
//! - `removePostComment`: コメント削除

use std::collections::{HashMap, hash_map::Entry};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::{
    OperationFailure, Orchestrator, parse_args, post::PostWithCommentsData, session_of,
    to_result_value, upstream,
};
use crate::{access::Grant, client::{DataApiClient, NewCommentDto}};

/// 著者のログイン名で補強されたコメント
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CommentWithAuthorData {
    pub id:           Uuid,
    /// 著者のログイン名
    pub author:       String,
    pub content:      String,
    pub published_at: DateTime<Utc>,
}

/// 記事のコメント一覧を取得し、著者のログイン名で補強する
///
/// 同じ著者を二度引かないよう、ログイン名は ID ごとにキャッシュする。
pub(super) async fn comments_with_authors(
    data_api: &dyn DataApiClient,
    post_id: Uuid,
) -> Result<Vec<CommentWithAuthorData>, OperationFailure> {
    let comments = data_api
        .get_comments_by_post(post_id)
        .await
        .map_err(upstream("コメント一覧取得"))?;

    let mut logins: HashMap<Uuid, String> = HashMap::new();
    for comment in &comments {
        if let Entry::Vacant(entry) = logins.entry(comment.author_id) {
            let user = data_api
                .get_user_by_id(comment.author_id)
                .await
                .map_err(upstream("コメント著者の取得"))?;
            entry.insert(user.login);
        }
    }

    Ok(comments
        .into_iter()
        .map(|comment| CommentWithAuthorData {
            id:           comment.id,
            author:       logins.get(&comment.author_id).cloned().unwrap_or_default(),
            content:      comment.content,
            published_at: comment.published_at,
        })
        .collect())
}

/// `addPostComment`: コメントを追加し、最新状態の記事を返す
///
/// 部分失敗ポリシー:
/// - 書き込みが失敗したら中断し、後続の読み取りは発行しない
/// - 書き込み成功後の読み取り失敗も `error` として報告する。
///   書き込みの成功を黙って握り潰さず、クライアントに再取得を促す
pub(super) async fn add_post_comment(
    orch: &Orchestrator,
    grant: &Grant,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (post_id, content): (Uuid, String) = parse_args(args)?;
    // 著者はクライアントの申告ではなくセッションから決める
    let session = session_of(grant)?;

    orch.data_api
        .add_comment(&NewCommentDto {
            post_id,
            author_id: *session.user_id().as_uuid(),
            content,
        })
        .await
        .map_err(upstream("コメント追加"))?;

    let post = orch
        .data_api
        .get_post(post_id)
        .await
        .map_err(upstream("コメント追加後の記事再取得"))?;
    let comments = comments_with_authors(orch.data_api.as_ref(), post_id).await?;

    to_result_value(&PostWithCommentsData::new(post, comments))
}

/// `removePostComment`: コメントを削除する
pub(super) async fn remove_post_comment(
    orch: &Orchestrator,
    args: &[Value],
) -> Result<Value, OperationFailure> {
    let (comment_id,): (Uuid,) = parse_args(args)?;

    orch.data_api
        .remove_comment(comment_id)
        .await
        .map_err(upstream("コメント削除"))?;

    Ok(Value::Bool(true))
}
