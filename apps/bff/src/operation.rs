//! # 操作オーケストレータ
//!
//! 名前付きビジネス操作のカタログ。各操作は固定の認可ゲートと
//! 1 つ以上のデータ API 呼び出しからなる短いサガであり、
//! 操作ごとに部分失敗ポリシーを定義する。
//!
//! ## 実行フロー
//!
//! 1. 操作識別子を閉じたカタログ（[`OperationKind`]）で解決する。
//!    未知の識別子は検査済みエラーでありパニックしない
//! 2. 操作が宣言する許可ロール集合でアクセスガードを評価する。
//!    拒否時は即座にエンベロープを返し、データ API 呼び出しは
//!    一切発行しない
//! 3. 宣言されたステップ列を実行する。依存するステップは順次、
//!    独立したステップは `tokio::join!` で並行に発行する
//! 4. 結果を単一のオブジェクトに組み立てて返す
//!
//! すべての失敗モード（認可・バリデーション・上流障害・内部
//! エラー）はこの境界で統一エンベロープに収束する。ハンドラに
//! 例外が漏れることはない。
//!
//! ## カタログ
//!
//! | 操作識別子 | 許可ロール | ステップ |
//! |-----------|----------|---------|
//! | `addPostComment` | admin, moderator, reader | コメント追加 → 記事再取得 → コメント+著者取得 |
//! | `removePostComment` | admin, moderator | コメント削除 |
//! | `fetchPost` | 全ロール（guest 含む） | 記事 ∥ コメント+著者取得 |
//! | `fetchPosts` | 全ロール（guest 含む） | 記事一覧ページ取得 |
//! | `savePost` | admin | 記事作成または更新 |
//! | `removePost` | admin | 記事削除 |
//! | `fetchUsersWithRoles` | admin | ユーザー一覧 ∥ ロール一覧取得 |
//! | `removeUser` | admin | ユーザー削除 |
//! | `updateUserRole` | admin | ロール変更 |
//! | `register` | guest | 重複確認 → ユーザー作成 |

mod comment;
mod post;
mod user;

use std::{str::FromStr, sync::Arc};

use blogflow_domain::{clock::Clock, role::Role};
use blogflow_infra::{PasswordChecker, SessionStore};
use blogflow_shared::Envelope;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    access::{AccessDecision, AccessGuard, Grant},
    client::{DataApiClient, DataApiError},
    error::{ACCESS_DENIED_MESSAGE, envelope_from_data_api_error, internal_error_envelope},
};

/// 操作カタログ（閉じた集合）
///
/// 識別子はフロントエンドとの契約であり camelCase。
/// 未知の識別子は `from_str` の失敗として検出される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
pub enum OperationKind {
    #[strum(serialize = "addPostComment")]
    AddPostComment,
    #[strum(serialize = "removePostComment")]
    RemovePostComment,
    #[strum(serialize = "fetchPost")]
    FetchPost,
    #[strum(serialize = "fetchPosts")]
    FetchPosts,
    #[strum(serialize = "savePost")]
    SavePost,
    #[strum(serialize = "removePost")]
    RemovePost,
    #[strum(serialize = "fetchUsersWithRoles")]
    FetchUsersWithRoles,
    #[strum(serialize = "removeUser")]
    RemoveUser,
    #[strum(serialize = "updateUserRole")]
    UpdateUserRole,
    #[strum(serialize = "register")]
    Register,
}

impl OperationKind {
    /// 操作が宣言する許可ロール集合
    ///
    /// `Guest` を含む操作は匿名クライアントから到達可能になる。
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            OperationKind::AddPostComment => &[Role::Admin, Role::Moderator, Role::Reader],
            OperationKind::RemovePostComment => &[Role::Admin, Role::Moderator],
            OperationKind::FetchPost | OperationKind::FetchPosts => {
                &[Role::Admin, Role::Moderator, Role::Reader, Role::Guest]
            }
            OperationKind::SavePost
            | OperationKind::RemovePost
            | OperationKind::FetchUsersWithRoles
            | OperationKind::RemoveUser
            | OperationKind::UpdateUserRole => &[Role::Admin],
            OperationKind::Register => &[Role::Guest],
        }
    }
}

/// 操作ステップの失敗
///
/// [`OperationFailure::into_envelope`] で統一エンベロープに変換される。
pub(crate) enum OperationFailure {
    /// 引数の形式・値が不正（クライアント表示用の文言を保持）
    InvalidArgs(String),
    /// ビジネスルールによる拒否（例: ログイン名の重複）
    Rejected(String),
    /// データ API 呼び出しの失敗
    Upstream {
        context: &'static str,
        source:  DataApiError,
    },
    /// 予期しない内部状態（詳細はログのみに出力）
    Internal(String),
}

impl OperationFailure {
    fn into_envelope(self) -> Envelope<Value> {
        match self {
            OperationFailure::InvalidArgs(message) | OperationFailure::Rejected(message) => {
                Envelope::error(message)
            }
            OperationFailure::Upstream { context, source } => {
                envelope_from_data_api_error(context, source)
            }
            OperationFailure::Internal(detail) => internal_error_envelope("操作実行", detail),
        }
    }
}

/// データ API エラーを文脈付きの `OperationFailure` に変換するヘルパー
pub(crate) fn upstream(context: &'static str) -> impl FnOnce(DataApiError) -> OperationFailure {
    move |source| OperationFailure::Upstream { context, source }
}

/// 位置引数リストを型付きタプルにパースする
///
/// 引数はフロントエンドから JSON 配列で渡される。
pub(crate) fn parse_args<T: DeserializeOwned>(args: &[Value]) -> Result<T, OperationFailure> {
    serde_json::from_value(Value::Array(args.to_vec())).map_err(|e| {
        tracing::debug!(error.kind = "operation_args", "引数のパースに失敗: {e}");
        OperationFailure::InvalidArgs("Некорректные аргументы операции".to_string())
    })
}

/// レスポンスデータをエンベロープ用の JSON 値に変換する
pub(crate) fn to_result_value<T: Serialize>(data: &T) -> Result<Value, OperationFailure> {
    serde_json::to_value(data)
        .map_err(|e| OperationFailure::Internal(format!("レスポンスのシリアライズに失敗: {e}")))
}

/// 許可済みアクセスからセッションを取り出す
///
/// ゲストを含まない操作では認可を通過した時点でセッションが
/// 存在するはずであり、欠落はオーケストレータのバグ。
pub(crate) fn session_of(
    grant: &Grant,
) -> Result<&blogflow_infra::SessionData, OperationFailure> {
    grant.session.as_ref().ok_or_else(|| {
        OperationFailure::Internal("認可を通過した操作にセッションがありません".to_string())
    })
}

/// 操作オーケストレータ
///
/// プロセス起動時に一度構築し、すべての操作リクエストで共有する。
pub struct Orchestrator {
    guard:            AccessGuard,
    data_api:         Arc<dyn DataApiClient>,
    password_checker: Arc<dyn PasswordChecker>,
    clock:            Arc<dyn Clock>,
}

impl Orchestrator {
    pub fn new(
        session_store: Arc<dyn SessionStore>,
        data_api: Arc<dyn DataApiClient>,
        password_checker: Arc<dyn PasswordChecker>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            guard: AccessGuard::new(session_store),
            data_api,
            password_checker,
            clock,
        }
    }

    /// 操作を実行し、統一エンベロープを返す
    ///
    /// すべての失敗モードはここでエンベロープに収束する。
    #[tracing::instrument(skip_all, fields(operation = operation))]
    pub async fn execute(
        &self,
        operation: &str,
        token: Option<&str>,
        args: &[Value],
    ) -> Envelope<Value> {
        let Ok(kind) = OperationKind::from_str(operation) else {
            tracing::debug!(operation, "未知の操作識別子");
            return Envelope::error(format!("Неизвестная операция: {operation}"));
        };

        // 認可が最初。拒否時はデータ API 呼び出しを一切発行しない
        let decision = match self.guard.authorize(token, kind.allowed_roles()).await {
            Ok(decision) => decision,
            Err(e) => return internal_error_envelope("認可判定", e),
        };
        let grant = match decision {
            AccessDecision::Granted(grant) => grant,
            AccessDecision::Denied(reason) => {
                tracing::debug!(operation = %kind, reason = ?reason, "アクセス拒否");
                return Envelope::error(ACCESS_DENIED_MESSAGE);
            }
        };

        let result = match kind {
            OperationKind::AddPostComment => comment::add_post_comment(self, &grant, args).await,
            OperationKind::RemovePostComment => comment::remove_post_comment(self, args).await,
            OperationKind::FetchPost => post::fetch_post(self, args).await,
            OperationKind::FetchPosts => post::fetch_posts(self, args).await,
            OperationKind::SavePost => post::save_post(self, &grant, args).await,
            OperationKind::RemovePost => post::remove_post(self, args).await,
            OperationKind::FetchUsersWithRoles => user::fetch_users_with_roles(self).await,
            OperationKind::RemoveUser => user::remove_user(self, args).await,
            OperationKind::UpdateUserRole => user::update_user_role(self, args).await,
            OperationKind::Register => user::register(self, args).await,
        };

        match result {
            Ok(value) => Envelope::ok(value),
            Err(failure) => failure.into_envelope(),
        }
    }
}

#[cfg(test)]
mod tests {
    use blogflow_domain::{
        clock::{FixedClock, SystemClock},
        user::UserId,
    };
    use blogflow_infra::{Argon2PasswordChecker, InMemorySessionStore};
    use chrono::{DateTime, Duration, Utc};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::client::{PostDto, RoleDto, UserDto, mock::MockDataApi};

    /// テスト用の固定タイムスタンプ
    fn fixed_time() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    /// オーケストレータとその依存を組み立てる
    ///
    /// `MockDataApi` は Clone がストアを共有するため、返した
    /// ハンドルから投入済みデータと呼び出し記録を検証できる。
    struct TestHarness {
        orchestrator: Orchestrator,
        data_api:     MockDataApi,
        session_store: Arc<InMemorySessionStore>,
    }

    impl TestHarness {
        fn new(data_api: MockDataApi, clock: Arc<dyn Clock>) -> Self {
            let session_store = Arc::new(InMemorySessionStore::new(Duration::hours(8)));
            let orchestrator = Orchestrator::new(
                session_store.clone(),
                Arc::new(data_api.clone()),
                Arc::new(Argon2PasswordChecker::new()),
                clock,
            );
            Self {
                orchestrator,
                data_api,
                session_store,
            }
        }

        fn with_system_clock(data_api: MockDataApi) -> Self {
            Self::new(data_api, Arc::new(SystemClock))
        }

        async fn login_as(&self, role: Role) -> String {
            self.session_store
                .create(UserId::new(), role)
                .await
                .unwrap()
        }
    }

    fn make_user(login: &str, role: Role) -> UserDto {
        UserDto {
            id:            Uuid::now_v7(),
            login:         login.to_string(),
            password_hash: "$argon2id$v=19$m=65536,t=1,p=1$c29tZXNhbHQ$aGFzaA".to_string(),
            registered_at: fixed_time(),
            role_id:       role,
        }
    }

    fn make_post(title: &str, author: Uuid) -> PostDto {
        PostDto {
            id: Uuid::now_v7(),
            title: title.to_string(),
            content: "содержимое статьи".to_string(),
            published_at: fixed_time(),
            author,
        }
    }

    // ===== カタログ解決 =====

    #[tokio::test]
    async fn test_未知の操作は検査済みエラーを返す() {
        // Given
        let sut = TestHarness::with_system_clock(MockDataApi::new());

        // When
        let envelope = sut.orchestrator.execute("dropTables", None, &[]).await;

        // Then
        assert_eq!(
            envelope.error.as_deref(),
            Some("Неизвестная операция: dropTables")
        );
        assert!(envelope.result.is_none());
        assert!(sut.data_api.calls().is_empty());
    }

    // ===== 認可のショートサーキット =====

    #[tokio::test]
    async fn test_ゲストのremove_postは拒否されデータapi呼び出しはゼロ() {
        // Given
        let data_api = MockDataApi::new();
        let author = make_user("admin", Role::Admin);
        let post = make_post("статья", author.id);
        let post_id = post.id;
        data_api.add_post(post);
        let sut = TestHarness::with_system_clock(data_api);

        // When: セッションなし（ゲスト）で記事削除を試みる
        let envelope = sut
            .orchestrator
            .execute("removePost", None, &[json!(post_id)])
            .await;

        // Then
        assert_eq!(envelope.error.as_deref(), Some("Доступ запрещен"));
        assert!(envelope.result.is_none());
        // 拒否時はデータ API に一切到達しない
        assert!(sut.data_api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_readerのremove_postも拒否される() {
        // Given
        let sut = TestHarness::with_system_clock(MockDataApi::new());
        let token = sut.login_as(Role::Reader).await;

        // When
        let envelope = sut
            .orchestrator
            .execute("removePost", Some(token.as_str()), &[json!(Uuid::now_v7())])
            .await;

        // Then
        assert_eq!(envelope.error.as_deref(), Some("Доступ запрещен"));
        assert!(sut.data_api.calls().is_empty());
    }

    // ===== addPostComment =====

    #[tokio::test]
    async fn test_add_post_comment_正常系で記事とコメントがマージされる() {
        // Given: コメントゼロ件の記事と reader セッション
        let data_api = MockDataApi::new();
        let author = make_user("admin", Role::Admin);
        let post = make_post("статья", author.id);
        let post_id = post.id;
        data_api.add_user(author);
        data_api.add_post(post);

        let sut = TestHarness::with_system_clock(data_api);
        let reader_id = UserId::new();
        let reader = UserDto {
            id: *reader_id.as_uuid(),
            ..make_user("reader", Role::Reader)
        };
        sut.data_api.add_user(reader);
        let token = sut
            .session_store
            .create(reader_id, Role::Reader)
            .await
            .unwrap();

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "addPostComment",
                Some(token.as_str()),
                &[json!(post_id), json!("hello")],
            )
            .await;

        // Then
        assert_eq!(envelope.error, None);
        let result = envelope.result.unwrap();
        assert_eq!(result["id"], json!(post_id));
        let comments = result["comments"].as_array().unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0]["content"], json!("hello"));
        assert_eq!(comments[0]["author"], json!("reader"));

        // 書き込み → 読み取りの順序が守られている
        assert_eq!(
            sut.data_api.calls(),
            vec![
                "add_comment",
                "get_post",
                "get_comments_by_post",
                "get_user_by_id"
            ]
        );
    }

    #[tokio::test]
    async fn test_add_post_comment_書き込み失敗で読み取りは発行されない() {
        // Given
        let data_api = MockDataApi::new();
        let author = make_user("admin", Role::Admin);
        let post = make_post("статья", author.id);
        let post_id = post.id;
        data_api.add_post(post);
        data_api.fail_on("add_comment");

        let sut = TestHarness::with_system_clock(data_api);
        let token = sut.login_as(Role::Reader).await;

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "addPostComment",
                Some(token.as_str()),
                &[json!(post_id), json!("hello")],
            )
            .await;

        // Then: 書き込みで中断し、後続の読み取りは発行されない
        assert!(envelope.error.is_some());
        assert_eq!(sut.data_api.calls(), vec!["add_comment"]);
    }

    #[tokio::test]
    async fn test_add_post_comment_書き込み成功後の読み取り失敗はエラーとして報告される() {
        // Given
        let data_api = MockDataApi::new();
        let author = make_user("admin", Role::Admin);
        let post = make_post("статья", author.id);
        let post_id = post.id;
        data_api.add_post(post);
        data_api.fail_on("get_post");

        let sut = TestHarness::with_system_clock(data_api);
        let token = sut.login_as(Role::Reader).await;

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "addPostComment",
                Some(token.as_str()),
                &[json!(post_id), json!("hello")],
            )
            .await;

        // Then: 書き込みは成功しているが、読み取り失敗を error で報告する
        // （クライアントは再取得できる）
        assert!(envelope.error.is_some());
        assert!(envelope.result.is_none());
        assert_eq!(sut.data_api.comment_count(), 1);
    }

    #[tokio::test]
    async fn test_add_post_comment_不正な引数はバリデーションエラー() {
        // Given
        let sut = TestHarness::with_system_clock(MockDataApi::new());
        let token = sut.login_as(Role::Reader).await;

        // When: post_id が UUID でない
        let envelope = sut
            .orchestrator
            .execute("addPostComment", Some(token.as_str()), &[json!("not-a-uuid")])
            .await;

        // Then
        assert_eq!(
            envelope.error.as_deref(),
            Some("Некорректные аргументы операции")
        );
        assert!(sut.data_api.calls().is_empty());
    }

    // ===== fetchPost（ゲスト到達可能） =====

    #[tokio::test]
    async fn test_fetch_post_はセッションなしでも到達できる() {
        // Given
        let data_api = MockDataApi::new();
        let author = make_user("admin", Role::Admin);
        let post = make_post("заголовок", author.id);
        let post_id = post.id;
        data_api.add_user(author);
        data_api.add_post(post);
        let sut = TestHarness::with_system_clock(data_api);

        // When: 許可集合に guest が列挙されているため匿名でも許可される
        let envelope = sut
            .orchestrator
            .execute("fetchPost", None, &[json!(post_id)])
            .await;

        // Then
        assert_eq!(envelope.error, None);
        let result = envelope.result.unwrap();
        assert_eq!(result["title"], json!("заголовок"));
        assert_eq!(result["comments"], json!([]));
    }

    #[tokio::test]
    async fn test_fetch_post_はコメント取得失敗で全体が失敗する() {
        // Given
        let data_api = MockDataApi::new();
        let author = make_user("admin", Role::Admin);
        let post = make_post("заголовок", author.id);
        let post_id = post.id;
        data_api.add_post(post);
        data_api.fail_on("get_comments_by_post");
        let sut = TestHarness::with_system_clock(data_api);

        // When
        let envelope = sut
            .orchestrator
            .execute("fetchPost", None, &[json!(post_id)])
            .await;

        // Then: 記事とコメントの両方が揃わないと成立しない
        assert!(envelope.error.is_some());
        assert!(envelope.result.is_none());
    }

    // ===== fetchUsersWithRoles（ファンアウト） =====

    #[tokio::test]
    async fn test_fetch_users_with_roles_正常系で両方のリストが返る() {
        // Given
        let data_api = MockDataApi::new();
        data_api.add_user(make_user("admin", Role::Admin));
        data_api.add_user(make_user("reader", Role::Reader));
        data_api.add_role(RoleDto {
            id:   Role::Admin,
            name: "Администратор".to_string(),
        });
        data_api.add_role(RoleDto {
            id:   Role::Reader,
            name: "Читатель".to_string(),
        });
        let sut = TestHarness::with_system_clock(data_api);
        let token = sut.login_as(Role::Admin).await;

        // When
        let envelope = sut
            .orchestrator
            .execute("fetchUsersWithRoles", Some(token.as_str()), &[])
            .await;

        // Then
        assert_eq!(envelope.error, None);
        let result = envelope.result.unwrap();
        assert_eq!(result["users"].as_array().unwrap().len(), 2);
        assert_eq!(result["roles"].as_array().unwrap().len(), 2);
        // パスワードハッシュはレスポンスに含まれない
        assert!(result["users"][0].get("passwordHash").is_none());
        assert!(result["users"][0].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_fetch_users_with_roles_片方の失敗で全体が失敗する() {
        // Given: ユーザー取得は成功するがロール取得が失敗する
        let data_api = MockDataApi::new();
        data_api.add_user(make_user("admin", Role::Admin));
        data_api.fail_on("get_roles");
        let sut = TestHarness::with_system_clock(data_api);
        let token = sut.login_as(Role::Admin).await;

        // When
        let envelope = sut
            .orchestrator
            .execute("fetchUsersWithRoles", Some(token.as_str()), &[])
            .await;

        // Then: 部分的な result は返さない
        assert!(envelope.error.is_some());
        assert!(envelope.result.is_none());
    }

    // ===== register =====

    #[tokio::test]
    async fn test_register_はロールと登録日時をサーバー側で決める() {
        // Given: クライアントが role と registered_at を偽装して送る
        let sut = TestHarness::new(
            MockDataApi::new(),
            Arc::new(FixedClock::new(fixed_time())),
        );

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "register",
                None,
                &[json!({
                    "login": "bob",
                    "password": "secret1",
                    "role": 0,
                    "registered_at": "1999-01-01T00:00:00Z"
                })],
            )
            .await;

        // Then: 偽装フィールドは無視され、reader ロールとサーバー時刻が使われる
        assert_eq!(envelope.error, None);
        let result = envelope.result.unwrap();
        assert_eq!(result["login"], json!("bob"));
        assert_eq!(result["roleId"], json!(2));
        assert_eq!(result["registeredAt"], json!(fixed_time()));
        assert!(result.get("passwordHash").is_none());

        // データ API にはハッシュだけが渡る
        let stored = sut.data_api.find_user_by_login("bob").unwrap();
        assert_eq!(stored.role_id, Role::Reader);
        assert_eq!(stored.registered_at, fixed_time());
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert_ne!(stored.password_hash, "secret1");
    }

    #[tokio::test]
    async fn test_register_重複ログイン名は拒否される() {
        // Given
        let data_api = MockDataApi::new();
        data_api.add_user(make_user("bob", Role::Reader));
        let sut = TestHarness::with_system_clock(data_api);

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "register",
                None,
                &[json!({ "login": "bob", "password": "secret1" })],
            )
            .await;

        // Then
        assert_eq!(envelope.error.as_deref(), Some("Такой логин уже занят"));
        // 重複確認後、作成は発行されない
        assert_eq!(sut.data_api.calls(), vec!["get_user_by_login"]);
    }

    #[tokio::test]
    async fn test_register_は認証済みセッションからは呼べない() {
        // Given: ゲスト専用操作
        let sut = TestHarness::with_system_clock(MockDataApi::new());
        let token = sut.login_as(Role::Reader).await;

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "register",
                Some(token.as_str()),
                &[json!({ "login": "bob", "password": "secret1" })],
            )
            .await;

        // Then
        assert_eq!(envelope.error.as_deref(), Some("Доступ запрещен"));
        assert!(sut.data_api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_register_不正なログイン名はバリデーションエラー() {
        // Given
        let sut = TestHarness::with_system_clock(MockDataApi::new());

        // When: 2 文字のログイン名
        let envelope = sut
            .orchestrator
            .execute(
                "register",
                None,
                &[json!({ "login": "ab", "password": "secret1" })],
            )
            .await;

        // Then: 上流エラーと区別できるバリデーション文言が返る
        assert_eq!(
            envelope.error.as_deref(),
            Some("Неверно заполнен логин, минимум 3 символа")
        );
        assert!(sut.data_api.calls().is_empty());
    }

    // ===== savePost =====

    #[tokio::test]
    async fn test_save_post_新規作成は公開日時をサーバー側で採番する() {
        // Given
        let sut = TestHarness::new(
            MockDataApi::new(),
            Arc::new(FixedClock::new(fixed_time())),
        );
        let admin_id = UserId::new();
        let token = sut
            .session_store
            .create(admin_id, Role::Admin)
            .await
            .unwrap();

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "savePost",
                Some(token.as_str()),
                &[json!({ "title": "Новая статья", "content": "текст" })],
            )
            .await;

        // Then
        assert_eq!(envelope.error, None);
        let result = envelope.result.unwrap();
        assert_eq!(result["title"], json!("Новая статья"));
        assert_eq!(result["publishedAt"], json!(fixed_time()));
        assert_eq!(result["author"], json!(admin_id.as_uuid()));
    }

    #[tokio::test]
    async fn test_save_post_既存記事は更新される() {
        // Given
        let data_api = MockDataApi::new();
        let author = make_user("admin", Role::Admin);
        let post = make_post("старый заголовок", author.id);
        let post_id = post.id;
        data_api.add_post(post);
        let sut = TestHarness::with_system_clock(data_api);
        let token = sut.login_as(Role::Admin).await;

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "savePost",
                Some(token.as_str()),
                &[json!({
                    "id": post_id,
                    "title": "новый заголовок",
                    "content": "новый текст"
                })],
            )
            .await;

        // Then
        assert_eq!(envelope.error, None);
        let result = envelope.result.unwrap();
        assert_eq!(result["id"], json!(post_id));
        assert_eq!(result["title"], json!("новый заголовок"));
    }

    // ===== removeUser / updateUserRole =====

    #[tokio::test]
    async fn test_remove_user_正常系() {
        // Given
        let data_api = MockDataApi::new();
        let target = make_user("reader", Role::Reader);
        let target_id = target.id;
        data_api.add_user(target);
        let sut = TestHarness::with_system_clock(data_api);
        let token = sut.login_as(Role::Admin).await;

        // When
        let envelope = sut
            .orchestrator
            .execute("removeUser", Some(token.as_str()), &[json!(target_id)])
            .await;

        // Then
        assert_eq!(envelope.error, None);
        assert!(sut.data_api.find_user_by_login("reader").is_none());
    }

    #[tokio::test]
    async fn test_update_user_role_正常系() {
        // Given
        let data_api = MockDataApi::new();
        let target = make_user("reader", Role::Reader);
        let target_id = target.id;
        data_api.add_user(target);
        let sut = TestHarness::with_system_clock(data_api);
        let token = sut.login_as(Role::Admin).await;

        // When
        let envelope = sut
            .orchestrator
            .execute(
                "updateUserRole",
                Some(token.as_str()),
                &[json!(target_id), json!(1)],
            )
            .await;

        // Then
        assert_eq!(envelope.error, None);
        let result = envelope.result.unwrap();
        assert_eq!(result["roleId"], json!(1));
        let stored = sut.data_api.find_user_by_login("reader").unwrap();
        assert_eq!(stored.role_id, Role::Moderator);
    }

    // ===== fetchPosts =====

    #[tokio::test]
    async fn test_fetch_posts_検索とページングが透過される() {
        // Given
        let data_api = MockDataApi::new();
        let author = make_user("admin", Role::Admin);
        data_api.add_post(make_post("Rust в продакшене", author.id));
        data_api.add_post(make_post("Обзор новостей", author.id));
        let sut = TestHarness::with_system_clock(data_api);

        // When
        let envelope = sut
            .orchestrator
            .execute("fetchPosts", None, &[json!("Rust"), json!(1), json!(10)])
            .await;

        // Then
        assert_eq!(envelope.error, None);
        let result = envelope.result.unwrap();
        let posts = result["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0]["title"], json!("Rust в продакшене"));
        assert_eq!(result["lastPage"], json!(1));
    }
}
