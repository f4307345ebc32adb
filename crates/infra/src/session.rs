//! # セッションストア
//!
//! トークン → セッションレコードのプロセス内マッピングを提供する。
//!
//! ## ライフサイクル
//!
//! | 操作 | 契機 | 備考 |
//! |-----|------|------|
//! | `create` | ログイン成功 | UUID v4 のトークンを生成して返す |
//! | `get` | 認可が必要な各リクエスト | 読み取り専用。失効済みはここで遅延削除される |
//! | `delete` | ログアウト | 冪等。存在しないトークンでもエラーにならない |
//!
//! ## 失効ポリシー
//!
//! セッションは作成からの経過時間が TTL を超えた時点で失効する。
//! アクセスによる延長（スライディング失効）は行わない。
//! バックグラウンドの掃除処理は持たず、`get` 時に遅延削除する。
//!
//! ## 可視性
//!
//! マップはロック越しにのみ更新されるため、作成途中のレコードが
//! 他のリクエストから観測されることはない。

use std::{
   collections::HashMap,
   sync::{Arc, Mutex},
};

use async_trait::async_trait;
use blogflow_domain::{
   clock::{Clock, SystemClock},
   role::Role,
   user::UserId,
};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::InfraError;

/// セッションデータ
///
/// ログイン成功時に作成され、以後は読み取り専用。ロールはログイン
/// 時点のコピーであり、ユーザーのロール変更は再ログインまで反映
/// されない（意図的な仕様）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
   user_id:    UserId,
   role:       Role,
   created_at: DateTime<Utc>,
}

impl SessionData {
   pub fn user_id(&self) -> &UserId {
      &self.user_id
   }

   pub fn role(&self) -> Role {
      self.role
   }

   pub fn created_at(&self) -> DateTime<Utc> {
      self.created_at
   }
}

/// セッションストアトレイト
///
/// セッションの作成・取得・削除を行う。
/// 実装はプロセス内マップの [`InMemorySessionStore`] を参照。
#[async_trait]
pub trait SessionStore: Send + Sync {
   /// セッションを作成し、トークンを返す
   ///
   /// # 戻り値
   ///
   /// 生成されたトークン（UUID v4、推測不能なランダム値）
   async fn create(&self, user_id: UserId, role: Role) -> Result<String, InfraError>;

   /// セッションを取得する
   ///
   /// 未知・不正・失効済みのトークンはすべて `None`。
   /// 不正な形式のトークンでもエラーにはならない（単に見つからない）。
   async fn get(&self, token: &str) -> Result<Option<SessionData>, InfraError>;

   /// セッションを削除する
   ///
   /// 冪等であり、存在しないトークンを削除しても成功とする。
   async fn delete(&self, token: &str) -> Result<(), InfraError>;
}

/// プロセス内マップによるセッションストア
///
/// プロセス起動時に構築し、依存として注入する。テストでは
/// ストアごと差し替えることで分離された状態で実行できる。
pub struct InMemorySessionStore {
   sessions: Mutex<HashMap<String, SessionData>>,
   ttl:      Duration,
   clock:    Arc<dyn Clock>,
}

impl InMemorySessionStore {
   /// 指定した TTL でストアを作成する
   pub fn new(ttl: Duration) -> Self {
      Self::with_clock(ttl, Arc::new(SystemClock))
   }

   /// 時刻プロバイダを注入してストアを作成する（失効のテスト用）
   pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
      Self {
         sessions: Mutex::new(HashMap::new()),
         ttl,
         clock,
      }
   }

   /// セッションが失効しているかを判定する
   fn is_expired(&self, data: &SessionData, now: DateTime<Utc>) -> bool {
      now - data.created_at > self.ttl
   }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
   async fn create(&self, user_id: UserId, role: Role) -> Result<String, InfraError> {
      // UUID v4 でトークンを生成（暗号論的に安全なランダム値）
      let token = Uuid::new_v4().to_string();
      let data = SessionData {
         user_id,
         role,
         created_at: self.clock.now(),
      };

      let mut sessions = self
         .sessions
         .lock()
         .map_err(|_| InfraError::session("セッションロックが汚染されています"))?;
      sessions.insert(token.clone(), data);

      Ok(token)
   }

   async fn get(&self, token: &str) -> Result<Option<SessionData>, InfraError> {
      let now = self.clock.now();
      let mut sessions = self
         .sessions
         .lock()
         .map_err(|_| InfraError::session("セッションロックが汚染されています"))?;

      let Some(data) = sessions.get(token).cloned() else {
         return Ok(None);
      };

      if self.is_expired(&data, now) {
         // 失効済みセッションの遅延削除
         sessions.remove(token);
         return Ok(None);
      }

      Ok(Some(data))
   }

   async fn delete(&self, token: &str) -> Result<(), InfraError> {
      let mut sessions = self
         .sessions
         .lock()
         .map_err(|_| InfraError::session("セッションロックが汚染されています"))?;
      sessions.remove(token);
      Ok(())
   }
}
