//! DataApiClient スーパートレイトとクライアント実装の構造体

use std::time::Duration;

use super::{comment_api::CommentApi, post_api::PostApi, user_api::UserApi};

/// データ API 呼び出しのタイムアウト
///
/// タイムアウトはこのクライアントの責務。オーケストレータは
/// タイムアウトを通常のエラーとしてエンベロープに変換する。
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// データ API クライアントトレイト（スーパートレイト）
///
/// User / Post / Comment の各サブトレイトを束ねるスーパートレイト。
/// テスト時にはサブトレイト単位でスタブを使用できる。
///
/// `dyn DataApiClient` はオブジェクトセーフであり、
/// `Arc<dyn DataApiClient>` として使用可能。
pub trait DataApiClient: UserApi + PostApi + CommentApi {}

/// ブランケット impl: 3 つのサブトレイトをすべて実装する型は
/// 自動的に `DataApiClient` を実装する。
impl<T> DataApiClient for T where T: UserApi + PostApi + CommentApi {}

/// データ API クライアント実装
#[derive(Clone)]
pub struct DataApiClientImpl {
   pub(super) base_url: String,
   pub(super) client:   reqwest::Client,
}

impl DataApiClientImpl {
   /// 新しい DataApiClient を作成する
   ///
   /// # 引数
   ///
   /// - `base_url`: データ API のベース URL（例: `http://localhost:13100`）
   pub fn new(base_url: &str) -> Self {
      let client = reqwest::Client::builder()
         .timeout(REQUEST_TIMEOUT)
         .build()
         .expect("HTTP クライアントの構築に失敗しました");

      Self {
         base_url: base_url.trim_end_matches('/').to_string(),
         client,
      }
   }
}
