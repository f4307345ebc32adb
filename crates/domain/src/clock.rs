//! # Clock（時刻プロバイダ）
//!
//! セッションの失効判定や登録日時の採番で使う `Utc::now()`
//! の直接呼び出しを置き換え、テストで固定時刻を注入可能にするための抽象化。

use chrono::{DateTime, Utc};

/// 現在時刻を提供するトレイト
pub trait Clock: Send + Sync {
   fn now(&self) -> DateTime<Utc>;
}

/// 実際のシステム時刻を返す実装
pub struct SystemClock;

impl Clock for SystemClock {
   fn now(&self) -> DateTime<Utc> {
      Utc::now()
   }
}

/// 固定時刻を返すテスト用実装
pub struct FixedClock {
   now: DateTime<Utc>,
}

impl FixedClock {
   pub fn new(now: DateTime<Utc>) -> Self {
      Self { now }
   }

   /// Unix タイムスタンプ（秒）から固定時刻を作成する
   ///
   /// テストフィクスチャ向けのショートカット。範囲外の値は
   /// テストコードのバグなので panic する。
   pub fn from_timestamp(secs: i64) -> Self {
      Self {
         now: DateTime::from_timestamp(secs, 0)
            .unwrap_or_else(|| panic!("不正なタイムスタンプ: {secs}")),
      }
   }
}

impl Clock for FixedClock {
   fn now(&self) -> DateTime<Utc> {
      self.now
   }
}
