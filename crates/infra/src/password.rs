//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。
//!
//! 登録時に平文パスワードをハッシュ化してデータ API に渡し、
//! ログイン時に保存済みハッシュと照合する。データ API に平文が
//! 渡ることはない。

use argon2::{
   Argon2,
   Params,
   PasswordHasher as _,
   PasswordVerifier as _,
   password_hash::{PasswordHash as Argon2PasswordHash, SaltString, rand_core::OsRng},
};
use blogflow_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// タイミング攻撃対策用のダミーハッシュ
///
/// ユーザーが存在しない場合もこのハッシュに対して検証を実行し、
/// 処理時間を均一化してアカウント存在確認攻撃を防ぐ。
pub const TIMING_DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$olntqw+EoVpwH4B1vUAI0A$5yCA1izLODgz8nQOInDGwbuQB/AS0sIQDwpmIilve5M";

/// パスワードのハッシュ化と検証を担当するトレイト
pub trait PasswordChecker: Send + Sync {
   /// 平文パスワードをハッシュ化する
   ///
   /// # Errors
   ///
   /// - ハッシュの生成に失敗した場合
   fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;

   /// パスワードを検証する
   ///
   /// # Errors
   ///
   /// - 不正なハッシュ形式の場合
   fn verify(
      &self,
      password: &PlainPassword,
      hash: &PasswordHash,
   ) -> Result<PasswordVerifyResult, InfraError>;
}

/// Argon2id によるパスワードハッシュの実装
///
/// OWASP 推奨パラメータ（RFC 9106）を使用:
/// - Memory: 64 MB
/// - Iterations: 1
/// - Parallelism: 1
pub struct Argon2PasswordChecker {
   argon2: Argon2<'static>,
}

impl Argon2PasswordChecker {
   pub fn new() -> Self {
      let params = Params::new(
         65536, // memory (KB) = 64 MB
         1,     // iterations
         1,     // parallelism
         None,  // output length (default: 32)
      )
      .expect("Argon2 パラメータが不正です");

      Self {
         argon2: Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params),
      }
   }
}

impl Default for Argon2PasswordChecker {
   fn default() -> Self {
      Self::new()
   }
}

impl PasswordChecker for Argon2PasswordChecker {
   fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
      let salt = SaltString::generate(&mut OsRng);
      let hash = self
         .argon2
         .hash_password(password.as_str().as_bytes(), &salt)
         .map_err(|e| InfraError::password_hash(format!("ハッシュ生成に失敗: {e}")))?;

      Ok(PasswordHash::new(hash.to_string()))
   }

   fn verify(
      &self,
      password: &PlainPassword,
      hash: &PasswordHash,
   ) -> Result<PasswordVerifyResult, InfraError> {
      let parsed = Argon2PasswordHash::new(hash.as_str())
         .map_err(|e| InfraError::password_hash(format!("不正なハッシュ形式: {e}")))?;

      let matched = self
         .argon2
         .verify_password(password.as_str().as_bytes(), &parsed)
         .is_ok();

      Ok(PasswordVerifyResult::from(matched))
   }
}
