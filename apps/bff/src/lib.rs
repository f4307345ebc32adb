//! # BFF (Backend for Frontend) ライブラリ
//!
//! ブラウザクライアント専用の API サーバーのコアモジュール。
//!
//! ## モジュール構成
//!
//! - `access`: アクセスガード（単一の認可チョークポイント）
//! - `app_builder`: ルーター構築（統合テストからも使用）
//! - `client`: データ API クライアント
//! - `error`: クライアント向け文言とエンベロープ変換
//! - `handler`: HTTP ハンドラ
//! - `operation`: 操作オーケストレータ（操作カタログ）

pub mod access;
pub mod app_builder;
pub mod client;
pub mod error;
pub mod handler;
pub mod operation;
