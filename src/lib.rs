//! Qoffea ターミナルクライアント
//!
//! `qoffea-common` の共通アップロード/レポートフローを解析サービスに対して実行する。
//! HTTPは reqwest、表示はターミナル。

pub mod cli;
pub mod config;
pub mod error;
pub mod local_image;
pub mod terminal;
pub mod transport;
