//! 配置管理
//!
//! 静态配置从 `config.toml`、`config.{APP_ENV}.toml` 与环境变量分层加载。

mod r#impl;
mod structs;

pub use structs::*;
