//! LabReview - 实验作业提交、验证与代码评审核心
//!
//! 提交生命周期 pending → verified → reviewed，配合行级代码批注。
//!
//! # 架构
//! - `cli`: 命令行入口
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `models`: 数据模型定义
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层（生命周期、批注、授权、验证、文件存储）
//! - `storage`: 数据存储层（SeaORM / 内存）
//! - `utils`: 工具函数

pub mod cli;
pub mod config;
pub mod entity;
pub mod errors;
pub mod models;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
