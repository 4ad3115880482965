//! 业务数据模型
//!
//! 与 `entity` 中的数据库实体分离，存储层负责两者之间的转换。

pub mod assignments;
pub mod auth;
pub mod comments;
pub mod submissions;

pub use auth::entities::{AuthContext, UserRole};
