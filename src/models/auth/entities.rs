use serde::{Deserialize, Serialize};

// 用户角色
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student, // 学生
    Teacher, // 教师
    Admin,   // 管理员
}

impl UserRole {
    pub const STUDENT: &'static str = "student";
    pub const TEACHER: &'static str = "teacher";
    pub const ADMIN: &'static str = "admin";

    pub fn student_roles() -> &'static [UserRole] {
        &[Self::Student]
    }
    pub fn teacher_roles() -> &'static [UserRole] {
        &[Self::Teacher, Self::Admin]
    }
    pub fn all_roles() -> &'static [UserRole] {
        &[Self::Student, Self::Teacher, Self::Admin]
    }

    /// 是否为教学人员（教师或管理员）
    pub fn is_staff(&self) -> bool {
        matches!(self, UserRole::Teacher | UserRole::Admin)
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的用户角色: '{s}'. 支持的角色: student, teacher, admin"
            ))
        })
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Student => write!(f, "{}", UserRole::STUDENT),
            UserRole::Teacher => write!(f, "{}", UserRole::TEACHER),
            UserRole::Admin => write!(f, "{}", UserRole::ADMIN),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            UserRole::STUDENT => Ok(UserRole::Student),
            UserRole::TEACHER => Ok(UserRole::Teacher),
            UserRole::ADMIN => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

/// 调用方身份
///
/// 由上游认证层提供，生命周期服务仍会自行做权限校验。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: UserRole,
}

impl AuthContext {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn student(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Student)
    }

    pub fn teacher(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Teacher)
    }

    pub fn admin(user_id: i64) -> Self {
        Self::new(user_id, UserRole::Admin)
    }
}
