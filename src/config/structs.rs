use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub upload: UploadConfig,
    pub verification: VerificationConfig,
    pub lifecycle: LifecycleConfig,
}

/// 应用设置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub system_name: String,
    pub environment: String,
    pub log_level: String,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub backend: String, // 存储后端: sea_orm / memory
    pub url: String,     // 数据库连接 URL（从 scheme 自动推断类型）
    pub pool_size: u32,  // 连接池大小
    pub timeout: u64,    // 连接超时 (秒)
}

/// 上传配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub dir: String,                // 上传目录
    pub max_size: usize,            // 单文件最大字节数
    pub allowed_types: Vec<String>, // 允许的扩展名（含点号，如 ".py"）
}

/// 验证服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationConfig {
    pub timeout_ms: u64,  // 单次验证超时 (毫秒)
    pub work_dir: String, // 语法检查临时目录
    #[serde(default)]
    pub checkers: Vec<SyntaxCheckerConfig>,
}

/// 外部语法检查程序
///
/// `args` 中的 `{file}` 会被替换为待检查文件的路径。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxCheckerConfig {
    pub extensions: Vec<String>,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// 提交生命周期策略
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifecycleConfig {
    pub enforce_deadline: bool, // 截止时间后拒绝提交
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            url: ":memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: "uploads".to_string(),
            max_size: 1024 * 1024,
            allowed_types: vec![
                ".py".to_string(),
                ".cpp".to_string(),
                ".cc".to_string(),
                ".cxx".to_string(),
                ".c++".to_string(),
                ".h".to_string(),
                ".txt".to_string(),
            ],
        }
    }
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 30_000,
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            checkers: vec![
                SyntaxCheckerConfig {
                    extensions: vec![".py".to_string()],
                    program: "pylint".to_string(),
                    args: vec!["--errors-only".to_string(), "{file}".to_string()],
                },
                SyntaxCheckerConfig {
                    extensions: vec![
                        ".cpp".to_string(),
                        ".cc".to_string(),
                        ".cxx".to_string(),
                        ".c++".to_string(),
                    ],
                    program: "g++".to_string(),
                    args: vec!["-fsyntax-only".to_string(), "{file}".to_string()],
                },
            ],
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            enforce_deadline: true,
        }
    }
}
