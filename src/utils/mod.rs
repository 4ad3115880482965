pub mod validate;

use std::path::Path;

pub use validate::{
    validate_comment_text, validate_deadline, validate_grade, validate_line_number,
    validate_review_comments, validate_title, validate_upload,
};

/// 提取小写扩展名（含点号），如 `Main.CPP` → `.cpp`
pub fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}
