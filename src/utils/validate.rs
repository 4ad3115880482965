use crate::config::UploadConfig;

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MIN_GRADE: i32 = 0;
pub const MAX_GRADE: i32 = 100;
// 与数据库 INTEGER 列一致
pub const MAX_LINE_NUMBER: u32 = i32::MAX as u32;

pub fn validate_title(title: &str) -> Result<(), &'static str> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title must not be empty");
    }
    // 标题长度按字符计算，兼容中文标题
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err("Title must be at most 100 characters");
    }
    Ok(())
}

/// 截止时间如果设置，必须晚于当前时间
pub fn validate_deadline(
    deadline: Option<chrono::DateTime<chrono::Utc>>,
    now: chrono::DateTime<chrono::Utc>,
) -> Result<(), &'static str> {
    match deadline {
        Some(deadline) if deadline <= now => Err("Deadline must be in the future"),
        _ => Ok(()),
    }
}

pub fn validate_grade(grade: Option<i32>) -> Result<(), &'static str> {
    match grade {
        Some(grade) if !(MIN_GRADE..=MAX_GRADE).contains(&grade) => {
            Err("Grade must be an integer between 0 and 100")
        }
        _ => Ok(()),
    }
}

pub fn validate_review_comments(comments: &str) -> Result<(), &'static str> {
    if comments.trim().is_empty() {
        return Err("Review comments must not be empty");
    }
    Ok(())
}

/// 行号从 1 开始，返回转换后的行号
pub fn validate_line_number(line_number: i64) -> Result<u32, &'static str> {
    if line_number < 1 {
        return Err("Line number must be a positive integer");
    }
    if line_number > i64::from(MAX_LINE_NUMBER) {
        return Err("Line number is too large");
    }
    Ok(line_number as u32)
}

pub fn validate_comment_text(text: &str) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("Comment text must not be empty");
    }
    Ok(())
}

/// 校验上传文件：非空、大小、扩展名
pub fn validate_upload(
    config: &UploadConfig,
    file_name: &str,
    content: &[u8],
) -> Result<(), String> {
    if file_name.trim().is_empty() {
        return Err("File name must not be empty".to_string());
    }
    if content.is_empty() {
        return Err("Uploaded file is empty".to_string());
    }
    if content.len() > config.max_size {
        return Err(format!(
            "File size {} exceeds the limit of {} bytes",
            content.len(),
            config.max_size
        ));
    }

    let extension = super::file_extension(file_name);
    if !config
        .allowed_types
        .iter()
        .any(|t| t.to_lowercase() == extension)
    {
        return Err(format!("File type not allowed: '{extension}'"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title() {
        assert!(validate_title("Lab 1: Sorting").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_deadline_must_be_in_future() {
        let now = chrono::Utc::now();
        assert!(validate_deadline(None, now).is_ok());
        assert!(validate_deadline(Some(now + chrono::Duration::days(1)), now).is_ok());
        assert!(validate_deadline(Some(now), now).is_err());
        assert!(validate_deadline(Some(now - chrono::Duration::seconds(1)), now).is_err());
    }

    #[test]
    fn test_grade_range() {
        assert!(validate_grade(None).is_ok());
        assert!(validate_grade(Some(0)).is_ok());
        assert!(validate_grade(Some(100)).is_ok());
        assert!(validate_grade(Some(150)).is_err());
        assert!(validate_grade(Some(-1)).is_err());
    }

    #[test]
    fn test_line_number() {
        assert_eq!(validate_line_number(1), Ok(1));
        assert_eq!(validate_line_number(42), Ok(42));
        assert!(validate_line_number(0).is_err());
        assert!(validate_line_number(-3).is_err());
        assert_eq!(
            validate_line_number(i64::from(i32::MAX)),
            Ok(MAX_LINE_NUMBER)
        );
        assert!(validate_line_number(i64::from(i32::MAX) + 1).is_err());
        assert!(validate_line_number(3_000_000_000).is_err());
        assert!(validate_line_number(i64::MAX).is_err());
    }

    #[test]
    fn test_comment_text() {
        assert!(validate_comment_text("Off by one here").is_ok());
        assert!(validate_comment_text(" \n ").is_err());
        assert!(validate_review_comments("").is_err());
    }

    #[test]
    fn test_upload() {
        let config = UploadConfig::default();
        assert!(validate_upload(&config, "lab.py", b"print(1)").is_ok());
        assert!(validate_upload(&config, "LAB.PY", b"print(1)").is_ok());
        assert!(validate_upload(&config, "lab.exe", b"MZ").is_err());
        assert!(validate_upload(&config, "lab.py", b"").is_err());

        let big = vec![b'a'; config.max_size + 1];
        assert!(validate_upload(&config, "lab.py", &big).is_err());
    }
}
