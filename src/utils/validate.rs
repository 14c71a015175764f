use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// 管理员密码最小长度
pub const MIN_PASSWORD_LENGTH: usize = 8;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 用户名长度校验：3 <= x <= 32
    if username.len() < 3 || username.len() > 32 {
        return Err("Username length must be between 3 and 32 characters");
    }
    if !USERNAME_RE.is_match(username) {
        return Err("Username must contain only letters, numbers, dots, underscores or hyphens");
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters long");
    }
    Ok(())
}

/// 解析 YYYY-MM-DD 日期，兼容带时间部分的 ISO 字符串
pub fn parse_date(value: &str, field: &str) -> Result<NaiveDate, String> {
    let trimmed = value.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| format!("Invalid {field}: '{value}'. Expected format YYYY-MM-DD"))
}

/// 可选日期：缺省或空字符串视为 None
pub fn parse_optional_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_date(v, field).map(Some),
    }
}

/// 必填文本：去除首尾空白后不能为空
pub fn required_text(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 收集缺失的必填字段，返回统一格式的错误信息
pub fn missing_fields_message(missing: &[&str]) -> Option<String> {
    if missing.is_empty() {
        None
    } else {
        Some(format!("Missing required fields: {}", missing.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("office@school.edu").is_ok());
        assert!(validate_email("office@school").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_password_length() {
        assert!(validate_password("1234567").is_err());
        assert!(validate_password("12345678").is_ok());
    }

    #[test]
    fn test_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("ad").is_err());
        assert!(validate_username("bad name").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-01", "ExamDate"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
        assert_eq!(
            parse_date("2025-03-01T10:00:00.000Z", "ExamDate"),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
        assert!(parse_date("2025-02-30", "ExamDate").is_err());
        assert!(parse_date("03/01/2025", "ExamDate").is_err());
    }

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None, "x"), Ok(None));
        assert_eq!(parse_optional_date(Some("  "), "x"), Ok(None));
        assert!(parse_optional_date(Some("nope"), "x").is_err());
    }

    #[test]
    fn test_missing_fields_message() {
        assert_eq!(missing_fields_message(&[]), None);
        assert_eq!(
            missing_fields_message(&["FirstName", "Gender"]).as_deref(),
            Some("Missing required fields: FirstName, Gender")
        );
    }
}
