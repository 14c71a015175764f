use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// `?page=&size=`，两者都可省略
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationQuery {
    #[serde(
        default = "default_page",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub page: i64,
    #[serde(
        default = "default_size",
        deserialize_with = "deserialize_string_to_i64"
    )]
    pub size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/pagination.ts")]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PaginationQuery {
    /// 规范化页码与每页数量：页码至少为 1，每页 1~100 条
    pub fn normalized(&self) -> (u64, u64) {
        (self.page.max(1) as u64, self.size.clamp(1, 100) as u64)
    }
}

impl PaginationInfo {
    pub fn new(page: u64, page_size: u64, total: u64, total_pages: u64) -> Self {
        Self {
            page: page as i64,
            page_size: page_size as i64,
            total: total as i64,
            total_pages: total_pages as i64,
        }
    }
}

/// 查询串里的数字既可能是 JSON 整数也可能是字符串
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseInt {
    Int(i64),
    Text(String),
}

impl LooseInt {
    /// 空白字符串视为缺省
    fn into_option<E: serde::de::Error>(self) -> Result<Option<i64>, E> {
        match self {
            LooseInt::Int(v) => Ok(Some(v)),
            LooseInt::Text(s) if s.trim().is_empty() => Ok(None),
            LooseInt::Text(s) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("invalid integer: '{s}'"))),
        }
    }
}

fn deserialize_string_to_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    LooseInt::deserialize(deserializer)?
        .into_option::<D::Error>()?
        .ok_or_else(|| serde::de::Error::custom("expected an integer"))
}

// flatten 之后查询参数都以字符串到达，所以筛选字段统一走这里
pub(crate) fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<LooseInt>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => raw.into_option(),
    }
}

fn default_page() -> i64 {
    1
}

fn default_size() -> i64 {
    10
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self { page: 1, size: 10 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(flatten)]
        pagination: PaginationQuery,
        #[serde(default, deserialize_with = "deserialize_optional_i64")]
        class_id: Option<i64>,
    }

    #[test]
    fn test_flattened_query_parses_strings() {
        let probe = actix_web::web::Query::<Probe>::from_query("page=2&size=500&class_id=7")
            .expect("valid query")
            .into_inner();
        assert_eq!(probe.pagination.page, 2);
        assert_eq!(probe.class_id, Some(7));
        assert_eq!(probe.pagination.normalized(), (2, 100));
    }

    #[test]
    fn test_non_numeric_page_is_rejected() {
        assert!(actix_web::web::Query::<Probe>::from_query("page=abc").is_err());
    }

    #[test]
    fn test_flattened_query_defaults() {
        let probe = actix_web::web::Query::<Probe>::from_query("")
            .expect("empty query")
            .into_inner();
        assert_eq!(probe.pagination.normalized(), (1, 10));
        assert_eq!(probe.class_id, None);
    }
}
