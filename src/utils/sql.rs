//! SQL 辅助函数
//!
//! 百分比等聚合在数据库中计算。三种后端对 ROUND/除法的返回类型不一致，
//! 这里统一渲染成各后端都能解码为 f64 的表达式。

use sea_orm::DbBackend;
use sea_orm::sea_query::LikeExpr;

use crate::models::results::entities::PASS_MARK;

/// 转义 LIKE 模式中的通配符
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '%' | '_' | '\\' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 包含匹配：%input%，通配符已转义
pub fn contains_pattern(input: &str) -> LikeExpr {
    LikeExpr::new(format!("%{}%", escape_like_pattern(input.trim()))).escape('\\')
}

/// 计数表达式：满足条件的行数
pub fn count_when(condition: &str) -> String {
    format!("COUNT(CASE WHEN {condition} THEN 1 END)")
}

/// 百分比表达式：numerator * 100 / denominator，保留两位小数，分母为 0 时为 0
pub fn percentage(backend: DbBackend, numerator: &str, denominator: &str) -> String {
    let raw = format!("({numerator}) * 100.0 / NULLIF({denominator}, 0)");
    let rounded = round_2(backend, &raw);
    format!("COALESCE({rounded}, 0.0)")
}

/// 四舍五入到两位小数并转换为浮点
pub fn round_2(backend: DbBackend, expr: &str) -> String {
    match backend {
        DbBackend::MySql => format!("CAST(ROUND({expr}, 2) AS DOUBLE)"),
        DbBackend::Postgres => {
            format!("CAST(ROUND(CAST({expr} AS NUMERIC), 2) AS DOUBLE PRECISION)")
        }
        _ => format!("ROUND({expr}, 2)"),
    }
}

/// 浮点求和，空集合为 0
pub fn sum_f64(backend: DbBackend, expr: &str) -> String {
    match backend {
        DbBackend::MySql => format!("CAST(COALESCE(SUM({expr}), 0) AS DOUBLE)"),
        DbBackend::Postgres => {
            format!("CAST(COALESCE(SUM({expr}), 0) AS DOUBLE PRECISION)")
        }
        _ => format!("CAST(COALESCE(SUM({expr}), 0) AS REAL)"),
    }
}

/// 成绩等级 CASE 表达式：A+ >= 90, A >= 80, B >= 70, C >= 60, D >= 40，其余 F
pub fn grade_case(marks: &str) -> String {
    format!(
        "CASE WHEN {marks} >= 90 THEN 'A+' \
         WHEN {marks} >= 80 THEN 'A' \
         WHEN {marks} >= 70 THEN 'B' \
         WHEN {marks} >= 60 THEN 'C' \
         WHEN {marks} >= {PASS_MARK} THEN 'D' \
         ELSE 'F' END"
    )
}

/// 是否及格 CASE 表达式
pub fn pass_fail_case(marks: &str) -> String {
    format!("CASE WHEN {marks} >= {PASS_MARK} THEN 'PASS' ELSE 'FAIL' END")
}

/// 姓名拼接，各后端的字符串连接语法不同
pub fn concat_name(backend: DbBackend, first: &str, last: &str) -> String {
    match backend {
        DbBackend::MySql => format!("CONCAT({first}, ' ', {last})"),
        _ => format!("{first} || ' ' || {last}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("a_b"), "a\\_b");
        assert_eq!(escape_like_pattern("plain"), "plain");
    }

    #[test]
    fn test_percentage_guards_division_by_zero() {
        let expr = percentage(DbBackend::Sqlite, "3", "4");
        assert!(expr.contains("NULLIF(4, 0)"));
        assert!(expr.starts_with("COALESCE(ROUND("));
    }

    #[test]
    fn test_round_casts_per_backend() {
        assert!(round_2(DbBackend::MySql, "x").contains("AS DOUBLE)"));
        assert!(round_2(DbBackend::Postgres, "x").contains("AS NUMERIC"));
        assert_eq!(round_2(DbBackend::Sqlite, "x"), "ROUND(x, 2)");
    }

    #[test]
    fn test_count_when_uses_count_not_sum() {
        assert_eq!(
            count_when("status = 'Present'"),
            "COUNT(CASE WHEN status = 'Present' THEN 1 END)"
        );
    }

    #[test]
    fn test_grade_case_orders_thresholds() {
        let expr = grade_case("r.marks_obtained");
        let a_plus = expr.find("'A+'").unwrap();
        let f = expr.find("'F'").unwrap();
        assert!(a_plus < f);
        assert!(expr.contains("r.marks_obtained >= 40 THEN 'D'"));
    }

    #[test]
    fn test_concat_name() {
        assert_eq!(
            concat_name(DbBackend::MySql, "s.first_name", "s.last_name"),
            "CONCAT(s.first_name, ' ', s.last_name)"
        );
        assert_eq!(
            concat_name(DbBackend::Sqlite, "a", "b"),
            "a || ' ' || b"
        );
    }
}
