// 查询参数读取
//
// 缺失的键和空字符串一律视为"未提供"，返回默认值。
// 整数转换失败不会中断，只把错误记到验证器里，
// 这样一次请求的多个错误参数可以一起报告。

use std::collections::HashMap;

use crate::models::Validator;

pub type QueryParams = HashMap<String, String>;

fn non_empty<'a>(params: &'a QueryParams, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

/// 读取字符串参数
pub fn read_string(params: &QueryParams, key: &str, default: &str) -> String {
    non_empty(params, key).unwrap_or(default).to_string()
}

/// 读取逗号分隔的列表（不去空白、不去重）
pub fn read_csv(params: &QueryParams, key: &str, default: Vec<String>) -> Vec<String> {
    match non_empty(params, key) {
        Some(raw) => raw.split(',').map(str::to_string).collect(),
        None => default,
    }
}

/// 读取整数参数，转换失败时记录错误并返回默认值
pub fn read_int(params: &QueryParams, key: &str, default: i64, v: &mut Validator) -> i64 {
    let Some(raw) = non_empty(params, key) else {
        return default;
    };

    match raw.parse::<i64>() {
        Ok(i) => i,
        Err(_) => {
            v.add_error(key, "must be an integer value");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_read_string() {
        let qs = params(&[("sort", "-title"), ("watched", "")]);
        assert_eq!(read_string(&qs, "sort", "id"), "-title");
        // 空值与缺失等价
        assert_eq!(read_string(&qs, "watched", "all"), "all");
        assert_eq!(read_string(&qs, "missing", "id"), "id");
    }

    #[test]
    fn test_read_csv() {
        let qs = params(&[("tags", "a,b,c"), ("spaced", " a, b,,a"), ("empty", "")]);
        assert_eq!(read_csv(&qs, "tags", vec![]), vec!["a", "b", "c"]);
        assert_eq!(read_csv(&qs, "spaced", vec![]), vec![" a", " b", "", "a"]);
        assert_eq!(read_csv(&qs, "empty", vec!["x".to_string()]), vec!["x"]);
        assert!(read_csv(&qs, "missing", vec![]).is_empty());
    }

    #[test]
    fn test_read_int_valid() {
        let mut v = Validator::new();
        let qs = params(&[("page", "3"), ("page_size", "-5")]);
        assert_eq!(read_int(&qs, "page", 1, &mut v), 3);
        assert_eq!(read_int(&qs, "page_size", 20, &mut v), -5);
        assert_eq!(read_int(&qs, "missing", 20, &mut v), 20);
        assert!(v.valid());
    }

    #[test]
    fn test_read_int_invalid_records_one_error() {
        let mut v = Validator::new();
        let qs = params(&[("page", "abc"), ("page_size", "1.5")]);

        assert_eq!(read_int(&qs, "page", 1, &mut v), 1);
        assert_eq!(read_int(&qs, "page", 1, &mut v), 1);
        assert_eq!(read_int(&qs, "page_size", 20, &mut v), 20);

        assert_eq!(v.errors().len(), 2);
        assert_eq!(v.errors()["page"], "must be an integer value");
        assert_eq!(v.errors()["page_size"], "must be an integer value");
    }

    proptest! {
        #[test]
        fn prop_read_csv_round_trips_join(parts in prop::collection::vec("[a-z ]{0,6}", 1..8)) {
            let raw = parts.join(",");
            prop_assume!(!raw.is_empty());
            let qs = params(&[("list", raw.as_str())]);
            prop_assert_eq!(read_csv(&qs, "list", vec![]), parts);
        }

        #[test]
        fn prop_read_int_parses_any_i64(n in any::<i64>()) {
            let mut v = Validator::new();
            let raw = n.to_string();
            let qs = params(&[("n", raw.as_str())]);
            prop_assert_eq!(read_int(&qs, "n", 0, &mut v), n);
            prop_assert!(v.valid());
        }
    }
}
