use std::collections::{BTreeMap, HashSet};
use std::hash::Hash;

/// 字段错误集合：字段名 -> 错误信息
pub type FieldErrors = BTreeMap<String, String>;

/// 请求级验证器
///
/// 每个请求创建一个实例，按字段累积错误。同一字段只保留第一条错误信息，
/// 这样一次响应可以同时报告多个字段的问题。
#[derive(Debug, Default, Clone)]
pub struct Validator {
    errors: FieldErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 没有任何错误时返回 true
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// 添加错误（字段已存在错误时忽略，先到先得）
    pub fn add_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(key.into())
            .or_insert_with(|| message.into());
    }

    /// 条件不成立时记录错误
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }
}

/// 值是否在允许列表中
pub fn permitted_value<T: PartialEq>(value: &T, permitted: &[T]) -> bool {
    permitted.iter().any(|p| p == value)
}

/// 列表中的值是否互不重复
pub fn unique<T: Eq + Hash>(values: &[T]) -> bool {
    let mut seen = HashSet::with_capacity(values.len());
    values.iter().all(|v| seen.insert(v))
}
