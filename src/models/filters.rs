use super::validation::{permitted_value, Validator};

/// 媒体列表允许的排序字段（带 `-` 前缀表示降序）
pub const MEDIA_SORT_SAFELIST: &[&str] = &[
    "id",
    "title",
    "year",
    "date_watched",
    "media_type",
    "rating",
    "watched",
    "-id",
    "-title",
    "-year",
    "-date_watched",
    "-media_type",
    "-rating",
    "-watched",
];

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const DEFAULT_SORT: &str = "id";

const MAX_PAGE: i64 = 10_000_000;
const MAX_PAGE_SIZE: i64 = 100;

/// 已验证的分页/排序参数
///
/// 只能通过 [`Filters::validate`] 构造。`sort` 直接借用自安全列表中的条目，
/// 因此不存在"排序值未经安全列表检查"的状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    page: i64,
    page_size: i64,
    sort: &'static str,
    paged: bool,
}

impl Filters {
    /// 验证原始参数并构造 Filters
    ///
    /// 所有问题都记录到 `v` 中；只要验证器里存在任何错误就返回 `None`，
    /// 调用方随后以 422 响应报告全部字段错误。
    pub fn validate(
        v: &mut Validator,
        page: i64,
        page_size: i64,
        sort: &str,
        safelist: &'static [&'static str],
    ) -> Option<Self> {
        v.check(page > 0, "page", "must be greater than zero");
        v.check(page <= MAX_PAGE, "page", "must be a maximum of 10 million");
        v.check(page_size > 0, "page_size", "must be greater than zero");
        v.check(page_size <= MAX_PAGE_SIZE, "page_size", "must be a maximum of 100");

        v.check(permitted_value(&sort, safelist), "sort", "invalid sort value");

        // 取出安全列表中完全匹配的条目本身
        match safelist.iter().copied().find(|safe| *safe == sort) {
            Some(sort) if v.valid() => Some(Self {
                page,
                page_size,
                sort,
                paged: true,
            }),
            _ => None,
        }
    }

    /// 关闭分页，列出全部匹配的记录
    pub fn without_paging(mut self) -> Self {
        self.paged = false;
        self
    }

    pub fn is_paged(&self) -> bool {
        self.paged
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn sort(&self) -> &str {
        self.sort
    }

    /// 排序列名（去掉一个前导 `-`）
    pub fn sort_column(&self) -> &'static str {
        self.sort.strip_prefix('-').unwrap_or(self.sort)
    }

    /// `-` 前缀为降序
    pub fn sort_direction(&self) -> &'static str {
        if self.sort.starts_with('-') {
            "DESC"
        } else {
            "ASC"
        }
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// 观看状态三态过滤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchedFilter {
    /// 不过滤
    Any,
    Watched,
    Unwatched,
}

impl WatchedFilter {
    /// 从查询参数解析
    ///
    /// `"true"` / `"false"` 分别过滤已看/未看，空字符串不过滤。
    /// 其他任何值都按 `"false"` 处理。
    pub fn from_query(raw: &str) -> Self {
        match raw {
            "" => WatchedFilter::Any,
            "true" => WatchedFilter::Watched,
            "false" => WatchedFilter::Unwatched,
            _ => WatchedFilter::Unwatched,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            WatchedFilter::Any => None,
            WatchedFilter::Watched => Some(true),
            WatchedFilter::Unwatched => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filters(sort: &str) -> Filters {
        let mut v = Validator::new();
        Filters::validate(&mut v, 1, 20, sort, MEDIA_SORT_SAFELIST).unwrap()
    }

    #[test]
    fn test_sort_column_strips_leading_hyphen() {
        assert_eq!(filters("-title").sort_column(), "title");
        assert_eq!(filters("title").sort_column(), "title");
        assert_eq!(filters("-date_watched").sort_column(), "date_watched");
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(filters("-year").sort_direction(), "DESC");
        assert_eq!(filters("year").sort_direction(), "ASC");
    }

    #[test]
    fn test_sort_column_strips_only_one_hyphen() {
        const SAFELIST: &[&str] = &["--rating"];
        let mut v = Validator::new();
        let f = Filters::validate(&mut v, 1, 20, "--rating", SAFELIST).unwrap();
        assert_eq!(f.sort_column(), "-rating");
        assert_eq!(f.sort_direction(), "DESC");
    }

    #[test]
    fn test_unsafelisted_sort_is_rejected() {
        let mut v = Validator::new();
        let result = Filters::validate(&mut v, 1, 20, "title; DROP TABLE media", MEDIA_SORT_SAFELIST);
        assert!(result.is_none());
        assert_eq!(v.errors()["sort"], "invalid sort value");
    }

    #[test]
    fn test_page_bounds() {
        let mut v = Validator::new();
        assert!(Filters::validate(&mut v, 0, 101, "id", MEDIA_SORT_SAFELIST).is_none());
        assert_eq!(v.errors()["page"], "must be greater than zero");
        assert_eq!(v.errors()["page_size"], "must be a maximum of 100");

        let mut v = Validator::new();
        assert!(Filters::validate(&mut v, 10_000_001, 0, "id", MEDIA_SORT_SAFELIST).is_none());
        assert_eq!(v.errors()["page"], "must be a maximum of 10 million");
        assert_eq!(v.errors()["page_size"], "must be greater than zero");
    }

    #[test]
    fn test_existing_errors_block_construction() {
        let mut v = Validator::new();
        v.add_error("page", "must be an integer value");
        assert!(Filters::validate(&mut v, 1, 20, "id", MEDIA_SORT_SAFELIST).is_none());
        assert_eq!(v.errors()["page"], "must be an integer value");
    }

    #[test]
    fn test_limit_and_offset() {
        let mut v = Validator::new();
        let f = Filters::validate(&mut v, 3, 25, "id", MEDIA_SORT_SAFELIST).unwrap();
        assert_eq!(f.limit(), 25);
        assert_eq!(f.offset(), 50);
        assert_eq!(filters("id").offset(), 0);
    }

    #[test]
    fn test_watched_filter_tri_state() {
        assert_eq!(WatchedFilter::from_query("true"), WatchedFilter::Watched);
        assert_eq!(WatchedFilter::from_query("false"), WatchedFilter::Unwatched);
        assert_eq!(WatchedFilter::from_query(""), WatchedFilter::Any);
        assert_eq!(WatchedFilter::Any.as_bool(), None);
    }

    #[test]
    fn test_watched_filter_unrecognised_value_falls_back_to_unwatched() {
        // 当前行为：无法识别的值等同于 "false"，而不是"不过滤"
        assert_eq!(WatchedFilter::from_query("bogus"), WatchedFilter::Unwatched);
        assert_eq!(WatchedFilter::from_query("TRUE"), WatchedFilter::Unwatched);
        assert_eq!(WatchedFilter::from_query("bogus").as_bool(), Some(false));
    }
}
