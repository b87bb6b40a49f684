use crate::models::{Filters, WatchedFilter};
use sqlx::{QueryBuilder, Sqlite};

/// media 表的查询列
pub const MEDIA_COLUMNS: &str =
    "id, title, date_watched, year, media_type, thumbnail, imdb_id, rating, watched, version";

/// 列表查询构建器
pub struct MediaQueryBuilder {
    query: QueryBuilder<'static, Sqlite>,
    has_where: bool,
}

impl MediaQueryBuilder {
    pub fn new() -> Self {
        let query = QueryBuilder::new(format!("SELECT {} FROM media", MEDIA_COLUMNS));
        Self {
            query,
            has_where: false,
        }
    }

    /// 观看状态过滤
    pub fn with_watched(mut self, watched: WatchedFilter) -> Self {
        if let Some(flag) = watched.as_bool() {
            self.add_where_clause();
            self.query.push("watched = ");
            self.query.push_bind(flag);
        }
        self
    }

    /// 排序：列名来自安全列表，id 作为次级排序保证结果稳定
    pub fn with_sorting(mut self, filters: &Filters) -> Self {
        self.query.push(" ORDER BY ");
        self.query.push(filters.sort_column());
        self.query.push(" ");
        self.query.push(filters.sort_direction());
        if filters.sort_column() != "id" {
            self.query.push(", id ASC");
        }
        self
    }

    /// 未开启分页时不追加 LIMIT/OFFSET
    pub fn with_pagination(mut self, filters: &Filters) -> Self {
        if !filters.is_paged() {
            return self;
        }
        self.query.push(" LIMIT ");
        self.query.push_bind(filters.limit());
        self.query.push(" OFFSET ");
        self.query.push_bind(filters.offset());
        self
    }

    pub fn build(self) -> QueryBuilder<'static, Sqlite> {
        self.query
    }

    fn add_where_clause(&mut self) {
        if !self.has_where {
            self.query.push(" WHERE ");
            self.has_where = true;
        } else {
            self.query.push(" AND ");
        }
    }
}

impl Default for MediaQueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
