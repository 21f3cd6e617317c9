use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 200;

#[derive(Deserialize, Debug)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub option: String,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub size: i64,
}

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostOrder {
    Newest,
    Popular,
    Oldest,
}

impl PostOrder {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "newest" => Ok(PostOrder::Newest),
            "popular" => Ok(PostOrder::Popular),
            "" | "oldest" => Ok(PostOrder::Oldest),
            other => Err(format!(
                "invalid option '{other}': expected one of newest, popular, oldest"
            )),
        }
    }

    pub fn to_sql(self) -> &'static str {
        match self {
            PostOrder::Newest => "p.created_at DESC",
            PostOrder::Popular => "cardinality(p.liked_by) DESC, p.created_at DESC",
            PostOrder::Oldest => "p.created_at ASC",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    page: i64,
    size: i64,
}

impl Pagination {
    pub fn parse(page: i64, size: i64) -> Result<Self, String> {
        if page < 1 {
            return Err("page must be greater than zero".to_string());
        }

        if !(1..=MAX_PAGE_SIZE).contains(&size) {
            return Err(format!("size must be between 1 and {MAX_PAGE_SIZE}"));
        }

        Ok(Self { page, size })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.size)
    }
}

/// Validated form of [`ListPostsQuery`].
#[derive(Debug)]
pub struct PostQuery {
    pub keyword: Option<String>,
    pub order: PostOrder,
    pub pagination: Pagination,
}

impl TryFrom<ListPostsQuery> for PostQuery {
    type Error = String;

    fn try_from(query: ListPostsQuery) -> Result<Self, Self::Error> {
        let keyword = query.keyword.trim();
        if keyword.chars().count() > 150 {
            return Err("keyword cannot exceed 150 characters".to_string());
        }

        Ok(Self {
            keyword: (!keyword.is_empty()).then(|| keyword.to_string()),
            order: PostOrder::parse(query.option.trim())?,
            pagination: Pagination::parse(query.page, query.size)?,
        })
    }
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Metadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl Metadata {
    pub fn calculate(total_records: i64, pagination: &Pagination) -> Self {
        let size = pagination.size();
        let last_page = if total_records == 0 {
            1
        } else {
            (total_records + size - 1) / size
        };

        Self {
            current_page: pagination.page(),
            page_size: size,
            first_page: 1,
            last_page,
            total_records,
        }
    }
}
