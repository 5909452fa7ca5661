use serde::Deserialize;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 12;

/// Fixed course classification.
///
/// The variant is the stable identity used by the filtering code; the label is
/// the display text that clients send and that the `courses` table stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Category{
    Programming,
    Design,
    DataAnalytics,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Programming, Category::Design, Category::DataAnalytics];

    pub fn code(&self) -> &'static str {
        match self {
            Category::Programming => "programming",
            Category::Design => "design",
            Category::DataAnalytics => "data_analytics",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Programming => "Программирование",
            Category::Design => "Дизайн",
            Category::DataAnalytics => "Дата аналитика",
        }
    }

    pub fn from_label(label:&str) -> Option<Category> {
        Category::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Category::from_label(&value).ok_or_else(|| {
            let expected = Category::ALL.iter().map(|c| format!("`{}`", c.label())).collect::<Vec<_>>().join(", ");
            format!("unknown category `{value}`, expected one of {expected}")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder{
    PriceAsc,
    PriceDesc,
    Popularity,
}

impl SortOrder {
    /// Unknown values mean "no ordering", not an error.
    pub fn from_param(value:&str) -> Option<SortOrder> {
        match value {
            "price_asc" => Some(SortOrder::PriceAsc),
            "price_desc" => Some(SortOrder::PriceDesc),
            "popularity" => Some(SortOrder::Popularity),
            _ => None,
        }
    }

    pub fn order_by(&self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "price ASC",
            SortOrder::PriceDesc => "price DESC",
            SortOrder::Popularity => "customers DESC",
        }
    }
}

/// Case fold shared by search terms and the stored `search_name` column.
/// SQLite's `lower()` only folds ASCII, so folding happens here.
pub fn fold_search_text(text:&str) -> String{
    text.trim().to_lowercase()
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Query string of `GET /courses`.
#[derive(Debug, Deserialize)]
pub struct CourseQuery{
    pub search: Option<String>,
    pub category: Option<Category>,
    // accepted for client compatibility; price bounds are not applied
    #[allow(dead_code)]
    pub min_price: Option<i64>,
    #[allow(dead_code)]
    pub max_price: Option<i64>,
    pub sort: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for CourseQuery {
    fn default() -> Self {
        CourseQuery {
            search: None,
            category: None,
            min_price: None,
            max_price: None,
            sort: None,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl CourseQuery {
    pub fn filter(&self) -> CourseFilter {
        let search = self
            .search
            .as_deref()
            .map(fold_search_text)
            .filter(|term| !term.is_empty());

        CourseFilter {
            search,
            category: self.category,
            sort: self.sort.as_deref().and_then(SortOrder::from_param),
            limit: self.limit,
            offset: u64::from(self.page.saturating_sub(1)) * u64::from(self.limit),
        }
    }
}

/// Normalised form of [`CourseQuery`] that the listing SQL is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseFilter{
    pub search: Option<String>,
    pub category: Option<Category>,
    pub sort: Option<SortOrder>,
    pub limit: u32,
    pub offset: u64,
}

/// A course as read from a seed file. Category is free text on this path.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCourse{
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub customers: i64,
    pub image: String,
}
