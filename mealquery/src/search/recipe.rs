use crate::common::Value;
use crate::errors::QueryResult;
use crate::filter::{ArrayOperator, DateInput, NestedOperator, StringMatchOptions};
use crate::query::{Query, QueryBuilder};
use crate::query_config::QueryConfig;

/// Fields a recipe's free-text search looks at.
pub const RECIPE_SEARCH_FIELDS: [&str; 2] = ["name", "description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl From<Difficulty> for Value {
    fn from(value: Difficulty) -> Self {
        Value::from(value.as_str())
    }
}

/// Query parameters of the recipe search endpoint.
///
/// # Examples
///
/// ```rust
/// use mealquery::query_config::QueryConfig;
/// use mealquery::search::RecipeSearch;
///
/// let search = RecipeSearch {
///     search: Some("chicken".to_string()),
///     max_prep_time: Some(30.0),
///     ..Default::default()
/// };
/// let query = search.to_query(&QueryConfig::default()).unwrap();
/// assert_eq!(query.filter.clauses().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct RecipeSearch {
    pub search: Option<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tags: Option<Vec<String>>,
    pub dietary: Option<Vec<String>>,
    pub min_calories: Option<f64>,
    pub max_calories: Option<f64>,
    pub max_prep_time: Option<f64>,
    pub is_public: Option<bool>,
    pub created_after: Option<String>,
    pub created_before: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl RecipeSearch {
    /// Builds the recipe query.
    ///
    /// `search` matches name or description, `cuisine` matches exactly but
    /// ignoring case, `tags` match any tag name, `dietary` requires every label,
    /// and the calorie bounds apply to `nutrition.calories`.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a creation date bound is not a date.
    pub fn to_query(&self, config: &QueryConfig) -> QueryResult<Query> {
        let exact = StringMatchOptions {
            exact_match: true,
            ..config.string_options()
        };
        let search_fields = RECIPE_SEARCH_FIELDS.iter().map(|f| f.to_string()).collect();

        QueryBuilder::with_config(config.clone())
            .text_search_in(self.search.as_deref(), Some(search_fields))
            .string_with("cuisine", self.cuisine.as_deref(), exact)
            .enumeration("difficulty", self.difficulty)
            .nested("tags.name", self.tags.clone(), NestedOperator::In)
            .array("dietary", self.dietary.clone(), ArrayOperator::All)
            .range("nutrition.calories", self.min_calories, self.max_calories)
            .range("prepTime", None, self.max_prep_time)
            .boolean("isPublic", self.is_public)
            .date_range(
                "createdAt",
                self.created_after.as_deref().map(DateInput::from),
                self.created_before.as_deref().map(DateInput::from),
            )
            .sort(self.sort_by.as_deref(), self.sort_order.as_deref())
            .paginate(self.page, self.limit)
            .build()
    }
}
