use crate::common::Value;
use crate::errors::QueryResult;
use crate::filter::DateInput;
use crate::query::{Query, QueryBuilder};
use crate::query_config::QueryConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MealPlanStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

impl MealPlanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealPlanStatus::Draft => "draft",
            MealPlanStatus::Active => "active",
            MealPlanStatus::Completed => "completed",
            MealPlanStatus::Archived => "archived",
        }
    }
}

impl From<MealPlanStatus> for Value {
    fn from(value: MealPlanStatus) -> Self {
        Value::from(value.as_str())
    }
}

/// Query parameters for listing a user's meal plans.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct MealPlanSearch {
    pub user_id: Option<String>,
    pub status: Option<MealPlanStatus>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl MealPlanSearch {
    /// Builds the meal plan query. Plans must start on or after `start_date`
    /// and end on or before `end_date`; `search` matches the plan name.
    pub fn to_query(&self, config: &QueryConfig) -> QueryResult<Query> {
        QueryBuilder::with_config(config.clone())
            .enumeration("userId", self.user_id.as_deref())
            .enumeration("status", self.status)
            .date_range("startDate", self.start_date.as_deref().map(DateInput::from), None)
            .date_range("endDate", None, self.end_date.as_deref().map(DateInput::from))
            .string("name", self.search.as_deref())
            .sort(self.sort_by.as_deref(), self.sort_order.as_deref())
            .paginate(self.page, self.limit)
            .build()
    }
}
