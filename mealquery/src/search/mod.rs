//! Search parameters of the recipe and meal plan endpoints, turned into queries.

mod meal_plan;
mod recipe;

pub use meal_plan::*;
pub use recipe::*;
