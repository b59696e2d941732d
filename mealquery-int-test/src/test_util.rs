use chrono::{DateTime, Duration, TimeZone, Utc};
use fake::faker::lorem::en::{Sentence, Words};
use fake::Fake;
use mealquery::common::Document;
use mealquery::doc;
use mealquery::errors::QueryResult;
use mealquery::query_config::QueryConfig;

/// Runs a test against a fresh context and fails it with the error, if any.
pub fn run_test<B, T>(before: B, test: T)
where
    B: Fn() -> QueryResult<TestContext>,
    T: Fn(TestContext) -> QueryResult<()>,
{
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };
    if let Err(e) = test(ctx) {
        eprintln!("\n==================== TEST FAILED ====================");
        eprintln!("Error: {}", e);
        if let Some(cause) = e.cause() {
            eprintln!("Caused by: {}", cause);
        }
        eprintln!("=====================================================\n");
        panic!("Test failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    config: QueryConfig,
    recipes: Vec<Document>,
    meal_plans: Vec<Document>,
}

impl TestContext {
    pub fn new(config: QueryConfig, recipes: Vec<Document>, meal_plans: Vec<Document>) -> Self {
        Self {
            config,
            recipes,
            meal_plans,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn recipes(&self) -> &[Document] {
        &self.recipes
    }

    pub fn meal_plans(&self) -> &[Document] {
        &self.meal_plans
    }
}

/// Number of generated private recipes added next to the named fixtures.
pub const FILLER_RECIPES: usize = 15;

pub fn create_test_context() -> QueryResult<TestContext> {
    create_test_context_with(QueryConfig::default())
}

pub fn create_test_context_with(config: QueryConfig) -> QueryResult<TestContext> {
    let mut recipes = named_recipes();
    for i in 0..FILLER_RECIPES {
        recipes.push(generate_recipe(i as i64)?);
    }
    Ok(TestContext::new(config, recipes, meal_plans()))
}

pub fn base_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Recipes with hand-picked values that the tests assert on. All are public.
pub fn named_recipes() -> Vec<Document> {
    let day = |n: i64| base_date() + Duration::days(n);
    vec![
        doc! {
            name: "Lemon Chicken",
            description: "Roast chicken with lemon and thyme",
            cuisine: "Mediterranean",
            difficulty: "easy",
            "prepTime": 20,
            "isPublic": true,
            tags: [{ name: "dinner" }, { name: "quick" }],
            dietary: ["gluten-free", "dairy-free"],
            nutrition: { calories: 520 },
            ingredients: [{ item: "Chicken thighs" }, { item: "Lemon" }],
            "createdAt": (day(0)),
        },
        doc! {
            name: "Green Curry",
            description: "Thai curry with chicken and basil",
            cuisine: "Thai",
            difficulty: "medium",
            "prepTime": 40,
            "isPublic": true,
            tags: [{ name: "dinner" }, { name: "spicy" }],
            dietary: ["gluten-free"],
            nutrition: { calories: 610 },
            ingredients: [{ item: "Chicken breast" }, { item: "Thai basil" }],
            "createdAt": (day(3)),
        },
        doc! {
            name: "Overnight Oats",
            description: "Oats soaked in almond milk (1/2 cup) with berries",
            cuisine: "American",
            difficulty: "easy",
            "prepTime": 5,
            "isPublic": true,
            tags: [{ name: "breakfast" }, { name: "quick" }],
            dietary: ["vegan", "dairy-free"],
            nutrition: { calories: 350 },
            ingredients: [{ item: "Rolled oats" }, { item: "Almond milk" }],
            "createdAt": (day(6)),
        },
        doc! {
            name: "Mushroom Risotto",
            description: "Creamy arborio rice with porcini",
            cuisine: "Italian",
            difficulty: "hard",
            "prepTime": 50,
            "isPublic": true,
            tags: [{ name: "dinner" }],
            dietary: ["vegetarian", "gluten-free"],
            nutrition: { calories: 680 },
            ingredients: [{ item: "Arborio rice" }, { item: "Porcini" }],
            "createdAt": (day(9)),
        },
    ]
}

/// A private recipe with generated Latin text, well outside every named
/// fixture's ranges.
pub fn generate_recipe(seq: i64) -> QueryResult<Document> {
    let words: Vec<String> = Words(2..4).fake();
    let description: String = Sentence(4..8).fake();

    let mut recipe = doc! {
        cuisine: "Fusion",
        difficulty: "medium",
        "isPublic": false,
        tags: [{ name: "generated" }],
        dietary: [],
        nutrition: { calories: (1000 + seq * 10) },
    };
    recipe.put("name", words.join(" "))?;
    recipe.put("description", description)?;
    recipe.put("prepTime", 90 + seq)?;
    recipe.put("createdAt", base_date() - Duration::days(30 + seq))?;
    Ok(recipe)
}

pub fn meal_plans() -> Vec<Document> {
    let day = |n: i64| base_date() + Duration::days(n);
    vec![
        doc! {
            name: "Spring week",
            "userId": "u-1",
            status: "active",
            "startDate": (day(0)),
            "endDate": (day(6)),
            "createdAt": (day(-2)),
        },
        doc! {
            name: "Bulking month",
            "userId": "u-1",
            status: "draft",
            "startDate": (day(10)),
            "endDate": (day(40)),
            "createdAt": (day(-1)),
        },
        doc! {
            name: "Holiday week",
            "userId": "u-2",
            status: "completed",
            "startDate": (day(-20)),
            "endDate": (day(-14)),
            "createdAt": (day(-25)),
        },
    ]
}

/// The `name` of each document, in order.
pub fn names(documents: &[Document]) -> Vec<String> {
    documents
        .iter()
        .filter_map(|doc| doc.get("name").ok())
        .filter_map(|value| value.as_string().cloned())
        .collect()
}
