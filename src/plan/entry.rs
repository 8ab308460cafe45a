use serde::Serialize;

/// A "Food Name, Quantity" meal value split into its two parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealEntry {
    pub food: String,
    pub quantity: String,
}

impl MealEntry {
    pub fn parse(raw: &str) -> Self {
        let (food, quantity) = split_entry(raw);
        Self { food, quantity }
    }

    /// `None` when the model gave no quantity.
    pub fn quantity(&self) -> Option<&str> {
        if self.quantity.is_empty() {
            None
        } else {
            Some(&self.quantity)
        }
    }
}

/// Split on the first comma only; everything after it is the quantity.
pub fn split_entry(raw: &str) -> (String, String) {
    match raw.split_once(',') {
        Some((food, quantity)) => (food.trim().to_string(), quantity.trim().to_string()),
        None => (raw.trim().to_string(), String::new()),
    }
}
