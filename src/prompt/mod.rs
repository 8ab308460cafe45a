/// Separates the model's step narration from the JSON plan.
pub const DELIMITER: &str = "---PLAN---";

fn role() -> &'static str {
    "You are an expert nutrition assistant and weekly meal planner."
}

fn plan_format() -> &'static str {
r#"After the delimiter, output EXACTLY a JSON array of 7 objects, one per day, with no text before or after it.
Each object has the keys "day", "breakfast", "lunch" and "dinner", all strings.
Every meal value is formatted as "Food Name, Quantity", for example "Greek yogurt with berries, 1 bowl".
Example element: { "day": "Monday", "breakfast": "Oatmeal, 1 cup", "lunch": "Chicken salad, 1 plate", "dinner": "Salmon with rice, 200 g" }"#
}

/// Render the user's preferences into the single instruction sent to the model.
///
/// The caller guarantees `preferences` is non-empty after trimming; nothing
/// here validates it.
pub fn build(preferences: &str) -> String {
    format!(
"{role}

User preferences:
{preferences}

First, list the steps you take to plan the week, one short step per line, as a simple list. Output the steps before anything else.
Immediately after the last step, output the line {delimiter} on its own.
{plan_format}",
        role = role(),
        preferences = preferences,
        delimiter = DELIMITER,
        plan_format = plan_format(),
    )
}
