/// The system prompt sent with every recipe request.
///
/// Describes the recipe assistant persona: use most of the user's ingredients,
/// keep extra ingredients few, don't introduce meat, fish or dairy the user
/// didn't list, and answer in markdown.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro, making it easy to edit without dealing with
/// Rust string syntax.
pub const RECIPE_ASSISTANT_PROMPT: &str = include_str!("prompt.txt");

/// Join ingredients into the human-readable list used in the user message
pub fn join_ingredients<S: AsRef<str>>(ingredients: &[S]) -> String {
    ingredients
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the user message that carries the ingredient list
pub fn build_user_message<S: AsRef<str>>(ingredients: &[S]) -> String {
    format!(
        "I have {}. Please give me a recipe you'd recommend I make!",
        join_ingredients(ingredients)
    )
}
