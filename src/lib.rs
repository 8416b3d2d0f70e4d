pub mod config;
pub mod controller;
pub mod error;
pub mod ingredients;
pub mod providers;
pub mod relay;
pub mod render;
pub mod session;

pub use crate::config::AppConfig;
pub use controller::{FetchTicket, RecipeRequestController, RequestState};
pub use error::RecipeError;
pub use ingredients::{Ingredient, IngredientStore};
pub use providers::{ProviderFactory, RecipeProvider};
pub use render::render_markdown;
pub use session::{Session, SessionView};

/// Ask the configured provider for a recipe in one call.
///
/// Uses `provider_name` when given, otherwise the configured default.
/// Blank entries are skipped.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), chef_enzo::RecipeError> {
/// let recipe = chef_enzo::suggest_recipe(&["egg", "rice", "scallion", "soy sauce"], None).await?;
/// println!("{}", recipe);
/// # Ok(())
/// # }
/// ```
pub async fn suggest_recipe(
    ingredients: &[&str],
    provider_name: Option<&str>,
) -> Result<String, RecipeError> {
    let config = AppConfig::load()?;
    let provider = ProviderFactory::from_config(&config, provider_name)?;
    suggest_recipe_with(provider.as_ref(), ingredients).await
}

/// Ask `provider` for a recipe, skipping blank entries.
///
/// Fails with [`RecipeError::EmptyIngredients`] without calling the
/// provider when nothing is left.
pub async fn suggest_recipe_with<S: AsRef<str>>(
    provider: &dyn RecipeProvider,
    ingredients: &[S],
) -> Result<String, RecipeError> {
    let store: IngredientStore = ingredients.iter().map(|item| item.as_ref()).collect();
    if store.is_empty() {
        return Err(RecipeError::EmptyIngredients);
    }
    provider.suggest_recipe(&store.to_strings()).await
}
