use log::debug;
use serde::Serialize;

use crate::controller::{RecipeRequestController, RequestState};
use crate::ingredients::{Ingredient, IngredientStore};
use crate::providers::RecipeProvider;
use crate::render::render_markdown;

/// Everything a front end needs to draw the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    pub draft: String,
    pub ingredients: Vec<Ingredient>,
    /// Whether the "get a recipe" action should be offered
    pub show_recipe_button: bool,
    pub loading: bool,
    pub state: RequestState,
    /// Raw markdown of the last good recipe
    pub recipe_markdown: Option<String>,
    /// The same recipe rendered to safe HTML
    pub recipe_html: Option<String>,
    pub error: Option<String>,
}

/// One user's session: the ingredient form, the list, and the recipe request.
///
/// Front ends hold a `Session` and call into it; nothing here is global.
#[derive(Debug)]
pub struct Session {
    store: IngredientStore,
    controller: RecipeRequestController,
    draft: String,
    min_ingredients: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(3)
    }
}

impl Session {
    /// A recipe can be requested once more than `min_ingredients` are listed
    pub fn new(min_ingredients: usize) -> Self {
        Self {
            store: IngredientStore::new(),
            controller: RecipeRequestController::new(),
            draft: String::new(),
            min_ingredients,
        }
    }

    pub fn ingredients(&self) -> &IngredientStore {
        &self.store
    }

    pub fn controller(&self) -> &RecipeRequestController {
        &self.controller
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Update the text currently typed into the ingredient field
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Submit the ingredient field. The field is cleared only if the
    /// ingredient was accepted.
    pub fn submit_draft(&mut self) -> bool {
        let accepted = self.store.add_ingredient(&self.draft).is_some();
        if accepted {
            self.draft.clear();
        } else {
            debug!("Rejected blank ingredient");
        }
        accepted
    }

    pub fn add_ingredient(&mut self, text: &str) -> bool {
        self.store.add_ingredient(text).is_some()
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Option<Ingredient> {
        self.store.remove_ingredient(index)
    }

    /// Whether the recipe action is offered: enough ingredients and nothing in flight
    pub fn can_request_recipe(&self) -> bool {
        self.store.len() > self.min_ingredients && !self.controller.is_in_flight()
    }

    /// Ask the provider for a recipe using the ingredients listed right now
    pub async fn request_recipe(&mut self, provider: &dyn RecipeProvider) -> &RequestState {
        self.controller.fetch_recipe(&self.store, provider).await
    }

    pub fn view(&self) -> SessionView {
        let state = self.controller.state().clone();
        let error = match &state {
            RequestState::Failed { message } => Some(message.clone()),
            _ => None,
        };
        let recipe_markdown = self.controller.recipe().map(str::to_string);

        SessionView {
            draft: self.draft.clone(),
            ingredients: self.store.list_ingredients().to_vec(),
            show_recipe_button: self.store.len() > self.min_ingredients,
            loading: self.controller.is_in_flight(),
            state,
            recipe_html: recipe_markdown.as_deref().map(render_markdown),
            recipe_markdown,
            error,
        }
    }
}
