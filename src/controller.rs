use log::{error, info, warn};
use serde::Serialize;

use crate::error::RecipeError;
use crate::ingredients::{Ingredient, IngredientStore};
use crate::providers::RecipeProvider;

/// Message shown to the user when a recipe could not be produced
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not generate a recipe. Please try again.";

/// Lifecycle of the recipe request.
///
/// `Idle -> InFlight -> Success | Failed`, and a new fetch from either
/// terminal state goes back to `InFlight`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    InFlight,
    Success,
    Failed { message: String },
}

/// Proof that a fetch was started; hand it back to [`RecipeRequestController::complete_fetch`].
#[derive(Debug, PartialEq, Eq)]
pub struct FetchTicket {
    id: u64,
    ingredients: Vec<String>,
}

impl FetchTicket {
    /// The ingredient list as it was when the fetch began
    pub fn ingredients(&self) -> &[String] {
        &self.ingredients
    }
}

/// Owns the request state and the last good recipe.
///
/// At most one request is in flight; a second `begin_fetch` is rejected
/// until the first is completed or cancelled.
#[derive(Debug, Default)]
pub struct RecipeRequestController {
    state: RequestState,
    recipe: Option<String>,
    next_id: u64,
    in_flight: Option<u64>,
}

impl RecipeRequestController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// The most recent successfully fetched recipe, verbatim
    pub fn recipe(&self) -> Option<&str> {
        self.recipe.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Start a fetch for the given ingredients.
    ///
    /// Fails with [`RecipeError::EmptyIngredients`] for an empty list and
    /// [`RecipeError::FetchInFlight`] while another fetch is outstanding;
    /// neither changes the current state.
    pub fn begin_fetch(&mut self, ingredients: &[Ingredient]) -> Result<FetchTicket, RecipeError> {
        if self.in_flight.is_some() {
            warn!("Ignoring recipe request: one is already in flight");
            return Err(RecipeError::FetchInFlight);
        }
        if ingredients.is_empty() {
            warn!("Ignoring recipe request: no ingredients");
            return Err(RecipeError::EmptyIngredients);
        }

        self.next_id += 1;
        let id = self.next_id;
        self.in_flight = Some(id);
        self.state = RequestState::InFlight;

        info!("Requesting recipe for {} ingredients", ingredients.len());
        Ok(FetchTicket {
            id,
            ingredients: ingredients.iter().map(|i| i.as_str().to_string()).collect(),
        })
    }

    /// Record the outcome of the fetch identified by `ticket`.
    ///
    /// Success replaces the stored recipe wholesale. Failure keeps the
    /// previous recipe and exposes only a generic message. Tickets that do
    /// not belong to the outstanding fetch are dropped.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, outcome: Result<String, RecipeError>) {
        if self.in_flight != Some(ticket.id) {
            warn!("Dropping result of stale recipe request #{}", ticket.id);
            return;
        }
        self.in_flight = None;

        match outcome {
            Ok(recipe) => {
                info!("Recipe received ({} bytes)", recipe.len());
                self.recipe = Some(recipe);
                self.state = RequestState::Success;
            }
            Err(e) => {
                if e.is_upstream() {
                    error!("Error fetching recipe: {}", e);
                } else {
                    warn!("Recipe request failed: {}", e);
                }
                self.state = RequestState::Failed {
                    message: GENERIC_FAILURE_MESSAGE.to_string(),
                };
            }
        }
    }

    /// Give up on the outstanding fetch, if any.
    ///
    /// The request ends as [`RequestState::Failed`] with the previous recipe
    /// kept, and a late `complete_fetch` for it is dropped as stale.
    /// Returns whether a fetch was outstanding.
    pub fn cancel_fetch(&mut self) -> bool {
        let Some(id) = self.in_flight.take() else {
            return false;
        };

        warn!("Recipe request #{} abandoned before completion", id);
        self.state = RequestState::Failed {
            message: GENERIC_FAILURE_MESSAGE.to_string(),
        };
        true
    }

    /// Fetch a recipe for whatever the store holds right now.
    ///
    /// Never fails: every error ends up as [`RequestState::Failed`], except
    /// an empty list, which leaves the state untouched. Dropping the future
    /// before it resolves cancels the fetch.
    pub async fn fetch_recipe(
        &mut self,
        store: &IngredientStore,
        provider: &dyn RecipeProvider,
    ) -> &RequestState {
        let ticket = match self.begin_fetch(store.list_ingredients()) {
            Ok(ticket) => ticket,
            Err(_) => return &self.state,
        };

        let guard = InFlightGuard {
            id: ticket.id,
            controller: &mut *self,
        };
        let outcome = provider.suggest_recipe(ticket.ingredients()).await;
        guard.controller.complete_fetch(ticket, outcome);
        drop(guard);
        &self.state
    }
}

/// Cancels its fetch on drop unless the fetch was completed first
struct InFlightGuard<'a> {
    id: u64,
    controller: &'a mut RecipeRequestController,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.controller.in_flight == Some(self.id) {
            self.controller.cancel_fetch();
        }
    }
}
