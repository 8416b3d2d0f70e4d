use async_trait::async_trait;
use chef_enzo::controller::GENERIC_FAILURE_MESSAGE;
use chef_enzo::providers::{HuggingFaceProvider, RelayProvider};
use chef_enzo::{
    suggest_recipe_with, IngredientStore, RecipeError, RecipeProvider, RecipeRequestController,
    RequestState, Session,
};
use mockito::{Matcher, Server};
use serde_json::json;

const USER_MESSAGE: &str =
    "I have avocado, tomato, red onion, chili. Please give me a recipe you'd recommend I make!";

fn guacamole_session() -> Session {
    let mut session = Session::new(3);
    for item in ["avocado", "tomato", "red onion", "chili"] {
        session.set_draft(item);
        assert!(session.submit_draft());
    }
    session
}

/// Provider that always fails without touching the network
struct BrokenProvider;

#[async_trait]
impl RecipeProvider for BrokenProvider {
    fn provider_name(&self) -> &str {
        "broken"
    }

    async fn suggest_recipe(&self, _ingredients: &[String]) -> Result<String, RecipeError> {
        Err(RecipeError::MalformedResponse("no choices".to_string()))
    }
}

#[test]
fn test_list_preserves_call_order_and_duplicates() {
    let inputs = ["egg", "rice", "egg", "soy sauce", "rice"];
    let mut store = IngredientStore::new();
    for input in inputs {
        store.add_ingredient(input);
    }

    let listed: Vec<&str> = store.list_ingredients().iter().map(|i| i.as_str()).collect();
    assert_eq!(listed, inputs);
}

#[test]
fn test_blank_ingredients_never_change_length() {
    let mut session = guacamole_session();
    for blank in ["", "   ", "\t"] {
        session.set_draft(blank);
        assert!(!session.submit_draft());
        assert!(!session.add_ingredient(blank));
    }
    assert_eq!(session.ingredients().len(), 4);
}

#[tokio::test]
async fn test_fetch_sends_one_request_with_user_message() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "max_tokens": 1024,
            "messages": [
                {"role": "system"},
                {"role": "user", "content": USER_MESSAGE}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"choices": [{"message": {"content": "# Recipe\n..."}}]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let provider = HuggingFaceProvider::with_base_url(
        "hf_test".to_string(),
        server.url(),
        "mistralai/Mistral-7B-Instruct-v0.3".to_string(),
    );
    let mut session = guacamole_session();
    assert!(session.can_request_recipe());

    let state = session.request_recipe(&provider).await.clone();

    assert_eq!(state, RequestState::Success);
    let view = session.view();
    assert_eq!(view.recipe_markdown.as_deref(), Some("# Recipe\n..."));
    assert!(view.recipe_html.unwrap().contains("<h1>Recipe</h1>"));
    assert!(view.error.is_none());
    assert!(!view.loading);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_failure_keeps_previous_recipe() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("POST", "/api/hfRecipe")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r##"{"recipe": "# Salsa"}"##)
        .expect(1)
        .create_async()
        .await;

    let provider = RelayProvider::with_base_url(server.url());
    let mut session = guacamole_session();
    session.request_recipe(&provider).await;
    ok.assert_async().await;
    ok.remove_async().await;

    let failing = server
        .mock("POST", "/api/hfRecipe")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message": "Internal Server Error"}"#)
        .create_async()
        .await;

    let state = session.request_recipe(&provider).await.clone();

    assert_eq!(
        state,
        RequestState::Failed {
            message: GENERIC_FAILURE_MESSAGE.to_string()
        }
    );
    let view = session.view();
    assert_eq!(view.recipe_markdown.as_deref(), Some("# Salsa"));
    assert_eq!(view.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    failing.assert_async().await;
}

#[tokio::test]
async fn test_provider_error_becomes_failed_state() {
    let mut session = guacamole_session();
    let state = session.request_recipe(&BrokenProvider).await.clone();

    assert!(matches!(state, RequestState::Failed { .. }));
    assert!(session.view().recipe_markdown.is_none());

    // The user can retry after a failure
    assert!(session.can_request_recipe());
}

#[tokio::test]
async fn test_empty_list_makes_no_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hfRecipe")
        .expect(0)
        .create_async()
        .await;

    let provider = RelayProvider::with_base_url(server.url());
    let mut controller = RecipeRequestController::new();
    let state = controller
        .fetch_recipe(&IngredientStore::new(), &provider)
        .await
        .clone();

    assert_eq!(state, RequestState::Idle);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_only_one_fetch_in_flight() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hfRecipe")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r##"{"recipe": "# Pico de gallo"}"##)
        .expect(1)
        .create_async()
        .await;

    let provider = RelayProvider::with_base_url(server.url());
    let store: IngredientStore = ["avocado", "tomato", "red onion", "chili"]
        .into_iter()
        .collect();
    let mut controller = RecipeRequestController::new();

    let first = controller.begin_fetch(store.list_ingredients()).unwrap();
    let second = controller.begin_fetch(store.list_ingredients());
    assert!(matches!(second, Err(RecipeError::FetchInFlight)));
    assert!(controller.is_in_flight());

    let outcome = provider.suggest_recipe(first.ingredients()).await;
    controller.complete_fetch(first, outcome);

    assert_eq!(controller.state(), &RequestState::Success);
    assert_eq!(controller.recipe(), Some("# Pico de gallo"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_ingredients_added_after_begin_are_not_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hfRecipe")
        .match_body(Matcher::Json(json!({"ingredients": ["egg", "rice"]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r##"{"recipe": "# Congee"}"##)
        .create_async()
        .await;

    let provider = RelayProvider::with_base_url(server.url());
    let mut store: IngredientStore = ["egg", "rice"].into_iter().collect();
    let mut controller = RecipeRequestController::new();

    let ticket = controller.begin_fetch(store.list_ingredients()).unwrap();
    store.add_ingredient("ginger");
    let outcome = provider.suggest_recipe(ticket.ingredients()).await;
    controller.complete_fetch(ticket, outcome);

    assert_eq!(controller.recipe(), Some("# Congee"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_one_shot_suggest_rejects_blank_ingredients() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hfRecipe")
        .expect(0)
        .create_async()
        .await;

    let provider = RelayProvider::with_base_url(server.url());
    let blanks = vec!["  ".to_string(), " ".to_string()];
    let result = suggest_recipe_with(&provider, &blanks).await;

    assert!(matches!(result, Err(RecipeError::EmptyIngredients)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_one_shot_suggest_skips_blank_entries() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/hfRecipe")
        .match_body(Matcher::Json(json!({"ingredients": ["egg", "rice"]})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r##"{"recipe": "# Fried rice"}"##)
        .expect(1)
        .create_async()
        .await;

    let provider = RelayProvider::with_base_url(server.url());
    let recipe = suggest_recipe_with(&provider, &["egg", " ", "rice"])
        .await
        .unwrap();

    assert_eq!(recipe, "# Fried rice");
    mock.assert_async().await;
}
