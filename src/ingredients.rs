use serde::Serialize;
use std::fmt;

/// A single ingredient the user has on hand.
///
/// Always trimmed and never empty; the only way to build one is [`Ingredient::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Ingredient(String);

impl Ingredient {
    /// Trim the raw text and keep it if anything is left
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Ingredient(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ingredient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered list of ingredients for the active session.
///
/// Duplicates are kept and nothing is ever reordered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngredientStore {
    items: Vec<Ingredient>,
}

impl IngredientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an ingredient, returning it when accepted.
    ///
    /// Whitespace-only text is rejected and leaves the list untouched.
    pub fn add_ingredient(&mut self, raw: &str) -> Option<&Ingredient> {
        let ingredient = Ingredient::parse(raw)?;
        self.items.push(ingredient);
        self.items.last()
    }

    /// Current ingredients in insertion order
    pub fn list_ingredients(&self) -> &[Ingredient] {
        &self.items
    }

    /// Remove the ingredient at `index`; out of range is a no-op
    pub fn remove_ingredient(&mut self, index: usize) -> Option<Ingredient> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Owned copy of the list, as sent over the wire
    pub fn to_strings(&self) -> Vec<String> {
        self.items.iter().map(|i| i.0.clone()).collect()
    }
}

impl<'a> FromIterator<&'a str> for IngredientStore {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        let mut store = IngredientStore::new();
        for raw in iter {
            store.add_ingredient(raw);
        }
        store
    }
}
