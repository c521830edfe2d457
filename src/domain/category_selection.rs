use serde::{Deserialize, Serialize};

/// Suite categories offered to the selector when the caller has no list of its own.
pub const DEFAULT_SUITE_CATEGORIES: [&str; 6] = [
    "Unit",
    "Integration",
    "End-to-End",
    "Component",
    "Performance",
    "Security",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Activation {
    Pointer,
    Space,
    Enter,
}

impl Activation {
    /// Maps a keyboard key name to an activation; other keys do nothing.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " | "Space" | "Spacebar" => Some(Activation::Space),
            "Enter" => Some(Activation::Enter),
            _ => None,
        }
    }
}

/// Selected suite categories for one story form.
///
/// Every change hands back the full selection, never a diff. Insertion order is kept so the
/// request carries categories in the order the user picked them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySelection {
    available: Vec<String>,
    selected: Vec<String>,
}

impl CategorySelection {
    pub fn new(available: Vec<String>) -> Self {
        let mut deduped: Vec<String> = Vec::with_capacity(available.len());
        for category in available {
            if !deduped.contains(&category) {
                deduped.push(category);
            }
        }
        Self {
            available: deduped,
            selected: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            DEFAULT_SUITE_CATEGORIES
                .iter()
                .map(|category| category.to_string())
                .collect(),
        )
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }

    /// Flips `category` and returns the updated selection.
    /// Unknown categories leave the selection untouched.
    pub fn toggle(&mut self, category: &str) -> Vec<String> {
        if self.is_selected(category) {
            self.selected.retain(|c| c != category);
        } else if self.available.iter().any(|c| c == category) {
            self.selected.push(category.to_string());
        }
        self.selected.clone()
    }

    /// Pointer and keyboard activations are the same toggle.
    pub fn activate(&mut self, category: &str, _activation: Activation) -> Vec<String> {
        self.toggle(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_emits_full_selection() {
        let mut selection = CategorySelection::with_defaults();
        assert_eq!(selection.toggle("Security"), vec!["Security"]);
        assert_eq!(selection.toggle("Unit"), vec!["Security", "Unit"]);
        assert_eq!(selection.toggle("Security"), vec!["Unit"]);
    }

    #[test]
    fn test_double_toggle_restores_state_across_inputs() {
        let mut selection = CategorySelection::with_defaults();
        selection.toggle("Integration");
        let before = selection.clone();

        selection.activate("Unit", Activation::Pointer);
        selection.activate("Unit", Activation::Space);
        assert_eq!(selection, before);

        selection.activate("Integration", Activation::Enter);
        selection.activate("Integration", Activation::Pointer);
        assert_eq!(selection, before);
    }

    #[test]
    fn test_no_duplicates_and_unknown_ignored() {
        let mut selection = CategorySelection::new(vec![
            "Unit".to_string(),
            "Unit".to_string(),
            "Security".to_string(),
        ]);
        assert_eq!(selection.available(), ["Unit", "Security"]);
        assert!(selection.toggle("Smoke").is_empty());
        selection.toggle("Unit");
        assert_eq!(selection.selected().iter().filter(|c| *c == "Unit").count(), 1);
    }

    #[test]
    fn test_activation_from_key() {
        assert_eq!(Activation::from_key(" "), Some(Activation::Space));
        assert_eq!(Activation::from_key("Enter"), Some(Activation::Enter));
        assert_eq!(Activation::from_key("Tab"), None);
    }
}
