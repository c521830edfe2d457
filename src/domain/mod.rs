pub mod category_selection;
pub mod error;
pub mod llm_config;
pub mod story;
pub mod test_case;
