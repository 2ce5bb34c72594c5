//! MiniJinja-backed prompt template

use crate::{PromptError, Result};
use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::collections::BTreeSet;

/// A named Jinja2 template
///
/// The source is checked for syntax errors at construction. Rendering uses
/// strict undefined handling, so a placeholder without a matching input is an
/// error rather than an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    name: String,
    source: String,
}

impl PromptTemplate {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let template = Self {
            name: name.into(),
            source: source.into(),
        };
        {
            let env = environment();
            env.template_from_str(&template.source)
                .map_err(|e| template.parse_error(&e))?;
        }
        Ok(template)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with the given variables (any serializable map-like value)
    pub fn render<S: Serialize>(&self, vars: &S) -> Result<String> {
        let env = environment();
        let compiled = env
            .template_from_str(&self.source)
            .map_err(|e| self.parse_error(&e))?;
        compiled
            .render(minijinja::Value::from_serialize(vars))
            .map_err(|e| PromptError::RenderError {
                name: self.name.clone(),
                detail: e.to_string(),
            })
    }

    /// Top-level variables the template reads
    pub fn variables(&self) -> Result<BTreeSet<String>> {
        let env = environment();
        let compiled = env
            .template_from_str(&self.source)
            .map_err(|e| self.parse_error(&e))?;
        Ok(compiled.undeclared_variables(false).into_iter().collect())
    }

    fn parse_error(&self, e: &minijinja::Error) -> PromptError {
        PromptError::TemplateParseFailed {
            name: self.name.clone(),
            detail: e.to_string(),
        }
    }
}

fn environment<'source>() -> Environment<'source> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_placeholders() {
        let template = PromptTemplate::new(
            "news",
            "Take {{ ticker }} and always include {{ reference_asset }}. The current date is {{ current_date }}.",
        )
        .unwrap();

        let text = template
            .render(&json!({
                "ticker": "AAPL",
                "reference_asset": "BTC",
                "current_date": "2024-08-08",
            }))
            .unwrap();

        assert_eq!(
            text,
            "Take AAPL and always include BTC. The current date is 2024-08-08."
        );
    }

    #[test]
    fn test_invalid_syntax_rejected_at_construction() {
        let err = PromptTemplate::new("broken", "{{ unclosed").unwrap_err();
        assert!(matches!(err, PromptError::TemplateParseFailed { name, .. } if name == "broken"));
    }

    #[test]
    fn test_missing_variable_is_an_error() {
        let template = PromptTemplate::new("goal", "Analyze {{ ticker }}").unwrap();
        let err = template.render(&json!({})).unwrap_err();
        assert!(matches!(err, PromptError::RenderError { .. }));
    }

    #[test]
    fn test_plain_text_needs_no_variables() {
        let template = PromptTemplate::new("backstory", "You're highly experienced.").unwrap();
        assert_eq!(
            template.render(&json!({})).unwrap(),
            "You're highly experienced."
        );
        assert!(template.variables().unwrap().is_empty());
    }

    #[test]
    fn test_variables() {
        let template =
            PromptTemplate::new("t", "{{ ticker }} on {{ current_date }} vs {{ ticker }}").unwrap();
        let vars: Vec<String> = template.variables().unwrap().into_iter().collect();
        assert_eq!(vars, vec!["current_date".to_string(), "ticker".to_string()]);
    }

    #[test]
    fn test_into_core_error() {
        let err = PromptTemplate::new("goal", "{{ ticker }}")
            .unwrap()
            .render(&json!({}))
            .unwrap_err();
        let core: crew_core::Error = err.into();
        assert!(matches!(core, crew_core::Error::Configuration(_)));
    }
}
