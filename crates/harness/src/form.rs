//! HTML form generation for declared parameters
//!
//! Fragments are bare markup intended for embedding into a host page.
//! Class names (`behat-form-element`, `behat-has-default-value`,
//! `behat-form-description`) and the element nesting are a contract with
//! the consuming UI.

use std::collections::HashMap;

use crate::params::{parse_params, ParamDescriptor};

/// Renders one parameter's metadata into an HTML form fragment.
pub trait ParamRenderer {
    fn render(&self, param: &ParamDescriptor) -> String;
}

/// Single-line text input. Fallback for unknown type tags.
pub struct TextInputRenderer;

impl ParamRenderer for TextInputRenderer {
    fn render(&self, param: &ParamDescriptor) -> String {
        let value = param
            .default
            .as_deref()
            .map(|d| format!(r#" value="{}""#, escape(d)))
            .unwrap_or_default();
        let control = format!(
            r#"<input type="text" id="{key}" name="{key}" class="{kind}"{value}/>"#,
            key = escape(&param.key),
            kind = escape(&param.kind),
        );
        wrap(param, &control)
    }
}

/// Binary select with fixed `yes`/`no` options.
pub struct YesNoRenderer;

impl ParamRenderer for YesNoRenderer {
    fn render(&self, param: &ParamDescriptor) -> String {
        let mut options = String::new();
        for choice in ["yes", "no"] {
            let selected = if param.default.as_deref() == Some(choice) {
                r#" selected="selected""#
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{choice}"{selected}>{choice}</option>"#
            ));
        }
        let control = format!(
            r#"<select id="{key}" name="{key}" class="{kind}">{options}</select>"#,
            key = escape(&param.key),
            kind = escape(&param.kind),
        );
        wrap(param, &control)
    }
}

/// Shared wrapper carrying the class contract.
fn wrap(param: &ParamDescriptor, control: &str) -> String {
    let mut classes = String::from("behat-form-element");
    if param.default.is_some() {
        classes.push_str(" behat-has-default-value");
    }
    let description = param
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(|d| format!(r#"<div class="behat-form-description">{}</div>"#, escape(d)))
        .unwrap_or_default();
    format!(
        r#"<div class="{classes}"><label for="{key}">{label}</label>{control}{description}</div>"#,
        key = escape(&param.key),
        label = escape(&param.label),
    )
}

/// Minimal escaping for text and double-quoted attribute positions.
fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Maps type tags to renderers; unknown tags fall back to a text input.
pub struct RendererRegistry {
    renderers: HashMap<String, Box<dyn ParamRenderer + Send + Sync>>,
    fallback: Box<dyn ParamRenderer + Send + Sync>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        let mut renderers: HashMap<String, Box<dyn ParamRenderer + Send + Sync>> = HashMap::new();
        renderers.insert("yesno".to_string(), Box::new(YesNoRenderer));
        Self {
            renderers,
            fallback: Box::new(TextInputRenderer),
        }
    }

    /// Register a renderer for a type tag, replacing any existing one.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        renderer: Box<dyn ParamRenderer + Send + Sync>,
    ) {
        self.renderers.insert(kind.into(), renderer);
    }

    pub fn create(&self, kind: &str) -> &(dyn ParamRenderer + Send + Sync) {
        match self.renderers.get(kind) {
            Some(renderer) => renderer.as_ref(),
            None => self.fallback.as_ref(),
        }
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses parameters out of feature text and renders the complete form
/// fragment, one element per declared parameter.
pub struct FormGenerator {
    registry: RendererRegistry,
}

impl FormGenerator {
    pub fn new() -> Self {
        Self {
            registry: RendererRegistry::new(),
        }
    }

    pub fn with_registry(registry: RendererRegistry) -> Self {
        Self { registry }
    }

    pub fn generate(&self, text: &str) -> String {
        parse_params(text)
            .values()
            .map(|param| self.registry.create(&param.kind).render(param))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for FormGenerator {
    fn default() -> Self {
        Self::new()
    }
}
