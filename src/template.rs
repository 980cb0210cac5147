//! Prompt templating
//!
//! A template carries the shared prompt text with an `{input}` placeholder
//! that each task's key is substituted into. Rendering is pure string
//! replacement; prompt semantics are the remote service's concern.

use crate::error::Result;
use std::path::Path;

/// Placeholder replaced with the task key at render time
const PLACEHOLDER: &str = "{input}";

/// A prompt template with an `{input}` placeholder
///
/// Both `{input}` and `{INPUT}` are substituted. A template without a
/// placeholder is accepted (the same prompt runs for every input) but is
/// flagged with a warning at construction.
#[derive(Clone, Debug)]
pub struct PromptTemplate {
    template: String,
    has_placeholder: bool,
}

impl PromptTemplate {
    /// Create a template from a string
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let has_placeholder = template.to_lowercase().contains(PLACEHOLDER);

        if !has_placeholder {
            tracing::warn!(
                "prompt template has no {{input}} placeholder, the same prompt will run for all inputs"
            );
        }

        Self {
            template,
            has_placeholder,
        }
    }

    /// Load a template from a file, trimming surrounding whitespace
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Ok(Self::new(text.trim()))
    }

    /// Render the template for one input value
    pub fn render(&self, input: &str) -> String {
        self.template
            .replace(PLACEHOLDER, input)
            .replace("{INPUT}", input)
    }

    /// Whether the template contains an `{input}` placeholder (any case)
    pub fn has_placeholder(&self) -> bool {
        self.has_placeholder
    }
}
