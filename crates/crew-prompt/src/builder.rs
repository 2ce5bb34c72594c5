//! Line-oriented prompt builder

/// Assembles a prompt from lines, labeled fields and optional blocks
///
/// ```
/// use crew_prompt::PromptBuilder;
///
/// let prompt = PromptBuilder::new()
///     .line("Current Task: analyze AAPL")
///     .blank_line()
///     .labeled("Expected output", "up, down or sideways")
///     .when_some("Context", None::<&str>)
///     .build();
///
/// assert_eq!(prompt, "Current Task: analyze AAPL\n\nExpected output: up, down or sideways");
/// ```
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    lines: Vec<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, content: impl Into<String>) -> Self {
        self.lines.push(content.into());
        self
    }

    pub fn blank_line(self) -> Self {
        self.line("")
    }

    /// `Label: value`
    pub fn labeled(self, label: &str, value: impl AsRef<str>) -> Self {
        self.line(format!("{label}: {}", value.as_ref()))
    }

    /// A labeled multi-line block, skipped when `value` is `None`
    pub fn when_some(self, label: &str, value: Option<impl AsRef<str>>) -> Self {
        match value {
            Some(value) => self
                .blank_line()
                .line(format!("{label}:"))
                .line(value.as_ref().trim()),
            None => self,
        }
    }

    /// Join lines, trimming surrounding whitespace
    pub fn build(self) -> String {
        self.lines.join("\n").trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_block() {
        let prompt = PromptBuilder::new()
            .line("Write the newsletter")
            .when_some("Context", Some("  trend: up\nscore: 70  "))
            .build();

        assert_eq!(prompt, "Write the newsletter\n\nContext:\ntrend: up\nscore: 70");
    }

    #[test]
    fn test_blank_lines_trimmed() {
        assert_eq!(PromptBuilder::new().blank_line().build(), "");
    }
}
