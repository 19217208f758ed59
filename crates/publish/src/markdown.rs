//! Markdown progress report builder.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use pullsmith_core::publish::PublishService;

/// Accumulates a nested markdown progress report as the attempt runs.
///
/// Sections become headings whose level follows nesting depth; closing a
/// section appends its final title as a status line (the closing title
/// usually carries a marker the opening one did not). The pull request
/// title and body are kept aside for whoever opens the PR.
pub struct MarkdownPublisher {
    state: Mutex<ReportState>,
}

#[derive(Default)]
struct ReportState {
    lines: Vec<String>,
    depth: usize,
    pr_title: Option<String>,
    pr_body: Option<String>,
}

impl MarkdownPublisher {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ReportState::default()),
        }
    }

    /// Render the accumulated report.
    pub async fn render(&self) -> String {
        self.state.lock().await.lines.join("\n")
    }

    /// The stored pull request description, if one was set.
    pub async fn pr_description(&self) -> Option<(String, String)> {
        let state = self.state.lock().await;
        match (&state.pr_title, &state.pr_body) {
            (Some(title), Some(body)) => Some((title.clone(), body.clone())),
            _ => None,
        }
    }
}

impl Default for MarkdownPublisher {
    fn default() -> Self {
        Self::new()
    }
}

fn heading(depth: usize, title: &str) -> String {
    // Top-level sections render as H3 so the report nests under a PR comment.
    let level = (3 + depth).min(6);
    format!("{} {}", "#".repeat(level), title)
}

#[async_trait]
impl PublishService for MarkdownPublisher {
    async fn start_section(&self, title: &str) {
        let mut state = self.state.lock().await;
        let line = heading(state.depth, title);
        state.lines.push(line);
        state.depth += 1;
    }

    async fn end_section(&self, title: &str) {
        let mut state = self.state.lock().await;
        state.depth = state.depth.saturating_sub(1);
        state.lines.push(title.to_string());
    }

    async fn publish_code_block(&self, heading: &str, code: &str, language: &str) {
        let mut state = self.state.lock().await;
        state.lines.push(format!("**{heading}**"));
        state.lines.push(format!("```{language}"));
        state.lines.push(code.trim_end().to_string());
        state.lines.push("```".to_string());
    }

    async fn set_pr_description(&self, title: &str, body: &str) {
        debug!(title, "Setting pull request description");
        let mut state = self.state.lock().await;
        state.pr_title = Some(title.to_string());
        state.pr_body = Some(body.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sections_nest_and_close_with_status_lines() {
        let publisher = MarkdownPublisher::new();

        publisher.start_section("🔨 Writing commit Add foo.py").await;
        publisher
            .publish_code_block("Diff", "+fn foo() {}\n", "diff")
            .await;
        publisher.end_section("✅ Committed Add foo.py").await;

        let report = publisher.render().await;
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "### 🔨 Writing commit Add foo.py");
        assert_eq!(lines[1], "**Diff**");
        assert_eq!(lines[2], "```diff");
        assert_eq!(lines[3], "+fn foo() {}");
        assert_eq!(lines[4], "```");
        assert_eq!(lines[5], "✅ Committed Add foo.py");
    }

    #[tokio::test]
    async fn nested_sections_deepen_headings() {
        let publisher = MarkdownPublisher::new();

        publisher.start_section("Outer").await;
        publisher.start_section("Inner").await;
        publisher.end_section("Inner done").await;
        publisher.end_section("Outer done").await;

        let report = publisher.render().await;
        assert!(report.contains("### Outer"));
        assert!(report.contains("#### Inner"));
    }

    #[tokio::test]
    async fn pr_description_stored_separately_from_report() {
        let publisher = MarkdownPublisher::new();
        publisher.set_pr_description("Fix the bug", "Closes #42").await;

        assert_eq!(
            publisher.pr_description().await,
            Some(("Fix the bug".to_string(), "Closes #42".to_string()))
        );
        assert!(publisher.render().await.is_empty());
    }
}
