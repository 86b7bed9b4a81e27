//! Prompt composition.
//!
//! The enriched prompt is laid out most-general to most-specific: persona,
//! then conversation history, then page context, then the question itself,
//! then the assistant cue. Keep that order.

use vynce_core::query::{MemoryItem, PageContext, truncate_chars};

/// Cap on selected text and page content in the enriched prompt.
pub const CONTEXT_EXCERPT_CHARS: usize = 500;

/// Cap on page content in the summarize/analyze templates.
pub const PAGE_REPORT_CHARS: usize = 3000;

/// Bullet count requested by the summarize template.
pub const SUMMARY_BULLETS: usize = 5;

/// Fixed identity, capability list and tone directive.
pub const PERSONA: &str = "\
You are VynceAI, an intelligent AI-powered web assistant and browser extension.

ABOUT VYNCEAI:
- VynceAI is a Chrome browser extension that brings AI capabilities directly into the browser
- It helps users with web tasks, automation, content understanding, and smart web interactions
- VynceAI can read page content, answer questions about websites, and assist with browsing tasks
- The product makes web browsing smarter and more productive with AI assistance

YOUR PERSONALITY:
- You are helpful, knowledgeable, and web-savvy
- You provide concise, accurate responses focused on web and browsing contexts
- You always identify yourself as \"VynceAI\" when asked about your name
- You are enthusiastic about helping users be more productive online

YOUR CAPABILITIES:
- Understand and analyze web page content
- Answer questions about websites and web content
- Help with web-based tasks and automation
- Provide smart suggestions based on page context
- Remember conversation history for context-aware responses

Keep responses concise, relevant, and helpful. Focus on web-related assistance.";

const HISTORY_OPEN: &str = "\n=== Recent Conversation History ===";
const HISTORY_CLOSE: &str = "=== End History ===\n";
const CONTEXT_OPEN: &str = "\n=== Page Context ===";
const CONTEXT_CLOSE: &str = "=== End Context ===\n";
const ASSISTANT_CUE: &str = "\nVynceAI Response:";

/// Build the enriched prompt from the question, optional page context and
/// memory (oldest first).
pub fn build_enriched_prompt(
    prompt: &str,
    context: Option<&PageContext>,
    memory: &[MemoryItem],
) -> String {
    let mut parts: Vec<String> = vec![PERSONA.to_string()];

    if !memory.is_empty() {
        parts.push(HISTORY_OPEN.to_string());
        for item in memory {
            parts.push(format!("User: {}", item.user));
            parts.push(format!("VynceAI: {}", item.bot));
        }
        parts.push(HISTORY_CLOSE.to_string());
    }

    if let Some(context) = context {
        let lines = context_lines(context);
        if !lines.is_empty() {
            parts.push(CONTEXT_OPEN.to_string());
            parts.extend(lines);
            parts.push(CONTEXT_CLOSE.to_string());
        }
    }

    parts.push(format!("\nUser Question: {prompt}"));
    parts.push(ASSISTANT_CUE.to_string());

    parts.join("\n")
}

/// URL, title, then exactly one excerpt: selected text, else snippet,
/// else page content.
fn context_lines(context: &PageContext) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);

    if let Some(url) = context.url() {
        lines.push(format!("Current Page: {url}"));
    }
    if let Some(title) = context.title() {
        lines.push(format!("Page Title: {title}"));
    }

    if let Some(selected) = context.selected_text() {
        lines.push(format!(
            "Selected Text: {}",
            truncate_chars(selected, CONTEXT_EXCERPT_CHARS)
        ));
    } else if let Some(snippet) = context.snippet() {
        lines.push(format!("Page Snippet: {snippet}"));
    } else if let Some(content) = context.page_content() {
        lines.push(format!(
            "Page Content: {}",
            truncate_chars(content, CONTEXT_EXCERPT_CHARS)
        ));
    }

    lines
}

/// The page-level task a report template asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTask {
    Summarize,
    Analyze,
}

impl PageTask {
    pub fn name(self) -> &'static str {
        match self {
            PageTask::Summarize => "summarize",
            PageTask::Analyze => "analyze",
        }
    }

    fn instructions(self) -> String {
        match self {
            PageTask::Summarize => format!(
                "Summarize the following web page in {SUMMARY_BULLETS} concise bullet points. \
Focus on the key information a reader needs and skip navigation or boilerplate."
            ),
            PageTask::Analyze => "Analyze the following web page content and evaluate:\n\
1. Content quality and accuracy\n\
2. Structure and organization\n\
3. Tone and writing style\n\
4. Readability for the intended audience\n\n\
Give concise, actionable observations for each point."
                .to_string(),
        }
    }
}

/// Build a summarize/analyze prompt. `content` is cut to 3000 characters.
pub fn build_page_report_prompt(task: PageTask, context: &PageContext, content: &str) -> String {
    let mut parts = vec![task.instructions(), String::new()];

    if let Some(title) = context.title() {
        parts.push(format!("Page Title: {title}"));
    }
    if let Some(url) = context.url() {
        parts.push(format!("URL: {url}"));
    }

    parts.push(String::new());
    parts.push("Content:".to_string());
    parts.push(truncate_chars(content, PAGE_REPORT_CHARS).to_string());

    parts.join("\n")
}
