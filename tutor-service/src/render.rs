//! View models handed to the chat front-end.
//!
//! Markdown itself is rendered client-side. This module only extracts code
//! spans and decides which ones get the block treatment, so every front-end
//! shows code the same way.

use chrono::{DateTime, Local, Utc};
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use serde::Serialize;

use crate::models::{ChatTurn, Sender};

/// Label for fenced blocks that carry no language tag.
pub const DEFAULT_CODE_LANGUAGE: &str = "python";

const LANGUAGE_PREFIX: &str = "language-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeKind {
    Fenced,
    Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSpan {
    pub kind: CodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub content: String,
}

impl CodeSpan {
    /// Classify a code element by its class attribute and content.
    pub fn new(class_name: Option<&str>, content: impl Into<String>) -> Self {
        let content = content.into();
        let tag = class_name.and_then(language_tag);
        match classify(class_name, &content) {
            CodeKind::Fenced => Self {
                kind: CodeKind::Fenced,
                language: Some(tag.unwrap_or(DEFAULT_CODE_LANGUAGE).to_string()),
                content,
            },
            CodeKind::Inline => Self {
                kind: CodeKind::Inline,
                language: None,
                content,
            },
        }
    }
}

/// Fenced when tagged `language-<word>` or spanning several lines; inline otherwise.
pub fn classify(class_name: Option<&str>, content: &str) -> CodeKind {
    if class_name.and_then(language_tag).is_some() || content.contains('\n') {
        CodeKind::Fenced
    } else {
        CodeKind::Inline
    }
}

/// The `<word>` of the first `language-<word>` in a class attribute.
fn language_tag(class_name: &str) -> Option<&str> {
    let start = class_name.find(LANGUAGE_PREFIX)? + LANGUAGE_PREFIX.len();
    let rest = &class_name[start..];
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Extract every code span from `markdown`, in document order.
pub fn code_spans(markdown: &str) -> Vec<CodeSpan> {
    let mut spans = Vec::new();
    let mut block: Option<(Option<String>, String)> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let class_name = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split_whitespace()
                        .next()
                        .map(|lang| format!("{}{}", LANGUAGE_PREFIX, lang)),
                    CodeBlockKind::Indented => None,
                };
                block = Some((class_name, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, body)) = block.as_mut() {
                    body.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((class_name, body)) = block.take() {
                    spans.push(CodeSpan::new(class_name.as_deref(), body));
                }
            }
            Event::Code(code) => spans.push(CodeSpan::new(None, code.into_string())),
            _ => {}
        }
    }

    spans
}

/// Clock label shown under each bubble.
pub fn time_label(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M").to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct TurnView {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub time_label: String,
    pub code_spans: Vec<CodeSpan>,
}

impl From<&ChatTurn> for TurnView {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            id: turn.id().to_string(),
            sender: turn.sender(),
            text: turn.text().to_string(),
            created_at: turn.created_at(),
            time_label: time_label(turn.created_at()),
            code_spans: code_spans(turn.text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_class_makes_block() {
        assert_eq!(classify(Some("language-python"), "x = 1"), CodeKind::Fenced);
        assert_eq!(classify(Some("hljs language-js extra"), "x"), CodeKind::Fenced);
    }

    #[test]
    fn newline_makes_block() {
        assert_eq!(classify(None, "a = 1\nb = 2"), CodeKind::Fenced);
    }

    #[test]
    fn plain_single_line_is_inline() {
        assert_eq!(classify(None, "len()"), CodeKind::Inline);
        assert_eq!(classify(Some("language-"), "len()"), CodeKind::Inline);
        assert_eq!(classify(Some("highlight"), "len()"), CodeKind::Inline);
    }

    #[test]
    fn extracts_fenced_and_inline_in_order() {
        let text = "Use `append()` to add:\n\n```python\nfruits = []\nfruits.append(\"apple\")\n```\n\nThen `len(fruits)`.";
        let spans = code_spans(text);

        assert_eq!(spans.len(), 3);
        assert_eq!(spans[0], CodeSpan::new(None, "append()"));
        assert_eq!(spans[0].kind, CodeKind::Inline);
        assert_eq!(spans[1].kind, CodeKind::Fenced);
        assert_eq!(spans[1].language.as_deref(), Some("python"));
        assert_eq!(spans[1].content, "fruits = []\nfruits.append(\"apple\")\n");
        assert_eq!(spans[2].content, "len(fruits)");
    }

    #[test]
    fn untagged_fence_defaults_to_python() {
        let spans = code_spans("```\nprint(1)\n```");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, CodeKind::Fenced);
        assert_eq!(spans[0].language.as_deref(), Some(DEFAULT_CODE_LANGUAGE));
    }

    #[test]
    fn tagged_fence_keeps_its_language() {
        let spans = code_spans("~~~bash\nls\n~~~\n");
        assert_eq!(spans[0].language.as_deref(), Some("bash"));
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        let spans = code_spans("```python\nx = 1\ny = 2");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, CodeKind::Fenced);
        assert_eq!(spans[0].content.trim_end(), "x = 1\ny = 2");
    }

    #[test]
    fn fence_nested_in_list_item_is_a_block() {
        let text = "1. Create it:\n\n    ```python\n    a = [1]\n    b = 2\n    ```\n";
        let spans = code_spans(text);

        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, CodeKind::Fenced);
        assert_eq!(spans[0].language.as_deref(), Some("python"));
        assert_eq!(spans[0].content, "a = [1]\nb = 2\n");
    }

    #[test]
    fn indented_block_is_fenced_without_tag() {
        let spans = code_spans("Example:\n\n    x = 1\n    y = 2\n");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, CodeKind::Fenced);
        assert_eq!(spans[0].language.as_deref(), Some(DEFAULT_CODE_LANGUAGE));
    }

    #[test]
    fn double_backtick_span_may_contain_backtick() {
        let spans = code_spans("Write `` a`b `` here");
        assert_eq!(spans, vec![CodeSpan::new(None, "a`b")]);
    }

    #[test]
    fn unmatched_backtick_is_literal() {
        assert!(code_spans("it`s fine").is_empty());
    }

    #[test]
    fn inline_span_across_lines_stays_inline() {
        let spans = code_spans("call `np.array(\n[1, 2])` now");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].kind, CodeKind::Inline);
        assert_eq!(spans[0].content, "np.array( [1, 2])");
    }

    #[test]
    fn time_label_is_hours_and_minutes() {
        let label = time_label(Utc::now());
        assert_eq!(label.len(), 5);
        assert_eq!(label.as_bytes()[2], b':');
    }

    #[test]
    fn turn_view_carries_spans() {
        let turn = ChatTurn::assistant("Use `tuple()`.");
        let view = TurnView::from(&turn);
        assert_eq!(view.id, turn.id());
        assert_eq!(view.sender, Sender::Assistant);
        assert_eq!(view.code_spans, vec![CodeSpan::new(None, "tuple()")]);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["sender"], "model");
        assert_eq!(json["code_spans"][0]["kind"], "inline");
        assert!(json["code_spans"][0].get("language").is_none());
    }
}
