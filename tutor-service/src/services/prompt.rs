//! Prompt construction for tutor completions.
//!
//! The whole exchange is flattened into one user-role prompt: course notes,
//! a transcript of recent turns, then a `Tutor:` cue for the model to continue.

use crate::models::ChatTurn;

/// Maximum number of prior turns replayed into a prompt.
pub const HISTORY_WINDOW: usize = 10;

pub const CONVERSATION_HEADER: &str = "Current Conversation:";

/// Persona and formatting rules sent as the system instruction.
pub const SYSTEM_INSTRUCTION: &str = "\
You are a strict but helpful Python tutor for Dr. Ahmed Alia's CAP course.

GUIDELINES:
1. Answer ONLY based on the provided curriculum content.
2. Use Markdown formatting extensively to make the output clean and readable.
   - Use **bold** for key concepts.
   - Use `inline code` for variable names or short snippets.
   - Use fenced code blocks (```python ... ```) for examples.
3. When writing code examples, include comments to explain lines, preferably in the same language as the user's question (e.g., Arabic comments if the user asks in Arabic).
4. If the topic is outside the provided notes, politely decline.
5. Keep explanations concise and structured.";

/// Everything needed for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_instruction: String,
    /// Prior turns that made it into the prompt, oldest first.
    pub context_window: Vec<ChatTurn>,
    pub user_utterance: String,
    /// Rendered user-role prompt text.
    pub prompt: String,
}

/// Build the completion request for `new_utterance`.
///
/// `prior_turns` must not already contain the new utterance.
pub fn build(curriculum: &str, prior_turns: &[ChatTurn], new_utterance: &str) -> CompletionRequest {
    let start = prior_turns.len().saturating_sub(HISTORY_WINDOW);
    let context_window = prior_turns[start..].to_vec();

    let mut prompt = String::with_capacity(curriculum.len() + 256);
    prompt.push_str(curriculum.trim_end());
    prompt.push_str("\n\n");
    prompt.push_str(CONVERSATION_HEADER);
    prompt.push('\n');
    prompt.push_str(&render_history(&context_window));
    prompt.push_str(&format!("Student: {}\nTutor:", new_utterance));

    CompletionRequest {
        system_instruction: SYSTEM_INSTRUCTION.to_string(),
        context_window,
        user_utterance: new_utterance.to_string(),
        prompt,
    }
}

/// One `Role: text` line per turn, each newline-terminated.
pub fn render_history(turns: &[ChatTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}\n", turn.sender().prompt_role(), turn.text()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternating(n: usize) -> Vec<ChatTurn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    ChatTurn::user(format!("q{}", i))
                } else {
                    ChatTurn::assistant(format!("a{}", i))
                }
            })
            .collect()
    }

    #[test]
    fn empty_history_ends_with_tutor_cue() {
        let request = build("NOTES", &[], "What is a list?");

        assert!(request.prompt.ends_with("Student: What is a list?\nTutor:"));
        assert_eq!(
            request.prompt,
            "NOTES\n\nCurrent Conversation:\nStudent: What is a list?\nTutor:"
        );
        assert!(request.context_window.is_empty());
        assert_eq!(request.user_utterance, "What is a list?");
    }

    #[test]
    fn roles_are_mapped_to_student_and_tutor() {
        let history = vec![ChatTurn::assistant("Hello!"), ChatTurn::user("Hi")];
        let request = build("NOTES", &history, "Explain tuples");

        assert!(request.prompt.contains(
            "Current Conversation:\nTutor: Hello!\nStudent: Hi\nStudent: Explain tuples\nTutor:"
        ));
    }

    #[test]
    fn history_is_windowed_to_most_recent_turns() {
        let history = alternating(15);
        let request = build("NOTES", &history, "next");

        assert_eq!(request.context_window.len(), HISTORY_WINDOW);
        assert_eq!(request.context_window[0].text(), "a5");
        assert_eq!(request.context_window[9].text(), "q14");
        assert!(!request.prompt.contains("q4\n"));
        assert!(request.prompt.contains("Tutor: a5\nStudent: q6\n"));
    }

    #[test]
    fn short_history_is_kept_whole() {
        let history = alternating(3);
        let request = build("NOTES", &history, "next");
        assert_eq!(request.context_window, history);
    }

    #[test]
    fn curriculum_precedes_conversation() {
        let request = build("# Chapter 2\nLoops\n\n", &[], "q");
        assert!(request.prompt.starts_with("# Chapter 2\nLoops\n\nCurrent Conversation:\n"));
    }

    #[test]
    fn system_instruction_is_fixed() {
        let a = build("A", &alternating(2), "x");
        let b = build("B", &[], "y");
        assert_eq!(a.system_instruction, b.system_instruction);
        assert!(a.system_instruction.contains("politely decline"));
    }

    #[test]
    fn render_history_is_line_per_turn() {
        let rendered = render_history(&alternating(2));
        assert_eq!(rendered, "Student: q0\nTutor: a1\n");
    }
}
