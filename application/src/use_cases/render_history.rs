//! Render History use case.
//!
//! The UI keeps no turn store of its own, so every page load replays the
//! full history of the session.

use crate::ports::llm_gateway::LlmSession;
use parley_domain::Turn;
use serde::Serialize;

/// A turn ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedTurn {
    /// UI role: `"user"` or `"assistant"`
    pub role: &'static str,
    pub text: String,
}

impl From<Turn> for RenderedTurn {
    fn from(turn: Turn) -> Self {
        Self {
            role: turn.role().ui_label(),
            text: turn.text().to_string(),
        }
    }
}

/// Replay the session's history, oldest first.
///
/// The sequence is lazy and bounded by the history length at call time;
/// calling again replays everything from the start.
pub fn render_history(session: &dyn LlmSession) -> impl Iterator<Item = RenderedTurn> + use<> {
    session.history().into_turns().into_iter().map(RenderedTurn::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{Scripted, ScriptedSession};

    #[test]
    fn fresh_session_renders_nothing() {
        let session = ScriptedSession::new(vec![]);
        assert_eq!(render_history(&session).count(), 0);
    }

    #[tokio::test]
    async fn replays_turns_with_ui_roles() {
        let session = ScriptedSession::new(vec![
            Scripted::Reply(vec!["Hi", " there!"]),
            Scripted::Reply(vec!["Fine."]),
        ]);
        session.send("Hello").await.unwrap();
        session.send("How are you?").await.unwrap();

        let rendered: Vec<RenderedTurn> = render_history(&session).collect();
        let expected = vec![
            RenderedTurn { role: "user", text: "Hello".into() },
            RenderedTurn { role: "assistant", text: "Hi there!".into() },
            RenderedTurn { role: "user", text: "How are you?".into() },
            RenderedTurn { role: "assistant", text: "Fine.".into() },
        ];
        assert_eq!(rendered, expected);
    }

    #[tokio::test]
    async fn rendering_is_repeatable() {
        let session = ScriptedSession::new(vec![Scripted::Reply(vec!["Hi"])]);
        session.send("Hello").await.unwrap();

        let first: Vec<_> = render_history(&session).collect();
        let second: Vec<_> = render_history(&session).collect();
        assert_eq!(first, second);
    }
}
