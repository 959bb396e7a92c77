use crate::models::Citation;
use std::fmt::Write;

/// One rendered entry in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub text: String,
    pub is_user: bool,
    pub citations: Vec<Citation>,
}

/// Ordered, append-only record of the conversation. Messages are never
/// mutated or removed within a session.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> &Message {
        self.push(text.into(), true, Vec::new())
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> &Message {
        self.push(text.into(), false, Vec::new())
    }

    pub fn push_bot_with_citations(
        &mut self,
        text: impl Into<String>,
        citations: Vec<Citation>,
    ) -> &Message {
        self.push(text.into(), false, citations)
    }

    fn push(&mut self, text: String, is_user: bool, citations: Vec<Citation>) -> &Message {
        self.messages.push(Message {
            text,
            is_user,
            citations,
        });
        self.messages.last().unwrap()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Formats the sources block for a bot message: one line per citation,
/// `[index] source snippet`, in the order given. Returns `None` when
/// there is nothing to cite.
pub fn format_sources(citations: &[Citation]) -> Option<String> {
    if citations.is_empty() {
        return None;
    }

    let mut block = String::from("Sources:\n");
    for citation in citations {
        let _ = writeln!(
            block,
            "  [{}] {} {}",
            citation.index, citation.source, citation.snippet
        );
    }
    Some(block)
}
