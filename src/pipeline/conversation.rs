//! Maps labeled rows onto chat-format conversations.

use crate::pipeline::dataset::LabeledExample;
use crate::services::chat::ChatMessage;
use serde::{Deserialize, Serialize};

/// Instruction given to the model in every conversation, training and inference alike
pub const SYSTEM_MESSAGE: &str = "You are an expert in Science Technology Engineering and Mathematics. \
Classify abstracts as \"applied\" and \"basic\" research. An abstract should be applied when the \
research directly applies to an industrial or business application in the real-world context. \
Basic research is experimental, empirical or theoretical work undertaken primarily to acquire new \
knowledge or method or technique or test. If a new method or technique or knowledge or test is \
provided, it is basic. It is about understanding underlying mechanisms, phenomena and properties \
without immediate industrial or business application. If the abstract has a mix of applied and \
basic, it should be regarded as applied. Based on this principle, classify the following abstracts.";

/// One JSONL line of a fine-tuning dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    pub messages: Vec<ChatMessage>,
}

/// `Abstract: <text>\n\nClass: ` with the text inserted verbatim
pub fn user_message(abstract_text: &str) -> String {
    format!("Abstract: {abstract_text}\n\nClass: ")
}

#[derive(Debug, Clone)]
pub struct ConversationFormatter {
    system_prompt: String,
}

impl Default for ConversationFormatter {
    fn default() -> Self {
        Self::new(SYSTEM_MESSAGE)
    }
}

impl ConversationFormatter {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// System, user, then the label as the assistant reply
    pub fn training_record(&self, example: &LabeledExample) -> ConversationRecord {
        ConversationRecord {
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(user_message(&example.abstract_text)),
                ChatMessage::assistant(example.label.as_str()),
            ],
        }
    }

    /// System and user only; the model supplies the reply
    pub fn inference_record(&self, abstract_text: &str) -> ConversationRecord {
        ConversationRecord {
            messages: vec![
                ChatMessage::system(self.system_prompt.as_str()),
                ChatMessage::user(user_message(abstract_text)),
            ],
        }
    }

    pub fn training_records(&self, examples: &[LabeledExample]) -> Vec<ConversationRecord> {
        examples.iter().map(|e| self.training_record(e)).collect()
    }
}
