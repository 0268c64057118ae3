use serde::{Deserialize, Serialize};

/// One `data:` payload of an OpenAI-compatible completion stream.
/// Every field is optional so that role, usage, and finish-only chunks still parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatStreamChunk {
    #[serde(default)]
    pub choices: Vec<ChatStreamChoice>,

    #[serde(default)]
    pub error: Option<ChatStreamError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatStreamChoice {
    #[serde(default)]
    pub delta: Option<ChatDelta>,

    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatDelta {
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatStreamError {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default, rename = "type")]
    pub error_type: Option<String>,
}

impl ChatStreamChunk {
    /// Text of `choices[0].delta.content`, if present and non-empty.
    pub fn delta_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.as_ref())
            .and_then(|delta| delta.content.as_deref())
            .filter(|content| !content.is_empty())
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_deref())
    }
}
