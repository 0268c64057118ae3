use clap::ValueEnum;
use crate::prompts::code_generation_prompt::CODE_GENERATION_SYSTEM_PROMPT;
use crate::prompts::idea_screening_prompt::IDEA_SCREENING_SYSTEM_PROMPT;
use crate::prompts::project_chat_prompt::PROJECT_CHAT_SYSTEM_PROMPT;

/// The three places the web app streams completions from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChatPurpose {
    IdeaScreening,
    CodeGeneration,
    ProjectChat,
}

impl ChatPurpose {
    pub fn system_prompt(&self) -> &'static str {
        match self {
            ChatPurpose::IdeaScreening => IDEA_SCREENING_SYSTEM_PROMPT,
            ChatPurpose::CodeGeneration => CODE_GENERATION_SYSTEM_PROMPT,
            ChatPurpose::ProjectChat => PROJECT_CHAT_SYSTEM_PROMPT,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChatPurpose::IdeaScreening => "idea screening",
            ChatPurpose::CodeGeneration => "code generation",
            ChatPurpose::ProjectChat => "project chat",
        }
    }
}
