pub mod code_generation_prompt;
pub mod idea_screening_prompt;
pub mod project_chat_prompt;
