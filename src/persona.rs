//! Persona parameters sent to the avatar provider.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PERSONA_NAME: &str = "Alex";
pub const DEFAULT_AVATAR_ID: &str = "30fa96d0-26c4-4e55-94a0-517025942e18";
pub const DEFAULT_VOICE_ID: &str = "6bfbe25a-979d-40f3-a92b-5394170af54b";
pub const DEFAULT_LLM_ID: &str = "0934d97d-0c3a-4f33-91b0-5e136a0ef466";

/// Fixed identity of the assistant: who it is, how it looks and sounds, which
/// language model drives it. Combined with a system prompt it becomes a
/// [`PersonaConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    pub name: String,
    pub avatar_id: String,
    pub voice_id: String,
    pub llm_id: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: DEFAULT_PERSONA_NAME.to_string(),
            avatar_id: DEFAULT_AVATAR_ID.to_string(),
            voice_id: DEFAULT_VOICE_ID.to_string(),
            llm_id: DEFAULT_LLM_ID.to_string(),
        }
    }
}

impl Persona {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_avatar_id(mut self, id: impl Into<String>) -> Self {
        self.avatar_id = id.into();
        self
    }

    pub fn with_voice_id(mut self, id: impl Into<String>) -> Self {
        self.voice_id = id.into();
        self
    }

    pub fn with_llm_id(mut self, id: impl Into<String>) -> Self {
        self.llm_id = id.into();
        self
    }

    pub fn configure(&self, system_prompt: impl Into<String>) -> PersonaConfig {
        PersonaConfig {
            name: self.name.clone(),
            avatar_id: self.avatar_id.clone(),
            voice_id: self.voice_id.clone(),
            llm_id: self.llm_id.clone(),
            system_prompt: system_prompt.into(),
        }
    }
}

/// Wire shape of `personaConfig` in the session-token request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaConfig {
    pub name: String,
    pub avatar_id: String,
    pub voice_id: String,
    pub llm_id: String,
    pub system_prompt: String,
}
