// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Accepts the compose command as either a string or a list of words.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CommandEntry {
    Simple(String),
    Words(Vec<String>),
}

impl CommandEntry {
    fn into_words(self) -> Result<Vec<String>, String> {
        let words: Vec<String> = match self {
            CommandEntry::Simple(s) => s.split_whitespace().map(str::to_string).collect(),
            CommandEntry::Words(words) => words
                .into_iter()
                .map(|w| w.trim().to_string())
                .filter(|w| !w.is_empty())
                .collect(),
        };

        if words.is_empty() {
            return Err("compose command cannot be empty".to_string());
        }
        Ok(words)
    }
}

pub fn deserialize_command<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    CommandEntry::deserialize(deserializer)?
        .into_words()
        .map_err(serde::de::Error::custom)
}
