use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Remote identifier of a game.
pub type GameId = u64;

/// Remote identifier of an AI entity.
pub type EntityId = u64;

/// A game hosted on Saiblo. Externally owned, looked up by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
}

/// The account behind the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

/// An AI registered by a user for one game.
///
/// `language` is kept as the raw tag so entities created with tags this
/// client does not know about still compare correctly. A missing or `null`
/// `language` or `repo` reads as empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub repo: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Language tag of an AI's source archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "python_zip")]
    PythonZip,
    #[serde(rename = "cpp_zip")]
    CppZip,
    /// Let the judge detect the language from the archive.
    #[serde(rename = "auto")]
    Auto,
}

impl Language {
    /// Every supported tag, in CLI help order.
    pub const ALL: [Self; 3] = [Self::PythonZip, Self::CppZip, Self::Auto];

    /// Wire tag for this language.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PythonZip => "python_zip",
            Self::CppZip => "cpp_zip",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing a language tag this client does not support.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language tag: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str() == s)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}
