//! Data models for the Felix API
//!
//! Records are mostly opaque to this crate: the typed models name the fields the
//! client reshapes and keep everything else in `extra`.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// Ordered mapping from record key to record, in response order
pub type Collection = Map<String, Value>;

/// A user record as stored by Felix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(
        rename = "mutualGuilds",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub mutual_guilds: Option<Vec<GuildSummary>>,
    #[serde(flatten)]
    pub extra: Collection,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            mutual_guilds: None,
            extra: Collection::new(),
        }
    }
}

/// A guild the user shares with the bot, embedded in a user record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildSummary {
    pub id: String,
    #[serde(default)]
    pub channels: Vec<Value>,
    #[serde(default)]
    pub roles: Vec<Value>,
    #[serde(default)]
    pub members: Vec<Value>,
    #[serde(rename = "userPermissions", default)]
    pub user_permissions: Vec<Permission>,
    #[serde(flatten)]
    pub extra: Collection,
}

impl GuildSummary {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            channels: Vec::new(),
            roles: Vec::new(),
            members: Vec::new(),
            user_permissions: Vec::new(),
            extra: Collection::new(),
        }
    }
}

/// Whether the user holds a named permission in a guild
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub name: String,
    pub allowed: bool,
}

/// A top-level guild record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub id: String,
    #[serde(flatten)]
    pub extra: Collection,
}

impl Guild {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            extra: Collection::new(),
        }
    }
}

/// Result of a user or guild lookup
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    /// A single record, reshaped when auto-conversion applies
    Record(Value),
    /// A sequence response keyed by each element's `id`
    Keyed(Collection),
}

impl Fetched {
    pub fn as_record(&self) -> Option<&Value> {
        match self {
            Fetched::Record(value) => Some(value),
            Fetched::Keyed(_) => None,
        }
    }

    pub fn as_keyed(&self) -> Option<&Collection> {
        match self {
            Fetched::Keyed(map) => Some(map),
            Fetched::Record(_) => None,
        }
    }

    /// Collapse into a JSON value; keyed results become an object
    pub fn into_value(self) -> Value {
        match self {
            Fetched::Record(value) => value,
            Fetched::Keyed(map) => Value::Object(map),
        }
    }

    /// Decode into a caller-chosen type, e.g. [`User`] when conversion is off
    pub fn deserialize<T: DeserializeOwned>(self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.into_value())
    }
}
