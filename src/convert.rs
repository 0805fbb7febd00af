//! Reshaping of sequence responses into keyed collections
//!
//! Felix returns lists of records that each carry a key field (`id` for most
//! records, `name` for permissions). These helpers turn such lists into ordered
//! maps from key to record, keeping response order.

use serde_json::Value;

use crate::api::client::ClientError;
use crate::models::Collection;

/// Guild substructures keyed by `id` inside a mutual guild
const KEYED_GUILD_FIELDS: &[&str] = &["channels", "roles", "members"];

/// Key each record by its `field`, leaving the records themselves unchanged
pub fn key_by(records: Vec<Value>, field: &str) -> Result<Collection, ClientError> {
    collect_keyed(records, field, Ok)
}

/// Key each record by its `field` and store `project(record)` under that key.
///
/// A repeated key overwrites the earlier value but keeps its position.
pub fn collect_keyed<F>(
    records: Vec<Value>,
    field: &str,
    mut project: F,
) -> Result<Collection, ClientError>
where
    F: FnMut(Value) -> Result<Value, ClientError>,
{
    let mut collection = Collection::new();
    for (index, record) in records.into_iter().enumerate() {
        let key = key_of(&record, field, index)?;
        collection.insert(key, project(record)?);
    }
    Ok(collection)
}

fn key_of(record: &Value, field: &str, index: usize) -> Result<String, ClientError> {
    match record.get(field) {
        Some(Value::String(key)) => Ok(key.clone()),
        Some(Value::Number(key)) => Ok(key.to_string()),
        _ => Err(ClientError::Conversion(format!(
            "element {} has no string or numeric `{}`",
            index, field
        ))),
    }
}

/// Reshape a single user record's `mutualGuilds` into an id-keyed collection
/// of converted guilds. Users without a `mutualGuilds` list pass through.
pub fn convert_user(user: Value) -> Result<Value, ClientError> {
    let mut user = match user {
        Value::Object(user) => user,
        other => return Ok(other),
    };

    if let Some(Value::Array(guilds)) = user.get_mut("mutualGuilds") {
        let guilds = std::mem::take(guilds);
        let keyed = collect_keyed(guilds, "id", convert_mutual_guild)?;
        user.insert("mutualGuilds".to_string(), Value::Object(keyed));
    }

    Ok(Value::Object(user))
}

/// Key a mutual guild's channels, roles and members by id, and turn its
/// `userPermissions` into `name -> allowed`.
pub fn convert_mutual_guild(guild: Value) -> Result<Value, ClientError> {
    let mut guild = match guild {
        Value::Object(guild) => guild,
        other => return Ok(other),
    };

    for field in KEYED_GUILD_FIELDS {
        if let Some(Value::Array(items)) = guild.get_mut(*field) {
            let items = std::mem::take(items);
            let keyed = key_by(items, "id")?;
            guild.insert(field.to_string(), Value::Object(keyed));
        }
    }

    if let Some(Value::Array(permissions)) = guild.get_mut("userPermissions") {
        let permissions = std::mem::take(permissions);
        let keyed = collect_keyed(permissions, "name", allowed_flag)?;
        guild.insert("userPermissions".to_string(), Value::Object(keyed));
    }

    Ok(Value::Object(guild))
}

fn allowed_flag(permission: Value) -> Result<Value, ClientError> {
    match permission.get("allowed") {
        Some(Value::Bool(allowed)) => Ok(Value::Bool(*allowed)),
        _ => Err(ClientError::Conversion(format!(
            "permission {} has no boolean `allowed`",
            permission.get("name").unwrap_or(&Value::Null)
        ))),
    }
}
