//! Session and user records.

use aula_core::serde::deserialize_id;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The signed-in user as returned by the login endpoint.
///
/// Fields the client does not model are kept in `extra` so a shallow
/// merge never loses data the server sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Shallow-merges the members of `patch` into this user.
    ///
    /// Non-object patches are ignored. Returns the merged user, or `None`
    /// when the merged record no longer deserializes.
    pub fn merged(&self, patch: &Value) -> Option<User> {
        let Value::Object(patch) = patch else {
            return Some(self.clone());
        };

        let mut current = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => return None,
        };
        for (key, value) in patch {
            current.insert(key.clone(), value.clone());
        }

        serde_json::from_value(Value::Object(current)).ok()
    }

    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// The authenticated identity and bearer token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl Session {
    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}
