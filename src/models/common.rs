use serde::{Deserialize, Deserializer};
use std::fmt;

/// Credentials handed out by the signing service at startup.
///
/// Every signed call reads from the same session; nothing mutates it after
/// bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    device_id: String,
    install_id: String,
}

impl Session {
    pub fn new(
        token: impl Into<String>,
        device_id: impl Into<String>,
        install_id: impl Into<String>,
    ) -> Self {
        Session {
            token: token.into(),
            device_id: device_id.into(),
            install_id: install_id.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// The vendor calls this the android id.
    pub fn install_id(&self) -> &str {
        &self.install_id
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.trim().is_empty()
    }

    /// Value of the `tn` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// A vendor field that shows up as either a JSON string or a number
/// (ids, play counts, hot codes). Kept as text so it prints the way the
/// vendor sent it. Saved files use the raw record, not this value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlexibleString(pub String);

impl fmt::Display for FlexibleString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for FlexibleString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Numbers keep their JSON text; a null id reads as empty.
        let value = serde_json::Value::deserialize(deserializer)?;
        match value {
            serde_json::Value::String(s) => Ok(FlexibleString(s)),
            serde_json::Value::Number(n) => Ok(FlexibleString(n.to_string())),
            serde_json::Value::Null => Ok(FlexibleString::default()),
            _ => Err(serde::de::Error::custom("Expected string or number")),
        }
    }
}

impl FlexibleString {
    pub fn new<T: ToString>(value: T) -> Self {
        FlexibleString(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}
