use serde::{Deserialize, Serialize};

/// Direct datastore credentials.
///
/// The section being present at all selects the direct connection strategy;
/// every field is optional here so that a partially filled section can be
/// reported as a configuration error instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct PdoConfig {
    pub url: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl PdoConfig {
    pub fn new(url: &str, user: &str, password: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            user: Some(user.to_string()),
            password: Some(password.to_string()),
        }
    }

    /// Returns `(url, user, password)` when all three are set.
    pub fn credentials(&self) -> Option<(&str, &str, &str)> {
        match (&self.url, &self.user, &self.password) {
            (Some(url), Some(user), Some(password)) => {
                Some((url.as_str(), user.as_str(), password.as_str()))
            }
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.credentials().is_some()
    }
}
