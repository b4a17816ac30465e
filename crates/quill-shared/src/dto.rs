//! Data Transfer Objects - form and query payloads accepted by the blog.

use serde::{Deserialize, Serialize};

/// Query string of `GET /compose`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComposeQuery {
    pub key: Option<String>,
}

/// Form body of `POST /compose`.
///
/// `title` and `body_source` are required; a request missing either is
/// rejected before reaching the handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeForm {
    #[serde(default)]
    pub key: Option<String>,
    pub title: String,
    pub body_source: String,
}

impl ComposeForm {
    /// The submitted key, with an empty field treated as absent.
    pub fn key(&self) -> Option<&str> {
        non_blank(self.key.as_deref())
    }
}

impl ComposeQuery {
    pub fn key(&self) -> Option<&str> {
        non_blank(self.key.as_deref())
    }
}

/// Query string of the login routes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

/// Form body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
