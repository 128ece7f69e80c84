use serde::{Deserialize, Serialize};

/// The `runs` or `args` attribute of an action.
///
/// Written either as one string (`runs = "make test"`, split on whitespace)
/// or as an explicit list (`runs = ["make", "test"]`, used verbatim).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    Raw(String),
    List(Vec<String>),
}

impl Command {
    /// The string form as written; empty for the list form
    pub fn raw(&self) -> &str {
        match self {
            Command::Raw(raw) => raw,
            Command::List(_) => "",
        }
    }

    /// The argument vector
    pub fn parsed(&self) -> Vec<&str> {
        match self {
            Command::Raw(raw) => raw.split_whitespace().collect(),
            Command::List(items) => items.iter().map(String::as_str).collect(),
        }
    }

    /// A single display string
    pub fn join(&self) -> String {
        match self {
            Command::Raw(raw) => raw.clone(),
            Command::List(items) => items.join(" "),
        }
    }
}
