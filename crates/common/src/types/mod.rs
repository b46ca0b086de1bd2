use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Body returned for every failed request.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub status: &'static str,
    pub text: String,
}

impl ErrorBody {
    pub fn new(text: impl Into<String>) -> Self {
        Self { status: "error", text: text.into() }
    }
}
