use serde::Serialize;

use crate::utils::time::now_iso;

/// Body of `GET /health`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: String,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "OK", timestamp: now_iso() }
    }
}
