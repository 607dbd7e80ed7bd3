use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

const TOKEN_PREFIX: &str = "ACCESS-ID-";

/// The organisation-wide QR payload employees scan to clock in or out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "token": "ACCESS-ID-6a8b2c9d",
    "name": "General Access Code"
}))]
pub struct AccessCode {
    pub token: String,
    pub name: String,
}

impl AccessCode {
    pub fn generate(name: impl Into<String>) -> Self {
        Self {
            token: generate_token(),
            name: name.into(),
        }
    }

    pub fn matches(&self, scanned: &str) -> bool {
        self.token == scanned.trim()
    }
}

/// `ACCESS-ID-` followed by 8 lowercase hex characters.
pub fn generate_token() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", TOKEN_PREFIX, &hex[..8])
}
