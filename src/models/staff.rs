use serde::{Deserialize, Serialize};

/// Id of the staff record created by first-run bootstrap. Protected from
/// deletion for the lifetime of the roster.
pub const FOUNDER_STAFF_ID: &str = "s1";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffStatus {
    Active,
    Inactive,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: String,
    pub name: String,
    pub role: String,
    pub status: StaffStatus,
    pub avatar: String,
    pub last_login: String,
}

impl Staff {
    pub fn avatar_url(name: &str) -> String {
        format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", name)
    }

    pub fn is_protected(&self) -> bool {
        self.id == FOUNDER_STAFF_ID
    }
}
