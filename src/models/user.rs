//! The authenticated user's profile as returned by the login endpoint.

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Profile record attached to a login response. The backend sends more
/// fields than the client uses; unknown fields are ignored and the
/// flags default to false when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    /// UI theme preference, when the user has set one.
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_with_extras() {
        let json = r#"{
            "id": 42,
            "displayName": "Ada Lovelace",
            "email": "ada@example.com",
            "organizationId": "org-7",
            "theme": "dark",
            "isAdmin": true,
            "isSuperAdmin": false,
            "createdAt": "2025-01-15T09:30:00Z"
        }"#;

        let profile: UserProfile = serde_json::from_str(json).expect("parse profile");
        assert_eq!(profile.id, 42);
        assert_eq!(profile.display_name, "Ada Lovelace");
        assert_eq!(profile.theme, Some(Theme::Dark));
        assert!(profile.is_admin);
    }

    #[test]
    fn test_parse_minimal_profile() {
        let json = r#"{"id": 1, "displayName": "Min", "email": "min@example.com"}"#;
        let profile: UserProfile = serde_json::from_str(json).expect("parse minimal");
        assert_eq!(profile.theme, None);
        assert!(!profile.is_admin);
        assert!(profile.organization_id.is_none());
    }
}
