use serde::{Deserialize, Serialize};

use super::{UserId, first_text};

loose_enum! {
    /// Account role as reported by the API.
    Role {
        User => "USER",
        Admin => "ADMIN",
    }
}

impl Role {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Role::User => "Learner",
            Role::Admin => "Administrator",
            Role::Unknown(raw) => raw,
        }
    }
}

loose_enum! {
    AccountStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Banned => "BANNED",
        PendingVerification => "PENDING_VERIFICATION",
    }
}

impl AccountStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            AccountStatus::Active => "Active",
            AccountStatus::Inactive => "Inactive",
            AccountStatus::Banned => "Banned",
            AccountStatus::PendingVerification => "Pending verification",
            AccountStatus::Unknown(raw) => raw,
        }
    }
}

/// Profile of the signed-in user (`GET /me`) or of an account in the admin list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub status: Option<AccountStatus>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
    #[serde(default)]
    pub daily_goal: Option<i64>,
    #[serde(default)]
    pub preferences: Option<serde_json::Value>,
    #[serde(default)]
    pub last_login_at: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl UserProfile {
    /// Missing role means a plain learner.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role.clone().unwrap_or(Role::User)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role() == Role::Admin
    }

    #[must_use]
    pub fn status(&self) -> AccountStatus {
        self.status.clone().unwrap_or(AccountStatus::Active)
    }

    /// Best human-facing name: display name, then username, then email.
    #[must_use]
    pub fn display_name(&self) -> String {
        first_text([
            self.display_name.as_deref(),
            self.username.as_deref(),
            self.email.as_deref(),
        ])
        .unwrap_or_else(|| self.id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_falls_back_to_email() {
        let user: UserProfile = serde_json::from_str(
            r#"{"id":"u1","email":"a@b.c","displayName":"  ","role":"admin"}"#,
        )
        .unwrap();

        assert_eq!(user.display_name(), "a@b.c");
        assert!(user.is_admin());
        assert_eq!(user.status(), AccountStatus::Active);
    }
}
