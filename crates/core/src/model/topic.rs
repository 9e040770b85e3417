use serde::{Deserialize, Serialize};

use super::TopicId;

loose_enum! {
    TopicStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
}

impl TopicStatus {
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            TopicStatus::Active => "Active",
            TopicStatus::Inactive => "Inactive",
            TopicStatus::Unknown(raw) => raw,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TopicStatus>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Topic {
    #[must_use]
    pub fn name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Untitled topic")
    }

    #[must_use]
    pub fn status(&self) -> TopicStatus {
        self.status.clone().unwrap_or(TopicStatus::Active)
    }
}
