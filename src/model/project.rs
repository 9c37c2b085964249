use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub closed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Project {
    pub fn state_label(&self) -> &'static str {
        if self.closed {
            "Closed"
        } else {
            "Open"
        }
    }
}

/// One row of the all-projects listing: a project and the organization it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectEntry {
    pub org_login: String,
    pub project: Project,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_graphql_shape() {
        let json = r#"{
            "id": "PVT_1",
            "number": 4,
            "title": "Roadmap",
            "url": "https://github.com/orgs/acme/projects/4",
            "closed": true,
            "createdAt": "2024-03-01T10:00:00Z"
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.number, 4);
        assert!(project.closed);
        assert_eq!(project.state_label(), "Closed");
        assert!(project.created_at.is_some());
    }

    #[test]
    fn missing_created_at_is_allowed() {
        let json = r#"{"id":"PVT_2","number":1,"title":"T","url":"u"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.created_at, None);
        assert_eq!(project.state_label(), "Open");
    }
}
