//! GraphQL documents and the response shapes they decode into.

use serde::Deserialize;

use super::pager::Connection;
use crate::model::{FieldDefinition, FieldValue, ItemContent, Project, RawItem};

pub const VIEWER_ORGANIZATIONS: &str = "ViewerOrganizations";
pub const ORGANIZATION_PROJECTS: &str = "OrganizationProjects";
pub const PROJECT_BOARD: &str = "ProjectBoard";

pub const VIEWER_ORGANIZATIONS_QUERY: &str = r#"query ViewerOrganizations($cursor: String) {
  viewer {
    organizations(first: 100, after: $cursor) {
      nodes { login }
      pageInfo { hasNextPage endCursor }
    }
  }
}"#;

pub const ORGANIZATION_PROJECTS_QUERY: &str = r#"query OrganizationProjects($login: String!, $cursor: String) {
  organization(login: $login) {
    projectsV2(first: 100, after: $cursor) {
      nodes { id number title url closed createdAt }
      pageInfo { hasNextPage endCursor }
    }
  }
}"#;

pub const PROJECT_BOARD_QUERY: &str = r#"query ProjectBoard($id: ID!) {
  node(id: $id) {
    ... on ProjectV2 {
      id
      title
      fields(first: 20) {
        nodes {
          __typename
          ... on ProjectV2FieldCommon { id name }
          ... on ProjectV2SingleSelectField { options { name } }
        }
      }
      items(first: 100) {
        nodes {
          id
          fieldValues(first: 20) {
            nodes {
              __typename
              ... on ProjectV2ItemFieldTextValue {
                text
                field { ... on ProjectV2FieldCommon { id } }
              }
              ... on ProjectV2ItemFieldSingleSelectValue {
                name
                field { ... on ProjectV2FieldCommon { id } }
              }
            }
          }
          content {
            __typename
            ... on Issue { title url }
            ... on PullRequest { title url }
          }
        }
        pageInfo { hasNextPage endCursor }
      }
    }
  }
}"#;

#[derive(Debug, Deserialize)]
pub struct ViewerOrganizationsData {
    pub viewer: Viewer,
}

#[derive(Debug, Deserialize)]
pub struct Viewer {
    pub organizations: Connection<Organization>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Organization {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationProjectsData {
    pub organization: Option<OrganizationProjects>,
}

#[derive(Debug, Deserialize)]
pub struct OrganizationProjects {
    #[serde(rename = "projectsV2")]
    pub projects: Connection<Project>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectBoardData {
    pub node: Option<BoardNode>,
}

/// `node(id:)` result. Fields are absent when the id is not a ProjectV2.
#[derive(Debug, Deserialize)]
pub struct BoardNode {
    pub title: Option<String>,
    pub fields: Option<NodeList<RawField>>,
    pub items: Option<Connection<RawProjectItem>>,
}

#[derive(Debug, Deserialize)]
pub struct NodeList<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
}

#[derive(Debug, Deserialize)]
pub struct RawField {
    pub id: Option<String>,
    pub name: Option<String>,
    pub options: Option<Vec<RawOption>>,
}

#[derive(Debug, Deserialize)]
pub struct RawOption {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProjectItem {
    pub id: String,
    pub field_values: Option<NodeList<RawFieldValue>>,
    pub content: Option<RawContent>,
}

#[derive(Debug, Deserialize)]
pub struct FieldRef {
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum RawFieldValue {
    #[serde(rename = "ProjectV2ItemFieldTextValue")]
    Text {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        field: Option<FieldRef>,
    },
    #[serde(rename = "ProjectV2ItemFieldSingleSelectValue")]
    SingleSelect {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        field: Option<FieldRef>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "__typename")]
pub enum RawContent {
    Issue {
        #[serde(default)]
        title: String,
        #[serde(default)]
        url: String,
    },
    PullRequest {
        #[serde(default)]
        title: String,
        #[serde(default)]
        url: String,
    },
    #[serde(other)]
    Other,
}

impl RawField {
    /// Fields the fragments did not match carry no id or name and are skipped.
    pub fn into_definition(self) -> Option<FieldDefinition> {
        Some(FieldDefinition {
            id: self.id?,
            name: self.name?,
            options: self
                .options
                .map(|opts| opts.into_iter().map(|o| o.name).collect()),
        })
    }
}

impl RawFieldValue {
    fn into_field_value(self) -> Option<FieldValue> {
        match self {
            RawFieldValue::Text { text, field } => Some(FieldValue::Text {
                field_id: field.and_then(|f| f.id).unwrap_or_default(),
                text: text.unwrap_or_default(),
            }),
            RawFieldValue::SingleSelect { name, field } => Some(FieldValue::SingleSelect {
                field_id: field.and_then(|f| f.id)?,
                option: name.unwrap_or_default(),
            }),
            RawFieldValue::Other => None,
        }
    }
}

impl From<RawProjectItem> for RawItem {
    fn from(raw: RawProjectItem) -> Self {
        let content = match raw.content {
            Some(RawContent::Issue { title, url }) => ItemContent::Issue { title, url },
            Some(RawContent::PullRequest { title, url }) => ItemContent::PullRequest { title, url },
            Some(RawContent::Other) | None => ItemContent::Draft,
        };
        let field_values = raw
            .field_values
            .map(|list| {
                list.nodes
                    .into_iter()
                    .flatten()
                    .filter_map(RawFieldValue::into_field_value)
                    .collect()
            })
            .unwrap_or_default();

        RawItem {
            id: raw.id,
            content,
            field_values,
        }
    }
}
