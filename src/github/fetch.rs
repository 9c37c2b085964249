use serde_json::json;

use super::client::{run_query, GraphQlClient};
use super::pager::{collect_pages, Connection};
use super::queries::{
    Organization, OrganizationProjectsData, ProjectBoardData, ViewerOrganizationsData,
    ORGANIZATION_PROJECTS, ORGANIZATION_PROJECTS_QUERY, PROJECT_BOARD, PROJECT_BOARD_QUERY,
    VIEWER_ORGANIZATIONS, VIEWER_ORGANIZATIONS_QUERY,
};
use crate::error::FetchError;
use crate::model::{FieldDefinition, Project, ProjectEntry, RawItem};

/// Field metadata and items of one project, as returned by a single board query.
#[derive(Debug, Clone)]
pub struct BoardData {
    pub title: Option<String>,
    pub fields: Vec<FieldDefinition>,
    pub items: Vec<RawItem>,
}

async fn organizations_page(
    client: &dyn GraphQlClient,
    cursor: Option<String>,
) -> Result<Connection<Organization>, FetchError> {
    let data: ViewerOrganizationsData = run_query(
        client,
        VIEWER_ORGANIZATIONS,
        VIEWER_ORGANIZATIONS_QUERY,
        json!({ "cursor": cursor }),
    )
    .await?;
    Ok(data.viewer.organizations)
}

async fn organization_projects_page(
    client: &dyn GraphQlClient,
    login: &str,
    cursor: Option<String>,
) -> Result<Connection<Project>, FetchError> {
    let data: OrganizationProjectsData = run_query(
        client,
        ORGANIZATION_PROJECTS,
        ORGANIZATION_PROJECTS_QUERY,
        json!({ "login": login, "cursor": cursor }),
    )
    .await?;
    data.organization
        .map(|org| org.projects)
        .ok_or_else(|| FetchError::query(ORGANIZATION_PROJECTS, format!("organization {login} not found")))
}

/// Every project of every organization the viewer belongs to, in discovery order.
///
/// Failing to list organizations is an error. Failing to list one organization's
/// projects is logged and that organization is skipped from the failing page on.
pub async fn fetch_all_projects(client: &dyn GraphQlClient) -> Result<Vec<ProjectEntry>, FetchError> {
    let orgs = collect_pages(|cursor| organizations_page(client, cursor))
        .await
        .into_result()?;
    tracing::debug!(count = orgs.len(), "listed organizations");

    let mut entries = Vec::new();
    for org in &orgs {
        let paged = collect_pages(|cursor| organization_projects_page(client, &org.login, cursor)).await;
        if let Some(error) = &paged.error {
            tracing::warn!(org = %org.login, %error, kept = paged.items.len(), "skipping organization projects");
        }
        entries.extend(paged.items.into_iter().map(|project| ProjectEntry {
            org_login: org.login.clone(),
            project,
        }));
    }

    tracing::info!(orgs = orgs.len(), projects = entries.len(), "fetched project list");
    Ok(entries)
}

/// Fields (first 20) and items (first 100) of one project. Later item pages are not fetched.
pub async fn fetch_project_board(client: &dyn GraphQlClient, project_id: &str) -> Result<BoardData, FetchError> {
    let data: ProjectBoardData = run_query(
        client,
        PROJECT_BOARD,
        PROJECT_BOARD_QUERY,
        json!({ "id": project_id }),
    )
    .await?;

    let node = data
        .node
        .ok_or_else(|| FetchError::query(PROJECT_BOARD, format!("no project with id {project_id}")))?;
    let (Some(fields), Some(items)) = (node.fields, node.items) else {
        return Err(FetchError::query(
            PROJECT_BOARD,
            format!("{project_id} is not a project"),
        ));
    };

    if items.page_info.has_next_page {
        tracing::debug!(project_id, "project has more than 100 items; only the first page is shown");
    }

    let fields: Vec<FieldDefinition> = fields
        .nodes
        .into_iter()
        .flatten()
        .filter_map(|f| f.into_definition())
        .collect();
    let items: Vec<RawItem> = items.into_nodes().into_iter().map(RawItem::from).collect();

    tracing::info!(project_id, fields = fields.len(), items = items.len(), "fetched project board");
    Ok(BoardData {
        title: node.title,
        fields,
        items,
    })
}
