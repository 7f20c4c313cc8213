//! Project metadata, project plans and linked repositories

use reqwest::Method;
use tracing::{debug, info};

use crate::client::{ensure_not_empty, expect_ok};
use crate::{
    BambooClient, Plan, PlanResponse, Project, ProjectInformation, ProjectRepos,
    ProjectRepositoryResult, ProjectResponse, Result,
};

const EMPTY_PROJECT_KEY: &str = "Project key cannot be an empty string";

/// Handle for project operations, obtained from [`BambooClient::projects`]
#[derive(Debug, Clone, Copy)]
pub struct ProjectService<'a> {
    client: &'a BambooClient,
}

impl<'a> ProjectService<'a> {
    pub(crate) fn new(client: &'a BambooClient) -> Self {
        Self { client }
    }

    /// Get the information on a single project
    pub async fn project_info(&self, project_key: &str) -> Result<ProjectInformation> {
        ensure_not_empty(&[project_key], EMPTY_PROJECT_KEY)?;
        debug!(project_key, "Fetching project information");

        let request = self
            .client
            .new_request(Method::GET, &format!("project/{}.json", project_key))?;
        let response = self.client.send(request).await?;
        let response = expect_ok(response, "Getting project information")?;

        response.json()
    }

    /// List the plans belonging to a project
    pub async fn project_plans(&self, project_key: &str) -> Result<Vec<Plan>> {
        ensure_not_empty(&[project_key], EMPTY_PROJECT_KEY)?;
        debug!(project_key, "Fetching project plans");

        let mut request = self
            .client
            .new_request(Method::GET, &format!("project/{}.json", project_key))?;
        request.set_query("expand", "plans");
        // The server spells this one without the trailing "s"
        request.set_query("max-result", "1000");

        let response = self.client.send(request).await?;
        let response = expect_ok(response, "Getting project plans")?;

        let body: PlanResponse = response.json()?;
        let plans = body.plans.plan_list;

        info!(project_key, count = plans.len(), "Fetched project plans");
        Ok(plans)
    }

    /// List all projects
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        debug!("Listing projects");

        let request = self.client.new_request(Method::GET, "project.json")?;
        let response = self.client.send(request).await?;
        let response = expect_ok(response, "List projects")?;

        let body: ProjectResponse = response.json()?;
        let projects = body.projects.project_list;

        info!(count = projects.len(), "Fetched projects");
        Ok(projects)
    }

    /// List the repositories linked to a project
    ///
    /// The key is not checked; an empty key is sent as-is.
    pub async fn project_repositories(&self, project_key: &str) -> Result<Vec<ProjectRepos>> {
        debug!(project_key, "Fetching project repositories");

        let request = self
            .client
            .new_request(Method::GET, &format!("project/{}/repositories", project_key))?;
        let response = self.client.send(request).await?;
        let response = expect_ok(response, "Getting project repositories")?;

        let body: ProjectRepositoryResult = response.json()?;

        info!(
            project_key,
            count = body.repositories.len(),
            "Fetched project repositories"
        );
        Ok(body.repositories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::Error;
    use reqwest::StatusCode;
    use serde_json::json;

    fn client() -> (BambooClient, MockTransport) {
        let mock = MockTransport::new();
        (BambooClient::new(mock.clone()), mock)
    }

    #[tokio::test]
    async fn test_project_info() {
        let (client, mock) = client();
        mock.respond(
            StatusCode::OK,
            json!({
                "key": "PROJ",
                "name": "Project",
                "description": "Main project",
                "plans": {"size": 7}
            }),
        );

        let info = client.projects().project_info("PROJ").await.unwrap();
        assert_eq!(info.key, "PROJ");
        assert_eq!(info.description, "Main project");
        assert_eq!(info.num_plans.size, 7);

        let requests = mock.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].api_path(), "project/PROJ.json");
    }

    #[tokio::test]
    async fn test_empty_key_fails_without_request() {
        let (client, mock) = client();

        let err = client.projects().project_info("").await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Project key cannot be an empty string");

        let err = client.projects().project_plans("").await.unwrap_err();
        assert!(err.is_validation());

        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn test_project_info_unexpected_status() {
        let (client, mock) = client();
        mock.respond_raw(StatusCode::UNAUTHORIZED, "<html>login</html>");

        let err = client.projects().project_info("PROJ").await.unwrap_err();
        assert!(err.is_unexpected_status());
        assert_eq!(
            err.to_string(),
            "Getting project information returned 401 Unauthorized"
        );
    }

    #[tokio::test]
    async fn test_project_plans_query() {
        let (client, mock) = client();
        mock.respond(
            StatusCode::OK,
            json!({
                "key": "PROJ",
                "plans": {
                    "size": 2,
                    "plan": [
                        {"key": "PROJ-A", "shortName": "A"},
                        {"key": "PROJ-B", "shortName": "B"}
                    ]
                }
            }),
        );

        let plans = client.projects().project_plans("PROJ").await.unwrap();
        let keys: Vec<&str> = plans.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["PROJ-A", "PROJ-B"]);

        let request = &mock.requests()[0];
        assert_eq!(request.api_path(), "project/PROJ.json");
        assert_eq!(request.query_value("expand").as_deref(), Some("plans"));
        assert_eq!(request.query_value("max-result").as_deref(), Some("1000"));
    }

    #[tokio::test]
    async fn test_list_projects() {
        let (client, mock) = client();
        mock.respond(
            StatusCode::OK,
            json!({
                "expand": "projects",
                "projects": {
                    "size": 2,
                    "start-index": 0,
                    "max-result": 2,
                    "project": [
                        {"key": "ONE", "name": "First"},
                        {
                            "key": "TWO",
                            "name": "Second",
                            "link": {"href": "http://b/two", "rel": "self"}
                        }
                    ]
                }
            }),
        );

        let projects = client.projects().list_projects().await.unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].key, "ONE");
        assert_eq!(projects[1].link.as_ref().unwrap().href, "http://b/two");
        assert_eq!(mock.requests()[0].api_path(), "project.json");
    }

    #[tokio::test]
    async fn test_list_projects_not_found() {
        let (client, mock) = client();
        mock.respond_raw(StatusCode::NOT_FOUND, "");

        let result = client.projects().list_projects().await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("404"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (client, mock) = client();
        mock.respond_raw(StatusCode::OK, "not json");

        let err = client.projects().list_projects().await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_project_repositories() {
        let (client, mock) = client();
        mock.respond(
            StatusCode::OK,
            json!({
                "size": 1,
                "results": [{
                    "id": 5,
                    "name": "backend",
                    "url": "https://git.example.com/backend.git",
                    "type": "git",
                    "isAdmin": false
                }]
            }),
        );

        let repos = client.projects().project_repositories("PROJ").await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "backend");
        assert_eq!(repos[0].repo_type, "git");
        assert_eq!(mock.requests()[0].api_path(), "project/PROJ/repositories");
    }

    #[tokio::test]
    async fn test_project_repositories_does_not_validate() {
        let (client, mock) = client();
        mock.respond(StatusCode::OK, json!({"results": []}));

        let repos = client.projects().project_repositories("").await.unwrap();
        assert!(repos.is_empty());
        assert_eq!(mock.requests().len(), 1);
    }
}
