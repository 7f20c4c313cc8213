//! Wire models for the project and plan resources
//!
//! Field names follow the server's JSON. Every field falls back to its zero
//! value when missing, and empty optional fields are left out when encoding.

use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}

/// Hyperlink attached to most resources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub href: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rel: String,
}

/// Envelope fields on top-level resource responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceMetadata {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

/// Envelope fields on collections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionMetadata {
    /// Total number of items on the server, not the length of this page
    pub size: usize,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub expand: String,
    #[serde(rename = "start-index")]
    pub start_index: usize,
    #[serde(rename = "max-result")]
    pub max_result: usize,
}

/// A single project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

/// Collection of projects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projects {
    #[serde(flatten)]
    pub metadata: CollectionMetadata,
    #[serde(rename = "project")]
    pub project_list: Vec<Project>,
}

/// Response of `GET project.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectResponse {
    #[serde(flatten)]
    pub metadata: ResourceMetadata,
    pub projects: Projects,
}

/// Plan count summary nested in [`ProjectInformation`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectPlansInformation {
    #[serde(skip_serializing_if = "is_zero")]
    pub size: usize,
}

/// Response of `GET project/{key}.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInformation {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "plans")]
    pub num_plans: ProjectPlansInformation,
}

/// A repository linked to a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectRepos {
    pub id: i64,
    pub name: String,
    pub url: String,
    pub location: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub repo_type: String,
    pub is_admin: bool,
}

/// Paging fields of the repository listing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryIndex {
    pub size: usize,
    pub start: usize,
    pub limit: usize,
    pub is_last_page: bool,
}

/// Response of `GET project/{key}/repositories`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRepositoryResult {
    #[serde(flatten)]
    pub index: RepositoryIndex,
    #[serde(rename = "results")]
    pub repositories: Vec<ProjectRepos>,
}

/// Nested plan key object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanKey {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
}

/// A single build plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Plan {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_key: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub plan_type: String,
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_key: Option<PlanKey>,
}

/// Collection of plans
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Plans {
    #[serde(flatten)]
    pub metadata: CollectionMetadata,
    #[serde(rename = "plan")]
    pub plan_list: Vec<Plan>,
}

/// Response of `GET plan.json` and `GET project/{key}.json?expand=plans`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanResponse {
    #[serde(flatten)]
    pub metadata: ResourceMetadata,
    pub plans: Plans,
}

/// Plan specification as exported by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpecDetail {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub build_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code: String,
}

/// Response of `GET plan/{key}/specs`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecResponse {
    pub spec: SpecDetail,
}

/// Optional parameters for creating a plan branch
#[derive(Debug, Clone, Default)]
pub struct PlanCreateBranchOptions {
    /// VCS branch to build; the server guesses from the branch name when unset
    pub vcs_branch: Option<String>,
}

impl PlanCreateBranchOptions {
    pub fn with_vcs_branch(mut self, branch: impl Into<String>) -> Self {
        self.vcs_branch = Some(branch.into());
        self
    }
}
