//! Bamboo API - REST bindings for Bamboo projects and plans
//!
//! Each operation is a single request/response translation: validate the
//! arguments, build the path and query, send it through the injected
//! [`Transport`], check the status and decode the JSON body.
//!
//! ```rust,ignore
//! let client = BambooClient::from_env()?;
//! for plan in client.plans().list_plans().await? {
//!     println!("{} {}", plan.key, plan.short_name);
//! }
//! ```

mod client;
mod error;
mod models;
mod plans;
mod projects;
mod transport;

#[cfg(test)]
mod mock;

pub use client::BambooClient;
pub use error::{Error, Result};
pub use models::{
    CollectionMetadata, Link, Plan, PlanCreateBranchOptions, PlanKey, PlanResponse, Plans,
    Project, ProjectInformation, ProjectPlansInformation, ProjectRepos, ProjectRepositoryResult,
    ProjectResponse, Projects, RepositoryIndex, ResourceMetadata, SpecDetail, SpecResponse,
};
pub use plans::PlanService;
pub use projects::ProjectService;
pub use transport::{HttpTransport, Request, Response, Transport};

pub use reqwest::{Method, StatusCode};
