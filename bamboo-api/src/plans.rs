//! Plan listing, plan branches, enabling/disabling and plan specs

use std::collections::HashMap;

use reqwest::Method;
use tracing::{debug, info};

use crate::client::{ensure_not_empty, expect_ok};
use crate::transport::Response;
use crate::{BambooClient, Plan, PlanCreateBranchOptions, PlanResponse, Result, SpecResponse};

/// Handle for plan operations, obtained from [`BambooClient::plans`]
#[derive(Debug, Clone, Copy)]
pub struct PlanService<'a> {
    client: &'a BambooClient,
}

impl<'a> PlanService<'a> {
    pub(crate) fn new(client: &'a BambooClient) -> Self {
        Self { client }
    }

    /// Create a plan branch named `branch_name` for the plan `plan_key`
    ///
    /// Returns `true` once the server has accepted the branch.
    pub async fn create_plan_branch(
        &self,
        plan_key: &str,
        branch_name: &str,
        options: &PlanCreateBranchOptions,
    ) -> Result<bool> {
        ensure_not_empty(
            &[plan_key, branch_name],
            "Plan key and/or branch name cannot be empty",
        )?;
        debug!(plan_key, branch_name, ?options, "Creating plan branch");

        let mut request = self.client.new_request(
            Method::PUT,
            &format!("plan/{}/branch/{}.json", plan_key, branch_name),
        )?;

        if let Some(vcs_branch) = options.vcs_branch.as_deref().filter(|b| !b.is_empty()) {
            request.append_query("vcsBranch", vcs_branch);
        }

        let response = self.client.send(request).await?;
        expect_ok(response, "Create plan branch")?;

        info!(plan_key, branch_name, "Created plan branch");
        Ok(true)
    }

    /// Number of plans on the server, as reported by the collection size
    pub async fn number_of_plans(&self) -> Result<usize> {
        let mut request = self.client.new_request(Method::GET, "plan.json")?;
        // Only the collection size is needed
        request.append_query("max-results", "1");

        let response = self.client.send(request).await?;
        let response = expect_ok(response, "Getting the number of plans")?;

        let body: PlanResponse = response.json()?;
        debug!(size = body.plans.metadata.size, "Fetched number of plans");
        Ok(body.plans.metadata.size)
    }

    /// Get every plan on the server
    ///
    /// The server pages by default, so the total is fetched first and then
    /// requested in one go.
    pub async fn list_plans(&self) -> Result<Vec<Plan>> {
        let count = self.number_of_plans().await?;

        let mut request = self.client.new_request(Method::GET, "plan.json")?;
        request.append_query("max-results", &count.to_string());

        let response = self.client.send(request).await?;
        let response = expect_ok(response, "Getting plan information")?;

        let body: PlanResponse = response.json()?;
        let plans = body.plans.plan_list;

        info!(count = plans.len(), "Fetched plans");
        Ok(plans)
    }

    /// Keys of all plans, in the order returned by [`list_plans`](Self::list_plans)
    pub async fn list_plan_keys(&self) -> Result<Vec<String>> {
        let plans = self.list_plans().await?;
        Ok(plans.into_iter().map(|p| p.key).collect())
    }

    /// Short names of all plans, in the order returned by [`list_plans`](Self::list_plans)
    pub async fn list_plan_names(&self) -> Result<Vec<String>> {
        let plans = self.list_plans().await?;
        Ok(plans.into_iter().map(|p| p.short_name).collect())
    }

    /// Map from plan key to short name
    ///
    /// If the server reports the same key twice, the later plan wins.
    pub async fn plan_name_map(&self) -> Result<HashMap<String, String>> {
        let plans = self.list_plans().await?;
        Ok(plans.into_iter().map(|p| (p.key, p.short_name)).collect())
    }

    /// Disable a plan or plan branch
    ///
    /// The response is handed back whatever its status; callers decide
    /// what counts as success.
    pub async fn disable_plan(&self, plan_key: &str) -> Result<Response> {
        debug!(plan_key, "Disabling plan");

        let request = self
            .client
            .new_request(Method::DELETE, &format!("plan/{}/enable", plan_key))?;
        self.client.send(request).await
    }

    /// YAML specification of a plan
    ///
    /// Returns the spec code exactly as the server sent it.
    pub async fn get_specs(&self, key: &str) -> Result<String> {
        debug!(key, "Fetching plan specs");

        let mut request = self
            .client
            .new_request(Method::GET, &format!("plan/{}/specs?format=YAML", key))?;
        request.append_query("max-results", "1");

        let response = self.client.send(request).await?;
        let response = expect_ok(response, "Getting the spec of plans")?;

        let body: SpecResponse = response.json()?;
        Ok(body.spec.code)
    }
}
