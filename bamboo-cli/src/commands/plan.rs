//! Plan commands

use bamboo_api::{BambooClient, PlanCreateBranchOptions};
use bamboo_core::Config;
use clap::{Args, Subcommand};

use super::get_client;

/// Plan commands
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(subcommand)]
    pub command: PlanCommand,
}

#[derive(Subcommand, Debug)]
pub enum PlanCommand {
    /// List all plans
    List {
        /// Print plan keys only
        #[arg(long, conflicts_with_all = ["names", "map"])]
        keys: bool,

        /// Print short names only
        #[arg(long, conflicts_with = "map")]
        names: bool,

        /// Print "KEY=short name" pairs, one per unique key
        #[arg(long)]
        map: bool,
    },

    /// Show the number of plans on the server
    Count,

    /// Create a plan branch
    Branch {
        /// Plan key (e.g. PROJ-PLAN)
        plan: String,

        /// Name of the plan branch
        branch: String,

        /// VCS branch to build (defaults to the branch name)
        #[arg(long)]
        vcs_branch: Option<String>,
    },

    /// Disable a plan or plan branch
    Disable {
        /// Plan key
        plan: String,
    },

    /// Print a plan's YAML specs
    Specs {
        /// Plan key
        key: String,
    },
}

impl PlanArgs {
    /// Execute the plan command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let client = get_client(config)?;

        if verbose {
            println!("Using server {}", config.server.url);
        }

        match &self.command {
            PlanCommand::List { keys, names, map } => {
                list_plans(&client, *keys, *names, *map).await
            }
            PlanCommand::Count => {
                let count = client.plans().number_of_plans().await?;
                println!("{}", count);
                Ok(())
            }
            PlanCommand::Branch {
                plan,
                branch,
                vcs_branch,
            } => {
                let options = PlanCreateBranchOptions {
                    vcs_branch: vcs_branch.clone(),
                };
                client
                    .plans()
                    .create_plan_branch(plan, branch, &options)
                    .await?;
                println!("Created branch '{}' for {}", branch, plan);
                Ok(())
            }
            PlanCommand::Disable { plan } => {
                let response = client.plans().disable_plan(plan).await?;
                if !response.is_success() {
                    anyhow::bail!("Disabling {} returned {}", plan, response.status_text());
                }
                println!("Disabled {}", plan);
                Ok(())
            }
            PlanCommand::Specs { key } => {
                let code = client.plans().get_specs(key).await?;
                print!("{}", code);
                Ok(())
            }
        }
    }
}

async fn list_plans(
    client: &BambooClient,
    keys: bool,
    names: bool,
    map: bool,
) -> anyhow::Result<()> {
    let plans = client.plans();

    if keys {
        for key in plans.list_plan_keys().await? {
            println!("{}", key);
        }
        return Ok(());
    }

    if names {
        for name in plans.list_plan_names().await? {
            println!("{}", name);
        }
        return Ok(());
    }

    if map {
        let mut entries: Vec<_> = plans.plan_name_map().await?.into_iter().collect();
        entries.sort();
        for (key, name) in entries {
            println!("{}={}", key, name);
        }
        return Ok(());
    }

    let all = plans.list_plans().await?;
    if all.is_empty() {
        println!("No plans found.");
        return Ok(());
    }

    println!("Plans ({} found)", all.len());
    println!();
    for plan in all {
        let state = if plan.enabled { "●" } else { "○" };
        println!("{} {:<20} {}", state, plan.key, plan.name);
    }

    Ok(())
}
