//! Project commands

use bamboo_api::BambooClient;
use bamboo_core::Config;
use clap::{Args, Subcommand};

use super::get_client;

/// Project commands
#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub command: ProjectCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommand {
    /// List all projects
    List,

    /// Show project details
    Info {
        /// Project key
        key: String,
    },

    /// List the plans of a project
    Plans {
        /// Project key
        key: String,
    },

    /// List the repositories linked to a project
    Repos {
        /// Project key
        key: String,
    },
}

impl ProjectArgs {
    /// Execute the project command
    pub async fn execute(&self, verbose: bool, config: &Config) -> anyhow::Result<()> {
        let client = get_client(config)?;

        if verbose {
            println!("Using server {}", config.server.url);
        }

        match &self.command {
            ProjectCommand::List => list_projects(&client).await,
            ProjectCommand::Info { key } => show_project(&client, key).await,
            ProjectCommand::Plans { key } => list_project_plans(&client, key).await,
            ProjectCommand::Repos { key } => list_repositories(&client, key).await,
        }
    }
}

async fn list_projects(client: &BambooClient) -> anyhow::Result<()> {
    let projects = client.projects().list_projects().await?;

    if projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }

    println!("Projects ({} found)", projects.len());
    println!();

    for project in projects {
        if project.description.is_empty() {
            println!("{:<12} {}", project.key, project.name);
        } else {
            println!(
                "{:<12} {} - {}",
                project.key, project.name, project.description
            );
        }
    }

    Ok(())
}

async fn show_project(client: &BambooClient, key: &str) -> anyhow::Result<()> {
    let info = client.projects().project_info(key).await?;

    let title = format!("{}: {}", info.key, info.name);
    println!("{}", title);
    println!("{}", "=".repeat(title.len()));
    println!();

    if !info.description.is_empty() {
        println!("{}", info.description);
        println!();
    }
    println!("Plans: {}", info.num_plans.size);

    Ok(())
}

async fn list_project_plans(client: &BambooClient, key: &str) -> anyhow::Result<()> {
    let plans = client.projects().project_plans(key).await?;

    if plans.is_empty() {
        println!("No plans found in {}.", key);
        return Ok(());
    }

    println!("Plans in {} ({} found)", key, plans.len());
    println!();

    for plan in plans {
        let state = if plan.enabled { "●" } else { "○" };
        println!("{} {:<20} {}", state, plan.key, plan.short_name);
    }

    Ok(())
}

async fn list_repositories(client: &BambooClient, key: &str) -> anyhow::Result<()> {
    let repos = client.projects().project_repositories(key).await?;

    if repos.is_empty() {
        println!("No repositories linked to {}.", key);
        return Ok(());
    }

    for repo in repos {
        let admin = if repo.is_admin { " (admin)" } else { "" };
        println!("#{} {} [{}] {}{}", repo.id, repo.name, repo.repo_type, repo.url, admin);
    }

    Ok(())
}
