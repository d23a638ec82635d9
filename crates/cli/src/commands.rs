use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;

use sitedesk_auth::{Role, explain_authorization, role_definitions};
use sitedesk_core::{EngineerId, ProjectId};
use sitedesk_costing::{EstimationSheet, QuotationSheet, recompute_estimation, recompute_quotation};
use sitedesk_workflow::{
    Engineer, InMemoryProjectService, ProjectActions, ProjectService, ProjectState,
    permitted_actions, resolve_documents,
};

use crate::args::{Cli, Commands};

/// Run the selected command and return its JSON output.
pub fn run(cli: &Cli) -> Result<String> {
    let role = cli.global.caller_role();
    tracing::debug!(%role, "resolved caller role");

    match &cli.command {
        Commands::Documents(args) => documents(&read_input(&args.input)?, role),
        Commands::Actions(args) => actions(&read_input(&args.input)?, role),
        Commands::Estimate(args) => estimate(&read_input(&args.input)?),
        Commands::Quote(args) => quote(&read_input(&args.input)?, cli.global.vat_percentage),
        Commands::Verify(args) => verify(&read_input(&args.input)?, role, args.comment.clone()),
        Commands::Decide(args) => decide(
            &read_input(&args.input)?,
            role,
            !args.reject,
            args.comment.clone(),
        ),
        Commands::Assign(args) => assign(
            &read_input(&args.input)?,
            &read_input(&args.engineers)?,
            role,
            &args.engineer,
        ),
        Commands::Roles(args) => match args.explain {
            Some(action) => to_json(&explain_authorization(role, action)),
            None => to_json(&role_definitions()),
        },
    }
}

pub fn documents(input: &str, role: Role) -> Result<String> {
    let project: ProjectState = parse(input, "project snapshot")?;
    tracing::debug!(project_id = %project.id, status = %project.status, "resolving documents");
    to_json(&resolve_documents(&project, role))
}

pub fn actions(input: &str, role: Role) -> Result<String> {
    let project: ProjectState = parse(input, "project snapshot")?;
    to_json(&permitted_actions(&project, role))
}

pub fn estimate(input: &str) -> Result<String> {
    let sheet: EstimationSheet = parse(input, "estimation sheet")?;
    to_json(&recompute_estimation(&sheet))
}

/// `default_vat` applies only when the sheet carries no VAT percentage.
pub fn quote(input: &str, default_vat: Decimal) -> Result<String> {
    let mut sheet: QuotationSheet = parse(input, "quotation sheet")?;
    if sheet.vat_percentage.is_none() {
        sheet.vat_percentage = Some(default_vat);
    }
    to_json(&recompute_quotation(&sheet))
}

/// Review step result: the recorded event and the snapshot after the write.
#[derive(Debug, Serialize)]
pub struct ReviewOutcome<E> {
    pub event: E,
    pub project: ProjectState,
}

pub fn verify(input: &str, role: Role, comment: Option<String>) -> Result<String> {
    let (project_id, actions) = load_actions(input)?;
    let event = actions.request_verification(&project_id, role, comment, Utc::now())?;
    let project = actions.service().project(&project_id)?;
    to_json(&ReviewOutcome { event, project })
}

pub fn decide(input: &str, role: Role, approved: bool, comment: Option<String>) -> Result<String> {
    let (project_id, actions) = load_actions(input)?;
    let event = actions.decide_approval(&project_id, role, approved, comment, Utc::now())?;
    let project = actions.service().project(&project_id)?;
    to_json(&ReviewOutcome { event, project })
}

pub fn assign(input: &str, engineers: &str, role: Role, engineer: &str) -> Result<String> {
    let (project_id, actions) = load_actions(input)?;
    let engineers: Vec<Engineer> = parse(engineers, "engineer list")?;
    for entry in engineers {
        actions.service().add_engineer(entry);
    }

    let engineer_id = EngineerId::new(engineer)?;
    actions.assign_engineer(&project_id, role, &engineer_id)?;
    to_json(&actions.service().project(&project_id)?)
}

fn load_actions(input: &str) -> Result<(ProjectId, ProjectActions<InMemoryProjectService>)> {
    let project: ProjectState = parse(input, "project snapshot")?;
    tracing::debug!(project_id = %project.id, status = %project.status, "loaded project snapshot");
    let project_id = project.id.clone();
    let service = InMemoryProjectService::with_projects([project]);
    Ok((project_id, ProjectActions::new(service)))
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn parse<T: DeserializeOwned>(input: &str, what: &str) -> Result<T> {
    serde_json::from_str(input).with_context(|| format!("invalid {what}"))
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
