use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

use sitedesk_auth::{Action, Role, primary_role};
use sitedesk_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "sitedesk", version, about = "Project document workflow and costing")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalOpts {
    /// Log output format (json or pretty)
    #[arg(long, global = true, env = "SITEDESK_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,

    /// Caller authority (e.g. ROLE_ADMIN); finance when absent or unrecognised
    #[arg(long, global = true, env = "SITEDESK_ROLE")]
    pub role: Option<String>,

    /// VAT percentage used when a quotation sheet carries none
    #[arg(long, global = true, env = "SITEDESK_VAT_PERCENTAGE", default_value = "0")]
    pub vat_percentage: Decimal,
}

impl GlobalOpts {
    pub fn caller_role(&self) -> Role {
        primary_role(self.role.as_deref())
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the document cards a caller can see for a project snapshot
    Documents(InputArgs),

    /// List review/assignment actions currently open to the caller
    Actions(InputArgs),

    /// Recompute an estimation sheet
    Estimate(InputArgs),

    /// Recompute a quotation sheet
    Quote(InputArgs),

    /// Mark a project's estimation as verified
    Verify(ReviewArgs),

    /// Approve or reject a verified estimation
    Decide(DecideArgs),

    /// Assign an engineer to a project whose estimation is approved
    Assign(AssignArgs),

    /// Show the role table, or explain one role/action decision
    Roles(RolesArgs),
}

#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// JSON snapshot file ("-" reads stdin)
    pub input: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct ReviewArgs {
    /// JSON project snapshot ("-" reads stdin)
    pub input: PathBuf,

    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct DecideArgs {
    /// JSON project snapshot ("-" reads stdin)
    pub input: PathBuf,

    /// Reject instead of approving (requires --comment)
    #[arg(long)]
    pub reject: bool,

    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Args)]
pub struct AssignArgs {
    /// JSON project snapshot ("-" reads stdin)
    pub input: PathBuf,

    /// Engineer to assign
    #[arg(long)]
    pub engineer: String,

    /// JSON list of assignable engineers
    #[arg(long)]
    pub engineers: PathBuf,
}

#[derive(Debug, Clone, Args)]
pub struct RolesArgs {
    /// Explain whether the caller's role may perform this action
    #[arg(long, value_parser = parse_action)]
    pub explain: Option<Action>,
}

fn parse_action(raw: &str) -> Result<Action, String> {
    Action::ALL
        .into_iter()
        .find(|a| a.as_str() == raw.trim().replace('-', "_"))
        .ok_or_else(|| format!("unknown action '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_defaults_to_finance() {
        let cli = Cli::try_parse_from(["sitedesk", "documents", "p.json"]).unwrap();
        assert_eq!(cli.global.caller_role(), Role::Finance);
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "sitedesk",
            "quote",
            "q.json",
            "--role",
            "ROLE_ENGINEER",
            "--vat-percentage",
            "5",
            "--log-format",
            "pretty",
        ])
        .unwrap();
        assert_eq!(cli.global.caller_role(), Role::Engineer);
        assert_eq!(cli.global.vat_percentage, Decimal::from(5));
        assert_eq!(cli.global.log_format, LogFormat::Pretty);
    }

    #[test]
    fn decide_parses_rejection_with_comment() {
        let cli = Cli::try_parse_from([
            "sitedesk",
            "decide",
            "p.json",
            "--reject",
            "--comment",
            "labour rate too high",
        ])
        .unwrap();
        match cli.command {
            Commands::Decide(args) => {
                assert!(args.reject);
                assert_eq!(args.comment.as_deref(), Some("labour rate too high"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn assign_requires_engineer_list() {
        assert!(Cli::try_parse_from(["sitedesk", "assign", "p.json", "--engineer", "ENG-1"]).is_err());
    }

    #[test]
    fn explain_accepts_dashed_action_names() {
        let cli =
            Cli::try_parse_from(["sitedesk", "roles", "--explain", "request-approval"]).unwrap();
        match cli.command {
            Commands::Roles(args) => assert_eq!(args.explain, Some(Action::RequestApproval)),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
