//! Command-line front end.
//!
//! Every command maps onto one client operation and prints its result as
//! pretty JSON on the given writer.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::types::{Epic, NewBoard, NewSprint, Sprint};
use crate::api::{
    delete_token, get_token, has_token, store_token, ApiError, BasicAuthTransport,
    BoardsOptions, EpicsOptions, GetIssueOptions, IssueKeys, IssuesOptions, JiraClient,
    ProjectsOptions, Response, SprintsOptions, VersionsOptions,
};
use crate::config::{Config, Profile};
use crate::error::{AppError, Result};

/// Environment variable holding the password or API token.
pub const ENV_PASSWORD: &str = "JIRA_PASS";

/// Command-line client for the JIRA Agile REST API.
#[derive(Debug, Parser)]
#[command(name = "jira-agile", version, about)]
pub struct Cli {
    /// Profile from the configuration file
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// JIRA instance URL (overrides the profile; falls back to JIRA_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Username (overrides the profile; falls back to JIRA_USER)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Write logs to daily files in this directory instead of stderr
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Board operations
    #[command(subcommand)]
    Boards(BoardsCommand),

    /// Sprint operations
    #[command(subcommand)]
    Sprints(SprintsCommand),

    /// Epic operations
    #[command(subcommand)]
    Epics(EpicsCommand),

    /// Backlog operations
    #[command(subcommand)]
    Backlog(BacklogCommand),

    /// Issue operations
    #[command(subcommand)]
    Issues(IssuesCommand),

    /// Store the API token for the profile in the OS keyring
    Login,

    /// Remove the profile's API token from the OS keyring
    Logout,
}

#[derive(Debug, Subcommand)]
pub enum BoardsCommand {
    /// List boards
    List {
        /// Filter by board type (scrum, kanban)
        #[arg(long = "type")]
        board_type: Option<String>,
        /// Filter by board name
        #[arg(long)]
        name: Option<String>,
        /// Filter by project key or id
        #[arg(long)]
        project: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show a board
    Get { id: i64 },
    /// Show a board's configuration
    Config { id: i64 },
    /// List a board's sprints
    Sprints {
        id: i64,
        /// Comma-separated states (future, active, closed)
        #[arg(long)]
        state: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List a board's epics
    Epics {
        id: i64,
        /// Only done epics
        #[arg(long)]
        done: bool,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List a board's backlog
    Backlog {
        id: i64,
        #[command(flatten)]
        filter: IssueFilter,
    },
    /// List a board's issues
    Issues {
        id: i64,
        /// Only issues of this epic
        #[arg(long, conflicts_with_all = ["sprint", "without_epic"])]
        epic: Option<i64>,
        /// Only issues of this sprint
        #[arg(long, conflicts_with = "without_epic")]
        sprint: Option<i64>,
        /// Only issues without an epic
        #[arg(long)]
        without_epic: bool,
        #[command(flatten)]
        filter: IssueFilter,
    },
    /// List the projects of a board
    Projects {
        id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
    /// List the versions of a board
    Versions {
        id: i64,
        /// "true" or "false"
        #[arg(long)]
        released: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Create a board
    Create {
        #[arg(long)]
        name: String,
        /// scrum or kanban
        #[arg(long = "type")]
        board_type: String,
        #[arg(long)]
        filter_id: i64,
    },
    /// Delete a board
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
pub enum SprintsCommand {
    /// Show a sprint
    Get { id: i64 },
    /// List a sprint's issues
    Issues {
        id: i64,
        #[command(flatten)]
        filter: IssueFilter,
    },
    /// Create a sprint
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        board_id: i64,
        /// RFC 3339 start date
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        /// RFC 3339 end date
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        #[arg(long)]
        goal: Option<String>,
    },
    /// Change some fields of a sprint
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        goal: Option<String>,
        /// future, active or closed
        #[arg(long)]
        state: Option<String>,
    },
    /// Move issues into a sprint
    Move {
        id: i64,
        #[arg(required = true)]
        issues: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EpicsCommand {
    /// Show an epic
    Get { id_or_key: String },
    /// List an epic's issues, or issues without an epic
    Issues {
        /// Omit to list issues that belong to no epic
        id_or_key: Option<String>,
        #[command(flatten)]
        filter: IssueFilter,
    },
    /// Change some fields of an epic
    Update {
        id_or_key: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        summary: Option<String>,
        /// Mark the epic as done
        #[arg(long)]
        done: bool,
    },
    /// Move issues into an epic
    Move {
        id_or_key: String,
        #[arg(required = true)]
        issues: Vec<String>,
    },
    /// Remove issues from their epics
    Remove {
        #[arg(required = true)]
        issues: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BacklogCommand {
    /// Move issues to the backlog
    Move {
        #[arg(required = true)]
        issues: Vec<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum IssuesCommand {
    /// Show an issue
    Get {
        id_or_key: String,
        /// Comma-separated fields to return
        #[arg(long)]
        fields: Option<String>,
        #[arg(long)]
        expand: Option<String>,
    },
    /// Show an issue's estimation on a board
    Estimation {
        id_or_key: String,
        #[arg(long)]
        board: i64,
    },
    /// Set an issue's estimation on a board
    Estimate {
        id_or_key: String,
        #[arg(long)]
        board: i64,
        /// e.g. 8, 1w, 2d, 3h
        value: String,
    },
}

/// Paging flags.
#[derive(Debug, Clone, Default, Args)]
pub struct PageArgs {
    /// Index of the first item
    #[arg(long, default_value_t = 0)]
    pub start_at: u32,
    /// Page size (server default when 0)
    #[arg(long, default_value_t = 0)]
    pub max_results: u32,
}

/// Flags shared by every issue list.
#[derive(Debug, Clone, Default, Args)]
pub struct IssueFilter {
    #[command(flatten)]
    pub page: PageArgs,
    /// JQL filter
    #[arg(long)]
    pub jql: Option<String>,
    /// Ask JIRA to validate the JQL
    #[arg(long)]
    pub validate_query: bool,
    /// Comma-separated fields to return
    #[arg(long)]
    pub fields: Option<String>,
    #[arg(long)]
    pub expand: Option<String>,
}

impl IssueFilter {
    fn options(&self) -> IssuesOptions {
        IssuesOptions {
            start_at: self.page.start_at,
            max_results: self.page.max_results,
            jql: self.jql.clone().unwrap_or_default(),
            validate_query: self.validate_query,
            fields: self.fields.clone().unwrap_or_default(),
            expand: self.expand.clone().unwrap_or_default(),
        }
    }
}

/// Run a parsed command line.
pub async fn run(cli: Cli, ctx: &CancellationToken, out: &mut dyn Write) -> Result<()> {
    let config = Config::load()?;
    let profile = resolve_profile(&cli, &config)?;
    debug!(profile = %profile.name, url = %profile.url, "Using profile");

    match cli.command {
        Command::Login => return login(&cli, &config, &profile, out),
        Command::Logout => return logout(&profile, out),
        _ => {}
    }

    let password = password(&profile)?;
    let client = build_client(&profile, &password, config.settings.timeout())?;
    execute(&client, cli.command, ctx, out).await
}

/// Pick the connection details: flags, then `JIRA_URL`/`JIRA_USER`, then
/// the configuration file.
pub fn resolve_profile(cli: &Cli, config: &Config) -> Result<Profile> {
    let profile = match (&cli.url, &cli.user) {
        (Some(url), Some(user)) => Profile::new(
            cli.profile.clone().unwrap_or_else(|| "default".to_string()),
            url.clone(),
            user.clone(),
        ),
        (None, None) => match Profile::from_env().filter(|_| cli.profile.is_none()) {
            Some(profile) => profile,
            None => config.resolve_profile(cli.profile.as_deref())?.clone(),
        },
        _ => return Err(AppError::other("--url and --user must be given together")),
    };

    profile.validate()?;
    Ok(profile)
}

/// The password: `JIRA_PASS`, then the keyring entry of the profile.
fn password(profile: &Profile) -> Result<String> {
    match std::env::var(ENV_PASSWORD) {
        Ok(password) if !password.is_empty() => Ok(password),
        _ => Ok(get_token(&profile.name)?),
    }
}

/// Build an authenticating client for `profile`.
pub fn build_client(profile: &Profile, password: &str, timeout: Duration) -> Result<JiraClient> {
    let http = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(ApiError::Network)?;
    let transport = BasicAuthTransport::new(&profile.username, password)?.with_inner(Arc::new(http));
    Ok(JiraClient::new(
        &profile.api_base_url(),
        Some(Arc::new(transport)),
    )?)
}

fn login(cli: &Cli, config: &Config, profile: &Profile, out: &mut dyn Write) -> Result<()> {
    let token = match std::env::var(ENV_PASSWORD) {
        Ok(token) if !token.is_empty() => token,
        _ => {
            eprint!("API token for {}: ", profile.username);
            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            line.trim().to_string()
        }
    };
    if token.is_empty() {
        return Err(AppError::other("no API token given"));
    }

    let replaced = has_token(&profile.name);
    store_token(&profile.name, &token)?;
    info!(profile = %profile.name, replaced, "Stored API token");

    // A named profile given on the command line is remembered.
    if cli.url.is_some() && cli.profile.is_some() && config.profile(&profile.name).is_none() {
        let mut config = config.clone();
        config.profiles.push(profile.clone());
        config.save()?;
        info!(profile = %profile.name, "Saved profile");
    }

    emit(
        out,
        &json!({"profile": profile.name, "stored": true, "replaced": replaced}),
    )
}

fn logout(profile: &Profile, out: &mut dyn Write) -> Result<()> {
    delete_token(&profile.name)?;
    info!(profile = %profile.name, "Deleted API token");
    emit(out, &json!({"profile": profile.name, "deleted": true}))
}

/// Execute an API command with `client`.
pub async fn execute(
    client: &JiraClient,
    command: Command,
    ctx: &CancellationToken,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Boards(command) => boards(client, command, ctx, out).await,
        Command::Sprints(command) => sprints(client, command, ctx, out).await,
        Command::Epics(command) => epics(client, command, ctx, out).await,
        Command::Backlog(BacklogCommand::Move { issues }) => {
            let (moved, response) = client
                .backlog()
                .move_issues_to(ctx, &IssueKeys::new(issues))
                .await?;
            emit_moved(out, moved, &response)
        }
        Command::Issues(command) => issues(client, command, ctx, out).await,
        Command::Login | Command::Logout => {
            Err(AppError::other("login and logout do not call the API"))
        }
    }
}

async fn boards(
    client: &JiraClient,
    command: BoardsCommand,
    ctx: &CancellationToken,
    out: &mut dyn Write,
) -> Result<()> {
    let boards = client.boards();
    match command {
        BoardsCommand::List {
            board_type,
            name,
            project,
            page,
        } => {
            let options = BoardsOptions {
                start_at: page.start_at,
                max_results: page.max_results,
                board_type: board_type.unwrap_or_default(),
                name: name.unwrap_or_default(),
                project_key_or_id: project.unwrap_or_default(),
                ..Default::default()
            };
            let (values, response) = boards.list(ctx, Some(&options)).await?;
            emit_page(out, &values, &response)
        }
        BoardsCommand::Get { id } => emit(out, &boards.get(ctx, id).await?.0),
        BoardsCommand::Config { id } => emit(out, &boards.get_configuration(ctx, id).await?.0),
        BoardsCommand::Sprints { id, state, page } => {
            let options = SprintsOptions {
                start_at: page.start_at,
                max_results: page.max_results,
                state: state.unwrap_or_default(),
            };
            let (values, response) = boards.list_sprints(ctx, id, Some(&options)).await?;
            emit_page(out, &values, &response)
        }
        BoardsCommand::Epics { id, done, page } => {
            let options = EpicsOptions {
                start_at: page.start_at,
                max_results: page.max_results,
                done,
            };
            let (values, response) = boards.list_epics(ctx, id, Some(&options)).await?;
            emit_page(out, &values, &response)
        }
        BoardsCommand::Backlog { id, filter } => {
            let (values, response) = boards
                .list_backlog_issues(ctx, id, Some(&filter.options()))
                .await?;
            emit_page(out, &values, &response)
        }
        BoardsCommand::Issues {
            id,
            epic,
            sprint,
            without_epic,
            filter,
        } => {
            let options = filter.options();
            let (values, response) = match (epic, sprint) {
                (Some(epic_id), _) => {
                    boards
                        .list_issues_for_epic(ctx, id, epic_id, Some(&options))
                        .await?
                }
                (None, Some(sprint_id)) => {
                    boards
                        .list_issues_for_sprint(ctx, id, sprint_id, Some(&options))
                        .await?
                }
                (None, None) if without_epic => {
                    boards
                        .list_issues_without_epic(ctx, id, Some(&options))
                        .await?
                }
                (None, None) => boards.list_issues(ctx, id, Some(&options)).await?,
            };
            emit_page(out, &values, &response)
        }
        BoardsCommand::Projects { id, page } => {
            let options = ProjectsOptions {
                start_at: page.start_at,
                max_results: page.max_results,
            };
            let (values, response) = boards.list_projects(ctx, id, Some(&options)).await?;
            emit_page(out, &values, &response)
        }
        BoardsCommand::Versions { id, released, page } => {
            let options = VersionsOptions {
                start_at: page.start_at,
                max_results: page.max_results,
                released: released.unwrap_or_default(),
            };
            let (values, response) = boards.list_versions(ctx, id, Some(&options)).await?;
            emit_page(out, &values, &response)
        }
        BoardsCommand::Create {
            name,
            board_type,
            filter_id,
        } => {
            let board = NewBoard {
                name,
                board_type,
                filter_id,
            };
            emit(out, &boards.create(ctx, &board).await?.0)
        }
        BoardsCommand::Delete { id } => {
            let response = boards.delete(ctx, id).await?;
            emit(out, &json!({"deleted": id, "status": response.status.as_u16()}))
        }
    }
}

async fn sprints(
    client: &JiraClient,
    command: SprintsCommand,
    ctx: &CancellationToken,
    out: &mut dyn Write,
) -> Result<()> {
    let sprints = client.sprints();
    match command {
        SprintsCommand::Get { id } => emit(out, &sprints.get(ctx, id).await?.0),
        SprintsCommand::Issues { id, filter } => {
            let (values, response) = sprints.list_issues(ctx, id, Some(&filter.options())).await?;
            emit_page(out, &values, &response)
        }
        SprintsCommand::Create {
            name,
            board_id,
            start,
            end,
            goal,
        } => {
            let sprint = NewSprint {
                name,
                start_date: start,
                end_date: end,
                board_id,
                goal: goal.unwrap_or_default(),
            };
            emit(out, &sprints.create(ctx, &sprint).await?.0)
        }
        SprintsCommand::Update {
            id,
            name,
            goal,
            state,
        } => {
            let changes = Sprint {
                name: name.unwrap_or_default(),
                goal: goal.unwrap_or_default(),
                state: state.unwrap_or_default(),
                ..Default::default()
            };
            emit(out, &sprints.partially_update(ctx, id, &changes).await?.0)
        }
        SprintsCommand::Move { id, issues } => {
            let (moved, response) = sprints
                .move_issues_to(ctx, id, &IssueKeys::new(issues))
                .await?;
            emit_moved(out, moved, &response)
        }
    }
}

async fn epics(
    client: &JiraClient,
    command: EpicsCommand,
    ctx: &CancellationToken,
    out: &mut dyn Write,
) -> Result<()> {
    let epics = client.epics();
    match command {
        EpicsCommand::Get { id_or_key } => emit(out, &epics.get(ctx, &id_or_key).await?.0),
        EpicsCommand::Issues { id_or_key, filter } => {
            let options = filter.options();
            let (values, response) = match id_or_key {
                Some(id_or_key) => epics.list_issues(ctx, &id_or_key, Some(&options)).await?,
                None => epics.list_issues_without_epic(ctx, Some(&options)).await?,
            };
            emit_page(out, &values, &response)
        }
        EpicsCommand::Update {
            id_or_key,
            name,
            summary,
            done,
        } => {
            let changes = Epic {
                name: name.unwrap_or_default(),
                summary: summary.unwrap_or_default(),
                done,
                ..Default::default()
            };
            emit(out, &epics.partially_update(ctx, &id_or_key, &changes).await?.0)
        }
        EpicsCommand::Move { id_or_key, issues } => {
            let (moved, response) = epics
                .move_issues_to(ctx, &id_or_key, &IssueKeys::new(issues))
                .await?;
            emit_moved(out, moved, &response)
        }
        EpicsCommand::Remove { issues } => {
            let (moved, response) = epics
                .remove_issues_from(ctx, &IssueKeys::new(issues))
                .await?;
            emit_moved(out, moved, &response)
        }
    }
}

async fn issues(
    client: &JiraClient,
    command: IssuesCommand,
    ctx: &CancellationToken,
    out: &mut dyn Write,
) -> Result<()> {
    let issues = client.issues();
    match command {
        IssuesCommand::Get {
            id_or_key,
            fields,
            expand,
        } => {
            let options = GetIssueOptions {
                fields: fields.unwrap_or_default(),
                expand: expand.unwrap_or_default(),
            };
            emit(out, &issues.get(ctx, &id_or_key, Some(&options)).await?.0)
        }
        IssuesCommand::Estimation { id_or_key, board } => emit(
            out,
            &issues.get_estimation_for_board(ctx, &id_or_key, board).await?.0,
        ),
        IssuesCommand::Estimate {
            id_or_key,
            board,
            value,
        } => emit(
            out,
            &issues
                .estimation_for_board(ctx, &id_or_key, board, &value)
                .await?
                .0,
        ),
    }
}

fn emit<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| AppError::other(format!("failed to print result: {}", e)))?;
    writeln!(out)?;
    Ok(())
}

fn emit_page<T: Serialize>(out: &mut dyn Write, values: &[T], response: &Response) -> Result<()> {
    emit(
        out,
        &json!({"pagination": response.pagination, "values": values}),
    )
}

fn emit_moved(out: &mut dyn Write, moved: bool, response: &Response) -> Result<()> {
    emit(
        out,
        &json!({"moved": moved, "status": response.status.as_u16()}),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::{base_path, issues_json, setup};
    use crate::config::Settings;
    use serial_test::serial;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("jira-agile").chain(args.iter().copied())).unwrap()
    }

    async fn output(client: &JiraClient, args: &[&str]) -> serde_json::Value {
        let mut out = Vec::new();
        execute(client, parse(args).command, &CancellationToken::new(), &mut out)
            .await
            .unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    fn config_with(names: &[&str]) -> Config {
        Config {
            settings: Settings::default(),
            profiles: names
                .iter()
                .map(|name| {
                    Profile::new(
                        name.to_string(),
                        format!("https://{}.atlassian.net", name),
                        "jdoe".to_string(),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = parse(&["boards", "get", "7", "--profile", "work"]);
        assert_eq!(cli.profile.as_deref(), Some("work"));
        assert!(matches!(cli.command, Command::Boards(BoardsCommand::Get { id: 7 })));
    }

    #[test]
    fn test_parse_logout() {
        let cli = parse(&["logout", "--profile", "work"]);
        assert!(matches!(cli.command, Command::Logout));
        assert_eq!(cli.profile.as_deref(), Some("work"));
    }

    #[test]
    fn test_logout_without_stored_token_fails() {
        let profile = Profile::new(
            "jira-agile-test-no-such-profile".to_string(),
            "https://jira.example.com".to_string(),
            "alice".to_string(),
        );
        let mut out = Vec::new();

        let err = logout(&profile, &mut out).unwrap_err();
        assert!(matches!(err, AppError::Api(ApiError::Keyring(_))));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_execute_rejects_keyring_commands() {
        let (_server, client) = setup().await;
        let mut out = Vec::new();
        let err = execute(&client, Command::Logout, &CancellationToken::new(), &mut out)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Other(_)));
    }

    #[test]
    fn test_parse_rejects_move_without_issues() {
        let result = Cli::try_parse_from(["jira-agile", "sprints", "move", "3"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_conflicting_issue_filters() {
        let result = Cli::try_parse_from([
            "jira-agile", "boards", "issues", "1", "--epic", "2", "--sprint", "3",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_issue_filter_options() {
        let cli = parse(&[
            "sprints", "issues", "4", "--jql", "assignee = me", "--max-results", "10",
        ]);
        let Command::Sprints(SprintsCommand::Issues { filter, .. }) = cli.command else {
            panic!("unexpected command");
        };
        let options = filter.options();
        assert_eq!(options.jql, "assignee = me");
        assert_eq!(options.max_results, 10);
        assert_eq!(options.start_at, 0);
    }

    #[test]
    #[serial]
    fn test_resolve_profile_from_flags() {
        let cli = parse(&[
            "--url", "https://jira.example.com", "--user", "alice", "boards", "get", "1",
        ]);
        let profile = resolve_profile(&cli, &Config::default()).unwrap();
        assert_eq!(profile.name, "default");
        assert_eq!(profile.api_base_url(), "https://jira.example.com/rest/agile/1.0/");
    }

    #[test]
    #[serial]
    fn test_resolve_profile_requires_url_and_user() {
        let cli = parse(&["--url", "https://jira.example.com", "boards", "get", "1"]);
        assert!(resolve_profile(&cli, &Config::default()).is_err());
    }

    #[test]
    #[serial]
    fn test_resolve_profile_from_config() {
        std::env::remove_var(crate::config::ENV_URL);
        std::env::remove_var(crate::config::ENV_USER);

        let config = config_with(&["work", "home"]);
        let cli = parse(&["--profile", "home", "boards", "get", "1"]);
        let profile = resolve_profile(&cli, &config).unwrap();
        assert_eq!(profile.url, "https://home.atlassian.net");

        let cli = parse(&["--profile", "other", "boards", "get", "1"]);
        let err = resolve_profile(&cli, &config).unwrap_err();
        assert!(err.to_string().contains("Profile 'other' not found"));
    }

    #[test]
    #[serial]
    fn test_resolve_profile_from_env() {
        std::env::set_var(crate::config::ENV_URL, "https://env.example.com");
        std::env::set_var(crate::config::ENV_USER, "bob");

        let cli = parse(&["boards", "get", "1"]);
        let profile = resolve_profile(&cli, &config_with(&["work"])).unwrap();
        assert_eq!(profile.username, "bob");

        std::env::remove_var(crate::config::ENV_URL);
        std::env::remove_var(crate::config::ENV_USER);
    }

    #[test]
    #[serial]
    fn test_password_from_env() {
        std::env::set_var(ENV_PASSWORD, "s3cret");
        let profile = Profile::new(
            "work".to_string(),
            "https://jira.example.com".to_string(),
            "alice".to_string(),
        );
        assert_eq!(password(&profile).unwrap(), "s3cret");
        std::env::remove_var(ENV_PASSWORD);
    }

    #[test]
    fn test_build_client_base_url() {
        let profile = Profile::new(
            "work".to_string(),
            "https://jira.example.com/".to_string(),
            "alice".to_string(),
        );
        let client = build_client(&profile, "pw", Duration::from_secs(5)).unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://jira.example.com/rest/agile/1.0/"
        );
    }

    #[tokio::test]
    async fn test_boards_list_prints_page() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board")))
            .and(query_param("type", "scrum"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "maxResults": 2, "startAt": 0, "isLast": false,
                "values": [{"id": 84, "name": "scrum board", "type": "scrum"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let value = output(&client, &["boards", "list", "--type", "scrum"]).await;
        assert_eq!(value["pagination"]["maxResults"], 2);
        assert_eq!(value["pagination"]["isLast"], false);
        assert_eq!(value["values"][0]["name"], "scrum board");
    }

    #[tokio::test]
    async fn test_boards_issues_for_sprint() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("board/1/sprint/2/issue")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(issues_json().into_bytes(), "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let value = output(&client, &["boards", "issues", "1", "--sprint", "2"]).await;
        assert_eq!(value["values"][0]["key"], "MCP-840");
    }

    #[tokio::test]
    async fn test_sprints_move_prints_outcome() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path(base_path("sprint/3/issue")))
            .and(body_json(serde_json::json!({"issues": ["MCP-1", "MCP-2"]})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let value = output(&client, &["sprints", "move", "3", "MCP-1", "MCP-2"]).await;
        assert_eq!(value, serde_json::json!({"moved": true, "status": 204}));
    }

    #[tokio::test]
    async fn test_sprints_update_sends_only_given_fields() {
        let (server, client) = setup().await;
        Mock::given(method("POST"))
            .and(path(base_path("sprint/3")))
            .and(body_json(serde_json::json!({"goal": "Ship it"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 3, "name": "Sprint 3", "goal": "Ship it", "state": "active"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let value = output(&client, &["sprints", "update", "3", "--goal", "Ship it"]).await;
        assert_eq!(value["goal"], "Ship it");
    }

    #[tokio::test]
    async fn test_epics_issues_without_key_lists_orphans() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("epic/none/issue")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(issues_json().into_bytes(), "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let value = output(&client, &["epics", "issues"]).await;
        assert_eq!(value["values"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_boards_delete() {
        let (server, client) = setup().await;
        Mock::given(method("DELETE"))
            .and(path(base_path("board/9")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let value = output(&client, &["boards", "delete", "9"]).await;
        assert_eq!(value, serde_json::json!({"deleted": 9, "status": 204}));
    }

    #[tokio::test]
    async fn test_remote_error_propagates() {
        let (server, client) = setup().await;
        Mock::given(method("GET"))
            .and(path(base_path("issue/NOPE-1")))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errorMessages": ["Issue does not exist or you do not have permission to see it."]
            })))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let err = execute(
            &client,
            parse(&["issues", "get", "NOPE-1"]).command,
            &CancellationToken::new(),
            &mut out,
        )
        .await
        .unwrap_err();

        assert!(matches!(&err, AppError::Api(e) if e.is_not_found()));
        assert!(out.is_empty());
    }
}
