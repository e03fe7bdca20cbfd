use std::path::PathBuf;

use colored::Colorize;
use serde::{Deserialize, Deserializer};

pub mod config;
pub mod error;
pub mod export;
pub mod index;
pub mod join;
pub mod loader;

pub use error::ExportError;

pub const DEFAULT_MEMBERS_FILE: &str = "member.json";
pub const DEFAULT_ISSUES_FILE: &str = "issues.json";
pub const DEFAULT_OUTPUT_FILE: &str = "tasks.csv";

/// Records that know the key they are indexed under
pub trait MemberIndexKey {
    fn index(&self) -> String;
}

/// Decode a JSON `null` the same way as a missing field: the type's zero value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, serde::Deserialize, Hash, Eq, PartialEq)]
#[serde(default)]
pub struct Member {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub avatar: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_bot: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub display_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
}

/// A workspace account wrapping the member profile we actually care about
#[derive(Debug, Clone, Default, serde::Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct User {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub member: Member,
}

impl MemberIndexKey for User {
    fn index(&self) -> String {
        self.member.id.clone()
    }
}

#[derive(Debug, Clone, Default, serde::Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct Issue {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sort_order: i64,
    pub completed_at: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub estimate_point: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub priority: String,
    pub start_date: Option<String>,
    pub target_date: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub sequence_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub project_id: String,
    pub parent_id: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_by: String,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_by: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_draft: bool,
    pub archived_at: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub cycle_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub link_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub attachment_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sub_issues_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub label_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub assignee_ids: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub module_ids: Vec<String>,
    /// Filled in by the join, never read from the input
    #[serde(skip)]
    pub assignee: Option<Member>,
}

impl Issue {
    /// Display name of the resolved assignee, empty when nobody matched
    pub fn assignee_display_name(&self) -> &str {
        self.assignee
            .as_ref()
            .map(|m| m.display_name.as_str())
            .unwrap_or("")
    }
}

/// Where to read the inputs from and where to write the CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bootstrap {
    pub members: PathBuf,
    pub issues: PathBuf,
    pub output: PathBuf,
    pub quiet: bool,
}

impl Default for Bootstrap {
    fn default() -> Self {
        Self {
            members: PathBuf::from(DEFAULT_MEMBERS_FILE),
            issues: PathBuf::from(DEFAULT_ISSUES_FILE),
            output: PathBuf::from(DEFAULT_OUTPUT_FILE),
            quiet: false,
        }
    }
}

impl Bootstrap {
    /// Print a progress line unless we've been asked to keep quiet
    pub(crate) fn progress(&self, message: impl std::fmt::Display) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

/// What a successful run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output: PathBuf,
    pub rows: usize,
    pub sha256: String,
}

/// Run the whole pipeline: load, index, join, sort and export.
///
/// Both inputs are fully decoded before the output file is touched, so a bad
/// input leaves any existing CSV as it was.
pub fn run_export(bootstrap: &Bootstrap) -> Result<ExportSummary, ExportError> {
    bootstrap.progress(format!(
        "{} {}",
        "Loading members from".yellow(),
        bootstrap.members.display().to_string().white()
    ));
    let users: Vec<User> = loader::load_records(&bootstrap.members)?;
    let member_index = index::build_member_index(&users);
    bootstrap.progress(format!(
        "{} {} {}",
        "Indexed".green(),
        member_index.len().to_string().white(),
        "members".green()
    ));

    bootstrap.progress(format!(
        "{} {}",
        "Loading issues from".yellow(),
        bootstrap.issues.display().to_string().white()
    ));
    let mut issues: Vec<Issue> = loader::load_records(&bootstrap.issues)?;

    let resolved = join::assign_members(&mut issues, &member_index);
    bootstrap.progress(format!(
        "{} {} {} {}",
        "Resolved an assignee for".green(),
        resolved.to_string().white(),
        "of".green(),
        issues.len().to_string().white()
    ));
    join::sort_by_creator(&mut issues);

    let rows = export::write_tasks_csv(&bootstrap.output, &issues)?;
    let sha256 = export::file_sha256(&bootstrap.output)?;
    bootstrap.progress(format!(
        "{} {}: {} {} {}",
        "Successfully written file".green(),
        bootstrap.output.display().to_string().white(),
        "There were".green(),
        rows.to_string().white(),
        "entries".green()
    ));

    Ok(ExportSummary {
        output: bootstrap.output.clone(),
        rows,
        sha256,
    })
}
