//! staffctl - command line front end for the staff administration API
//!
//! Every subcommand goes through the same store a UI would use and prints the
//! resulting records as JSON lines on stdout. Logs go to stderr.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::{Entity, ParseFieldError, Sortable};
use staff_client::view::{EmployeeDraft, SearchQuery, SortDirection, SortState, sorted};
use staff_client::{
    Attachment, ClientConfig, Command, EmployeeStore, RestApi, Settlement, StaffDirectory, Store,
    logger,
};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::task::JoinHandle;

#[derive(Parser)]
#[command(name = "staffctl", version, about = "Hospital staff administration client")]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Also write daily rotated log files into this directory
    #[arg(long, env = "LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    resource: Resource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Resource {
    /// Employee records
    Employees {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Medical staff accounts
    MedicalStaff {
        #[command(subcommand)]
        command: EntityCommand,
    },
    /// Departments
    Departments {
        #[command(subcommand)]
        command: EntityCommand,
    },
    /// Positions
    Positions {
        #[command(subcommand)]
        command: EntityCommand,
    },
}

#[derive(Subcommand)]
enum EntityCommand {
    /// List all records
    List {
        /// Column to sort by
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,
    },
    /// Show one record
    Get { id: i64 },
    /// Server-side search on one field
    Search { field: String, value: String },
    /// Create a record from inline JSON or `@path/to/file.json`
    Create {
        json: String,
        /// File sent as the multipart `file` part
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Replace a record from inline JSON or `@path/to/file.json`
    Update { id: i64, json: String },
    /// Delete a record
    Delete { id: i64 },
}

#[derive(Subcommand)]
enum EmployeeCommand {
    #[command(flatten)]
    Entity(EntityCommand),
    /// Upload a profile image and print its URL
    UploadImage { path: PathBuf },
    /// Change some fields of an employee, optionally replacing the profile image
    Edit {
        id: i64,
        /// Fields to change, inline JSON object or `@path/to/file.json`
        #[arg(long)]
        set: Option<String>,
        /// New profile image, uploaded before the record is saved
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    logger::init_logger(
        &cli.log_level,
        cli.log_format == LogFormat::Json,
        cli.log_dir.as_deref(),
    )?;

    let config = ClientConfig::from_env();
    let directory = StaffDirectory::new(&config).context("failed to build HTTP client")?;

    match cli.resource {
        Resource::Employees { command } => match command {
            EmployeeCommand::Entity(command) => run(&directory.employees, command).await,
            EmployeeCommand::UploadImage { path } => {
                let store = &directory.employees;
                let attachment = Attachment::from_path(&path)
                    .await
                    .with_context(|| format!("failed to read {}", path.display()))?;
                settle(store.upload_image(attachment)).await?;
                if let Some(url) = store.with_state(|s| s.image_upload_url().map(str::to_string)) {
                    println!("{}", url);
                }
                Ok(())
            }
            EmployeeCommand::Edit { id, set, image } => {
                edit_employee(&directory.employees, id, set, image).await
            }
        },
        Resource::MedicalStaff { command } => run(&directory.medical_staff, command).await,
        Resource::Departments { command } => run(&directory.departments, command).await,
        Resource::Positions { command } => run(&directory.positions, command).await,
    }
}

async fn run<E>(store: &Store<E, RestApi<E>>, command: EntityCommand) -> anyhow::Result<()>
where
    E: Sortable,
    E::Input: DeserializeOwned,
    E::SearchField: FromStr<Err = ParseFieldError>,
    E::SortField: FromStr<Err = ParseFieldError>,
{
    match command {
        EntityCommand::List { sort, desc } => {
            settle(store.dispatch(Command::FetchAll)).await?;
            let items = store.with_state(|s| s.items.clone());
            let items = match sort {
                Some(field) => {
                    let field: E::SortField = field.parse()?;
                    let direction = if desc {
                        SortDirection::Descending
                    } else {
                        SortDirection::Ascending
                    };
                    sorted(&items, &SortState { field, direction })
                }
                None => items,
            };
            print_records(&items)
        }
        EntityCommand::Get { id } => {
            settle(store.dispatch(Command::FetchOne(id))).await?;
            let selected = store.with_state(|s| s.selected.clone());
            print_records(selected.as_slice())
        }
        EntityCommand::Search { field, value } => {
            if !E::SEARCHABLE {
                bail!("`{}` has no search endpoint", E::RESOURCE);
            }
            let condition = SearchQuery::parse(field.parse::<E::SearchField>()?, &value)?;
            settle(store.dispatch(Command::Search(condition))).await?;
            print_records(&store.with_state(|s| s.items.clone()))
        }
        EntityCommand::Create { json, file } => {
            let input: E::Input = read_input(&json).await?;
            let attachment = match file {
                Some(path) => Some(
                    Attachment::from_path(&path)
                        .await
                        .with_context(|| format!("failed to read {}", path.display()))?,
                ),
                None => None,
            };
            settle(store.dispatch(Command::Create { input, attachment })).await?;
            let created = store.with_state(|s| s.items.last().cloned());
            print_records(created.as_slice())
        }
        EntityCommand::Update { id, json } => {
            let input: E::Input = read_input(&json).await?;
            settle(store.dispatch(Command::Update { id, input })).await?;
            // the store starts empty, so read the record back
            settle(store.dispatch(Command::FetchOne(id))).await?;
            let selected = store.with_state(|s| s.selected.clone());
            print_records(selected.as_slice())
        }
        EntityCommand::Delete { id } => {
            settle(store.dispatch(Command::Delete(id))).await?;
            println!("{}", serde_json::json!({ "deleted": id }));
            Ok(())
        }
    }
}

/// Load the record into a draft, apply the changes and save it back
async fn edit_employee(
    store: &EmployeeStore,
    id: i64,
    set: Option<String>,
    image: Option<PathBuf>,
) -> anyhow::Result<()> {
    settle(store.dispatch(Command::FetchOne(id))).await?;
    let record = store
        .with_state(|s| s.selected.clone())
        .with_context(|| format!("employee {} was not returned", id))?;
    let mut draft = EmployeeDraft::edit(&record);

    if let Some(set) = set {
        let changes: serde_json::Value = read_input(&set).await?;
        draft.input = overlay(&draft.input, changes)?;
    }
    if let Some(path) = image {
        let attachment = Attachment::from_path(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        settle(store.upload_image(attachment)).await?;
        store.with_state(|s| draft.merge_uploaded_image(s));
    }

    settle(store.dispatch(draft.into_update_command(id))).await?;
    let selected = store.with_state(|s| s.selected.clone());
    print_records(selected.as_slice())
}

/// Replace the fields of `base` named in `changes`
fn overlay<T: Serialize + DeserializeOwned>(
    base: &T,
    changes: serde_json::Value,
) -> anyhow::Result<T> {
    let mut value = serde_json::to_value(base)?;
    match (value.as_object_mut(), changes) {
        (Some(fields), serde_json::Value::Object(changes)) => fields.extend(changes),
        _ => bail!("fields to change must be a JSON object"),
    }
    serde_json::from_value(value).context("invalid field values")
}

/// Wait for a worker and turn its settlement into a result
async fn settle(handle: JoinHandle<Settlement>) -> anyhow::Result<()> {
    match handle.await.context("worker task aborted")? {
        Settlement::Succeeded => Ok(()),
        Settlement::Failed(message) => bail!(message),
        Settlement::Superseded => bail!("request was superseded by a newer one"),
    }
}

/// Inline JSON, or `@path` to read it from a file
async fn read_input<T: DeserializeOwned>(arg: &str) -> anyhow::Result<T> {
    let text = match arg.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(Path::new(path))
            .await
            .with_context(|| format!("failed to read {}", path))?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text).context("invalid JSON payload")
}

fn print_records<E: Entity>(records: &[E]) -> anyhow::Result<()> {
    for record in records {
        println!("{}", serde_json::to_string(record)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use shared::EmployeeInput;

    #[test]
    fn test_overlay_replaces_only_named_fields() {
        let base = EmployeeInput {
            name: Some("Kim".into()),
            department: Some("ICU".into()),
            ..Default::default()
        };
        let edited = overlay(&base, json!({"department": "ER"})).unwrap();
        assert_eq!(edited.name.as_deref(), Some("Kim"));
        assert_eq!(edited.department.as_deref(), Some("ER"));
    }

    #[test]
    fn test_overlay_rejects_non_object() {
        let base = EmployeeInput::default();
        assert!(overlay(&base, json!(["name"])).is_err());
    }
}
