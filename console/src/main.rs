//! Command-line shell over the fish registry.
//!
//! Each invocation mounts a page against the chosen backend, runs one flow
//! through the table (add, edit or delete) and prints the resulting table.

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use fish_core::{
    render,
    table::{ADD_DESCRIPTION, ADD_TITLE, DELETE_TITLE, EDIT_TITLE},
    FishApiClient, FishPage, FishTable, FormField, HttpFishApi, InMemoryFishApi, DEFAULT_BASE_URL,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fish-console", about = "Manage the fish registry")]
struct Cli {
    /// Storage backend to talk to.
    #[arg(long, value_enum, default_value_t = Backend::Remote)]
    backend: Backend,

    /// Base URL of the fish API (remote backend only).
    #[arg(long, env = "FISH_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Backend {
    /// Seeded, process-local store.
    Memory,
    /// REST endpoint at --base-url.
    Remote,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the registry.
    List,
    /// Print one record.
    Get { id: String },
    /// Add a record.
    Add(FieldArgs),
    /// Change fields of an existing record.
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a record.
    Delete { id: String },
}

#[derive(Debug, Args)]
struct FieldArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    species: Option<String>,
    #[arg(long = "length")]
    length_in_cm: Option<String>,
    #[arg(long = "weight")]
    weight_in_kg: Option<String>,
}

impl FieldArgs {
    fn values(&self) -> [(FormField, Option<&String>); 4] {
        [
            (FormField::Name, self.name.as_ref()),
            (FormField::Species, self.species.as_ref()),
            (FormField::LengthInCm, self.length_in_cm.as_ref()),
            (FormField::WeightInKg, self.weight_in_kg.as_ref()),
        ]
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api: Box<dyn FishApiClient> = match cli.backend {
        Backend::Memory => Box::new(InMemoryFishApi::seeded()),
        Backend::Remote => Box::new(HttpFishApi::new(&cli.base_url)),
    };
    debug!(backend = ?cli.backend, base_url = %cli.base_url, "starting");

    let mut page = FishPage::new(api);
    let mut table = FishTable::new();
    page.mount().await;

    match cli.command {
        Command::List => {}
        Command::Get { id } => {
            print!("{}", show(page.api(), &id).await?);
            return Ok(());
        }
        Command::Add(fields) => {
            table.open_add()?;
            println!("{ADD_TITLE}: {ADD_DESCRIPTION}");
            let form = table.add_form_mut().context("add dialog is not editable")?;
            for (field, value) in fields.values() {
                if let Some(value) = value {
                    form.set(field, value.as_str());
                }
            }
            let created = table.submit_add(&mut page).await?;
            println!("Added {} ({})", created.name, created.id);
        }
        Command::Edit { id, fields } => {
            let fish = find(&page, &id)?;
            table.open_edit(&fish)?;
            if let Some(description) = table.edit_description() {
                println!("{EDIT_TITLE}: {description}");
            }
            let form = table.edit_form_mut().context("edit dialog is not editable")?;
            for (field, value) in fields.values() {
                if let Some(value) = value {
                    form.set(field, value.as_str());
                }
            }
            let updated = table.submit_edit(&mut page).await?;
            println!("Updated {} ({})", updated.name, updated.id);
        }
        Command::Delete { id } => {
            let fish = find(&page, &id)?;
            table.open_delete(&fish)?;
            if let Some(description) = table.delete_description() {
                println!("{DELETE_TITLE} {description}");
            }
            table.confirm_delete(&mut page).await?;
            println!("Deleted {} ({})", fish.name, fish.id);
        }
    }

    println!();
    print!("{}", render(page.fish()));
    Ok(())
}

/// One record fetched from the backend, rendered as a single-row table.
async fn show<C: FishApiClient>(api: &C, id: &str) -> anyhow::Result<String> {
    let fish = api
        .get_by_id(id)
        .await?
        .ok_or_else(|| anyhow!("no fish with id {id}"))?;
    Ok(render(std::slice::from_ref(&fish)))
}

fn find<C: FishApiClient>(page: &FishPage<C>, id: &str) -> anyhow::Result<fish_core::Fish> {
    page.fish()
        .iter()
        .find(|f| f.id == id)
        .cloned()
        .ok_or_else(|| anyhow!("no fish with id {id}"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn edit_accepts_partial_fields() {
        let cli = Cli::try_parse_from([
            "fish-console",
            "--backend",
            "memory",
            "edit",
            "1",
            "--name",
            "Nemo Jr.",
        ])
        .unwrap();
        let Command::Edit { id, fields } = cli.command else {
            panic!("expected edit");
        };
        assert_eq!(id, "1");
        assert_eq!(fields.name.as_deref(), Some("Nemo Jr."));
        assert!(fields.species.is_none());
    }

    #[tokio::test]
    async fn show_renders_one_row() {
        let api = InMemoryFishApi::seeded();
        let out = show(&api, "2").await.unwrap();
        assert!(out.contains("Dory"));
        assert!(out.contains("Blue Tang"));
        assert!(!out.contains("Nemo"));
        assert!(!out.contains("Fish {"));
    }

    #[tokio::test]
    async fn show_unknown_id_fails() {
        let api = InMemoryFishApi::seeded();
        let err = show(&api, "42").await.unwrap_err();
        assert_eq!(err.to_string(), "no fish with id 42");
    }
}
