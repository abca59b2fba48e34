use anyhow::Result;
use clap::Subcommand;
use ragdesk_application::{DeleteOutcome, RagdeskApp};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum FilesAction {
    /// List uploaded files
    List {
        /// Case-insensitive name filter
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Re-fetch the catalog and print the file count
    Refresh,
    /// Upload a document (.txt .md .csv .pdf .doc .docx .xls .xlsx)
    Upload { path: PathBuf },
    /// Delete files; indexed files lose their index too
    Delete {
        names: Vec<String>,
        /// Delete every file matching --search (or all files)
        #[arg(long)]
        all: bool,
        #[arg(long, short)]
        search: Option<String>,
    },
}

pub async fn run(app: &RagdeskApp, action: FilesAction) -> Result<()> {
    match action {
        FilesAction::List { search } => {
            app.registry.refresh().await?;
            if let Some(query) = search {
                app.registry.set_search(&query).await;
            }
            let snapshot = app.registry.snapshot().await;
            if snapshot.filtered.is_empty() {
                println!("No files.");
            }
            for record in &snapshot.filtered {
                let mark = if record.indexed { "indexed" } else { "-" };
                println!("{:<40} {:>10}  {}", record.name, record.display_size(), mark);
            }
        }
        FilesAction::Refresh => {
            let count = app.registry.refresh().await?;
            println!("{} files", count);
        }
        FilesAction::Upload { path } => {
            let response = app.registry.upload(&path).await?;
            println!("Uploaded {} ({} bytes)", response.filename, response.size);
        }
        FilesAction::Delete { names, all, search } => {
            app.registry.refresh().await?;
            if let Some(query) = search {
                app.registry.set_search(&query).await;
            }
            if all {
                app.registry.set_select_all(true).await;
            }
            for name in &names {
                if !app.registry.toggle(name).await {
                    eprintln!("Skipping unknown file: {}", name);
                }
            }

            let selected = app.registry.selected_names().await;
            if selected.is_empty() {
                println!("Nothing selected.");
                return Ok(());
            }
            match app.index.delete_files(&selected).await? {
                DeleteOutcome::Cancelled => println!("Cancelled."),
                DeleteOutcome::Deleted(summary) => println!("{}", summary),
            }
        }
    }
    Ok(())
}
