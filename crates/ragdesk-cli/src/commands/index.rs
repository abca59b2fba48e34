use anyhow::Result;
use clap::Subcommand;
use ragdesk_application::RagdeskApp;

#[derive(Subcommand)]
pub enum IndexAction {
    /// Build indexes for the named files
    Create {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Remove indexes of the named files (the files are kept)
    Delete {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

pub async fn run(app: &RagdeskApp, action: IndexAction) -> Result<()> {
    app.registry.refresh().await?;
    match action {
        IndexAction::Create { names } => {
            let report = app.index.create_index(&names).await?;
            for name in &report.indexed {
                println!("indexed  {}", name);
            }
            for failure in &report.failed {
                println!("failed   {} ({})", failure.filename, failure.reason);
            }
        }
        IndexAction::Delete { names } => {
            let cleared = app.index.delete_index(&names).await?;
            println!("Cleared index for {} files", cleared.len());
        }
    }
    Ok(())
}
