use anyhow::Result;
use clap::Subcommand;
use ragdesk_core::catalog::{RagCategory, RagMethodCatalog};

#[derive(Subcommand)]
pub enum MethodsAction {
    /// List retrieval methods in catalog order
    List {
        /// doc or query
        #[arg(long, short)]
        category: Option<RagCategory>,
    },
    /// Describe one method
    Show { id: String },
}

pub fn run(action: &MethodsAction) -> Result<()> {
    let catalog = RagMethodCatalog::default();
    match action {
        MethodsAction::List { category } => {
            let descriptors: Vec<_> = match category {
                Some(c) => catalog.by_category(*c).collect(),
                None => catalog.list().iter().collect(),
            };
            for d in descriptors {
                println!("{:<9} {:<6} {}", d.id, d.category, d.full_name);
            }
        }
        MethodsAction::Show { id } => {
            let d = catalog
                .get(id)
                .ok_or_else(|| anyhow::anyhow!("Unknown method: {}", id))?;
            println!("{} ({}) - {}", d.full_name, d.short_name, d.id);
            println!("{}\n", d.description);
            println!("适用场景: {}", d.usage_scenarios.join("、"));
            println!("示例文档: {}", d.example_documents.join("、"));
        }
    }
    Ok(())
}
