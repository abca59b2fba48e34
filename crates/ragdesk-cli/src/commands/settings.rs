use anyhow::Result;
use clap::Subcommand;
use ragdesk_application::RagdeskApp;

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the effective settings as JSON
    Show,
    /// Set one option, e.g. `settings set chunk_size 800`
    Set { key: String, value: String },
    /// Restore defaults
    Reset,
}

pub async fn run(app: &RagdeskApp, action: SettingsAction) -> Result<()> {
    let settings = match action {
        SettingsAction::Show => app.settings.load().await?,
        SettingsAction::Set { key, value } => {
            app.settings
                .update(|s| s.set_field(&key, &value))
                .await?
        }
        SettingsAction::Reset => app.settings.reset().await?,
    };
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
