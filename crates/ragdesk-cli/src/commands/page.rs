use super::{files, settings};
use anyhow::Result;
use ragdesk_application::RagdeskApp;
use ragdesk_core::navigation::PageHost;
use ragdesk_core::session::MessageRole;
use ragdesk_core::state::Page;

/// Prints the page header in place of an embedded view.
struct TerminalHost;

impl PageHost for TerminalHost {
    fn load(&mut self, page: Page, resource: &str) {
        println!("== {} ({})\n", page, resource);
    }
}

pub async fn run(app: &RagdeskApp, page: Page) -> Result<()> {
    let mut shell = RagdeskApp::navigation_shell(Box::new(TerminalHost));
    shell.switch_page(page);

    match shell.active_page() {
        Page::Chat => {
            let messages = app.sessions.active_messages().await;
            if messages.is_empty() {
                println!("No active conversation.");
            }
            for message in messages {
                let who = match message.role {
                    MessageRole::User => "you",
                    MessageRole::Bot => "bot",
                };
                println!("{}> {}\n", who, message.content);
            }
        }
        Page::Files => files::run(app, files::FilesAction::List { search: None }).await?,
        Page::RagMethods => {
            let catalog = app.catalog().await;
            let selected = catalog.selected();
            for d in catalog.list() {
                let marker = if d.id == selected.id() { "*" } else { " " };
                println!("{} {:<9} {:<6} {}", marker, d.id, d.category, d.full_name);
            }
        }
        Page::Settings => settings::run(app, settings::SettingsAction::Show).await?,
    }
    Ok(())
}
