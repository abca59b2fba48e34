use anyhow::Result;
use clap::Subcommand;
use ragdesk_application::RagdeskApp;
use ragdesk_core::session::MessageRole;

#[derive(Subcommand)]
pub enum SessionsAction {
    /// List sessions, most recently updated first
    List,
    /// Start a new session and make it current
    New,
    /// Make a session current and print its messages
    Show { id: String },
    /// Rename a session; omit the title to restore the default
    Rename { id: String, title: Option<String> },
    Delete { id: String },
}

pub async fn run(app: &RagdeskApp, action: SessionsAction) -> Result<()> {
    match action {
        SessionsAction::List => {
            let current = app.sessions.current_session_id().await;
            for session in app.sessions.list_sessions().await {
                let marker = if current.as_deref() == Some(session.id.as_str()) {
                    "*"
                } else {
                    " "
                };
                println!(
                    "{} {}  {:<24} {} messages  {}",
                    marker,
                    session.id,
                    session.title,
                    session.messages.len(),
                    session.updated_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
        SessionsAction::New => {
            let session = app.sessions.new_session().await?;
            println!("{}", session.id);
        }
        SessionsAction::Show { id } => {
            for message in app.sessions.select(&id).await? {
                let who = match message.role {
                    MessageRole::User => "you",
                    MessageRole::Bot => "bot",
                };
                println!("{}> {}\n", who, message.content);
            }
        }
        SessionsAction::Rename { id, title } => {
            let session = app.sessions.rename(&id, title.as_deref()).await?;
            println!("{}", session.title);
        }
        SessionsAction::Delete { id } => {
            app.sessions.delete(&id).await?;
            println!("Deleted {}", id);
        }
    }
    Ok(())
}
