use anyhow::Result;
use clap::Args;
use ragdesk_application::{DropReason, RagdeskApp, SendOutcome};

#[derive(Args)]
pub struct ChatArgs {
    /// Message text
    pub text: String,
    /// Retrieval method id, e.g. option7
    #[arg(long, short)]
    pub method: Option<String>,
    /// Ask the backend to polish the answer
    #[arg(long)]
    pub polish: bool,
    /// Session to continue (defaults to the current one)
    #[arg(long, short)]
    pub session: Option<String>,
}

pub async fn run(app: &RagdeskApp, args: ChatArgs) -> Result<()> {
    if let Some(id) = &args.session {
        app.sessions.select(id).await?;
    }
    if let Some(method) = &args.method {
        app.select_method(method).await?;
    }

    match app.send(&args.text, args.polish).await? {
        SendOutcome::Dropped(DropReason::EmptyText) => println!("Nothing to send."),
        SendOutcome::Dropped(DropReason::AlreadySending) => {
            println!("A reply is still pending for this session.")
        }
        SendOutcome::Replied { reply, .. } | SendOutcome::Failed { reply, .. } => {
            println!("{}", reply.content)
        }
    }
    Ok(())
}
