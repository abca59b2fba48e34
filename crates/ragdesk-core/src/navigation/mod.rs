//! Page switching and the cross-context message channel.

mod message;
mod shell;

pub use message::{InboundMessage, NavigationMessage};
pub use shell::{NavigationShell, PageHost};
