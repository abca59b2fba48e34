pub mod chat;
pub mod files;
pub mod index;
pub mod methods;
pub mod page;
pub mod sessions;
pub mod settings;
