// Service module exports

pub mod background;
pub mod conflict;
pub mod database;
pub mod history;
pub mod notification;
pub mod replay;
pub mod resolver;
pub mod session;
pub mod settings;
pub mod week_store;
