// Workweek Scheduler Library
// Weekly work/rest block scheduling engine: interval rules, undo history and week cache

pub mod models;
pub mod services;
pub mod utils;
