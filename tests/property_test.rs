// Property test entry point

mod fixtures;
mod property;
