// Command handlers module
pub mod health;

pub use health::execute as health;
