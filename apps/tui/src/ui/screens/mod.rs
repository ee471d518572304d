pub mod dashboard;
pub mod error;
pub mod help;
pub mod loading;
