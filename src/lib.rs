#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod graph;
pub mod ir;
pub mod layout;
pub mod layout_dump;

#[cfg(feature = "cli")]
pub use cli::run;
