pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod fixes;
pub mod run;
