//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigIssue, FileAccessConfig, FileConfig, FileGitHubConfig, FileLoggingConfig,
    FileRepositoryRule, FileResolverConfig, IssueSeverity,
};
pub use loader::ConfigLoader;
