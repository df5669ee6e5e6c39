//! Command implementations for taskctl

pub mod tasks;

use std::path::Path;

use anyhow::{Context, Result};
use taskstore::TaskStore;

use crate::config::{resolve_target, TaskctlConfig, Target};

/// Open the store from flag/env or config file.
pub async fn connect(database_url: Option<String>, config_path: Option<&Path>) -> Result<TaskStore> {
    let config = TaskctlConfig::load(config_path)?;
    let store = match resolve_target(database_url, config)? {
        Target::Descriptor(descriptor) => TaskStore::connect(&descriptor).await,
        Target::Config(config) => TaskStore::connect_with(&config).await,
    };
    store.context("Failed to connect to database")
}
