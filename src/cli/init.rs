//! habit init command implementation
//!
//! Creates the data directory, its four data files and a default config.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::datadir::{self, DATA_DIR_NAME};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::storage::{self, FsBackend, CONFIG_FILE};

pub struct InitOptions {
    pub path: Option<PathBuf>,
    pub output: OutputOptions,
}

#[derive(serde::Serialize)]
struct InitReport {
    data_dir: PathBuf,
    created: Vec<String>,
}

pub fn run(options: InitOptions) -> Result<()> {
    let target = match options.path {
        Some(path) => path,
        None => std::env::current_dir()?.join(DATA_DIR_NAME),
    };
    let created_dir = !target.exists();
    let data_dir = datadir::ensure_dir(&target)?;

    let backend = FsBackend::new(&data_dir);
    let mut created: Vec<String> = storage::init_layout(&backend)?
        .into_iter()
        .map(|file| file.file_name().to_string())
        .collect();
    if ensure_config(&data_dir)? {
        created.push(CONFIG_FILE.to_string());
    }

    tracing::info!(path = %data_dir.display(), created = created.len(), "initialized data directory");

    let header = if created.is_empty() && !created_dir {
        "habit init: nothing to do".to_string()
    } else {
        "habit init: initialized data directory".to_string()
    };

    let mut human = HumanOutput::new(header);
    human.push_summary("data dir", data_dir.display().to_string());
    human.push_summary(
        "created",
        if created.is_empty() {
            "none".to_string()
        } else {
            created.join(", ")
        },
    );
    human.push_next_step(format!(
        "add habits to {}, one per line",
        backend.path(storage::DataFile::Habits).display()
    ));
    human.push_next_step("habit today");

    emit_success(
        options.output,
        "init",
        &InitReport { data_dir, created },
        Some(&human),
    )
}

fn ensure_config(data_dir: &Path) -> Result<bool> {
    let config_path = data_dir.join(CONFIG_FILE);
    if config_path.exists() {
        if !config_path.is_file() {
            return Err(Error::DataDirUnusable {
                path: config_path,
                reason: format!("{CONFIG_FILE} exists but is not a file"),
            });
        }
        return Ok(false);
    }

    Config::default().save(&config_path)?;
    Ok(true)
}
