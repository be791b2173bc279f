//! `essays` command-line binary.
//!
//! Reads `essays.toml` (or the path given with `--config`) plus `ESSAYS_*`
//! environment variables, opens the SQLite database and runs one pipeline.

use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use essay_core::store::RecordStore;
use essay_pipeline::{
  AssumeYes, Augmenter, BackupOutcome, Confirm, OpLog, PipelineConfig, RestoreOutcome,
  StdinConfirm, backup, collect, ingest, maintain, remove,
};
use essay_store_sqlite::SqliteStore;
use essay_text::Normalizer;

#[derive(Parser)]
#[command(author, version, about = "Essay corpus preparation pipeline")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "essays.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Populate the table from the dataset folder.
  Ingest,
  /// Add summaries and keywords to every row.
  Augment {
    /// Skip populating the table first.
    #[arg(long)]
    no_ingest: bool,
  },
  /// Resolve duplicates, prune empty columns and write a health report.
  Maintain {
    /// Answer yes to every prompt.
    #[arg(short, long)]
    yes: bool,
  },
  /// Copy the database into the backup folder.
  Backup,
  /// Copy a backup over the database.
  Restore {
    backup: PathBuf,
    /// Delete the backup file after restoring.
    #[arg(long)]
    delete_backup: bool,
    #[arg(short, long)]
    yes: bool,
  },
  /// Delete the database file.
  Remove {
    #[arg(short, long)]
    yes: bool,
  },
  /// Gather documents from the source folders into the dataset folder.
  Collect,
  /// Print every row of the table.
  Show {
    #[arg(long)]
    json: bool,
  },
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
  if yes { Box::new(AssumeYes) } else { Box::new(StdinConfirm) }
}

fn open_store(cfg: &PipelineConfig) -> anyhow::Result<SqliteStore> {
  if let Some(parent) = cfg.database_path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {}", parent.display()))?;
  }
  SqliteStore::open(&cfg.database_path)
    .with_context(|| format!("failed to open database at {:?}", cfg.database_path))
}

fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = PipelineConfig::load(&cli.config)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;
  let log = OpLog::new(&cfg.log_path);

  match cli.command {
    Command::Ingest => {
      let store = open_store(&cfg)?;
      let report = ingest::ingest(&store, &cfg.table, &cfg.dataset_dir, &Normalizer::english())
        .context("ingestion failed")?;
      println!("Inserted {} of {} documents.", report.inserted, report.read);
    }

    Command::Augment { no_ingest } => {
      let store = open_store(&cfg)?;
      if !no_ingest {
        ingest::ingest(&store, &cfg.table, &cfg.dataset_dir, &Normalizer::english())
          .context("ingestion failed")?;
      }
      let report = Augmenter::from_config(&cfg)
        .run(&store, &cfg.table, &cfg.dataset_dir)
        .context("augmentation failed")?;
      tracing::info!(?report, "augmented");
      println!("{}", store.retrieve_all(&cfg.table)?);
    }

    Command::Maintain { yes } => {
      let store = open_store(&cfg)?;
      let report = maintain::run(&store, &cfg.table, &cfg.database_path, &mut *confirmer(yes));
      println!("{report}");

      let path = cfg.health_report_path();
      if let Err(e) = report.append_to(&path) {
        tracing::warn!(path = %path.display(), error = %e, "failed to write health report");
      }
    }

    Command::Backup => {
      if let BackupOutcome::Created(path) = backup::backup(&cfg.database_path, &cfg.backup_dir, &log)? {
        println!("{}", path.display());
      }
    }

    Command::Restore { backup: backup_file, delete_backup, yes } => {
      let outcome = backup::restore(
        &backup_file,
        &cfg.database_path,
        delete_backup,
        &mut *confirmer(yes),
        &log,
      )?;
      if outcome == RestoreOutcome::Declined {
        println!("Restore cancelled.");
      }
    }

    Command::Remove { yes } => {
      let outcome = remove::remove_database(&cfg.database_path, &mut *confirmer(yes), &log);
      tracing::debug!(?outcome, "remove finished");
    }

    Command::Collect => {
      let report = collect::collect(&cfg.source_dirs, &cfg.dataset_dir, &log)
        .context("failed to collect documents")?;
      println!("Copied {} documents.", report.copied.len());
    }

    Command::Show { json } => {
      let store = open_store(&cfg)?;
      let table = store.retrieve_all(&cfg.table)?;
      if json {
        println!("{}", serde_json::to_string_pretty(&table.to_json()?)?);
      } else {
        println!("{table}");
      }
    }
  }

  Ok(())
}
