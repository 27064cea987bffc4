use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use std::io::{self, Write};
use std::time::Instant;

const STATUS_COLUMN: usize = 72;

pub async fn run_all_migrations(url: &str) {
    let db = sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed");

    println!("Running migrations against {}", url.dimmed());
    let schema_manager = SchemaManager::new(&db);

    let migrations = <migration::Migrator as MigratorTrait>::migrations();
    let total = migrations.len();
    for migration in migrations {
        run_migration(&schema_manager, migration).await;
    }
    println!("{} {} migration(s) applied", "ok".green().bold(), total);
}

async fn run_migration(schema_manager: &SchemaManager<'_>, migration: Box<dyn MigrationTrait>) {
    let label = format!("Applying {}", migration.name().bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(label.len()));
    print!("{}{} ", label, dots);
    let _ = io::stdout().flush();

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(migration.up(schema_manager))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(())) => {
            let elapsed = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), elapsed);
        }
        Ok(Err(e)) => {
            println!("{}", "failed".red());
            eprintln!("  {}", e.to_string().red());
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "panicked".red());
            std::process::exit(1);
        }
    }
}
