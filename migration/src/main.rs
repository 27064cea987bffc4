use std::{env, fs, path::Path};
use util::config;

mod runner;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let url = config::database_url();
    let db_file = config::database_file();
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("clean") => {
            remove_db_file(db_file.as_deref());
        }
        Some("fresh") => {
            remove_db_file(db_file.as_deref());
            create_db_dir(db_file.as_deref());
            runner::run_all_migrations(&url).await;
        }
        Some(other) => {
            eprintln!("Unknown command: {other}. Usage: migration [clean|fresh]");
            std::process::exit(2);
        }
        None => {
            create_db_dir(db_file.as_deref());
            runner::run_all_migrations(&url).await;
        }
    }
}

fn remove_db_file(path: Option<&Path>) {
    let Some(db_path) = path else {
        println!("In-memory database, nothing to delete");
        return;
    };
    if db_path.exists() {
        fs::remove_file(db_path).expect("Failed to delete DB file");
        println!("Deleted DB: {}", db_path.display());
    } else {
        println!("DB file does not exist: {}", db_path.display());
    }
}

fn create_db_dir(path: Option<&Path>) {
    if let Some(parent) = path.and_then(Path::parent) {
        fs::create_dir_all(parent).expect("Failed to create DB directory");
    }
}
