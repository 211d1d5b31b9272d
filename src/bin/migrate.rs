use anime_schedule_bot::database::connection::{sqlite_file_path, DatabaseManager, DEFAULT_DATABASE_URL};
use anime_schedule_bot::database::models::CustomListEntry;
use anime_schedule_bot::storage::{JsonFileStorage, ListStorage, SqliteListStorage};
use anyhow::{anyhow, Result};
use std::env;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize basic logging for the migration
    tracing_subscriber::fmt::init();

    dotenvy::dotenv().ok();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    match command {
        "migrate" | "up" => run_migrations().await.map(|_| ()),
        "check" => check_database().await,
        "import" => {
            let source = args
                .get(2)
                .map(|s| s.as_str())
                .unwrap_or(anime_schedule_bot::config::DEFAULT_CUSTOM_LISTS_FILE);
            import_json(source).await
        }
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

fn database_url() -> String {
    env::var("DATABASE_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

async fn run_migrations() -> Result<DatabaseManager> {
    println!("📺 Anime Schedule Bot - Database Migration Tool");
    println!("================================================");

    let database_url = database_url();
    println!("📊 Database URL: {}", mask_url(&database_url));
    println!("🚀 Running database migrations...");

    let db_manager = DatabaseManager::new(&database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match db_manager.run_migrations().await {
        Ok(_) => println!("✅ Migrations completed successfully!"),
        Err(e) => {
            eprintln!("❌ Migration failed: {e}");
            std::process::exit(1);
        }
    }

    Ok(db_manager)
}

async fn check_database() -> Result<()> {
    println!("🔍 Checking database connection and schema...");

    let database_url = database_url();
    println!("📊 Database URL: {}", mask_url(&database_url));

    let db_manager = DatabaseManager::new(&database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))?;

    match check_tables(&db_manager).await {
        Ok(tables) => {
            println!("✅ Database connection successful!");
            println!("📋 Found tables:");
            for table in tables {
                println!("  • {table}");
            }
            match CustomListEntry::count_users(&db_manager.pool).await {
                Ok(users) => println!("👥 Users with custom lists: {users}"),
                Err(e) => println!("⚠️  Could not count custom lists: {e}"),
            }
        }
        Err(e) => {
            println!("⚠️  Database check failed: {e}");
            println!("💡 Try running 'migrate up' to create the schema");
        }
    }

    Ok(())
}

async fn import_json(source: &str) -> Result<()> {
    if !Path::new(source).exists() {
        return Err(anyhow!("Custom lists file not found: {}", source));
    }

    let document = JsonFileStorage::new(source).load_all().await?;
    let db_manager = run_migrations().await?;
    let storage = SqliteListStorage::new(db_manager);

    println!("📥 Importing {} custom lists from {}...", document.len(), source);

    let mut titles_imported = 0usize;
    for (user_id, titles) in &document {
        storage.save(user_id, titles).await?;
        titles_imported += titles.len();
    }

    println!(
        "✅ Imported {} titles for {} users",
        titles_imported,
        document.len()
    );
    Ok(())
}

async fn check_tables(db_manager: &DatabaseManager) -> Result<Vec<String>> {
    let tables = sqlx::query_scalar::<_, String>(
        "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
    )
    .fetch_all(&db_manager.pool)
    .await?;

    Ok(tables)
}

fn mask_url(url: &str) -> String {
    // Only show the file name of local database paths
    match sqlite_file_path(url).and_then(|path| Path::new(path).file_name()) {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("📺 Anime Schedule Bot - Database Migration Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up      Run database migrations (default)");
    println!("    check            Check database connection and schema");
    println!("    import [FILE]    Copy a JSON custom lists file into the database");
    println!("    help             Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: {DEFAULT_DATABASE_URL})");
    println!();
    println!("EXAMPLES:");
    println!("    migrate                           # Run migrations");
    println!("    migrate check                     # Check database status");
    println!("    migrate import custom_lists.json  # Move lists from JSON to SQLite");
    println!();
}
