//! oxide-ddl CLI
//!
//! Command-line tool for inspecting SQLite schema definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlx::sqlite::SqlitePoolOptions;
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl::parse_ddl;
use oxide_ddl_sqlite::output::{read_input, to_json};
use oxide_ddl_sqlite::{Catalog, ObjectType};

/// Parse SQLite CREATE statements into structured schema descriptions.
#[derive(Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:db.sqlite3")]
    database: String,

    /// Schema to read from (`main`, `temp` or an attached database).
    #[arg(short, long, default_value = "main")]
    schema: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Indent JSON output.
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one CREATE statement without touching a database.
    Parse {
        /// File holding the statement (stdin if not specified).
        file: Option<PathBuf>,
    },

    /// List the objects in the schema.
    Objects {
        /// Only list objects of this type.
        #[arg(short = 't', long = "type", value_enum)]
        object_type: Option<ObjectType>,
    },

    /// Describe a table.
    Table {
        /// Table name.
        name: String,
    },

    /// Show the SELECT behind a view.
    View {
        /// View name.
        name: String,
    },

    /// Describe an index and its key columns.
    Index {
        /// Index name.
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let schema = cli.schema.as_str();
    let json = match cli.command {
        Commands::Parse { file } => {
            let sql = read_input(file.as_deref())?;
            to_json(&parse_ddl(&sql)?, cli.pretty)?
        }
        Commands::Objects { object_type } => {
            let catalog = connect(&cli.database).await?;
            to_json(&catalog.objects(schema, object_type).await?, cli.pretty)?
        }
        Commands::Table { name } => {
            let catalog = connect(&cli.database).await?;
            to_json(&catalog.describe_table(schema, &name).await?, cli.pretty)?
        }
        Commands::View { name } => {
            let catalog = connect(&cli.database).await?;
            to_json(&catalog.view_body(schema, &name).await?, cli.pretty)?
        }
        Commands::Index { name } => {
            let catalog = connect(&cli.database).await?;
            to_json(&catalog.describe_index(schema, &name).await?, cli.pretty)?
        }
    };
    println!("{json}");

    Ok(())
}

async fn connect(database: &str) -> anyhow::Result<Catalog> {
    debug!(database, "connecting");
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database)
        .await?;
    Ok(Catalog::new(pool))
}
