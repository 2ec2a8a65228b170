//! oxide-grammar CLI
//!
//! Compiles INSERT, DELETE, UPDATE and SELECT requests and prints or
//! executes them.

use clap::{Args, Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_grammar_mysql::{ExecutorConfig, Request, RequestKind, StatementExecutor};

/// Compile and run parameterized MySQL statements.
#[derive(Parser)]
#[command(name = "oxide-grammar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL.
    #[arg(short = 'u', long, env = "DATABASE_URL", default_value = "mysql://root@localhost:3306")]
    database_url: String,

    /// Maximum number of pooled connections.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,

    /// Execute the statements instead of printing them.
    #[arg(short, long)]
    execute: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// The table every statement kind targets.
#[derive(Args)]
struct Target {
    /// Database name.
    #[arg(short, long)]
    database: String,

    /// Table name.
    #[arg(short, long)]
    table: String,

    /// Allowed columns (comma separated); unrestricted when omitted.
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,
}

/// WHERE and LIMIT options for statements that match existing rows.
#[derive(Args)]
struct Conditions {
    /// Conditions as a JSON object: scalar compares, list means IN, null
    /// means IS NULL.
    #[arg(long)]
    filter: Option<String>,

    /// Row limit.
    #[arg(long)]
    limit: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert rows; list values expand into one row each.
    Insert {
        #[command(flatten)]
        target: Target,

        /// Column data as a JSON object.
        #[arg(long)]
        data: String,
    },

    /// Delete matching rows.
    Delete {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        conditions: Conditions,
    },

    /// Update matching rows.
    Update {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        conditions: Conditions,

        /// Assignments as a JSON object.
        #[arg(long)]
        data: String,
    },

    /// Select matching rows.
    Select {
        #[command(flatten)]
        target: Target,

        #[command(flatten)]
        conditions: Conditions,

        /// Selected columns (comma separated); `*` when omitted.
        #[arg(long, value_delimiter = ',')]
        columns: Vec<String>,

        /// ORDER BY terms such as `created_at:desc` (comma separated).
        #[arg(long, value_delimiter = ',')]
        order_by: Vec<String>,

        /// Row offset.
        #[arg(long)]
        offset: Option<u64>,
    },
}

fn request(target: Target) -> Request {
    Request {
        database: target.database,
        table: target.table,
        fields: target.fields,
        ..Request::default()
    }
}

fn conditional_request(target: Target, conditions: &Conditions) -> anyhow::Result<Request> {
    let mut req = request(target);
    if let Some(json) = conditions.filter.as_deref() {
        req.filter = Request::parse_object(json)?;
    }
    req.limit = conditions.limit;
    Ok(req)
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
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let (kind, req) = match cli.command {
        Commands::Insert { target, data } => {
            let mut req = request(target);
            req.data = Request::parse_object(&data)?;
            (RequestKind::Insert, req)
        }
        Commands::Delete { target, conditions } => (
            RequestKind::Delete,
            conditional_request(target, &conditions)?,
        ),
        Commands::Update {
            target,
            conditions,
            data,
        } => {
            let mut req = conditional_request(target, &conditions)?;
            req.data = Request::parse_object(&data)?;
            (RequestKind::Update, req)
        }
        Commands::Select {
            target,
            conditions,
            columns,
            order_by,
            offset,
        } => {
            let mut req = conditional_request(target, &conditions)?;
            req.columns = columns;
            req.order_by = order_by;
            req.offset = offset;
            (RequestKind::Select, req)
        }
    };

    let statements = req.compile(kind)?;
    info!(statements = statements.len(), "Compiled request");

    let config = ExecutorConfig::new(cli.database_url)
        .max_connections(cli.max_connections)
        .dry_run(!cli.execute);
    let executor = StatementExecutor::connect(&config).await?;

    if kind == RequestKind::Select {
        let rows = executor.fetch_all(statements).await?;
        if !executor.is_dry_run() {
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    } else {
        let affected = executor.execute(statements).await?;
        if !executor.is_dry_run() {
            info!(affected, "Done");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_has_no_conditions() {
        let args = [
            "oxide-grammar",
            "insert",
            "-d",
            "db",
            "-t",
            "t",
            "--data",
            r#"{"a": 1}"#,
            "--filter",
            r#"{"id": 1}"#,
        ];
        assert!(Cli::try_parse_from(args).is_err());
        assert!(Cli::try_parse_from(&args[..8]).is_ok());
    }

    #[test]
    fn test_delete_conditions_reach_request() {
        let cli = Cli::try_parse_from([
            "oxide-grammar",
            "delete",
            "-d",
            "db",
            "-t",
            "t",
            "--filter",
            r#"{"id": [1, 2]}"#,
            "--limit",
            "2",
        ])
        .unwrap();
        let Commands::Delete { target, conditions } = cli.command else {
            panic!("expected delete");
        };
        let req = conditional_request(target, &conditions).unwrap();
        assert_eq!(req.limit, Some(2));
        assert_eq!(
            req.compile(RequestKind::Delete).unwrap().pop().unwrap().sql(),
            "DELETE FROM db.t WHERE `id` IN (?,?) LIMIT 2"
        );
    }
}
