use dbenv::{db, DbKey, DB};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "dbenvctl <command>\n\
     Commands:\n\
     - get <name|user|host>\n\
     - show\n\
     - ping\n\
     \n\
     Reads DB_NAME, DB_USER and DB_HOST (a local .env is loaded first).\n";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let Some(command) = args.get(1) else {
        eprint!("{USAGE}");
        return Ok(ExitCode::from(2));
    };

    match command.as_str() {
        "get" => {
            let Some(key) = args.get(2) else {
                eprintln!("usage: dbenvctl get <name|user|host>");
                return Ok(ExitCode::from(2));
            };
            match DB.get(key) {
                Ok(value) => {
                    println!("{value}");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        "show" => Ok(show()),
        "ping" => {
            ping().await?;
            Ok(ExitCode::SUCCESS)
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprint!("{USAGE}");
            Ok(ExitCode::from(2))
        }
    }
}

fn show() -> ExitCode {
    let mut failed = false;

    for key in DbKey::ALL {
        match DB.get_key(key) {
            Ok(value) => println!("{key} ({}) = {value}", key.env_var()),
            Err(e) => {
                failed = true;
                println!("{key} ({}) ! {e}", key.env_var());
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

async fn ping() -> anyhow::Result<()> {
    let pool = db::make_pool(&DB).await?;

    let one: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&pool).await?;
    anyhow::ensure!(one == 1, "unexpected reply to SELECT 1: {one}");

    println!("ping OK");
    pool.close().await;
    Ok(())
}
