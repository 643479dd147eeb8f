//! Standalone web server for the browser game.
//!
//! Usage: cargo run -p rochambeau_web --bin rochambeau-web-server -- [OPTIONS]

use rochambeau_web::{ServerConfig, WebServer};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

struct Args {
    host: String,
    port: u16,
    static_dir: Option<PathBuf>,
}

enum Parsed {
    Run(Args),
    Help,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Parsed, String> {
    let mut parsed = Args {
        host: DEFAULT_HOST.to_string(),
        port: DEFAULT_PORT,
        static_dir: None,
    };

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--host" | "-h" => {
                parsed.host = args.next().ok_or("--host requires a value")?;
            }
            "--port" | "-p" => {
                let value = args.next().ok_or("--port requires a value")?;
                parsed.port = value
                    .parse()
                    .map_err(|_| format!("invalid port number: {value}"))?;
            }
            "--static-dir" | "-d" => {
                let value = args.next().ok_or("--static-dir requires a value")?;
                parsed.static_dir = Some(PathBuf::from(value));
            }
            "--help" => return Ok(Parsed::Help),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(Parsed::Run(parsed))
}

/// Looks for `static/` from the workspace root or the crate directory.
fn find_static_dir() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    [
        cwd.join("rust").join("web").join("static"),
        cwd.join("static"),
    ]
    .into_iter()
    .find(|p| p.is_dir())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    rochambeau_web::init_logging()?;

    let args = match parse_args(std::env::args()) {
        Ok(Parsed::Run(args)) => args,
        Ok(Parsed::Help) => {
            print_help();
            return Ok(());
        }
        Err(message) => {
            eprintln!("Error: {message}");
            print_help();
            std::process::exit(2);
        }
    };

    let Some(static_dir) = args.static_dir.or_else(find_static_dir) else {
        eprintln!("Error: could not find the static directory (tried rust/web/static, static).");
        eprintln!("Please specify it with --static-dir");
        std::process::exit(2);
    };

    let config = ServerConfig::new(args.host, args.port, static_dir);
    let handle = WebServer::new(config)?.start().await?;

    println!("Rochambeau running at http://{}", handle.address());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    handle.shutdown().await?;
    Ok(())
}

fn print_help() {
    println!("Rochambeau web server");
    println!();
    println!("Usage: rochambeau-web-server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --host, -h <HOST>           Host to bind to (default: {DEFAULT_HOST})");
    println!("  --port, -p <PORT>           Port to bind to (default: {DEFAULT_PORT})");
    println!("  --static-dir, -d <DIR>      Directory holding index.html and assets");
    println!("  --help                      Show this help message");
}
