//! GroupLedger CLI Client
//!
//! Command-line interface for invoking operations on a GroupLedger server.

use clap::{Parser, Subcommand};
use groupledger::network::Client;
use groupledger::protocol::Response;

/// GroupLedger CLI
#[derive(Parser, Debug)]
#[command(name = "groupledger-cli")]
#[command(about = "CLI for the GroupLedger record manager")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:7051")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a record by store key
    Get {
        /// The store key
        key: String,
    },

    /// Create a record
    Create {
        /// The store key to write at
        key: String,

        /// Group name (also used as the group id)
        name: String,

        /// Group description
        description: String,
    },

    /// List every record
    List,

    /// Write the example records
    Seed,

    /// Invoke any operation by name
    Invoke {
        /// Operation name
        function: String,

        /// Positional arguments
        args: Vec<String>,
    },

    /// Ping the server
    Ping,
}

fn main() {
    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Commands::Get { key } => client.invoke("getByKey", &[key]),
        Commands::Create { key, name, description } => {
            client.invoke("create", &[key, name, description])
        }
        Commands::List => client.invoke("listAll", &[] as &[&str]),
        Commands::Seed => client.invoke("seed", &[] as &[&str]),
        Commands::Invoke { function, args } => client.invoke(&function, &args),
        Commands::Ping => match client.ping() {
            Ok(true) => {
                println!("PONG");
                return;
            }
            Ok(false) => {
                eprintln!("Unexpected ping response");
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
    };

    match result {
        Ok(response) => print_response(&response),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn print_response(response: &Response) {
    if response.is_ok() {
        if response.payload.is_some() {
            println!("{}", response.text());
        } else {
            println!("OK");
        }
    } else {
        eprintln!("{:?}: {}", response.status, response.text());
        std::process::exit(1);
    }
}
