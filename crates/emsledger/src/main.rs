//! `emsctl` - CLI for emsledger
//!
//! This binary provides the command-line interface for registering accounts
//! in the record ledger and checking credentials against it.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;

use emsledger::cli::{Cli, Command, ConfigCommand, RegisterCommand};
use emsledger::{init_logging, Config, Store, UserRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let mut config = Config::load_from(cli.config.clone())?;
    if let Some(path) = cli.ledger.clone() {
        config.ledger.path = path;
    }

    let result = match cli.command {
        Command::Register(register_cmd) => handle_register(&config, register_cmd),
        Command::Exists(exists_cmd) => handle_exists(&config, &exists_cmd.username),
        Command::Login(login_cmd) => {
            handle_login(&config, &login_cmd.username, &login_cmd.password)
        }
        Command::Users(users_cmd) => handle_users(&config, users_cmd.json),
        Command::Status(status_cmd) => handle_status(&config, status_cmd.json),
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    };

    if let Err(e) = &result {
        if e
            .downcast_ref::<emsledger::Error>()
            .is_some_and(emsledger::Error::is_ledger_io)
        {
            eprintln!(
                "Check that {} is readable and writable.",
                config.ledger_path().display()
            );
        }
    }
    result
}

fn handle_register(
    config: &Config,
    cmd: RegisterCommand,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new(config)?;
    let username = cmd.username().to_string();
    let record = UserRecord::from(cmd);
    let role = record.role();

    if store.ledger().register(record)? {
        println!("Registered {role} '{username}'.");
    } else {
        println!("Username '{username}' is already taken.");
    }
    Ok(())
}

fn handle_exists(config: &Config, username: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new(config)?;
    let taken = store.ledger().exists(username);
    println!("{}", if taken { "yes" } else { "no" });
    Ok(())
}

fn handle_login(
    config: &Config,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new(config)?;
    match store.ledger().authenticate(username, password) {
        Some(role) => println!("{role}"),
        None => println!("no match"),
    }
    Ok(())
}

fn handle_users(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new(config)?;
    let loaded = store.ledger().reload()?;
    let records = store.ledger().records();

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No accounts in {}.", config.ledger_path().display());
        return Ok(());
    }

    println!("{:<10} {:<20} NAME", "ROLE", "USERNAME");
    for record in &records {
        println!(
            "{:<10} {:<20} {}",
            record.role().to_string(),
            record.username(),
            record.display_name()
        );
    }
    println!();
    println!("{loaded} accounts");
    Ok(())
}

fn handle_status(config: &Config, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::new(config)?;
    store.ledger().reload()?;
    let stats = store.stats();
    let admins = store.ledger().admins().len();
    let employees = store.ledger().employees().len();

    if json {
        let status = serde_json::json!({
            "ledger_path": config.ledger_path(),
            "ledger_exists": config.ledger_path().exists(),
            "admins": admins,
            "employees": employees,
            "stats": stats,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("emsctl status");
        println!("-------------");
        println!("Ledger:        {}", config.ledger_path().display());
        println!("Records:       {}", stats.ledger_records);
        println!("  Admins:      {admins}");
        println!("  Employees:   {employees}");
        println!("Leave queue:   {} slots", config.leave.queue_capacity);
        println!("Punch stack:   {} slots", config.attendance.stack_capacity);
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Ledger]");
                println!("  Path:               {}", config.ledger_path().display());
                println!("  Load on open:       {}", config.ledger.load_on_open);
                println!();
                println!("[Attendance]");
                println!("  Stack capacity:     {}", config.attendance.stack_capacity);
                println!();
                println!("[Leave]");
                println!("  Queue capacity:     {}", config.leave.queue_capacity);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
