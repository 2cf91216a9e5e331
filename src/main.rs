// Copyright 2023 Remi Bernotavicius

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

mod cli;
mod database;
mod kitchen;
mod stats;

type Error = Box<dyn std::error::Error + Send + Sync + 'static>;
type Result<T> = std::result::Result<T, Error>;

#[derive(Parser, Debug)]
#[command(about = "Keeps track of what is in the kitchen and what recipes it can make")]
struct Args {
    /// Database file to use instead of the one in the user's data directory.
    #[arg(long, global = true, env = "KITCHEN_LEDGER_DATABASE")]
    database: Option<PathBuf>,

    /// Log more. Repeat for even more.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    commands: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Manage the stock.
    #[command(subcommand)]
    Ingredient(cli::IngredientCommand),
    /// Manage recipes and what they require.
    #[command(subcommand)]
    Recipe(cli::RecipeCommand),
    #[command(subcommand)]
    Shopping(cli::ShoppingCommand),
    /// Whether the stock covers a recipe.
    Check {
        recipe: i32,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        portions: u32,
    },
    /// Cook a recipe, deducting what it uses from the stock.
    Cook {
        recipe: i32,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        portions: u32,
    },
    /// Put what a recipe lacks on the shopping list.
    Missing {
        recipe: i32,
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        portions: u32,
    },
    /// List the recipes the stock covers.
    Cookable {
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        portions: u32,
    },
    /// Show what each measure weighs, optionally for a given ingredient.
    Units { ingredient: Option<String> },
    Stats {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

/// This is where the database lives on-disk. On Linux it should be like:
/// `~/.local/share/kitchen_ledger/`
fn data_path() -> Result<PathBuf> {
    let dirs = directories::BaseDirs::new().ok_or("failed to get user home directory")?;
    let path = dirs.data_dir().join("kitchen_ledger");
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    simple_logger::SimpleLogger::new()
        .with_level(log_level(args.verbose))
        .init()?;

    if let Commands::Units { ingredient } = &args.commands {
        cli::units(ingredient.as_deref());
        return Ok(());
    }

    let path = match args.database {
        Some(path) => path,
        None => data_path()?.join("data.sqlite"),
    };
    let mut conn = database::establish_connection(path)?;
    let conn = &mut conn;

    match args.commands {
        Commands::Ingredient(command) => cli::ingredients(conn, command)?,
        Commands::Recipe(command) => cli::recipes(conn, command)?,
        Commands::Shopping(command) => cli::shopping(conn, command)?,
        Commands::Check { recipe, portions } => cli::check(conn, recipe, portions)?,
        Commands::Cook { recipe, portions } => cli::cook(conn, recipe, portions)?,
        Commands::Missing { recipe, portions } => cli::missing(conn, recipe, portions)?,
        Commands::Cookable { portions } => cli::cookable(conn, portions)?,
        Commands::Units { .. } => {}
        Commands::Stats { limit } => cli::stats(conn, limit)?,
    }
    Ok(())
}

#[test]
fn verbosity_levels() {
    assert_eq!(log_level(0), log::LevelFilter::Warn);
    assert_eq!(log_level(1), log::LevelFilter::Info);
    assert_eq!(log_level(4), log::LevelFilter::Debug);
}

#[test]
fn parses_commands() {
    let args = Args::try_parse_from(["kitchen-ledger", "cook", "3", "-p", "4", "-vv"]).unwrap();
    assert_eq!(args.verbose, 2);
    assert!(matches!(
        args.commands,
        Commands::Cook {
            recipe: 3,
            portions: 4
        }
    ));

    let args = Args::try_parse_from(["kitchen-ledger", "check", "3"]).unwrap();
    assert!(matches!(args.commands, Commands::Check { portions: 1, .. }));

    assert!(Args::try_parse_from(["kitchen-ledger", "cook", "3", "-p", "0"]).is_err());

    let buy = ["kitchen-ledger", "shopping", "buy", "2", "--amount", "1,5"];
    let args = Args::try_parse_from(buy).unwrap();
    assert!(matches!(
        args.commands,
        Commands::Shopping(cli::ShoppingCommand::Buy {
            id: 2,
            amount: Some(ref amount),
        }) if amount == "1,5"
    ));
}
