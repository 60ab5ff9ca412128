//! Builds a tree, erases from it, finds a key with a cursor and deep copies it, printing what
//! happens along the way.

use std::process;

use clap::{ArgAction, Parser};
use int_bst::{Error, Key, Tree};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(version, about = "Exercise an unbalanced integer BST and its cursors")]
struct Cli {
    /// Keys inserted into the tree, in order
    #[arg(long, value_delimiter = ',', default_values_t = [3, 2, 11, 13, 5, 17])]
    keys: Vec<Key>,

    /// Keys erased after the inserts (absent keys are ignored)
    #[arg(long, value_delimiter = ',', default_values_t = [6, 11])]
    erase: Vec<Key>,

    /// Key to look for by walking a cursor
    #[arg(long, default_value_t = 17)]
    find: Key,

    /// Keys inserted into the deep copy only
    #[arg(long, value_delimiter = ',', default_values_t = [11, 7])]
    copy_insert: Vec<Key>,

    /// Turn debugging information on (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count)]
    debug: u8,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // RUST_LOG wins over -d when it's set.
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .init();
}

fn print_keys(tree: &Tree) {
    let line: String = tree.iter().map(|key| format!("{key},")).collect();
    println!("{line}");
}

fn run(cli: &Cli) -> Result<(), Error> {
    let mut bst = Tree::new();
    for &key in &cli.keys {
        bst.insert(key)?;
    }
    print_keys(&bst);

    for &key in &cli.erase {
        bst.erase(key);
    }
    tracing::info!(len = bst.len(), "finished erasing");

    let mut start = bst.begin();
    let stop = bst.end();
    while start != stop {
        if *start.post_step_forward()?.get()? == cli.find {
            start.step_backward()?;
            break;
        }
    }

    if start != stop {
        println!("{} is in the list.", start.get()?);
    } else {
        println!("{} is not in the list.", cli.find);
    }

    let mut deep_copy = bst.try_clone()?;
    for &key in &cli.copy_insert {
        deep_copy.insert(key)?;
    }
    print_keys(&deep_copy);

    Ok(())
}
