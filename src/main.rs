use clap::Parser;
use color_eyre::eyre::Result;

use threadtags::{
    infrastructure::{cli::Cli, config::Config},
    utils::{initialize_logging, initialize_panic_handler},
    App,
};

fn run() -> Result<()> {
    initialize_logging()?;

    initialize_panic_handler()?;

    let args = <Cli as Parser>::parse();

    let config = Config::new()?;

    let app = App::from_cli(&args, &config);
    let output = app.run(&args.command)?;
    println!("{output}");

    Ok(())
}

fn main() -> Result<()> {
    if let Err(e) = run() {
        eprintln!("{} error: Something went wrong", env!("CARGO_PKG_NAME"));
        Err(e)
    } else {
        Ok(())
    }
}
