//! Example demonstrating the interactive deduction pipeline.
//!
//! This example shows how to:
//! - Create a `Game` with the default region partition
//! - Place a star and let the engine auto-apply forced moves
//! - Display the resulting board and validation report
//!
//! # Usage
//!
//! ```sh
//! cargo run --example autoplay
//! ```
//!
//! Choose the board size and the starting star:
//!
//! ```sh
//! cargo run --example autoplay -- --size 8 --x 3 --y 4
//! ```
//!
//! Let the engine also place forced stars:
//!
//! ```sh
//! cargo run --example autoplay -- --auto-star
//! ```

use clap::Parser;
use starlace_core::Position;
use starlace_game::{Game, Settings};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Board size.
    #[arg(long, default_value_t = 8)]
    size: u8,

    /// Column of the star to place.
    #[arg(long, default_value_t = 0)]
    x: u8,

    /// Row of the star to place.
    #[arg(long, default_value_t = 0)]
    y: u8,

    /// Also place stars automatically when a group has one cell left.
    #[arg(long)]
    auto_star: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let mut game = Game::new(args.size);
    game.set_settings(Settings {
        auto_star: args.auto_star,
        ..Settings::default()
    });

    let report = *game.toggle(Position::new(args.x, args.y))?;
    println!("{}", game.board());
    println!(
        "valid: {}, complete: {}",
        report.is_valid(),
        report.is_complete()
    );
    if let Some(violation) = report.violation() {
        println!("violation: {violation}");
    }
    Ok(())
}
