use std::path::PathBuf;

use clap::Parser;

use vocalis::infrastructure::terms::parse_ruleset;

/// Apply a CSV term-replacement file to a piece of text.
///
/// The file carries one `pattern,replacement` row per line; rules are
/// applied sequentially in file order. A missing file leaves the text
/// unchanged.
#[derive(Parser)]
#[command(name = "term-replace")]
struct Cli {
    /// CSV file with one `pattern,replacement` row per line
    ruleset: PathBuf,

    /// Text to transform
    text: String,
}

fn main() {
    let cli = Cli::parse();
    let contents = std::fs::read_to_string(&cli.ruleset).unwrap_or_default();
    let ruleset = parse_ruleset(&contents);
    println!("{}", ruleset.apply(&cli.text));
}
