//! Command parsing
//!
//! Maps cleaned input words onto the commands the session understands.

/// Command names and their help text, in the order `help` prints them.
pub const COMMANDS: &[(&str, &str)] = &[
    ("help", "Displays a help message"),
    ("exit", "Exit the Pokedex"),
    (
        "map",
        "Displays the next 20 location areas. Each subsequent call shows the next 20",
    ),
    ("mapb", "Displays the previous 20 location areas"),
    (
        "explore",
        "explore <area>: Lists the Pokemon found in a location area",
    ),
    ("catch", "catch <pokemon>: Attempt to catch a Pokemon"),
    ("inspect", "inspect <pokemon>: Show details of a caught Pokemon"),
    ("pokedex", "Lists every Pokemon you have caught"),
];

/// A parsed command line.
///
/// Commands taking an argument keep it optional so the session can print a
/// usage hint instead of failing to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(Option<String>),
    Catch(Option<String>),
    Inspect(Option<String>),
    Pokedex,
    Unknown(String),
}

impl Command {
    /// Parses cleaned words; `None` for an empty line.
    ///
    /// Words after the first argument are ignored.
    pub fn parse(words: &[String]) -> Option<Self> {
        let (name, rest) = words.split_first()?;
        let arg = rest.first().cloned();

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "explore" => Command::Explore(arg),
            "catch" => Command::Catch(arg),
            "inspect" => Command::Inspect(arg),
            "pokedex" => Command::Pokedex,
            other => Command::Unknown(other.to_string()),
        };
        Some(command)
    }
}
