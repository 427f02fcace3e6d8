//! Session state and command execution
//!
//! A `Session` owns everything one interactive run needs: the API client
//! (and through it the response cache), the location-area cursors, the
//! caught Pokemon, and the RNG used for catch rolls.

use std::collections::BTreeMap;
use std::io::Write;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::api::PokeApiClient;
use crate::error::Result;
use crate::models::{LocationAreaPage, Pokemon};
use crate::repl::command::{Command, COMMANDS};

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Whether a catch roll succeeds.
///
/// `roll` is drawn from `0..base_experience`; roughly the top third of that
/// range catches. Zero base experience always catches.
pub fn catch_succeeds(roll: u32, base_experience: u32) -> bool {
    if base_experience == 0 {
        return true;
    }
    roll > base_experience - base_experience / 3
}

pub struct Session {
    client: PokeApiClient,
    /// Page `map` shows next; `None` after the last page
    next_page: Option<String>,
    /// Page `mapb` shows; `None` on the first page
    previous_page: Option<String>,
    pokedex: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied RNG, for reproducible catches.
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        let next_page = Some(client.first_location_page_url());
        Self {
            client,
            next_page,
            previous_page: None,
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    /// Caught Pokemon by name.
    pub fn pokedex(&self) -> &BTreeMap<String, Pokemon> {
        &self.pokedex
    }

    // == Execute ==
    /// Runs one command, writing its output to `out`.
    pub async fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Outcome> {
        debug!(?command, "Executing command");

        match command {
            Command::Help => self.help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(Outcome::Exit);
            }
            Command::Map => self.map_forward(out).await?,
            Command::MapBack => self.map_back(out).await?,
            Command::Explore(area) => match area {
                Some(area) => self.explore(&area, out).await?,
                None => writeln!(out, "You must specify a location area to explore")?,
            },
            Command::Catch(name) => match name {
                Some(name) => self.catch(&name, out).await?,
                None => writeln!(out, "You must specify a target")?,
            },
            Command::Inspect(name) => match name {
                Some(name) => self.inspect(&name, out)?,
                None => writeln!(out, "You must specify a Pokemon to inspect")?,
            },
            Command::Pokedex => self.list_pokedex(out)?,
            Command::Unknown(_) => writeln!(out, "Unknown command")?,
        }

        Ok(Outcome::Continue)
    }

    fn help<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "Welcome to the Pokedex!")?;
        writeln!(out, "Usage:")?;
        writeln!(out)?;
        for (name, description) in COMMANDS {
            writeln!(out, "{}: {}", name, description)?;
        }
        Ok(())
    }

    // == Pagination ==
    async fn map_forward<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.next_page.clone() else {
            writeln!(out, "you're on the last page")?;
            return Ok(());
        };

        let page = self.client.location_areas(&url).await?;
        self.show_page(page, out)
    }

    async fn map_back<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let Some(url) = self.previous_page.clone() else {
            writeln!(out, "you're on the first page")?;
            return Ok(());
        };

        let page = self.client.location_areas(&url).await?;
        self.show_page(page, out)
    }

    // Cursors only move once the page has been fetched and decoded.
    fn show_page<W: Write>(&mut self, page: LocationAreaPage, out: &mut W) -> Result<()> {
        self.next_page = page.next;
        self.previous_page = page.previous;

        for area in &page.results {
            writeln!(out, "{}", area.name)?;
        }
        Ok(())
    }

    async fn explore<W: Write>(&mut self, area: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Exploring {}...", area)?;

        let Some(location) = self.client.location_area(area).await? else {
            writeln!(out, "Location area {} does not exist", area)?;
            return Ok(());
        };

        writeln!(out, "Found Pokemon:")?;
        for name in location.pokemon_names() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }

    async fn catch<W: Write>(&mut self, name: &str, out: &mut W) -> Result<()> {
        writeln!(out, "Throwing a Pokeball at {}...", name)?;

        let Some(pokemon) = self.client.pokemon(name).await? else {
            writeln!(
                out,
                "You missed, it's almost as if {} wasn't even something you could catch...",
                name
            )?;
            return Ok(());
        };

        let base_experience = pokemon.base_experience();
        let roll = if base_experience == 0 {
            0
        } else {
            self.rng.gen_range(0..base_experience)
        };

        if catch_succeeds(roll, base_experience) {
            writeln!(out, "{} was caught!", pokemon.name)?;
            writeln!(out, "You may now inspect it with the inspect command.")?;
            self.pokedex.insert(pokemon.name.clone(), pokemon);
        } else {
            writeln!(out, "{} escaped!", pokemon.name)?;
        }
        Ok(())
    }

    fn inspect<W: Write>(&self, name: &str, out: &mut W) -> Result<()> {
        let Some(pokemon) = self.pokedex.get(name) else {
            writeln!(out, "you have not caught that pokemon")?;
            return Ok(());
        };

        writeln!(out, "Name: {}", pokemon.name)?;
        writeln!(out, "Height: {}", pokemon.height)?;
        writeln!(out, "Weight: {}", pokemon.weight)?;
        writeln!(out, "Stats:")?;
        for stat in &pokemon.stats {
            writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
        }
        writeln!(out, "Types:")?;
        for kind in &pokemon.types {
            writeln!(out, "  - {}", kind.kind.name)?;
        }
        Ok(())
    }

    fn list_pokedex<W: Write>(&self, out: &mut W) -> Result<()> {
        if self.pokedex.is_empty() {
            writeln!(out, "You haven't caught any Pokemon yet")?;
            return Ok(());
        }

        writeln!(out, "Your Pokedex:")?;
        for name in self.pokedex.keys() {
            writeln!(out, " - {}", name)?;
        }
        Ok(())
    }
}
