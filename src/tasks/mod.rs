//! Background Tasks Module
//!
//! Contains background tasks that run for the life of the client.
//!
//! # Tasks
//! - Cache reaper: removes expired response bodies every cache interval

mod reaper;

pub use reaper::spawn_reaper_task;
