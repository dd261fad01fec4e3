//! Match lifecycle engine for multiplayer last-team-standing arenas.
//!
//! The host game engine embeds this crate and drives it: admission requests,
//! scheduled timer callbacks, and global events (such as hunger changes) all
//! enter through [`game::MatchRegistry`] and the per-match handles it hands
//! out. Rendering, physics, and the client protocol stay on the host side.

pub mod app;
pub mod config;
pub mod events;
pub mod game;
pub mod util;
