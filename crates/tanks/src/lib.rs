//! # Tanks
//!
//! A top-down tank arena: a hull with a turret, shots that fly from the
//! barrel tip, targets that respawn when hit, destructible obstacles and
//! walls. Input is scripted and drawing goes to the debug recorder, so a
//! whole session runs headless.

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod game;
pub mod input;

pub use config::GameConfig;
pub use game::{FrameReport, Game, GameError};
pub use input::{InputSource, InputState, ScriptStep, ScriptedInput};
