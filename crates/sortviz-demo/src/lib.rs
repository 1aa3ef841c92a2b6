//! Terminal front end for the sortviz engine.
//!
//! Renders each delivered step as rows of text bars so a run can be watched
//! without a graphical frontend.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sortviz_core::{Algorithm, EngineConfig, RunController};
//! use sortviz_demo::player::play;
//!
//! let mut ctl = RunController::new(EngineConfig::default())?;
//! let report = play(&mut ctl, Algorithm::Merge, &mut std::io::stdout(), 48)?;
//! ```

pub mod args;
pub mod error;
pub mod player;
pub mod render;

pub use args::DemoArgs;
pub use error::DemoError;
pub use player::play;
