//! CLI subcommand implementations.

pub mod entries;
pub mod foods;
pub mod macros;
pub mod refresh;
pub mod summary;
pub mod trend;

pub(crate) mod util;
