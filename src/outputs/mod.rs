//! Report output for the console.
//!
//! # Submodules
//!
//! - [`console`]: Renders a tick's [`DisplayRow`](crate::models::DisplayRow)s
//!   as a rounded-grid table and prints it
//!
//! # Output Shape
//!
//! ```text
//! ╭────────┬───────┬─────────────┬──────────────╮
//! │ Author │ Title │ Description │ Link         │
//! ├────────┼───────┼─────────────┼──────────────┤
//! │ Jane   │ Apple │ Fruit       │ https://a.io │
//! ╰────────┴───────┴─────────────┴──────────────╯
//! ```

pub mod console;
