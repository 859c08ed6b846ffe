//! Notebook model types.
//!
//! This module defines the in-memory representation shared by every reader
//! and every report. Cells keep only what profiling needs: their type and
//! their source lines.

mod cell;
mod notebook;

pub use cell::{Cell, CellType};
pub use notebook::{Notebook, NotebookMetadata};
