//! The deck container
//!
//! A [Deck] holds everything read from one INP file: the verbatim title
//! card, the cell, surface, and data blocks as validated cards, and any
//! cards the lenient reader had to skip. Writing a deck back out produces
//! canonical card text with blank-line block separators and the column
//! conventions applied by [wrap](crate::wrap).

// internal modules
use crate::card::{CellCard, Record, SurfaceCard};
use crate::utils::f;
use crate::wrap::wrap_card;

// standard library
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

// external crates
use anyhow::{Context, Result};
use log::debug;
use serde::Serialize;

/// A card the lenient reader could not validate
///
/// Kept verbatim with its line number and the reason, so a human can be
/// pointed at the exact bad card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedCard {
    /// 1-based line number where the card started
    pub line: usize,
    /// The joined, de-commented card text
    pub text: String,
    /// Why validation failed
    pub reason: String,
}

/// Everything parsed from one INP file
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Deck {
    /// The title card, stored verbatim and never tokenized
    pub title: Option<String>,
    /// Cell block cards
    pub cells: Vec<CellCard>,
    /// Surface block cards
    pub surfaces: Vec<SurfaceCard>,
    /// Data block cards
    pub data: Vec<Record>,
    /// Cards skipped by the lenient reader
    pub skipped: Vec<SkippedCard>,
}

impl Deck {
    /// Total number of cards successfully validated
    pub fn n_cards(&self) -> usize {
        self.cells.len() + self.surfaces.len() + self.data.len()
    }

    /// True when nothing had to be skipped
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Look up a data card by its identity string, e.g. `mx5:n`
    pub fn data_card(&self, identity: &str) -> Option<&Record> {
        self.data.iter().find(|r| r.identity() == identity)
    }

    /// Write the canonical deck to a file
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| f!("Could not create {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write!(writer, "{self}")?;
        debug!("Deck written to {}", path.display());
        Ok(())
    }
}

/// Canonical INP text: title, cells, surfaces, data, blank-line separated
impl std::fmt::Display for Deck {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        if let Some(title) = &self.title {
            writeln!(fmt, "{title}")?;
        }
        for cell in &self.cells {
            writeln!(fmt, "{}", wrap_card(&cell.to_string()))?;
        }
        writeln!(fmt)?;
        for surface in &self.surfaces {
            writeln!(fmt, "{}", wrap_card(&surface.to_string()))?;
        }
        writeln!(fmt)?;
        for record in &self.data {
            writeln!(fmt, "{}", wrap_card(&record.to_string()))?;
        }
        Ok(())
    }
}
