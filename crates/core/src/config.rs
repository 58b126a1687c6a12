//! Level-generation configuration, its TOML form, and the validation boundary.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use toml::de;

/// Inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: usize,
    pub max: usize,
}

impl IntRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(self, value: usize) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatrolOffset {
    pub x: i32,
    pub y: i32,
}

/// Largest grid, in cells, a config may ask for.
pub const MAX_CELLS: usize = 1 << 24;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DungeonConfig {
    pub columns: usize,
    pub rows: usize,
    pub room_count: IntRange,
    pub room_width: IntRange,
    pub room_height: IntRange,
    pub corridor_length: IntRange,
    pub difficulty: u32,
    pub patrol_offset: PatrolOffset,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            columns: 100,
            rows: 100,
            room_count: IntRange::new(15, 20),
            room_width: IntRange::new(3, 10),
            room_height: IntRange::new(3, 10),
            corridor_length: IntRange::new(6, 10),
            difficulty: 1,
            patrol_offset: PatrolOffset { x: 3, y: 0 },
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid dimensions must be positive, got {columns}x{rows}")]
    ZeroDimensions { columns: usize, rows: usize },

    #[error("range `{name}` is invalid: min={min}, max={max}")]
    InvalidRange { name: &'static str, min: usize, max: usize },

    #[error("grid of {columns}x{rows} exceeds the limit of {max_cells} cells")]
    GridTooLarge { columns: usize, rows: usize, max_cells: usize },

    #[error("at least 2 rooms are required, room_count.min is {min}")]
    TooFewRooms { min: usize },

    #[error("room_count.max of {max} exceeds the {cells} cells of the grid")]
    TooManyRooms { max: usize, cells: usize },

    #[error("{axis} of {actual} cells cannot fit room range `{name}`, needs at least {required}")]
    GridTooSmall { axis: &'static str, name: &'static str, required: usize, actual: usize },

    #[error("failed to parse dungeon config: {0}")]
    Parse(#[from] de::Error),

    #[error("failed to read dungeon config: {0}")]
    Io(#[from] io::Error),
}

impl DungeonConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Rejects configurations the assembler cannot honour. Nothing is generated
    /// for a config that fails here.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::ZeroDimensions { columns: self.columns, rows: self.rows });
        }
        let Some(cells) = self.columns.checked_mul(self.rows).filter(|&cells| cells <= MAX_CELLS)
        else {
            return Err(ConfigError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
                max_cells: MAX_CELLS,
            });
        };

        for (name, range) in [
            ("room_count", self.room_count),
            ("room_width", self.room_width),
            ("room_height", self.room_height),
            ("corridor_length", self.corridor_length),
        ] {
            if range.min == 0 || range.min > range.max {
                return Err(ConfigError::InvalidRange { name, min: range.min, max: range.max });
            }
        }

        if self.room_count.min < 2 {
            return Err(ConfigError::TooFewRooms { min: self.room_count.min });
        }
        if self.room_count.max > cells {
            return Err(ConfigError::TooManyRooms { max: self.room_count.max, cells });
        }

        // Any room, wherever it sits, must leave one side with space for a
        // corridor of length 1 plus a minimum-sized room.
        check_axis_fits("columns", "room_width", self.columns, self.room_width)?;
        check_axis_fits("rows", "room_height", self.rows, self.room_height)?;
        Ok(())
    }
}

fn check_axis_fits(
    axis: &'static str,
    name: &'static str,
    actual: usize,
    range: IntRange,
) -> Result<(), ConfigError> {
    let required = range
        .min
        .checked_mul(2)
        .and_then(|margin| margin.checked_add(range.max))
        .and_then(|span| span.checked_add(1))
        .unwrap_or(usize::MAX);
    if actual < required {
        return Err(ConfigError::GridTooSmall { axis, name, required, actual });
    }
    Ok(())
}
