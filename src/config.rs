//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::cells::{Cell, ConnectionType, Pack};
use crate::sim::action::Action;

/// Shortest duration accepted for a use or recharge step (hours).
pub const MIN_HOURS: f64 = 0.1;

/// Longest duration accepted for a use or recharge step (hours).
pub const MAX_HOURS: f64 = 100.0;

/// Top-level scenario configuration parsed from TOML.
///
/// A scenario describes the starting pack and the script of actions applied
/// to it. Load from TOML with [`ScenarioConfig::from_toml_file`] or pick a
/// built-in with [`ScenarioConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Global simulation parameters.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Starting pack layout.
    #[serde(default)]
    pub pack: PackConfig,
    /// Actions applied in order.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Global simulation parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Hours used by use/recharge actions that do not name their own.
    pub default_hours: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { default_hours: 1.0 }
    }
}

/// Parameters of a single cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CellConfig {
    /// Terminal voltage (V).
    pub voltage: f64,
    /// Maximum storable charge.
    pub capacity: f64,
    /// Initial charge; clamped into `[0, capacity]` by the model.
    pub charge: f64,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            voltage: 3.7,
            capacity: 2000.0,
            charge: 2000.0,
        }
    }
}

impl CellConfig {
    /// Builds the cell described by this entry.
    pub fn build(&self) -> Cell {
        Cell::new(self.voltage, self.capacity, self.charge)
    }
}

/// A pack and its members, possibly containing nested packs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PackConfig {
    /// Wiring of the direct members.
    pub connection: ConnectionType,
    /// Members in insertion order.
    pub members: Vec<MemberConfig>,
}

impl PackConfig {
    /// Builds the pack, recursively building nested packs.
    pub fn build(&self) -> Pack {
        let mut pack = Pack::new(self.connection);
        for member in &self.members {
            match member {
                MemberConfig::Cell(cell) => pack.add(cell.build()),
                MemberConfig::Pack(nested) => pack.add(nested.build()),
            }
        }
        pack
    }
}

/// One entry of a pack's member list.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberConfig {
    Cell(CellConfig),
    Pack(PackConfig),
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"pack.members[1].capacity"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ScenarioConfig {
    /// Returns the demo scenario: the desktop defaults driven through one
    /// add/use/recharge/retype cycle.
    pub fn demo() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            pack: PackConfig::default(),
            actions: vec![
                Action::Add(CellConfig::default()),
                Action::Add(CellConfig {
                    capacity: 1000.0,
                    charge: 1000.0,
                    ..CellConfig::default()
                }),
                Action::Use { hours: Some(5.0) },
                Action::Retype {
                    connection: ConnectionType::Parallel,
                },
                Action::Use { hours: Some(6.0) },
                Action::Recharge { hours: None },
                Action::Remove { index: 1 },
                Action::Recharge { hours: Some(12.0) },
            ],
        }
    }

    /// Returns the series preset: two 3.7 V cells of unequal capacity in series.
    pub fn series() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            pack: two_cell_pack(ConnectionType::Series),
            actions: vec![
                Action::Use { hours: Some(5.0) },
                Action::Use { hours: Some(6.0) },
                Action::Recharge { hours: Some(2.0) },
            ],
        }
    }

    /// Returns the parallel preset: the same two cells wired in parallel.
    pub fn parallel() -> Self {
        Self {
            pack: two_cell_pack(ConnectionType::Parallel),
            ..Self::series()
        }
    }

    /// Returns the nested preset: two parallel pairs wired in series.
    pub fn nested() -> Self {
        let pair = |capacity: f64| {
            MemberConfig::Pack(PackConfig {
                connection: ConnectionType::Parallel,
                members: vec![
                    MemberConfig::Cell(CellConfig {
                        capacity,
                        charge: capacity,
                        ..CellConfig::default()
                    }),
                    MemberConfig::Cell(CellConfig {
                        capacity,
                        charge: capacity,
                        ..CellConfig::default()
                    }),
                ],
            })
        };
        Self {
            simulation: SimulationConfig { default_hours: 2.0 },
            pack: PackConfig {
                connection: ConnectionType::Series,
                members: vec![pair(2000.0), pair(1500.0)],
            },
            actions: vec![
                Action::Use { hours: None },
                Action::Use { hours: None },
                Action::Recharge { hours: Some(1.0) },
                Action::Remove { index: 0 },
                Action::Use { hours: Some(20.0) },
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["demo", "series", "parallel", "nested"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "demo" => Ok(Self::demo()),
            "series" => Ok(Self::series()),
            "parallel" => Ok(Self::parallel()),
            "nested" => Ok(Self::nested()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Builds the starting pack described by `[pack]`.
    pub fn build_pack(&self) -> Pack {
        self.pack.build()
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Charge above
    /// capacity is accepted: the model clamps it.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        check_hours(
            &mut errors,
            "simulation.default_hours",
            self.simulation.default_hours,
        );

        validate_members(&mut errors, "pack", &self.pack);

        for (i, action) in self.actions.iter().enumerate() {
            match action {
                Action::Use { hours: Some(h) } | Action::Recharge { hours: Some(h) } => {
                    check_hours(&mut errors, &format!("actions[{i}].hours"), *h);
                }
                Action::Add(cell) => validate_cell(&mut errors, &format!("actions[{i}]"), cell),
                _ => {}
            }
        }

        errors
    }
}

fn two_cell_pack(connection: ConnectionType) -> PackConfig {
    PackConfig {
        connection,
        members: vec![
            MemberConfig::Cell(CellConfig::default()),
            MemberConfig::Cell(CellConfig {
                capacity: 1000.0,
                charge: 1000.0,
                ..CellConfig::default()
            }),
        ],
    }
}

fn check_hours(errors: &mut Vec<ConfigError>, field: &str, hours: f64) {
    if !(MIN_HOURS..=MAX_HOURS).contains(&hours) {
        errors.push(ConfigError {
            field: field.into(),
            message: format!("must be in [{MIN_HOURS}, {MAX_HOURS}], got {hours}"),
        });
    }
}

fn validate_members(errors: &mut Vec<ConfigError>, path: &str, pack: &PackConfig) {
    for (i, member) in pack.members.iter().enumerate() {
        let field = format!("{path}.members[{i}]");
        match member {
            MemberConfig::Cell(cell) => validate_cell(errors, &field, cell),
            MemberConfig::Pack(nested) => validate_members(errors, &field, nested),
        }
    }
}

fn validate_cell(errors: &mut Vec<ConfigError>, path: &str, cell: &CellConfig) {
    if !cell.voltage.is_finite() || cell.voltage < 0.0 {
        errors.push(ConfigError {
            field: format!("{path}.voltage"),
            message: "must be a finite value >= 0".into(),
        });
    }
    if !cell.capacity.is_finite() || cell.capacity < 0.0 {
        errors.push(ConfigError {
            field: format!("{path}.capacity"),
            message: "must be a finite value >= 0".into(),
        });
    }
    if !cell.charge.is_finite() {
        errors.push(ConfigError {
            field: format!("{path}.charge"),
            message: "must be a finite value".into(),
        });
    }
}
