use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::compiler::memory::{MAX_REGISTERS, MIN_REGISTERS};

pub const DEFAULT_REGISTERS: usize = 8;
pub const DEFAULT_MEMORY_SIZE: usize = 256;
pub const DEFAULT_MAX_ITERATIONS: u64 = 5000;

/// Describes the machine that programs are lowered onto and executed by.
/// Any field missing from a target file keeps its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Size of the register file, including the reserved register 0
    pub registers: usize,

    /// Number of cells in the interpreter's data memory
    pub memory_size: usize,

    /// Instructions the interpreter executes before giving up on a program
    pub max_iterations: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        TargetConfig {
            registers: DEFAULT_REGISTERS,
            memory_size: DEFAULT_MEMORY_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Registers(usize),
    MemorySize,
    MaxIterations,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use ConfigError::*;
        match self {
            Io(e) => write!(f, "Could not read target file: {}", e),
            Yaml(e) => write!(f, "Invalid target file: {}", e),
            Registers(n) => write!(
                f,
                "registers must be between {} and {}, got {}",
                MIN_REGISTERS, MAX_REGISTERS, n
            ),
            MemorySize => f.write_str("memory_size must be greater than 0"),
            MaxIterations => f.write_str("max_iterations must be greater than 0"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        ConfigError::Yaml(e)
    }
}

impl TargetConfig {
    /// Loads a target description from the given file.
    pub fn read(file: &mut std::fs::File) -> Result<TargetConfig, ConfigError> {
        let config: TargetConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<TargetConfig, ConfigError> {
        let config: TargetConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the target description as YAML
    pub fn write<W: std::io::Write>(&self, out: W) -> Result<(), serde_yaml::Error> {
        serde_yaml::to_writer(out, self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.registers < MIN_REGISTERS || self.registers > MAX_REGISTERS {
            return Err(ConfigError::Registers(self.registers));
        }
        if self.memory_size == 0 {
            return Err(ConfigError::MemorySize);
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::MaxIterations);
        }
        Ok(())
    }
}
