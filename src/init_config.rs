// init_config.rs
// Loads a lab setup (parameters, trend sweep, layout, explanation) from TOML

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ExplainConfig, LayoutConfig};
use crate::error::Result;
use crate::parameters::ParameterSet;
use crate::plotting::SweepSpec;

pub const DEFAULT_LAB_FILE: &str = "lab.toml";

/// Every table is optional; missing tables and keys fall back to the defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LabFile {
    pub parameters: ParameterSet,
    pub sweep: SweepSpec,
    pub layout: LayoutConfig,
    pub explain: ExplainConfig,
}

impl LabFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let lab = Self::from_toml_str(&content)?;
        info!(path = %path.as_ref().display(), "loaded lab file");
        Ok(lab)
    }

    /// `lab.toml` in the working directory, or the defaults when it is absent.
    pub fn load_default() -> Result<Self> {
        if Path::new(DEFAULT_LAB_FILE).exists() {
            Self::load_from_file(DEFAULT_LAB_FILE)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate the parameters.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let lab: LabFile = toml::from_str(content)?;
        lab.parameters.validate()?;
        Ok(lab)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
