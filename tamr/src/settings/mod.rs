use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use serde_yaml;
use errors::*;

pub mod conf_smatch;
pub mod conf_fine_grained;

pub use self::conf_smatch::SmatchConf;
pub use self::conf_fine_grained::FineGrainedConf;

/// Settings of one evaluation run. A value is built once by the caller and handed to the
/// aggregator, nothing is kept in global state.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub smatch: SmatchConf,
    pub fine_grained: FineGrainedConf,
    /// score pairs on the rayon thread pool
    pub parallel: bool,
}

/// Layout of a settings file: everything lives under the `settings` key
#[derive(Deserialize, Debug)]
pub struct Configuration {
    pub settings: Settings
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            smatch: SmatchConf::default(),
            fine_grained: FineGrainedConf::default(),
            parallel: true,
        }
    }
}

impl Settings {
    pub fn from_file(fsettings: &Path) -> Result<Settings> {
        let reader = BufReader::new(File::open(fsettings)
            .chain_err(|| format!("Cannot open settings file: {:?}", fsettings))?);
        let conf: Configuration = serde_yaml::from_reader(reader)
            .chain_err(|| format!("Invalid settings file: {:?}", fsettings))?;
        Ok(conf.settings)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"
****************************** SETTINGS ******************************
smatch: {:?}
fine_grained: {:?}
parallel: {}
**********************************************************************
"#,
    self.smatch,
    self.fine_grained,
    self.parallel)
    }
}
