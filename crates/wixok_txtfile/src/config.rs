use serde::Deserialize;
use tracing::{debug, instrument};

use wixok_base::{FilePath, PalHandle, ResultExt, WixokError, WixokResult};

/// Settings carried by a [`TxtFile`](crate::TxtFile) accessor.
///
/// Missing keys take their defaults and unknown keys are ignored, so the
/// table can be embedded in a larger application config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TxtFileConfig {
    /// Print a diagnostic line to stdout for every operation outcome.
    pub debug: bool,
}

impl TxtFileConfig {
    /// Returns the config with the debug flag set to `debug`.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Parse a TOML document such as `debug = true`.
pub fn parse_config(text: &str) -> WixokResult<TxtFileConfig> {
    toml::from_str(text).map_err(|e| {
        Box::new(
            WixokError::message("Invalid text file configuration")
                .caused_by(WixokError::message(e.message())),
        )
    })
}

/// Load the accessor configuration from a TOML file through the PAL.
#[instrument(skip(pal), fields(path = %path))]
pub fn load_config(pal: &PalHandle, path: &FilePath) -> WixokResult<TxtFileConfig> {
    let text = pal
        .read_file_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path))?;
    let config = parse_config(&text).with_context(|| format!("In config file '{}'", path))?;
    debug!(debug = config.debug, "loaded text file configuration");
    Ok(config)
}
