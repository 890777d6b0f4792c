use crate::config::PanelConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads panel configuration by layering defaults, a JSON file with the same
    /// stem, the TOML file, and `PANEL_` environment variables (later layers win).
    ///
    /// Missing files are skipped. Nested keys use `__` in environment variable
    /// names, e.g. `PANEL_SERVER__PORT=9000`.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or a value has the wrong type.
    pub fn load(path: impl AsRef<Path>) -> Result<PanelConfig> {
        let path = path.as_ref();
        let config: PanelConfig = Figment::from(Serialized::defaults(PanelConfig::default()))
            .merge(Json::file(path.with_extension("json")))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PANEL_").split("__"))
            .extract()?;

        Ok(config)
    }
}
