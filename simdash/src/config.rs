use crate::{
    dashboard::{
        color_scheme::ColorScheme,
        keymap::KeyBinding,
        position::{Position, Size},
    },
    error::Error,
    utils::any::Any,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Clone, Debug, Deserialize)]
pub struct AgentConfig {
    pub size: i32,
    pub step_size: i32,

    // NOTE: the agent starts centered in the map when no initial position is given
    #[serde(default)]
    pub initial: Option<Position>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MapConfig {
    pub label_height: i32,
    pub grid_step: usize,
    pub glow_margin: i32,
    pub label_offset: Position,
    pub min_viewport: Size,

    // NOTE: logical units covered by one terminal cell; the map viewport is the panel's inner area scaled by this
    pub cell_size: Size,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub title: String,
    pub agent: AgentConfig,
    pub map: MapConfig,
    pub color_scheme: ColorScheme,

    #[serde(default)]
    pub keymap: Vec<KeyBinding>,
}

impl Config {
    const DEFAULT_CONFIG_STR: &'static str = std::include_str!("config.yaml");

    pub fn default_config() -> Result<Self, Error> {
        Self::DEFAULT_CONFIG_STR.deserialize_from_yaml::<Self>()?.validate()
    }

    pub fn load(config_filepath: Option<&Path>) -> Result<Self, Error> {
        let Some(config_filepath) = config_filepath else {
            return Self::default_config();
        };

        config_filepath
            .read_to_string()?
            .deserialize_from_yaml::<Self>()?
            .validate()
    }

    fn validate(self) -> Result<Self, Error> {
        if self.agent.size <= 0 {
            return Error::InvalidConfig("agent.size must be positive").err();
        }

        if self.agent.step_size <= 0 {
            return Error::InvalidConfig("agent.step_size must be positive").err();
        }

        if self.map.grid_step == 0 {
            return Error::InvalidConfig("map.grid_step must be positive").err();
        }

        if self.map.label_height < 0 || self.map.glow_margin < 0 {
            return Error::InvalidConfig("map.label_height and map.glow_margin must not be negative").err();
        }

        if self.map.cell_size.width <= 0 || self.map.cell_size.height <= 0 {
            return Error::InvalidConfig("map.cell_size must be positive").err();
        }

        if self.map.min_viewport.width < 0 || self.map.min_viewport.height < 0 {
            return Error::InvalidConfig("map.min_viewport must not be negative").err();
        }

        self.ok()
    }
}
