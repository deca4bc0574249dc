//! Runner configuration.
//!
//! Defaults, then environment variables, then command-line flags:
//!
//! - `BLOCKFALL_CANVAS_WIDTH` / `--width`: canvas width in pixels (default 300)
//! - `BLOCKFALL_CANVAS_HEIGHT` / `--height`: canvas height in pixels (default 600)
//! - `BLOCKFALL_UNIT_SIZE` / `--unit`: pixels per board cell (default 30)
//! - `BLOCKFALL_SEED` / `--seed`: piece RNG seed (default: wall clock)
//! - `BLOCKFALL_LOG_PATH` / `--log`: JSON-lines event journal (default: off)

use anyhow::{anyhow, Context, Result};

use crate::core::BoardDims;
use crate::types::{DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_UNIT_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub unit_size: u32,
    pub seed: Option<u32>,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            unit_size: DEFAULT_UNIT_SIZE,
            seed: None,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Defaults overridden by `BLOCKFALL_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = Self::default();
        if let Some(v) = get("BLOCKFALL_CANVAS_WIDTH") {
            config.canvas_width = parse_u32("BLOCKFALL_CANVAS_WIDTH", &v)?;
        }
        if let Some(v) = get("BLOCKFALL_CANVAS_HEIGHT") {
            config.canvas_height = parse_u32("BLOCKFALL_CANVAS_HEIGHT", &v)?;
        }
        if let Some(v) = get("BLOCKFALL_UNIT_SIZE") {
            config.unit_size = parse_u32("BLOCKFALL_UNIT_SIZE", &v)?;
        }
        if let Some(v) = get("BLOCKFALL_SEED") {
            config.seed = Some(parse_u32("BLOCKFALL_SEED", &v)?);
        }
        config.log_path = get("BLOCKFALL_LOG_PATH");
        Ok(config)
    }

    /// Apply command-line flags on top of `self`.
    ///
    /// `args` excludes the program name.
    pub fn apply_args(mut self, args: &[String]) -> Result<Self> {
        let mut i = 0usize;
        while i < args.len() {
            let flag = args[i].as_str();
            let value = match flag {
                "--width" | "--height" | "--unit" | "--seed" | "--log" => {
                    i += 1;
                    args.get(i)
                        .ok_or_else(|| anyhow!("missing value for {}", flag))?
                }
                other => return Err(anyhow!("unknown argument: {}", other)),
            };
            match flag {
                "--width" => self.canvas_width = parse_u32(flag, value)?,
                "--height" => self.canvas_height = parse_u32(flag, value)?,
                "--unit" => self.unit_size = parse_u32(flag, value)?,
                "--seed" => self.seed = Some(parse_u32(flag, value)?),
                _ => self.log_path = Some(value.clone()),
            }
            i += 1;
        }
        Ok(self)
    }

    /// Environment, then `args`, validated.
    pub fn load(args: &[String]) -> Result<Self> {
        let config = Self::from_env()?.apply_args(args)?;
        config.board_dims()?;
        Ok(config)
    }

    /// Board size implied by the canvas and unit size.
    pub fn board_dims(&self) -> Result<BoardDims> {
        BoardDims::from_canvas(self.canvas_width, self.canvas_height, self.unit_size)
            .context("invalid board configuration")
    }
}

fn parse_u32(name: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| anyhow!("invalid {} value: {}", name, value))
}
