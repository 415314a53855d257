use checkers_core::engine::config::EngineConfig;
use checkers_core::logic::board::Color;
use checkers_core::player::{InteractivePlayer, MinimaxPlayer, Player, RandomPlayer};
use serde::Deserialize;
use std::error::Error;
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayerSpec {
    Human,
    Random { seed: Option<u64> },
    Minimax { depth: u8, seed: Option<u64> },
}

impl PlayerSpec {
    /// Minimax players always search in favour of the color they play.
    pub fn build(&self, color: Color, engine: &EngineConfig) -> Box<dyn Player> {
        match *self {
            Self::Human => Box::new(InteractivePlayer::new(format!("{color} (you)"))),
            Self::Random { seed } => {
                Box::new(seed.map_or_else(RandomPlayer::new, RandomPlayer::with_seed))
            }
            Self::Minimax { depth, seed } => Box::new(MinimaxPlayer::with_config(EngineConfig {
                max_depth: depth,
                maximize: color == Color::Red,
                seed: seed.or(engine.seed),
                ..engine.clone()
            })),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    pub red: PlayerSpec,
    pub white: PlayerSpec,
    /// Plies after which the match is called a draw.
    pub max_plies: u32,
    pub engine: EngineConfig,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            red: PlayerSpec::Human,
            white: PlayerSpec::Minimax {
                depth: 5,
                seed: None,
            },
            max_plies: 400,
            engine: EngineConfig::default(),
        }
    }
}

impl MatchSettings {
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
