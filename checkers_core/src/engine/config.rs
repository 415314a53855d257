use serde::{Deserialize, Serialize};

pub const VAL_MAN: f64 = 1.0;
pub const VAL_KING: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub man_value: f64,
    pub king_value: f64,

    // Search Parameters
    pub max_depth: u8,
    /// Search for the move that maximizes the score (Red's point of view).
    pub maximize: bool,
    /// Stop scanning siblings once the window closes. Off by default, which
    /// keeps full-width minimax.
    pub alpha_beta: bool,
    /// Fixed seed for move-order shuffling; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            man_value: VAL_MAN,
            king_value: VAL_KING,

            max_depth: 4,
            maximize: false,
            alpha_beta: false,
            seed: None,
        }
    }
}

#[derive(Deserialize)]
struct EngineConfigJson {
    man_value: Option<f64>,
    king_value: Option<f64>,

    max_depth: Option<u8>,
    maximize: Option<bool>,
    alpha_beta: Option<bool>,
    seed: Option<u64>,
}

impl EngineConfig {
    /// Overlays a JSON object on the defaults.
    ///
    /// Piece values are read as multipliers of the default weights, every other
    /// field as an absolute value.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            man_value: apply_scale(default.man_value, json_config.man_value),
            king_value: apply_scale(default.king_value, json_config.king_value),

            max_depth: json_config.max_depth.unwrap_or(default.max_depth),
            maximize: json_config.maximize.unwrap_or(default.maximize),
            alpha_beta: json_config.alpha_beta.unwrap_or(default.alpha_beta),
            seed: json_config.seed.or(default.seed),
        })
    }
}

fn apply_scale(default_val: f64, scale: Option<f64>) -> f64 {
    scale.map_or(default_val, |s| default_val * s)
}
