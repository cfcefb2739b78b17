//! Biomes, weather conditions, and the per-period weather roll.
//!
//! Weather in the game changes once per fixed period of in-game seconds. For
//! a given period index the game seeds its RNG with the index itself and
//! takes a single uniform draw, then every biome maps that same draw through
//! its own weighted table. Reproducing that single-roll-per-tick design is
//! what keeps correlated biomes (rain fronts crossing regions) in sync with
//! the live server.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::rng::seeded_draws;

/// In-game seconds between weather re-rolls. Contract value; changing it
/// desynchronizes every forecast from the game.
pub const WEATHER_PERIOD: f64 = 120.0;

/// In-game seconds of guaranteed clear skies after world start.
pub const INTRO_DURATION: f64 = 300.0;

/// The in-game regions with distinct weather tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Meadows,
    BlackForest,
    Swamp,
    Mountain,
    Plains,
    Ocean,
    Mistlands,
    Ashlands,
}

impl Biome {
    /// All biomes, in display order.
    pub const ALL: [Biome; 8] = [
        Biome::Meadows,
        Biome::BlackForest,
        Biome::Swamp,
        Biome::Mountain,
        Biome::Plains,
        Biome::Ocean,
        Biome::Mistlands,
        Biome::Ashlands,
    ];

    /// Human-readable name for display.
    pub fn name(self) -> &'static str {
        match self {
            Biome::Meadows => "Meadows",
            Biome::BlackForest => "Black Forest",
            Biome::Swamp => "Swamp",
            Biome::Mountain => "Mountain",
            Biome::Plains => "Plains",
            Biome::Ocean => "Ocean",
            Biome::Mistlands => "Mistlands",
            Biome::Ashlands => "Ashlands",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Biome::Meadows => "🌳",
            Biome::BlackForest => "🌲",
            Biome::Swamp => "🐸",
            Biome::Mountain => "🏔️",
            Biome::Plains => "🌾",
            Biome::Ocean => "🌊",
            Biome::Mistlands => "🌫️",
            Biome::Ashlands => "🌋",
        }
    }

    /// Look up a biome by (case-insensitive) name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().replace([' ', '_', '-'], "").as_str() {
            "meadows" | "meadow" => Some(Biome::Meadows),
            "blackforest" | "forest" => Some(Biome::BlackForest),
            "swamp" => Some(Biome::Swamp),
            "mountain" | "mountains" => Some(Biome::Mountain),
            "plains" | "heath" => Some(Biome::Plains),
            "ocean" | "sea" => Some(Biome::Ocean),
            "mistlands" => Some(Biome::Mistlands),
            "ashlands" => Some(Biome::Ashlands),
            _ => None,
        }
    }
}

/// A weather condition, with its wind behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    LightRain,
    Rain,
    ThunderStorm,
    Misty,
    DeepForestMist,
    SwampRain,
    Snow,
    SnowStorm,
    HeathClear,
    DarklandsDark,
    AshRain,
}

/// Fraction of the global wind intensity a condition lets through, as an
/// interpolation range. A thunderstorm is always near full wind; mist is calm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindRange {
    pub min: f64,
    pub max: f64,
}

impl Condition {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::LightRain => "Light rain",
            Condition::Rain => "Rain",
            Condition::ThunderStorm => "Thunderstorm",
            Condition::Misty => "Mist",
            Condition::DeepForestMist => "Forest mist",
            Condition::SwampRain => "Drizzle",
            Condition::Snow => "Snow",
            Condition::SnowStorm => "Snowstorm",
            Condition::HeathClear => "Clear",
            Condition::DarklandsDark => "Gloom",
            Condition::AshRain => "Ash rain",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Condition::Clear => "☀️",
            Condition::LightRain => "🌦️",
            Condition::Rain => "🌧️",
            Condition::ThunderStorm => "⛈️",
            Condition::Misty => "🌫️",
            Condition::DeepForestMist => "🌫️",
            Condition::SwampRain => "🌧️",
            Condition::Snow => "🌨️",
            Condition::SnowStorm => "❄️",
            Condition::HeathClear => "🌤️",
            Condition::DarklandsDark => "🌑",
            Condition::AshRain => "🌋",
        }
    }

    /// Wind interpolation range for this condition, mirroring the game's
    /// environment setup.
    pub fn wind_range(self) -> WindRange {
        let (min, max) = match self {
            Condition::Clear => (0.0, 1.0),
            Condition::LightRain => (0.1, 0.6),
            Condition::Rain => (0.5, 1.0),
            Condition::ThunderStorm => (0.8, 1.0),
            Condition::Misty => (0.0, 0.5),
            Condition::DeepForestMist => (0.1, 0.6),
            Condition::SwampRain => (0.1, 0.8),
            Condition::Snow => (0.1, 0.6),
            Condition::SnowStorm => (0.8, 1.0),
            Condition::HeathClear => (0.4, 0.8),
            Condition::DarklandsDark => (0.1, 0.6),
            Condition::AshRain => (0.1, 0.5),
        };
        WindRange { min, max }
    }
}

/// A biome's weather table: relative weights, not normalized. The last entry
/// doubles as the catch-all if rounding leaves a residual at roll time.
pub type WeatherTable = &'static [(Condition, f64)];

const MEADOWS: WeatherTable = &[
    (Condition::Clear, 25.0),
    (Condition::Rain, 1.0),
    (Condition::Misty, 1.0),
    (Condition::ThunderStorm, 1.0),
    (Condition::LightRain, 1.0),
];

const BLACK_FOREST: WeatherTable = &[
    (Condition::DeepForestMist, 20.0),
    (Condition::Rain, 1.0),
    (Condition::Misty, 1.0),
    (Condition::ThunderStorm, 1.0),
];

const SWAMP: WeatherTable = &[(Condition::SwampRain, 1.0)];

const MOUNTAIN: WeatherTable = &[
    (Condition::SnowStorm, 1.0),
    (Condition::Snow, 5.0),
];

const PLAINS: WeatherTable = &[
    (Condition::HeathClear, 5.0),
    (Condition::Misty, 1.0),
    (Condition::LightRain, 1.0),
];

const OCEAN: WeatherTable = &[
    (Condition::Rain, 1.0),
    (Condition::LightRain, 1.0),
    (Condition::Misty, 1.0),
    (Condition::Clear, 10.0),
    (Condition::ThunderStorm, 1.0),
];

const MISTLANDS: WeatherTable = &[(Condition::DarklandsDark, 1.0)];

const ASHLANDS: WeatherTable = &[(Condition::AshRain, 1.0)];

/// The weather table for a biome.
pub fn table_for(biome: Biome) -> WeatherTable {
    match biome {
        Biome::Meadows => MEADOWS,
        Biome::BlackForest => BLACK_FOREST,
        Biome::Swamp => SWAMP,
        Biome::Mountain => MOUNTAIN,
        Biome::Plains => PLAINS,
        Biome::Ocean => OCEAN,
        Biome::Mistlands => MISTLANDS,
        Biome::Ashlands => ASHLANDS,
    }
}

/// Resolve a biome name from config or a query string. An unrecognized name
/// falls back to Meadows; that fallback is deliberate (the forecast must
/// always render) but usually means a missing table entry, so it is logged.
pub fn biome_or_meadows(name: &str) -> Biome {
    Biome::from_name(name).unwrap_or_else(|| {
        warn!("unknown biome '{name}', falling back to Meadows");
        Biome::Meadows
    })
}

/// Select one condition from a weighted table with a uniform draw in [0,1).
///
/// Walks the cumulative weights until the running sum exceeds
/// `draw * total`. Total, never fails: if floating-point rounding exhausts
/// the walk, the last entry wins.
pub fn roll_weather(table: WeatherTable, draw: f64) -> Condition {
    let total: f64 = table.iter().map(|(_, w)| w).sum();
    let threshold = draw * total;
    let mut acc = 0.0;
    for (condition, weight) in table {
        acc += weight;
        if acc > threshold {
            return *condition;
        }
    }
    // Rounding residual: the table is never empty, so this is the catch-all.
    table[table.len() - 1].0
}

/// Weather in every biome at a given period index.
///
/// The index itself is the RNG seed, which is the whole determinism
/// contract: time index in, weather out, no hidden state. One draw is taken
/// and shared by every biome's roll. During the intro grace period the game
/// forces clear skies everywhere without consulting the RNG at all.
pub fn weathers_at_index(index: u64) -> HashMap<Biome, Condition> {
    if (index as f64) * WEATHER_PERIOD < INTRO_DURATION {
        return Biome::ALL
            .iter()
            .map(|b| (*b, Condition::Clear))
            .collect();
    }

    let draw = seeded_draws(index as u32, 1)[0];

    Biome::ALL
        .iter()
        .map(|b| (*b, roll_weather(table_for(*b), draw)))
        .collect()
}
