//! Day/period arithmetic and forecast assembly.
//!
//! Everything upstream works in raw in-game seconds; this module turns a
//! resolved day number into the period indices that day covers and bundles
//! weather, wind, and per-biome intensity into rows ready for rendering.

use serde::Serialize;

use crate::format::{compass_direction, game_clock};
use crate::weather::{self, Biome, Condition, WEATHER_PERIOD};
use crate::wind::{self, WindSample};

/// In-game clock parameters. The day length is configuration, not a
/// constant: stock servers run 1200-second days, but modded deployments
/// commonly stretch it to 1800.
#[derive(Debug, Clone, Copy)]
pub struct GameTiming {
    day_length: f64,
}

impl GameTiming {
    pub fn new(day_length: f64) -> Self {
        Self { day_length }
    }

    /// In-game seconds at which a (1-based) day begins.
    pub fn day_start(&self, day: u64) -> f64 {
        (day.saturating_sub(1)) as f64 * self.day_length
    }

    /// Number of weather periods in one day.
    pub fn periods_per_day(&self) -> u64 {
        (self.day_length / WEATHER_PERIOD) as u64
    }

    /// Weather period index covering an in-game time.
    pub fn index_at(&self, time: f64) -> u64 {
        (time / WEATHER_PERIOD) as u64
    }

    /// Position within the day, 0.0 at dawn of the day to 1.0 at the next.
    pub fn day_fraction(&self, time: f64) -> f64 {
        time.rem_euclid(self.day_length) / self.day_length
    }
}

/// Forecast for one biome in one period.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastEntry {
    pub biome: Biome,
    pub condition: Condition,
    /// Global wind direction, degrees.
    pub wind_angle: f64,
    /// Wind strength after the condition's range mapping, [0,1].
    pub wind_intensity: f64,
    pub compass: &'static str,
}

/// Forecast for one weather period across all biomes.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastRow {
    pub day: u64,
    /// Period number within the day, 0-based.
    pub period: u64,
    /// In-game seconds at the period start.
    pub time: f64,
    /// In-game clock at the period start, "HH:MM".
    pub clock: String,
    pub entries: Vec<ForecastEntry>,
}

/// Build the forecast rows for one in-game day.
pub fn forecast_day(day: u64, timing: GameTiming) -> Vec<ForecastRow> {
    let start = timing.day_start(day);
    (0..timing.periods_per_day())
        .map(|period| {
            let time = start + period as f64 * WEATHER_PERIOD;
            forecast_row(day, period, time, timing)
        })
        .collect()
}

fn forecast_row(day: u64, period: u64, time: f64, timing: GameTiming) -> ForecastRow {
    let index = timing.index_at(time);
    let conditions = weather::weathers_at_index(index);
    let sample: WindSample = wind::global_wind_at(time);

    let entries = Biome::ALL
        .iter()
        .map(|biome| {
            let condition = conditions[biome];
            ForecastEntry {
                biome: *biome,
                condition,
                wind_angle: sample.angle,
                wind_intensity: wind::biome_wind_intensity(
                    condition.wind_range(),
                    sample.intensity,
                ),
                compass: compass_direction(sample.angle),
            }
        })
        .collect();

    ForecastRow {
        day,
        period,
        time,
        clock: game_clock(timing.day_fraction(time)),
        entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stock_day_has_ten_periods() {
        let timing = GameTiming::new(1200.0);
        assert_eq!(timing.periods_per_day(), 10);
        assert_eq!(forecast_day(5, timing).len(), 10);
    }

    #[test]
    fn stretched_day_has_fifteen_periods() {
        let timing = GameTiming::new(1800.0);
        assert_eq!(timing.periods_per_day(), 15);
    }

    #[test]
    fn day_one_starts_at_time_zero() {
        let timing = GameTiming::new(1200.0);
        assert_eq!(timing.day_start(1), 0.0);
        assert_eq!(timing.day_start(2), 1200.0);
    }

    #[test]
    fn period_indices_are_continuous_across_days() {
        let timing = GameTiming::new(1200.0);
        let day3 = forecast_day(3, timing);
        let day4 = forecast_day(4, timing);
        let last = timing.index_at(day3.last().unwrap().time);
        let first = timing.index_at(day4[0].time);
        assert_eq!(first, last + 1);
    }

    #[test]
    fn rows_carry_every_biome() {
        let timing = GameTiming::new(1200.0);
        for row in forecast_day(12, timing) {
            assert_eq!(row.entries.len(), Biome::ALL.len());
        }
    }

    #[test]
    fn forecast_is_reproducible() {
        let timing = GameTiming::new(1200.0);
        let a = forecast_day(40, timing);
        let b = forecast_day(40, timing);
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.clock, rb.clock);
            for (ea, eb) in ra.entries.iter().zip(&rb.entries) {
                assert_eq!(ea.condition, eb.condition);
                assert_eq!(ea.wind_angle, eb.wind_angle);
                assert_eq!(ea.wind_intensity, eb.wind_intensity);
            }
        }
    }

    #[test]
    fn entry_intensity_respects_condition_range() {
        let timing = GameTiming::new(1200.0);
        for row in forecast_day(25, timing) {
            for entry in &row.entries {
                let range = entry.condition.wind_range();
                assert!(
                    entry.wind_intensity >= range.min && entry.wind_intensity <= range.max,
                    "{:?}: {} outside [{}, {}]",
                    entry.condition,
                    entry.wind_intensity,
                    range.min,
                    range.max
                );
            }
        }
    }

    #[test]
    fn clock_starts_the_day_at_midnight() {
        let timing = GameTiming::new(1200.0);
        let rows = forecast_day(7, timing);
        assert_eq!(rows[0].clock, "00:00");
        // 120s of a 1200s day is a tenth: 2h24m on the 24h clock.
        assert_eq!(rows[1].clock, "02:24");
    }
}
