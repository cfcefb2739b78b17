//! Presentation helpers: compass rose, in-game clock, forecast tables.

use crate::forecast::ForecastRow;
use crate::weather::Biome;

/// The 16-wind compass rose, clockwise from north.
pub const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Map a wind angle in degrees to its compass point. Each point owns a
/// 22.5-degree sector centered on its heading, so north covers
/// [348.75, 360) and [0, 11.25).
pub fn compass_direction(angle_deg: f64) -> &'static str {
    let sector = ((angle_deg + 11.25).rem_euclid(360.0) / 22.5) as usize % 16;
    COMPASS_POINTS[sector]
}

/// Render a position within the in-game day as a 24-hour clock string.
pub fn game_clock(day_fraction: f64) -> String {
    let minutes = ((day_fraction.rem_euclid(1.0) * 1440.0).round() as u64).min(1439);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Render forecast rows as a plain-text table, one line per weather period.
/// `only` restricts the output to a single biome.
pub fn render_forecast(rows: &[ForecastRow], only: Option<Biome>) -> String {
    let biomes: Vec<Biome> = match only {
        Some(biome) => vec![biome],
        None => Biome::ALL.to_vec(),
    };

    let mut out = String::new();
    if let Some(first) = rows.first() {
        out.push_str(&format!("Day {}\n", first.day));
    }

    out.push_str(&format!("{:>5}", "time"));
    for biome in &biomes {
        let header = format!("{} {}", biome.icon(), biome.name());
        out.push_str(&format!("  {header:<22}"));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{:>5}", row.clock));
        for biome in &biomes {
            if let Some(entry) = row.entries.iter().find(|e| e.biome == *biome) {
                let cell = format!(
                    "{} {} {:>3.0}% {}",
                    entry.condition.icon(),
                    entry.condition.label(),
                    entry.wind_intensity * 100.0,
                    entry.compass,
                );
                out.push_str(&format!("  {cell:<22}"));
            }
        }
        out.push('\n');
    }
    out
}
