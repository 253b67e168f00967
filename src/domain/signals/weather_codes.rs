//! WMO weather interpretation codes, as reported by Open-Meteo.

/// Maps a WMO code to the condition label the engine understands.
pub fn weather_code_label(code: u16) -> &'static str {
    match code {
        0 => "clear",
        1 => "mainly clear",
        2 => "partly cloudy",
        3 => "overcast",
        45 | 48 => "foggy",
        51 | 53 | 55 => "drizzle",
        61 | 63 => "rain",
        65 => "heavy rain",
        71 | 73 => "snow",
        75 => "heavy snow",
        80 | 81 => "rain showers",
        82 => "heavy showers",
        95 | 96 | 99 => "thunderstorm",
        _ => "unknown",
    }
}
