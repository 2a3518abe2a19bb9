/// "N min" below one hour, otherwise "H hr M min"
pub fn format_travel_time(seconds: u64) -> String {
    let mins = seconds / 60;
    if mins < 60 {
        format!("{mins} min")
    } else {
        format!("{} hr {} min", mins / 60, mins % 60)
    }
}

/// "X.Y km" at or above one kilometer, otherwise "N m"
pub fn format_distance(meters: u64) -> String {
    if meters >= 1000 {
        format!("{:.1} km", meters as f64 / 1000.0)
    } else {
        format!("{meters} m")
    }
}
