/// Round to two decimal places (values reported as currency or percentages)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place (alert percentages)
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
