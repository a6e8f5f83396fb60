/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Maps a raw sum in `[-max_raw, max_raw]` onto `[0, category_max]`, rounded to 0.1.
pub fn normalize_to_category(raw: f64, max_raw: f64, category_max: f64) -> f64 {
    if max_raw <= 0.0 {
        return round1(category_max / 2.0);
    }
    let scaled = category_max * (raw + max_raw) / (2.0 * max_raw);
    round1(scaled.clamp(0.0, category_max))
}

/// Applies a fine adjustment on top of a normalized score.
///
/// `round(min(category_max, base + adjustment * 2.2 * category_max) * 10) / 10`, floored at 0.
/// A non-finite adjustment leaves `base` untouched.
pub fn calculate_adjusted_score(base: f64, adjustment: f64, category_max: f64) -> f64 {
    if !adjustment.is_finite() {
        return base;
    }
    let amplified = base + adjustment * 2.2 * category_max;
    let capped = category_max.min(amplified).max(0.0);
    (capped * 10.0).round() / 10.0
}

pub(crate) fn clamp_raw(raw: f64, max_raw: f64) -> f64 {
    raw.clamp(-max_raw, max_raw)
}
