/// Distance (km) at which sea proximity drops to one half
const SEA_HALF_DISTANCE_KM: f64 = 2.0;

/// Clamp a value into [0, 1]
#[inline]
pub fn clamp01(v: f64) -> f64 {
    if v < 0.0 {
        return 0.0;
    }
    if v > 1.0 {
        return 1.0;
    }
    v
}

/// Convert a distance to the sea into a proximity in [0, 1]
///
/// Uses a smooth decay `1 / (1 + d / 2)`: 0 km (or less) maps to 1.0, 2 km to
/// 0.5, and the value approaches 0 asymptotically as the distance grows.
///
/// # Arguments
/// * `distance_km` - Raw distance to the sea in kilometers
#[inline]
pub fn sea_proximity(distance_km: f64) -> f64 {
    if distance_km <= 0.0 {
        return 1.0;
    }
    clamp01(1.0 / (1.0 + distance_km / SEA_HALF_DISTANCE_KM))
}
