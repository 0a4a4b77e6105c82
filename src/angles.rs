use crate::types::AsrMethod;

/// Elevation of the geometric horizon, in degrees.
pub const HORIZON: f64 = 0.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    deg * (std::f64::consts::PI / 180.0)
}

pub fn rad_to_deg(rad: f64) -> f64 {
    rad * (180.0 / std::f64::consts::PI)
}

pub fn solar_elevation(zenith_angle: f64) -> f64 {
    90.0 - zenith_angle
}

/// Shadow of a unit-height gnomon for the sun at `zenith_angle` degrees.
pub fn shadow_length(zenith_angle: f64) -> f64 {
    deg_to_rad(zenith_angle).tan()
}

/// Elevation at which a unit gnomon casts a shadow of `shadow` heights.
pub fn elevation_for_shadow(shadow: f64) -> f64 {
    solar_elevation(rad_to_deg(shadow.atan()))
}

/// Asr shadow: the method's multiple of the object height plus the noon shadow.
pub fn asr_target_shadow(method: AsrMethod, noon_zenith_angle: f64) -> f64 {
    method.shadow_factor() + shadow_length(noon_zenith_angle)
}

/// Solar elevation, in degrees, at which the afternoon Asr shadow is reached.
pub fn asr_target_elevation(method: AsrMethod, noon_zenith_angle: f64) -> f64 {
    elevation_for_shadow(asr_target_shadow(method, noon_zenith_angle))
}

/// Elevation passed to the solar service for a depression below the horizon.
pub fn depression_to_elevation(depression: f64) -> f64 {
    HORIZON - depression
}
