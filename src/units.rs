/// Sea-level reference pressure used when the caller does not supply one, in hPa.
pub const SEA_LEVEL_PRESSURE_HPA: f32 = 1013.89;

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f32, decimals: u32) -> f32 {
    let scale = (0..decimals).fold(1.0f32, |scale, _| scale * 10.0);
    libm::roundf(value * scale) / scale
}

/// Altitude in meters for `pressure_hpa` relative to `sealevel_hpa`, rounded to
/// one decimal (international barometric formula).
///
/// Negative when the pressure is above the reference.
pub fn altitude(pressure_hpa: f32, sealevel_hpa: f32) -> f32 {
    let ratio = pressure_hpa / sealevel_hpa;
    round_to(44330.0 * (1.0 - libm::powf(ratio, 1.0 / 5.255)), 1)
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 9.0 / 5.0 + 32.0
}
