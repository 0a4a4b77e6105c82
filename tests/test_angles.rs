mod common;

use common::assert_approx;
use prayer_times::angles::*;
use prayer_times::AsrMethod;

// ── Conversions ──

#[test]
fn test_deg_rad_known_values() {
    assert_approx!(deg_to_rad(180.0), std::f64::consts::PI, 1e-12);
    assert_approx!(deg_to_rad(90.0), std::f64::consts::FRAC_PI_2, 1e-12);
    assert_approx!(rad_to_deg(std::f64::consts::FRAC_PI_4), 45.0, 1e-12);
}

#[test]
fn test_solar_elevation_complements_zenith() {
    assert_approx!(solar_elevation(0.0), 90.0, 1e-12);
    assert_approx!(solar_elevation(90.0), 0.0, 1e-12);
    assert_approx!(solar_elevation(108.0), -18.0, 1e-12);
}

#[test]
fn test_depression_to_elevation() {
    assert_approx!(depression_to_elevation(18.0), -18.0, 1e-12);
    assert_approx!(depression_to_elevation(12.0), -12.0, 1e-12);
}

// ── Shadows ──

#[test]
fn test_shadow_length() {
    assert_approx!(shadow_length(0.0), 0.0, 1e-12);
    assert_approx!(shadow_length(45.0), 1.0, 1e-12);
    assert_approx!(shadow_length(60.0), 3.0f64.sqrt(), 1e-12);
}

#[test]
fn test_elevation_for_shadow_inverts_shadow_length() {
    for zenith in [5.0, 20.0, 45.0, 70.0, 85.0] {
        assert_approx!(elevation_for_shadow(shadow_length(zenith)), 90.0 - zenith, 1e-9);
    }
}

// ── Asr ──

#[test]
fn test_asr_with_sun_overhead() {
    // No noon shadow: Shafii needs a shadow of one height, i.e. 45°.
    assert_approx!(asr_target_elevation(AsrMethod::Shafii, 0.0), 45.0, 1e-9);
    assert_approx!(asr_target_elevation(AsrMethod::Hanafi, 0.0), 26.565, 1e-3);
}

#[test]
fn test_asr_target_shadow_adds_factor() {
    assert_approx!(asr_target_shadow(AsrMethod::Shafii, 45.0), 2.0, 1e-12);
    assert_approx!(asr_target_shadow(AsrMethod::Hanafi, 45.0), 3.0, 1e-12);
}

#[test]
fn test_asr_hanafi_lower_than_shafii() {
    for zenith in [0.0, 10.0, 30.0, 46.2, 60.0, 80.0] {
        let shafii = asr_target_elevation(AsrMethod::Shafii, zenith);
        let hanafi = asr_target_elevation(AsrMethod::Hanafi, zenith);
        assert!(hanafi < shafii, "zenith={}: {} vs {}", zenith, hanafi, shafii);
    }
}

#[test]
fn test_asr_berlin_june() {
    // Noon zenith near 15.5° in Berlin early June.
    assert_approx!(asr_target_elevation(AsrMethod::Shafii, 15.5), 38.06, 0.01);
}
