#![allow(dead_code, unused_imports)]

use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta};
use chrono_tz::Tz;

use prayer_times::{DayResult, Horizon, SolarPosition, SolarPositionService, SolarServiceError};

macro_rules! assert_approx {
    ($left:expr, $right:expr, $tol:expr) => {
        let (l, r) = ($left as f64, $right as f64);
        assert!(
            (l - r).abs() <= $tol,
            "assert_approx failed: left={}, right={}, diff={}, tol={}",
            l, r, (l - r).abs(), $tol
        );
    };
}
pub(crate) use assert_approx;

pub const STANDARD_HORIZON: f64 = -0.8333;

/// Sky whose elevation swings linearly between `lowest` at solar midnight and
/// `highest` at transit, so every crossing is easy to predict by hand.
#[derive(Debug)]
pub struct FakeSky {
    pub transit: NaiveTime,
    pub highest: f64,
    pub lowest: f64,
    pub noon_zenith: f64,
    pub fail_delta_t: bool,
    pub fail_position: bool,
    pub delta_t_calls: AtomicUsize,
    pub position_calls: AtomicUsize,
}

impl FakeSky {
    /// Mid-latitude summer day: every prayer has a regular crossing.
    pub fn regular() -> Self {
        Self::with_range(60.0, -40.0)
    }

    /// Midnight sun: the sun never drops below 2°.
    pub fn polar_day() -> Self {
        Self::with_range(43.0, 2.0)
    }

    /// Polar night: the sun never climbs above -20°.
    pub fn polar_night() -> Self {
        Self::with_range(-20.0, -50.0)
    }

    pub fn with_range(highest: f64, lowest: f64) -> Self {
        Self {
            transit: NaiveTime::from_hms_opt(12, 7, 30).unwrap(),
            highest,
            lowest,
            noon_zenith: (90.0 - highest).max(0.0),
            fail_delta_t: false,
            fail_position: false,
            delta_t_calls: AtomicUsize::new(0),
            position_calls: AtomicUsize::new(0),
        }
    }

    pub fn delta_t_calls(&self) -> usize {
        self.delta_t_calls.load(Ordering::SeqCst)
    }

    /// Minutes from transit to the crossing of `elevation`.
    pub fn half_arc_minutes(&self, elevation: f64) -> f64 {
        720.0 * (self.highest - elevation) / (self.highest - self.lowest)
    }

    pub fn transit_on(&self, day: &DateTime<Tz>) -> DateTime<Tz> {
        let since_midnight = self.transit - NaiveTime::MIN;
        *day + since_midnight
    }
}

impl SolarPositionService for FakeSky {
    fn estimate_delta_t(&self, _date: NaiveDate) -> Result<f64, SolarServiceError> {
        self.delta_t_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_delta_t {
            return Err(SolarServiceError::Other("deltaT table exhausted".to_string()));
        }
        Ok(69.2)
    }

    fn sunrise_transit_set(
        &self,
        day: &DateTime<Tz>,
        _latitude: f64,
        _longitude: f64,
        _delta_t: f64,
        horizon: Horizon,
    ) -> Result<DayResult, SolarServiceError> {
        let elevation = match horizon {
            Horizon::Standard => STANDARD_HORIZON,
            Horizon::Elevation(angle) => angle,
        };
        let transit = self.transit_on(day);
        if elevation >= self.highest {
            return Ok(DayResult::AllNight { transit });
        }
        if elevation <= self.lowest {
            return Ok(DayResult::AllDay { transit });
        }
        let half_arc = TimeDelta::seconds((self.half_arc_minutes(elevation) * 60.0).round() as i64);
        Ok(DayResult::Regular {
            sunrise: transit - half_arc,
            transit,
            sunset: transit + half_arc,
        })
    }

    fn solar_position(
        &self,
        _instant: &DateTime<Tz>,
        _latitude: f64,
        _longitude: f64,
        _elevation: f64,
        _delta_t: f64,
        _pressure: f64,
        _temperature: f64,
    ) -> Result<SolarPosition, SolarServiceError> {
        self.position_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_position {
            return Err(SolarServiceError::Other("refraction did not converge".to_string()));
        }
        Ok(SolarPosition {
            zenith_angle: self.noon_zenith,
            azimuth: 180.0,
        })
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn hms(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, second).unwrap()
}
