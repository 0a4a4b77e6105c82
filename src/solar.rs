//! Seam to the astronomical engine.
//!
//! The policy engine only asks three questions of the sky: the deltaT
//! correction for a date, when the sun crosses a given elevation on a day,
//! and where the sun is at an instant. [`Spa`] answers them with the NREL
//! solar position algorithm from the `solar-positioning` crate.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use log::warn;
use solar_positioning::{spa, time::DeltaT, RefractionCorrection, SunriseResult};

use crate::error::SolarServiceError;

const NANOS_PER_HOUR: f64 = 3_600_000_000_000.0;

/// Elevation whose crossings are queried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Horizon {
    /// Standard sunrise/sunset, corrected for refraction and the solar disc.
    Standard,
    /// Sun centre at this elevation in degrees; negative below the horizon.
    Elevation(f64),
}

/// Outcome of a rise/transit/set query. The transit exists in every case.
#[derive(Debug, Clone, PartialEq)]
pub enum DayResult {
    Regular {
        sunrise: DateTime<Tz>,
        transit: DateTime<Tz>,
        sunset: DateTime<Tz>,
    },
    AllDay {
        transit: DateTime<Tz>,
    },
    AllNight {
        transit: DateTime<Tz>,
    },
}

impl DayResult {
    pub fn transit(&self) -> &DateTime<Tz> {
        match self {
            DayResult::Regular { transit, .. }
            | DayResult::AllDay { transit }
            | DayResult::AllNight { transit } => transit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarPosition {
    pub zenith_angle: f64,
    pub azimuth: f64,
}

pub trait SolarPositionService {
    /// Difference TT - UT in seconds for `date`.
    fn estimate_delta_t(&self, date: NaiveDate) -> Result<f64, SolarServiceError>;

    /// Crossings of `horizon` on the local day starting at `day`.
    fn sunrise_transit_set(
        &self,
        day: &DateTime<Tz>,
        latitude: f64,
        longitude: f64,
        delta_t: f64,
        horizon: Horizon,
    ) -> Result<DayResult, SolarServiceError>;

    /// Topocentric position with refraction for the given atmosphere, or
    /// without refraction when the atmosphere is outside the model.
    #[allow(clippy::too_many_arguments)]
    fn solar_position(
        &self,
        instant: &DateTime<Tz>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        delta_t: f64,
        pressure: f64,
        temperature: f64,
    ) -> Result<SolarPosition, SolarServiceError>;
}

/// First existing instant of `date` in `tz`. Midnight can fall into a DST gap,
/// in which case the day starts when the gap ends.
pub fn start_of_day(date: NaiveDate, tz: Tz) -> Result<DateTime<Tz>, SolarServiceError> {
    (0..=12)
        .map(|quarter| date.and_time(NaiveTime::MIN) + TimeDelta::minutes(15 * quarter))
        .find_map(|local| tz.from_local_datetime(&local).earliest())
        .ok_or_else(|| {
            SolarServiceError::Other(format!("no start of day for {} in {}", date, tz.name()))
        })
}

/// NREL SPA through the `solar-positioning` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spa;

impl Spa {
    fn utc_hours_to_local(date: NaiveDate, hours: f64, tz: &Tz) -> DateTime<Tz> {
        let midnight = date.and_time(NaiveTime::MIN).and_utc();
        let offset = TimeDelta::nanoseconds((hours * NANOS_PER_HOUR).round() as i64);
        (midnight + offset).with_timezone(tz)
    }
}

impl SolarPositionService for Spa {
    fn estimate_delta_t(&self, date: NaiveDate) -> Result<f64, SolarServiceError> {
        Ok(DeltaT::estimate_from_date(date.year(), date.month())?)
    }

    fn sunrise_transit_set(
        &self,
        day: &DateTime<Tz>,
        latitude: f64,
        longitude: f64,
        delta_t: f64,
        horizon: Horizon,
    ) -> Result<DayResult, SolarServiceError> {
        let date = day.date_naive();
        let (year, month, dom) = (date.year(), date.month(), date.day());
        let result = match horizon {
            Horizon::Standard => spa::sunrise_sunset_utc_for_horizon(
                year,
                month,
                dom,
                latitude,
                longitude,
                delta_t,
                solar_positioning::Horizon::SunriseSunset,
            )?,
            Horizon::Elevation(angle) => {
                spa::sunrise_sunset_utc(year, month, dom, latitude, longitude, delta_t, angle)?
            }
        };

        let tz = day.timezone();
        let local = |hours: f64| Self::utc_hours_to_local(date, hours, &tz);
        Ok(match result {
            SunriseResult::RegularDay {
                sunrise,
                transit,
                sunset,
            } => DayResult::Regular {
                sunrise: local(sunrise.hours()),
                transit: local(transit.hours()),
                sunset: local(sunset.hours()),
            },
            SunriseResult::AllDay { transit } => DayResult::AllDay {
                transit: local(transit.hours()),
            },
            SunriseResult::AllNight { transit } => DayResult::AllNight {
                transit: local(transit.hours()),
            },
        })
    }

    fn solar_position(
        &self,
        instant: &DateTime<Tz>,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        delta_t: f64,
        pressure: f64,
        temperature: f64,
    ) -> Result<SolarPosition, SolarServiceError> {
        // SPA only models refraction for 0 < p <= 2000 hPa and T <= 100 °C.
        let refraction = match RefractionCorrection::new(pressure, temperature) {
            Ok(refraction) => Some(refraction),
            Err(err) => {
                warn!(
                    "no refraction correction for {:.1} hPa, {:.1}°C: {}",
                    pressure, temperature, err
                );
                None
            }
        };
        let position =
            spa::solar_position(*instant, latitude, longitude, elevation, delta_t, refraction)?;
        Ok(SolarPosition {
            zenith_angle: position.zenith_angle(),
            azimuth: position.azimuth(),
        })
    }
}
