//! Prayer policy engine.
//!
//! Each prayer maps to one crossing of one elevation:
//!
//! | prayer  | elevation                          | crossing             |
//! |---------|------------------------------------|----------------------|
//! | Fajr    | `-fajr_angle`                      | rising               |
//! | Sunrise | standard horizon                   | rising               |
//! | Dhuhr   | -                                  | transit + 1 minute   |
//! | Asr     | derived from the noon shadow       | setting              |
//! | Maghrib | standard horizon                   | setting              |
//! | Ishaa   | `-ishaa_angle`                     | setting              |
//!
//! A polar day or night fails the prayer with [`Error::PolarCondition`],
//! except Fajr which falls back to solar midnight (Aqrab al-Bilad) when the
//! parameters allow it. Ishaa deliberately has no such fallback.

use chrono::{DateTime, NaiveDate, TimeDelta};
use chrono_tz::Tz;
use log::{debug, info, trace, warn};

use crate::angles::{asr_target_shadow, depression_to_elevation, elevation_for_shadow};
use crate::error::{Error, PolarKind, Result};
use crate::solar::{start_of_day, DayResult, Horizon, SolarPositionService};
use crate::types::{CalculationParameters, Location, Prayer, PrayerTime};

pub const AQRAB_AL_BILAD: &str = "Aqrab al-Bilad";

/// Inputs shared by every prayer of one day.
#[derive(Debug, Clone, Copy)]
pub struct DayContext<'a> {
    pub date: NaiveDate,
    pub location: &'a Location,
    pub parameters: &'a CalculationParameters,
    /// TT - UT in seconds, estimated once for the date.
    pub delta_t: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    Rising,
    Setting,
}

pub fn calculate<S>(service: &S, prayer: Prayer, ctx: &DayContext<'_>) -> Result<PrayerTime>
where
    S: SolarPositionService + ?Sized,
{
    match prayer {
        Prayer::Fajr => fajr(service, ctx),
        Prayer::Sunrise => sunrise(service, ctx),
        Prayer::Dhuhr => dhuhr(service, ctx),
        Prayer::Asr => asr(service, ctx),
        Prayer::Maghrib => maghrib(service, ctx),
        Prayer::Ishaa => ishaa(service, ctx),
    }
}

pub fn fajr<S>(service: &S, ctx: &DayContext<'_>) -> Result<PrayerTime>
where
    S: SolarPositionService + ?Sized,
{
    let angle = ctx.parameters.fajr_angle();
    let horizon = Horizon::Elevation(depression_to_elevation(angle));
    match query(service, ctx, Prayer::Fajr, horizon)? {
        DayResult::Regular { sunrise, .. } => Ok(PrayerTime::with_method(
            Prayer::Fajr,
            sunrise.time(),
            false,
            astronomical(angle),
        )),
        DayResult::AllDay { .. } | DayResult::AllNight { .. }
            if ctx.parameters.use_aqrab_al_bilad() =>
        {
            aqrab_al_bilad_fajr(service, ctx)
        }
        DayResult::AllDay { .. } => Err(polar(Prayer::Fajr, ctx, PolarKind::AllDay)),
        DayResult::AllNight { .. } => Err(polar(Prayer::Fajr, ctx, PolarKind::AllNight)),
    }
}

pub fn sunrise<S>(service: &S, ctx: &DayContext<'_>) -> Result<PrayerTime>
where
    S: SolarPositionService + ?Sized,
{
    let result = query(service, ctx, Prayer::Sunrise, Horizon::Standard)?;
    let time = crossing(Prayer::Sunrise, ctx, result, Crossing::Rising)?;
    Ok(PrayerTime::with_method(Prayer::Sunrise, time.time(), false, "sunrise"))
}

/// Never polar: the sun transits the meridian even during continuous day or night.
pub fn dhuhr<S>(service: &S, ctx: &DayContext<'_>) -> Result<PrayerTime>
where
    S: SolarPositionService + ?Sized,
{
    let noon = dhuhr_instant(service, ctx, Prayer::Dhuhr)?;
    Ok(PrayerTime::with_method(
        Prayer::Dhuhr,
        noon.time(),
        false,
        "solar transit + 1 minute",
    ))
}

/// Asr starts when a gnomon's shadow exceeds its noon shadow by the method's
/// multiple of its height.
pub fn asr<S>(service: &S, ctx: &DayContext<'_>) -> Result<PrayerTime>
where
    S: SolarPositionService + ?Sized,
{
    let method = ctx.parameters.asr_method();
    let noon = dhuhr_instant(service, ctx, Prayer::Asr)?;
    let location = ctx.location;
    let position = service
        .solar_position(
            &noon,
            location.latitude(),
            location.longitude(),
            location.elevation(),
            ctx.delta_t,
            location.pressure(),
            location.temperature(),
        )
        .map_err(|e| Error::calculation(Prayer::Asr, e))?;

    let shadow = asr_target_shadow(method, position.zenith_angle);
    let elevation = elevation_for_shadow(shadow);
    trace!(
        "Asr {}: noon zenith {:.4}°, target shadow {:.4}, target elevation {:.4}°",
        method,
        position.zenith_angle,
        shadow,
        elevation
    );

    let result = query(service, ctx, Prayer::Asr, Horizon::Elevation(elevation))?;
    let time = crossing(Prayer::Asr, ctx, result, Crossing::Setting)?;
    Ok(PrayerTime::with_method(
        Prayer::Asr,
        time.time(),
        false,
        format!("shadow ratio ({} method, {:.1}° elevation)", method, elevation),
    ))
}

pub fn maghrib<S>(service: &S, ctx: &DayContext<'_>) -> Result<PrayerTime>
where
    S: SolarPositionService + ?Sized,
{
    let result = query(service, ctx, Prayer::Maghrib, Horizon::Standard)?;
    let time = crossing(Prayer::Maghrib, ctx, result, Crossing::Setting)?;
    Ok(PrayerTime::with_method(Prayer::Maghrib, time.time(), false, "sunset"))
}

pub fn ishaa<S>(service: &S, ctx: &DayContext<'_>) -> Result<PrayerTime>
where
    S: SolarPositionService + ?Sized,
{
    let angle = ctx.parameters.ishaa_angle();
    let horizon = Horizon::Elevation(depression_to_elevation(angle));
    let result = query(service, ctx, Prayer::Ishaa, horizon)?;
    let time = crossing(Prayer::Ishaa, ctx, result, Crossing::Setting)?;
    Ok(PrayerTime::with_method(
        Prayer::Ishaa,
        time.time(),
        false,
        astronomical(angle),
    ))
}

/// Solar midnight: where the sun is lowest, the nearest latitude that still
/// reaches the Fajr depression reaches it at this same instant.
pub fn aqrab_al_bilad_fajr<S>(service: &S, ctx: &DayContext<'_>) -> Result<PrayerTime>
where
    S: SolarPositionService + ?Sized,
{
    let transit = transit(service, ctx, Prayer::Fajr)?;
    let midnight = transit.time() + TimeDelta::hours(12);
    info!(
        "Fajr on {} at ({}, {}) falls back to {}",
        ctx.date,
        ctx.location.latitude(),
        ctx.location.longitude(),
        AQRAB_AL_BILAD
    );
    Ok(PrayerTime::with_method(Prayer::Fajr, midnight, true, AQRAB_AL_BILAD))
}

fn astronomical(angle: f64) -> String {
    format!("astronomical ({:.1}°)", angle)
}

fn query<S>(service: &S, ctx: &DayContext<'_>, prayer: Prayer, horizon: Horizon) -> Result<DayResult>
where
    S: SolarPositionService + ?Sized,
{
    let location = ctx.location;
    let day = start_of_day(ctx.date, location.timezone())
        .map_err(|e| Error::calculation(prayer, e))?;
    debug!("{} on {}: querying {:?} crossings", prayer, ctx.date, horizon);
    service
        .sunrise_transit_set(
            &day,
            location.latitude(),
            location.longitude(),
            ctx.delta_t,
            horizon,
        )
        .map_err(|e| Error::calculation(prayer, e))
}

fn transit<S>(service: &S, ctx: &DayContext<'_>, prayer: Prayer) -> Result<DateTime<Tz>>
where
    S: SolarPositionService + ?Sized,
{
    Ok(*query(service, ctx, prayer, Horizon::Standard)?.transit())
}

fn dhuhr_instant<S>(service: &S, ctx: &DayContext<'_>, prayer: Prayer) -> Result<DateTime<Tz>>
where
    S: SolarPositionService + ?Sized,
{
    Ok(transit(service, ctx, prayer)? + TimeDelta::minutes(1))
}

fn crossing(
    prayer: Prayer,
    ctx: &DayContext<'_>,
    result: DayResult,
    side: Crossing,
) -> Result<DateTime<Tz>> {
    match result {
        DayResult::Regular {
            sunrise, sunset, ..
        } => Ok(match side {
            Crossing::Rising => sunrise,
            Crossing::Setting => sunset,
        }),
        DayResult::AllDay { .. } => Err(polar(prayer, ctx, PolarKind::AllDay)),
        DayResult::AllNight { .. } => Err(polar(prayer, ctx, PolarKind::AllNight)),
    }
}

fn polar(prayer: Prayer, ctx: &DayContext<'_>, condition: PolarKind) -> Error {
    warn!(
        "{} on {} at ({}, {}): {:?}",
        prayer,
        ctx.date,
        ctx.location.latitude(),
        ctx.location.longitude(),
        condition
    );
    Error::PolarCondition {
        prayer,
        date: ctx.date,
        condition,
    }
}
