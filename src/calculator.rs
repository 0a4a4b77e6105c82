use chrono::NaiveDate;
use log::debug;

use crate::error::{Error, Result};
use crate::policy::{self, DayContext};
use crate::solar::{SolarPositionService, Spa};
use crate::types::{CalculationParameters, Location, Prayer, PrayerTime, PrayerTimes};

/// Source of prayer times. Astronomical calculation is one implementation;
/// observation-based tables could be another.
pub trait PrayerTimeCalculator {
    /// All six markers of `date`, or the first failure. Never a partial day.
    fn calculate_all(
        &self,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTimes>;

    fn calculate_one(
        &self,
        prayer: Prayer,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTime>;

    fn calculate_fajr(
        &self,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTime> {
        self.calculate_one(Prayer::Fajr, date, location, parameters)
    }

    fn calculate_sunrise(
        &self,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTime> {
        self.calculate_one(Prayer::Sunrise, date, location, parameters)
    }

    fn calculate_dhuhr(
        &self,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTime> {
        self.calculate_one(Prayer::Dhuhr, date, location, parameters)
    }

    fn calculate_asr(
        &self,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTime> {
        self.calculate_one(Prayer::Asr, date, location, parameters)
    }

    fn calculate_maghrib(
        &self,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTime> {
        self.calculate_one(Prayer::Maghrib, date, location, parameters)
    }

    fn calculate_ishaa(
        &self,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTime> {
        self.calculate_one(Prayer::Ishaa, date, location, parameters)
    }
}

/// Calculator backed by a [`SolarPositionService`], the NREL SPA by default.
///
/// Holds no mutable state; a shared reference can be used from many threads.
#[derive(Debug, Clone, Default)]
pub struct AstronomicalCalculator<S = Spa> {
    service: S,
}

impl AstronomicalCalculator<Spa> {
    pub fn new() -> Self {
        Self { service: Spa }
    }
}

impl<S: SolarPositionService> AstronomicalCalculator<S> {
    pub fn with_service(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    fn delta_t(&self, date: NaiveDate, prayer: Option<Prayer>) -> Result<f64> {
        let delta_t = self
            .service
            .estimate_delta_t(date)
            .map_err(|source| Error::Calculation { prayer, source })?;
        debug!("deltaT for {}: {:.2} s", date, delta_t);
        Ok(delta_t)
    }
}

impl<S: SolarPositionService> PrayerTimeCalculator for AstronomicalCalculator<S> {
    fn calculate_all(
        &self,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTimes> {
        let ctx = DayContext {
            date,
            location,
            parameters,
            delta_t: self.delta_t(date, None)?,
        };
        let times = Prayer::ALL
            .iter()
            .map(|&prayer| policy::calculate(&self.service, prayer, &ctx))
            .collect::<Result<Vec<_>>>()?;
        PrayerTimes::new(date, location.clone(), times)
    }

    fn calculate_one(
        &self,
        prayer: Prayer,
        date: NaiveDate,
        location: &Location,
        parameters: &CalculationParameters,
    ) -> Result<PrayerTime> {
        let ctx = DayContext {
            date,
            location,
            parameters,
            delta_t: self.delta_t(date, Some(prayer))?,
        };
        policy::calculate(&self.service, prayer, &ctx)
    }
}
