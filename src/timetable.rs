use chrono::{Days, NaiveDate};

use crate::calculator::PrayerTimeCalculator;
use crate::error::{Error, Result};
use crate::types::{CalculationParameters, Location, PrayerTimes};

#[derive(Debug)]
pub struct TimetableDay {
    pub date: NaiveDate,
    pub result: Result<PrayerTimes>,
}

/// Consecutive days for one location. A day that cannot be calculated keeps
/// its error instead of aborting the rest of the table.
#[derive(Debug)]
pub struct Timetable {
    pub location: Location,
    pub parameters: CalculationParameters,
    pub days: Vec<TimetableDay>,
}

impl Timetable {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&TimetableDay> {
        let first = self.days.first()?.date;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        self.days.get(offset)
    }

    pub fn complete_days(&self) -> impl Iterator<Item = &PrayerTimes> + '_ {
        self.days.iter().filter_map(|day| day.result.as_ref().ok())
    }

    pub fn failed_days(&self) -> impl Iterator<Item = (NaiveDate, &Error)> + '_ {
        self.days
            .iter()
            .filter_map(|day| day.result.as_ref().err().map(|e| (day.date, e)))
    }
}

pub fn generate<C>(
    calculator: &C,
    location: &Location,
    parameters: &CalculationParameters,
    start: NaiveDate,
    days: usize,
) -> Result<Timetable>
where
    C: PrayerTimeCalculator + ?Sized,
{
    if days == 0 {
        return Err(Error::invalid("a timetable needs at least one day"));
    }

    let last = u64::try_from(days - 1)
        .ok()
        .and_then(|offset| start.checked_add_days(Days::new(offset)));
    if last.is_none() {
        return Err(Error::invalid(format!(
            "{} days from {} runs past the last representable date",
            days, start
        )));
    }

    let rows = start
        .iter_days()
        .take(days)
        .map(|date| TimetableDay {
            date,
            result: calculator.calculate_all(date, location, parameters),
        })
        .collect();

    Ok(Timetable {
        location: location.clone(),
        parameters: *parameters,
        days: rows,
    })
}
