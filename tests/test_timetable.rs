mod common;

use chrono::{Days, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;

use common::{date, FakeSky};
use prayer_times::timetable;
use prayer_times::{
    start_of_day, AstronomicalCalculator, CalculationParameters, Error, Location, Prayer,
};

fn tromso() -> Location {
    Location::with_timezone(69.6492, 18.9553, 0.0, Tz::Europe__Oslo).unwrap()
}

#[test]
fn test_timetable_consecutive_days() {
    let calculator = AstronomicalCalculator::with_service(FakeSky::regular());
    let location = Location::new(45.0, 7.0).unwrap();
    let params = CalculationParameters::default();
    let table = timetable::generate(&calculator, &location, &params, date(2025, 2, 27), 4).unwrap();

    assert_eq!(table.len(), 4);
    let dates: Vec<_> = table.days.iter().map(|d| d.date).collect();
    assert_eq!(
        dates,
        vec![date(2025, 2, 27), date(2025, 2, 28), date(2025, 3, 1), date(2025, 3, 2)]
    );
    assert_eq!(table.complete_days().count(), 4);
    assert_eq!(table.failed_days().count(), 0);
    assert_eq!(calculator.service().delta_t_calls(), 4);
}

#[test]
fn test_timetable_day_lookup() {
    let calculator = AstronomicalCalculator::with_service(FakeSky::regular());
    let location = Location::new(45.0, 7.0).unwrap();
    let params = CalculationParameters::default();
    let table = timetable::generate(&calculator, &location, &params, date(2025, 1, 30), 3).unwrap();

    assert_eq!(table.day(date(2025, 2, 1)).unwrap().date, date(2025, 2, 1));
    assert!(table.day(date(2025, 1, 29)).is_none());
    assert!(table.day(date(2025, 2, 2)).is_none());
}

#[test]
fn test_timetable_keeps_failed_days() {
    let calculator = AstronomicalCalculator::with_service(FakeSky::polar_day());
    let location = Location::new(69.6, 19.0).unwrap();
    let params = CalculationParameters::builder().use_aqrab_al_bilad(false).build();
    let table = timetable::generate(&calculator, &location, &params, date(2025, 6, 20), 3).unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table.complete_days().count(), 0);
    let failures: Vec<_> = table.failed_days().collect();
    assert_eq!(failures.len(), 3);
    assert_eq!(failures[0].0, date(2025, 6, 20));
    assert_eq!(failures[0].1.prayer(), Some(Prayer::Fajr));
}

#[test]
fn test_timetable_rejects_zero_days() {
    let calculator = AstronomicalCalculator::with_service(FakeSky::regular());
    let location = Location::new(45.0, 7.0).unwrap();
    let result = timetable::generate(
        &calculator,
        &location,
        &CalculationParameters::default(),
        date(2025, 1, 1),
        0,
    );
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[test]
fn test_timetable_rejects_range_past_last_date() {
    let calculator = AstronomicalCalculator::with_service(FakeSky::regular());
    let location = Location::new(45.0, 7.0).unwrap();
    let params = CalculationParameters::default();
    let start = NaiveDate::MAX - Days::new(2);

    for days in [4, usize::MAX / 2, usize::MAX] {
        let result = timetable::generate(&calculator, &location, &params, start, days);
        assert!(matches!(result, Err(Error::InvalidInput(_))), "{} days", days);
    }
    assert_eq!(calculator.service().delta_t_calls(), 0);

    let table = timetable::generate(&calculator, &location, &params, start, 3).unwrap();
    assert_eq!(table.days.last().unwrap().date, NaiveDate::MAX);
}

#[test]
fn test_timetable_spa_tromso_solstice() {
    // Every day around the solstice is a midnight-sun day in Tromsø.
    let calculator = AstronomicalCalculator::new();
    let params = CalculationParameters::builder()
        .fajr_angle(18.0)
        .unwrap()
        .ishaa_angle(18.0)
        .unwrap()
        .build();
    let table = timetable::generate(&calculator, &tromso(), &params, date(2025, 6, 18), 7).unwrap();
    for day in &table.days {
        let err = day.result.as_ref().unwrap_err();
        assert!(err.is_polar(), "{}: {}", day.date, err);
    }
}

#[test]
fn test_start_of_day_skips_dst_gap() {
    // Chile moved clocks forward at midnight on 2024-09-08.
    let start = start_of_day(date(2024, 9, 8), Tz::America__Santiago).unwrap();
    assert_eq!(start.date_naive(), date(2024, 9, 8));
    assert_eq!(start.time().hour(), 1);

    let regular = start_of_day(date(2024, 9, 9), Tz::America__Santiago).unwrap();
    assert_eq!(regular.time(), NaiveTime::MIN);
}
