use chrono::NaiveDate;
use chrono_tz::Europe::{Berlin, Oslo};

use prayer_times::{
    timetable, AsrMethod, AstronomicalCalculator, CalculationParameters, Location,
    PrayerTimeCalculator,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let calculator = AstronomicalCalculator::new();
    let date = NaiveDate::from_ymd_opt(2025, 6, 1).ok_or("invalid date")?;

    let berlin = Location::with_timezone(52.52, 13.405, 34.0, Berlin)?;
    let params = CalculationParameters::common();

    println!("=== Prayer Times Example ===");
    println!("Location: Berlin {}", berlin);
    println!("Parameters: {}", params);
    println!();

    let times = calculator.calculate_all(date, &berlin, &params)?;
    for time in &times {
        println!("{}", time);
    }
    println!();

    let hanafi = CalculationParameters::builder()
        .ishaa_angle(12.0)?
        .asr_method(AsrMethod::Hanafi)
        .build();
    let asr = calculator.calculate_asr(date, &berlin, &hanafi)?;
    println!("Hanafi {}", asr);
    println!();

    let tromso = Location::with_timezone(69.6492, 18.9553, 0.0, Oslo)?;
    let start = NaiveDate::from_ymd_opt(2025, 6, 19).ok_or("invalid date")?;
    println!("--- Tromsø around the solstice ---");
    let table = timetable::generate(&calculator, &tromso, &params, start, 5)?;
    for day in &table.days {
        match &day.result {
            Ok(times) => println!("{}: fajr {}", day.date, times.fajr()),
            Err(err) => println!("{}: {}", day.date, err),
        }
    }

    Ok(())
}
