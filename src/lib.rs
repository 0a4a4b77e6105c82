pub mod angles;
pub mod calculator;
pub mod error;
pub mod policy;
pub mod solar;
pub mod timetable;
pub mod types;

pub use angles::{
    asr_target_elevation, asr_target_shadow, deg_to_rad, depression_to_elevation,
    elevation_for_shadow, rad_to_deg, shadow_length, solar_elevation, HORIZON,
};

pub use calculator::{AstronomicalCalculator, PrayerTimeCalculator};

pub use error::{Error, PolarKind, Result, SolarServiceError};

pub use policy::{DayContext, AQRAB_AL_BILAD};

pub use solar::{start_of_day, DayResult, Horizon, SolarPosition, SolarPositionService, Spa};

pub use timetable::{Timetable, TimetableDay};

pub use types::{
    AsrMethod, CalculationParameters, CalculationParametersBuilder, Location, Prayer, PrayerTime,
    PrayerTimes,
};
