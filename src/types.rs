use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::error::{Error, Result};

pub const DEFAULT_ELEVATION: f64 = 0.0;
pub const DEFAULT_PRESSURE: f64 = 1010.0;
pub const DEFAULT_TEMPERATURE: f64 = 15.0;
pub const DEFAULT_FAJR_ANGLE: f64 = 18.0;
pub const DEFAULT_ISHAA_ANGLE: f64 = 18.0;
pub const COMMON_ISHAA_ANGLE: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Ishaa,
}

impl Prayer {
    /// All six markers in the order they occur during a regular day.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Ishaa,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Sunrise => "Sunrise",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Ishaa => "Ishaa",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Jurisprudential rule fixing the shadow multiplier that starts Asr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AsrMethod {
    #[default]
    Shafii,
    Hanafi,
}

impl AsrMethod {
    /// Shadow length, in object heights, added to the noon shadow.
    pub fn shadow_factor(self) -> f64 {
        match self {
            AsrMethod::Shafii => 1.0,
            AsrMethod::Hanafi => 2.0,
        }
    }
}

impl fmt::Display for AsrMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsrMethod::Shafii => f.write_str("Shafii"),
            AsrMethod::Hanafi => f.write_str("Hanafi"),
        }
    }
}

/// Observer position plus the atmospheric conditions used for refraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    latitude: f64,
    longitude: f64,
    elevation: f64,
    pressure: f64,
    temperature: f64,
    timezone: Tz,
}

impl Location {
    /// Location at sea level in UTC with standard atmosphere.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Self::with_timezone(latitude, longitude, DEFAULT_ELEVATION, Tz::UTC)
    }

    pub fn with_timezone(latitude: f64, longitude: f64, elevation: f64, timezone: Tz) -> Result<Self> {
        Self::with_atmosphere(
            latitude,
            longitude,
            elevation,
            DEFAULT_PRESSURE,
            DEFAULT_TEMPERATURE,
            timezone,
        )
    }

    pub fn with_atmosphere(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        pressure: f64,
        temperature: f64,
        timezone: Tz,
    ) -> Result<Self> {
        check_range("latitude", latitude, -90.0, 90.0, "degrees")?;
        check_range("longitude", longitude, -180.0, 180.0, "degrees")?;
        if !elevation.is_finite() {
            return Err(Error::invalid(format!("elevation must be finite, got {}", elevation)));
        }
        check_range("pressure", pressure, 0.0, 3000.0, "hPa")?;
        check_range("temperature", temperature, -273.0, 273.0, "degrees Celsius")?;
        Ok(Self {
            latitude,
            longitude,
            elevation,
            pressure,
            temperature,
            timezone,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Meters above sea level.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Hectopascals.
    pub fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Degrees Celsius.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.6}°, {:.6}°) {:.1} m, {:.1} hPa, {:.1}°C, {}",
            self.latitude,
            self.longitude,
            self.elevation,
            self.pressure,
            self.temperature,
            self.timezone.name()
        )
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64, unit: &str) -> Result<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{} must be between {} and {} {}, got {}",
            field, min, max, unit, value
        )))
    }
}

fn check_depression(field: &str, angle: f64) -> Result<()> {
    if angle.is_finite() && angle > 0.0 && angle < 90.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "{} must be strictly between 0 and 90 degrees, got {}",
            field, angle
        )))
    }
}

/// Jurisprudential settings. Only obtainable through [`CalculationParameters::builder`]
/// or [`Default`], so every instance is in range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParameters {
    fajr_angle: f64,
    ishaa_angle: f64,
    asr_method: AsrMethod,
    use_aqrab_al_bilad: bool,
}

impl CalculationParameters {
    pub fn builder() -> CalculationParametersBuilder {
        CalculationParametersBuilder::default()
    }

    /// Widely used preset: Fajr at 18°, Ishaa at 12°, Shafii Asr, with the
    /// Aqrab al-Bilad fallback.
    pub fn common() -> Self {
        Self {
            ishaa_angle: COMMON_ISHAA_ANGLE,
            ..Self::default()
        }
    }

    /// Solar depression below the horizon that starts Fajr, in degrees.
    pub fn fajr_angle(&self) -> f64 {
        self.fajr_angle
    }

    /// Solar depression below the horizon that starts Ishaa, in degrees.
    pub fn ishaa_angle(&self) -> f64 {
        self.ishaa_angle
    }

    pub fn asr_method(&self) -> AsrMethod {
        self.asr_method
    }

    pub fn use_aqrab_al_bilad(&self) -> bool {
        self.use_aqrab_al_bilad
    }
}

impl Default for CalculationParameters {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Display for CalculationParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fajr {:.1}°, ishaa {:.1}°, asr {}, aqrab al-bilad {}",
            self.fajr_angle,
            self.ishaa_angle,
            self.asr_method,
            if self.use_aqrab_al_bilad { "on" } else { "off" }
        )
    }
}

/// Builder whose angle setters reject out-of-range values immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParametersBuilder {
    fajr_angle: f64,
    ishaa_angle: f64,
    asr_method: AsrMethod,
    use_aqrab_al_bilad: bool,
}

impl Default for CalculationParametersBuilder {
    fn default() -> Self {
        Self {
            fajr_angle: DEFAULT_FAJR_ANGLE,
            ishaa_angle: DEFAULT_ISHAA_ANGLE,
            asr_method: AsrMethod::Shafii,
            use_aqrab_al_bilad: true,
        }
    }
}

impl CalculationParametersBuilder {
    pub fn fajr_angle(mut self, angle: f64) -> Result<Self> {
        check_depression("Fajr angle", angle)?;
        self.fajr_angle = angle;
        Ok(self)
    }

    pub fn ishaa_angle(mut self, angle: f64) -> Result<Self> {
        check_depression("Ishaa angle", angle)?;
        self.ishaa_angle = angle;
        Ok(self)
    }

    pub fn asr_method(mut self, method: AsrMethod) -> Self {
        self.asr_method = method;
        self
    }

    pub fn use_aqrab_al_bilad(mut self, enabled: bool) -> Self {
        self.use_aqrab_al_bilad = enabled;
        self
    }

    pub fn build(self) -> CalculationParameters {
        CalculationParameters {
            fajr_angle: self.fajr_angle,
            ishaa_angle: self.ishaa_angle,
            asr_method: self.asr_method,
            use_aqrab_al_bilad: self.use_aqrab_al_bilad,
        }
    }
}

/// One calculated marker in local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerTime {
    prayer: Prayer,
    time: NaiveTime,
    is_aqrab_al_bilad: bool,
    calculation_method: Option<String>,
}

impl PrayerTime {
    pub fn new(prayer: Prayer, time: NaiveTime, is_aqrab_al_bilad: bool) -> Self {
        Self {
            prayer,
            time,
            is_aqrab_al_bilad,
            calculation_method: None,
        }
    }

    pub fn with_method(
        prayer: Prayer,
        time: NaiveTime,
        is_aqrab_al_bilad: bool,
        method: impl Into<String>,
    ) -> Self {
        Self {
            prayer,
            time,
            is_aqrab_al_bilad,
            calculation_method: Some(method.into()),
        }
    }

    pub fn prayer(&self) -> Prayer {
        self.prayer
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// True when the value came from the Aqrab al-Bilad fallback.
    pub fn is_aqrab_al_bilad(&self) -> bool {
        self.is_aqrab_al_bilad
    }

    pub fn calculation_method(&self) -> Option<&str> {
        self.calculation_method.as_deref()
    }
}

impl fmt::Display for PrayerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.prayer, self.time.format("%H:%M:%S"))?;
        if self.is_aqrab_al_bilad {
            f.write_str(" (Aqrab al-Bilad)")?;
        }
        if let Some(method) = &self.calculation_method {
            write!(f, " [{}]", method)?;
        }
        Ok(())
    }
}

/// A complete day: all six markers are present by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PrayerTimes {
    date: NaiveDate,
    location: Location,
    times: [PrayerTime; 6],
}

impl PrayerTimes {
    /// Fails when a prayer is missing or appears twice.
    pub fn new(
        date: NaiveDate,
        location: Location,
        times: impl IntoIterator<Item = PrayerTime>,
    ) -> Result<Self> {
        let mut slots: [Option<PrayerTime>; 6] = Default::default();
        for time in times {
            let slot = &mut slots[time.prayer.index()];
            if slot.is_some() {
                return Err(Error::invalid(format!("duplicate prayer time for {}", time.prayer)));
            }
            *slot = Some(time);
        }
        if let Some(missing) = Prayer::ALL.iter().find(|p| slots[p.index()].is_none()) {
            return Err(Error::invalid(format!("missing prayer time for {}", missing)));
        }
        let [Some(fajr), Some(sunrise), Some(dhuhr), Some(asr), Some(maghrib), Some(ishaa)] = slots
        else {
            return Err(Error::invalid("incomplete prayer times"));
        };
        Ok(Self {
            date,
            location,
            times: [fajr, sunrise, dhuhr, asr, maghrib, ishaa],
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn get(&self, prayer: Prayer) -> &PrayerTime {
        &self.times[prayer.index()]
    }

    pub fn fajr(&self) -> &PrayerTime {
        self.get(Prayer::Fajr)
    }

    pub fn sunrise(&self) -> &PrayerTime {
        self.get(Prayer::Sunrise)
    }

    pub fn dhuhr(&self) -> &PrayerTime {
        self.get(Prayer::Dhuhr)
    }

    pub fn asr(&self) -> &PrayerTime {
        self.get(Prayer::Asr)
    }

    pub fn maghrib(&self) -> &PrayerTime {
        self.get(Prayer::Maghrib)
    }

    pub fn ishaa(&self) -> &PrayerTime {
        self.get(Prayer::Ishaa)
    }

    /// Markers in chronological prayer order.
    pub fn iter(&self) -> std::slice::Iter<'_, PrayerTime> {
        self.times.iter()
    }
}

impl<'a> IntoIterator for &'a PrayerTimes {
    type Item = &'a PrayerTime;
    type IntoIter = std::slice::Iter<'a, PrayerTime>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for PrayerTimes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.date, self.location)?;
        for time in &self.times {
            writeln!(f, "  {}", time)?;
        }
        Ok(())
    }
}
