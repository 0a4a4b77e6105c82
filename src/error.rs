use chrono::NaiveDate;
use thiserror::Error;

use crate::types::Prayer;

pub type Result<T> = std::result::Result<T, Error>;

/// Which side of the queried elevation the sun stays on for the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolarKind {
    /// The sun never descends to the queried elevation (polar-day-like).
    AllDay,
    /// The sun never climbs to the queried elevation (polar-night-like).
    AllNight,
}

impl PolarKind {
    fn describe(self) -> &'static str {
        match self {
            PolarKind::AllDay => "polar day (sun stays above it all day)",
            PolarKind::AllNight => "polar night (sun stays below it all day)",
        }
    }
}

/// Failure reported by the solar position service for a reason other than a
/// polar condition.
#[derive(Debug, Error)]
pub enum SolarServiceError {
    #[error(transparent)]
    Spa(#[from] solar_positioning::Error),
    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{}", polar_message(.prayer, .date, .condition))]
    PolarCondition {
        prayer: Prayer,
        date: NaiveDate,
        condition: PolarKind,
    },

    #[error("failed to calculate {}: {source}", calculation_target(.prayer))]
    Calculation {
        prayer: Option<Prayer>,
        #[source]
        source: SolarServiceError,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    pub(crate) fn calculation(prayer: Prayer, source: SolarServiceError) -> Self {
        Error::Calculation {
            prayer: Some(prayer),
            source,
        }
    }

    /// The prayer this failure belongs to, if any.
    pub fn prayer(&self) -> Option<Prayer> {
        match self {
            Error::InvalidInput(_) => None,
            Error::PolarCondition { prayer, .. } => Some(*prayer),
            Error::Calculation { prayer, .. } => *prayer,
        }
    }

    pub fn is_polar(&self) -> bool {
        matches!(self, Error::PolarCondition { .. })
    }
}

fn calculation_target(prayer: &Option<Prayer>) -> String {
    match prayer {
        Some(p) => format!("{} time", p),
        None => "prayer times".to_string(),
    }
}

fn polar_message(prayer: &Prayer, date: &NaiveDate, condition: &PolarKind) -> String {
    let event = match prayer {
        Prayer::Fajr => "the Fajr twilight depression",
        Prayer::Sunrise => "the sunrise horizon",
        Prayer::Dhuhr => "the solar transit",
        Prayer::Asr => "the Asr shadow elevation",
        Prayer::Maghrib => "the sunset horizon",
        Prayer::Ishaa => "the Ishaa twilight depression",
    };
    let hint = match prayer {
        Prayer::Fajr => ". Consider enabling the Aqrab al-Bilad method",
        Prayer::Ishaa => ". Aqrab al-Bilad does not apply to Ishaa",
        Prayer::Sunrise | Prayer::Dhuhr | Prayer::Asr | Prayer::Maghrib => "",
    };
    format!(
        "cannot calculate {} on {}: {} is never crossed during {}{}",
        prayer,
        date,
        event,
        condition.describe(),
        hint
    )
}
