use std::cmp::Reverse;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{PinSet, UserRating};

/// Rating bands, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingClass {
    Newbie,
    Pupil,
    Specialist,
    Expert,
    Master,
    Grandmaster,
    LegendaryGrandmaster,
}

impl RatingClass {
    pub fn as_str(self) -> &'static str {
        match self {
            RatingClass::Newbie => "newbie",
            RatingClass::Pupil => "pupil",
            RatingClass::Specialist => "specialist",
            RatingClass::Expert => "expert",
            RatingClass::Master => "master",
            RatingClass::Grandmaster => "grandmaster",
            RatingClass::LegendaryGrandmaster => "legendary-grandmaster",
        }
    }
}

impl fmt::Display for RatingClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive lower bounds, highest band first.
const THRESHOLDS: [(i64, RatingClass); 6] = [
    (2400, RatingClass::LegendaryGrandmaster),
    (2200, RatingClass::Grandmaster),
    (1900, RatingClass::Master),
    (1600, RatingClass::Expert),
    (1400, RatingClass::Specialist),
    (1200, RatingClass::Pupil),
];

pub fn rating_class(rating: Option<i64>) -> RatingClass {
    let Some(rating) = rating else {
        return RatingClass::Newbie;
    };
    THRESHOLDS
        .iter()
        .find(|(min, _)| rating >= *min)
        .map(|(_, class)| *class)
        .unwrap_or(RatingClass::Newbie)
}

/// Value used for ordering only; unrated users compare as 0.
pub fn effective_rating(rating: Option<i64>) -> i64 {
    rating.unwrap_or(0)
}

/// Text shown next to a handle. Zero renders as "Unrated" too, same as a
/// missing rating.
pub fn display_rating(rating: Option<i64>) -> String {
    match rating {
        Some(r) if r != 0 => r.to_string(),
        _ => "Unrated".to_string(),
    }
}

/// Pinned users first, then everyone else; each tier sorted by rating,
/// highest first. Equal ratings keep their input order.
pub fn arrange(ratings: Vec<UserRating>, pinned: &PinSet) -> Vec<UserRating> {
    let (mut arranged, mut others): (Vec<_>, Vec<_>) = ratings
        .into_iter()
        .partition(|user| pinned.contains(&user.handle));

    arranged.sort_by_key(|user| Reverse(effective_rating(user.rating)));
    others.sort_by_key(|user| Reverse(effective_rating(user.rating)));

    arranged.extend(others);
    arranged
}
