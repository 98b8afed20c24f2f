use crate::config::sections;
use crate::geometry::Rect;
use crate::sprite::regions;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Medal {
    None,
    Bronze,
    Silver,
    Gold,
    /// Matched or beat the best score so far.
    Platinum,
}

impl Medal {
    /// `best` is the record before this run.
    pub fn select(score: u32, best: u32, thresholds: &sections::Medals) -> Medal {
        if score >= best {
            Medal::Platinum
        } else if score >= thresholds.hard {
            Medal::Gold
        } else if score >= thresholds.medium {
            Medal::Silver
        } else if score >= thresholds.easy {
            Medal::Bronze
        } else {
            Medal::None
        }
    }

    pub fn sprite(self) -> Option<Rect> {
        match self {
            Medal::None => None,
            Medal::Bronze => Some(regions::MEDAL_BRONZE),
            Medal::Silver => Some(regions::MEDAL_SILVER),
            Medal::Gold => Some(regions::MEDAL_GOLD),
            Medal::Platinum => Some(regions::MEDAL_PLATINUM),
        }
    }
}
