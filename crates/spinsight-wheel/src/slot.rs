use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::UnknownSlotError;

/// Number of distinct slots on an American wheel.
pub const SLOT_COUNT: usize = 38;

/// Straight numbers painted red on a standard American layout.
const RED_NUMBERS: [u8; 18] = [
    1, 3, 5, 7, 9, 12, 14, 16, 18, 19, 21, 23, 25, 27, 30, 32, 34, 36,
];

/// One of the 38 outcomes of an American roulette wheel.
///
/// Covers the straight numbers `0..=36` plus the double zero `00`. The set is
/// closed: a `Slot` can only be obtained through [`Slot::straight`],
/// [`Slot::DOUBLE_ZERO`], parsing, or iteration, so downstream lookups never
/// fail.
///
/// Slots are `Ord` by a fixed internal index (`0..=36` first, `00` last),
/// which gives every slot-keyed map a deterministic iteration order.
///
/// # Example
///
/// ```
/// use spinsight_wheel::Slot;
///
/// let seven = Slot::straight(7)?;
/// assert_eq!(seven.to_string(), "7");
/// assert_eq!(Slot::DOUBLE_ZERO.to_string(), "00");
/// assert_eq!("00".parse::<Slot>()?, Slot::DOUBLE_ZERO);
/// # Ok::<(), spinsight_wheel::UnknownSlotError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(pub(crate) u8);

/// Pocket color of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotColor {
    Red,
    Black,
    Green,
}

impl Slot {
    /// The double zero, the 38th pocket distinguishing an American wheel.
    pub const DOUBLE_ZERO: Slot = Slot(37);

    /// Creates a slot from a straight number `0..=36`.
    pub fn straight(value: u8) -> Result<Self, UnknownSlotError> {
        if value <= 36 {
            Ok(Self(value))
        } else {
            Err(UnknownSlotError {
                label: value.to_string(),
            })
        }
    }

    /// Returns the slot at the given internal index (`0..38`), if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        (index < SLOT_COUNT).then(|| Self(u8::try_from(index).unwrap()))
    }

    /// Internal index in `0..38`, usable as a dense array key.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The straight number of this slot, or `None` for `00`.
    #[must_use]
    pub const fn straight_value(self) -> Option<u8> {
        if self.0 <= 36 { Some(self.0) } else { None }
    }

    /// Iterates over all 38 slots in index order.
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOT_COUNT).map(|i| Self::from_index(i).unwrap())
    }

    /// Pocket color on a standard American layout.
    ///
    /// Both zeros are green.
    #[must_use]
    pub fn color(self) -> SlotColor {
        match self.straight_value() {
            None | Some(0) => SlotColor::Green,
            Some(n) if RED_NUMBERS.contains(&n) => SlotColor::Red,
            Some(_) => SlotColor::Black,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.straight_value() {
            Some(n) => write!(f, "{n}"),
            None => write!(f, "00"),
        }
    }
}

impl FromStr for Slot {
    type Err = UnknownSlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "00" {
            return Ok(Self::DOUBLE_ZERO);
        }
        s.parse::<u8>()
            .map_err(|_| UnknownSlotError {
                label: s.to_owned(),
            })
            .and_then(Self::straight)
    }
}

impl Serialize for Slot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Slot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_label_set() {
        assert!(Slot::straight(36).is_ok());
        assert!(Slot::straight(37).is_err());
        assert!(Slot::from_index(38).is_none());
        assert_eq!(Slot::all().count(), SLOT_COUNT);
    }

    #[test]
    fn test_display_parse_round_trip() {
        for slot in Slot::all() {
            let parsed: Slot = slot.to_string().parse().unwrap();
            assert_eq!(parsed, slot);
        }
        assert!("37".parse::<Slot>().is_err());
        assert!("red".parse::<Slot>().is_err());
    }

    #[test]
    fn test_colors() {
        assert_eq!(Slot::straight(0).unwrap().color(), SlotColor::Green);
        assert_eq!(Slot::DOUBLE_ZERO.color(), SlotColor::Green);
        assert_eq!(Slot::straight(1).unwrap().color(), SlotColor::Red);
        assert_eq!(Slot::straight(2).unwrap().color(), SlotColor::Black);
        assert_eq!(Slot::straight(32).unwrap().color(), SlotColor::Red);
        let reds = Slot::all().filter(|s| s.color() == SlotColor::Red).count();
        let blacks = Slot::all()
            .filter(|s| s.color() == SlotColor::Black)
            .count();
        assert_eq!((reds, blacks), (18, 18));
    }

    #[test]
    fn test_serde_as_label() {
        let json = serde_json::to_string(&Slot::DOUBLE_ZERO).unwrap();
        assert_eq!(json, "\"00\"");
        let back: Slot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Slot::DOUBLE_ZERO);
    }
}
