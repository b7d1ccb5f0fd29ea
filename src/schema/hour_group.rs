use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Coarse time-of-day bucket over the 0–23 hour range.
///
/// | Hours   | Bucket    |
/// |---------|-----------|
/// | 0 – 5   | Night     |
/// | 6 – 11  | Morning   |
/// | 12 – 17 | Afternoon |
/// | 18 – 23 | Evening   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum HourGroup {
    Night,
    Morning,
    Afternoon,
    Evening,
}

impl HourGroup {
    pub const ALL: [HourGroup; 4] = [
        HourGroup::Night,
        HourGroup::Morning,
        HourGroup::Afternoon,
        HourGroup::Evening,
    ];

    /// Buckets an hour of day. Callers validate `hour <= 23` beforehand;
    /// anything above lands in `Evening`.
    pub fn from_hour(hour: u8) -> Self {
        match hour {
            0..=5 => HourGroup::Night,
            6..=11 => HourGroup::Morning,
            12..=17 => HourGroup::Afternoon,
            _ => HourGroup::Evening,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HourGroup::Night => "Night",
            HourGroup::Morning => "Morning",
            HourGroup::Afternoon => "Afternoon",
            HourGroup::Evening => "Evening",
        }
    }
}

impl fmt::Display for HourGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HourGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        HourGroup::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown hour group '{trimmed}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_group_boundaries() {
        assert_eq!(HourGroup::from_hour(0), HourGroup::Night);
        assert_eq!(HourGroup::from_hour(5), HourGroup::Night);
        assert_eq!(HourGroup::from_hour(6), HourGroup::Morning);
        assert_eq!(HourGroup::from_hour(11), HourGroup::Morning);
        assert_eq!(HourGroup::from_hour(12), HourGroup::Afternoon);
        assert_eq!(HourGroup::from_hour(17), HourGroup::Afternoon);
        assert_eq!(HourGroup::from_hour(18), HourGroup::Evening);
        assert_eq!(HourGroup::from_hour(23), HourGroup::Evening);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("morning".parse::<HourGroup>(), Ok(HourGroup::Morning));
        assert_eq!(" EVENING ".parse::<HourGroup>(), Ok(HourGroup::Evening));
        assert!("dawn".parse::<HourGroup>().is_err());
    }

    #[test]
    fn test_ordering_follows_the_clock() {
        let mut groups = vec![HourGroup::Evening, HourGroup::Night, HourGroup::Afternoon];
        groups.sort();
        assert_eq!(
            groups,
            vec![HourGroup::Night, HourGroup::Afternoon, HourGroup::Evening]
        );
    }
}
