use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Categories a member can register under.
/// They are exchanged and stored under their display name, e.g. `Ordinary Membership`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
pub enum MembershipCategory {
    #[serde(rename = "Ordinary Membership")]
    Ordinary,
    #[serde(rename = "Bronze Membership")]
    Bronze,
    #[serde(rename = "Life Membership")]
    Life,
    #[serde(rename = "Associate Membership")]
    Associate,
    #[serde(rename = "Group Membership")]
    Group,
    #[serde(rename = "Honorary Membership")]
    Honorary,
}

impl MembershipCategory {
    pub const ALL: [MembershipCategory; 6] = [
        MembershipCategory::Ordinary,
        MembershipCategory::Bronze,
        MembershipCategory::Life,
        MembershipCategory::Associate,
        MembershipCategory::Group,
        MembershipCategory::Honorary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipCategory::Ordinary => "Ordinary Membership",
            MembershipCategory::Bronze => "Bronze Membership",
            MembershipCategory::Life => "Life Membership",
            MembershipCategory::Associate => "Associate Membership",
            MembershipCategory::Group => "Group Membership",
            MembershipCategory::Honorary => "Honorary Membership",
        }
    }
}

impl Display for MembershipCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MembershipCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MembershipCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == value)
            .ok_or_else(|| value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_every_category_from_its_name() {
        for category in MembershipCategory::ALL {
            assert_eq!(Ok(category), MembershipCategory::from_str(category.as_str()));
        }
    }

    #[test]
    fn should_serialize_as_display_name() {
        let json = serde_json::to_string(&MembershipCategory::Life).unwrap();
        assert_eq!("\"Life Membership\"", json);
    }

    #[test]
    fn should_fail_to_parse_unknown_category() {
        assert_eq!(
            Err("Platinum Membership".to_owned()),
            MembershipCategory::from_str("Platinum Membership")
        );
    }
}
