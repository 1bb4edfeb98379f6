use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            _ => Err(value.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    #[parameterized(
        value = {"Male", "Female"},
        expected_result = {Gender::Male, Gender::Female}
    )]
    fn should_parse_gender(value: &str, expected_result: Gender) {
        assert_eq!(Ok(expected_result), Gender::from_str(value));
        assert_eq!(value, expected_result.to_string());
    }

    #[parameterized(value = {"male", "", "Other"})]
    fn should_fail_to_parse_gender(value: &str) {
        assert_eq!(Err(value.to_owned()), Gender::from_str(value));
    }
}
