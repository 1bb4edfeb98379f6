use log::debug;
use rand::Rng;

pub const MEMBERSHIP_NUMBER_PREFIX: &str = "NPV";
const RANDOM_PART_UPPER_BOUND: u32 = 1_000_000;

pub fn format_membership_number(year: i32, random_part: u32) -> String {
    format!("{MEMBERSHIP_NUMBER_PREFIX}{year}{random_part:06}")
}

/// Draw `NPV<year><6 digits>` candidates until `is_taken` reports a free one.
pub fn generate_membership_number<R, F, E>(
    year: i32,
    rng: &mut R,
    mut is_taken: F,
) -> Result<String, E>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> Result<bool, E>,
{
    loop {
        let candidate = format_membership_number(year, rng.random_range(0..RANDOM_PART_UPPER_BOUND));
        if !is_taken(&candidate)? {
            return Ok(candidate);
        }
        debug!("Membership number {candidate} is already taken, drawing another one");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use regex::Regex;
    use std::collections::HashSet;

    mod format_membership_number {
        use crate::member::membership_number::format_membership_number;
        use parameterized::{ide, parameterized};

        ide!();

        #[parameterized(
            random_part = {0, 42, 123456, 999999},
            expected = {"NPV2025000000", "NPV2025000042", "NPV2025123456", "NPV2025999999"}
        )]
        fn should_pad_random_part(random_part: u32, expected: &str) {
            assert_eq!(expected, format_membership_number(2025, random_part));
        }
    }

    mod generate_membership_number {
        use super::*;

        #[test]
        fn should_follow_expected_format() {
            let pattern = Regex::new(r"^NPV2026[0-9]{6}$").unwrap();
            let mut rng = StdRng::seed_from_u64(7);

            for _ in 0..100 {
                let number: Result<String, ()> =
                    generate_membership_number(2026, &mut rng, |_| Ok(false));
                assert!(pattern.is_match(&number.unwrap()));
            }
        }

        #[test]
        fn should_draw_again_while_taken() {
            let mut rng = StdRng::seed_from_u64(7);
            let mut checked = vec![];

            let number: Result<String, ()> = generate_membership_number(2025, &mut rng, |candidate| {
                checked.push(candidate.to_owned());
                Ok(checked.len() <= 3)
            });

            assert_eq!(4, checked.len());
            assert_eq!(checked.last().unwrap(), &number.unwrap());
        }

        #[test]
        fn should_never_return_a_taken_number() {
            let mut rng = StdRng::seed_from_u64(11);
            let mut taken = HashSet::new();

            for _ in 0..1000 {
                let number: Result<String, ()> =
                    generate_membership_number(2025, &mut rng, |candidate| {
                        Ok(taken.contains(candidate))
                    });
                assert!(taken.insert(number.unwrap()));
            }
        }

        #[test]
        fn should_propagate_lookup_error() {
            let mut rng = StdRng::seed_from_u64(7);

            let number = generate_membership_number(2025, &mut rng, |_| Err("database unavailable"));

            assert_eq!(Err("database unavailable"), number);
        }
    }
}
