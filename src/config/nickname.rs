//! Random nickname generator.
//!
//! Produces nicknames in the format `AdjectiveNounNN` (e.g. `NeonFox42`),
//! used when neither the config file nor the environment names the user.

use rand::RngExt;

const ADJECTIVES: &[&str] = &[
    "Fluffy", "Sleepy", "Sunny", "Mochi", "Happy", "Tiny", "Sparkly", "Cozy", "Bubbly", "Dreamy",
    "Peachy", "Lucky", "Minty", "Snowy", "Starry", "Sweet",
];

const NOUNS: &[&str] = &[
    "Cat", "Neko", "Bunny", "Panda", "Fox", "Otter", "Puff", "Bean", "Boba", "Star", "Cloud",
    "Paw", "Kit", "Mouse", "Duck", "Frog",
];

/// Generate a random nickname like `SunnyCat42`.
pub fn generate_nickname<R: RngExt>(rng: &mut R) -> String {
    let adj = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let noun = NOUNS[rng.random_range(0..NOUNS.len())];
    let num: u8 = rng.random_range(0..100);
    format!("{}{}{}", adj, noun, num)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_nickname_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let nick = generate_nickname(&mut rng);
            assert!(ADJECTIVES.iter().any(|a| nick.starts_with(a)), "{nick}");
            assert!(nick.chars().last().unwrap().is_ascii_digit(), "{nick}");
            assert!(!nick.contains(' '));
        }
    }

    #[test]
    fn test_same_seed_same_nickname() {
        let a = generate_nickname(&mut StdRng::seed_from_u64(1));
        let b = generate_nickname(&mut StdRng::seed_from_u64(1));
        assert_eq!(a, b);
    }
}
