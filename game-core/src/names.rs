use rand::Rng;

const ADJECTIVES: &[&str] = &["Brave", "Clever", "Happy", "Zany", "Jolly", "Lucky"];
const ANIMALS: &[&str] = &["Tiger", "Eagle", "Penguin", "Fox", "Panda", "Otter"];

/// Player name such as `BraveOtter`, for players who do not pick one.
pub fn random_player_name() -> String {
    random_player_name_with(&mut rand::rng())
}

pub fn random_player_name_with<R: Rng>(rng: &mut R) -> String {
    let adjective = ADJECTIVES[rng.random_range(0..ADJECTIVES.len())];
    let animal = ANIMALS[rng.random_range(0..ANIMALS.len())];
    format!("{}{}", adjective, animal)
}
