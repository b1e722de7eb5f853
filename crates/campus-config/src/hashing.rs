use std::env;

/// bcrypt accepts work factors in this range only.
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

#[derive(Clone, Debug)]
pub struct PasswordConfig {
    pub cost: u32,
}

impl PasswordConfig {
    pub fn from_env() -> Self {
        Self::with_cost(
            env::var("SALT_ROUNDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        )
    }

    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }
}
