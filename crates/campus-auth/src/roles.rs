use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The fixed set of user profiles. The numeric ids and labels match the rows
/// seeded into `user_profiles`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Role {
    #[serde(rename = "Administrador")]
    Admin,
    #[serde(rename = "Professor")]
    Teacher,
    #[serde(rename = "Aluno")]
    Student,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Teacher, Role::Student];

    pub const fn id(self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Teacher => 2,
            Role::Student => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrador",
            Role::Teacher => "Professor",
            Role::Student => "Aluno",
        }
    }

    pub fn from_id(id: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.label() == label)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Authorization predicate: true iff the user holds at least one allowed role.
pub fn has_any_role(user_roles: &[Role], allowed: &[Role]) -> bool {
    user_roles.iter().any(|role| allowed.contains(role))
}

/// A profile set is valid when every id names a known role and none repeats.
pub fn is_valid_profile_set(profile_ids: &[i64]) -> bool {
    let all_known = profile_ids.iter().all(|id| Role::from_id(*id).is_some());
    let mut seen = profile_ids.to_vec();
    seen.sort_unstable();
    seen.dedup();
    all_known && seen.len() == profile_ids.len()
}
