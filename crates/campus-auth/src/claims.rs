use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::roles::Role;

/// Identity carried by a session token.
///
/// Everything the authorization gate needs is embedded here, so protected
/// requests never go back to the database to resolve roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID
    pub id: i64,
    pub email: String,
    /// Role labels held by the user at login time
    pub roles: Vec<Role>,
    /// Issued-at (Unix timestamp)
    pub iat: usize,
    /// Expiration (Unix timestamp)
    pub exp: usize,
}

impl Claims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}
