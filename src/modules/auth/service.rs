use anyhow::anyhow;
use sqlx::PgPool;
use tracing::{instrument, warn};

use campus_auth::{Role, sign_session_token};
use campus_config::JwtConfig;
use campus_core::{AppError, verify_password};
use campus_db::{TableAccessor, tables};
use campus_models::PersonSummary;
use campus_models::auth::{LoginRequest, LoginResponse};
use campus_models::users::User;

const USERS: TableAccessor<User> = TableAccessor::new(&tables::USERS);

pub struct AuthService;

impl AuthService {
    #[instrument(skip(db, jwt_config, dto), fields(email = %dto.email))]
    pub async fn login(
        db: &PgPool,
        jwt_config: &JwtConfig,
        dto: LoginRequest,
    ) -> Result<LoginResponse, AppError> {
        let user = USERS
            .find_one(db, &[("email", dto.email.as_str().into())])
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))?;

        if !verify_password(&dto.password, &user.password)? {
            warn!(user_id = user.id, "Login with wrong password");
            return Err(AppError::unauthorized(anyhow!("Invalid password")));
        }

        let roles = Self::load_roles(db, user.id).await?;
        let token = sign_session_token(user.id, &user.email, roles.clone(), jwt_config)?;

        Ok(LoginResponse {
            user: PersonSummary {
                id: user.id,
                name: user.name,
                email: user.email,
            },
            roles,
            token,
        })
    }

    /// Roles held by a user, in profile id order.
    #[instrument(skip(db))]
    pub async fn load_roles(db: &PgPool, user_id: i64) -> Result<Vec<Role>, AppError> {
        let profile_ids = sqlx::query_scalar::<_, i64>(
            "SELECT id_profile FROM associated WHERE id_user = $1 ORDER BY id_profile",
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(profile_ids.into_iter().filter_map(Role::from_id).collect())
    }
}
