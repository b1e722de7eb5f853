use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::AppError;
use campus_models::me::{MeEnrolment, Profile, UpdateMeDto};
use campus_models::users::UpdateUserDto;

use crate::modules::auth::service::AuthService;
use crate::modules::history::service::HistoryService;
use crate::modules::users::service::UserService;

pub struct MeService;

impl MeService {
    #[instrument(skip(db))]
    pub async fn get_profile(db: &PgPool, user_id: i64) -> Result<Profile, AppError> {
        let user = UserService::find_user(db, user_id).await?;

        let enrolments = sqlx::query_as::<_, MeEnrolment>(
            r#"SELECT c.id AS class_id, c.name AS class_name, co.name AS course_name,
                      e.active, e.status
               FROM enrolment e
               JOIN classes c ON c.id = e.id_class
               JOIN courses co ON co.id = c.id_course
               WHERE e.id_student = $1
               ORDER BY e.enrolled_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(Profile {
            id: user.id,
            name: user.name,
            email: user.email,
            roles: AuthService::load_roles(db, user_id).await?,
            enrolments,
            grades: UserService::get_user_grades(db, user_id).await?,
            history: HistoryService::get_history(db, user_id).await?,
        })
    }

    /// Name, email and password only; roles are managed by administrators.
    #[instrument(skip(db, dto))]
    pub async fn update_profile(
        db: &PgPool,
        user_id: i64,
        dto: UpdateMeDto,
        bcrypt_cost: u32,
    ) -> Result<(), AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!("Fields not valid")));
        }

        let update = UpdateUserDto {
            name: dto.name,
            email: dto.email,
            password: dto.password,
            profiles: None,
        };
        UserService::update_user(db, user_id, update, bcrypt_cost).await
    }
}
