use std::collections::HashMap;

use anyhow::anyhow;
use sqlx::{FromRow, PgPool};
use tracing::{info, instrument};

use campus_auth::{Role, is_valid_profile_set};
use campus_core::{AppError, hash_password};
use campus_db::{AccessorError, FieldValue, TableAccessor, tables};
use campus_models::PersonSummary;
use campus_models::users::{
    Association, CreateUserDto, EnrolledClassInfo, ProfileInfo, UpdateUserDto, User,
    UserClassInfo, UserCreatedResponse, UserDetail, UserGradeInfo, UserListItem,
};

use crate::modules::history::service::HistoryService;

const USERS: TableAccessor<User> = TableAccessor::new(&tables::USERS);
const ASSOCIATED: TableAccessor<Association> = TableAccessor::new(&tables::ASSOCIATED);

#[derive(FromRow)]
struct UserProfileRow {
    id_user: i64,
    id: i64,
    name: String,
}

#[derive(FromRow)]
struct UserEnrolmentRow {
    id_student: i64,
    id_class: i64,
    class_name: String,
}

fn profile_info(role: Role) -> ProfileInfo {
    ProfileInfo {
        id: role.id(),
        name: role.label().to_string(),
    }
}

/// Profile ids must name known roles, at least one, no repeats.
fn parse_profiles(profile_ids: &[i64]) -> Result<Vec<Role>, AppError> {
    if profile_ids.is_empty() || !is_valid_profile_set(profile_ids) {
        return Err(AppError::bad_request(anyhow!("Profiles not valid")));
    }
    Ok(profile_ids.iter().copied().filter_map(Role::from_id).collect())
}

fn map_write_error(e: AccessorError) -> AppError {
    if e.is_unique_violation() {
        return AppError::conflict(anyhow!("Email already registered"));
    }
    AppError::from(e)
}

pub struct UserService;

impl UserService {
    #[instrument(skip(db, dto), fields(email = %dto.email))]
    pub async fn create_user(
        db: &PgPool,
        dto: CreateUserDto,
        bcrypt_cost: u32,
    ) -> Result<UserCreatedResponse, AppError> {
        let roles = parse_profiles(&dto.profiles)?;
        let password_hash = hash_password(&dto.password, bcrypt_cost)?;

        let mut tx = db.begin().await?;

        let user = USERS
            .create(
                &mut *tx,
                &[
                    ("name", dto.name.into()),
                    ("email", dto.email.into()),
                    ("password", password_hash.into()),
                ],
            )
            .await
            .map_err(map_write_error)?;

        for role in &roles {
            ASSOCIATED
                .create(
                    &mut *tx,
                    &[("id_user", user.id.into()), ("id_profile", role.id().into())],
                )
                .await?;
        }

        tx.commit().await?;
        info!(user_id = user.id, roles = ?roles, "User created");

        Ok(UserCreatedResponse {
            message: "User created successfully".to_string(),
            id: user.id,
            profiles: roles.into_iter().map(profile_info).collect(),
        })
    }

    #[instrument(skip(db))]
    pub async fn get_users(db: &PgPool) -> Result<Vec<UserListItem>, AppError> {
        let users =
            sqlx::query_as::<_, PersonSummary>("SELECT id, name, email FROM users ORDER BY id")
                .fetch_all(db)
                .await?;

        let mut profiles: HashMap<i64, Vec<ProfileInfo>> = HashMap::new();
        for row in Self::profile_rows(db, None).await? {
            profiles.entry(row.id_user).or_default().push(ProfileInfo {
                id: row.id,
                name: row.name,
            });
        }

        let enrolment_rows = sqlx::query_as::<_, UserEnrolmentRow>(
            r#"SELECT e.id_student, e.id_class, c.name AS class_name
               FROM enrolment e
               JOIN classes c ON c.id = e.id_class
               WHERE e.active = TRUE
               ORDER BY c.name"#,
        )
        .fetch_all(db)
        .await?;

        let mut enrolments: HashMap<i64, Vec<EnrolledClassInfo>> = HashMap::new();
        for row in enrolment_rows {
            enrolments
                .entry(row.id_student)
                .or_default()
                .push(EnrolledClassInfo {
                    id_class: row.id_class,
                    class_name: row.class_name,
                });
        }

        Ok(users
            .into_iter()
            .map(|user| UserListItem {
                profiles: profiles.remove(&user.id).unwrap_or_default(),
                enrolments: enrolments.remove(&user.id).unwrap_or_default(),
                id: user.id,
                name: user.name,
                email: user.email,
            })
            .collect())
    }

    /// One user with roles, classes (taught or actively enrolled in), grades
    /// and computed history.
    #[instrument(skip(db))]
    pub async fn get_user(db: &PgPool, id: i64) -> Result<UserDetail, AppError> {
        let user = Self::find_user(db, id).await?;

        let profiles = Self::profile_rows(db, Some(id))
            .await?
            .into_iter()
            .map(|row| ProfileInfo {
                id: row.id,
                name: row.name,
            })
            .collect();

        let classes = sqlx::query_as::<_, UserClassInfo>(
            r#"SELECT DISTINCT c.id, c.name, co.name AS course_name
               FROM classes c
               JOIN courses co ON co.id = c.id_course
               LEFT JOIN enrolment e
                      ON e.id_class = c.id AND e.id_student = $1 AND e.active = TRUE
               WHERE c.id_teacher = $1 OR e.id IS NOT NULL
               ORDER BY c.name"#,
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(UserDetail {
            id: user.id,
            name: user.name,
            email: user.email,
            profiles,
            classes,
            grades: Self::get_user_grades(db, id).await?,
            history: HistoryService::get_history(db, id).await?,
        })
    }

    /// Partial update. When `profiles` is present the user's roles are
    /// replaced; everything happens in one transaction.
    #[instrument(skip(db, dto))]
    pub async fn update_user(
        db: &PgPool,
        id: i64,
        dto: UpdateUserDto,
        bcrypt_cost: u32,
    ) -> Result<(), AppError> {
        if dto.is_empty() {
            return Err(AppError::bad_request(anyhow!("Fields not valid")));
        }

        let roles = dto.profiles.as_deref().map(parse_profiles).transpose()?;

        let mut data: Vec<(&str, FieldValue)> = Vec::new();
        if let Some(name) = dto.name {
            data.push(("name", name.into()));
        }
        if let Some(email) = dto.email {
            data.push(("email", email.into()));
        }
        if let Some(password) = dto.password {
            data.push(("password", hash_password(&password, bcrypt_cost)?.into()));
        }

        let mut tx = db.begin().await?;

        if !USERS.exists(&mut *tx, &[("id", id.into())]).await? {
            return Err(AppError::not_found(anyhow!("User not found")));
        }

        if !data.is_empty() {
            USERS
                .update(&mut *tx, id, &data, "id")
                .await
                .map_err(map_write_error)?;
        }

        if let Some(roles) = roles {
            ASSOCIATED.delete(&mut *tx, id, "id_user").await?;
            for role in roles {
                ASSOCIATED
                    .create(
                        &mut *tx,
                        &[("id_user", id.into()), ("id_profile", role.id().into())],
                    )
                    .await?;
            }
        }

        tx.commit().await?;
        info!(user_id = id, "User updated");
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn delete_user(db: &PgPool, id: i64) -> Result<(), AppError> {
        let deleted = USERS.delete(db, id, "id").await.map_err(|e| {
            if let Some(sqlx::Error::Database(db_err)) = e.as_database()
                && db_err.is_foreign_key_violation()
            {
                return AppError::conflict(anyhow!(
                    "User is still referenced by other records"
                ));
            }
            AppError::from(e)
        })?;

        if deleted == 0 {
            return Err(AppError::not_found(anyhow!("User not found")));
        }
        Ok(())
    }

    #[instrument(skip(db))]
    pub async fn get_user_grades(db: &PgPool, id: i64) -> Result<Vec<UserGradeInfo>, AppError> {
        let grades = sqlx::query_as::<_, UserGradeInfo>(
            r#"SELECT a.id AS activity_id, a.title AS activity_title, g.grade
               FROM grades g
               JOIN activities a ON a.id = g.id_activity
               WHERE g.id_student = $1
               ORDER BY a.id"#,
        )
        .bind(id)
        .fetch_all(db)
        .await?;

        Ok(grades)
    }

    pub async fn find_user(db: &PgPool, id: i64) -> Result<User, AppError> {
        USERS
            .find_one(db, &[("id", id.into())])
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("User not found")))
    }

    async fn profile_rows(
        db: &PgPool,
        user_id: Option<i64>,
    ) -> Result<Vec<UserProfileRow>, AppError> {
        let rows = sqlx::query_as::<_, UserProfileRow>(
            r#"SELECT a.id_user, p.id, p.name
               FROM associated a
               JOIN user_profiles p ON p.id = a.id_profile
               WHERE ($1::BIGINT IS NULL OR a.id_user = $1)
               ORDER BY p.id"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(rows)
    }
}
