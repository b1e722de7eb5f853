use anyhow::anyhow;
use sqlx::PgPool;
use tracing::instrument;

use campus_core::AppError;
use campus_db::{TableAccessor, tables};
use campus_models::classes::Class;
use campus_models::materials::{CreateMaterialDto, Material, MaterialView};

const MATERIALS: TableAccessor<Material> = TableAccessor::new(&tables::MATERIALS);
const CLASSES: TableAccessor<Class> = TableAccessor::new(&tables::CLASSES);

const MATERIAL_VIEW_SELECT: &str = r#"
    SELECT m.id, m.id_class, c.name AS class_name, co.name AS course_name,
           m.title, m.description, m.posted_at
    FROM materials m
    JOIN classes c ON c.id = m.id_class
    JOIN courses co ON co.id = c.id_course"#;

pub struct MaterialService;

impl MaterialService {
    #[instrument(skip(db))]
    pub async fn create_material(db: &PgPool, dto: CreateMaterialDto) -> Result<Material, AppError> {
        if !CLASSES.exists(db, &[("id", dto.id_class.into())]).await? {
            return Err(AppError::bad_request(anyhow!("Class not found")));
        }

        MATERIALS
            .create(
                db,
                &[
                    ("id_class", dto.id_class.into()),
                    ("title", dto.title.into()),
                    ("description", dto.description.into()),
                ],
            )
            .await
            .map_err(|e| {
                if e.is_unique_violation() {
                    return AppError::conflict(anyhow!("Material already exists"));
                }
                AppError::from(e)
            })
    }

    #[instrument(skip(db))]
    pub async fn get_materials(db: &PgPool) -> Result<Vec<MaterialView>, AppError> {
        let sql = format!("{MATERIAL_VIEW_SELECT} ORDER BY m.posted_at DESC, m.id");
        let materials = sqlx::query_as::<_, MaterialView>(&sql).fetch_all(db).await?;
        Ok(materials)
    }

    #[instrument(skip(db))]
    pub async fn get_material(db: &PgPool, id: i64) -> Result<MaterialView, AppError> {
        let sql = format!("{MATERIAL_VIEW_SELECT} WHERE m.id = $1");
        sqlx::query_as::<_, MaterialView>(&sql)
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(|| AppError::not_found(anyhow!("Material not found")))
    }

    #[instrument(skip(db))]
    pub async fn get_class_materials(
        db: &PgPool,
        class_id: i64,
    ) -> Result<Vec<MaterialView>, AppError> {
        if !CLASSES.exists(db, &[("id", class_id.into())]).await? {
            return Err(AppError::not_found(anyhow!("Class not found")));
        }

        let sql = format!("{MATERIAL_VIEW_SELECT} WHERE m.id_class = $1 ORDER BY m.posted_at DESC");
        let materials = sqlx::query_as::<_, MaterialView>(&sql)
            .bind(class_id)
            .fetch_all(db)
            .await?;
        Ok(materials)
    }
}
