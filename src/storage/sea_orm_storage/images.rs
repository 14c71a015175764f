use super::SeaOrmStorage;
use crate::entity::images::{ActiveModel, Column, Entity as Images, Model, Relation};
use crate::errors::{Result, SchoolError};
use crate::models::images::{
    entities::{Image, ImageDetail},
    requests::{ImagePatch, NewImage},
};
use crate::storage::ImageQuery;
use crate::utils::sql::concat_name;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

#[derive(Debug, FromQueryResult)]
struct ImageDetailRow {
    id: i64,
    image_path: String,
    public_id: String,
    description: Option<String>,
    image_type: String,
    student_id: Option<i64>,
    teacher_id: Option<i64>,
    created_at: i64,
    updated_at: i64,
    student_name: Option<String>,
    teacher_name: Option<String>,
}

impl From<ImageDetailRow> for ImageDetail {
    fn from(row: ImageDetailRow) -> Self {
        let image = Model {
            id: row.id,
            image_path: row.image_path,
            public_id: row.public_id,
            description: row.description,
            image_type: row.image_type,
            student_id: row.student_id,
            teacher_id: row.teacher_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
        .into_image();

        ImageDetail {
            image,
            student_name: row.student_name,
            teacher_name: row.teacher_name,
        }
    }
}

impl SeaOrmStorage {
    /// 保存图片元数据
    pub async fn create_image_impl(&self, image: NewImage) -> Result<Image> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            image_path: Set(image.image_path),
            public_id: Set(image.public_id),
            description: Set(image.description),
            image_type: Set(image.image_type),
            student_id: Set(image.student_id),
            teacher_id: Set(image.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let created = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "保存图片信息失败"))?;

        Ok(created.into_image())
    }

    pub async fn get_image_by_id_impl(&self, id: i64) -> Result<Option<Image>> {
        let result = Images::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询图片失败: {e}")))?;

        Ok(result.map(|m| m.into_image()))
    }

    /// 按类型、学生或教师筛选图片
    pub async fn list_images_impl(&self, query: ImageQuery) -> Result<Vec<Image>> {
        let mut select = Images::find();

        if let Some(image_type) = query.image_type {
            select = select.filter(Column::ImageType.eq(image_type));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let images = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询图片列表失败: {e}")))?;

        Ok(images.into_iter().map(|m| m.into_image()).collect())
    }

    /// 附带学生/教师姓名的图片列表
    pub async fn list_image_details_impl(
        &self,
        image_type: Option<&str>,
    ) -> Result<Vec<ImageDetail>> {
        let backend = self.backend();

        let mut select = Images::find()
            .column_as(
                Expr::cust(concat_name(backend, "students.first_name", "students.last_name")),
                "student_name",
            )
            .column_as(
                Expr::cust(concat_name(backend, "teachers.first_name", "teachers.last_name")),
                "teacher_name",
            )
            .join(JoinType::LeftJoin, Relation::Student.def())
            .join(JoinType::LeftJoin, Relation::Teacher.def());

        if let Some(image_type) = image_type {
            select = select.filter(Column::ImageType.eq(image_type));
        }

        let rows = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .into_model::<ImageDetailRow>()
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询图片列表失败: {e}")))?;

        Ok(rows.into_iter().map(ImageDetail::from).collect())
    }

    pub async fn update_image_impl(&self, id: i64, patch: ImagePatch) -> Result<Option<Image>> {
        if self.get_image_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(path) = patch.image_path {
            model.image_path = Set(path);
        }
        if let Some(public_id) = patch.public_id {
            model.public_id = Set(public_id);
        }
        if let Some(description) = patch.description {
            model.description = Set(Some(description));
        }
        if let Some(image_type) = patch.image_type {
            model.image_type = Set(image_type);
        }
        if let Some(student_id) = patch.student_id {
            model.student_id = Set(Some(student_id));
        }
        if let Some(teacher_id) = patch.teacher_id {
            model.teacher_id = Set(Some(teacher_id));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolError::from_db(e, "更新图片信息失败"))?;

        Ok(Some(updated.into_image()))
    }

    pub async fn delete_image_impl(&self, id: i64) -> Result<bool> {
        let result = Images::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除图片失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
