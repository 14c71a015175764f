use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_school_tables::{Admins, Classes, Students, Teachers};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建公告表
        manager
            .create_table(
                Table::create()
                    .table(Notices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notices::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notices::Title).string().not_null())
                    .col(ColumnDef::new(Notices::Description).text().not_null())
                    .col(
                        ColumnDef::new(Notices::IsVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Notices::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Notices::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建消息表
        manager
            .create_table(
                Table::create()
                    .table(Messages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Messages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Messages::Message).text().not_null())
                    .col(
                        ColumnDef::new(Messages::IsVisible)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Messages::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Messages::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建活动表
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::EventName).string().not_null())
                    .col(ColumnDef::new(Events::EventType).string().not_null())
                    .col(ColumnDef::new(Events::StartDate).date().not_null())
                    .col(ColumnDef::new(Events::EndDate).date().not_null())
                    .col(ColumnDef::new(Events::Venue).string().null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Events::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建图片表
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Images::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Images::ImagePath).string().not_null())
                    .col(ColumnDef::new(Images::PublicId).string().not_null())
                    .col(ColumnDef::new(Images::Description).text().null())
                    .col(ColumnDef::new(Images::ImageType).string().not_null())
                    .col(ColumnDef::new(Images::StudentId).big_integer().null())
                    .col(ColumnDef::new(Images::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Images::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Images::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Images::Table, Images::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Images::Table, Images::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_images_image_type")
                    .table(Images::Table)
                    .col(Images::ImageType)
                    .to_owned(),
            )
            .await?;

        // 创建课程表（作息表）
        manager
            .create_table(
                Table::create()
                    .table(Routines::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Routines::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Routines::RoutineTitle).string().not_null())
                    .col(ColumnDef::new(Routines::ClassId).big_integer().not_null())
                    .col(ColumnDef::new(Routines::RoutineDate).date().not_null())
                    .col(ColumnDef::new(Routines::Description).text().null())
                    .col(ColumnDef::new(Routines::FileUrl).string().null())
                    .col(ColumnDef::new(Routines::FileType).string().null())
                    .col(ColumnDef::new(Routines::FilePublicId).string().null())
                    .col(ColumnDef::new(Routines::CreatedBy).big_integer().null())
                    .col(
                        ColumnDef::new(Routines::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Routines::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Routines::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Routines::Table, Routines::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Routines::Table, Routines::CreatedBy)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_routines_class_active")
                    .table(Routines::Table)
                    .col(Routines::ClassId)
                    .col(Routines::IsActive)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Routines::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Messages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notices::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Notices {
    #[sea_orm(iden = "notices")]
    Table,
    Id,
    Title,
    Description,
    IsVisible,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Messages {
    #[sea_orm(iden = "messages")]
    Table,
    Id,
    Message,
    IsVisible,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Events {
    #[sea_orm(iden = "events")]
    Table,
    Id,
    EventName,
    EventType,
    StartDate,
    EndDate,
    Venue,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Images {
    #[sea_orm(iden = "images")]
    Table,
    Id,
    ImagePath,
    PublicId,
    Description,
    ImageType,
    StudentId,
    TeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Routines {
    #[sea_orm(iden = "routines")]
    Table,
    Id,
    RoutineTitle,
    ClassId,
    RoutineDate,
    Description,
    FileUrl,
    FileType,
    FilePublicId,
    CreatedBy,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
