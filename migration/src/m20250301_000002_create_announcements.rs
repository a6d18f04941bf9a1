use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建公告表
        // start_date / expiration_date 原样保存客户端提交的 ISO-8601 字符串，
        // starts_at / expires_at 保存归一化后的 UTC 毫秒时间戳，用于过滤
        manager
            .create_table(
                Table::create()
                    .table(Announcements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Announcements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Announcements::Message).text().not_null())
                    .col(ColumnDef::new(Announcements::StartDate).string().null())
                    .col(ColumnDef::new(Announcements::StartsAt).big_integer().null())
                    .col(
                        ColumnDef::new(Announcements::ExpirationDate)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Announcements::ExpiresAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Announcements::CreatedBy).string().not_null())
                    .col(
                        ColumnDef::new(Announcements::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_announcements_expires_at")
                    .table(Announcements::Table)
                    .col(Announcements::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_announcements_created_at")
                    .table(Announcements::Table)
                    .col(Announcements::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Announcements::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Announcements {
    Table,
    Id,
    Message,
    StartDate,
    StartsAt,
    ExpirationDate,
    ExpiresAt,
    CreatedBy,
    CreatedAt,
}
