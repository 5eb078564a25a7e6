use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_users_table::Migration),
            Box::new(m20240101_000002_create_items_table::Migration),
            Box::new(m20240101_000003_create_item_histories_table::Migration),
            Box::new(m20240101_000004_create_item_requests_table::Migration),
            Box::new(m20240101_000005_create_used_items_table::Migration),
            Box::new(m20240101_000006_create_purchase_order_items_table::Migration),
            Box::new(m20240101_000007_create_notifications_table::Migration),
        ]
    }
}

mod m20240101_000001_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Users::Username)
                                .string_len(150)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::Email).string().not_null())
                        .col(ColumnDef::new(Users::Role).string_len(10).not_null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Users {
        Table,
        Id,
        Username,
        PasswordHash,
        Email,
        Role,
        CreatedAt,
    }
}

mod m20240101_000002_create_items_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Items::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Items::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Items::Manufacturer)
                                .string_len(50)
                                .not_null()
                                .default("N/A"),
                        )
                        .col(
                            ColumnDef::new(Items::Model)
                                .string_len(100)
                                .not_null()
                                .default("N/A"),
                        )
                        .col(
                            ColumnDef::new(Items::PartOrUnit)
                                .string_len(5)
                                .not_null()
                                .default("Part"),
                        )
                        .col(
                            ColumnDef::new(Items::PartNumber)
                                .string_len(100)
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Items::Description)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(Items::Location)
                                .string_len(50)
                                .not_null()
                                .default("N/A"),
                        )
                        .col(ColumnDef::new(Items::Quantity).integer().not_null().default(0))
                        .col(
                            ColumnDef::new(Items::MinQuantity)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Items::UnitPrice)
                                .decimal_len(16, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Items::LastModifiedBy).uuid().null())
                        .col(
                            ColumnDef::new(Items::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Items::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Items::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Items {
        Table,
        Id,
        Manufacturer,
        Model,
        PartOrUnit,
        PartNumber,
        Description,
        Location,
        Quantity,
        MinQuantity,
        UnitPrice,
        LastModifiedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000003_create_item_histories_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_item_histories_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // No foreign key on item_id: audit rows outlive the item they
            // describe.
            manager
                .create_table(
                    Table::create()
                        .table(ItemHistories::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ItemHistories::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ItemHistories::ItemId).uuid().not_null())
                        .col(
                            ColumnDef::new(ItemHistories::Action)
                                .string_len(6)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemHistories::Timestamp)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ItemHistories::Actor).uuid().null())
                        .col(ColumnDef::new(ItemHistories::Changes).text().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_item_histories_item_id")
                        .table(ItemHistories::Table)
                        .col(ItemHistories::ItemId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ItemHistories::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ItemHistories {
        Table,
        Id,
        ItemId,
        Action,
        Timestamp,
        Actor,
        Changes,
    }
}

mod m20240101_000004_create_item_requests_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_item_requests_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ItemRequests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ItemRequests::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemRequests::Manufacturer)
                                .string_len(100)
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(ItemRequests::ModelPartNum)
                                .string_len(100)
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(ItemRequests::QuantityRequested)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemRequests::Description)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(ItemRequests::UnitPrice)
                                .decimal_len(14, 2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(ItemRequests::RequestedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(ItemRequests::Timestamp)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemRequests::Status)
                                .string_len(8)
                                .not_null()
                                .default("Pending"),
                        )
                        .col(ColumnDef::new(ItemRequests::StatusChangedBy).uuid().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_item_requests_status")
                        .table(ItemRequests::Table)
                        .col(ItemRequests::Status)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ItemRequests::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum ItemRequests {
        Table,
        Id,
        Manufacturer,
        ModelPartNum,
        QuantityRequested,
        Description,
        UnitPrice,
        RequestedBy,
        Timestamp,
        Status,
        StatusChangedBy,
    }
}

mod m20240101_000005_create_used_items_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_used_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UsedItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UsedItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UsedItems::ItemId).uuid().not_null())
                        .col(ColumnDef::new(UsedItems::WorkOrder).integer().not_null())
                        .col(
                            ColumnDef::new(UsedItems::DatetimeUsed)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UsedItems::UsedBy).uuid().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_used_items_item_id")
                        .table(UsedItems::Table)
                        .col(UsedItems::ItemId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UsedItems::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum UsedItems {
        Table,
        Id,
        ItemId,
        WorkOrder,
        DatetimeUsed,
        UsedBy,
    }
}

mod m20240101_000006_create_purchase_order_items_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000006_create_purchase_order_items_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Manufacturer)
                                .string_len(100)
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::ModelPartNum)
                                .string_len(100)
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::QuantityOrdered)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Description)
                                .text()
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::SerialNum)
                                .string_len(100)
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::PropertyNum)
                                .string_len(100)
                                .not_null()
                                .default(""),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::UnitPrice)
                                .decimal_len(14, 2)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrderItems::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum PurchaseOrderItems {
        Table,
        Id,
        Manufacturer,
        ModelPartNum,
        QuantityOrdered,
        Description,
        SerialNum,
        PropertyNum,
        UnitPrice,
        CreatedAt,
    }
}

mod m20240101_000007_create_notifications_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000007_create_notifications_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Notifications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Notifications::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Notifications::IsRead)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Notifications::Subject)
                                .string_len(100)
                                .not_null()
                                .default(""),
                        )
                        .col(ColumnDef::new(Notifications::Message).text().not_null())
                        .col(
                            ColumnDef::new(Notifications::Timestamp)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Notifications::UserId).uuid().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_notifications_user_id")
                        .table(Notifications::Table)
                        .col(Notifications::UserId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Notifications::Table).to_owned())
                .await
        }
    }

    #[derive(Iden)]
    enum Notifications {
        Table,
        Id,
        IsRead,
        Subject,
        Message,
        Timestamp,
        UserId,
    }
}
