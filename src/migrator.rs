use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_category_table::Migration),
            Box::new(m20240101_000002_create_customer_tables::Migration),
            Box::new(m20240101_000003_create_employee_territory_tables::Migration),
            Box::new(m20240101_000004_create_product_table::Migration),
            Box::new(m20240101_000005_create_order_tables::Migration),
        ]
    }
}

// Migration implementations

mod m20240101_000001_create_category_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_category_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Category::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Category::CategoryId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Category::CategoryName).string().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Category::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Category {
        Table,
        CategoryId,
        CategoryName,
    }
}

mod m20240101_000002_create_customer_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_customer_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customer::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customer::CustomerId)
                                .string_len(5)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Customer::CompanyName).string().not_null())
                        .col(ColumnDef::new(Customer::ContactName).string().null())
                        .col(ColumnDef::new(Customer::City).string().null())
                        .col(ColumnDef::new(Customer::Country).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CustomerSetting::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CustomerSetting::CustomerId)
                                .string_len(5)
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(CustomerSetting::Setting).string().not_null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_customer_setting_customer")
                                .from(CustomerSetting::Table, CustomerSetting::CustomerId)
                                .to(Customer::Table, Customer::CustomerId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CustomerSetting::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customer::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Customer {
        Table,
        CustomerId,
        CompanyName,
        ContactName,
        City,
        Country,
    }

    #[derive(DeriveIden)]
    pub(super) enum CustomerSetting {
        Table,
        CustomerId,
        Setting,
    }
}

mod m20240101_000003_create_employee_territory_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_employee_territory_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Employee::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Employee::EmployeeId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Employee::LastName).string().not_null())
                        .col(ColumnDef::new(Employee::FirstName).string().not_null())
                        .col(
                            ColumnDef::new(Employee::BirthDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Employee::HireDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(Employee::City).string().null())
                        .col(ColumnDef::new(Employee::Country).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Territory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Territory::TerritoryId)
                                .string_len(20)
                                .not_null()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Territory::TerritoryDescription)
                                .string()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(EmployeeTerritory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(EmployeeTerritory::EmployeeId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(EmployeeTerritory::TerritoryId)
                                .string_len(20)
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(EmployeeTerritory::EmployeeId)
                                .col(EmployeeTerritory::TerritoryId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_employee_territory_employee")
                                .from(EmployeeTerritory::Table, EmployeeTerritory::EmployeeId)
                                .to(Employee::Table, Employee::EmployeeId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_employee_territory_territory")
                                .from(EmployeeTerritory::Table, EmployeeTerritory::TerritoryId)
                                .to(Territory::Table, Territory::TerritoryId),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(EmployeeTerritory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Territory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Employee::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Employee {
        Table,
        EmployeeId,
        LastName,
        FirstName,
        BirthDate,
        HireDate,
        City,
        Country,
    }

    #[derive(DeriveIden)]
    pub(super) enum Territory {
        Table,
        TerritoryId,
        TerritoryDescription,
    }

    #[derive(DeriveIden)]
    pub(super) enum EmployeeTerritory {
        Table,
        EmployeeId,
        TerritoryId,
    }
}

mod m20240101_000004_create_product_table {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_create_product_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Product::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Product::ProductId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Product::CategoryId).integer().not_null())
                        .col(ColumnDef::new(Product::ProductName).string().not_null())
                        .col(
                            ColumnDef::new(Product::UnitPrice)
                                .decimal_len(19, 4)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Product::Discontinued)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Product::RowVersion)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_product_category")
                                .from(Product::Table, Product::CategoryId)
                                .to(Category::Table, Category::CategoryId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_product_category_id")
                        .table(Product::Table)
                        .col(Product::CategoryId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Product::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Product {
        Table,
        ProductId,
        CategoryId,
        ProductName,
        UnitPrice,
        Discontinued,
        RowVersion,
    }

    #[derive(DeriveIden)]
    enum Category {
        Table,
        CategoryId,
    }
}

mod m20240101_000005_create_order_tables {

    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000005_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Order::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Order::OrderId)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Order::CustomerId).string_len(5).not_null())
                        .col(
                            ColumnDef::new(Order::OrderDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Order::ShippedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(Order::Freight).decimal_len(19, 4).null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_customer")
                                .from(Order::Table, Order::CustomerId)
                                .to(Customer::Table, Customer::CustomerId),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_order_customer_id")
                        .table(Order::Table)
                        .col(Order::CustomerId)
                        .to_owned(),
                )
                .await?;

            // Deleting an order cascades to its lines; deleting a product never
            // cascades into existing lines.
            manager
                .create_table(
                    Table::create()
                        .table(OrderDetail::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(OrderDetail::OrderId).integer().not_null())
                        .col(ColumnDef::new(OrderDetail::ProductId).integer().not_null())
                        .col(
                            ColumnDef::new(OrderDetail::Quantity)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .col(
                            ColumnDef::new(OrderDetail::UnitPrice)
                                .decimal_len(19, 4)
                                .not_null()
                                .default(0),
                        )
                        .primary_key(
                            Index::create()
                                .col(OrderDetail::OrderId)
                                .col(OrderDetail::ProductId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_detail_order")
                                .from(OrderDetail::Table, OrderDetail::OrderId)
                                .to(Order::Table, Order::OrderId)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_order_detail_product")
                                .from(OrderDetail::Table, OrderDetail::ProductId)
                                .to(Product::Table, Product::ProductId)
                                .on_delete(ForeignKeyAction::NoAction),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(OrderDetail::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Order::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum Order {
        Table,
        OrderId,
        CustomerId,
        OrderDate,
        ShippedDate,
        Freight,
    }

    #[derive(DeriveIden)]
    pub(super) enum OrderDetail {
        Table,
        OrderId,
        ProductId,
        Quantity,
        UnitPrice,
    }

    #[derive(DeriveIden)]
    enum Customer {
        Table,
        CustomerId,
    }

    #[derive(DeriveIden)]
    enum Product {
        Table,
        ProductId,
    }
}
