use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Appointments {
    Table,
    Id,
    PatientId,
    ProviderId,
    AppointmentDate,
    Status,
    Notes,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // patient_id / provider_id reference records owned by other services,
        // so there are no foreign keys here.
        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Appointments::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Appointments::PatientId).big_integer().not_null())
                    .col(ColumnDef::new(Appointments::ProviderId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Appointments::AppointmentDate)
                            .date_time()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(ColumnDef::new(Appointments::Notes).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_appointments_patient_id")
                    .table(Appointments::Table)
                    .col(Appointments::PatientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_appointments_provider_date")
                    .table(Appointments::Table)
                    .col(Appointments::ProviderId)
                    .col(Appointments::AppointmentDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop indexes before the table
        manager
            .drop_index(
                Index::drop()
                    .name("ix_appointments_provider_date")
                    .table(Appointments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("ix_appointments_patient_id")
                    .table(Appointments::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;

        Ok(())
    }
}
