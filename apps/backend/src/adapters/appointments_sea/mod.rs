//! SeaORM adapter for the `appointments` table.

use sea_orm::{ActiveModelTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, Set};

use crate::domain::appointment::{Appointment, AppointmentStatus, NewAppointment};
use crate::entities::appointments::{self, AppointmentStatusDb};
use crate::errors::domain::{DomainError, NotFoundKind};
use crate::AppError;

impl From<AppointmentStatusDb> for AppointmentStatus {
    fn from(status: AppointmentStatusDb) -> Self {
        match status {
            AppointmentStatusDb::Pending => AppointmentStatus::Pending,
            AppointmentStatusDb::Confirmed => AppointmentStatus::Confirmed,
            AppointmentStatusDb::Completed => AppointmentStatus::Completed,
            AppointmentStatusDb::Cancelled => AppointmentStatus::Cancelled,
        }
    }
}

impl From<AppointmentStatus> for AppointmentStatusDb {
    fn from(status: AppointmentStatus) -> Self {
        match status {
            AppointmentStatus::Pending => AppointmentStatusDb::Pending,
            AppointmentStatus::Confirmed => AppointmentStatusDb::Confirmed,
            AppointmentStatus::Completed => AppointmentStatusDb::Completed,
            AppointmentStatus::Cancelled => AppointmentStatusDb::Cancelled,
        }
    }
}

impl From<appointments::Model> for Appointment {
    fn from(row: appointments::Model) -> Self {
        Self {
            id: row.id,
            patient_id: row.patient_id,
            provider_id: row.provider_id,
            appointment_date: row.appointment_date,
            status: row.status.into(),
            notes: row.notes,
        }
    }
}

/// Insert a new appointment. The id comes from the store and the status is
/// always `PENDING`.
pub async fn create_appointment<C: ConnectionTrait>(
    conn: &C,
    new: NewAppointment,
) -> Result<Appointment, DbErr> {
    let active = appointments::ActiveModel {
        id: NotSet,
        patient_id: Set(new.patient_id),
        provider_id: Set(new.provider_id),
        appointment_date: Set(new.appointment_date),
        status: Set(AppointmentStatus::default().into()),
        notes: Set(new.notes),
    };

    let row = active.insert(conn).await?;
    tracing::debug!(
        appointment_id = row.id,
        provider_id = row.provider_id,
        "appointment created"
    );
    Ok(row.into())
}

pub async fn find_appointment<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<Appointment>, DbErr> {
    let row = appointments::Entity::find_by_id(id).one(conn).await?;
    Ok(row.map(Appointment::from))
}

/// Like [`find_appointment`] but a missing row is a `NotFound` error.
pub async fn require_appointment<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Appointment, AppError> {
    find_appointment(conn, id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Appointment, format!("appointment {id}")).into()
    })
}
