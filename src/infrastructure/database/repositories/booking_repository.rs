//! SeaORM implementation of BookingRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::booking::{Booking, BookingId, BookingRepository, TimeSlot};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::booking;
use crate::shared::errors::InfraError;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    // Rows are only written from valid slots, so a failure here means the
    // table was edited by hand.
    let slot = TimeSlot::new(m.booking_date, m.start_time, m.end_time).map_err(|e| {
        InfraError::Corrupt {
            id: m.id,
            reason: e.to_string(),
        }
    })?;
    Ok(Booking::new(Some(m.id), slot))
}

fn active_model(b: &Booking) -> booking::ActiveModel {
    let slot = b.time_slot();
    booking::ActiveModel {
        id: b.id().map(Set).unwrap_or(NotSet),
        booking_date: Set(slot.date()),
        start_time: Set(slot.start()),
        end_time: Set(slot.end()),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    InfraError::from(e).into()
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_date(&self, date: NaiveDate) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::BookingDate.eq(date))
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        debug!("Found {} bookings on {}", models.len(), date);
        models.into_iter().map(model_to_domain).collect()
    }

    async fn save(&self, b: Booking) -> DomainResult<Booking> {
        let model = active_model(&b);

        let saved = match b.id() {
            None => {
                debug!("Inserting booking: {}", b.time_slot());
                model.insert(&self.db).await.map_err(db_err)?
            }
            Some(id) => {
                let existing = booking::Entity::find_by_id(id)
                    .one(&self.db)
                    .await
                    .map_err(db_err)?;
                if existing.is_some() {
                    debug!("Updating booking: {}", id);
                    model.update(&self.db).await.map_err(db_err)?
                } else {
                    debug!("Inserting booking with id: {}", id);
                    model.insert(&self.db).await.map_err(db_err)?
                }
            }
        };

        model_to_domain(saved)
    }

    async fn find_by_id(&self, id: BookingId) -> DomainResult<Option<Booking>> {
        booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }

    async fn delete(&self, id: BookingId) -> DomainResult<()> {
        debug!("Deleting booking: {}", id);
        booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
