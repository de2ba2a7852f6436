use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use uuid::Uuid;

use super::{
    images::{insert_image, replace_image},
    locations::{insert_location, replace_location},
    views::event_details,
};
use crate::{
    db::{
        entities::event,
        repositories::{EventRepository, ImageRepository, LocationRepository},
    },
    error::Result,
    models::{EventData, EventDetails},
};

/// Events own an image and a location like projects do, but take no part in
/// the artist/project relation.
#[derive(Clone)]
pub struct EventService {
    db: DatabaseConnection,
}

impl EventService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<EventDetails>> {
        let mut events = Vec::new();
        for event in EventRepository::new(&self.db).find_all().await? {
            events.push(event_details(&self.db, event).await?);
        }
        Ok(events)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventDetails>> {
        match EventRepository::new(&self.db).find_by_id(id).await? {
            Some(event) => Ok(Some(event_details(&self.db, event).await?)),
            None => Ok(None),
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Vec<EventDetails>> {
        let mut events = Vec::new();
        for event in EventRepository::new(&self.db).find_by_name(name).await? {
            events.push(event_details(&self.db, event).await?);
        }
        Ok(events)
    }

    pub async fn count(&self) -> Result<u64> {
        EventRepository::new(&self.db).count().await
    }

    pub async fn create(&self, data: EventData) -> Result<EventDetails> {
        let txn = self.db.begin().await?;
        let image = insert_image(&txn, data.image()).await?;
        let location = insert_location(&txn, data.location()).await?;
        let schedule = data.schedule();

        let event = EventRepository::new(&txn)
            .create(event::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set(data.name().to_string()),
                description: Set(data.description().to_string()),
                start_time: Set(schedule.start()),
                end_time: Set(schedule.end()),
                image_id: Set(image.id),
                location_id: Set(location.id),
            })
            .await?;

        let details = event_details(&txn, event).await?;
        txn.commit().await?;
        tracing::info!("Created event {}", details.event.id);
        Ok(details)
    }

    pub async fn update(&self, id: Uuid, data: EventData) -> Result<EventDetails> {
        let txn = self.db.begin().await?;
        let repo = EventRepository::new(&txn);
        let existing = repo.get(id).await?;
        let schedule = data.schedule();

        replace_image(&txn, existing.image_id, data.image()).await?;
        replace_location(&txn, existing.location_id, data.location()).await?;
        let updated = repo
            .update(
                id,
                event::ActiveModel {
                    name: Set(data.name().to_string()),
                    description: Set(data.description().to_string()),
                    start_time: Set(schedule.start()),
                    end_time: Set(schedule.end()),
                    ..Default::default()
                },
            )
            .await?;

        let details = event_details(&txn, updated).await?;
        txn.commit().await?;
        tracing::info!("Updated event {}", id);
        Ok(details)
    }

    /// Delete the event row, then its image and location.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let txn = self.db.begin().await?;
        let repo = EventRepository::new(&txn);
        let existing = repo.get(id).await?;

        repo.delete(id).await?;
        ImageRepository::new(&txn).delete(existing.image_id).await?;
        LocationRepository::new(&txn)
            .delete(existing.location_id)
            .await?;

        txn.commit().await?;
        tracing::info!("Deleted event {}", id);
        Ok(())
    }
}
