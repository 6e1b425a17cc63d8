use crate::domain::account::{AccountId, Caller, Role};
use crate::domain::accommodation::AccommodationId;
use crate::domain::review::{
    PendingReview, Review, ReviewDraft, ReviewId, ReviewStatus, ReviewSubject,
};
use crate::error::{EngineError, Result};
use crate::ports::notifier::{Notification, NotificationKind};

use super::Engine;

impl Engine {
    pub async fn add_accommodation_review(
        &self,
        caller: &Caller,
        accommodation_id: AccommodationId,
        draft: ReviewDraft,
    ) -> Result<Review> {
        Self::require_role(caller, Role::Guest)?;
        draft.validate()?;
        self.require_accommodation(accommodation_id).await?;
        self.ensure_can_review_accommodation(caller.id, accommodation_id)
            .await?;
        self.insert_review(caller.id, ReviewSubject::Accommodation(accommodation_id), draft)
            .await
    }

    pub async fn add_host_review(
        &self,
        caller: &Caller,
        host_id: AccountId,
        draft: ReviewDraft,
    ) -> Result<Review> {
        Self::require_role(caller, Role::Guest)?;
        draft.validate()?;
        self.ensure_can_review_host(caller.id, host_id).await?;
        self.insert_review(caller.id, ReviewSubject::Host(host_id), draft)
            .await
    }

    async fn insert_review(
        &self,
        guest_id: AccountId,
        subject: ReviewSubject,
        draft: ReviewDraft,
    ) -> Result<Review> {
        let stored = self
            .reviews
            .insert(Review {
                id: ReviewId::default(),
                guest_id,
                subject,
                rating: draft.rating,
                comment: draft.comment,
                created_at: self.clock.now(),
                status: ReviewStatus::Pending,
            })
            .await?;
        tracing::info!(review = stored.id.0, guest = guest_id.0, ?subject, "review created");
        Ok(stored)
    }

    /// Published reviews of an accommodation.
    pub async fn accommodation_reviews(&self, id: AccommodationId) -> Result<Vec<Review>> {
        self.require_accommodation(id).await?;
        Ok(self
            .reviews
            .list_by_subject(ReviewSubject::Accommodation(id))
            .await?
            .into_iter()
            .filter(|r| r.status == ReviewStatus::Accepted)
            .collect())
    }

    /// Published reviews of a host.
    pub async fn host_reviews(&self, host_id: AccountId) -> Result<Vec<Review>> {
        Ok(self
            .reviews
            .list_by_subject(ReviewSubject::Host(host_id))
            .await?
            .into_iter()
            .filter(|r| r.status == ReviewStatus::Accepted)
            .collect())
    }

    /// Moderation queue with subject context.
    pub async fn pending_reviews(&self, caller: &Caller) -> Result<Vec<PendingReview>> {
        Self::require_admin(caller)?;
        let mut queue = Vec::new();
        for review in self.reviews.list_by_status(ReviewStatus::Pending).await? {
            let subject_label = match review.subject {
                ReviewSubject::Accommodation(id) => match self.accommodations.find(id).await? {
                    Some(accommodation) => accommodation.title,
                    None => format!("accommodation {id}"),
                },
                ReviewSubject::Host(id) => format!("host {id}"),
            };
            queue.push(PendingReview {
                review,
                subject_label,
            });
        }
        Ok(queue)
    }

    /// Moderation decision. Approving a pending review notifies the
    /// reviewed host exactly once.
    pub async fn change_review_status(
        &self,
        caller: &Caller,
        id: ReviewId,
        status: ReviewStatus,
    ) -> Result<Review> {
        Self::require_admin(caller)?;
        let mut review = self
            .reviews
            .find(id)
            .await?
            .ok_or(EngineError::ReviewNotFound { id })?;
        let previous = review.status;
        review.status = status;
        self.reviews.update(&review).await?;
        tracing::info!(review = id.0, ?status, "review status changed");

        if previous == ReviewStatus::Pending && status == ReviewStatus::Accepted {
            let notification = match review.subject {
                ReviewSubject::Accommodation(accommodation_id) => {
                    let accommodation = self.require_accommodation(accommodation_id).await?;
                    Notification {
                        recipient: accommodation.host_id,
                        kind: NotificationKind::AccommodationRating,
                        message: "Your accommodation has a new review".into(),
                    }
                }
                ReviewSubject::Host(host_id) => Notification {
                    recipient: host_id,
                    kind: NotificationKind::HostRating,
                    message: "You have a new review".into(),
                },
            };
            self.notifier.notify(notification);
        }
        Ok(review)
    }
}
