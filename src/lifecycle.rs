//! Bid lifecycle rules: one bid per freelancer per gig, edits while
//! pending, and the single-winner hire transaction.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::sync::Arc;
use uuid::Uuid;

use crate::db;
use crate::error::ApiError;
use crate::models::bids::{self, BidStatus, EditBid, SubmitBid};
use crate::models::gigs::{self, GigStatus};
use crate::models::users;

/// Lifecycle events published to a gig's subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GigEvent {
    NewBid,
    BidHired,
}

/// Outbound notification channel, keyed by gig room.
///
/// Publishing is fire-and-forget: implementations log delivery problems
/// instead of returning them, so a dead subscriber can never fail the
/// operation that triggered the event.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn publish(&self, room: Uuid, event: GigEvent);
}

/// The bidding engine. Owns every state transition on bids and the gig
/// status flip that hiring implies.
///
/// Operations take the acting user's id explicitly; callers resolve
/// credentials before reaching this type.
pub struct BidLifecycle {
    db: DatabaseConnection,
    notifier: Arc<dyn Notifier>,
}

impl BidLifecycle {
    pub fn new(db: DatabaseConnection, notifier: Arc<dyn Notifier>) -> Self {
        Self { db, notifier }
    }

    /// Place a bid on an open gig.
    ///
    /// Rejects bids on the caller's own gig regardless of gig status,
    /// bids on non-open gigs, and second bids by the same freelancer.
    /// Publishes `newBid` to the gig room on success.
    pub async fn submit_bid(
        &self,
        freelancer_id: Uuid,
        input: SubmitBid,
    ) -> Result<bids::Model, ApiError> {
        let gig = db::gigs::get_gig_by_id(&self.db, input.gig_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Gig not found"))?;

        if gig.owner_id == freelancer_id {
            return Err(ApiError::forbidden("You cannot bid on your own gig"));
        }

        if gig.status != GigStatus::Open {
            return Err(ApiError::conflict("Gig is no longer open for bids"));
        }

        if db::bids::find_bid_for_gig_and_freelancer(&self.db, gig.id, freelancer_id)
            .await?
            .is_some()
        {
            return Err(ApiError::conflict("You have already placed a bid on this gig"));
        }

        let bid = db::bids::insert_bid(
            &self.db,
            gig.id,
            freelancer_id,
            input.message,
            input.bid_amount,
        )
        .await
        .map_err(|err| match err.sql_err() {
            // Two submissions racing past the pre-check; the unique index
            // on (gig_id, freelancer_id) catches the loser.
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::conflict("You have already placed a bid on this gig")
            }
            _ => ApiError::from(err),
        })?;

        self.notifier.publish(bid.gig_id, GigEvent::NewBid).await;

        Ok(bid)
    }

    /// All bids on a gig, newest first, with freelancer display data.
    pub async fn bids_for_gig(
        &self,
        gig_id: Uuid,
    ) -> Result<Vec<(bids::Model, Option<users::Model>)>, ApiError> {
        Ok(db::bids::get_bids_for_gig(&self.db, gig_id).await?)
    }

    /// All bids placed by a freelancer, newest first, each with its gig
    /// attached where the gig still exists.
    pub async fn bids_for_freelancer(
        &self,
        freelancer_id: Uuid,
    ) -> Result<Vec<(bids::Model, Option<gigs::Model>)>, ApiError> {
        Ok(db::bids::get_bids_for_freelancer(&self.db, freelancer_id).await?)
    }

    /// Rewrite a pending bid's message and amount. Only the freelancer
    /// who placed the bid may edit it, and only before it is decided.
    pub async fn edit_bid(
        &self,
        requester_id: Uuid,
        bid_id: Uuid,
        input: EditBid,
    ) -> Result<bids::Model, ApiError> {
        let bid = db::bids::get_bid_by_id(&self.db, bid_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Bid not found"))?;

        if bid.freelancer_id != requester_id {
            return Err(ApiError::forbidden("You can only edit your own bids"));
        }

        if bid.status != BidStatus::Pending {
            return Err(ApiError::conflict("Only pending bids can be edited"));
        }

        Ok(db::bids::update_bid_terms(&self.db, bid.id, input.message, input.bid_amount).await?)
    }

    /// Hire a bid: flip its gig to assigned, reject every other bid on
    /// that gig, and mark the target hired, all in one transaction.
    ///
    /// Concurrent hires on the same gig resolve to exactly one winner.
    /// The status flip is a conditional update, so the transaction that
    /// commits first closes the gig and every later attempt observes it
    /// assigned and fails. `bidHired` is published only after commit.
    pub async fn hire(&self, requester_id: Uuid, bid_id: Uuid) -> Result<bids::Model, ApiError> {
        let txn = self.db.begin().await?;

        let hired = match Self::hire_in_txn(&txn, requester_id, bid_id).await {
            Ok(bid) => bid,
            Err(err) => {
                txn.rollback().await?;
                return Err(err);
            }
        };

        txn.commit().await?;

        self.notifier.publish(hired.gig_id, GigEvent::BidHired).await;

        Ok(hired)
    }

    async fn hire_in_txn(
        txn: &DatabaseTransaction,
        requester_id: Uuid,
        bid_id: Uuid,
    ) -> Result<bids::Model, ApiError> {
        let bid = bids::Entity::find_by_id(bid_id)
            .one(txn)
            .await?
            .ok_or_else(|| ApiError::not_found("Bid not found"))?;

        let gig = gigs::Entity::find_by_id(bid.gig_id)
            .one(txn)
            .await?
            .ok_or_else(|| ApiError::not_found("Gig not found"))?;

        if gig.owner_id != requester_id {
            return Err(ApiError::forbidden("Only the gig owner can hire a bid"));
        }

        // Close the gig if and only if it is still open. Losing a race
        // to a concurrent hire leaves zero rows affected here.
        let closed = gigs::Entity::update_many()
            .col_expr(gigs::Column::Status, Expr::value(GigStatus::Assigned))
            .filter(gigs::Column::Id.eq(gig.id))
            .filter(gigs::Column::Status.eq(GigStatus::Open))
            .exec(txn)
            .await?;

        if closed.rows_affected == 0 {
            return Err(ApiError::conflict("Gig is already assigned"));
        }

        bids::Entity::update_many()
            .col_expr(bids::Column::Status, Expr::value(BidStatus::Rejected))
            .filter(bids::Column::GigId.eq(gig.id))
            .filter(bids::Column::Id.ne(bid.id))
            .exec(txn)
            .await?;

        let mut target: bids::ActiveModel = bid.into();
        target.status = Set(BidStatus::Hired);

        Ok(target.update(txn).await?)
    }
}
