use sea_orm::*;
use uuid::Uuid;

use crate::models::bids::{self, BidStatus};
use crate::models::gigs;
use crate::models::users;

/// Insert a new bid. Every bid starts pending.
pub async fn insert_bid(
    db: &DatabaseConnection,
    gig_id: Uuid,
    freelancer_id: Uuid,
    message: String,
    bid_amount: f64,
) -> Result<bids::Model, DbErr> {
    let new_bid = bids::ActiveModel {
        id: Set(Uuid::new_v4()),
        gig_id: Set(gig_id),
        freelancer_id: Set(freelancer_id),
        message: Set(message),
        bid_amount: Set(bid_amount),
        status: Set(BidStatus::Pending),
        created_at: Set(chrono::Utc::now()),
    };

    new_bid.insert(db).await
}

/// Fetch a single bid by ID.
pub async fn get_bid_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<bids::Model>, DbErr> {
    bids::Entity::find_by_id(id).one(db).await
}

/// Look up a freelancer's existing bid on a gig, if any.
pub async fn find_bid_for_gig_and_freelancer(
    db: &DatabaseConnection,
    gig_id: Uuid,
    freelancer_id: Uuid,
) -> Result<Option<bids::Model>, DbErr> {
    bids::Entity::find()
        .filter(bids::Column::GigId.eq(gig_id))
        .filter(bids::Column::FreelancerId.eq(freelancer_id))
        .one(db)
        .await
}

/// Fetch all bids on a gig, newest first, each joined with its
/// freelancer row.
pub async fn get_bids_for_gig(
    db: &DatabaseConnection,
    gig_id: Uuid,
) -> Result<Vec<(bids::Model, Option<users::Model>)>, DbErr> {
    bids::Entity::find()
        .filter(bids::Column::GigId.eq(gig_id))
        .find_also_related(users::Entity)
        .order_by_desc(bids::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all bids a freelancer has placed, newest first, each joined
/// with its gig row. The gig side is optional: a bid survives its gig.
pub async fn get_bids_for_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
) -> Result<Vec<(bids::Model, Option<gigs::Model>)>, DbErr> {
    bids::Entity::find()
        .filter(bids::Column::FreelancerId.eq(freelancer_id))
        .find_also_related(gigs::Entity)
        .order_by_desc(bids::Column::CreatedAt)
        .all(db)
        .await
}

/// Overwrite a bid's message and amount.
pub async fn update_bid_terms(
    db: &DatabaseConnection,
    id: Uuid,
    message: String,
    bid_amount: f64,
) -> Result<bids::Model, DbErr> {
    let bid = bids::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Bid not found".to_owned()))?;

    let mut bid: bids::ActiveModel = bid.into();
    bid.message = Set(message);
    bid.bid_amount = Set(bid_amount);

    bid.update(db).await
}
