use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::gigs::GigStatus;

/// Bid status stored as a lowercase string in the database.
///
/// Every bid starts `pending`. Hiring one bid on a gig moves that bid to
/// `hired` and every sibling to `rejected`, all in the same transaction;
/// neither terminal state can be left again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "hired")]
    Hired,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `bids` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub gig_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    #[sea_orm(column_type = "Double")]
    pub bid_amount: f64,
    pub status: BidStatus,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gigs::Entity",
        from = "Column::GigId",
        to = "super::gigs::Column::Id"
    )]
    Gig,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::gigs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gig.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for `POST /api/bids`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitBid {
    pub gig_id: Uuid,
    pub message: String,
    pub bid_amount: f64,
}

/// Request body for `PUT /api/bids/{bid_id}` — only the freelancer's terms
/// are editable, and only while the bid is pending.
#[derive(Debug, Clone, Deserialize)]
pub struct EditBid {
    pub message: String,
    pub bid_amount: f64,
}

/// Freelancer fields embedded in a gig's bid list.
#[derive(Debug, Clone, Serialize)]
pub struct BidFreelancer {
    pub id: Uuid,
    pub name: String,
}

impl From<super::users::Model> for BidFreelancer {
    fn from(u: super::users::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
        }
    }
}

/// A bid joined with its freelancer, for the gig owner's view.
/// `freelancer` is None when the user row no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct BidWithFreelancer {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub freelancer_id: Uuid,
    pub message: String,
    pub bid_amount: f64,
    pub status: BidStatus,
    pub created_at: DateTimeUtc,
    pub freelancer: Option<BidFreelancer>,
}

impl From<(Model, Option<super::users::Model>)> for BidWithFreelancer {
    fn from((bid, freelancer): (Model, Option<super::users::Model>)) -> Self {
        Self {
            id: bid.id,
            gig_id: bid.gig_id,
            freelancer_id: bid.freelancer_id,
            message: bid.message,
            bid_amount: bid.bid_amount,
            status: bid.status,
            created_at: bid.created_at,
            freelancer: freelancer.map(BidFreelancer::from),
        }
    }
}

/// The slice of a gig shown beside a freelancer's own bids.
#[derive(Debug, Clone, Serialize)]
pub struct GigSummary {
    pub id: Uuid,
    pub title: String,
    pub budget: f64,
    pub status: GigStatus,
}

impl From<super::gigs::Model> for GigSummary {
    fn from(g: super::gigs::Model) -> Self {
        Self {
            id: g.id,
            title: g.title,
            budget: g.budget,
            status: g.status,
        }
    }
}

/// A bid joined with a summary of its gig, for the freelancer dashboard.
/// `gig` is None when the gig no longer exists; callers must render a
/// placeholder rather than drop the bid.
#[derive(Debug, Clone, Serialize)]
pub struct BidWithGig {
    pub id: Uuid,
    pub gig_id: Uuid,
    pub freelancer_id: Uuid,
    pub message: String,
    pub bid_amount: f64,
    pub status: BidStatus,
    pub created_at: DateTimeUtc,
    pub gig: Option<GigSummary>,
}

impl From<(Model, Option<super::gigs::Model>)> for BidWithGig {
    fn from((bid, gig): (Model, Option<super::gigs::Model>)) -> Self {
        Self {
            id: bid.id,
            gig_id: bid.gig_id,
            freelancer_id: bid.freelancer_id,
            message: bid.message,
            bid_amount: bid.bid_amount,
            status: bid.status,
            created_at: bid.created_at,
            gig: gig.map(GigSummary::from),
        }
    }
}
