use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gig status stored as a lowercase string in the database.
///
/// A gig is `open` at creation and becomes `assigned` exactly once, when one
/// of its bids is hired. There is no transition back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum GigStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "assigned")]
    Assigned,
}

/// SeaORM entity for the `gigs` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gigs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub budget: f64,
    pub status: GigStatus,
    pub owner_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bids::Entity")]
    Bids,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Request body for `POST /api/gigs`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGig {
    pub title: String,
    pub description: String,
    pub budget: f64,
}

/// Query string for `GET /api/gigs`.
#[derive(Debug, Clone, Deserialize)]
pub struct GigSearchQuery {
    pub search: Option<String>,
}

/// Owner fields embedded in gig listings.
#[derive(Debug, Clone, Serialize)]
pub struct GigOwner {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<super::users::Model> for GigOwner {
    fn from(u: super::users::Model) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
        }
    }
}

/// A gig joined with its owner for listing and detail responses.
/// `owner` is None when the owner row no longer exists.
#[derive(Debug, Clone, Serialize)]
pub struct GigResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub budget: f64,
    pub status: GigStatus,
    pub owner_id: Uuid,
    pub created_at: DateTimeUtc,
    pub owner: Option<GigOwner>,
}

impl From<(Model, Option<super::users::Model>)> for GigResponse {
    fn from((gig, owner): (Model, Option<super::users::Model>)) -> Self {
        Self {
            id: gig.id,
            title: gig.title,
            description: gig.description,
            budget: gig.budget,
            status: gig.status,
            owner_id: gig.owner_id,
            created_at: gig.created_at,
            owner: owner.map(GigOwner::from),
        }
    }
}
