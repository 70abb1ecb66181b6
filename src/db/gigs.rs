use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::*;
use uuid::Uuid;

use crate::models::gigs::{self, CreateGig, GigStatus};
use crate::models::users;

/// Insert a new gig. Every gig starts open.
pub async fn insert_gig(
    db: &DatabaseConnection,
    input: CreateGig,
    owner_id: Uuid,
) -> Result<gigs::Model, DbErr> {
    let new_gig = gigs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        budget: Set(input.budget),
        status: Set(GigStatus::Open),
        owner_id: Set(owner_id),
        created_at: Set(chrono::Utc::now()),
    };

    new_gig.insert(db).await
}

/// Fetch a single gig by ID.
pub async fn get_gig_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<gigs::Model>, DbErr> {
    gigs::Entity::find_by_id(id).one(db).await
}

/// Fetch a single gig by ID together with its owner row.
pub async fn get_gig_with_owner(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<(gigs::Model, Option<users::Model>)>, DbErr> {
    gigs::Entity::find_by_id(id)
        .find_also_related(users::Entity)
        .one(db)
        .await
}

/// Fetch open gigs, optionally filtered by a case-insensitive title
/// substring, each joined with its owner row.
pub async fn search_open_gigs(
    db: &DatabaseConnection,
    search: Option<&str>,
) -> Result<Vec<(gigs::Model, Option<users::Model>)>, DbErr> {
    let mut query = gigs::Entity::find().filter(gigs::Column::Status.eq(GigStatus::Open));

    if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
        // lower(title) LIKE '%term%' rather than ILIKE, so the same query
        // runs on the SQLite used in tests.
        let pattern = format!("%{}%", term.to_lowercase());
        query = query.filter(
            Expr::expr(Func::lower(Expr::col((gigs::Entity, gigs::Column::Title)))).like(pattern),
        );
    }

    query.find_also_related(users::Entity).all(db).await
}

/// Fetch all gigs owned by a user (any status), newest first.
pub async fn get_gigs_by_owner(
    db: &DatabaseConnection,
    owner_id: Uuid,
) -> Result<Vec<gigs::Model>, DbErr> {
    gigs::Entity::find()
        .filter(gigs::Column::OwnerId.eq(owner_id))
        .order_by_desc(gigs::Column::CreatedAt)
        .all(db)
        .await
}
