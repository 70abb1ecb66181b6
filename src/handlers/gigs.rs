use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::gigs as gig_db;
use crate::error::ApiError;
use crate::models::gigs::{CreateGig, GigResponse, GigSearchQuery};

/// GET /api/gigs — list open gigs with their owners (public).
/// `?search=` filters by case-insensitive title substring.
pub async fn get_gigs(
    db: web::Data<DatabaseConnection>,
    query: web::Query<GigSearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let rows = gig_db::search_open_gigs(db.get_ref(), query.search.as_deref()).await?;
    let gigs: Vec<GigResponse> = rows.into_iter().map(GigResponse::from).collect();

    Ok(HttpResponse::Ok().json(gigs))
}

/// GET /api/gigs/my — list the requester's own gigs, newest first.
pub async fn get_my_gigs(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> Result<HttpResponse, ApiError> {
    let gigs = gig_db::get_gigs_by_owner(db.get_ref(), user.0.id).await?;

    Ok(HttpResponse::Ok().json(gigs))
}

/// GET /api/gigs/{id} — fetch one gig with its owner (public).
pub async fn get_gig(
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let row = gig_db::get_gig_with_owner(db.get_ref(), path.into_inner())
        .await?
        .ok_or_else(|| ApiError::not_found("Gig not found"))?;

    Ok(HttpResponse::Ok().json(GigResponse::from(row)))
}

/// POST /api/gigs — create a gig owned by the requester.
pub async fn create_gig(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateGig>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if input.title.trim().is_empty() || input.description.trim().is_empty() {
        return Err(ApiError::validation("Title and description are required"));
    }
    if input.budget <= 0.0 {
        return Err(ApiError::validation("Budget must be a positive amount"));
    }

    let gig = gig_db::insert_gig(db.get_ref(), input, user.0.id).await?;

    Ok(HttpResponse::Created().json(gig))
}
