use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::error::ApiError;
use crate::lifecycle::BidLifecycle;
use crate::models::bids::{BidWithFreelancer, BidWithGig, EditBid, SubmitBid};

/// POST /api/bids — submit a bid on an open gig.
pub async fn submit_bid(
    user: AuthenticatedUser,
    engine: web::Data<BidLifecycle>,
    body: web::Json<SubmitBid>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if input.message.trim().is_empty() {
        return Err(ApiError::validation("Message is required"));
    }
    if input.bid_amount <= 0.0 {
        return Err(ApiError::validation("Bid amount must be a positive amount"));
    }

    let bid = engine.submit_bid(user.0.id, input).await?;

    Ok(HttpResponse::Created().json(bid))
}

/// GET /api/bids/gig/{gig_id} — list bids on a gig, newest first, with
/// freelancer display data joined.
pub async fn get_bids_for_gig(
    _user: AuthenticatedUser,
    engine: web::Data<BidLifecycle>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let rows = engine.bids_for_gig(path.into_inner()).await?;
    let bids: Vec<BidWithFreelancer> = rows.into_iter().map(BidWithFreelancer::from).collect();

    Ok(HttpResponse::Ok().json(bids))
}

/// GET /api/bids/my/bids — list the requester's bids, newest first,
/// each with a summary of its gig where the gig still exists.
pub async fn get_my_bids(
    user: AuthenticatedUser,
    engine: web::Data<BidLifecycle>,
) -> Result<HttpResponse, ApiError> {
    let rows = engine.bids_for_freelancer(user.0.id).await?;
    let bids: Vec<BidWithGig> = rows.into_iter().map(BidWithGig::from).collect();

    Ok(HttpResponse::Ok().json(bids))
}

/// PUT /api/bids/{bid_id} — edit a pending bid's message and amount.
pub async fn edit_bid(
    user: AuthenticatedUser,
    engine: web::Data<BidLifecycle>,
    path: web::Path<Uuid>,
    body: web::Json<EditBid>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if input.message.trim().is_empty() {
        return Err(ApiError::validation("Message is required"));
    }
    if input.bid_amount <= 0.0 {
        return Err(ApiError::validation("Bid amount must be a positive amount"));
    }

    let bid = engine.edit_bid(user.0.id, path.into_inner(), input).await?;

    Ok(HttpResponse::Ok().json(bid))
}

/// PATCH /api/bids/{bid_id}/hire — hire a bid. Closes the gig to
/// further bidding and rejects every other bid on it.
pub async fn hire_bid(
    user: AuthenticatedUser,
    engine: web::Data<BidLifecycle>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let bid = engine.hire(user.0.id, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Bid hired successfully",
        "bid": bid,
    })))
}
