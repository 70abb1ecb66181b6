pub mod auth;
pub mod bids;
pub mod gigs;

use actix_web::web;

use crate::realtime::session;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes ──
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .route("/logout", web::post().to(auth::logout))
            .route("/me", web::get().to(auth::me)),
    );

    // ── Gig routes ("/my" must register before "/{id}") ──
    cfg.service(
        web::scope("/gigs")
            .route("", web::get().to(gigs::get_gigs))
            .route("", web::post().to(gigs::create_gig))
            .route("/my", web::get().to(gigs::get_my_gigs))
            .route("/{id}", web::get().to(gigs::get_gig)),
    );

    // ── Bid routes (all protected via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/bids")
            .route("", web::post().to(bids::submit_bid))
            .route("/my/bids", web::get().to(bids::get_my_bids))
            .route("/gig/{gig_id}", web::get().to(bids::get_bids_for_gig))
            .route("/{bid_id}", web::put().to(bids::edit_bid))
            .route("/{bid_id}/hire", web::patch().to(bids::hire_bid)),
    );

    // ── Real-time events ──
    cfg.route("/ws", web::get().to(session::ws_connect));
}
