use crate::authentication;
use crate::routes;
use actix_web::middleware;
use actix_web::web;

pub fn comment_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route(
            "/get/posts/{post_id}",
            web::get().to(routes::show_comment_tree),
        )
        // Protected routes (require authentication)
        .service(
            web::scope("/me")
                .wrap(middleware::from_fn(authentication::reject_anonymous_users))
                .route("/posts/{post_id}", web::post().to(routes::create_comment))
                .route("/update/{comment_id}", web::patch().to(routes::edit_comment)),
        );
}
