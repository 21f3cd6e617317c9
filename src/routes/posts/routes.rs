use crate::authentication::{reject_anonymous_users, reject_non_publishers};
use crate::routes::{
    create_post, delete_post, get_all_posts, get_post, toggle_bookmark, toggle_like, update_post,
};
use actix_web::middleware::from_fn;
use actix_web::web;

pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/get/all", web::get().to(get_all_posts))
        .route("/get/{id}", web::get().to(get_post))
        // Publishing is limited to doctors and admins
        .service(
            web::scope("/publish")
                .wrap(from_fn(reject_non_publishers))
                .route("/create", web::post().to(create_post)),
        )
        // Protected routes (require authentication)
        .service(
            web::scope("/me")
                .wrap(from_fn(reject_anonymous_users))
                .route("/update/{id}", web::patch().to(update_post))
                .route("/delete/{id}", web::delete().to(delete_post))
                .route("/like/{id}", web::patch().to(toggle_like))
                .route("/bookmark/{id}", web::patch().to(toggle_bookmark)),
        );
}
