// Route exports
pub mod damage;
pub mod shops;

pub use shops::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(shops::configure)
            .configure(damage::configure),
    );
}
