use actix_web::web;

use crate::{api::atenciones, config::Config, error::ApiError};

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    // Malformed bodies get the same {"error": ...} envelope as everything else
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| ApiError::Payload(err.to_string()).into());

    cfg.service(
        web::scope(&config.api_prefix)
            .app_data(json_config)
            .service(
                web::resource("/records")
                    .route(web::get().to(atenciones::list_atenciones))
                    .route(web::post().to(atenciones::create_atencion)),
            ),
    );
}
