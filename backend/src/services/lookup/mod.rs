//! # Lookup Service
//!
//! Serves the administrative hierarchy that drives the cascading selectors of
//! the contribution form. The index is parsed once at startup by `load_lookup`
//! and shared read-only between workers.
//!
//! A missing or malformed source file is not fatal: it is logged and the
//! service answers with an empty index, which leaves the form usable in manual
//! entry mode.

use std::path::Path;

use actix_web::web::{get, scope, Data};
use actix_web::{HttpResponse, Responder, Scope};
use common::model::lookup::LookupIndex;
use log::{info, warn};

const API_PATH: &str = "/api/lookup";

/// Registers `GET /api/lookup`, returning the whole index as JSON.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(process))
}

pub async fn process(index: Data<LookupIndex>) -> impl Responder {
    HttpResponse::Ok().json(index.get_ref())
}

/// Reads the lookup file, degrading to an empty index on any failure.
pub fn load_lookup(path: &Path) -> LookupIndex {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!("Failed to read lookup file {}: {}", path.display(), e);
            return LookupIndex::default();
        }
    };
    match LookupIndex::from_json(&content) {
        Ok(index) => {
            info!(
                "Loaded lookup index with {} regions from {}",
                index.regions().len(),
                path.display()
            );
            index
        }
        Err(e) => {
            warn!("Failed to parse lookup file {}: {}", path.display(), e);
            LookupIndex::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};
    use std::io::Write;

    #[test]
    fn unreadable_or_invalid_files_give_empty_index() {
        assert!(load_lookup(Path::new("/nonexistent/region_structure.json")).is_empty());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        assert!(load_lookup(file.path()).is_empty());
    }

    #[actix_web::test]
    async fn serves_loaded_index() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"Київська": {{"Бучанський": {{"Бучанська": [{{"name": "Буча", "type": "місто", "code": "UA1", "lat": 50.5, "lon": 30.2}}]}}}}}}"#
        )
        .unwrap();
        let index = load_lookup(file.path());
        assert_eq!(index.regions(), vec!["Київська".to_string()]);

        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(index))
                .service(configure_routes()),
        )
        .await;
        let req = actix_test::TestRequest::get().uri("/api/lookup").to_request();
        let body: serde_json::Value = actix_test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["Київська"]["Бучанський"]["Бучанська"][0]["name"], "Буча");
    }
}
