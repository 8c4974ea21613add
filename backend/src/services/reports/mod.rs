//! # Reports Service
//!
//! `POST /api/reports` accepts an error report about a published record or
//! general feedback. The handler only checks the report is complete and hands
//! it to the relay; storing and delivering it happens in the dispatcher task.

use actix_web::web::{post, scope, Data, Json};
use actix_web::{HttpResponse, Responder, Scope};
use common::model::report::ReportRequest;
use log::warn;

use crate::relay::state::{QueuedReport, ReportRelay};

const API_PATH: &str = "/api/reports";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", post().to(process))
}

pub async fn process(relay: Data<ReportRelay>, report: Json<ReportRequest>) -> impl Responder {
    if !report.is_complete() {
        return HttpResponse::BadRequest().body("Усі поля обов’язкові.");
    }
    match relay.enqueue(QueuedReport::from(&*report)) {
        Ok(()) => HttpResponse::Accepted().finish(),
        Err(e) => {
            warn!("Dropping {} report: {}", report.template.as_str(), e);
            HttpResponse::ServiceUnavailable().body(format!("Error sending report: {}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, App};
    use common::model::report::ReportTemplate;

    fn request(message: &str) -> ReportRequest {
        ReportRequest {
            template: ReportTemplate::RecordError,
            message: message.into(),
            name: "Олена".into(),
            contacts: "olena@example.com".into(),
            url: "/record/1".into(),
            record_id: Some("1".into()),
        }
    }

    #[actix_web::test]
    async fn complete_report_is_queued() {
        let (relay, mut rx) = ReportRelay::new(4);
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(relay))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/reports")
            .set_json(request("Невірний рік"))
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 202);

        let queued = rx.try_recv().unwrap();
        assert_eq!(queued.template, "record_error");
        assert_eq!(queued.fields.get("record_id").map(String::as_str), Some("1"));
    }

    #[actix_web::test]
    async fn incomplete_report_is_refused() {
        let (relay, mut rx) = ReportRelay::new(4);
        let app = actix_test::init_service(
            App::new()
                .app_data(Data::new(relay))
                .service(configure_routes()),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/reports")
            .set_json(request("  "))
            .to_request();
        assert_eq!(actix_test::call_service(&app, req).await.status(), 400);
        assert!(rx.try_recv().is_err());
    }
}
