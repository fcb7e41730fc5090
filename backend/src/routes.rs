use actix_files::Files;
use actix_web::{Error, HttpResponse, web};
use log::info;
use serde_json::json;
use shared::{Location, PredictRequest, UploadCheckRequest};
use strum::IntoEnumIterator;

use crate::form::{self, SubmitRender};
use crate::inference::model::Predictor;
use crate::upload::validate_upload;

pub fn configure_routes(cfg: &mut web::ServiceConfig, static_dir: String) {
    api_routes(cfg);
    cfg.service(Files::new("/", static_dir).index_file("index.html"));
}

pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/upload").route(web::post().to(handle_upload)))
        .service(web::resource("/api/predict").route(web::post().to(handle_predict)))
        .service(web::resource("/api/locations").route(web::get().to(list_locations)));
}

async fn handle_upload(request: web::Json<UploadCheckRequest>) -> Result<HttpResponse, Error> {
    let outcome = validate_upload(request.contents.as_deref());
    Ok(HttpResponse::Ok().json(outcome))
}

async fn handle_predict(
    predictor: web::Data<Predictor>,
    request: web::Json<PredictRequest>,
) -> Result<HttpResponse, Error> {
    let render = form::submit(
        predictor.get_ref(),
        request.n_clicks,
        request.location.as_deref(),
        request.size,
        request.rooms,
    );

    let body = match render {
        SubmitRender::Empty => json!({}),
        SubmitRender::Error(message) => {
            info!("prediction request rejected: {}", message);
            json!({ "error": message })
        }
        SubmitRender::Success(result) => json!({ "result": result }),
    };
    Ok(HttpResponse::Ok().json(body))
}

async fn list_locations() -> HttpResponse {
    let locations: Vec<String> = Location::iter().map(|l| l.to_string()).collect();
    HttpResponse::Ok().json(locations)
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test};
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde_json::{Value, json};

    use super::*;
    use crate::inference::model::test_predictor;

    macro_rules! post_json {
        ($app:expr, $uri:expr, $body:expr) => {{
            let request = test::TestRequest::post()
                .uri($uri)
                .set_json($body)
                .to_request();
            let body: Value = test::call_and_read_body_json(&$app, request).await;
            body
        }};
    }

    macro_rules! test_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_predictor()))
                    .configure(api_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn upload_then_fill_then_predict() {
        let app = test_app!();

        let sheet = "location,size,rooms,price\nSuburb,1200,3,250000\n";
        let contents = format!("data:text/csv;base64,{}", BASE64.encode(sheet));
        let upload = post_json!(app, "/api/upload", json!({ "contents": contents }));
        assert_eq!(upload["form_visible"], json!(true));
        assert!(
            upload["message"]
                .as_str()
                .unwrap_or_default()
                .contains("successfully")
        );

        let predict = post_json!(
            app,
            "/api/predict",
            json!({ "n_clicks": 1, "location": "Suburb", "size": 1200, "rooms": 3 })
        );
        let result = &predict["result"];
        let usd = result["price_usd"].as_f64().unwrap();
        let inr = result["price_inr"].as_f64().unwrap();
        assert!((inr - usd * 83.5).abs() < 1.0);
        assert!(
            result["price_usd_display"]
                .as_str()
                .unwrap_or_default()
                .starts_with('$')
        );
    }

    #[actix_web::test]
    async fn malformed_upload_keeps_form_hidden() {
        let app = test_app!();
        let upload = post_json!(
            app,
            "/api/upload",
            json!({ "contents": "data:text/csv;base64,@@@@" })
        );
        assert_eq!(upload["form_visible"], json!(false));
        assert!(
            upload["message"]
                .as_str()
                .unwrap_or_default()
                .contains("Error reading spreadsheet")
        );
    }

    #[actix_web::test]
    async fn missing_rooms_renders_the_error_message() {
        let app = test_app!();
        let predict = post_json!(
            app,
            "/api/predict",
            json!({ "n_clicks": 1, "location": "Suburb", "size": 1200 })
        );
        assert!(
            predict["error"]
                .as_str()
                .unwrap_or_default()
                .contains("fill all fields")
        );
        assert!(predict.get("result").is_none());
    }

    #[actix_web::test]
    async fn zero_clicks_renders_empty() {
        let app = test_app!();
        let predict = post_json!(app, "/api/predict", json!({ "n_clicks": 0 }));
        assert_eq!(predict, json!({}));
    }

    #[actix_web::test]
    async fn locations_endpoint_lists_the_known_categories() {
        let app = test_app!();
        let request = test::TestRequest::get().uri("/api/locations").to_request();
        let locations: Value = test::call_and_read_body_json(&app, request).await;
        assert_eq!(locations, json!(["Downtown", "Suburb", "Uptown"]));
    }
}
