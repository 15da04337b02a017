use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use common::model::document::Document;
use common::model::processed::ProcessedTemplate;
use common::model::template::Template;
use common::model::variable::{PlaceholderReport, TemplateVariable, VariableSource};
use common::requests::SaveTemplateResponse;
use legajo_backend::config::AppConfig;
use legajo_backend::services::configure_services;
use legajo_backend::state::AppState;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::io::{Cursor, Read};
use std::path::Path;
use tempfile::TempDir;

const DEMANDA: &str = "# Demanda\n\
Señor Juez: **{{client.name}}** en causa {{case.number}}.\n\
- Cuantía: {{case.amount}}\n\
Generado por {{custom.generated_by}}";

fn state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        db_path: dir.path().join("legajo.sqlite"),
        fonts_dir: dir.path().join("fonts"),
        ..AppConfig::default()
    };
    let state = AppState::new(config);
    state.store.init_schema().unwrap();
    (dir, state)
}

fn context() -> Value {
    json!({
        "client": { "name": "Acme SpA" },
        "case": { "number": "C-1234-2026", "amount": 1500000 }
    })
}

fn zip_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state.clone()))
                .configure(configure_services),
        )
        .await
    };
}

macro_rules! save {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/templates/save")
            .set_json($body)
            .to_request();
        let saved: SaveTemplateResponse = test::call_and_read_body_json(&$app, req).await;
        saved
    }};
}

#[actix_web::test]
async fn saved_templates_can_be_read_back_and_listed() {
    let (_dir, state) = state();
    let app = app!(state);

    let saved = save!(
        app,
        json!({ "id": "demanda", "name": "Demanda", "content": "{{client.name}} {{client.apodo}}" })
    );
    assert_eq!(saved.template.version, 1);
    assert_eq!(saved.unknown_variables, vec!["client.apodo".to_string()]);

    let req = test::TestRequest::get().uri("/api/templates/demanda").to_request();
    let template: Template = test::call_and_read_body_json(&app, req).await;
    assert_eq!(template, saved.template);

    let req = test::TestRequest::get().uri("/api/templates/demanda/variables").to_request();
    let report: PlaceholderReport = test::call_and_read_body_json(&app, req).await;
    assert_eq!(report.known.len(), 1);
    assert_eq!(report.unknown, vec!["client.apodo".to_string()]);

    let req = test::TestRequest::get().uri("/api/templates?status=active").to_request();
    let listed: Vec<Template> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.len(), 1);

    let req = test::TestRequest::get().uri("/api/templates?status=inactive").to_request();
    let listed: Vec<Template> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());
}

#[actix_web::test]
async fn missing_template_is_a_json_404() {
    let (_dir, state) = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/documents/generate")
        .set_json(json!({ "template_id": "nope", "format": "docx" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Template not found: nope");
}

#[actix_web::test]
async fn preview_substitutes_raw_content() {
    let (_dir, state) = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/documents/preview")
        .set_json(json!({
            "content": "{{client.name}} / {{case.amount}} / {{user.name}}",
            "context": context()
        }))
        .to_request();
    let processed: ProcessedTemplate = test::call_and_read_body_json(&app, req).await;

    assert_eq!(processed.content, "Acme SpA / $1.500.000,00 / ");
    assert_eq!(processed.unresolved, vec!["user.name".to_string()]);
}

#[actix_web::test]
async fn preview_needs_content_or_template() {
    let (_dir, state) = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/documents/preview")
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn generate_streams_docx_attachment() {
    let (_dir, state) = state();
    let app = app!(state);
    save!(app, json!({ "id": "demanda", "name": "Demanda", "content": DEMANDA }));

    let req = test::TestRequest::post()
        .uri("/api/documents/generate")
        .set_json(json!({
            "template_id": "demanda",
            "format": "docx",
            "context": context(),
            "user_id": "mperez"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"), "{}", disposition);
    assert!(disposition.contains("Demanda.docx"), "{}", disposition);

    let bytes = test::read_body(resp).await;
    let document = zip_part(&bytes, "word/document.xml");
    assert!(document.contains("Acme SpA"));
    assert!(document.contains("C-1234-2026"));
    assert!(document.contains("$1.500.000,00"));
    assert!(document.contains("Generado por mperez"));
    assert!(!document.contains("{{"));
}

#[actix_web::test]
async fn persisted_documents_can_be_downloaded() {
    let (_dir, state) = state();
    let app = app!(state);
    save!(app, json!({ "id": "demanda", "name": "Demanda", "content": DEMANDA }));

    let req = test::TestRequest::post()
        .uri("/api/documents/generate")
        .set_json(json!({
            "template_id": "demanda",
            "format": "xlsx",
            "context": context(),
            "persist": true,
            "file_name": "demanda-acme"
        }))
        .to_request();
    let document: Document = test::call_and_read_body_json(&app, req).await;
    assert_eq!(document.file_name, "demanda-acme.xlsx");
    assert_eq!(document.template_version, 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/documents/{}", document.id))
        .to_request();
    let bytes = test::call_and_read_body(&app, req).await;
    assert_eq!(bytes.len() as u64, document.size);
    assert_eq!(format!("{:x}", md5::compute(&bytes)), document.content_md5);

    let req = test::TestRequest::get()
        .uri("/api/documents/template/demanda")
        .to_request();
    let listed: Vec<Document> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, document.id);
}

#[actix_web::test]
async fn inactive_templates_cannot_generate() {
    let (_dir, state) = state();
    let app = app!(state);
    save!(app, json!({ "id": "demanda", "name": "Demanda", "content": DEMANDA }));

    let req = test::TestRequest::post()
        .uri("/api/templates/demanda/status")
        .set_json(json!({ "status": "inactive" }))
        .to_request();
    let template: Template = test::call_and_read_body_json(&app, req).await;
    assert_eq!(template.status.to_string(), "inactive");

    let req = test::TestRequest::post()
        .uri("/api/documents/generate")
        .set_json(json!({ "template_id": "demanda", "format": "docx" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deleted_templates_are_gone() {
    let (_dir, state) = state();
    let app = app!(state);
    save!(app, json!({ "id": "demanda", "name": "Demanda", "content": DEMANDA }));

    let req = test::TestRequest::delete().uri("/api/templates/demanda").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/api/templates/demanda").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn variables_can_be_filtered_by_source() {
    let (_dir, state) = state();
    let app = app!(state);

    let req = test::TestRequest::get().uri("/api/variables?source=user").to_request();
    let variables: Vec<TemplateVariable> = test::call_and_read_body_json(&app, req).await;
    assert!(!variables.is_empty());
    assert!(variables.iter().all(|v| v.source == VariableSource::User));

    let req = test::TestRequest::get().uri("/api/variables").to_request();
    let all: Vec<TemplateVariable> = test::call_and_read_body_json(&app, req).await;
    assert!(all.len() > variables.len());
}

#[actix_web::test]
async fn reports_export_as_spreadsheet() {
    let (_dir, state) = state();
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/reports/export")
        .set_json(json!({
            "format": "xlsx",
            "report": {
                "title": "Pagos",
                "summary": [{ "label": "Total", "value": 2500, "kind": "currency" }],
                "columns": [
                    { "key": "fecha", "header": "Fecha", "kind": "date" },
                    { "key": "monto", "header": "Monto", "kind": "currency", "width": 2 }
                ],
                "rows": [{ "fecha": "2026-10-15", "monto": 2500 }]
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap();
    assert!(disposition.to_str().unwrap().contains("Pagos.xlsx"));

    let bytes = test::read_body(resp).await;
    let sheet = zip_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(sheet.contains("15/10/2026"));
    assert!(sheet.contains("<v>2500</v>"));
}

#[actix_web::test]
async fn pdf_without_fonts_is_a_server_error() {
    let (_dir, state) = state();
    let app = app!(state);
    save!(app, json!({ "id": "demanda", "name": "Demanda", "content": DEMANDA }));

    let req = test::TestRequest::post()
        .uri("/api/documents/generate")
        .set_json(json!({ "template_id": "demanda", "format": "pdf", "context": context() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn pdf_generation_uses_configured_fonts() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        db_path: dir.path().join("legajo.sqlite"),
        fonts_dir: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts"),
        font_family: "DejaVuSans".to_string(),
        ..AppConfig::default()
    };
    let state = AppState::new(config);
    state.store.init_schema().unwrap();
    let app = app!(state);
    save!(app, json!({ "id": "demanda", "name": "Demanda", "content": DEMANDA }));

    let req = test::TestRequest::post()
        .uri("/api/documents/generate")
        .set_json(json!({ "template_id": "demanda", "format": "pdf", "context": context() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );

    let bytes = test::read_body(resp).await;
    assert!(bytes.starts_with(b"%PDF"));
}
