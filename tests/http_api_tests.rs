//! End-to-end tests of the HTTP API over the fixture dataset

use axum::http::StatusCode;
use axum_test::TestServer;
use directory::core::employee::parse_epoch;
use directory::prelude::*;
use serde_json::{Value, json};

const DATASET_LENGTH: u64 = 12;

// =============================================================================
// Helper function to create test server
// =============================================================================

async fn create_test_server() -> TestServer {
    let mut config = DirectoryConfig::default();
    config.data.path =
        format!("{}/tests/fixtures/employees.db.txt", env!("CARGO_MANIFEST_DIR")).into();

    let app = ServerBuilder::new()
        .with_config(config)
        .load_dataset()
        .await
        .build()
        .expect("Failed to build app");

    TestServer::new(app).expect("Failed to create test server")
}

fn epoch(date: &str) -> f64 {
    parse_epoch(date).expect("valid date")
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server().await;

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["employees"], DATASET_LENGTH);
    }

    #[tokio::test]
    async fn test_api_version() {
        let server = create_test_server().await;

        let response = server.get("/api/v1").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "result": "API version 1" }));
    }
}

// =============================================================================
// Listing Tests
// =============================================================================

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_default_query() {
        let server = create_test_server().await;

        let response = server.get("/api/v1/employees").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], DATASET_LENGTH);
        assert_eq!(body["data"].as_array().unwrap().len(), 12);
        assert_eq!(body["data"][0]["fullName"], "Abbotts Sarita");
        assert_eq!(body["data"][0]["jobTitle"], "Senior Javascript Developer");
    }

    #[tokio::test]
    async fn test_page_and_limit() {
        let server = create_test_server().await;

        let response = server
            .get("/api/v1/employees")
            .add_query_param("page", 2)
            .add_query_param("limit", 5)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], DATASET_LENGTH);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(data[0]["fullName"], "Antonoyev Isiahi");
    }

    #[tokio::test]
    async fn test_invalid_parameters_fall_back_to_defaults() {
        let server = create_test_server().await;

        let response = server
            .get("/api/v1/employees")
            .add_query_param("orderedBy", "shoeSize")
            .add_query_param("sortMode", "up")
            .add_query_param("page", "first")
            .add_query_param("limit", "-3")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"][0]["fullName"], "Abbotts Sarita");
        assert_eq!(body["data"].as_array().unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_sort_alias_descending_salary() {
        let server = create_test_server().await;

        let response = server
            .get("/api/v1/employees")
            .add_query_param("orderedBy", "salary")
            .add_query_param("sort", "desc")
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"][0]["salary"], 79_995.0);
    }

    #[tokio::test]
    async fn test_unparsable_values_serialize_as_null() {
        let server = create_test_server().await;

        let response = server
            .get("/api/v1/employees")
            .add_query_param("orderedBy", "salary")
            .add_query_param("page", 12)
            .add_query_param("limit", 1)
            .await;

        let body: Value = response.json();
        assert_eq!(body["data"][0]["fullName"], "Quill Noor");
        assert!(body["data"][0]["salary"].is_null());
        assert!(body["data"][0]["startDate"].is_null());
    }

    #[tokio::test]
    async fn test_start_date_filter() {
        let server = create_test_server().await;
        let filters = json!([{ "key": "startDate", "to": "2010-01-01" }]).to_string();

        let response = server
            .get("/api/v1/employees")
            .add_query_param("orderedBy", "startDate")
            .add_query_param("sort", "asc")
            .add_query_param("filters", &filters)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], 6);
        assert_eq!(body["data"][0]["startDate"], epoch("1998-12-30"));
        assert_eq!(body["data"][5]["startDate"], epoch("2009-12-15"));
    }

    #[tokio::test]
    async fn test_combined_filters() {
        let server = create_test_server().await;
        let filters = json!([
            { "key": "office", "value": "Paris" },
            { "key": "salary", "from": 60000 }
        ])
        .to_string();

        let response = server
            .get("/api/v1/employees")
            .add_query_param("filters", &filters)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], 1);
        assert_eq!(body["data"][0]["fullName"], "Antoniewski Fiann");
    }

    #[tokio::test]
    async fn test_unknown_filter_key_is_ignored() {
        let server = create_test_server().await;
        let filters = json!([{ "key": "gender", "value": "F" }]).to_string();

        let response = server
            .get("/api/v1/employees")
            .add_query_param("filters", &filters)
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["count"], DATASET_LENGTH);
    }

    #[tokio::test]
    async fn test_filter_without_usable_key_is_ignored() {
        let server = create_test_server().await;

        for filters in [r#"[{"value":"Paris"}]"#, r#"[{"key":null}]"#] {
            let response = server
                .get("/api/v1/employees")
                .add_query_param("filters", filters)
                .await;
            response.assert_status_ok();

            let body: Value = response.json();
            assert_eq!(body["count"], DATASET_LENGTH);
        }
    }

    #[tokio::test]
    async fn test_malformed_filters_rejected() {
        let server = create_test_server().await;

        let response = server
            .get("/api/v1/employees")
            .add_query_param("filters", "[{\"key\":")
            .expect_failure()
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_FILTERS");
        assert_eq!(body["details"]["parameter"], "filters");
    }
}

// =============================================================================
// Filter Props Tests
// =============================================================================

mod filter_props_tests {
    use super::*;

    #[tokio::test]
    async fn test_filter_props() {
        let server = create_test_server().await;

        let response = server.get("/api/v1/employeesFilterProps").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["departments"], json!(["Engineering", "Support", "System"]));
        assert_eq!(body["offices"].as_array().unwrap().len(), 11);
        assert_eq!(body["countries"][0], "Belgium");
        assert_eq!(body["jobTitles"][0], "Development Team Leader");
    }
}

// =============================================================================
// Export Tests
// =============================================================================

mod export_tests {
    use super::*;
    use calamine::{Reader, Xlsx};
    use std::io::Cursor;

    fn read_sheet(bytes: Vec<u8>) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("valid workbook");
        assert_eq!(workbook.sheet_names(), ["data"]);
        let range = workbook.worksheet_range("data").expect("data sheet");
        range
            .rows()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[tokio::test]
    async fn test_export_attachment() {
        let server = create_test_server().await;
        let filters = json!([{ "key": "jobTitle", "value": "Support Lead" }]).to_string();

        let response = server
            .get("/api/v1/employees/export")
            .add_query_param("orderedBy", "salary")
            .add_query_param("sortMode", "desc")
            .add_query_param("filters", &filters)
            .await;
        response.assert_status_ok();

        let disposition = response.header("content-disposition");
        assert_eq!(
            disposition.to_str().unwrap(),
            "attachment; filename=\"data.xlsx\""
        );
        assert_eq!(
            response.header("content-type").to_str().unwrap(),
            "application/vnd.ms-excel"
        );

        let sheet = read_sheet(response.as_bytes().to_vec());
        assert_eq!(
            sheet[0],
            ["fullName", "jobTitle", "office", "birthDate", "startDate", "salary"]
        );
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet[1][..3], ["Wix Betsey", "Support Lead", "London"]);
        assert_eq!(sheet[2][..3], ["Aldrick Marney", "Support Lead", "Edinburgh"]);
    }

    #[tokio::test]
    async fn test_export_ignores_pagination() {
        let server = create_test_server().await;

        let response = server
            .get("/api/v1/employees/export")
            .add_query_param("limit", 2)
            .await;
        response.assert_status_ok();

        let sheet = read_sheet(response.as_bytes().to_vec());
        assert_eq!(sheet.len() as u64, DATASET_LENGTH + 1);
    }

    #[tokio::test]
    async fn test_export_csv_format() {
        let server = create_test_server().await;
        let filters = json!([{ "key": "jobTitle", "value": "Support Lead" }]).to_string();

        let response = server
            .get("/api/v1/employees/export")
            .add_query_param("format", "csv")
            .add_query_param("orderedBy", "salary")
            .add_query_param("sortMode", "desc")
            .add_query_param("filters", &filters)
            .await;
        response.assert_status_ok();

        assert_eq!(
            response.header("content-disposition").to_str().unwrap(),
            "attachment; filename=\"data.csv\""
        );
        assert!(
            response
                .header("content-type")
                .to_str()
                .unwrap()
                .starts_with("text/csv")
        );

        let text = response.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "fullName,jobTitle,office,birthDate,startDate,salary");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Wix Betsey,Support Lead,London,"));
        assert!(lines[2].starts_with("Aldrick Marney,Support Lead,Edinburgh,"));
    }
}

// =============================================================================
// Degraded Startup Tests
// =============================================================================

mod degraded_tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_dataset_serves_empty_results() {
        let mut config = DirectoryConfig::default();
        config.data.path = "/definitely/missing/employees.db.txt".into();

        let app = ServerBuilder::new()
            .with_config(config)
            .load_dataset()
            .await
            .build()
            .expect("Failed to build app");
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.get("/api/v1/employees").await;
        response.assert_status_ok();
        response.assert_json(&json!({ "count": 0, "data": [] }));

        let response = server.get("/api/v1/employeesFilterProps").await;
        response.assert_json(&json!({
            "jobTitles": [],
            "offices": [],
            "countries": [],
            "departments": []
        }));
    }
}
