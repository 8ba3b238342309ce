#[cfg(test)]
mod openapi_tests {
    use inventory_api::ApiDoc;
    use utoipa::OpenApi;

    #[test]
    fn test_openapi_lists_item_routes() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;

        assert!(paths.contains_key("/items"));
        assert!(paths.contains_key("/items/{key}"));
        assert!(paths.contains_key("/items/priceBetween/{low}/and/{high}"));
    }

    #[test]
    fn test_openapi_exposes_item_schema() {
        let json = ApiDoc::openapi().to_json().unwrap();

        assert!(json.contains("\"Item\""));
        assert!(json.contains("packageDate"));
        assert!(json.contains("ErrorResponse"));
    }
}
