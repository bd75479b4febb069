use super::*;
use serde_json::json;

mod slug {
    use super::*;

    #[test]
    fn test_nested_string() {
        let doc = json!({ "slug": { "current": "hello" } });
        assert_eq!(resolve_slug(Some(&doc), "slug.current"), Some("hello"));
    }

    #[test]
    fn test_non_string_leaf() {
        let doc = json!({ "slug": { "current": 42 } });
        assert_eq!(resolve_slug(Some(&doc), "slug.current"), None);

        let doc = json!({ "slug": { "current": { "nested": "x" } } });
        assert_eq!(resolve_slug(Some(&doc), "slug.current"), None);

        let doc = json!({ "slug": { "current": ["x"] } });
        assert_eq!(resolve_slug(Some(&doc), "slug.current"), None);

        let doc = json!({ "slug": { "current": null } });
        assert_eq!(resolve_slug(Some(&doc), "slug.current"), None);
    }

    #[test]
    fn test_missing_field() {
        let doc = json!({});
        assert_eq!(resolve_slug(Some(&doc), "slug.current"), None);
    }

    #[test]
    fn test_missing_document() {
        assert_eq!(resolve_slug(None, "slug.current"), None);
    }

    #[test]
    fn test_empty_path() {
        let doc = json!({ "slug": "x" });
        assert_eq!(resolve_slug(Some(&doc), ""), None);
    }

    #[test]
    fn test_single_segment() {
        let doc = json!({ "handle": "shoes" });
        assert_eq!(resolve_slug(Some(&doc), "handle"), Some("shoes"));
    }

    #[test]
    fn test_no_descent_through_scalars() {
        let doc = json!({ "slug": "plain" });
        assert_eq!(resolve_slug(Some(&doc), "slug.current"), None);

        let doc = json!({ "slug": null });
        assert_eq!(resolve_slug(Some(&doc), "slug.current"), None);
    }

    #[test]
    fn test_array_index() {
        let doc = json!({ "slugs": [{ "current": "first" }, { "current": "second" }] });
        assert_eq!(resolve_slug(Some(&doc), "slugs.1.current"), Some("second"));
        assert_eq!(resolve_slug(Some(&doc), "slugs.2.current"), None);
        assert_eq!(resolve_slug(Some(&doc), "slugs.first.current"), None);
    }

    #[test]
    fn test_empty_segment() {
        let doc = json!({ "slug": { "current": "hello" } });
        assert_eq!(resolve_slug(Some(&doc), "slug..current"), None);
    }
}

mod prefix {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_unset_prefix_is_empty() {
        let config = PreviewTypeConfig::new("page");
        assert_eq!(resolve_prefix(&config, &json!({})), "");
    }

    #[test]
    fn test_static_prefix_verbatim() {
        let config = PreviewTypeConfig::new("post").with_url_prefix("/blog");
        assert_eq!(resolve_prefix(&config, &json!({})), "/blog");
        assert_eq!(resolve_prefix(&config, &json!({ "category": "x" })), "/blog");

        let config = PreviewTypeConfig::new("post").with_url_prefix("blog/");
        assert_eq!(resolve_prefix(&config, &json!({})), "blog/");
    }

    #[test]
    fn test_derived_prefix_uses_document() {
        let config = PreviewTypeConfig::new("product").with_url_prefix(UrlPrefix::derived(|doc| {
            format!("/products/{}", doc["category"].as_str().unwrap_or_default())
        }));

        let doc = json!({ "category": "shoes" });
        assert_eq!(resolve_prefix(&config, &doc), "/products/shoes");
    }

    #[test]
    fn test_derived_prefix_not_memoized() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let config = PreviewTypeConfig::new("product").with_url_prefix(UrlPrefix::derived(
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                "/p".to_string()
            },
        ));

        resolve_prefix(&config, &json!({}));
        resolve_prefix(&config, &json!({}));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
