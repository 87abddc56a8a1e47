use nemtex::TabRouter;

const MANIFEST: &str = r#"{
    "pages": [
        {"key": "overview", "label": "Overview", "body": "Relics are rare drops."},
        {"key": "ember", "label": "Ember Heart", "body": "Burns forever."},
        {"key": "tide", "label": "Tide Pearl", "body": "See also the ember page."}
    ]
}"#;

#[test]
fn sidebar_and_links_share_navigation() {
    let mut router = TabRouter::from_json(MANIFEST).unwrap();
    assert_eq!(router.active().key, "overview");

    let nav = router.select("tide").unwrap();
    assert!(nav.scroll_to_top);
    assert_eq!(router.active().body, "See also the ember page.");

    router.follow_link("ember").unwrap();
    assert!(router.is_active("ember"));
    assert!(!router.is_active("tide"));
}

#[test]
fn search_narrows_selectors_without_navigating() {
    let mut router = TabRouter::from_json(MANIFEST).unwrap();
    router.set_filter("heart");
    let labels: Vec<_> = router
        .visible_selectors()
        .into_iter()
        .map(|p| p.label.clone())
        .collect();
    assert_eq!(labels, vec!["Ember Heart".to_string()]);
    assert!(router.is_active("overview"));
}

#[test]
fn malformed_manifest_is_reported() {
    let err = TabRouter::from_json("{ not json").unwrap_err();
    assert!(matches!(err, nemtex::Error::Serialization(_)));
}
