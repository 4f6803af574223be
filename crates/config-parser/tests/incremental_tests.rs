//! Incremental parser laws: caching, change detection, and equivalence

use config_parser::{IncrementalParser, ParseOptions, VendorChoice, get_vendor, parse};

const URI: &str = "file:///configs/edge-router.cfg";

const BGP_V1: &str = concat!(
    "router bgp 65001\n",
    " address-family ipv4\n",
    "  neighbor 10.0.0.1 activate\n",
    " exit-address-family\n",
);

const BGP_V2: &str = concat!(
    "router bgp 65001\n",
    " address-family ipv4\n",
    "  neighbor 10.0.0.2 activate\n",
    " exit-address-family\n",
);

fn multi_section(marker: &str) -> String {
    format!(
        concat!(
            "interface GigabitEthernet0/1\n",
            " description uplink\n",
            " no shutdown\n",
            "interface GigabitEthernet0/2\n",
            " description {}\n",
            " no shutdown\n",
            "interface GigabitEthernet0/3\n",
            " description spare\n",
            " shutdown\n",
        ),
        marker
    )
}

#[test]
fn first_parse_is_full() {
    let mut parser = IncrementalParser::new();
    parser.parse(URI, BGP_V1, 1, None).expect("parse");
    let stats = parser.get_last_stats().expect("stats");
    assert!(stats.full_parse);
    assert_eq!(stats.reason, None);
    assert_eq!(stats.vendor, "cisco-ios");
    assert!(parser.is_cached(URI));
    assert_eq!(parser.get_cached_version(URI), 1);
}

#[test]
fn single_section_edit_reparses_incrementally() {
    let mut parser = IncrementalParser::new();
    parser.parse(URI, BGP_V1, 1, None).expect("parse v1");
    let tree = parser.parse(URI, BGP_V2, 2, None).expect("parse v2");

    let stats = parser.get_last_stats().expect("stats");
    assert!(!stats.full_parse);
    assert_eq!(stats.changed_ranges, 1);
    assert_eq!(stats.sections_reparsed, 1);

    let fresh = parse(BGP_V2, &ParseOptions::default()).expect("fresh parse");
    assert_eq!(tree, fresh);
}

#[test]
fn middle_section_edit_keeps_neighbors_cached() {
    let mut parser = IncrementalParser::new();
    let v1 = multi_section("core");
    let v2 = multi_section("edge");
    parser.parse(URI, &v1, 1, None).expect("parse v1");
    let tree = parser.parse(URI, &v2, 2, None).expect("parse v2");

    let stats = parser.get_last_stats().expect("stats");
    assert!(!stats.full_parse);
    assert_eq!(stats.sections_reparsed, 1);

    let fresh = parse(&v2, &ParseOptions::default()).expect("fresh parse");
    assert_eq!(tree, fresh);
}

#[test]
fn stale_version_returns_cached_tree_untouched() {
    let mut parser = IncrementalParser::new();
    let v1_tree = parser.parse(URI, BGP_V1, 5, None).expect("parse");
    let stats_before = parser.get_last_stats().cloned();

    // Same version with different content: the cache wins.
    let tree = parser.parse(URI, BGP_V2, 5, None).expect("stale parse");
    assert_eq!(tree, v1_tree);
    assert_eq!(parser.get_cached_version(URI), 5);
    let stats_after = parser.get_last_stats().cloned();
    assert_eq!(
        serde_json::to_value(&stats_before).expect("json"),
        serde_json::to_value(&stats_after).expect("json"),
    );
}

#[test]
fn unchanged_content_bumps_version_only() {
    let mut parser = IncrementalParser::new();
    parser.parse(URI, BGP_V1, 1, None).expect("parse");
    let tree = parser.parse(URI, BGP_V1, 2, None).expect("reparse");

    assert_eq!(parser.get_cached_version(URI), 2);
    let stats = parser.get_last_stats().expect("stats");
    assert!(!stats.full_parse);
    assert_eq!(stats.changed_ranges, 0);
    assert_eq!(stats.sections_reparsed, 0);
    assert_eq!(tree, parse(BGP_V1, &ParseOptions::default()).expect("fresh"));
}

#[test]
fn vendor_switch_forces_full_parse() {
    let mut parser = IncrementalParser::new();
    parser.parse(URI, BGP_V1, 1, None).expect("parse");
    assert_eq!(parser.get_cached_vendor(URI).as_deref(), Some("cisco-ios"));

    parser
        .parse(URI, BGP_V1, 2, Some("arista-eos"))
        .expect("vendor override");
    let stats = parser.get_last_stats().expect("stats");
    assert!(stats.full_parse);
    assert_eq!(stats.reason.as_deref(), Some("vendor_changed"));
    assert_eq!(parser.get_cached_vendor(URI).as_deref(), Some("arista-eos"));
}

#[test]
fn rewriting_most_lines_falls_back_to_full_parse() {
    let mut parser = IncrementalParser::new();
    let v1 = multi_section("core");
    parser.parse(URI, &v1, 1, None).expect("parse v1");

    let v2 = v1.replace("description", "alias").replace("shutdown", "enable");
    parser.parse(URI, &v2, 2, None).expect("parse v2");
    let stats = parser.get_last_stats().expect("stats");
    assert!(stats.full_parse);
    assert_eq!(stats.reason.as_deref(), Some("too_many_changes"));
}

#[test]
fn large_line_count_swing_is_structural() {
    let mut parser = IncrementalParser::new();
    let mut v1 = String::new();
    for i in 0..50 {
        v1.push_str(&format!("interface GigabitEthernet0/{i}\n shutdown\n"));
    }
    parser.parse(URI, &v1, 1, None).expect("parse v1");

    let mut v2 = v1.clone();
    for _ in 0..12 {
        v2.push_str("! padding\n");
    }
    parser.parse(URI, &v2, 2, None).expect("parse v2");
    let stats = parser.get_last_stats().expect("stats");
    assert!(stats.full_parse);
    assert_eq!(stats.reason.as_deref(), Some("structural_changes"));
}

#[test]
fn edit_sequence_matches_fresh_parse_at_every_step() {
    let mut parser = IncrementalParser::new();
    let steps = [
        multi_section("core"),
        multi_section("edge"),
        multi_section("lab"),
        multi_section("edge"),
    ];
    for (version, content) in steps.iter().enumerate() {
        let tree = parser
            .parse(URI, content, (version + 1) as i64, None)
            .expect("parse step");
        let fresh = parse(content, &ParseOptions::default()).expect("fresh parse");
        assert_eq!(tree, fresh, "divergence at step {version}");
    }
}

#[test]
fn auto_vendor_sticks_to_the_cached_choice() {
    let junos_v1 = "interfaces {\n    ge-0/0/0 {\n        mtu 9192;\n    }\n}\n";
    // The edit removes the only junos fingerprint token; standalone
    // detection of v2 would fall back to the default schema.
    let junos_v2 = "interfaces {\n    fe-0/0/0 {\n        mtu 9192;\n    }\n}\n";

    let mut parser = IncrementalParser::new();
    parser.parse(URI, junos_v1, 1, None).expect("parse v1");
    assert_eq!(parser.get_cached_vendor(URI).as_deref(), Some("juniper-junos"));

    parser.parse(URI, junos_v2, 2, None).expect("parse v2");
    assert_eq!(parser.get_cached_vendor(URI).as_deref(), Some("juniper-junos"));
}

#[test]
fn fixed_vendor_constructor_skips_detection() {
    let schema = get_vendor("fortinet-fortios").expect("schema");
    let mut parser = IncrementalParser::with_vendor(VendorChoice::Vendor(schema));
    parser
        .parse(URI, "config system global\n    set admintimeout 30\nend\n", 1, None)
        .expect("parse");
    assert_eq!(parser.get_cached_vendor(URI).as_deref(), Some("fortinet-fortios"));
}

#[test]
fn unknown_vendor_override_falls_back_to_default() {
    let mut parser = IncrementalParser::new();
    parser
        .parse(URI, BGP_V1, 1, Some("no-such-vendor"))
        .expect("parse");
    assert_eq!(parser.get_cached_vendor(URI).as_deref(), Some("cisco-ios"));
}

#[test]
fn cache_administration() {
    let mut parser = IncrementalParser::new();
    assert_eq!(parser.get_cached_version(URI), -1);
    assert_eq!(parser.cache_size(), 0);

    parser.parse(URI, BGP_V1, 1, None).expect("parse");
    parser
        .parse("file:///configs/other.cfg", BGP_V1, 1, None)
        .expect("parse other");
    assert_eq!(parser.cache_size(), 2);

    assert!(parser.invalidate(URI));
    assert!(!parser.invalidate(URI));
    assert!(!parser.is_cached(URI));
    assert_eq!(parser.get_cached_version(URI), -1);
    assert_eq!(parser.get_cached_vendor(URI), None);

    parser.clear_all();
    assert_eq!(parser.cache_size(), 0);
}

#[test]
fn invalidation_forces_full_reparse() {
    let mut parser = IncrementalParser::new();
    parser.parse(URI, BGP_V1, 1, None).expect("parse");
    parser.invalidate(URI);
    parser.parse(URI, BGP_V2, 2, None).expect("reparse");
    let stats = parser.get_last_stats().expect("stats");
    assert!(stats.full_parse);
}

#[test]
fn parse_time_is_reported() {
    let mut parser = IncrementalParser::new();
    parser.parse(URI, BGP_V1, 1, None).expect("parse");
    let stats = parser.get_last_stats().expect("stats");
    assert!(stats.parse_time_ms >= 0.0);
}
