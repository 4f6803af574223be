//! End-to-end parse scenarios across vendor dialects

use config_parser::{
    ConfigNode, NodeKind, ParseOptions, ParserError, TreeTraversal, get_vendor, parse,
    parse_with_schema,
};

fn parse_auto(text: &str) -> Vec<ConfigNode> {
    parse(text, &ParseOptions::default()).expect("parse")
}

fn parse_vendor(text: &str, vendor: &str) -> Vec<ConfigNode> {
    let schema = get_vendor(vendor).expect("vendor schema");
    parse_with_schema(text, schema, &ParseOptions::default()).expect("parse")
}

#[test]
fn cisco_nested_address_family() {
    let config = concat!(
        "router bgp 65001\n",
        " address-family ipv4\n",
        "  neighbor 10.0.0.1 activate\n",
        " exit-address-family\n",
    );
    let forest = parse_auto(config);

    assert_eq!(forest.len(), 1);
    let bgp = &forest[0];
    assert_eq!(bgp.id, "router bgp 65001");
    assert_eq!(bgp.block_depth(), Some(0));
    assert_eq!(bgp.children.len(), 1);

    let af = &bgp.children[0];
    assert_eq!(af.id, "address-family ipv4");
    assert_eq!(af.block_depth(), Some(1));
    assert_eq!(af.children.len(), 1);
    assert_eq!(af.children[0].id, "neighbor 10.0.0.1 activate");
    assert_eq!(af.children[0].kind, NodeKind::Command);

    // The ender line closes the scope without becoming a node.
    let enders = TreeTraversal::find_by_prefix(&forest, "exit-address-family");
    assert!(enders.is_empty());
}

#[test]
fn juniper_interface_unit_family_chain() {
    let config = concat!(
        "interfaces {\n",
        "    ge-0/0/0 {\n",
        "        unit 0 {\n",
        "            family inet {\n",
        "                address 10.0.0.1/24;\n",
        "            }\n",
        "        }\n",
        "    }\n",
        "}\n",
    );
    let forest = parse_auto(config);

    let mut node = &forest[0];
    for (expected_id, expected_depth) in [
        ("interfaces", 0),
        ("ge-0/0/0", 1),
        ("unit 0", 2),
        ("family inet", 3),
    ] {
        assert_eq!(node.id, expected_id);
        assert_eq!(node.block_depth(), Some(expected_depth));
        node = &node.children[0];
    }
    assert_eq!(node.id, "address 10.0.0.1/24");
    assert_eq!(node.kind, NodeKind::Command);
}

#[test]
fn fortinet_config_edit_next_end() {
    let config = concat!(
        "config system interface\n",
        "    edit \"port1\"\n",
        "        set ip 192.168.1.1 255.255.255.0\n",
        "        set allowaccess ping https ssh\n",
        "    next\n",
        "end\n",
    );
    let forest = parse_auto(config);

    assert_eq!(forest.len(), 1);
    let table = &forest[0];
    assert_eq!(table.id, "config system interface");
    assert_eq!(table.block_depth(), Some(0));
    assert_eq!(table.children.len(), 1);

    let entry = &table.children[0];
    assert_eq!(entry.id, "edit \"port1\"");
    assert_eq!(entry.block_depth(), Some(1));
    assert_eq!(entry.children.len(), 2);
    assert_eq!(entry.children[0].id, "set ip 192.168.1.1 255.255.255.0");
    assert_eq!(entry.children[1].id, "set allowaccess ping https ssh");
    // Quoted edit names tokenize with the quotes consumed.
    assert_eq!(entry.params, vec!["edit", "port1"]);
}

#[test]
fn mikrotik_path_sections() {
    let config = concat!(
        "/ip address\n",
        "add address=192.168.1.1/24 interface=LAN\n",
        "/system identity\n",
        "set name=MyRouter\n",
    );
    let forest = parse_auto(config);

    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].id, "/ip address");
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(forest[1].id, "/system identity");
    assert_eq!(forest[1].children.len(), 1);
    assert_eq!(forest[1].children[0].id, "set name=MyRouter");
}

#[test]
fn cumulus_vrf_stays_inside_iface() {
    let config = concat!(
        "auto eth0\n",
        "iface eth0\n",
        "    address 10.0.0.1/24\n",
        "    vrf mgmt\n",
    );
    let forest = parse_vendor(config, "cumulus-nclu");

    // One stanza: the `auto eth0` marker is claimed by `iface eth0`, which
    // ends up with exactly three command children.
    assert_eq!(forest.len(), 1);
    let iface = &forest[0];
    assert_eq!(iface.id, "iface eth0");
    assert!(iface.is_section());
    assert_eq!(iface.children.len(), 3);
    assert!(iface.children.iter().all(ConfigNode::is_command));
    assert_eq!(iface.children[0].id, "auto eth0");
    assert_eq!(iface.children[1].id, "address 10.0.0.1/24");

    // The override keeps `vrf mgmt` a command, not a new top-level section.
    let vrf = &iface.children[2];
    assert_eq!(vrf.id, "vrf mgmt");
    assert_eq!(vrf.kind, NodeKind::Command);
}

#[test]
fn nxos_bgp_vrf_neighbor_nesting() {
    let config = concat!(
        "feature bgp\n",
        "router bgp 65000\n",
        "  vrf CUSTOMER\n",
        "    neighbor 10.1.1.1\n",
        "      address-family ipv4 unicast\n",
        "        send-community\n",
    );
    let forest = parse_auto(config);

    let bgp = forest
        .iter()
        .find(|n| n.id == "router bgp 65000")
        .expect("bgp section");
    let vrf = &bgp.children[0];
    assert_eq!(vrf.id, "vrf CUSTOMER");
    assert_eq!(vrf.block_depth(), Some(1));
    let neighbor = &vrf.children[0];
    assert_eq!(neighbor.id, "neighbor 10.1.1.1");
    assert_eq!(neighbor.block_depth(), Some(2));
    let af = &neighbor.children[0];
    assert_eq!(af.id, "address-family ipv4 unicast");
    assert_eq!(af.block_depth(), Some(3));
    assert_eq!(af.children[0].id, "send-community");
}

#[test]
fn nokia_classic_indented_blocks() {
    let config = concat!(
        "configure\n",
        "    router\n",
        "        interface \"system\"\n",
        "            address 10.0.0.1/32\n",
        "        exit\n",
        "    exit\n",
        "exit\n",
    );
    let forest = parse_vendor(config, "nokia-sros");

    assert_eq!(forest.len(), 1);
    let configure = &forest[0];
    assert_eq!(configure.block_depth(), Some(0));
    let router = &configure.children[0];
    assert_eq!(router.id, "router");
    assert_eq!(router.block_depth(), Some(1));
    let iface = &router.children[0];
    assert_eq!(iface.id, "interface \"system\"");
    assert_eq!(iface.block_depth(), Some(2));
    assert_eq!(iface.children[0].id, "address 10.0.0.1/32");
}

#[test]
fn huawei_section_markers_are_skipped() {
    let config = concat!(
        "#\n",
        "sysname CE6850\n",
        "#\n",
        "interface GigabitEthernet0/0/1\n",
        " port link-type trunk\n",
        "#\n",
        "return\n",
    );
    let forest = parse_vendor(config, "huawei-vrp");

    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].kind, NodeKind::VirtualRoot);
    assert_eq!(forest[0].children[0].id, "sysname CE6850");
    assert_eq!(forest[1].id, "interface GigabitEthernet0/0/1");
    assert_eq!(forest[1].children.len(), 1);
}

#[test]
fn exos_flat_script_collapses_to_virtual_root() {
    let config = concat!(
        "create vlan \"data\" tag 100\n",
        "configure vlan data add ports 1-4 untagged\n",
        "enable sharing 1 grouping 1-2\n",
    );
    let forest = parse_auto(config);

    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].kind, NodeKind::VirtualRoot);
    assert_eq!(forest[0].children.len(), 3);
    assert!(forest[0].children.iter().all(ConfigNode::is_command));
}

#[test]
fn aruba_wlc_profiles_closed_by_bang() {
    let config = concat!(
        "wlan ssid-profile \"corp\"\n",
        "   essid corp\n",
        "   opmode wpa3-aes-ccm-128\n",
        "!\n",
        "wlan virtual-ap \"corp-vap\"\n",
        "   ssid-profile \"corp\"\n",
        "!\n",
    );
    let forest = parse_vendor(config, "aruba-os");

    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].children.len(), 2);
    assert_eq!(forest[1].children.len(), 1);
}

#[test]
fn empty_and_comment_only_input() {
    assert!(parse_auto("").is_empty());
    assert!(parse_vendor("! nothing here\n!\n", "cisco-ios").is_empty());
}

#[test]
fn oversized_config_is_rejected() {
    // A single line larger than the byte cap trips the pre-check.
    let text = "x".repeat(config_parser::limits::MAX_CONFIG_SIZE + 1);
    let err = parse(&text, &ParseOptions::default()).unwrap_err();
    match err {
        ParserError::SizeLimit(message) => assert!(message.contains("bytes")),
        ParserError::Parse { .. } => panic!("expected size limit error"),
    }
}

#[test]
fn forest_serializes_to_json() -> anyhow::Result<()> {
    let forest = parse_auto("interface Gi0/1\n description up\n");
    let json = serde_json::to_string(&forest)?;
    let restored: Vec<ConfigNode> = serde_json::from_str(&json)?;
    assert_eq!(forest, restored);
    Ok(())
}

#[test]
fn params_are_quote_aware_in_trees() {
    let forest = parse_vendor("interface Gi0/1\n description \"core uplink\"\n", "cisco-ios");
    let description = &forest[0].children[0];
    assert_eq!(description.params, vec!["description", "core uplink"]);
    // Raw text keeps the original bytes, indentation included.
    assert_eq!(description.raw_text, " description \"core uplink\"");
    assert_eq!(description.indent, 1);
}
