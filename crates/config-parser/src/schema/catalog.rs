//! The sixteen vendor dialect schemas
//!
//! Schemas are data, not behavior. Starter order within a schema is the
//! tie-breaking policy: more specific patterns are listed before generic
//! ones. A pattern body registered at several depths marks a token that
//! opens different scopes at different nesting levels.

use super::{BlockStarter, VendorSchema};
use regex::Regex;
use regex::RegexBuilder;

fn re(body: &str) -> Regex {
    RegexBuilder::new(&format!("^{body}"))
        .case_insensitive(true)
        .build()
        .expect("vendor schema pattern")
}

fn starter(body: &str, depth: usize) -> BlockStarter {
    BlockStarter {
        pattern: re(body),
        depth,
    }
}

pub(super) fn build() -> Vec<VendorSchema> {
    vec![
        cisco_ios(),
        cisco_nxos(),
        arista_eos(),
        juniper_junos(),
        vyos(),
        fortinet_fortios(),
        paloalto_panos(),
        mikrotik_routeros(),
        cumulus_nclu(),
        aruba_os(),
        aruba_aoscx(),
        aruba_aos_switch(),
        extreme_exos(),
        extreme_voss(),
        nokia_sros(),
        huawei_vrp(),
    ]
}

fn cisco_ios() -> VendorSchema {
    VendorSchema {
        id: "cisco-ios",
        name: "Cisco IOS/IOS-XE",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"interface\s+\S+", 0),
            starter(r"router\s+\w+", 0),
            starter(r"line\s+\S+", 0),
            starter(r"ip\s+vrf\s+\S+", 0),
            starter(r"vrf\s+definition\s+\S+", 0),
            starter(r"ip\s+access-list\s+\S+", 0),
            starter(r"class-map\b", 0),
            starter(r"policy-map\b", 0),
            starter(r"route-map\s+\S+", 0),
            starter(r"crypto\s+map\s+\S+", 0),
            starter(r"vlan\s+\d+", 0),
            // Same token at two depths: global address families nest under
            // the routing process, per-VRF families one level deeper.
            starter(r"address-family\s+\S+", 1),
            starter(r"address-family\s+\S+", 2),
        ],
        block_enders: vec![re(r"exit-address-family$"), re(r"exit$"), re(r"end$")],
        comment_patterns: vec![re(r"!")],
        section_delimiter: Some('!'),
    }
}

fn cisco_nxos() -> VendorSchema {
    VendorSchema {
        id: "cisco-nxos",
        name: "Cisco NX-OS",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"interface\s+\S+", 0),
            starter(r"router\s+\w+", 0),
            starter(r"vrf\s+context\s+\S+", 0),
            starter(r"vpc\s+domain\s+\d+", 0),
            starter(r"vlan\s+\d+", 0),
            starter(r"line\s+\S+", 0),
            starter(r"class-map\b", 0),
            starter(r"policy-map\b", 0),
            starter(r"ip\s+access-list\s+\S+", 0),
            // BGP: vrf and neighbor scopes repeat one level deeper inside a
            // vrf block, address families one deeper again. Anchored to a
            // single argument so one-liners like `vrf member BLUE` stay
            // commands.
            starter(r"vrf\s+\S+$", 1),
            starter(r"neighbor\s+\S+$", 1),
            starter(r"neighbor\s+\S+$", 2),
            starter(r"address-family\s+\S+", 1),
            starter(r"address-family\s+\S+", 2),
            starter(r"address-family\s+\S+", 3),
        ],
        block_enders: vec![re(r"exit$"), re(r"end$")],
        comment_patterns: vec![re(r"!")],
        section_delimiter: Some('!'),
    }
}

fn arista_eos() -> VendorSchema {
    VendorSchema {
        id: "arista-eos",
        name: "Arista EOS",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"interface\s+\S+", 0),
            starter(r"router\s+\w+", 0),
            starter(r"vlan\s+\d+", 0),
            starter(r"mlag\s+configuration", 0),
            starter(r"management\s+\S+", 0),
            starter(r"ip\s+access-list\s+\S+", 0),
            starter(r"class-map\b", 0),
            starter(r"policy-map\b", 0),
            starter(r"route-map\s+\S+", 0),
            starter(r"daemon\s+\S+", 0),
            starter(r"vrf\s+\S+$", 1),
            starter(r"address-family\s+\S+", 1),
            starter(r"address-family\s+\S+", 2),
        ],
        block_enders: vec![re(r"exit$"), re(r"end$")],
        comment_patterns: vec![re(r"!")],
        section_delimiter: Some('!'),
    }
}

fn juniper_junos() -> VendorSchema {
    VendorSchema {
        id: "juniper-junos",
        name: "Juniper Junos",
        use_brace_hierarchy: true,
        block_starters: vec![
            starter(r"system\b", 0),
            starter(r"interfaces\b", 0),
            starter(r"protocols\b", 0),
            starter(r"routing-options\b", 0),
            starter(r"routing-instances\b", 0),
            starter(r"policy-options\b", 0),
            starter(r"firewall\b", 0),
            starter(r"security\b", 0),
            starter(r"vlans\b", 0),
            starter(r"chassis\b", 0),
            starter(r"services\b", 0),
            starter(r"snmp\b", 0),
            starter(r"forwarding-options\b", 0),
        ],
        block_enders: Vec::new(),
        comment_patterns: vec![re(r"#"), re(r"/\*"), re(r"\*")],
        section_delimiter: None,
    }
}

fn vyos() -> VendorSchema {
    VendorSchema {
        id: "vyos",
        name: "VyOS/EdgeOS",
        use_brace_hierarchy: true,
        block_starters: vec![
            starter(r"interfaces\b", 0),
            starter(r"service\b", 0),
            starter(r"system\b", 0),
            starter(r"firewall\b", 0),
            starter(r"nat\b", 0),
            starter(r"protocols\b", 0),
            starter(r"vpn\b", 0),
            starter(r"policy\b", 0),
            starter(r"high-availability\b", 0),
            starter(r"load-balancing\b", 0),
        ],
        block_enders: Vec::new(),
        comment_patterns: vec![re(r"#"), re(r"/\*")],
        section_delimiter: None,
    }
}

fn fortinet_fortios() -> VendorSchema {
    VendorSchema {
        id: "fortinet-fortios",
        name: "Fortinet FortiOS",
        use_brace_hierarchy: false,
        block_starters: vec![
            // `config` tables nest under `edit` entries recursively; the
            // parser's child-depth promotion handles the deeper repeats.
            starter(r"config\s+\S+", 0),
            starter(r"edit\s+\S+", 1),
        ],
        block_enders: vec![re(r"end$"), re(r"next$")],
        comment_patterns: vec![re(r"#")],
        section_delimiter: None,
    }
}

fn paloalto_panos() -> VendorSchema {
    VendorSchema {
        id: "paloalto-panos",
        name: "Palo Alto PAN-OS",
        use_brace_hierarchy: true,
        block_starters: vec![
            starter(r"config\b", 0),
            starter(r"devices\b", 0),
            starter(r"deviceconfig\b", 0),
            starter(r"mgt-config\b", 0),
            starter(r"shared\b", 0),
            starter(r"vsys\b", 0),
            starter(r"network\b", 0),
            starter(r"rulebase\b", 0),
        ],
        block_enders: Vec::new(),
        comment_patterns: vec![re(r"#")],
        section_delimiter: None,
    }
}

fn mikrotik_routeros() -> VendorSchema {
    VendorSchema {
        id: "mikrotik-routeros",
        name: "MikroTik RouterOS",
        use_brace_hierarchy: false,
        block_starters: vec![
            // Path headers (`/ip address`, `/system identity`) open flat
            // top-level scopes; everything else is a command under them.
            starter(r"/\S*", 0),
        ],
        block_enders: Vec::new(),
        comment_patterns: vec![re(r"#")],
        section_delimiter: Some('/'),
    }
}

fn cumulus_nclu() -> VendorSchema {
    VendorSchema {
        id: "cumulus-nclu",
        name: "Cumulus Linux (NCLU/NVUE)",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"auto\s+\S+", 0),
            starter(r"iface\s+\S+", 0),
            starter(r"allow-\S+", 0),
            starter(r"vrf\s+\S+", 0),
            starter(r"mapping\s+\S+", 0),
        ],
        block_enders: Vec::new(),
        comment_patterns: vec![re(r"#")],
        section_delimiter: None,
    }
}

fn aruba_os() -> VendorSchema {
    VendorSchema {
        id: "aruba-os",
        name: "Aruba OS (WLC)",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"wlan\s+\S+", 0),
            starter(r"ap\s+\S+", 0),
            starter(r"rf\s+\S+", 0),
            starter(r"aaa\s+\S+", 0),
            starter(r"user-role\s+\S+", 0),
            starter(r"interface\s+\S+", 0),
            starter(r"vlan\s+\d+", 0),
            starter(r"netdestination\s+\S+", 0),
            starter(r"ip\s+access-list\s+\S+", 0),
            starter(r"crypto\s+\S+", 0),
        ],
        // A bare `!` terminates the profile block on controllers, so it is
        // an ender here rather than a comment.
        block_enders: vec![re(r"!$")],
        comment_patterns: vec![re(r"#")],
        section_delimiter: Some('!'),
    }
}

fn aruba_aoscx() -> VendorSchema {
    VendorSchema {
        id: "aruba-aoscx",
        name: "Aruba AOS-CX",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"interface\s+\S+", 0),
            starter(r"vlan\s+\d+", 0),
            starter(r"router\s+\w+", 0),
            starter(r"access-list\s+\S+", 0),
            starter(r"class\s+\S+", 0),
            starter(r"policy\s+\S+", 0),
            starter(r"vsx\b", 0),
            starter(r"address-family\s+\S+", 1),
        ],
        block_enders: vec![re(r"exit$"), re(r"end$")],
        comment_patterns: vec![re(r"!")],
        section_delimiter: Some('!'),
    }
}

fn aruba_aos_switch() -> VendorSchema {
    VendorSchema {
        id: "aruba-aos-switch",
        name: "Aruba AOS-Switch (ProCurve)",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"interface\s+\S+", 0),
            starter(r"vlan\s+\d+", 0),
            starter(r"router\s+\w+", 0),
        ],
        block_enders: vec![re(r"exit$")],
        comment_patterns: vec![re(r";")],
        section_delimiter: Some(';'),
    }
}

fn extreme_exos() -> VendorSchema {
    VendorSchema {
        id: "extreme-exos",
        name: "Extreme EXOS",
        use_brace_hierarchy: false,
        // EXOS configurations are flat command scripts; the parser groups
        // the whole document under a virtual root.
        block_starters: Vec::new(),
        block_enders: Vec::new(),
        comment_patterns: vec![re(r"#")],
        section_delimiter: None,
    }
}

fn extreme_voss() -> VendorSchema {
    VendorSchema {
        id: "extreme-voss",
        name: "Extreme VOSS",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"interface\s+\S+", 0),
            starter(r"router\s+\w+", 0),
        ],
        block_enders: vec![re(r"exit$")],
        comment_patterns: vec![re(r"#")],
        section_delimiter: None,
    }
}

fn nokia_sros() -> VendorSchema {
    VendorSchema {
        id: "nokia-sros",
        name: "Nokia SR OS",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"configure\b", 0),
            starter(r"system\b", 1),
            starter(r"router\b", 1),
            starter(r"service\b", 1),
            starter(r"port\s+\S+", 1),
            starter(r"card\s+\d+", 1),
            starter(r"log\b", 1),
            starter(r"qos\b", 1),
            starter(r"filter\b", 1),
            starter(r"vprn\s+\d+", 2),
            starter(r"vpls\s+\d+", 2),
            starter(r"epipe\s+\d+", 2),
            starter(r"ethernet\b", 2),
            starter(r"bgp\b", 2),
            starter(r"ospf\b", 2),
            starter(r"isis\b", 2),
            // Interfaces appear under router and again under services.
            starter(r"interface\s+\S+", 2),
            starter(r"interface\s+\S+", 3),
            starter(r"group\s+\S+", 3),
            starter(r"neighbor\s+\S+$", 4),
        ],
        block_enders: vec![re(r"exit\s+all$"), re(r"exit$")],
        comment_patterns: vec![re(r"#")],
        section_delimiter: None,
    }
}

fn huawei_vrp() -> VendorSchema {
    VendorSchema {
        id: "huawei-vrp",
        name: "Huawei VRP",
        use_brace_hierarchy: false,
        block_starters: vec![
            starter(r"interface\s+\S+", 0),
            starter(r"bgp\s+\d+", 0),
            starter(r"ospf\s+\d+", 0),
            starter(r"isis\s+\d+", 0),
            starter(r"aaa\b", 0),
            starter(r"acl\s+\S+", 0),
            starter(r"vlan\s+\d+$", 0),
            starter(r"user-interface\s+\S+", 0),
            starter(r"ip\s+vpn-instance\s+\S+", 0),
            starter(r"ipv4-family\b", 1),
            starter(r"ipv6-family\b", 1),
        ],
        block_enders: vec![re(r"return$"), re(r"quit$")],
        comment_patterns: vec![re(r"#")],
        section_delimiter: Some('#'),
    }
}
