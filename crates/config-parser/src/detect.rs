//! Vendor auto-detection
//!
//! An ordered cascade of heuristics over a bounded prefix of the input.
//! The order encodes precedence: the most distinctive syntactic
//! fingerprints run first, and the first positive heuristic wins.
//!
//! Every "block opens then later contains X" check is written as a small
//! per-line state machine instead of a multi-line regex. Adversarial
//! configurations are an expected input class, so each heuristic must stay
//! O(lines) over the detection window.

use crate::limits::DETECTION_WINDOW;
use crate::schema::{self, VendorSchema};
use tracing::debug;

/// Detect the vendor dialect of a raw configuration.
///
/// Only the first [`DETECTION_WINDOW`] characters are inspected. Falls
/// back to the default Cisco-IOS-style schema when nothing matches.
#[must_use]
pub fn detect_vendor(config_text: &str) -> &'static VendorSchema {
    let window = detection_window(config_text);
    let lines: Vec<&str> = window.lines().collect();

    let cascade: [(&str, fn(&[&str]) -> bool); 15] = [
        ("cumulus-nclu", looks_like_cumulus),
        ("mikrotik-routeros", looks_like_mikrotik),
        ("fortinet-fortios", looks_like_fortinet),
        ("paloalto-panos", looks_like_paloalto),
        ("vyos", looks_like_vyos),
        ("juniper-junos", looks_like_junos),
        ("aruba-os", looks_like_aruba_wlc),
        ("aruba-aoscx", looks_like_aoscx),
        ("aruba-aos-switch", looks_like_procurve),
        ("cisco-nxos", looks_like_nxos),
        ("arista-eos", looks_like_arista),
        ("extreme-exos", looks_like_exos),
        ("extreme-voss", looks_like_voss),
        ("nokia-sros", looks_like_nokia),
        ("huawei-vrp", looks_like_huawei),
    ];

    for (id, heuristic) in cascade {
        if heuristic(&lines) {
            debug!(vendor = id, "vendor heuristic matched");
            return schema::get_vendor(id).expect("cascade vendor registered");
        }
    }

    debug!("no vendor heuristic matched, using default");
    schema::default_vendor()
}

/// Prefix of at most [`DETECTION_WINDOW`] characters, on a char boundary
fn detection_window(text: &str) -> &str {
    match text.char_indices().nth(DETECTION_WINDOW) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// True when every byte of `s` is an ASCII digit and `s` is non-empty
fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// True for tokens shaped like `1/1/1` (three digit groups)
fn is_slash_triplet(token: &str) -> bool {
    let parts: Vec<&str> = token.split('/').collect();
    parts.len() == 3 && parts.iter().all(|p| all_digits(p))
}

/// True for tokens shaped like `1/1` or `1/1/c1`-less plain pairs
fn is_slash_pair(token: &str) -> bool {
    let parts: Vec<&str> = token.split('/').collect();
    (2..=3).contains(&parts.len()) && parts.iter().all(|p| all_digits(p))
}

/// True when any line's trimmed form ends with an opening brace
fn has_brace_stanza(lines: &[&str]) -> bool {
    lines.iter().any(|l| l.trim_end().ends_with('{'))
}

fn looks_like_cumulus(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        t.starts_with("auto swp")
            || t.starts_with("iface swp")
            || t.starts_with("net add ")
            || t.contains("bridge-vlan-aware")
    })
}

fn looks_like_mikrotik(lines: &[&str]) -> bool {
    const PATHS: [&str; 8] = [
        "/interface", "/ip ", "/ipv6", "/system", "/routing", "/queue", "/ppp", "/tool",
    ];
    lines.iter().any(|l| {
        let t = l.trim();
        PATHS.iter().any(|p| t.starts_with(p)) || t.contains("[find ") || t.contains("[ find ")
    })
}

fn looks_like_fortinet(lines: &[&str]) -> bool {
    // Walk for a `config ...` table that actually contains table syntax
    // before its `end`; a lone word `config` elsewhere is not enough.
    let mut inside = false;
    for line in lines {
        let t = line.trim();
        if t.starts_with("config ") {
            inside = true;
        } else if inside {
            if t.starts_with("edit ") || t.starts_with("set ") || t == "next" {
                return true;
            }
            if t == "end" {
                inside = false;
            }
        }
    }
    false
}

fn looks_like_paloalto(lines: &[&str]) -> bool {
    let set_marker = lines.iter().any(|l| {
        let t = l.trim();
        t.starts_with("set deviceconfig ")
            || t.starts_with("set mgt-config ")
            || t.starts_with("set vsys ")
    });
    if set_marker {
        return true;
    }
    has_brace_stanza(lines)
        && lines.iter().any(|l| {
            let t = l.trim();
            t.starts_with("deviceconfig")
                || t.starts_with("mgt-config")
                || t.starts_with("vsys")
                || t.starts_with("rulebase")
        })
}

fn looks_like_vyos(lines: &[&str]) -> bool {
    // Set-format exports carry the fingerprint without any braces.
    let set_marker = lines.iter().any(|l| {
        let t = l.trim();
        t.starts_with("set service ")
            || t.starts_with("set nat ")
            || t.starts_with("set firewall name ")
    });
    if set_marker {
        return true;
    }
    if !has_brace_stanza(lines) {
        return false;
    }
    lines.iter().any(|l| {
        let t = l.trim();
        if t.starts_with("firewall name ") {
            return true;
        }
        if !t.ends_with('{') {
            return false;
        }
        let first = t.split_whitespace().next().unwrap_or("");
        first == "service"
            || first == "nat"
            || first == "ethernet"
            || (first.starts_with("eth") && all_digits(&first[3..]))
    })
}

fn looks_like_junos(lines: &[&str]) -> bool {
    if !has_brace_stanza(lines) {
        return false;
    }
    lines.iter().any(|l| {
        let t = l.trim();
        if t.starts_with("family inet") {
            return true;
        }
        t.split_whitespace().any(|tok| {
            (tok.starts_with("ge-") || tok.starts_with("xe-") || tok.starts_with("et-"))
                && tok.as_bytes().get(3).is_some_and(u8::is_ascii_digit)
        })
    })
}

fn looks_like_aruba_wlc(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        t.starts_with("wlan ssid-profile")
            || t.starts_with("wlan virtual-ap")
            || t.starts_with("ap system-profile")
            || t.starts_with("ap-group ")
            || t.starts_with("aaa profile")
            || t.starts_with("user-role ")
            || t.starts_with("rf dot11")
    })
}

fn looks_like_aoscx(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        if t.contains("ArubaOS-CX") {
            return true;
        }
        t.strip_prefix("interface ")
            .is_some_and(|rest| is_slash_triplet(rest.trim()))
    })
}

fn looks_like_procurve(lines: &[&str]) -> bool {
    let header = lines.iter().any(|l| {
        let t = l.trim();
        (t.starts_with(';') && t.contains("Configuration Editor")) || t.contains("ProCurve")
    });
    if header {
        return true;
    }
    let tagging = lines.iter().any(|l| {
        let t = l.trim();
        t.starts_with("tagged ") || t.starts_with("untagged ") || t.starts_with("no untagged ")
    });
    tagging && lines.iter().any(|l| l.trim().starts_with("vlan "))
}

fn looks_like_nxos(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        t.starts_with("feature ") || t.starts_with("vpc domain ") || t.starts_with("vrf context ")
    })
}

fn looks_like_arista(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        t == "mlag configuration"
            || t.starts_with("management api http-commands")
            || t.starts_with("interface Vxlan")
            || t.starts_with("daemon TerminAttr")
    })
}

fn looks_like_exos(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        t.starts_with("create vlan ")
            || t.starts_with("configure vlan ")
            || (t.starts_with("enable sharing") && t.contains("grouping"))
    })
}

fn looks_like_voss(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        t.contains("port-mstprstp") || t.contains("i-sid ") || t.starts_with("vlan create ")
    })
}

fn looks_like_nokia(lines: &[&str]) -> bool {
    // A bare `configure` root with classic indented children.
    let mut saw_configure = false;
    for line in lines {
        let t = line.trim();
        let indented = line.starts_with(' ') || line.starts_with('\t');
        if !indented && t == "configure" {
            saw_configure = true;
            continue;
        }
        if saw_configure {
            if indented {
                if t.starts_with("router")
                    || t.starts_with("system")
                    || t.starts_with("port ")
                    || t.starts_with("card ")
                {
                    return true;
                }
            } else if !t.is_empty() {
                saw_configure = false;
            }
        }
    }

    // Port declarations with SR OS admin-state syntax.
    let port_decl = lines.iter().any(|l| {
        l.trim()
            .strip_prefix("port ")
            .is_some_and(|rest| is_slash_pair(rest.split_whitespace().next().unwrap_or("")))
    });
    port_decl && lines.iter().any(|l| l.contains("admin-state"))
}

fn looks_like_huawei(lines: &[&str]) -> bool {
    lines.iter().any(|l| {
        let t = l.trim();
        if t.starts_with("sysname ") || t.starts_with("undo ") || t.starts_with("ip vpn-instance ")
        {
            return true;
        }
        // Bare `ospf 1` / `bgp 65000` process heads (no `router` keyword).
        let mut tokens = t.split_whitespace();
        match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(head), Some(num), None) => {
                (head == "ospf" || head == "bgp") && all_digits(num)
            }
            _ => false,
        }
    })
}
