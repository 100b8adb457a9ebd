//! Compiled-in schema catalog.
//!
//! One spec per supported printer model. Specs are plain data; the registry
//! compiles and validates them at startup, so a catalog mistake (a bad
//! pattern, colliding info labels) fails the process before the first probe.

use std::collections::BTreeMap;

use pmi_model::{GroupRuleSpec, PlainRuleSpec, SchemaSpec, ValueTransform, Window};

/// All built-in model specs.
pub fn specs() -> Vec<SchemaSpec> {
    vec![hl_l2350dw(), mfc_l2710dw()]
}

/// Info columns shared by the Brother maintenance pages.
fn brother_info_columns() -> Vec<String> {
    [
        "Node Name",
        "Model Name",
        "Location",
        "Contact",
        "IP Address",
        "Serial No.",
        "Main Firmware Version",
    ]
    .map(str::to_string)
    .to_vec()
}

/// Grouped rules shared by the Brother mono lasers.
fn brother_group_rules() -> Vec<GroupRuleSpec> {
    vec![
        group_rule(
            "printer_part_remaining_life_ratio",
            r"^% of Life Remaining\((.+)\)$",
            "part",
            ValueTransform::PercentToRatio,
        ),
        group_rule(
            "printer_pages_printed_by_paper_size_total",
            "^(A4/Letter|Legal/Folio|B5/Executive|Envelopes|A5|Others)$",
            "paper_size",
            ValueTransform::Decimal,
        ),
        group_rule(
            "printer_part_replace_total",
            r"^Replace Count\((.+)\)$",
            "part",
            ValueTransform::Decimal,
        ),
        group_rule(
            "printer_paper_jam_location_total",
            "^Jam (.+)$",
            "location",
            ValueTransform::Decimal,
        ),
    ]
}

fn brother_plain_rules() -> Vec<PlainRuleSpec> {
    vec![
        plain_rule("Memory Size", "printer_memory_size_megabytes"),
        plain_rule("Page Counter", "printer_page_total"),
        PlainRuleSpec {
            transform: ValueTransform::PercentToRatio,
            ..plain_rule("Average Coverage", "printer_page_coverage_ratio")
        },
        plain_rule("Total Paper Jams", "printer_paper_jam_total"),
    ]
}

/// The error-history columns carry free-text descriptions, not counters;
/// they stay out of the observation set without failing completeness.
fn error_history_names() -> Vec<String> {
    (1..=10).map(|n| format!("Error {n}")).collect()
}

fn hl_l2350dw() -> SchemaSpec {
    SchemaSpec {
        model: "Brother HL-L2350DW series".to_string(),
        info_columns: brother_info_columns(),
        group_rules: brother_group_rules(),
        plain_rules: brother_plain_rules(),
        ignore_names: error_history_names(),
    }
}

/// The MFC maintenance page reports "Total" twice: pages printed across
/// paper sizes, then total scanned sheets near the end. The windows keep the
/// two apart.
fn mfc_l2710dw() -> SchemaSpec {
    let mut plain_rules = brother_plain_rules();
    plain_rules.extend([
        PlainRuleSpec {
            window: Window::up_to(25),
            ..plain_rule("Total", "printer_pages_printed_total")
        },
        plain_rule("Copy Page Counter", "printer_copy_page_total"),
        plain_rule("Fax Page Counter", "printer_fax_page_total"),
        plain_rule("Scan Page Counter", "printer_scan_page_total"),
        PlainRuleSpec {
            window: Window::starting_at(26),
            ..plain_rule("Total", "printer_scan_sheet_total")
        },
    ]);
    SchemaSpec {
        model: "Brother MFC-L2710DW series".to_string(),
        info_columns: brother_info_columns(),
        group_rules: brother_group_rules(),
        plain_rules,
        ignore_names: error_history_names(),
    }
}

fn group_rule(
    metric: &str,
    pattern: &str,
    label: &str,
    transform: ValueTransform,
) -> GroupRuleSpec {
    GroupRuleSpec {
        metric: metric.to_string(),
        pattern: pattern.to_string(),
        label: label.to_string(),
        transform,
        window: Window::default(),
    }
}

fn plain_rule(column: &str, metric: &str) -> PlainRuleSpec {
    PlainRuleSpec {
        column: column.to_string(),
        metric: metric.to_string(),
        labels: BTreeMap::new(),
        transform: ValueTransform::Decimal,
        window: Window::default(),
    }
}
