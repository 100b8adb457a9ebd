//! End-to-end: snapshot file in, exposition text out.

use std::io::Write;
use std::path::Path;

use pmi_classify::{SchemaRegistry, classify_frame};
use pmi_ingest::read_snapshot_file;
use pmi_output::render;

const HL_SNAPSHOT: &str = "\
Node Name,Model Name,Location,Contact,IP Address,Serial No.,Main Firmware Version,\
Memory Size,Page Counter,Average Coverage,% of Life Remaining(Toner),\
% of Life Remaining(Drum Unit),Replace Count(Toner),Replace Count(Drum Unit),\
Total Paper Jams,Jam Tray 1,Jam Inside,Jam Rear,Jam 2-sided,\
A4/Letter,Legal/Folio,B5/Executive,Envelopes,A5,Others,Error 1,Error 2
BRN0080927AFBB5,Brother HL-L2350DW series,,,192.168.1.21,E78098H9N222411,1.26,\
64,10245,2.5,46,85,1,0,5,2,1,2,0,10110,25,0,30,40,40,Machine Error 76,Machine Error 71
";

fn write_snapshot(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("mnt_info.csv");
    let mut file = std::fs::File::create(&path).expect("create snapshot");
    file.write_all(contents.as_bytes()).expect("write snapshot");
    path
}

fn check(path: &Path, registry: &SchemaRegistry) -> String {
    let frame = read_snapshot_file(path).expect("read snapshot");
    let observations = classify_frame(&frame, registry).expect("classify");
    render(&observations)
}

#[test]
fn renders_the_builtin_hl_l2350dw_snapshot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_snapshot(dir.path(), HL_SNAPSHOT);
    let registry = SchemaRegistry::builtin().expect("builtin catalog");

    let exposition = check(&path, &registry);

    assert!(exposition.contains(
        "printer_part_remaining_life_ratio{part=\"Toner\"} 0.46\n"
    ));
    assert!(exposition.contains(
        "printer_pages_printed_by_paper_size_total{paper_size=\"A4/Letter\"} 10110\n"
    ));
    assert!(exposition.contains("printer_page_total 10245\n"));
    assert!(exposition.contains("printer_paper_jam_location_total{location=\"Tray 1\"} 2\n"));
    let info_line = exposition
        .lines()
        .find(|line| line.starts_with("printer_info"))
        .expect("info line");
    assert!(info_line.contains("model_name=\"Brother HL-L2350DW series\""));
    assert!(info_line.contains("serial_no=\"E78098H9N222411\""));
    // Empty Location/Contact values never become labels.
    assert!(!info_line.contains("location="));
    assert!(!info_line.contains("contact="));
    assert!(info_line.ends_with(" 1"));

    // 1 info + 14 grouped matches + 4 plain rules.
    assert_eq!(exposition.lines().count(), 19);
}

#[test]
fn custom_schema_file_extends_the_catalog() {
    let dir = tempfile::tempdir().expect("temp dir");
    let schema_path = dir.path().join("acme.json");
    std::fs::write(
        &schema_path,
        r#"[
            {
                "model": "Acme LaserJot 9000",
                "info_columns": ["Model Name"],
                "plain_rules": [
                    {"column": "Page Counter", "metric": "printer_page_total"}
                ]
            }
        ]"#,
    )
    .expect("write schema file");
    let snapshot_path = write_snapshot(
        dir.path(),
        "Model Name,Page Counter\nAcme LaserJot 9000,10245\n",
    );

    let mut registry = SchemaRegistry::builtin().expect("builtin catalog");
    registry.load_schema_file(&schema_path).expect("load schema file");

    let exposition = check(&snapshot_path, &registry);
    assert_eq!(
        exposition,
        "printer_info{model_name=\"Acme LaserJot 9000\"} 1\nprinter_page_total 10245\n"
    );
}

#[test]
fn exposition_is_stable_across_runs() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = write_snapshot(dir.path(), HL_SNAPSHOT);
    let registry = SchemaRegistry::builtin().expect("builtin catalog");

    assert_eq!(check(&path, &registry), check(&path, &registry));
}
