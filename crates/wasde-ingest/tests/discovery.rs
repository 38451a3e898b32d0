use std::fs;

use wasde_ingest::discover_report_files;

#[test]
fn discovers_dated_spreadsheets_in_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    for name in [
        "2024-06-12_wasde0624.xls",
        "2024-05-10_wasde0524.xls",
        "notes.txt",
        "wasde_undated.xls",
        "2024-07-12_wasde0724.xlsx",
    ] {
        fs::write(dir.path().join(name), b"stub").expect("write file");
    }

    let files = discover_report_files(dir.path()).expect("discover");
    let names: Vec<String> = files
        .iter()
        .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "2024-05-10_wasde0524.xls",
            "2024-06-12_wasde0624.xls",
            "2024-07-12_wasde0724.xlsx",
        ]
    );
}

#[test]
fn empty_folder_yields_no_files() {
    let dir = tempfile::tempdir().expect("tempdir");
    let files = discover_report_files(dir.path()).expect("discover");
    assert!(files.is_empty());
}
