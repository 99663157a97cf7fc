//! Extension Host Asset Tests
//!
//! Checks the checked-in manifest against the files it points at.

use std::path::PathBuf;

use serde_json::Value;

fn extension_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../extension")
}

fn manifest() -> Value {
    let raw = std::fs::read_to_string(extension_dir().join("manifest.json"))
        .expect("Failed to read manifest.json");
    serde_json::from_str(&raw).expect("Invalid manifest JSON")
}

#[test]
fn test_side_panel_page_exists_and_loads_external_module() {
    let manifest = manifest();
    let path = manifest["side_panel"]["default_path"]
        .as_str()
        .expect("side_panel.default_path missing");
    let page = std::fs::read_to_string(extension_dir().join(path))
        .expect("side panel page missing");

    assert!(page.contains(r#"<div id="main">"#));
    assert!(page.contains(r#"<script type="module" src="panel.js"></script>"#));
    // Inline scripts are blocked by the extension CSP.
    assert_eq!(page.matches("<script").count(), 1);

    let loader = std::fs::read_to_string(extension_dir().join("panel/panel.js"))
        .expect("panel loader missing");
    assert!(loader.contains(r#"from "./pkg/lexly-panel.js""#));
    assert!(!loader.contains("import(\"/"));
}

#[test]
fn test_worker_and_content_loaders_exist() {
    let manifest = manifest();
    let worker = manifest["background"]["service_worker"].as_str().unwrap();
    assert_eq!(manifest["background"]["type"], "module");
    assert!(extension_dir().join(worker).is_file());

    let scripts = manifest["content_scripts"][0]["js"].as_array().unwrap();
    for script in scripts {
        assert!(extension_dir().join(script.as_str().unwrap()).is_file());
    }
}
