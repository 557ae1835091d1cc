#![allow(deprecated)]

use anyhow::Context;
use assert_cmd::Command;
use camino::Utf8PathBuf;
use cucumber::{World, given, then, when};
use fs_err as fs;
use paintfix_bdd::{
    card_document, empty_document, entry_count, find_node, heading_document, logo_document,
};
use paintfix_cli::config::CONFIG_FILE_NAME;
use tempfile::TempDir;

const DOCUMENT_FILE: &str = "document.json";

#[derive(Debug, Default, World)]
pub struct PaintfixWorld {
    temp: Option<TempDir>,
    root: Option<Utf8PathBuf>,
    original: Option<String>,
    stdout: String,
    stderr: String,
}

fn root(world: &PaintfixWorld) -> &Utf8PathBuf {
    world.root.as_ref().expect("root set")
}

fn artifacts(world: &PaintfixWorld) -> Utf8PathBuf {
    root(world).join("artifacts").join("paintfix")
}

fn read_json(path: &camino::Utf8Path) -> serde_json::Value {
    let s = fs::read_to_string(path)
        .with_context(|| format!("read {}", path))
        .unwrap();
    serde_json::from_str(&s).unwrap()
}

fn document(world: &PaintfixWorld) -> serde_json::Value {
    read_json(&root(world).join(DOCUMENT_FILE))
}

fn report(world: &PaintfixWorld) -> serde_json::Value {
    read_json(&artifacts(world).join("report.json"))
}

fn node(world: &PaintfixWorld, name: &str) -> serde_json::Value {
    let doc = document(world);
    find_node(&doc["selection"], name)
        .unwrap_or_else(|| panic!("node {name:?} not in document"))
        .clone()
}

fn changed_names(world: &PaintfixWorld) -> Vec<String> {
    report(world)["nodes"]
        .as_array()
        .expect("nodes array")
        .iter()
        .filter(|n| n["status"] == "changed")
        .map(|n| n["name"].as_str().unwrap_or_default().to_string())
        .collect()
}

fn setup(world: &mut PaintfixWorld, doc: serde_json::Value) {
    let td = tempfile::tempdir().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(td.path().to_path_buf()).unwrap();

    let contents = serde_json::to_string_pretty(&doc).unwrap();
    fs::write(root.join(DOCUMENT_FILE), &contents).unwrap();

    world.temp = Some(td);
    world.root = Some(root);
    world.original = Some(contents);
}

/// Run `paintfix run` on the scenario's document and keep its output.
fn run(world: &mut PaintfixWorld, action: &str, extra: &[&str]) -> assert_cmd::assert::Assert {
    let root = root(world).clone();
    let mut cmd = Command::cargo_bin("paintfix").expect("paintfix binary");
    let assert = cmd
        .current_dir(root.as_str())
        .args(["run", "--document", DOCUMENT_FILE, "--action", action])
        .args(extra)
        .assert();

    let output = assert.get_output();
    world.stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    world.stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    assert
}

// ============================================================================
// Documents
// ============================================================================

#[given("a card document with a styled frame and a variable-bound icon")]
async fn card(world: &mut PaintfixWorld) {
    setup(world, card_document());
}

#[given("a logo document with a frame around a background and a copy of the logo")]
async fn logo(world: &mut PaintfixWorld) {
    setup(world, logo_document());
}

#[given("a heading whose first word is styled and whose second word is variable-bound")]
async fn heading(world: &mut PaintfixWorld) {
    setup(world, heading_document());
}

#[given("an empty document")]
async fn empty(world: &mut PaintfixWorld) {
    setup(world, empty_document());
}

#[given("a config file selecting nested layers only")]
async fn nested_config(world: &mut PaintfixWorld) {
    let root = root(world).clone();
    fs::write(
        root.join(CONFIG_FILE_NAME),
        "[selection]\nscope = \"nested-only\"\n",
    )
    .unwrap();
}

// ============================================================================
// Running actions
// ============================================================================

#[when(regex = r"^I run paintfix (\S+) with --apply$")]
async fn run_apply(world: &mut PaintfixWorld, action: String) {
    run(world, &action, &["--apply"]).success();
}

#[when(regex = r"^I run paintfix (\S+)$")]
async fn run_dry(world: &mut PaintfixWorld, action: String) {
    run(world, &action, &[]).success();
}

#[when(regex = r#"^I run paintfix (\S+) excluding "([^"]*)"$"#)]
async fn run_excluding(world: &mut PaintfixWorld, action: String, prefix: String) {
    run(world, &action, &["--exclude", prefix.as_str()]).success();
}

#[when(regex = r#"^I run paintfix (\S+) excluding "([^"]*)" and preserving children$"#)]
async fn run_excluding_preserving(world: &mut PaintfixWorld, action: String, prefix: String) {
    run(world, &action, &["--exclude", prefix.as_str(), "--preserve-children"]).success();
}

#[when(regex = r"^I run paintfix (\S+) on nested layers only$")]
async fn run_nested(world: &mut PaintfixWorld, action: String) {
    run(world, &action, &["--scope", "nested-only", "--apply"]).success();
}

#[when(regex = r"^I run paintfix (\S+) expecting a validation error$")]
async fn run_invalid(world: &mut PaintfixWorld, action: String) {
    run(world, &action, &["--apply"]).code(2);
}

// ============================================================================
// Outcomes
// ============================================================================

#[then(regex = r#"^the command prints "([^"]*)"$"#)]
async fn assert_message(world: &mut PaintfixWorld, message: String) {
    assert_eq!(world.stdout.trim_end(), message);
}

#[then(regex = r#"^the error mentions "([^"]*)"$"#)]
async fn assert_error(world: &mut PaintfixWorld, text: String) {
    assert!(
        world.stderr.contains(&text),
        "expected {text:?} in stderr:\n{}",
        world.stderr
    );
}

#[then("the document is unchanged")]
async fn assert_document_unchanged(world: &mut PaintfixWorld) {
    let contents = fs::read_to_string(root(world).join(DOCUMENT_FILE)).unwrap();
    assert_eq!(Some(contents), world.original);
}

#[then("the patch is empty")]
async fn assert_patch_empty(world: &mut PaintfixWorld) {
    let patch = fs::read_to_string(artifacts(world).join("patch.diff")).unwrap();
    assert!(patch.is_empty(), "expected empty patch, got:\n{patch}");
}

#[then("the patch is not empty")]
async fn assert_patch_not_empty(world: &mut PaintfixWorld) {
    let patch = fs::read_to_string(artifacts(world).join("patch.diff")).unwrap();
    assert!(patch.starts_with("--- a/document.json"));
}

#[then(regex = r"^the report counts (\d+) changed nodes$")]
async fn assert_changed_count(world: &mut PaintfixWorld, expected: u64) {
    assert_eq!(report(world)["summary"]["changed"], expected);
}

#[then(regex = r#"^only "([^"]*)" was changed$"#)]
async fn assert_only_changed(world: &mut PaintfixWorld, name: String) {
    assert_eq!(changed_names(world), vec![name]);
}

#[then("no node was changed")]
async fn assert_none_changed(world: &mut PaintfixWorld) {
    assert!(changed_names(world).is_empty());
    assert_eq!(report(world)["summary"]["eligible"], 0);
}

#[then(regex = r#"^node "([^"]*)" has no fill style$"#)]
async fn assert_no_fill_style(world: &mut PaintfixWorld, name: String) {
    let node = node(world, &name);
    assert!(
        node.get("fillStyleId").is_none(),
        "expected no fill style on {name}: {node}"
    );
}

#[then(regex = r#"^node "([^"]*)" has (\d+) (fills|strokes|effects)$"#)]
async fn assert_entry_count(
    world: &mut PaintfixWorld,
    name: String,
    expected: usize,
    field: String,
) {
    let node = node(world, &name);
    assert_eq!(
        entry_count(&node[field.as_str()]),
        expected,
        "{field} of {name}: {node}"
    );
}

#[then(regex = r#"^node "([^"]*)" has no variable bindings$"#)]
async fn assert_no_bindings(world: &mut PaintfixWorld, name: String) {
    let node = node(world, &name);
    for field in ["fills", "strokes", "effects"] {
        for entry in node[field].as_array().into_iter().flatten() {
            assert!(
                entry.get("boundVariables").is_none(),
                "{field} of {name} still bound: {entry}"
            );
        }
    }
}

#[then(regex = r#"^text range (\d+) of "([^"]*)" has fill style "([^"]*)" and (\d+) fills$"#)]
async fn assert_range_styled(
    world: &mut PaintfixWorld,
    index: usize,
    name: String,
    style: String,
    fills: usize,
) {
    let node = node(world, &name);
    let range = &node["textRanges"][index];
    assert_eq!(range["fillStyleId"], style.as_str(), "range {index}: {range}");
    assert_eq!(entry_count(&range["fills"]), fills, "range {index}: {range}");
}

#[then(regex = r#"^text range (\d+) of "([^"]*)" has no fill style and (\d+) fills$"#)]
async fn assert_range_unstyled(
    world: &mut PaintfixWorld,
    index: usize,
    name: String,
    fills: usize,
) {
    let node = node(world, &name);
    let range = &node["textRanges"][index];
    assert!(range.get("fillStyleId").is_none(), "range {index}: {range}");
    assert_eq!(entry_count(&range["fills"]), fills, "range {index}: {range}");
}

#[tokio::main]
async fn main() {
    let features_path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("features");
    PaintfixWorld::cucumber().run(features_path).await;
}
