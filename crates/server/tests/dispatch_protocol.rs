use aosm_server::Dispatcher;
use aosm_state::PathResolver;
use aosm_store::Workspace;
use aosm_test_utils::{agent_doc, skill_doc, TestFixture};
use serde_json::{json, Value};

fn dispatcher(fixture: &TestFixture) -> Dispatcher {
    Dispatcher::new(Workspace::new(PathResolver::new(
        fixture.home_path(),
        fixture.project_path(),
    )))
}

fn call(d: &Dispatcher, method: &str, params: Value) -> Value {
    let line = json!({"id": 1, "method": method, "params": params}).to_string();
    serde_json::to_value(d.handle_line(&line)).unwrap()
}

#[test]
fn skill_lifecycle_over_the_wire() {
    let fixture = TestFixture::new().unwrap();
    let content = skill_doc("x", "global", &["*.md"], "body");
    fixture.global_claude_skill("x.md", &content).unwrap();
    let d = dispatcher(&fixture);

    let listed = call(&d, "skills.list", Value::Null);
    assert_eq!(listed["result"][0]["scope"], "global");
    assert_eq!(listed["result"][0]["globs"], json!(["*.md"]));

    let overridden = call(&d, "skills.override", json!({"name": "x"}));
    let path = overridden["result"]["path"].as_str().unwrap().to_string();
    assert!(path.ends_with("skills/x.md"));

    let read = call(&d, "skills.read", json!({"name": "x"}));
    assert_eq!(read["result"]["scope"], "project");
    assert!(read["result"]["shadowed_global_path"].is_string());

    let diff = call(&d, "skills.diff", json!({"name": "x"}));
    assert_eq!(diff["result"]["global_content"], content);
    assert_eq!(diff["result"]["project_content"], content);

    let reverted = call(&d, "skills.revert", json!({"name": "x"}));
    assert_eq!(reverted["result"]["path"], path);
    assert_eq!(
        call(&d, "skills.read", json!({"name": "x"}))["result"]["scope"],
        "global"
    );
}

#[test]
fn store_errors_keep_their_kind() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_agent("qa.md", &agent_doc("qa", "QA", None, "prompt"))
        .unwrap();
    let d = dispatcher(&fixture);

    let cases = [
        ("agents.delete", json!({"name": "qa"}), "cannot_delete_global"),
        ("agents.delete", json!({"name": "ghost"}), "not_found"),
        ("agents.revert", json!({"name": "qa"}), "cannot_delete_global"),
        ("agents.override", json!({"name": "ghost"}), "not_found"),
        (
            "templates.write",
            json!({"path": "../escape.md", "content": "x"}),
            "invalid_path",
        ),
        ("config.write", json!({"content": "- not\n- a map\n"}), "invalid_config"),
        ("config.write", json!({}), "invalid_params"),
    ];
    for (method, params, kind) in cases {
        let response = call(&d, method, params);
        assert_eq!(response["error"]["kind"], kind, "{method}");
        assert!(response.get("result").is_none());
    }
}

#[test]
fn config_errors_list_every_problem() {
    let fixture = TestFixture::new().unwrap();
    let response = call(
        &dispatcher(&fixture),
        "config.write",
        json!({"document": {"team_system": {
            "enabled": "yes",
            "quality_gates": {"coverage_minimum": "high"}
        }}}),
    );
    assert_eq!(response["error"]["kind"], "invalid_config");
    assert_eq!(response["error"]["errors"].as_array().unwrap().len(), 2);
}

#[test]
fn project_root_can_be_switched_and_cleared() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .project_skill("local.md", &skill_doc("local", "d", &["*"], ""))
        .unwrap();
    let other = TestFixture::global_only().unwrap();
    let d = Dispatcher::new(Workspace::new(PathResolver::new(
        fixture.home_path(),
        other.project_path(),
    )));

    assert!(call(&d, "system.getPaths", Value::Null)["result"]["project_root"].is_null());
    assert_eq!(call(&d, "skills.list", Value::Null)["result"], json!([]));

    let paths = call(
        &d,
        "system.setProjectRoot",
        json!({"path": fixture.project_path()}),
    );
    assert!(paths["result"]["project_agent_root"].is_string());

    let summary = call(&d, "system.refresh", Value::Null);
    assert_eq!(summary["result"]["skills"], 1);
    assert_eq!(summary["result"]["config_present"], false);

    call(&d, "system.setProjectRoot", json!({"path": null}));
    assert!(call(&d, "system.getPaths", Value::Null)["result"]["project_root"].is_null());
}

#[test]
fn templates_are_addressed_by_path() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_template("team-development/backend/api.md", "# API")
        .unwrap();
    let d = dispatcher(&fixture);

    let listed = call(&d, "templates.list", Value::Null);
    assert_eq!(listed["result"][0]["system"], "team-development");
    assert_eq!(listed["result"][0]["category"], "backend");
    assert_eq!(listed["result"][0]["relative_path"], "team-development/backend/api.md");

    call(
        &d,
        "templates.write",
        json!({"path": "team-development/backend/api.md", "content": "# Local API"}),
    );
    let read = call(
        &d,
        "templates.read",
        json!({"path": "team-development/backend/api.md"}),
    );
    assert_eq!(read["result"]["content"], "# Local API");
    assert_eq!(read["result"]["scope"], "project");
}
