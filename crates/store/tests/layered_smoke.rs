use aosm_state::PathResolver;
use aosm_store::{Scope, StoreError, Workspace};
use aosm_test_utils::{agent_doc, skill_doc, TestFixture};
use std::fs;

fn workspace(fixture: &TestFixture) -> Workspace {
    Workspace::new(PathResolver::new(
        fixture.home_path(),
        fixture.project_path(),
    ))
}

#[test]
fn project_skill_shadows_global_skill() {
    let fixture = TestFixture::new().unwrap();
    let global = fixture
        .global_claude_skill("x.md", &skill_doc("x", "global", &["*.md"], "g"))
        .unwrap();
    let project = fixture
        .project_skill("x.md", &skill_doc("x", "project", &["*.rs"], "p"))
        .unwrap();

    let skills = workspace(&fixture).skills().list();
    assert_eq!(skills.len(), 1);
    let x = &skills[0];
    assert_eq!(x.scope, Scope::Project);
    assert_eq!(x.attrs.description, "project");
    assert_eq!(x.resolved_path, project);
    assert_eq!(x.shadowed_global_path.as_ref(), Some(&global));
}

#[test]
fn global_only_entries_carry_no_shadow() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_agent_os_skill("nested/dir/alpha.md", &skill_doc("alpha", "a", &["*"], ""))
        .unwrap();
    fixture
        .project_skill("beta.md", &skill_doc("beta", "b", &["*"], ""))
        .unwrap();

    let skills = workspace(&fixture).skills().list();
    let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "beta"]);
    assert_eq!(skills[0].scope, Scope::Global);
    assert!(skills[0].shadowed_global_path.is_none());
    assert_eq!(skills[1].scope, Scope::Project);
    assert!(skills[1].shadowed_global_path.is_none());
}

#[test]
fn claude_global_skill_replaces_agent_os_global_skill() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_agent_os_skill("s.md", &skill_doc("s", "from agent-os", &["*"], ""))
        .unwrap();
    let claude = fixture
        .global_claude_skill("s.md", &skill_doc("s", "from claude", &["*"], ""))
        .unwrap();

    let skill = workspace(&fixture).skills().read("s").unwrap();
    assert_eq!(skill.attrs.description, "from claude");
    assert_eq!(skill.resolved_path, claude);
    assert_eq!(skill.scope, Scope::Global);
}

#[test]
fn listing_is_sorted_case_sensitively() {
    let fixture = TestFixture::new().unwrap();
    for (file, name) in [("one.md", "beta"), ("two.md", "Alpha"), ("three.md", "alpha")] {
        fixture
            .global_claude_skill(file, &skill_doc(name, "d", &["*"], ""))
            .unwrap();
    }
    let names: Vec<_> = workspace(&fixture)
        .skills()
        .list()
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert_eq!(names, vec!["Alpha", "alpha", "beta"]);
}

#[test]
fn malformed_and_nameless_files_are_skipped() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_claude_skill("broken.md", "---\nname: [unclosed\n---\nbody")
        .unwrap();
    fixture
        .global_claude_skill("nameless.md", "---\ndescription: no name\n---\nbody")
        .unwrap();
    fixture
        .global_claude_skill("ok.md", &skill_doc("ok", "fine", &["*"], "body"))
        .unwrap();

    let skills = workspace(&fixture).skills().list();
    assert_eq!(skills.len(), 1);
    assert_eq!(skills[0].name, "ok");
}

#[test]
fn fresh_write_lands_in_project_scope() {
    let fixture = TestFixture::new().unwrap();
    let ws = workspace(&fixture);
    assert!(ws.skills().read("testing").is_none());

    let path = ws
        .skills()
        .write(
            "testing",
            "---\nname: testing\ndescription: d\nglobs: [\"*.ts\"]\n---\nbody",
        )
        .unwrap();
    assert_eq!(path, fixture.project_claude_root.join("skills/testing.md"));

    let skills = ws.skills().list();
    let testing = skills.iter().find(|s| s.name == "testing").unwrap();
    assert_eq!(testing.scope, Scope::Project);
    assert_eq!(testing.attrs.globs, vec!["*.ts"]);
    assert_eq!(testing.body, "body");
}

#[test]
fn invalid_write_is_rejected_without_touching_disk() {
    let fixture = TestFixture::new().unwrap();
    let ws = workspace(&fixture);

    let err = ws
        .skills()
        .write("bad", "---\nname: bad\n---\nbody")
        .unwrap_err();
    match &err {
        StoreError::InvalidFrontmatter { errors, .. } => {
            assert_eq!(
                errors,
                &vec![
                    "Missing required field: description".to_string(),
                    "Missing required field: globs".to_string(),
                ]
            );
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(!fixture.project_claude_root.join("skills").exists());
}

#[test]
fn write_without_project_fails() {
    let fixture = TestFixture::global_only().unwrap();
    let ws = workspace(&fixture);
    let err = ws
        .skills()
        .write("x", &skill_doc("x", "d", &["*"], ""))
        .unwrap_err();
    assert!(matches!(err, StoreError::NoProjectRoot));
    let err = ws.templates().write("a/b.md", "text").unwrap_err();
    assert!(matches!(err, StoreError::NoProjectRoot));
}

#[test]
fn write_creates_missing_project_claude_dir() {
    let fixture = TestFixture::new().unwrap();
    fs::remove_dir_all(&fixture.project_claude_root).unwrap();
    let ws = workspace(&fixture);

    ws.agents()
        .write("qa", &agent_doc("qa", "QA", Some(&["Read"]), "prompt"))
        .unwrap();
    let agent = ws.agents().read("qa").unwrap();
    assert_eq!(agent.scope, Scope::Project);
    assert_eq!(agent.resolved_path, fixture.project_claude_root.join("agents/qa.md"));
}

#[test]
fn rewrite_updates_existing_project_file_in_place() {
    let fixture = TestFixture::new().unwrap();
    let nested = fixture
        .project_skill("group/lint.md", &skill_doc("lint", "old", &["*"], ""))
        .unwrap();
    let ws = workspace(&fixture);

    let path = ws
        .skills()
        .write("lint", &skill_doc("lint", "new", &["*"], ""))
        .unwrap();
    assert_eq!(path, nested);
    assert_eq!(ws.skills().list().len(), 1);
    assert_eq!(ws.skills().read("lint").unwrap().attrs.description, "new");
}

#[test]
fn path_like_names_are_rejected() {
    let fixture = TestFixture::new().unwrap();
    let err = workspace(&fixture)
        .skills()
        .write("../escape", &skill_doc("escape", "d", &["*"], ""))
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_path");
}

#[test]
fn deleting_global_resource_is_refused() {
    let fixture = TestFixture::new().unwrap();
    let global = fixture
        .global_agent("qa.md", &agent_doc("qa", "QA", None, "prompt"))
        .unwrap();
    let ws = workspace(&fixture);

    let err = ws.agents().delete("qa").unwrap_err();
    assert!(matches!(err, StoreError::CannotDeleteGlobal { .. }));
    assert!(global.exists());

    let err = ws.agents().delete("missing").unwrap_err();
    assert!(matches!(err, StoreError::NotFound { .. }));
}

#[test]
fn override_then_revert_restores_global() {
    let fixture = TestFixture::new().unwrap();
    let content = skill_doc("x", "global x", &["*.md"], "global body");
    let global = fixture.global_claude_skill("x.md", &content).unwrap();
    let ws = workspace(&fixture);
    let before = ws.skills().read("x").unwrap();

    let written = ws.skills().override_global("x").unwrap();
    let overridden = ws.skills().read("x").unwrap();
    assert_eq!(overridden.scope, Scope::Project);
    assert_eq!(overridden.content, content);
    assert_eq!(overridden.shadowed_global_path.as_ref(), Some(&global));

    let err = ws.skills().override_global("x").unwrap_err();
    assert!(matches!(err, StoreError::AlreadyOverridden { .. }));

    let removed = ws.skills().revert("x").unwrap();
    assert_eq!(removed, written);
    assert_eq!(ws.skills().read("x").unwrap(), before);
}

#[test]
fn diff_after_agent_override_matches_global() {
    let fixture = TestFixture::new().unwrap();
    let content = agent_doc("qa", "QA", Some(&["Read", "Grep"]), "You test things.");
    fixture.global_agent("qa.md", &content).unwrap();
    let ws = workspace(&fixture);

    let diff = ws.agents().diff("qa").unwrap().unwrap();
    assert_eq!(diff.global_content.as_deref(), Some(content.as_str()));
    assert_eq!(diff.project_content, None);

    ws.agents().override_global("qa").unwrap();
    let diff = ws.agents().diff("qa").unwrap().unwrap();
    assert_eq!(diff.global_content.as_deref(), Some(content.as_str()));
    assert_eq!(diff.project_content.as_deref(), Some(content.as_str()));

    assert!(ws.agents().diff("nobody").unwrap().is_none());
}

#[test]
fn diff_of_project_only_resource_has_no_global_side() {
    let fixture = TestFixture::new().unwrap();
    let content = skill_doc("local", "d", &["*"], "");
    fixture.project_skill("local.md", &content).unwrap();

    let diff = workspace(&fixture).skills().diff("local").unwrap().unwrap();
    assert_eq!(diff.global_content, None);
    assert_eq!(diff.project_content.as_deref(), Some(content.as_str()));
}

#[test]
fn agents_ignore_nested_directories() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_agent("team/nested.md", &agent_doc("nested", "n", None, ""))
        .unwrap();
    fixture
        .global_agent("top.md", &agent_doc("top", "t", None, ""))
        .unwrap();

    let names: Vec<_> = workspace(&fixture)
        .agents()
        .list()
        .into_iter()
        .map(|a| a.name)
        .collect();
    assert_eq!(names, vec!["top"]);
}

#[test]
fn unknown_header_keys_survive_listing() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_agent(
            "qa.md",
            "---\nname: qa\ndescription: QA\nmodel: opus\ncolor: blue\n---\nprompt",
        )
        .unwrap();

    let agent = workspace(&fixture).agents().read("qa").unwrap();
    assert_eq!(agent.attrs.color.as_deref(), Some("blue"));
    assert_eq!(
        agent.extra.get("model").and_then(|v| v.as_str()),
        Some("opus")
    );

    let json = serde_json::to_value(&agent).unwrap();
    assert_eq!(json["scope"], "global");
    assert_eq!(json["color"], "blue");
    assert_eq!(json["extra"]["model"], "opus");
    assert!(json.get("shadowed_global_path").is_none());
}

#[test]
fn numeric_header_name_is_listed_as_text() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_agent("release.md", "---\nname: 2024\ndescription: Release crew\n---\nprompt")
        .unwrap();
    let ws = workspace(&fixture);

    let agent = ws.agents().read("2024").unwrap();
    assert_eq!(agent.attrs.description, "Release crew");
    assert!(agent.extra.get("name").is_none());

    let err = ws
        .agents()
        .write("2025", "---\nname: 2025\ndescription: Next\n---\nprompt")
        .unwrap_err();
    assert_eq!(err.kind(), "invalid_frontmatter");
}
