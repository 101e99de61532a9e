use aosm_discovery::{discover, Depth, LayerRoot, Scope};
use aosm_test_utils::{skill_doc, TestFixture};

#[test]
fn global_tiers_precede_project_tier() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_agent_os_skill("shared/testing.md", &skill_doc("testing", "d", &["*"], "a"))
        .unwrap();
    fixture
        .global_claude_skill("testing.md", &skill_doc("testing", "d", &["*"], "b"))
        .unwrap();
    let project = fixture
        .project_skill("testing.md", &skill_doc("testing", "d", &["*"], "c"))
        .unwrap();

    let layers = vec![
        LayerRoot::global(fixture.global_agent_root.join("skills")),
        LayerRoot::global(fixture.global_claude_root.join("skills")),
        LayerRoot::project(fixture.project_claude_root.join("skills")),
    ];
    let found = discover(&layers, Depth::Recursive);

    let scopes: Vec<_> = found.iter().map(|c| c.scope).collect();
    assert_eq!(scopes, vec![Scope::Global, Scope::Global, Scope::Project]);
    assert_eq!(found[0].relative, "shared/testing.md");
    assert_eq!(found[2].path, project);
}

#[test]
fn template_candidates_keep_relative_paths() {
    let fixture = TestFixture::new().unwrap();
    fixture
        .global_template("team-development/backend/api.md", "# API")
        .unwrap();
    fixture.global_template("README.md", "# Templates").unwrap();

    let found = discover(
        &[LayerRoot::global(fixture.global_agent_root.join("templates"))],
        Depth::Recursive,
    );
    let rel: Vec<_> = found.iter().map(|c| c.relative.as_str()).collect();
    assert_eq!(rel, vec!["README.md", "team-development/backend/api.md"]);
    assert_eq!(found[1].stem(), "api");
}
