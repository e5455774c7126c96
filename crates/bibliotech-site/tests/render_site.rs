//! End-to-end: the `render` command writes a complete static site.

use bibliotech_site::cli::{Cli, Commands, RenderArgs, run_with};
use bibliotech_site::config::{ENV_GUEST_EMAIL, ENV_GUEST_LOGIN, ENV_GUEST_PASSWORD};
use tempfile::tempdir;

fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    }
}

#[test]
fn render_writes_three_pages() {
    let dir = tempdir().expect("tempdir");
    let out_dir = dir.path().join("site");
    let mut stdout = Vec::new();
    let lookup = env(&[]);
    run_with(
        Cli {
            verbose: false,
            command: Commands::Render(RenderArgs {
                out: out_dir.clone(),
                config: None,
                no_hydrate: false,
            }),
        },
        &mut stdout,
        &lookup,
    )
    .expect("render");

    for file in ["index.html", "login.html", "components.html"] {
        let html = std::fs::read_to_string(out_dir.join(file)).expect(file);
        assert!(html.starts_with("<!doctype html>"), "{file}");
        assert!(html.contains("bibliotech_web.js"), "{file}");
    }
    assert_eq!(String::from_utf8_lossy(&stdout).lines().count(), 3);

    let index = std::fs::read_to_string(out_dir.join("index.html")).expect("index");
    for id in ["inicio", "produto", "planos", "contato"] {
        assert!(index.contains(&format!("<section id=\"{id}\"")), "{id}");
    }
    assert!(index.contains("data-section-tracker"));
    assert_eq!(index.matches("data-counter-target").count(), 4);

    let login = std::fs::read_to_string(out_dir.join("login.html")).expect("login");
    assert!(!login.contains("Entrar como visitante"));
}

#[test]
fn guest_login_from_environment_and_toml() {
    let dir = tempdir().expect("tempdir");
    let config = dir.path().join("site.toml");
    std::fs::write(
        &config,
        r#"
[contact]
whatsapp_number = "+55 (21) 98888-7777"

[counters]
duration_ms = 1200
stagger_ms = 100
easing = "linear"
"#,
    )
    .expect("write config");
    let lookup = env(&[
        (ENV_GUEST_LOGIN, "true"),
        (ENV_GUEST_EMAIL, "visitante@bibliotech.app"),
        (ENV_GUEST_PASSWORD, "demo1234"),
    ]);
    let mut stdout = Vec::new();
    run_with(
        Cli {
            verbose: false,
            command: Commands::Render(RenderArgs {
                out: dir.path().to_path_buf(),
                config: Some(config),
                no_hydrate: true,
            }),
        },
        &mut stdout,
        &lookup,
    )
    .expect("render");

    let login = std::fs::read_to_string(dir.path().join("login.html")).expect("login");
    assert!(login.contains("Entrar como visitante"));
    assert!(!login.contains("<script"));

    let index = std::fs::read_to_string(dir.path().join("index.html")).expect("index");
    assert!(index.contains("data-whatsapp-number=\"5521988887777\""));
    assert!(index.contains("data-counter-duration-ms=\"1200\""));
    assert!(index.contains("data-counter-delay-ms=\"300\""));
    assert!(index.contains("data-counter-easing=\"linear\""));
}

#[test]
fn invalid_environment_aborts_render() {
    let dir = tempdir().expect("tempdir");
    let lookup = env(&[(ENV_GUEST_LOGIN, "talvez")]);
    let mut stdout = Vec::new();
    let error = run_with(
        Cli {
            verbose: false,
            command: Commands::Render(RenderArgs {
                out: dir.path().join("site"),
                config: None,
                no_hydrate: false,
            }),
        },
        &mut stdout,
        &lookup,
    )
    .expect_err("bad env");
    assert_eq!(error.exit_code(), 2);
    assert!(!dir.path().join("site").exists());
}
