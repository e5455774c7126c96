#![forbid(unsafe_code)]

//! The Bibliotech marketing site: landing page, login, route guard, site
//! configuration and the `bibliotech` command line tool.
//!
//! Pages are plain [`Widget`] trees rendered to static HTML. The
//! `bibliotech-web` bundle hydrates the counters, the header highlight and
//! the gradient headline in the browser.

pub mod cli;
pub mod config;
pub mod error;
pub mod gallery;
pub mod landing;
pub mod login;
pub mod page;
pub mod routes;
pub mod validation;

use bibliotech_widgets::{Markup, Widget};

pub use cli::run_from_env;
pub use config::{GuestLogin, SiteConfig};
pub use error::{Result, SiteError};
pub use landing::LandingPage;
pub use login::LoginPage;
pub use routes::{AuthSession, AuthStatus, PageRegistry, Route, RouteDecision, guard};

use crate::gallery::ComponentGallery;
use crate::page::Document;
use crate::routes::StaticSession;

/// Static files for the public site: `(file name, html)`.
pub fn render_site(config: &SiteConfig, hydrate: bool) -> Vec<(&'static str, String)> {
    let registry = PageRegistry::for_site(config);
    let session = StaticSession::anonymous();
    let mut files = Vec::with_capacity(3);
    for (file, route) in [("index.html", Route::Landing), ("login.html", Route::Login)] {
        let mut body = Markup::new();
        registry.render(guard(route, &session), &mut body);
        let html = Document::new(route.title(), &config.theme)
            .hydrate(hydrate)
            .render(&RawBody(body));
        files.push((file, html));
    }
    let gallery = ComponentGallery::new(&config.theme);
    files.push((
        "components.html",
        Document::new("Componentes | Bibliotech", &config.theme)
            .hydrate(hydrate)
            .render(&gallery),
    ));
    files
}

/// Body markup that was already rendered.
struct RawBody(Markup);

impl Widget for RawBody {
    fn render(&self, out: &mut Markup) {
        out.raw(self.0.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_has_three_documents() {
        let files = render_site(&SiteConfig::default(), true);
        let names: Vec<&str> = files.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["index.html", "login.html", "components.html"]);
        assert!(files[0].1.contains("<title>Bibliotech | Gestão de bibliotecas escolares</title>"));
        assert!(files[1].1.contains("bb-login"));
        assert!(files.iter().all(|(_, html)| html.contains("<script type=\"module\">")));
    }
}
