#![forbid(unsafe_code)]

//! Route table, authentication guard and the lazy page registry.
//!
//! # Invariants
//!
//! - Every [`Route`], `NotFound` included, round-trips through
//!   [`Route::path`] / [`Route::from_path`].
//! - [`guard`] never renders a protected route for an anonymous session.
//! - A registered page is constructed at most once, on first resolution.
//!
//! # Failure Modes
//!
//! - Unknown paths resolve to [`Route::NotFound`]; they are not errors here.
//!   [`Route::resolve`] tells them apart from an explicit `/404`, and the CLI
//!   turns them into [`crate::error::SiteError::UnknownRoute`].

use std::cell::{Cell, OnceCell};
use std::collections::BTreeMap;
use std::fmt;

use bibliotech_widgets::{Attrs, Markup, Skeleton, SkeletonShape, Widget};

use crate::config::SiteConfig;
use crate::landing::LandingPage;
use crate::login::LoginPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Route {
    Landing,
    Login,
    Dashboard,
    Students,
    Staff,
    Books,
    Loans,
    Returns,
    Withdrawals,
    Subscription,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 11] = [
        Route::Landing,
        Route::Login,
        Route::Dashboard,
        Route::Students,
        Route::Staff,
        Route::Books,
        Route::Loans,
        Route::Returns,
        Route::Withdrawals,
        Route::Subscription,
        Route::NotFound,
    ];

    pub const fn path(self) -> &'static str {
        match self {
            Self::Landing => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Students => "/alunos",
            Self::Staff => "/funcionarios",
            Self::Books => "/livros",
            Self::Loans => "/emprestimos",
            Self::Returns => "/devolucoes",
            Self::Withdrawals => "/retiradas",
            Self::Subscription => "/assinatura",
            Self::NotFound => "/404",
        }
    }

    /// Resolve a location. Query string, fragment and trailing slashes are
    /// ignored; unknown paths map to `NotFound`.
    pub fn from_path(path: &str) -> Self {
        Self::resolve(path).unwrap_or(Self::NotFound)
    }

    /// Like [`Route::from_path`], but `None` for paths outside the table.
    /// `/404` resolves to `Some(NotFound)`.
    pub fn resolve(path: &str) -> Option<Self> {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        Self::ALL.into_iter().find(|route| route.path() == path)
    }

    pub const fn requires_auth(self) -> bool {
        !matches!(self, Self::Landing | Self::Login | Self::NotFound)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Landing => "Bibliotech | Gestão de bibliotecas escolares",
            Self::Login => "Entrar | Bibliotech",
            Self::Dashboard => "Painel | Bibliotech",
            Self::Students => "Alunos | Bibliotech",
            Self::Staff => "Funcionários | Bibliotech",
            Self::Books => "Livros | Bibliotech",
            Self::Loans => "Empréstimos | Bibliotech",
            Self::Returns => "Devoluções | Bibliotech",
            Self::Withdrawals => "Retiradas | Bibliotech",
            Self::Subscription => "Assinatura | Bibliotech",
            Self::NotFound => "Página não encontrada | Bibliotech",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// ---------------------------------------------------------------------------
// Session + guard
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthStatus {
    /// The session is still being restored.
    Loading,
    Anonymous,
    Authenticated { user: String },
}

/// Source of the current authentication state.
pub trait AuthSession {
    fn status(&self) -> AuthStatus;
}

/// Fixed session, for static rendering and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSession(pub AuthStatus);

impl StaticSession {
    pub fn anonymous() -> Self {
        Self(AuthStatus::Anonymous)
    }

    pub fn authenticated(user: impl Into<String>) -> Self {
        Self(AuthStatus::Authenticated { user: user.into() })
    }
}

impl AuthSession for StaticSession {
    fn status(&self) -> AuthStatus {
        self.0.clone()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    Redirect { to: Route, from: Route },
    /// Session still loading; show a placeholder.
    Pending,
}

impl RouteDecision {
    /// Location to navigate to, with `?from=` for login redirects.
    pub fn redirect_url(&self) -> Option<String> {
        match self {
            Self::Redirect { to, from } if *to == Route::Login => Some(format!(
                "{}?from={}",
                to.path(),
                urlencoding::encode(from.path())
            )),
            Self::Redirect { to, .. } => Some(to.path().to_string()),
            Self::Render(_) | Self::Pending => None,
        }
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(route) => write!(f, "render {route}"),
            Self::Redirect { to, from } => write!(f, "redirect {from} -> {to}"),
            Self::Pending => f.write_str("pending"),
        }
    }
}

/// Decide what to show for `route` given the session.
pub fn guard(route: Route, session: &(impl AuthSession + ?Sized)) -> RouteDecision {
    let status = session.status();
    let decision = match (&status, route) {
        (AuthStatus::Authenticated { .. }, Route::Login) => RouteDecision::Redirect {
            to: Route::Dashboard,
            from: Route::Login,
        },
        (AuthStatus::Loading, route) if route.requires_auth() => RouteDecision::Pending,
        (AuthStatus::Anonymous, route) if route.requires_auth() => RouteDecision::Redirect {
            to: Route::Login,
            from: route,
        },
        (_, route) => RouteDecision::Render(route),
    };
    tracing::debug!(route = route.path(), %decision, "route guarded");
    decision
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// A rendered route body.
pub type Page = Box<dyn Widget>;

type PageFactory = Box<dyn Fn() -> Page>;

struct Entry {
    factory: PageFactory,
    page: OnceCell<Page>,
}

/// Lazily constructed pages keyed by route.
pub struct PageRegistry {
    entries: BTreeMap<Route, Entry>,
    constructed: Cell<usize>,
}

impl fmt::Debug for PageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageRegistry")
            .field("routes", &self.entries.keys().collect::<Vec<_>>())
            .field("constructed", &self.constructed.get())
            .finish()
    }
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRegistry {
    /// Registry with only the NotFound page.
    pub fn new() -> Self {
        let mut registry = Self {
            entries: BTreeMap::new(),
            constructed: Cell::new(0),
        };
        registry.register(Route::NotFound, || Box::new(NotFoundPage));
        registry
    }

    /// Public pages for `config`; protected pages are left to the host.
    pub fn for_site(config: &SiteConfig) -> Self {
        let mut registry = Self::new();
        let landing = config.clone();
        registry.register(Route::Landing, move || Box::new(LandingPage::new(&landing)));
        let guest = config.guest_login.clone();
        registry.register(Route::Login, move || Box::new(LoginPage::new(&guest)));
        registry
    }

    /// Register (or replace) the factory for `route`.
    pub fn register(&mut self, route: Route, factory: impl Fn() -> Page + 'static) {
        self.entries.insert(
            route,
            Entry {
                factory: Box::new(factory),
                page: OnceCell::new(),
            },
        );
    }

    pub fn is_registered(&self, route: Route) -> bool {
        self.entries.contains_key(&route)
    }

    /// Pages built so far.
    pub fn constructed(&self) -> usize {
        self.constructed.get()
    }

    /// The page for `route`, building it on first use. Unregistered routes
    /// fall back to NotFound.
    pub fn page(&self, route: Route) -> Option<&dyn Widget> {
        let (route, entry) = match self.entries.get(&route) {
            Some(entry) => (route, entry),
            None => (Route::NotFound, self.entries.get(&Route::NotFound)?),
        };
        let page = entry.page.get_or_init(|| {
            self.constructed.set(self.constructed.get() + 1);
            tracing::debug!(route = route.path(), "page constructed");
            (entry.factory)()
        });
        Some(&**page)
    }

    /// Render the outcome of `guard` into `out`.
    ///
    /// Redirects render nothing; the caller navigates to
    /// [`RouteDecision::redirect_url`].
    pub fn render(&self, decision: RouteDecision, out: &mut Markup) {
        match decision {
            RouteDecision::Render(route) => {
                if let Some(page) = self.page(route) {
                    page.render(out);
                }
            }
            RouteDecision::Pending => PendingLayout.render(out),
            RouteDecision::Redirect { .. } => {}
        }
    }
}

/// Skeleton shown while the session loads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PendingLayout;

impl Widget for PendingLayout {
    fn render(&self, out: &mut Markup) {
        out.open(
            "div",
            &Attrs::new()
                .class("bb-pending")
                .attr("aria-busy", "true")
                .attr("aria-label", "Carregando"),
        );
        out.child(&Skeleton::new(SkeletonShape::Block).height(48));
        out.open("div", &Attrs::new().class("bb-pending__body"));
        out.child(&Skeleton::new(SkeletonShape::Circle).width(64).height(64));
        out.child(&Skeleton::lines(3));
        out.close("div");
        out.close("div");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotFoundPage;

impl Widget for NotFoundPage {
    fn render(&self, out: &mut Markup) {
        out.open("main", &Attrs::new().class("bb-not-found"));
        out.element("h1", &Attrs::new(), "Página não encontrada");
        out.element(
            "a",
            &Attrs::new().attr("href", Route::Landing.path()),
            "Voltar para o início",
        );
        out.close("main");
    }
}
