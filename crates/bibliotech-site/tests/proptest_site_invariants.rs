//! Property-based invariant tests for routing and the contact hand-off.
//!
//! 1. Anonymous sessions never render a protected route
//! 2. Route resolution ignores query strings, fragments and trailing slashes
//! 3. WhatsApp links never contain raw whitespace and keep the number's digits
//! 4. `format_brl` keeps every digit of the amount

use bibliotech_site::landing::{ContactForm, format_brl};
use bibliotech_site::routes::{AuthStatus, Route, RouteDecision, StaticSession, guard};
use proptest::prelude::*;

fn route_strategy() -> impl Strategy<Value = Route> {
    proptest::sample::select(Route::ALL.to_vec())
}

proptest! {
    #[test]
    fn anonymous_never_renders_protected(route in route_strategy()) {
        let decision = guard(route, &StaticSession::anonymous());
        if route.requires_auth() {
            prop_assert_eq!(decision, RouteDecision::Redirect { to: Route::Login, from: route });
        } else {
            prop_assert_eq!(decision, RouteDecision::Render(route));
        }
    }

    #[test]
    fn loading_never_redirects(route in route_strategy()) {
        let decision = guard(route, &StaticSession(AuthStatus::Loading));
        let is_redirect = matches!(decision, RouteDecision::Redirect { .. });
        prop_assert!(!is_redirect);
    }

    #[test]
    fn path_decoration_is_ignored(
        route in route_strategy(),
        slashes in 0usize..3,
        query in proptest::option::of("[a-z]{1,5}=[0-9]{1,3}"),
        fragment in proptest::option::of("[a-z]{1,6}"),
    ) {
        prop_assume!(route != Route::NotFound);
        let mut path = route.path().to_string();
        path.push_str(&"/".repeat(slashes));
        if let Some(q) = query {
            path.push('?');
            path.push_str(&q);
        }
        if let Some(f) = fragment {
            path.push('#');
            path.push_str(&f);
        }
        prop_assert_eq!(Route::from_path(&path), route);
    }

    #[test]
    fn whatsapp_url_is_encoded(
        name in "[A-Za-zçã ]{1,20}",
        message in "[A-Za-z0-9 &?#\n]{1,80}",
        number in "\\+55 \\([0-9]{2}\\) 9[0-9]{4}-[0-9]{4}",
    ) {
        let form = ContactForm {
            name,
            email: "ana@escola.br".into(),
            school: "Escola".into(),
            phone: None,
            message,
        };
        let url = form.whatsapp_url(&number);
        let digits: String = number.chars().filter(char::is_ascii_digit).collect();
        let prefix = format!("https://wa.me/{digits}?text=");
        prop_assert!(url.starts_with(&prefix));
        let query = &url[prefix.len()..];
        prop_assert!(!query.contains(' '));
        prop_assert!(!query.contains('\n'));
        prop_assert!(!query.contains('#'));
        prop_assert!(!query.contains('&'));
    }

    #[test]
    fn brl_keeps_digits(cents in 0u64..10_000_000_000) {
        let text = format_brl(cents);
        prop_assert!(text.starts_with("R$ "));
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        let cents_str = cents.to_string();
        prop_assert_eq!(digits.trim_start_matches('0'), cents_str.trim_start_matches('0'));
        let cents_part = text.rsplit(',').next().unwrap_or_default();
        prop_assert_eq!(cents_part.len(), 2);
    }
}
