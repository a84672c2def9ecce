use leptos::*;
use leptos_router::*;

use crate::{
    components::guard::RequireAuth,
    pages::{
        ContractorsPage, CustomersPage, DashboardPage, InvoicesPage, KsefPage, LoginPage,
        ProductsPage, SettingsPage, UsersPage,
    },
    state::auth::AuthProvider,
};

pub const ROUTE_PATHS: &[&str] = &[
    "/",
    "/login",
    "/invoices",
    "/contractors",
    "/customers",
    "/products",
    "/ksef",
    "/settings",
    "/users",
];

pub const PROTECTED_ROUTE_PATHS: &[&str] = &[
    "/",
    "/invoices",
    "/contractors",
    "/customers",
    "/products",
    "/ksef",
    "/settings",
    "/users",
];

pub const PUBLIC_ROUTE_PATHS: &[&str] = &["/login"];

#[cfg(target_arch = "wasm32")]
pub fn mount_app() {
    mount_to_body(app_root);
}

pub fn app_root() -> impl IntoView {
    provide_context(crate::api::ApiClient::new());
    view! {
        <AuthProvider>
            <Router>
                <Routes>
                    <Route path="/" view=ProtectedDashboard/>
                    <Route path="/login" view=LoginPage/>
                    <Route path="/invoices" view=ProtectedInvoices/>
                    <Route path="/contractors" view=ProtectedContractors/>
                    <Route path="/customers" view=ProtectedCustomers/>
                    <Route path="/products" view=ProtectedProducts/>
                    <Route path="/ksef" view=ProtectedKsef/>
                    <Route path="/settings" view=ProtectedSettings/>
                    <Route path="/users" view=ProtectedUsers/>
                </Routes>
            </Router>
        </AuthProvider>
    }
}

#[component]
fn ProtectedDashboard() -> impl IntoView {
    view! { <RequireAuth><DashboardPage/></RequireAuth> }
}

#[component]
fn ProtectedInvoices() -> impl IntoView {
    view! { <RequireAuth><InvoicesPage/></RequireAuth> }
}

#[component]
fn ProtectedContractors() -> impl IntoView {
    view! { <RequireAuth><ContractorsPage/></RequireAuth> }
}

#[component]
fn ProtectedCustomers() -> impl IntoView {
    view! { <RequireAuth><CustomersPage/></RequireAuth> }
}

#[component]
fn ProtectedProducts() -> impl IntoView {
    view! { <RequireAuth><ProductsPage/></RequireAuth> }
}

#[component]
fn ProtectedKsef() -> impl IntoView {
    view! { <RequireAuth><KsefPage/></RequireAuth> }
}

#[component]
fn ProtectedSettings() -> impl IntoView {
    view! { <RequireAuth><SettingsPage/></RequireAuth> }
}

#[component]
fn ProtectedUsers() -> impl IntoView {
    view! { <RequireAuth><UsersPage/></RequireAuth> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn route_paths_cover_every_page() {
        for path in ["/invoices", "/ksef", "/settings", "/users"] {
            assert!(ROUTE_PATHS.contains(&path));
        }
    }

    #[test]
    fn protected_routes_are_subset_of_all() {
        let all: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        for path in PROTECTED_ROUTE_PATHS {
            assert!(
                all.contains(path),
                "protected path missing from ROUTE_PATHS: {}",
                path
            );
        }
    }

    #[test]
    fn login_is_the_only_public_route() {
        let protected: HashSet<&str> = PROTECTED_ROUTE_PATHS.iter().copied().collect();
        for path in PUBLIC_ROUTE_PATHS {
            assert!(!protected.contains(path));
        }
        assert_eq!(
            PROTECTED_ROUTE_PATHS.len() + PUBLIC_ROUTE_PATHS.len(),
            ROUTE_PATHS.len()
        );
    }

    #[test]
    fn no_duplicate_routes() {
        let unique: HashSet<&str> = ROUTE_PATHS.iter().copied().collect();
        assert_eq!(unique.len(), ROUTE_PATHS.len());
    }
}
