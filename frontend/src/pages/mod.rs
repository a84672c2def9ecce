pub mod contractors;
pub mod customers;
pub mod dashboard;
pub mod invoices;
pub mod ksef;
pub mod login;
pub mod products;
pub mod settings;
pub mod users;

pub use contractors::ContractorsPage;
pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use invoices::InvoicesPage;
pub use ksef::KsefPage;
pub use login::LoginPage;
pub use products::ProductsPage;
pub use settings::SettingsPage;
pub use users::UsersPage;
