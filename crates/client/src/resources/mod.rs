//! Typed clients for the echo control-plane REST API.

pub mod apps;
pub mod balance;
pub mod payments;
pub mod users;

pub use apps::{App, AppsResource};
pub use balance::{Balance, BalanceResource, FreeBalance};
pub use payments::{PaymentLink, PaymentLinkRequest, PaymentsResource};
pub use users::{Referral, User, UsersResource};
