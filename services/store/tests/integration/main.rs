mod helpers;

mod auth_test;
mod cart_test;
mod checkout_test;
mod router_test;
