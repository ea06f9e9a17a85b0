pub mod formatting;
pub mod reconciler;
pub mod response_codes;
pub mod result_page;
pub mod result_view;
pub mod signature;
pub mod transaction_client;
pub mod view_registry;
