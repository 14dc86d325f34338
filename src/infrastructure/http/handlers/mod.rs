//! HTTP handlers module

pub mod health;
pub mod payments;
pub mod pricing;
pub mod promotions;

pub use health::handle_health_request;
pub use payments::{
    handle_admin_payment_get, handle_admin_payment_status, handle_admin_payments_list,
    handle_payment_create, handle_payment_proof, handle_payments_list,
};
pub use pricing::{handle_admin_pricing_update, handle_public_pricing};
pub use promotions::{
    handle_active_promotions, handle_admin_promotion_decide, handle_admin_promotion_get,
    handle_admin_promotions_list, handle_promotion_cancel, handle_promotion_click,
    handle_promotion_create, handle_promotion_proof, handle_promotions_list,
};
