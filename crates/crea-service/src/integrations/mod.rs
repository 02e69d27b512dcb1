//! Outbound integrations: mail delivery and the payment gateway

pub mod mailer;
pub mod razorpay;

pub use mailer::{LogMailer, SmtpMailer};
pub use razorpay::RazorpayClient;
