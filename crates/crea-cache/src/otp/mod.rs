//! One-time code storage module.

mod otp_store;

pub use otp_store::{
    generate_code, OtpIssue, OtpPolicy, OtpPurpose, OtpRecord, OtpStore, OtpVerdict, OTP_LENGTH,
};
