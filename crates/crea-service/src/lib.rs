//! # crea-service
//!
//! Application layer for the CREA portal: services, DTOs, file storage and
//! the outbound mail and payment integrations.

pub mod dto;
pub mod integrations;
pub mod services;
pub mod storage;

pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
