//! Use-case services over the resolution pipeline.

pub mod address_service;
