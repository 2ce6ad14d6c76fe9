// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Manual pinning endpoint: POST /api/upload-to-pinata

pub mod handler;
pub mod request;
pub mod response;

pub use handler::upload_to_pinata_handler;
pub use request::PinRequest;
pub use response::PinResponse;
