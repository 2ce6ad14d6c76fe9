// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod registry;
pub mod types;

pub use errors::{classify_rpc_failure, RegistryError, REGISTRATION_REJECTED_MESSAGE};
pub use registry::{
    flagged_images, high_risk_images, EthersRegistry, ImageRegistry, RegistryReader,
    MAX_SCANNED_IMAGES,
};
pub use types::{RegisteredImage, RegistrationReceipt, RegistrationRequest};
