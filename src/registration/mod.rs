// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod gate;

pub use gate::{
    decide, RegistrationDecision, RegistrationFailure, RegistrationGate, RegistrationOutcome,
    SkipReason,
};
