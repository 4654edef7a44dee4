// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod ecies;

pub use ecies::{ConfigError, EciesConfig, ENV_PADDING_FALLBACK, ENV_SECRET_PADDING};
