// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Inkpost Contributors

//! Clients for external services.

pub mod deepseek;

pub use deepseek::DeepSeekClient;
