// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
# SoC Simulator Service Layer

Transport-agnostic boundary between adapters (HTTP today) and the chip
simulation domain.

```text
  HTTP adapter (socsim-api)
            ↓
  TelemetryService (this crate)
            ↓
  SessionRegistry → ChipEngine
```

Adapters depend on the `TelemetryService` trait only. Session tokens are
opaque to this layer; the adapter decides how they travel (cookie, header).
*/

pub mod impls;
pub mod traits;
pub mod types;

pub use impls::TelemetryServiceImpl;
pub use traits::TelemetryService;
pub use types::{ServiceError, ServiceResult, SessionMode, SessionTelemetry};

pub use socsim_chip::ChipSnapshot;
pub use socsim_session_registry::SessionToken;
