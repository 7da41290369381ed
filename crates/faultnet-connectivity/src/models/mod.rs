// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Fault network data model: sections, clusters, jumps and rupture paths.
*/

pub mod cluster;
pub mod jump;
pub mod rupture;
pub mod section;

pub use cluster::FaultSubsectionCluster;
pub use jump::Jump;
pub use rupture::ClusterRupture;
pub use section::{FaultSection, TracePoint};
