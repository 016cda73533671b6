//! HR-facing interview management: definition CRUD, the CSV export used by
//! both the download endpoint and the retention sweep, per-HR analytics,
//! and single-slot re-evaluation.

pub mod analytics;
pub mod export;
pub mod handlers;
