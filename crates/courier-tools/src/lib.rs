// SPDX-FileCopyrightText: 2026 Courier Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tools the assistant may call during a run.
//!
//! The set is closed: every supported tool is a [`Tool`] variant and
//! dispatch is an exhaustive match. Names the assistant sends that do not
//! parse into a variant fail with `UnknownTool`.

pub mod catalog;
pub mod dispatcher;
pub mod weather;

pub use catalog::{Product, top_products};
pub use dispatcher::{Tool, ToolDispatcher};
