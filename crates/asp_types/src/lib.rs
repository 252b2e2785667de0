/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Typed records for the analysis server's JSON protocol, together with the
//! codec that moves them in and out of parsed JSON values.
//!
//! Every record type is a plain value struct whose declaration is the wire
//! schema: field order is encoding order, `Option` fields are omitted from
//! the encoded object when unset, and equality is field-wise. Decoding
//! reports structured failures ([`DecodeError`]) carrying the path of the
//! offending field. Options and feedback for refactorings are selected by a
//! [`RefactoringKind`] the dispatch layer supplies out of band; nothing in
//! the JSON itself discriminates them.
//!
//! The transport sits outside this crate on both ends: decoding starts from
//! an already-parsed [`serde_json::Value`] and encoding hands one back.

pub mod codec;
pub mod common;
pub mod completion;
pub mod refactoring;

// Re-export all the public items so callers can use `asp_types::CompletionSuggestion` directly.
pub use codec::*;
pub use common::*;
pub use completion::*;
pub use refactoring::*;
